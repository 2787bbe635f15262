//! Grouping of result records by direction and intermediate node, and the
//! intersection of nodes reached from both sides.

use crate::error::Result;
use crate::explain::types::{GroupedResults, ResultRecord};

/// Partition records by the direction recorded in their provenance, then by `$output`.
///
/// Record order within a slot follows input order. A record without resolvable
/// provenance fails the whole grouping.
pub fn group_result_by_direction_and_output(records: Vec<ResultRecord>) -> Result<GroupedResults> {
    let mut grouped = GroupedResults::default();
    for record in records {
        let direction = record.provenance()?.source;
        grouped
            .side_mut(direction)
            .entry(record.output.clone())
            .or_default()
            .push(record);
    }
    Ok(grouped)
}

/// Intermediate node ids reached from both the left and the right side.
pub fn find_intersections(grouped: &GroupedResults) -> Vec<String> {
    grouped
        .left
        .keys()
        .filter(|id| grouped.right.contains_key(*id))
        .cloned()
        .collect()
}
