pub mod config;
pub mod error;
pub mod concept;
pub mod metakg;
pub mod execution;
pub mod explain;

pub use config::Config;
pub use error::{KgexplainError, Result};
pub use concept::{ConceptRecord, IdValue, PrimaryId};
pub use explain::{Explainer, ExplainResponse, PathRecord};
pub use metakg::{MetaKg, MetaKgIndex};
