//! Relation extraction: dependency-grammar pair mining over parsed documents.
//!
//! Scans a document's token stream for clause anchors and emits
//! (subject, object) pairs from their left/right children.

mod pairs;

pub use pairs::extract_entity_pairs;

use serde::{Deserialize, Serialize};

/// A candidate directed relation: subject acts toward object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityPair {
    pub subject: String,
    pub object: String,
}
