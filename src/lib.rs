pub mod acquire;
pub mod annotate;
pub mod config;
pub mod error;
pub mod extract;
pub mod graph;
pub mod http;
pub mod pipeline;

pub use annotate::{Annotator, Document, NamedEntity, RemoteAnnotator};
pub use config::Config;
pub use error::{Result, WordlitError};
pub use extract::{extract_entity_pairs, EntityPair};
pub use graph::{assemble, FlowGraph};
pub use pipeline::{build_flowchart, list_entities, Flowchart};
