pub mod index;
pub mod models;

pub use index::VectorIndex;
pub use models::{IndexEntry, SearchResult};
