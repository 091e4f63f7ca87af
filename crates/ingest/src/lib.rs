pub mod loader;

pub use loader::{load_documents, RawDocument};
