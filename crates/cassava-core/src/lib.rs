//! cassava-core - UI-agnostic document model + storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::Document;
pub use error::{CassavaError, Result};

pub use cassava_engine::engine::{Address, Grid, ReadPolicy};
