//! Question storage.
//!
//! - [`json_files`]: the flat JSON files the service ships with
//! - [`memory`]: in-process backend for tests

pub mod json_files;
pub mod memory;

use crate::error::StoreError;
use crate::question::Question;

pub use json_files::{JsonFileStore, SourceFile};
pub use memory::MemoryStore;

/// Storage backend for questions.
///
/// Implementations are blocking; async callers run them on the blocking pool.
pub trait QuestionRepository: Send + Sync {
    /// Load every stored question, in source order.
    fn load_all(&self) -> Result<Vec<Question>, StoreError>;

    /// Persist one newly created question.
    fn append(&self, question: &Question) -> Result<(), StoreError>;
}
