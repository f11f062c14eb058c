//! In-memory question store for unit testing.
//!
//! Holds questions behind a mutex and can be told to fail writes, so the
//! service can be exercised without touching the filesystem.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::QuestionRepository;
use crate::error::StoreError;
use crate::question::Question;

/// In-memory question store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Questions returned by `load_all`.
    seed: Arc<Mutex<Vec<Question>>>,
    /// Questions passed to `append`.
    appended: Arc<Mutex<Vec<Question>>>,
    /// Whether `append` should fail.
    fail_writes: Arc<AtomicBool>,
    /// Simulated write latency in milliseconds.
    write_delay_ms: Arc<AtomicU64>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with `questions`.
    pub fn with_questions(questions: Vec<Question>) -> Self {
        let store = Self::new();
        if let Ok(mut seed) = store.seed.lock() {
            *seed = questions;
        }
        store
    }

    /// Make subsequent appends fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make each append block for `delay` before storing.
    pub fn set_write_delay(&self, delay: Duration) {
        self.write_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Questions appended so far.
    pub fn appended(&self) -> Vec<Question> {
        self.appended
            .lock()
            .map(|appended| appended.clone())
            .unwrap_or_default()
    }
}

impl QuestionRepository for MemoryStore {
    fn load_all(&self) -> Result<Vec<Question>, StoreError> {
        let seed = self
            .seed
            .lock()
            .map_err(|e| StoreError::Task(e.to_string()))?;
        let appended = self
            .appended
            .lock()
            .map_err(|e| StoreError::Task(e.to_string()))?;

        Ok(seed.iter().chain(appended.iter()).cloned().collect())
    }

    fn append(&self, question: &Question) -> Result<(), StoreError> {
        let delay_ms = self.write_delay_ms.load(Ordering::SeqCst);
        if delay_ms > 0 {
            std::thread::sleep(Duration::from_millis(delay_ms));
        }

        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Write {
                path: "memory".into(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "mock write failure"),
            });
        }

        self.appended
            .lock()
            .map_err(|e| StoreError::Task(e.to_string()))?
            .push(question.clone());
        Ok(())
    }
}
