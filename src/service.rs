//! Question service: the in-memory question list and the operations over it.

use std::sync::Arc;

use rand::seq::SliceRandom;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{error, info, instrument, Instrument};

use crate::error::{ApiError, StoreError};
use crate::metrics;
use crate::question::{with_shuffled_options, NewQuestion, Question};
use crate::store::QuestionRepository;

/// Number of questions in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// Category name as first seen.
    pub categoria: String,
    /// Questions in the category.
    pub total: usize,
}

/// Owns the loaded questions and the repository new ones are written to.
///
/// Reads share the list; [`QuestionService::add`] holds the write lock
/// across id assignment, persistence, and the in-memory push, so
/// concurrent submissions are serialized.
pub struct QuestionService {
    questions: Arc<RwLock<Vec<Question>>>,
    store: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    /// Load every question from `store`.
    pub fn load(store: Arc<dyn QuestionRepository>) -> Result<Self, StoreError> {
        let questions = store.load_all()?;
        info!(count = questions.len(), "Questions loaded");
        metrics::set_questions_loaded(questions.len());

        Ok(Self {
            questions: Arc::new(RwLock::new(questions)),
            store,
        })
    }

    /// Number of questions in memory.
    pub async fn len(&self) -> usize {
        self.questions.read().await.len()
    }

    /// Whether no questions are loaded.
    pub async fn is_empty(&self) -> bool {
        self.questions.read().await.is_empty()
    }

    /// Every question, options shuffled.
    pub async fn list_all(&self) -> Vec<Question> {
        let questions = self.questions.read().await;
        let mut rng = rand::thread_rng();

        questions
            .iter()
            .map(|q| with_shuffled_options(q, &mut rng))
            .collect()
    }

    /// One question picked uniformly at random, options shuffled.
    ///
    /// `None` when nothing is loaded.
    pub async fn random(&self) -> Option<Question> {
        let questions = self.questions.read().await;
        let mut rng = rand::thread_rng();

        questions
            .choose(&mut rng)
            .map(|q| with_shuffled_options(q, &mut rng))
    }

    /// Questions whose category equals `category` ignoring case, in load
    /// order, options shuffled.
    pub async fn by_category(&self, category: &str) -> Vec<Question> {
        let category = category.to_lowercase();
        let questions = self.questions.read().await;
        let mut rng = rand::thread_rng();

        questions
            .iter()
            .filter(|q| q.in_category(&category))
            .map(|q| with_shuffled_options(q, &mut rng))
            .collect()
    }

    /// Distinct categories in first-seen order, with their sizes.
    pub async fn categories(&self) -> Vec<CategoryCount> {
        category_counts(&self.questions.read().await)
    }

    /// Validate, persist, and keep a new question.
    ///
    /// The id is the current maximum plus one (1 for an empty list). The
    /// in-memory list only grows once the repository accepted the write.
    ///
    /// The commit runs on its own task, so dropping this future (a client
    /// hanging up mid-request) cannot separate the file write from the
    /// in-memory push.
    #[instrument(skip(self, submission))]
    pub async fn add(&self, submission: NewQuestion) -> Result<Question, ApiError> {
        if let Err(e) = submission.validate() {
            metrics::inc_question_add_failures();
            return Err(e);
        }

        let commit = commit(
            Arc::clone(&self.questions),
            Arc::clone(&self.store),
            submission,
        );

        let result = tokio::spawn(commit.in_current_span())
            .await
            .map_err(|e| ApiError::from(StoreError::Task(e.to_string())))
            .and_then(|result| result);

        if result.is_err() {
            metrics::inc_question_add_failures();
        }
        result
    }
}

/// Assign the id, persist, and push, all under the write lock.
async fn commit(
    questions: Arc<RwLock<Vec<Question>>>,
    store: Arc<dyn QuestionRepository>,
    submission: NewQuestion,
) -> Result<Question, ApiError> {
    let mut questions = questions.write().await;
    let id = next_id(&questions)?;
    let question = submission.into_question(id);

    let record = question.clone();
    let persisted = tokio::task::spawn_blocking(move || store.append(&record))
        .await
        .map_err(|e| StoreError::Task(e.to_string()))
        .and_then(|result| result);

    if let Err(e) = persisted {
        error!(id, error = %e, "Failed to persist question");
        return Err(e.into());
    }

    questions.push(question.clone());
    metrics::inc_questions_added();
    metrics::set_questions_loaded(questions.len());
    info!(id, categoria = %question.categoria, "Question added");

    Ok(question)
}

/// Max id plus one, starting from 1.
fn next_id(questions: &[Question]) -> Result<u64, ApiError> {
    let max = questions.iter().map(|q| q.id).max().unwrap_or(0);
    max.checked_add(1)
        .ok_or(ApiError::IdsExhausted { max })
}

/// Count questions per category, in first-seen order.
///
/// Categories differing only in case are counted together under the
/// spelling seen first.
pub fn category_counts(questions: &[Question]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();

    for question in questions {
        let key = question.categoria.to_lowercase();
        match counts.iter_mut().find(|c| c.categoria.to_lowercase() == key) {
            Some(count) => count.total += 1,
            None => counts.push(CategoryCount {
                categoria: question.categoria.clone(),
                total: 1,
            }),
        }
    }

    counts
}
