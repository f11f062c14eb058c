//! Question records, submissions, and option shuffling.

pub mod shuffle;
pub mod types;

pub use shuffle::{shuffle_options, with_shuffled_options};
pub use types::{AnswerOption, NewQuestion, Question};
