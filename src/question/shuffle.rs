//! Answer-option shuffling.

use rand::seq::SliceRandom;
use rand::Rng;

use super::types::{AnswerOption, Question};

/// Return a shuffled copy of `options` (Fisher-Yates).
pub fn shuffle_options<R: Rng + ?Sized>(options: &[AnswerOption], rng: &mut R) -> Vec<AnswerOption> {
    let mut copy = options.to_vec();
    copy.shuffle(rng);
    copy
}

/// Copy of `question` with its options in a fresh random order.
pub fn with_shuffled_options<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Question {
    Question {
        opciones: shuffle_options(&question.opciones, rng),
        ..question.clone()
    }
}
