//! Question record types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// A single answer option.
///
/// Source files mix plain strings with richer option objects, so both
/// shapes are accepted and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerOption {
    /// Plain option text.
    Text(String),
    /// Option object, e.g. `{ "texto": "Agua", "correcta": true }`.
    Record(Map<String, Value>),
    /// Any other JSON value (numbers, booleans).
    Other(Value),
}

impl From<&str> for AnswerOption {
    fn from(text: &str) -> Self {
        AnswerOption::Text(text.to_string())
    }
}

/// A trivia question as stored in the question files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique id, assigned as max existing id + 1.
    pub id: u64,
    /// Category name, compared case-insensitively.
    pub categoria: String,
    /// Answer options in stored order.
    #[serde(default)]
    pub opciones: Vec<AnswerOption>,
    /// Every other field (question text, answer, difficulty...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Question {
    /// Check whether this question belongs to `category`, ignoring case.
    ///
    /// `category` is expected to be lowercased already.
    pub fn in_category(&self, category: &str) -> bool {
        self.categoria.to_lowercase() == category
    }
}

/// Body of a question submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewQuestion {
    /// Required category.
    #[serde(default)]
    pub categoria: Option<String>,
    /// Required, non-empty option list.
    #[serde(default)]
    pub opciones: Option<Vec<AnswerOption>>,
    /// Pass-through fields. A client-supplied `id` lands here and is dropped.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewQuestion {
    /// Check the required fields.
    pub fn validate(&self) -> Result<(), ApiError> {
        match self.categoria.as_deref().map(str::trim) {
            None | Some("") => {
                return Err(ApiError::InvalidQuestion(
                    "categoria is required".to_string(),
                ))
            }
            Some(_) => {}
        }

        match &self.opciones {
            Some(opciones) if !opciones.is_empty() => Ok(()),
            _ => Err(ApiError::InvalidQuestion(
                "opciones must contain at least one option".to_string(),
            )),
        }
    }

    /// Build the stored record under the server-assigned `id`.
    pub fn into_question(mut self, id: u64) -> Question {
        self.extra.remove("id");

        Question {
            id,
            categoria: self.categoria.unwrap_or_default(),
            opciones: self.opciones.unwrap_or_default(),
            extra: self.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn deserializes_mixed_option_shapes() {
        let question: Question = serde_json::from_value(json!({
            "id": 7,
            "categoria": "Historia",
            "pregunta": "¿En qué año cayó Constantinopla?",
            "opciones": ["1453", { "texto": "1492", "correcta": false }],
            "respuesta": "1453"
        }))
        .unwrap();

        assert_eq!(question.id, 7);
        assert_eq!(question.opciones[0], AnswerOption::from("1453"));
        assert!(matches!(question.opciones[1], AnswerOption::Record(_)));

        let numeric: Question = serde_json::from_value(json!({
            "id": 8,
            "categoria": "ciencia",
            "opciones": [7, 8]
        }))
        .unwrap();
        assert_eq!(numeric.opciones[0], AnswerOption::Other(json!(7)));
        assert_eq!(question.extra.get("respuesta"), Some(&json!("1453")));
    }

    #[test]
    fn extra_fields_survive_serialization() {
        let value = json!({
            "id": 1,
            "categoria": "ciencia",
            "opciones": ["Agua", "Aire"],
            "texto": "¿Qué es H2O?"
        });
        let question: Question = serde_json::from_value(value.clone()).unwrap();

        assert_eq!(serde_json::to_value(&question).unwrap(), value);
    }

    #[test]
    fn missing_options_default_to_empty() {
        let question: Question =
            serde_json::from_value(json!({ "id": 3, "categoria": "deportes" })).unwrap();
        assert!(question.opciones.is_empty());
    }

    #[test]
    fn category_match_ignores_case() {
        let question: Question =
            serde_json::from_value(json!({ "id": 1, "categoria": "Cultura General" })).unwrap();

        assert!(question.in_category("cultura general"));
        assert!(!question.in_category("cultura"));
    }

    #[test]
    fn submission_requires_category() {
        let submission: NewQuestion =
            serde_json::from_value(json!({ "opciones": ["a"] })).unwrap();
        assert!(submission.validate().is_err());

        let blank: NewQuestion =
            serde_json::from_value(json!({ "categoria": "  ", "opciones": ["a"] })).unwrap();
        assert!(blank.validate().is_err());
    }

    #[test]
    fn submission_requires_options() {
        let missing: NewQuestion =
            serde_json::from_value(json!({ "categoria": "ciencia" })).unwrap();
        assert!(missing.validate().is_err());

        let empty: NewQuestion =
            serde_json::from_value(json!({ "categoria": "ciencia", "opciones": [] })).unwrap();
        assert!(empty.validate().is_err());
    }

    #[test]
    fn server_id_replaces_client_id() {
        let submission: NewQuestion = serde_json::from_value(json!({
            "id": 999,
            "categoria": "ciencia",
            "texto": "¿Qué es H2O?",
            "opciones": ["Agua", "Aire"]
        }))
        .unwrap();
        submission.validate().unwrap();

        let question = submission.into_question(42);

        assert_eq!(question.id, 42);
        assert_eq!(question.categoria, "ciencia");
        assert!(!question.extra.contains_key("id"));
        assert_eq!(question.extra.get("texto"), Some(&json!("¿Qué es H2O?")));
    }
}
