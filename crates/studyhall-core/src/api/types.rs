//! Wire types for the study backend.
//!
//! Field names follow the backend's JSON (snake_case).

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const DEFAULT_QUIZ_QUESTIONS: u32 = 5;
pub const DEFAULT_FLASHCARDS: u32 = 10;

// ── Documents ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub id: String,
    pub filename: String,
    pub chunks_count: u32,
    pub status: String,
}

// ── Questions ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
    pub document_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub text: String,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<Source>,
    pub confidence: f64,
}

// ── Quizzes ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    #[default]
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
}

impl std::str::FromStr for QuestionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "multiple_choice" => Ok(QuestionType::MultipleChoice),
            "true_false" => Ok(QuestionType::TrueFalse),
            "short_answer" => Ok(QuestionType::ShortAnswer),
            _ => Err(ValidationError::InvalidValue {
                field: "question_type".into(),
                message: format!("unknown question type '{s}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizRequest {
    pub topic: Option<String>,
    pub num_questions: u32,
    pub question_type: QuestionType,
    pub document_ids: Option<Vec<String>>,
}

impl Default for QuizRequest {
    fn default() -> Self {
        Self {
            topic: None,
            num_questions: DEFAULT_QUIZ_QUESTIONS,
            question_type: QuestionType::default(),
            document_ids: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub topic: String,
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    /// Number of answers matching the correct option.
    ///
    /// `answers[i]` is the chosen option for question `i`; `None` or a missing
    /// entry counts as wrong.
    pub fn score(&self, answers: &[Option<usize>]) -> usize {
        self.questions
            .iter()
            .zip(answers.iter().chain(std::iter::repeat(&None)))
            .filter(|(q, a)| **a == Some(q.correct_answer))
            .count()
    }
}

// ── Flashcards ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashcardRequest {
    pub text: Option<String>,
    pub num_cards: u32,
    pub document_ids: Option<Vec<String>>,
}

impl Default for FlashcardRequest {
    fn default() -> Self {
        Self {
            text: None,
            num_cards: DEFAULT_FLASHCARDS,
            document_ids: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub importance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashcardSet {
    pub cards: Vec<Flashcard>,
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignIn {
    pub username: String,
    pub password: String,
}

impl SignIn {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::MissingField("Username is required"));
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingField("Password is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUp {
    pub username: String,
    pub password: String,
    pub year: String,
    pub major: String,
}

impl SignUp {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::MissingField("Username is required"));
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingField("Password is required"));
        }
        if self.year.is_empty() {
            return Err(ValidationError::MissingField("Please select your year"));
        }
        if self.major.is_empty() {
            return Err(ValidationError::MissingField("Please select your major"));
        }
        Ok(())
    }
}

/// User record returned by the auth endpoints. Treated as opaque apart
/// from the username shown on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub last_login: String,
}

// ── Health ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum HealthStatus {
    Ok { data: serde_json::Value },
    Error { message: String },
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, HealthStatus::Ok { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz() -> Quiz {
        let question = |correct| QuizQuestion {
            question: "?".into(),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_answer: correct,
            explanation: String::new(),
        };
        Quiz {
            topic: "cells".into(),
            questions: vec![question(0), question(2), question(1)],
        }
    }

    #[test]
    fn score_counts_matching_answers() {
        assert_eq!(quiz().score(&[Some(0), Some(2), Some(1)]), 3);
        assert_eq!(quiz().score(&[Some(0), Some(1), None]), 1);
    }

    #[test]
    fn score_treats_missing_answers_as_wrong() {
        assert_eq!(quiz().score(&[]), 0);
        assert_eq!(quiz().score(&[Some(0)]), 1);
    }

    #[test]
    fn sign_up_validation_order() {
        let mut form = SignUp {
            username: "  ".into(),
            password: String::new(),
            year: String::new(),
            major: String::new(),
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingField("Username is required"))
        );
        form.username = "seahawk".into();
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingField("Password is required"))
        );
        form.password = "hunter2".into();
        form.year = "Junior".into();
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingField("Please select your major"))
        );
        form.major = "Marine Biology".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn question_type_parses_and_serializes() {
        assert_eq!("true-false".parse(), Ok(QuestionType::TrueFalse));
        assert_eq!("Short_Answer".parse(), Ok(QuestionType::ShortAnswer));
        assert!("essay".parse::<QuestionType>().is_err());
        assert_eq!(
            serde_json::to_value(QuestionType::MultipleChoice).unwrap(),
            serde_json::json!("multiple_choice")
        );
    }

    #[test]
    fn quiz_request_defaults() {
        let req = QuizRequest::default();
        assert_eq!(req.num_questions, 5);
        assert_eq!(req.question_type, QuestionType::MultipleChoice);
        assert_eq!(FlashcardRequest::default().num_cards, 10);
    }

    #[test]
    fn answer_decodes_backend_payload() {
        let answer: Answer = serde_json::from_value(serde_json::json!({
            "answer": "Mitochondria",
            "sources": [{"text": "The powerhouse...", "score": 0.91}],
            "confidence": 0.82
        }))
        .unwrap();
        assert_eq!(answer.sources.len(), 1);
        assert!((answer.sources[0].score - 0.91).abs() < 1e-9);
    }
}
