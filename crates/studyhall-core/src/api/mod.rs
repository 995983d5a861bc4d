//! Client side of the study backend: document ingestion, question
//! answering, quiz and flashcard generation, and accounts.

mod client;
mod types;

pub use client::StudyClient;
pub use types::{
    Answer, DocumentResponse, Flashcard, FlashcardRequest, FlashcardSet, HealthStatus,
    QuestionRequest, QuestionType, Quiz, QuizQuestion, QuizRequest, SignIn, SignUp, Source,
    UserRecord, DEFAULT_FLASHCARDS, DEFAULT_QUIZ_QUESTIONS,
};
