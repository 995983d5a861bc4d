//! Quiz and flashcard generation.

use clap::Args;
use studyhall_core::api::{
    FlashcardRequest, FlashcardSet, QuestionType, Quiz, QuizRequest, DEFAULT_FLASHCARDS,
    DEFAULT_QUIZ_QUESTIONS,
};
use studyhall_core::Config;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Args)]
pub struct QuizArgs {
    /// Topic to focus on (defaults to all uploaded material)
    #[arg(long)]
    topic: Option<String>,
    /// Number of questions
    #[arg(long, default_value_t = DEFAULT_QUIZ_QUESTIONS, value_parser = clap::value_parser!(u32).range(1..=50))]
    count: u32,
    /// multiple_choice, true_false or short_answer
    #[arg(long = "type", default_value = "multiple_choice")]
    question_type: QuestionType,
    /// Restrict to these document IDs (repeatable or comma-separated)
    #[arg(long = "doc")]
    docs: Vec<String>,
    /// Answer the questions interactively and get a score
    #[arg(long)]
    take: bool,
    /// Don't print the answer key
    #[arg(long, conflicts_with = "take")]
    hide_answers: bool,
    /// Print the raw JSON response
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct FlashcardArgs {
    /// Source text to build cards from (defaults to uploaded material)
    #[arg(long)]
    text: Option<String>,
    /// Number of cards
    #[arg(long, default_value_t = DEFAULT_FLASHCARDS, value_parser = clap::value_parser!(u32).range(1..=100))]
    count: u32,
    /// Restrict to these document IDs (repeatable or comma-separated)
    #[arg(long = "doc")]
    docs: Vec<String>,
    /// Print the raw JSON response
    #[arg(long)]
    json: bool,
}

pub async fn quiz(args: QuizArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let request = QuizRequest {
        topic: args.topic.filter(|t| !t.trim().is_empty()),
        num_questions: args.count,
        question_type: args.question_type,
        document_ids: super::document_ids(args.docs),
    };
    let quiz = super::client(config)?.generate_quiz(&request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&quiz)?);
        return Ok(());
    }
    if quiz.questions.is_empty() {
        return Err("No questions generated. Upload documents first, or try a different topic.".into());
    }
    if args.take {
        take_quiz(&quiz).await?;
    } else {
        println!("{}", render_quiz(&quiz, !args.hide_answers));
    }
    Ok(())
}

pub async fn flashcards(args: FlashcardArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let request = FlashcardRequest {
        text: args.text.filter(|t| !t.trim().is_empty()),
        num_cards: args.count,
        document_ids: super::document_ids(args.docs),
    };
    let set = super::client(config)?.generate_flashcards(&request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&set)?);
    } else if set.cards.is_empty() {
        return Err("No flashcards generated. Upload documents or pass --text.".into());
    } else {
        println!("{}", render_flashcards(&set));
    }
    Ok(())
}

async fn take_quiz(quiz: &Quiz) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut answers = Vec::with_capacity(quiz.questions.len());

    println!("Quiz: {}", quiz.topic);
    for (i, question) in quiz.questions.iter().enumerate() {
        println!("\n{}. {}", i + 1, question.question);
        for (j, option) in question.options.iter().enumerate() {
            println!("   {}) {option}", option_letter(j));
        }
        println!("your answer (blank to skip):");
        let line = lines.next_line().await?.unwrap_or_default();
        answers.push(parse_choice(&line, question.options.len()));
    }

    let score = quiz.score(&answers);
    println!("\nScore: {score}/{}", quiz.questions.len());
    for (i, (question, answer)) in quiz.questions.iter().zip(&answers).enumerate() {
        let verdict = if *answer == Some(question.correct_answer) { "✔" } else { "✘" };
        let correct = question
            .options
            .get(question.correct_answer)
            .map(String::as_str)
            .unwrap_or("?");
        println!(
            "{verdict} {}. {}) {correct}  {}",
            i + 1,
            option_letter(question.correct_answer),
            question.explanation
        );
    }
    Ok(())
}

fn option_letter(index: usize) -> char {
    char::from_u32('a' as u32 + index as u32).unwrap_or('?')
}

/// Accepts a letter (`b`) or a 1-based number (`2`).
fn parse_choice(input: &str, options: usize) -> Option<usize> {
    let input = input.trim().to_ascii_lowercase();
    let index = match input.chars().next()? {
        c @ 'a'..='z' if input.len() == 1 => c as usize - 'a' as usize,
        _ => input.parse::<usize>().ok()?.checked_sub(1)?,
    };
    (index < options).then_some(index)
}

fn render_quiz(quiz: &Quiz, with_answers: bool) -> String {
    let mut out = format!("Quiz: {}", quiz.topic);
    for (i, question) in quiz.questions.iter().enumerate() {
        out.push_str(&format!("\n\n{}. {}", i + 1, question.question));
        for (j, option) in question.options.iter().enumerate() {
            out.push_str(&format!("\n   {}) {option}", option_letter(j)));
        }
        if with_answers {
            out.push_str(&format!(
                "\n   answer: {}  {}",
                option_letter(question.correct_answer),
                question.explanation
            ));
        }
    }
    out
}

fn render_flashcards(set: &FlashcardSet) -> String {
    let mut out = String::new();
    for (i, card) in set.cards.iter().enumerate() {
        if i > 0 {
            out.push_str("\n\n");
        }
        out.push_str(&format!(
            "#{} [{} · importance {:.1}]\n  Q: {}\n  A: {}",
            i + 1,
            card.difficulty,
            card.importance,
            card.front,
            card.back
        ));
    }
    out
}
