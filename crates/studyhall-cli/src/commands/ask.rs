use clap::Args;
use studyhall_core::api::Answer;
use studyhall_core::Config;

#[derive(Args)]
pub struct AskArgs {
    /// The question
    #[arg(required = true, num_args = 1..)]
    question: Vec<String>,
    /// Restrict retrieval to these document IDs (repeatable or comma-separated)
    #[arg(long = "doc")]
    docs: Vec<String>,
    /// Print the raw JSON response
    #[arg(long)]
    json: bool,
}

pub async fn run(args: AskArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let question = args.question.join(" ");
    if question.trim().is_empty() {
        return Err("question is empty".into());
    }
    let client = super::client(config)?;
    let answer = client
        .ask(&question, super::document_ids(args.docs))
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
    } else {
        println!("{}", render(&answer));
    }
    Ok(())
}

fn render(answer: &Answer) -> String {
    let mut out = format!(
        "{}\n\nconfidence: {:.0}%",
        answer.answer.trim(),
        answer.confidence * 100.0
    );
    if !answer.sources.is_empty() {
        out.push_str("\nsources:");
        for (i, source) in answer.sources.iter().enumerate() {
            out.push_str(&format!(
                "\n  {}. ({:.0}%) {}",
                i + 1,
                source.score * 100.0,
                snippet(&source.text, 160)
            ));
        }
    }
    out
}

/// First `max` characters of `text` on one line.
fn snippet(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        return flat;
    }
    let cut: String = flat.chars().take(max).collect();
    format!("{}…", cut.trim_end())
}
