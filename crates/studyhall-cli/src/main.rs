use clap::{CommandFactory, Parser, Subcommand};
use studyhall_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "studyhall", version, about = "Studyhall study assistant CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pomodoro study timer with a goal checklist
    Planner(commands::planner::PlannerArgs),
    /// Check that the study backend is reachable
    Health,
    /// Upload a document for indexing
    Upload {
        /// File to upload (PDF, DOCX, TXT, ...)
        file: std::path::PathBuf,
    },
    /// Manage indexed documents
    Documents {
        #[command(subcommand)]
        action: commands::documents::DocumentsAction,
    },
    /// Ask a question about your documents
    Ask(commands::ask::AskArgs),
    /// Generate a practice quiz
    Quiz(commands::practice::QuizArgs),
    /// Generate flashcards
    Flashcards(commands::practice::FlashcardArgs),
    /// Account sign-up, sign-in and sign-out
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("STUDYHALL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::load_or_default();
    let result = match cli.command {
        Commands::Planner(args) => commands::planner::run(args, &config).await,
        Commands::Health => commands::documents::health(&config).await,
        Commands::Upload { file } => commands::documents::upload(&config, &file).await,
        Commands::Documents { action } => commands::documents::run(action, &config).await,
        Commands::Ask(args) => commands::ask::run(args, &config).await,
        Commands::Quiz(args) => commands::practice::quiz(args, &config).await,
        Commands::Flashcards(args) => commands::practice::flashcards(args, &config).await,
        Commands::Auth { action } => commands::auth::run(action, &config).await,
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "studyhall", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
