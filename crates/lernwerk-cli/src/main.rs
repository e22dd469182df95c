//! The lernwerk CLI: submit and grade learning tasks stored in a JSON file.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lernwerk", version, about = "Task lifecycle and grading for learning courses")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tasks
    List {
        /// Task collection JSON file
        #[arg(long, default_value = "tasks.json")]
        tasks: PathBuf,

        /// Only show tasks of this course
        #[arg(long)]
        course: Option<String>,
    },

    /// Record the answer to one quiz question
    Answer {
        /// Task collection JSON file
        #[arg(long, default_value = "tasks.json")]
        tasks: PathBuf,

        /// Task ID
        #[arg(long)]
        task: String,

        /// Question ID
        #[arg(long)]
        question: String,

        /// Option index, "true"/"false", or text
        #[arg(long)]
        value: String,
    },

    /// Record a free-text answer
    Write {
        /// Task collection JSON file
        #[arg(long, default_value = "tasks.json")]
        tasks: PathBuf,

        /// Task ID
        #[arg(long)]
        task: String,

        /// Answer text
        #[arg(long)]
        text: String,
    },

    /// Submit a task and grade it
    Submit {
        /// Task collection JSON file
        #[arg(long, default_value = "tasks.json")]
        tasks: PathBuf,

        /// Task ID
        #[arg(long)]
        task: String,

        /// Free-text answer (replaces the recorded one)
        #[arg(long)]
        answer: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show progress per status and grade
    Progress {
        /// Task collection JSON file
        #[arg(long, default_value = "tasks.json")]
        tasks: PathBuf,

        /// Only count tasks of this course
        #[arg(long)]
        course: Option<String>,
    },

    /// Check a task collection for authoring mistakes
    Validate {
        /// Task collection JSON file
        #[arg(long, default_value = "tasks.json")]
        tasks: PathBuf,
    },

    /// Create a sample task file and config
    Init,
}

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lernwerk=info"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List { tasks, course } => commands::list::execute(tasks, course),
        Commands::Answer {
            tasks,
            task,
            question,
            value,
        } => commands::answer::execute(tasks, task, question, value),
        Commands::Write { tasks, task, text } => commands::answer::execute_text(tasks, task, text),
        Commands::Submit {
            tasks,
            task,
            answer,
            config,
        } => commands::submit::execute(tasks, task, answer, config),
        Commands::Progress { tasks, course } => commands::progress::execute(tasks, course),
        Commands::Validate { tasks } => commands::validate::execute(tasks),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
