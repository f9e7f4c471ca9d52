use std::fs::File;
use std::path::PathBuf;
use std::process;
use std::sync::Mutex;

use clap::Parser;
use cyber_quiz::{
    BuiltinModule, QuestionSet, Quiz, QuizError, QuizSummary, load_question_set_from_json,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Cybersecurity quizzes in the terminal", long_about = None)]
struct Args {
    /// JSON question set to offer instead of the bundled modules (repeatable)
    #[arg(short, long)]
    questions: Vec<PathBuf>,

    /// Only offer this bundled module
    #[arg(short, long, value_enum, conflicts_with = "questions")]
    module: Option<BuiltinModule>,

    /// List the bundled modules and exit
    #[arg(long)]
    list: bool,

    /// Validate the question sets and exit without starting the quiz
    #[arg(long)]
    check: bool,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the result of the last completed quiz as JSON on exit
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), QuizError> {
    if let Some(path) = &args.log_file {
        init_logging(File::create(path)?);
    }

    if args.list {
        for module in BuiltinModule::all() {
            let set = module.question_set()?;
            println!("{:<20} {}", module.slug(), set.title);
        }
        return Ok(());
    }

    let sets = load_sets(&args)?;

    if args.check {
        for set in &sets {
            println!("ok  {} ({} questions)", set.title, set.questions.len());
        }
        return Ok(());
    }

    let summary = Quiz::new(sets)?.run()?;

    if args.json {
        if let Some(summary) = summary {
            println!("{}", summary_json(&summary)?);
        }
    }

    Ok(())
}

fn summary_json(summary: &QuizSummary) -> Result<String, QuizError> {
    Ok(serde_json::to_string_pretty(summary)?)
}

fn load_sets(args: &Args) -> Result<Vec<QuestionSet>, QuizError> {
    if !args.questions.is_empty() {
        return args
            .questions
            .iter()
            .map(|path| load_question_set_from_json(path).map_err(QuizError::from))
            .collect();
    }

    let modules = match args.module {
        Some(module) => vec![module],
        None => BuiltinModule::all().to_vec(),
    };
    modules
        .into_iter()
        .map(|module| module.question_set().map_err(QuizError::from))
        .collect()
}

/// The terminal UI owns stdout, so logs only ever go to a file.
fn init_logging(file: File) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cyber_quiz=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}
