use std::path::PathBuf;

use certquiz::Quiz;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON question bank to load
    #[arg(short, long)]
    questions: PathBuf,

    /// Directory for score history and learned-question state
    #[arg(short, long, default_value = "storage")]
    storage: PathBuf,

    /// Ask at most this many questions per run
    #[arg(short, long)]
    limit: Option<usize>,

    /// Keep the bank in file order instead of shuffling
    #[arg(long)]
    no_shuffle: bool,
}

fn main() {
    // Logging goes to stderr; initialize before the terminal is taken over.
    env_logger::init();

    let args = Args::parse();

    let quiz = match Quiz::from_json(&args.questions, &args.storage) {
        Ok(quiz) => quiz.with_limit(args.limit),
        Err(e) => {
            eprintln!("Failed to load questions: {}", e);
            std::process::exit(1);
        }
    };
    let quiz = if args.no_shuffle {
        quiz.without_shuffle()
    } else {
        quiz
    };

    if let Err(e) = quiz.run() {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
