use std::path::{Path, PathBuf};

use clap::Parser;
use examroom::{ExamRoom, QuizSettings, SelectionCount};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the question bank from
    #[arg(short, long, default_value = "questions.json")]
    questions: PathBuf,

    /// JSON file the results are appended to
    #[arg(short, long, default_value = "results.json")]
    results: PathBuf,

    /// Questions per quiz: 'all' or a positive number
    #[arg(short = 'n', long, default_value = "all")]
    count: SelectionCount,

    /// Time limit per quiz in seconds
    #[arg(short, long, default_value_t = 300)]
    time_limit: u64,

    /// File the log is written to (the terminal belongs to the UI)
    #[arg(long, default_value = "examroom.log")]
    log_file: PathBuf,
}

fn setup_logging(path: &Path) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(fern::log_file(path)?)
        .apply()?;
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = setup_logging(&args.log_file) {
        eprintln!("Error setting up logging: {}", e);
        std::process::exit(1);
    }

    let settings = QuizSettings {
        question_count: args.count,
        time_limit_secs: args.time_limit,
    };

    let room = match ExamRoom::from_files(&args.questions, &args.results, settings) {
        Ok(room) => room,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = room.run() {
        eprintln!("Error running examroom: {}", e);
        std::process::exit(1);
    }
}
