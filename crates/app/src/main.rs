use std::collections::HashSet;
use std::fmt;
use std::io::{BufRead, Write};

use services::{AppServices, Fault, QuizFilter};
use storage::repository::Storage;
use trivia_core::model::{QuestionDraft, QuestionId};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- play [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- seed [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://trivia.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRIVIA_DB_URL");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Seed,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }
}

struct Args {
    db_url: String,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("TRIVIA_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://trivia.sqlite3".into(), normalize_sqlite_url);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: play when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so
    // core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    log::info!("opening {}", parsed.db_url);
    let storage = Storage::sqlite(&parsed.db_url).await?;
    let services = AppServices::new(&storage);

    match cmd {
        Command::Play => play(&services).await,
        Command::Seed => seed(&services).await,
    }
}

async fn play(services: &AppServices) -> Result<(), Box<dyn std::error::Error>> {
    let categories = services.categories().list_categories().await?;

    println!("Categories:");
    println!("  0: All");
    for (id, label) in &categories.categories {
        println!("  {id}: {label}");
    }

    let choice = prompt("Pick a category id: ")?;
    let raw: u64 = choice.trim().parse().unwrap_or(0);
    let filter = QuizFilter::from_raw(raw);

    let quiz = services.quiz();
    let mut seen: HashSet<QuestionId> = HashSet::new();
    let mut score = 0usize;
    let mut asked = 0usize;

    loop {
        let round = match quiz.next_question(filter, &seen).await {
            Ok(round) => round,
            Err(Fault::MalformedRequest) => {
                eprintln!("unknown category id: {raw}");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        let Some(question) = round.question else {
            break;
        };
        seen.insert(QuestionId::new(question.id));
        asked += 1;

        println!();
        println!("[{}] {}", round.current_category, question.question);
        let answer = prompt("Your answer: ")?;
        if answer.trim().eq_ignore_ascii_case(question.answer.trim()) {
            println!("Correct!");
            score += 1;
        } else {
            println!("The answer was: {}", question.answer);
        }
    }

    println!();
    println!("Quiz over. Score: {score}/{asked}");
    log::info!("session finished, {asked} questions served");
    Ok(())
}

const SAMPLE_QUESTIONS: [(&str, &str, u64, u32); 6] = [
    ("What is the heaviest organ in the human body?", "The Liver", 1, 4),
    ("Who discovered penicillin?", "Alexander Fleming", 1, 3),
    ("Which Dutch painter cut off his own ear?", "Van Gogh", 2, 2),
    ("What is the largest lake in Africa?", "Lake Victoria", 3, 2),
    ("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 4, 2),
    ("Which country won the first ever soccer World Cup in 1930?", "Uruguay", 6, 4),
];

async fn seed(services: &AppServices) -> Result<(), Box<dyn std::error::Error>> {
    let questions = services.questions();
    let mut created = 0usize;
    for (question, answer, category, difficulty) in SAMPLE_QUESTIONS {
        questions
            .create_question(QuestionDraft::new(question, answer, category, difficulty))
            .await?;
        created += 1;
    }
    log::info!("seeded {created} questions");
    println!("Seeded {created} questions.");
    Ok(())
}

fn prompt(label: &str) -> Result<String, std::io::Error> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
