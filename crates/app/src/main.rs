use std::fmt;
use std::io;
use std::path::PathBuf;

use services::{Entropy, QuizRequest, QuizService, SamplingStrategy};
use storage::{EmbeddedBank, JsonFileSource, QuestionBankSource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod terminal;

use crate::config::load_settings;
use crate::terminal::{ExamExit, Recovery, Terminal};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { raw: String },
    InvalidStrategy { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidStrategy { raw } => write!(f, "invalid --strategy value: {raw}"),
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
    eprintln!("  cargo run -p app -- exam  [options]   # interactive practice exam (default)");
    eprintln!("  cargo run -p app -- stats [options]   # print bank limits and exit");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <file>       extra settings file (toml/json/yaml)");
    eprintln!("  --bank <file>         JSON question bank (default: embedded bank)");
    eprintln!("  -c, --choice <n>      default number of single-choice questions");
    eprintln!("  -j, --judge <n>       default number of true/false questions");
    eprintln!("  --strategy <name>     stratified | uniform");
    eprintln!("  --seed <u64>          reproducible sampling");
    eprintln!("  -y, --yes             submit without asking for confirmation");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ__BANK_PATH, QUIZ__CHOICE_COUNT, QUIZ__JUDGE_COUNT, QUIZ__STRATEGY, QUIZ__SEED");
    eprintln!("  RUST_LOG (default: app=info,services=info)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Exam,
    Stats,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "exam" => Some(Self::Exam),
            "stats" => Some(Self::Stats),
            _ => None,
        }
    }
}

/// Command-line overrides; anything unset falls back to the loaded settings.
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    bank: Option<PathBuf>,
    choice: Option<String>,
    judge: Option<String>,
    strategy: Option<SamplingStrategy>,
    seed: Option<u64>,
    auto_confirm: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => parsed.config = Some(require_value(args, "--config")?.into()),
                "--bank" => parsed.bank = Some(require_value(args, "--bank")?.into()),
                "-c" | "--choice" => parsed.choice = Some(require_value(args, "--choice")?),
                "-j" | "--judge" => parsed.judge = Some(require_value(args, "--judge")?),
                "--strategy" => {
                    let value = require_value(args, "--strategy")?;
                    let strategy = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidStrategy { raw: value.clone() })?;
                    parsed.strategy = Some(strategy);
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let seed = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    parsed.seed = Some(seed);
                }
                "-y" | "--yes" => parsed.auto_confirm = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=info,services=info,storage=info", env!("CARGO_PKG_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: an exam when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Exam,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with('-') => Command::Exam,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            io::Error::new(io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };
    if !argv.is_empty() && !argv[0].starts_with('-') {
        argv.remove(0);
    }

    let args = Args::parse(&mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    let settings = load_settings(args.config.as_deref())?;
    tracing::debug!(?settings, "configuration loaded");

    let source: Box<dyn QuestionBankSource> = match args.bank.or(settings.bank_path) {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(EmbeddedBank),
    };
    let service = QuizService::from_source(source.as_ref())?
        .with_strategy(args.strategy.unwrap_or(settings.strategy))
        .with_entropy(Entropy::from_seed(args.seed.or(settings.seed)));

    let defaults = QuizRequest::new(
        services::quiz::parse_count(args.choice.as_deref(), settings.choice_count),
        services::quiz::parse_count(args.judge.as_deref(), settings.judge_count),
    );

    match cmd {
        Command::Stats => {
            let stats = service.stats();
            println!("source:   {}", source.describe());
            println!("choice:   {}", stats.choice);
            println!("judge:    {}", stats.judge);
            println!("modules:  {}", stats.modules);
            println!("strategy: {}", service.strategy());
            Ok(())
        }
        Command::Exam => {
            let stdin = io::stdin();
            let mut terminal =
                Terminal::new(stdin.lock(), io::stdout()).with_auto_confirm(args.auto_confirm);
            exam_loop(&mut terminal, &service, defaults)
        }
    }
}

fn exam_loop<R: io::BufRead, W: io::Write>(
    terminal: &mut Terminal<R, W>,
    service: &QuizService,
    defaults: QuizRequest,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let Some(request) = terminal.start_screen(service.stats(), defaults)? else {
            return Ok(());
        };

        loop {
            match service.start(request) {
                Ok(session) => match terminal.run_exam(service, session)? {
                    ExamExit::Quit => return Ok(()),
                    ExamExit::Home | ExamExit::Finished(_) => break,
                },
                Err(err) if err.is_empty_selection() => match terminal.error_screen(&err)? {
                    Recovery::Retry => continue,
                    Recovery::Home => break,
                    Recovery::Quit => return Ok(()),
                },
                Err(err) => return Err(err.into()),
            }
        }
    }
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
