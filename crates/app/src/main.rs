use std::fmt;
use std::io::Write as _;
use std::sync::Arc;

use aptitude_core::{AssessmentSession, Phase};
use aptitude_core::model::UserId;
use gateway::{Gateway, GatewayConfig, InMemoryGateway};
use services::{AssessmentService, CatalogService, Clock};
use tokio::io::{AsyncBufReadExt, BufReader};
use ui::{AssessmentPage, assessment_page, careers_view_state};

mod render;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidUserId { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidUserId { raw } => write!(f, "invalid --user-id value: {raw}"),
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
    eprintln!("  cargo run -p app -- take    [--api-url <url>] [--user-id <id>] [--offline]");
    eprintln!("  cargo run -p app -- careers [--api-url <url>] [--offline]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url {}", GatewayConfig::DEFAULT_BASE_URL);
    eprintln!("  --user-id 1");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CAREER_API_URL, CAREER_API_TIMEOUT_SECS, CAREER_USER_ID, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Take,
    Careers,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "take" => Some(Self::Take),
            "careers" => Some(Self::Careers),
            _ => None,
        }
    }
}

struct Args {
    api_url: Option<String>,
    user_id: UserId,
    offline: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut api_url = None;
        let mut offline = false;
        let mut user_id = std::env::var("CAREER_USER_ID")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map_or_else(|| UserId::new(1), UserId::new);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => api_url = Some(require_value(args, "--api-url")?),
                "--user-id" => {
                    let value = require_value(args, "--user-id")?;
                    let parsed: u64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidUserId { raw: value.clone() })?;
                    user_id = UserId::new(parsed);
                }
                "--offline" => offline = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            api_url,
            user_id,
            offline,
        })
    }

    fn gateway(&self) -> Result<Gateway, Box<dyn std::error::Error>> {
        if self.offline {
            return Ok(Gateway::in_memory(InMemoryGateway::demo()));
        }
        let mut config = GatewayConfig::from_env()?;
        if let Some(url) = &self.api_url {
            config = config.with_base_url(url)?;
        }
        log::info!("using backend at {}", config.base_url);
        Ok(Gateway::http(config)?)
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand means taking the assessment.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Take,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Take,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let parsed = Args::parse(&mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let gateway = parsed.gateway()?;
    let mut catalogs = CatalogService::new(Arc::clone(&gateway.catalog));
    catalogs.load().await;

    match cmd {
        Command::Careers => {
            print!("{}", render::careers(&careers_view_state(&catalogs)));
            Ok(())
        }
        Command::Take => {
            let service = AssessmentService::new(
                Clock::system(),
                Arc::clone(&gateway.scoring),
                parsed.user_id,
            );
            take(&catalogs, &service).await
        }
    }
}

async fn take(
    catalogs: &CatalogService,
    service: &AssessmentService,
) -> Result<(), Box<dyn std::error::Error>> {
    if let AssessmentPage::Blocked(err) = assessment_page(catalogs, None) {
        return Err(err.message().into());
    }
    let mut session = service.start(catalogs)?;
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{}", render::page(&assessment_page(catalogs, Some(&session))));
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = input.next_line().await? else {
            return Ok(());
        };
        if !handle(line.trim(), service, &mut session).await {
            return Ok(());
        }
    }
}

/// Apply one line of input. Returns false when the user quits.
async fn handle(command: &str, service: &AssessmentService, session: &mut AssessmentSession) -> bool {
    match command {
        "q" | "quit" => return false,
        "r" | "restart" | "retake" => service.reset(session),
        "n" | "next" => {
            if !service.advance(session) {
                println!("Select an answer first.");
            }
        }
        "f" | "finish" => {
            if session.can_finish() {
                print!("{}", render::page(&AssessmentPage::Submitting));
                service.finish(session).await;
            } else {
                println!("{}", finish_unavailable(session.phase()));
            }
        }
        "" => {}
        other => match other.parse::<usize>() {
            Ok(choice) if choice >= 1 => {
                if !service.select_answer(session, choice - 1) {
                    println!("No option {choice} here.");
                }
            }
            _ => println!("Unknown command: {other}"),
        },
    }
    true
}

fn finish_unavailable(phase: Phase) -> &'static str {
    match phase {
        Phase::Completed => "Already scored. Type r to retake the test.",
        Phase::Submitting => "Scoring is already in progress.",
        Phase::InProgress | Phase::SubmitFailed => {
            "Finish is available once the last question is answered."
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
