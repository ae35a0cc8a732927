use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use lingo_core::model::Credentials;
use lingo_core::text::{PageSize, Reader, paginate};
use services::{
    AppServices, AuthService, CardService, ContextService, FolderService, PictureService, ReaderService,
    ServiceConfig, SubtitleService, TranslateService,
};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DB_ENV: &str = "LINGO_DB_URL";
const DEFAULT_DB_FILE: &str = "lingo.sqlite3";
const IN_MEMORY_URL: &str = "sqlite::memory:";

#[derive(Debug, Error)]
enum CliError {
    #[error("{0} expects a value")]
    MissingValue(&'static str),
    #[error("unrecognised argument `{0}`")]
    Unexpected(String),
    #[error("unknown subcommand `{0}`")]
    UnknownCommand(String),
    #[error("`{0}` is not a usable database location")]
    BadDatabase(String),
    #[error("--per-page must be a positive whole number, got `{0}`")]
    BadPageSize(String),
    #[error("read needs the path of a text file")]
    NoInputFile,
    #[error("login needs a username")]
    NoUsername,
}

// ─── Database location ───

/// Where the reader keeps its state between launches.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DbLocation {
    Memory,
    File(PathBuf),
}

impl DbLocation {
    /// Accepts `sqlite::memory:`, `sqlite://path`, `sqlite:path` or a bare path.
    /// Relative paths are resolved against `cwd`.
    fn parse(raw: &str, cwd: &Path) -> Result<Self, CliError> {
        let raw = raw.trim();
        if raw == IN_MEMORY_URL {
            return Ok(Self::Memory);
        }
        let without_scheme = raw
            .strip_prefix("sqlite://")
            .or_else(|| raw.strip_prefix("sqlite:"))
            .unwrap_or(raw);
        let file = without_scheme.split('?').next().unwrap_or_default();
        if file.is_empty() {
            return Err(CliError::BadDatabase(raw.to_owned()));
        }
        let path = Path::new(file);
        Ok(Self::File(if path.is_absolute() {
            path.to_path_buf()
        } else {
            cwd.join(path)
        }))
    }

    fn from_env_or_default(cwd: &Path) -> Result<Self, CliError> {
        match std::env::var(DB_ENV) {
            Ok(value) if !value.trim().is_empty() => Self::parse(&value, cwd),
            _ => Ok(Self::File(cwd.join(DEFAULT_DB_FILE))),
        }
    }

    fn url(&self) -> String {
        match self {
            Self::Memory => IN_MEMORY_URL.to_owned(),
            Self::File(path) => format!("sqlite://{}", path.display()),
        }
    }

    /// The database file itself is created on connect; its directory is not.
    fn ensure_parent_dir(&self) -> std::io::Result<()> {
        match self {
            Self::File(path) => match path.parent() {
                Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir),
                _ => Ok(()),
            },
            Self::Memory => Ok(()),
        }
    }
}

// ─── Command line ───

#[derive(Debug)]
enum Cli {
    Ui { db: DbLocation },
    Read { file: PathBuf, page_size: PageSize },
    Login { db: DbLocation, username: String },
    Logout { db: DbLocation },
    Help,
}

fn next_value(
    rest: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, CliError> {
    rest.next().ok_or(CliError::MissingValue(flag))
}

impl Cli {
    /// Parse everything after the program name. No subcommand means `ui`.
    fn parse(argv: Vec<String>, cwd: &Path) -> Result<Self, CliError> {
        let mut rest = argv.into_iter().peekable();
        let command = match rest.peek().map(String::as_str) {
            None => "ui".to_owned(),
            Some(flag) if flag.starts_with('-') => "ui".to_owned(),
            Some(_) => rest.next().unwrap_or_default(),
        };

        match command.as_str() {
            "ui" => Self::parse_ui(&mut rest, cwd),
            "read" => Self::parse_read(&mut rest),
            "login" => Self::parse_login(&mut rest, cwd),
            "logout" => match Self::parse_db(&mut rest, cwd)? {
                Some(db) => Ok(Self::Logout { db }),
                None => Ok(Self::Help),
            },
            "help" => Ok(Self::Help),
            _ => Err(CliError::UnknownCommand(command)),
        }
    }

    fn parse_ui(rest: &mut impl Iterator<Item = String>, cwd: &Path) -> Result<Self, CliError> {
        Ok(match Self::parse_db(rest, cwd)? {
            Some(db) => Self::Ui { db },
            None => Self::Help,
        })
    }

    /// `[--db <location>]`, the only flag the session commands share.
    /// `None` when help was asked for.
    fn parse_db(
        rest: &mut impl Iterator<Item = String>,
        cwd: &Path,
    ) -> Result<Option<DbLocation>, CliError> {
        let mut db = None;
        while let Some(arg) = rest.next() {
            match arg.as_str() {
                "--db" => db = Some(DbLocation::parse(&next_value(rest, "--db")?, cwd)?),
                "-h" | "--help" => return Ok(None),
                _ => return Err(CliError::Unexpected(arg)),
            }
        }
        match db {
            Some(db) => Ok(Some(db)),
            None => DbLocation::from_env_or_default(cwd).map(Some),
        }
    }

    fn parse_login(
        rest: &mut std::iter::Peekable<impl Iterator<Item = String>>,
        cwd: &Path,
    ) -> Result<Self, CliError> {
        let username = match rest.peek() {
            Some(arg) if !arg.starts_with('-') => rest.next().unwrap_or_default(),
            _ => return Err(CliError::NoUsername),
        };
        Ok(match Self::parse_db(rest, cwd)? {
            Some(db) => Self::Login { db, username },
            None => Self::Help,
        })
    }

    fn parse_read(rest: &mut impl Iterator<Item = String>) -> Result<Self, CliError> {
        let mut file = None;
        let mut page_size = PageSize::DEFAULT;
        while let Some(arg) = rest.next() {
            match arg.as_str() {
                "--per-page" => {
                    let raw = next_value(rest, "--per-page")?;
                    page_size = raw
                        .trim()
                        .parse()
                        .ok()
                        .and_then(|n| PageSize::new(n).ok())
                        .ok_or(CliError::BadPageSize(raw))?;
                }
                "-h" | "--help" => return Ok(Self::Help),
                flag if flag.starts_with("--") => return Err(CliError::Unexpected(arg)),
                _ if file.is_none() => file = Some(PathBuf::from(arg)),
                _ => return Err(CliError::Unexpected(arg)),
            }
        }
        Ok(Self::Read {
            file: file.ok_or(CliError::NoInputFile)?,
            page_size,
        })
    }
}

const USAGE: &str = "\
lingo: read foreign-language text and turn it into flashcards

USAGE:
    app [ui] [--db <location>]
    app read <file> [--per-page <n>]
    app login <username> [--db <location>]    (password is read from stdin)
    app logout [--db <location>]

The database location may be sqlite::memory:, a sqlite:// URL or a file path.

ENVIRONMENT:
    LINGO_DB_URL, LINGO_BACKEND_URL, LINGO_TRANSLATE_URL,
    LINGO_CONTEXT_URL, LINGO_PICTURES_URL, LINGO_SUBS_URL, RUST_LOG";

// ─── Desktop wiring ───

struct DesktopApp {
    reader: Reader,
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn initial_reader(&self) -> Reader {
        self.reader.clone()
    }

    fn reader(&self) -> Arc<ReaderService> {
        self.services.reader()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn folders(&self) -> Arc<FolderService> {
        self.services.folders()
    }

    fn cards(&self) -> Arc<CardService> {
        self.services.cards()
    }

    fn translate(&self) -> Arc<TranslateService> {
        self.services.translate()
    }

    fn context(&self) -> Arc<ContextService> {
        self.services.context()
    }

    fn pictures(&self) -> Arc<PictureService> {
        self.services.pictures()
    }

    fn subtitles(&self) -> Arc<SubtitleService> {
        self.services.subtitles()
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
}

async fn launch_desktop(db: &DbLocation) -> Result<(), Box<dyn std::error::Error>> {
    db.ensure_parent_dir()?;
    let config = ServiceConfig::from_env();
    info!(db = %db.url(), backend = %config.backend_url, "starting");

    let services = AppServices::new_sqlite(&db.url(), config).await?;
    let reader = services.initial_reader().await;
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { reader, services });

    let window = WindowBuilder::new()
        .with_title("Lingo")
        .with_always_on_top(false);
    LaunchBuilder::desktop()
        .with_cfg(DesktopConfig::new().with_window(window))
        .with_context(build_app_context(&app))
        .launch(App);
    Ok(())
}

async fn open_services(db: &DbLocation) -> Result<AppServices, Box<dyn std::error::Error>> {
    db.ensure_parent_dir()?;
    Ok(AppServices::new_sqlite(&db.url(), ServiceConfig::from_env()).await?)
}

/// Sign in and keep the token for the desktop session.
async fn sign_in(db: &DbLocation, username: String) -> Result<(), Box<dyn std::error::Error>> {
    eprint!("Password for {username}: ");
    let mut password = String::new();
    std::io::stdin().read_line(&mut password)?;
    let password = password.trim_end_matches(['\r', '\n']).to_owned();

    let services = open_services(db).await?;
    let credentials = Credentials { username, password };
    services
        .auth()
        .login(&credentials)
        .await
        .map_err(|err| err.user_message("Sign in failed."))?;
    println!("Signed in as {}.", credentials.username);
    Ok(())
}

async fn sign_out(db: &DbLocation) -> Result<(), Box<dyn std::error::Error>> {
    open_services(db).await?.auth().logout().await?;
    println!("Signed out.");
    Ok(())
}

/// Print the pages of a text file, one numbered block per page.
fn print_pages(file: &Path, page_size: PageSize) -> std::io::Result<()> {
    let text = std::fs::read_to_string(file)?;
    let pages = paginate(&text, page_size);
    if pages.is_empty() {
        println!("(empty text)");
        return Ok(());
    }

    let total = pages.len();
    for (number, page) in (1..).zip(pages.pages()) {
        println!("── {number} / {total} ──");
        for sentence in page.sentences() {
            println!("{}", sentence.trim());
        }
        println!();
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_logging();
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let cli = match Cli::parse(std::env::args().skip(1).collect(), &cwd) {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    let outcome = match cli {
        Cli::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Cli::Ui { db } => launch_desktop(&db).await,
        Cli::Read { file, page_size } => print_pages(&file, page_size).map_err(Into::into),
        Cli::Login { db, username } => sign_in(&db, username).await,
        Cli::Logout { db } => sign_out(&db).await,
    };
    if let Err(err) = outcome {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
