mod app;
mod command;
mod config;
mod consts;
mod feedback;
mod game;
mod options;
mod prefs;
mod util;
use crate::app::App;
use crate::config::{Config, LogConfig};
use crate::feedback::Bell;
use crate::game::{Boundary, FoodPolicy, Game};
use crate::options::Options;
use crate::prefs::PrefsStore;
use anyhow::Context;
use crossterm::event::{DisableFocusChange, EnableFocusChange};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{layout::Rect, DefaultTerminal};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const USAGE: &str = concat!(
    "Usage: gridsnake [<options>]\n",
    "\n",
    "Options:\n",
    "  -c, --config <PATH>   Read configuration from <PATH>\n",
    "      --log-file <PATH> Write a log to <PATH>\n",
    "      --wrap            Let the snake wrap around the edges of the board\n",
    "      --naive-food      Allow food to appear under the snake\n",
    "      --seed <N>        Seed the random number generator with <N>\n",
    "  -h, --help            Display this help message and exit\n",
    "  -V, --version         Show the program version and exit\n",
);

#[derive(Clone, Debug, Eq, PartialEq)]
enum Cli {
    Run(Arguments),
    Help,
    Version,
}

impl Cli {
    fn from_parser(mut parser: lexopt::Parser) -> Result<Cli, lexopt::Error> {
        use lexopt::prelude::*;
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Short('c') | Long("config") => args.config = Some(PathBuf::from(parser.value()?)),
                Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                Long("wrap") => args.wrap = true,
                Long("naive-food") => args.naive_food = true,
                Long("seed") => args.seed = Some(parser.value()?.parse()?),
                Short('h') | Long("help") => return Ok(Cli::Help),
                Short('V') | Long("version") => return Ok(Cli::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Cli::Run(args))
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
    wrap: bool,
    naive_food: bool,
    seed: Option<u64>,
}

impl Arguments {
    fn run(self) -> anyhow::Result<ExitCode> {
        let (path, allow_missing) = match self.config {
            Some(p) => (p, false),
            None => (Config::default_path()?, true),
        };
        let mut config = Config::load(&path, allow_missing)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?;
        if self.log_file.is_some() {
            config.log.file = self.log_file;
        }
        if self.wrap {
            config.game.boundary = Boundary::Wrapping;
        }
        if self.naive_food {
            config.game.food = FoodPolicy::Naive;
        }
        init_logging(&config.log)?;
        tracing::info!(config = %path.display(), "Starting gridsnake");
        let mut prefs = PrefsStore::new(config.prefs_file());
        if let Err(e) = prefs.load() {
            tracing::warn!(error = ?e, "Failed to load preferences; using defaults");
        }
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let terminal = ratatui::init();
        let r = play(terminal, config.game, prefs, rng);
        ratatui::restore();
        Ok(io_exit(r))
    }
}

fn play(
    mut terminal: DefaultTerminal,
    options: Options,
    prefs: PrefsStore,
    rng: StdRng,
) -> io::Result<()> {
    let size = terminal.size()?;
    crossterm::execute!(terminal.backend_mut(), EnableFocusChange)?;
    let p = prefs.prefs();
    let game = Game::new(
        options,
        p.high_score,
        p.muted,
        rng,
        Rect::new(0, 0, size.width, size.height),
    );
    let r = App::new(game, prefs, Bell::new(io::stdout(), p.muted)).run(terminal);
    crossterm::execute!(io::stdout(), DisableFocusChange)?;
    r
}

fn init_logging(cfg: &LogConfig) -> anyhow::Result<()> {
    let Some(ref path) = cfg.file else {
        return Ok(());
    };
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context("failed to open log file")?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.level))
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "Terminal I/O failed");
            eprintln!("gridsnake: {e}");
            ExitCode::from(2)
        }
    }
}

fn main() -> ExitCode {
    match Cli::from_parser(lexopt::Parser::from_env()) {
        Ok(Cli::Run(args)) => match args.run() {
            Ok(code) => code,
            Err(e) => {
                eprintln!("gridsnake: {e:?}");
                ExitCode::from(2)
            }
        },
        Ok(Cli::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Cli::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gridsnake: {e}");
            eprint!("{USAGE}");
            ExitCode::from(2)
        }
    }
}
