mod app;
mod fileio;
mod ui;

use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use crossterm::{
    cursor::MoveToColumn,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute, queue,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info, warn, Level};
use tracing_subscriber::fmt::writer::MakeWriter;

use tableblock::{HostContext, HostServices, TableBlock, TableConfig};

use app::App;
use fileio::FileIO;

/// Swatches offered when the config doesn't list any
const DEFAULT_PALETTE: &[&str] = &["#f8d7da", "#fff3cd", "#d1e7dd", "#cfe2ff", "#e2d9f3", "#dee2e6"];

const USAGE: &str = "\
tableblock - edit a table block in the terminal

USAGE:
    tableblock [OPTIONS] [FILE.json]

OPTIONS:
    -c, --config <FILE>   Tool config (TOML, or JSON by extension)
    --throttle <MS>       Hover update interval in milliseconds (default 150)
    --read-only           Open the block read only
    -v, --verbose         Log engine events
    -h, --help            Print this help message

Hover a row or column for its toolbox, click a cell to focus it.
Ctrl+S saves, Ctrl+Q quits.";

#[derive(Debug, Default, PartialEq)]
struct Args {
    file_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    read_only: bool,
    throttle: Option<Duration>,
    verbose: bool,
    help: bool,
}

impl Args {
    fn parse(mut argv: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut args = Args::default();

        while let Some(arg) = argv.next() {
            match arg.as_str() {
                "-c" | "--config" => {
                    let path = argv.next().ok_or("--config requires a file")?;
                    args.config_path = Some(PathBuf::from(path));
                }
                "--throttle" => {
                    let ms = argv
                        .next()
                        .and_then(|ms| ms.parse::<u64>().ok())
                        .ok_or("--throttle requires a number of milliseconds")?;
                    args.throttle = Some(Duration::from_millis(ms));
                }
                "--read-only" => args.read_only = true,
                "-v" | "--verbose" => args.verbose = true,
                "-h" | "--help" => args.help = true,
                flag if flag.starts_with('-') => return Err(format!("unknown option: {}", flag)),
                _ if args.file_path.is_some() => return Err(format!("unexpected argument: {}", arg)),
                _ => args.file_path = Some(PathBuf::from(&arg)),
            }
        }

        Ok(args)
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        io::stdout(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )
}

/// Put the terminal back before the default hook prints the panic
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();

        let message = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_default();
        match info.location() {
            Some(location) => error!(
                file = location.file(),
                line = location.line(),
                %message,
                "panic occured"
            ),
            None => error!(%message, "panic occured"),
        }

        default_hook(info);
    }));
}

/// `tracing` writer for a full-screen app: each record is printed on the
/// main screen, then the alternate screen is restored.
struct MainScreenLog;

impl<'a> MakeWriter<'a> for MainScreenLog {
    type Writer = MainScreenLogLine;

    fn make_writer(&'a self) -> Self::Writer {
        MainScreenLogLine
    }
}

struct MainScreenLogLine;

impl Write for MainScreenLogLine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut out = io::stdout().lock();
        queue!(out, LeaveAlternateScreen, MoveToColumn(0))?;
        out.write_all(buf)?;
        queue!(out, MoveToColumn(0), EnterAlternateScreen)?;
        out.flush()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

fn load_config(path: Option<&PathBuf>) -> TableConfig {
    let mut config = match path {
        Some(path) => TableConfig::from_file(path).unwrap_or_else(|e| {
            warn!(error = %e, path = %path.display(), "unreadable config, using defaults");
            TableConfig::default()
        }),
        None => TableConfig::default(),
    };
    if config.preset_colors.is_empty() {
        config.preset_colors = DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect();
    }
    config
}

fn main() -> io::Result<()> {
    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            std::process::exit(1);
        }
    };
    if args.help {
        eprintln!("{}", USAGE);
        return Ok(());
    }

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(MainScreenLog)
        .init();
    install_panic_hook();

    let config = load_config(args.config_path.as_ref());
    let file_io = FileIO::new(args.file_path);
    let loaded = file_io.load().map_err(|e| {
        error!(error = %e, "failed to load table");
        io::Error::new(io::ErrorKind::InvalidData, e.to_string())
    })?;

    let host = Rc::new(HostContext::new());
    let services: Rc<dyn HostServices> = host.clone();
    let mut block = TableBlock::new(loaded.data, config, services, args.read_only);
    if let Some(interval) = args.throttle {
        block.engine_mut().set_throttle_interval(interval);
    }
    info!(read_only = args.read_only, "tableblock started");

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(block, host, file_io);
    if !loaded.warnings.is_empty() {
        app.message = Some(loaded.warnings.join("; "));
    }

    let result = app.run(&mut terminal);
    restore_terminal()?;
    result
}
