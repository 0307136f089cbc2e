use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use gitsheet::{
    app::App,
    config,
    core::Result,
    dataset, filter,
    search::normalize,
    storage,
    theme::{EnvColorScheme, ThemeController},
    tui, ui,
};

/// Searchable git commands cheatsheet for the terminal.
///
/// Keys: / search, Esc leave search, t theme, 1-9 jump to category, q quit.
#[derive(Parser, Debug)]
#[command(name = "gitsheet", version, about)]
struct Args {
    /// Read configuration from this file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the (filtered) cheatsheet and exit
    #[arg(short, long, value_name = "QUERY", num_args = 0..)]
    print: Option<Vec<String>>,
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_logging() {
    let level = std::env::var("GITSHEET_LOG")
        .ok()
        .and_then(|value| Level::from_str(&value).ok())
        .unwrap_or(Level::INFO);

    let log_file = dirs::cache_dir()
        .map(|dir| dir.join("gitsheet"))
        .and_then(|dir| fs::create_dir_all(&dir).ok().map(|_| dir.join("gitsheet.log")))
        .and_then(|path| OpenOptions::new().create(true).append(true).open(path).ok());

    let writer = match log_file {
        Some(file) => BoxMakeWriter::new(Mutex::new(file)),
        None => BoxMakeWriter::new(std::io::sink),
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(writer)
        .try_init();
}

fn run(args: Args) -> Result<()> {
    let config = config::resolve_config(args.config.as_deref())?;
    let categories = dataset::categories();
    dataset::validate(categories)?;

    if let Some(words) = args.print {
        let query = normalize(&words.join(" "));
        let view = filter::filter(categories, &query);
        print!("{}", ui::render_text(&view, &query));
        return Ok(());
    }

    let store = storage::open_store(config.storage.path.as_deref());
    let theme = ThemeController::initialize(store, &EnvColorScheme);
    let mut app = App::new(categories, theme, &config)?;
    tui::run(&mut app)
}

fn main() {
    let args = Args::parse();
    init_logging();
    info!("Starting gitsheet...");

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("gitsheet: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_print_query() {
        let args = Args::try_parse_from(["gitsheet", "--print", "git", "add"]).unwrap();
        assert_eq!(args.print, Some(vec!["git".to_string(), "add".to_string()]));
        assert!(args.config.is_none());
    }

    #[test]
    fn test_parse_config_then_print() {
        let args = Args::try_parse_from(["gitsheet", "-c", "sheet.toml", "-p"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("sheet.toml")));
        assert_eq!(args.print, Some(Vec::new()));
    }

    #[test]
    fn test_flag_after_print_is_not_query_text() {
        let args =
            Args::try_parse_from(["gitsheet", "--print", "stash", "--config", "/nope.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/nope.toml")));
        assert_eq!(args.print, Some(vec!["stash".to_string()]));
    }

    #[test]
    fn test_parse_errors() {
        assert!(Args::try_parse_from(["gitsheet", "--config"]).is_err());
        assert!(Args::try_parse_from(["gitsheet", "--bogus"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
