use clap::Parser;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use helpbook::catalog::Catalog;
use helpbook::config::{self, AppConfig, ConfigError};
use helpbook::help::{FormattingContext, HelpFormatter, RoleCheck};
use helpbook::lookup;
use reedline::{DefaultPrompt, Reedline, Signal};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Browse a command catalog as paginated help.
#[derive(Debug, Parser)]
#[command(name = "helpbook", version)]
struct Args {
    /// Catalog JSON file (overrides the config file)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Config file to use instead of ~/.config/helpbook.json
    #[arg(long)]
    config: Option<PathBuf>,

    /// Invocation prefix shown in signatures
    #[arg(long)]
    prefix: Option<String>,

    /// Also list hidden commands
    #[arg(long)]
    show_hidden: bool,

    /// Also list commands the user is not allowed to run
    #[arg(long)]
    show_unauthorized: bool,

    /// Maximum width of a listing line
    #[arg(long)]
    width: Option<usize>,

    /// Soft size limit of a page, in characters
    #[arg(long)]
    page_limit: Option<usize>,

    /// Roles of the invoking user (the Admin category needs "admin")
    #[arg(long = "role")]
    roles: Vec<String>,

    /// Print help for this command path and exit
    query: Vec<String>,
}

struct AppState {
    catalog: Catalog,
    formatter: HelpFormatter,
    context: FormattingContext,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let state = match build_state(&args) {
        Ok(state) => state,
        Err(e) => {
            print_colored_message(&format!("{}\n", e), Color::Red);
            return ExitCode::FAILURE;
        }
    };

    if !args.query.is_empty() {
        let path: Vec<&str> = args.query.iter().map(String::as_str).collect();
        return if print_help_for(&state, &path) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    run_repl(&state);
    ExitCode::SUCCESS
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_app_config(path: Option<&PathBuf>) -> Result<AppConfig, ConfigError> {
    let loaded = match path {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };

    match loaded {
        Err(ConfigError::NotFound(path)) => {
            tracing::warn!(path = %path.display(), "no config file, using defaults");
            Ok(AppConfig::default())
        }
        other => other,
    }
}

fn build_state(args: &Args) -> Result<AppState, Box<dyn std::error::Error>> {
    let mut cfg = load_app_config(args.config.as_ref())?;

    if let Some(prefix) = &args.prefix {
        cfg.prefix = prefix.clone();
    }
    if let Some(width) = args.width {
        cfg.formatter.line_width = width;
    }
    if let Some(limit) = args.page_limit {
        cfg.formatter.page_size_limit = limit;
    }
    cfg.formatter.show_hidden |= args.show_hidden;
    cfg.formatter.show_unauthorized |= args.show_unauthorized;

    let catalog_path = args
        .catalog
        .clone()
        .or(cfg.catalog.clone())
        .ok_or("No catalog configured. Pass --catalog or set \"catalog\" in the config file.")?;
    let catalog = Catalog::load(&catalog_path)?;

    let formatter = HelpFormatter::new(cfg.formatter)?;
    let context = FormattingContext::new(&cfg.prefix, cfg.bot)
        .with_check(RoleCheck::new(args.roles.clone()).restrict("Admin", "admin"));

    Ok(AppState {
        catalog,
        formatter,
        context,
    })
}

fn run_repl(state: &AppState) {
    print_colored_message(
        "Type help [command...] to browse the catalog, quit to exit.\n",
        Color::DarkMagenta,
    );

    let mut rl = Reedline::create();
    let prompt = DefaultPrompt::default();

    loop {
        let line = match rl.read_line(&prompt) {
            Ok(Signal::Success(input)) => input.trim().to_string(),
            Ok(Signal::CtrlD) | Ok(Signal::CtrlC) | Err(_) => break,
        };

        if line.is_empty() {
            continue;
        }

        let mut words = line.split_whitespace();
        match words.next() {
            Some("quit") | Some("exit") => break,
            Some("help") => {
                let path: Vec<&str> = words.collect();
                print_help_for(state, &path);
            }
            _ => print_colored_message("Unknown command. Type help.\n", Color::DarkMagenta),
        }
    }
}

/// Print every page for `help <path>`. Returns false if the path didn't resolve.
fn print_help_for(state: &AppState, path: &[&str]) -> bool {
    let target = match lookup::resolve(&state.catalog, path) {
        Ok(target) => target,
        Err(e) => {
            print_colored_message(&format!("{}\n", e), Color::Red);
            return false;
        }
    };

    let pages = state.formatter.format(target, &state.context);
    let total = pages.len();
    for (i, page) in pages.iter().enumerate() {
        if total > 1 {
            print_colored_message(&format!("--- page {}/{} ---\n", i + 1, total), Color::DarkGrey);
        }
        print_colored_message(&format!("{}\n", page), Color::Cyan);
    }
    true
}

fn print_colored_message(message: &str, color: Color) {
    let mut stdout = io::stdout();
    if let Err(err) = execute!(
        stdout,
        SetForegroundColor(color),
        Print(message),
        ResetColor
    ) {
        tracing::warn!(%err, "failed to write to stdout");
    }
}
