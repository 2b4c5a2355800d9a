use clap::Parser;
use pane_diff::app::PaneDiffApp;
use pane_diff::config::Config;
use pane_diff::constant;
use pane_diff::highlight::Highlighter;
use pane_diff::language::Language;
use pane_diff::ui;
use pane_diff::workspace::DiffMode;
use tracing_subscriber::EnvFilter;

/// Compare two JSON or text documents side by side or inline
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Query seeding the panels, e.g. `?left=%7B%22a%22%3A1%7D&right=%7B%22a%22%3A2%7D`
    /// (a full URL is accepted as well)
    query: Option<String>,

    /// Visible lines in each panel (10-50)
    #[arg(short, long)]
    lines: Option<u32>,

    /// Syntax highlighting language
    #[arg(long, value_enum)]
    language: Option<Language>,

    /// Diff layout
    #[arg(long, value_enum)]
    mode: Option<DiffMode>,

    /// Store the given --lines/--language/--mode as the new defaults
    #[arg(long)]
    save_defaults: bool,
}

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::default();

    if let Some(lines) = cli.lines {
        config.settings.default_num_lines = lines;
    }
    if let Some(language) = cli.language {
        config.settings.default_language = language;
    }
    if let Some(mode) = cli.mode {
        config.settings.default_diff_mode = mode;
    }
    if cli.save_defaults
        && let Err(e) = config.save()
    {
        tracing::error!("Failed to save defaults: {}", e);
    }

    let mut workspace = config.workspace();
    if let Some(query) = cli.query.as_deref() {
        workspace.seed_from_query(query);
    }

    let highlighter = Highlighter::new(&config.settings.theme);
    let options = ui::viewport::build_viewport();

    eframe::run_native(
        constant::DEFAULT_WINDOW_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(PaneDiffApp::new(cc, workspace, highlighter)))),
    )
}
