//! Prints the effective startup defaults
//!
//! Run with: cargo run --example config_demo

use pane_diff::config::Config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Pane Diff Configuration Demo ===\n");

    // Load or create default config
    let config = Config::load()?;

    println!("Current settings:");
    println!("  Visible lines: {}", config.settings.default_num_lines);
    println!("  Language: {}", config.settings.default_language);
    println!("  Diff mode: {}", config.settings.default_diff_mode);
    println!("  Theme: {}", config.settings.theme);

    let workspace = config.workspace();
    println!(
        "\nPanel height: {} lines ({} pt)",
        workspace.num_lines(),
        workspace.editor_height()
    );
    println!("Config file: {}", Config::config_path()?.display());

    Ok(())
}
