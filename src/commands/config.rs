//! `kara config` - show, locate, or edit the configuration file.

use anyhow::{Context, Result};

use kara::config::Config;
use kara::ui::Theme;

use crate::cli::ConfigAction;

pub fn run(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => show(),
        ConfigAction::Path => path(),
        ConfigAction::Edit => edit(),
    }
}

/// Print the effective configuration as TOML.
fn show() -> Result<()> {
    let theme = Theme::default();
    let config = Config::load()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{}", theme.primary_text(&toml_str));
    Ok(())
}

fn path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

/// Open the config file in the default editor, creating it first if needed.
fn edit() -> Result<()> {
    let theme = Theme::default();
    let config_path = Config::config_path()?;

    if !config_path.exists() {
        Config::default().save()?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    println!(
        "{}",
        theme.primary_text(&format!(
            "Opening {} with {}",
            config_path.display(),
            editor
        ))
    );

    std::process::Command::new(&editor)
        .arg(&config_path)
        .status()
        .with_context(|| format!("Failed to open editor: {editor}"))?;

    Ok(())
}
