mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use kara::config::Config;
use kara::ui::Theme;

use cli::{Cli, Command};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        let theme = Theme::default();
        eprintln!("{}", theme.error_text(&format!("Error: {err:#}")));
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match &cli.command {
        None => commands::play::interactive(&config),
        Some(Command::Play(args)) => commands::play::direct(&config, args),
        Some(Command::Fetch(args)) => commands::fetch::run(&config, args),
        Some(Command::Get(args)) => commands::get::run(&config, args),
        Some(Command::Shift(args)) => commands::shift::run(args),
        Some(Command::List) => commands::list::run(&config),
        Some(Command::Config { action }) => commands::config::run(action),
    }
}
