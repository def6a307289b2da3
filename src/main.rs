use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use ttimer::cli::args::{Cli, Commands, TimerArgs};
use ttimer::cli::commands;
use ttimer::config::{ColorSetting, Config, Paths};
use ttimer::logging::{self, LogTarget};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::new()?;
    let config = Config::load_from_path(&paths.config_file).context("Failed to load config")?;

    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }

    let format = cli.output.unwrap_or(config.general.default_output);
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Tui(TimerArgs::default()));

    let target = if matches!(command, Commands::Tui(_)) {
        paths.ensure_dirs()?;
        LogTarget::File(paths.log_file.clone())
    } else {
        LogTarget::Stderr
    };
    logging::init(&config.logging, cli.verbose, target).context("Failed to set up logging")?;

    let output = match command {
        Commands::Tui(args) => {
            let profile = args.apply(config.to_profile())?;
            ttimer::tui::run(&config, profile)?;
            String::new()
        }
        Commands::Run(args) => commands::run(&config, &args, format)?,
        Commands::Preview(args) => commands::preview(&config, &args, format)?,
        Commands::Config(args) => commands::config(&args.command, &config, &paths, format)?,
        Commands::Completions { shell } => commands::completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}
