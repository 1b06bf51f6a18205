//! iconkit - theme sprite icon renderer and cross-origin sprite rehydrator.

#![allow(dead_code)]

mod cli;
mod config;
mod hooks;
mod image;
mod logger;
mod rehydrate;
mod render;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::IconkitConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = IconkitConfig::load(&cli)?;

    match &cli.command {
        Commands::Icon { args } => cli::render::run_icon(args, &config),
        Commands::Img { args } => cli::render::run_image(args, &config),
        Commands::Title { title } => cli::render::run_title(title, &config),
        Commands::Extract { path, mime } => cli::extract::run_extract(path, mime.as_deref()),
        Commands::Rehydrate { paths, dry } => {
            cli::rehydrate::run_rehydrate(paths, *dry, &config)
        }
    }
}
