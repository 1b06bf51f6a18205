//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Theme icon renderer and cross-origin sprite rehydrator
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: iconkit.toml)
    #[arg(short = 'C', long, global = true, default_value = "iconkit.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Treat the installation as a development one
    #[arg(long, global = true)]
    pub dev: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render an inline SVG referencing a sprite icon
    Icon {
        #[command(flatten)]
        args: IconArgs,
    },

    /// Render an <img> for a standalone theme SVG
    Img {
        #[command(flatten)]
        args: ImageArgs,
    },

    /// Print the root element markup of an SVG file
    #[command(visible_alias = "x")]
    Extract {
        /// SVG file to read
        #[arg(value_hint = clap::ValueHint::FilePath)]
        path: PathBuf,

        /// Media type of the file (default: guessed from the extension)
        #[arg(short, long)]
        mime: Option<String>,
    },

    /// Inline cross-origin sprites into rendered HTML pages
    #[command(visible_alias = "r")]
    Rehydrate {
        /// HTML files or directories containing them
        #[arg(value_name = "PATH", required = true, value_hint = clap::ValueHint::AnyPath)]
        paths: Vec<PathBuf>,

        /// Report what would change without writing files
        #[arg(short, long)]
        dry: bool,
    },

    /// Apply the development marker to a document title
    Title {
        title: String,
    },
}

/// `icon` command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct IconArgs {
    /// Icon identifier inside the sprite
    #[arg(required_unless_present = "json")]
    pub icon: Option<String>,

    /// Sprite set (default: ui)
    #[arg(short, long)]
    pub set: Option<String>,

    /// CSS class, repeatable
    #[arg(short, long = "class")]
    pub classes: Vec<String>,

    /// Accessible title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Accessible description
    #[arg(long)]
    pub desc: Option<String>,

    /// ARIA role ("image" or "presentation")
    #[arg(short, long)]
    pub role: Option<String>,

    /// Asset root ("base" or "child")
    #[arg(long)]
    pub scope: Option<String>,

    /// Read the whole request from a JSON object instead
    #[arg(long, conflicts_with_all = ["icon", "set", "classes", "title", "desc", "role", "scope"])]
    pub json: Option<String>,
}

/// `img` command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ImageArgs {
    /// Image name below the theme's image directory, without `.svg`
    #[arg(required_unless_present = "json")]
    pub icon: Option<String>,

    /// CSS class, repeatable
    #[arg(short, long = "class")]
    pub classes: Vec<String>,

    /// Alternative text
    #[arg(short, long)]
    pub alt: Option<String>,

    /// ARIA role ("image" or "presentation")
    #[arg(short, long)]
    pub role: Option<String>,

    /// Asset root ("base" or "child")
    #[arg(long)]
    pub scope: Option<String>,

    /// Read the whole request from a JSON object instead
    #[arg(long, conflicts_with_all = ["icon", "classes", "alt", "role", "scope"])]
    pub json: Option<String>,
}

impl Cli {
    /// Commands that render theme URLs and need `[theme]` configured.
    pub const fn needs_theme(&self) -> bool {
        matches!(
            self.command,
            Commands::Icon { .. } | Commands::Img { .. } | Commands::Rehydrate { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_icon_args() {
        let cli = Cli::parse_from([
            "iconkit", "icon", "close", "--set", "social", "-c", "a", "-c", "b", "--scope", "child",
        ]);
        let Commands::Icon { ref args } = cli.command else {
            panic!("expected icon command");
        };
        assert_eq!(args.icon.as_deref(), Some("close"));
        assert_eq!(args.set.as_deref(), Some("social"));
        assert_eq!(args.classes, ["a", "b"]);
        assert!(cli.needs_theme());
    }

    #[test]
    fn test_icon_requires_name_or_json() {
        assert!(Cli::try_parse_from(["iconkit", "icon"]).is_err());
        assert!(Cli::try_parse_from(["iconkit", "icon", "--json", "{}"]).is_ok());
        assert!(Cli::try_parse_from(["iconkit", "icon", "x", "--json", "{}"]).is_err());
    }

    #[test]
    fn test_rehydrate_args() {
        let cli = Cli::parse_from(["iconkit", "-v", "r", "public", "dist/index.html", "--dry"]);
        assert!(cli.verbose);
        let Commands::Rehydrate { paths, dry } = cli.command else {
            panic!("expected rehydrate command");
        };
        assert_eq!(paths.len(), 2);
        assert!(dry);
        assert!(Cli::try_parse_from(["iconkit", "rehydrate"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["iconkit", "title", "Home", "--dev", "-C", "site.toml"]);
        assert!(cli.dev);
        assert_eq!(cli.config, PathBuf::from("site.toml"));
        assert!(!cli.needs_theme());
    }
}
