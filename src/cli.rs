//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Placeholder slide image generator.
#[derive(Parser, Debug)]
#[command(name = "slidegen", version, about)]
pub struct Cli {
    /// What to generate.
    #[command(subcommand)]
    pub command: Command,

    /// Settings file override (TOML).
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Directory images are written under, overriding settings: the output
    /// root for `slides`, the project root that `config` image paths resolve
    /// against.
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Generation modes.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render one image per node image listed in the viewer config.
    Config {
        /// Path to the viewer's node configuration.
        #[arg(short, long, default_value = "public/config.json")]
        config: PathBuf,

        /// Also render the welcome, closing and Q&A slides.
        #[arg(long)]
        with_extras: bool,
    },

    /// Render the literal slide list (built-in deck unless settings define one).
    Slides,

    /// Write the viewer config from the headings of a Markdown outline.
    Outline {
        /// Markdown outline to read.
        #[arg(short, long, default_value = "public/index.md")]
        markdown: PathBuf,

        /// Where to write the node configuration.
        #[arg(short, long, default_value = "public/config.json")]
        out: PathBuf,
    },
}
