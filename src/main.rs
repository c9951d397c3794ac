//! Slidegen - placeholder slide image generator.

mod adapters;
mod cli;
mod error;
mod font;
mod outline;
mod palette;
mod ports;
mod render;
mod settings;
mod slide;
mod source;

use std::process;

use clap::Parser;
use tracing::Level;

use crate::adapters::SystemFonts;
use crate::cli::{Cli, Command};
use crate::error::SlideError;
use crate::palette::Palette;
use crate::render::SlideGenerator;
use crate::settings::{discover_settings_path, GeneratorConfig};
use crate::slide::{check_unique_outputs, SlideSpec};
use crate::source::{
    builtin_deck, extra_specs, load_specs_from_config, load_specs_from_literal_list, LiteralSlide,
};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), SlideError> {
    // Load settings
    let settings_path = discover_settings_path(cli.settings.as_deref());
    let mut settings = GeneratorConfig::load(&settings_path).map_err(SlideError::Settings)?;
    if cli.verbose && settings_path.exists() {
        eprintln!("Settings: {}", settings_path.display());
    }

    let specs = match cli.command {
        Command::Outline { markdown, out } => {
            let count = outline::write_config(&markdown, &out)?;
            eprintln!("Wrote {} ({count} nodes)", out.display());
            return Ok(());
        }
        Command::Config { config, with_extras } => {
            if let Some(dir) = cli.output_dir {
                settings.project_root = dir;
            }
            let palette = Palette::from_entries(&settings.palette)?;
            let mut specs = load_specs_from_config(&config, &settings.project_root, &palette)?;
            if with_extras {
                specs.extend(extra_specs(&settings.project_root, &palette)?);
            }
            specs
        }
        Command::Slides => {
            if let Some(dir) = cli.output_dir {
                settings.output_root = dir;
            }
            let entries: Vec<LiteralSlide> = match &settings.slides {
                Some(slides) => slides.iter().map(LiteralSlide::from).collect(),
                None => builtin_deck(),
            };
            load_specs_from_literal_list(&settings.output_root, &entries)
        }
    };

    generate(&settings, &specs)
}

/// Render `specs` best-effort and print the summary.
fn generate(settings: &GeneratorConfig, specs: &[SlideSpec]) -> Result<(), SlideError> {
    check_unique_outputs(specs)?;

    let generator = SlideGenerator::new(settings, &SystemFonts);
    eprintln!("Generating {} images", specs.len());
    let report = generator.render_batch(specs);

    for failure in report.failures() {
        if let Err(e) = &failure.result {
            eprintln!("Failed: {}: {e}", failure.output_path.display());
        }
    }
    eprintln!("Generated {} of {} images", report.succeeded(), specs.len());
    Ok(())
}
