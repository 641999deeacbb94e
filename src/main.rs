use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

mod color;
mod complex;
mod config;
mod display;
mod error;
mod geometry;
mod renderer;
mod view;

use complex::ComplexValue;
use config::Config;
use display::DisplayMode;
use error::GraphError;

#[derive(Parser, Debug)]
#[command(name = "argand")]
#[command(author, version, about = "Argand diagram of a single complex number")]
struct Args {
    /// Complex value to display, e.g. 3+4i, -2-3i, 5i
    #[arg(allow_hyphen_values = true, required_unless_present = "init_config")]
    value: Option<String>,

    /// Display mode: terminal or print
    #[arg(short, long)]
    mode: Option<DisplayMode>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Color theme: light, dark, ocean, mono
    #[arg(long)]
    theme: Option<String>,

    /// Accent color as hex, e.g. "#E01E1E"
    #[arg(long)]
    accent: Option<String>,

    /// Print mode width in terminal cells
    #[arg(long)]
    width: Option<u16>,

    /// Print mode height in terminal cells
    #[arg(long)]
    height: Option<u16>,

    /// Font scale for labels and graduations
    #[arg(long)]
    label_scale: Option<usize>,

    /// Padding around the value as a fraction of its span
    #[arg(long)]
    margin: Option<f32>,

    /// Write a commented config template to the default path and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("argand=info".parse()?),
        )
        .init();

    let args = Args::parse();

    if args.init_config {
        let path = Config::init_default_config()?;
        println!("Wrote config template to {}", path.display());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(&args);

    let input = args
        .value
        .as_deref()
        .ok_or_else(|| anyhow!("no complex value given"))?;
    let value = graphable_value(input)?;

    info!("Displaying {} in {:?} mode", value, config.display.mode);

    match config.display.mode {
        DisplayMode::Terminal => {
            let config_path = args.config.clone().or_else(Config::default_path);
            display::terminal::run(config, value, config_path)?;
        }
        DisplayMode::Print => {
            display::print::run(&config, value)?;
        }
    }

    Ok(())
}

/// Parse the value and keep purely real numbers away from the complex graph,
/// which has no arc to draw for them.
fn graphable_value(input: &str) -> Result<ComplexValue, GraphError> {
    let value: ComplexValue = input.parse()?;
    if value.is_purely_real() {
        return Err(GraphError::PurelyReal(value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purely_real_values_are_routed_away() {
        assert_eq!(
            graphable_value("2.5"),
            Err(GraphError::PurelyReal(ComplexValue::new(2.5, 0.0)))
        );
        assert_eq!(graphable_value("-0+1i"), Ok(ComplexValue::new(-0.0, 1.0)));
    }

    #[test]
    fn negative_value_is_positional() {
        let args = Args::try_parse_from(["argand", "-2-3i", "--mode", "print"]).unwrap();
        assert_eq!(args.value.as_deref(), Some("-2-3i"));
        assert_eq!(args.mode, Some(DisplayMode::Print));
    }

    #[test]
    fn cli_overrides_config() {
        let args = Args::try_parse_from([
            "argand", "1+1i", "--theme", "dark", "--accent", "#102030", "--width", "60",
        ])
        .unwrap();
        let mut config = Config::default();
        config.merge_args(&args);
        assert_eq!(config.colors.theme, color::Theme::Dark);
        assert_eq!(config.colors.resolve().accent, (0x10, 0x20, 0x30));
        assert_eq!(config.display.width, Some(60));
    }

    #[test]
    fn value_required_unless_initializing() {
        assert!(Args::try_parse_from(["argand"]).is_err());
        assert!(Args::try_parse_from(["argand", "--init-config"]).is_ok());
    }
}
