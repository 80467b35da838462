use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use env_logger::Builder;
use log::{info, LevelFilter};

mod render;

use asset_palette_core::errors::CoreError;
use asset_palette_core::models::settings::Settings;
use asset_palette_core::AssetPalette;

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OutputType {
    Text,
    Json,
}

impl std::fmt::Display for OutputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.to_possible_value()
            .expect("no values are skipped")
            .get_name()
            .fmt(f)
    }
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum View {
    AssetClass,
    Account,
    Holdings,
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.to_possible_value()
            .expect("no values are skipped")
            .get_name()
            .fmt(f)
    }
}

/// Paint a portfolio from brokerage holdings CSV statements
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Holdings statements (.csv)
    #[clap(required = true, value_parser)]
    files: Vec<PathBuf>,

    /// Portfolio names, matched to files in order
    #[clap(short, long, value_parser)]
    name: Vec<String>,

    /// statement format settings (json)
    #[clap(short, long, value_parser)]
    settings: Option<PathBuf>,

    /// output type
    #[clap(default_value_t = OutputType::Text, short, long, value_parser)]
    output: OutputType,

    /// breakdown shown in text output
    #[clap(default_value_t = View::AssetClass, short, long, value_parser)]
    view: View,
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings, CoreError> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&json)?)
        }
        None => Ok(Settings::default()),
    }
}

fn main() -> Result<(), CoreError> {
    //
    // cli arg
    let args = Args::parse();

    //
    // logger
    let mut builder = Builder::new();
    builder.filter_level(LevelFilter::Info);
    builder.parse_default_env();
    builder.init();

    //
    // settings
    let settings = load_settings(args.settings.as_ref())?;
    let mut palette = AssetPalette::with_settings(settings)?;

    //
    // import statements
    let files: Vec<(Option<String>, PathBuf)> = args
        .files
        .iter()
        .enumerate()
        .map(|(i, path)| (args.name.get(i).cloned(), path.clone()))
        .collect();
    palette.import_files(&files)?;
    info!("loaded {} portfolios", palette.portfolio_count());

    //
    // write output
    match args.output {
        OutputType::Json => println!("{}", palette.to_json()?),
        OutputType::Text => {
            let text = render::render_text(&palette, args.view)
                .map_err(|e| CoreError::Serialization(format!("Failed to render report: {e}")))?;
            print!("{text}");
        }
    }

    Ok(())
}
