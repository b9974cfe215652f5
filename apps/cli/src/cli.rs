//! CLI definition using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use movequote_core::ItemRequest;
use movequote_distance::Coordinates;
use std::path::PathBuf;

/// Output format for results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Parser)]
#[command(name = "movequote")]
#[command(version)]
#[command(about = "Household moving cost calculator")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text, json)
    #[arg(long, short = 'f', global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Config file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON catalog file replacing the built-in catalog
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Price a move and print the invoice
    Quote(QuoteArgs),

    /// List catalog items
    Catalog {
        /// Only items in this category
        #[arg(long, short = 'c')]
        category: Option<String>,

        /// Case-insensitive name search
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// List catalog categories
    Categories,

    /// Print the effective configuration as TOML
    Config,
}

#[derive(Args, Debug, Default)]
pub struct QuoteArgs {
    /// Origin location
    #[arg(long)]
    pub from: Option<String>,

    /// Destination location
    #[arg(long)]
    pub to: Option<String>,

    /// Item to move as "name=quantity" (quantity defaults to 1), repeatable
    #[arg(long = "item", short = 'i', value_parser = parse_item_arg)]
    pub items: Vec<ItemRequest>,

    /// JSON quote request file; --from, --to and --item extend it
    #[arg(long)]
    pub request: Option<PathBuf>,

    /// Known road distance in km
    #[arg(long)]
    pub distance_km: Option<f64>,

    /// Origin coordinates as "lat,lon"
    #[arg(long, requires = "to_coords", allow_hyphen_values = true)]
    pub from_coords: Option<Coordinates>,

    /// Destination coordinates as "lat,lon"
    #[arg(long, requires = "from_coords", allow_hyphen_values = true)]
    pub to_coords: Option<Coordinates>,

    /// Write the invoice as JSON (default file name: moving-quote-<millis>.json)
    #[arg(long)]
    pub export: Option<Option<PathBuf>>,
}

/// Parses `name=quantity`, or a bare name meaning one unit.
///
/// The last `=` splits, so names containing `=` still work.
pub fn parse_item_arg(raw: &str) -> Result<ItemRequest, String> {
    match raw.rsplit_once('=') {
        Some((name, quantity)) => {
            let quantity: f64 = quantity
                .trim()
                .parse()
                .map_err(|_| format!("invalid quantity in \"{}\"", raw))?;
            Ok(ItemRequest::new(name.trim(), quantity))
        }
        None => Ok(ItemRequest::new(raw.trim(), 1.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_arg() {
        assert_eq!(
            parse_item_arg("Double Bed=2").unwrap(),
            ItemRequest::new("Double Bed", 2.0)
        );
        assert_eq!(
            parse_item_arg(" Fridge ").unwrap(),
            ItemRequest::new("Fridge", 1.0)
        );
        // fractional quantities reach core validation untouched
        assert_eq!(
            parse_item_arg("Box=2.5").unwrap(),
            ItemRequest::new("Box", 2.5)
        );
        assert!(parse_item_arg("Couch=two").is_err());
    }

    #[test]
    fn test_quote_command_parses() {
        let cli = Cli::try_parse_from([
            "movequote",
            "quote",
            "--from",
            "Centurion",
            "--to",
            "Tzaneen",
            "--item",
            "Grand Piano=1",
            "-i",
            "Box",
            "--from-coords",
            "-25.86,28.19",
            "--to-coords",
            "-23.83,30.16",
            "--format",
            "json",
            "--export",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        let Commands::Quote(args) = cli.command else {
            panic!("expected quote command");
        };
        assert_eq!(args.from.as_deref(), Some("Centurion"));
        assert_eq!(args.items.len(), 2);
        assert!(args.from_coords.is_some());
        assert_eq!(args.export, Some(None));
    }

    #[test]
    fn test_coordinates_must_come_in_pairs() {
        let result = Cli::try_parse_from([
            "movequote",
            "quote",
            "--from-coords",
            "-25.86,28.19",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_catalog_filters() {
        let cli = Cli::try_parse_from(["movequote", "catalog", "--category", "Kitchen"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Catalog { category: Some(ref c), search: None } if c == "Kitchen"
        ));
    }
}
