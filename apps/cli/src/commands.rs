//! Command handlers.
//!
//! Each handler loads what it needs, calls into movequote-core, and prints
//! to stdout. Logs go to stderr so `--format json` output stays clean.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use movequote_core::{Catalog, CatalogItem, Invoice, PricingEngine, QuoteRequest};
use movequote_distance::{DistanceResolver, GreatCircleDistance, ManualDistance, Resolution};
use tracing::{debug, info, warn};

use crate::cli::{Cli, Commands, OutputFormat, QuoteArgs};
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

// =============================================================================
// Context
// =============================================================================

/// Everything a command needs, built once per invocation.
pub struct Context {
    pub config: AppConfig,
    pub catalog: Arc<Catalog>,
    pub engine: PricingEngine,
    pub format: OutputFormat,
}

impl Context {
    /// Loads config and catalog; the `--catalog` flag wins over the config file.
    pub fn load(cli: &Cli) -> CliResult<Self> {
        let config = AppConfig::load(cli.config.as_deref())?;
        let engine = PricingEngine::new(config.to_pricing_config())?;

        let catalog_path = cli.catalog.clone().or_else(|| config.catalog.path.clone());
        let catalog = match catalog_path {
            Some(path) => load_catalog(&path)?,
            None => Catalog::builtin(),
        };
        debug!(items = catalog.len(), "Catalog ready");

        Ok(Context {
            config,
            catalog: Arc::new(catalog),
            engine,
            format: cli.format,
        })
    }
}

fn load_catalog(path: &Path) -> CliResult<Catalog> {
    info!(?path, "Loading catalog");
    let json = read_file(path)?;
    Ok(Catalog::from_json_str(&json)?)
}

fn read_file(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

// =============================================================================
// Dispatch
// =============================================================================

pub fn execute(cli: Cli) -> CliResult<()> {
    let ctx = Context::load(&cli)?;

    match cli.command {
        Commands::Quote(args) => cmd_quote(&ctx, args),
        Commands::Catalog { category, search } => {
            cmd_catalog(&ctx, category.as_deref(), search.as_deref())
        }
        Commands::Categories => cmd_categories(&ctx),
        Commands::Config => cmd_config(&ctx),
    }
}

// =============================================================================
// quote
// =============================================================================

fn cmd_quote(ctx: &Context, args: QuoteArgs) -> CliResult<()> {
    let request = build_request(&args)?;

    // Bad input is reported before any distance work happens.
    request.validate()?;
    let selection = request.resolve(&ctx.catalog)?;

    let resolution = build_resolver(&args, ctx.config.distance.default_estimate_km)
        .resolve(&request.origin, &request.destination);
    if resolution.fallback_used {
        warn!(
            distance_km = resolution.distance_km,
            "Distance is an estimate; pass --distance-km or coordinates for an exact quote"
        );
    }

    let invoice = ctx.engine.calculate_invoice(
        &request.origin,
        &request.destination,
        resolution.distance_km,
        &selection,
    )?;

    match ctx.format {
        OutputFormat::Text => print!("{}", render_text(&invoice, &resolution)),
        OutputFormat::Json => println!("{}", invoice.to_json_pretty()?),
    }

    if let Some(target) = args.export {
        let path = target.unwrap_or_else(default_export_path);
        export_invoice(&invoice, &path)?;
        eprintln!("Quote exported to {}", path.display());
    }

    Ok(())
}

/// Merges the optional request file with the command-line flags.
///
/// Flags replace the file's origin and destination; `--item` entries are
/// appended to the file's items.
pub fn build_request(args: &QuoteArgs) -> CliResult<QuoteRequest> {
    let mut request = match &args.request {
        Some(path) => {
            info!(?path, "Loading quote request");
            serde_json::from_str(&read_file(path)?)?
        }
        None => QuoteRequest {
            origin: String::new(),
            destination: String::new(),
            items: Vec::new(),
        },
    };

    if let Some(from) = &args.from {
        request.origin = from.clone();
    }
    if let Some(to) = &args.to {
        request.destination = to.clone();
    }
    request.items.extend(args.items.iter().cloned());

    Ok(request)
}

/// Manual distance first, then coordinates, then the configured estimate.
pub fn build_resolver(args: &QuoteArgs, default_estimate_km: f64) -> DistanceResolver {
    let mut resolver = DistanceResolver::new(default_estimate_km);
    if let Some(km) = args.distance_km {
        resolver = resolver.with_source(ManualDistance(km));
    }
    if let (Some(origin), Some(destination)) = (args.from_coords, args.to_coords) {
        resolver = resolver.with_source(GreatCircleDistance::new(origin, destination));
    }
    resolver
}

fn render_text(invoice: &Invoice, resolution: &Resolution) -> String {
    let mut out = invoice.summary();
    if !out.ends_with('\n') {
        out.push('\n');
    }
    if resolution.fallback_used {
        out.push_str(&format!(
            "\nNote: distance is a default estimate of {} km\n",
            resolution.distance_km
        ));
    }
    out
}

/// `moving-quote-<unix millis>.json` in the working directory.
pub fn default_export_path() -> PathBuf {
    PathBuf::from(format!(
        "moving-quote-{}.json",
        Utc::now().timestamp_millis()
    ))
}

pub fn export_invoice(invoice: &Invoice, path: &Path) -> CliResult<()> {
    let json = invoice.to_json_pretty()?;
    std::fs::write(path, json)?;
    info!(?path, total = %invoice.total_cost(), "Quote exported");
    Ok(())
}

// =============================================================================
// catalog / categories / config
// =============================================================================

fn cmd_catalog(ctx: &Context, category: Option<&str>, search: Option<&str>) -> CliResult<()> {
    let items = filter_catalog(&ctx.catalog, category, search);

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&items)?),
        OutputFormat::Text => {
            if items.is_empty() {
                println!("No matching items.");
                return Ok(());
            }
            println!(
                "{:<28} {:<15} {:>6} {:>10}",
                "Item", "Category", "Weight", "Price"
            );
            println!("{}", "-".repeat(62));
            for item in &items {
                println!(
                    "{:<28} {:<15} {:>6} {:>10}",
                    item.name,
                    item.category,
                    item.weight_score,
                    item.reference_price.to_string()
                );
            }
            println!("\n{} item(s)", items.len());
        }
    }

    Ok(())
}

/// Applies the optional category and search filters together.
pub fn filter_catalog<'c>(
    catalog: &'c Catalog,
    category: Option<&str>,
    search: Option<&str>,
) -> Vec<&'c CatalogItem> {
    let mut items = match search {
        Some(term) => catalog.search(term),
        None => catalog.items().iter().collect(),
    };
    if let Some(category) = category {
        items.retain(|item| item.category.eq_ignore_ascii_case(category));
    }
    items
}

fn cmd_categories(ctx: &Context) -> CliResult<()> {
    let categories = ctx.catalog.categories();
    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&categories)?),
        OutputFormat::Text => {
            for category in categories {
                println!("{}", category);
            }
        }
    }
    Ok(())
}

fn cmd_config(ctx: &Context) -> CliResult<()> {
    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ctx.config)?),
        OutputFormat::Text => print!("{}", ctx.config.to_toml()?),
    }
    Ok(())
}
