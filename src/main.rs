// LedSlot - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. Catalog loading (built-in or user file)
// 4. Dispatch to one marketplace command

use clap::{Args, Parser, Subcommand};
use ledslot::app::catalog_mgr;
use ledslot::app::state::MarketState;
use ledslot::core::export::{self, OutputFormat};
use ledslot::core::filter::FilterState;
use ledslot::core::offer::OfferDraft;
use ledslot::core::region::Region;
use ledslot::platform::config::{self, AppConfig, PlatformPaths};
use ledslot::ui::cards;
use ledslot::util::constants;
use ledslot::util::error::{ExportError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// LedSlot - marketplace for mobile LED-advertising truck slots in Texas.
///
/// Browse and filter slots, negotiate offers, and inspect bookings from the
/// built-in catalog or your own catalog file.
#[derive(Parser, Debug)]
#[command(name = "ledslot", version, about)]
struct Cli {
    /// Catalog TOML file to use instead of the built-in catalog.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Directory holding config.toml (defaults to the platform config dir).
    #[arg(long = "config-dir", global = true)]
    config_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List slots matching the given filters.
    Search(SearchArgs),
    /// Show slot counts per region for the given filters.
    Regions(FilterArgs),
    /// List pending offers, then offer history.
    Offers,
    /// Accept, reject, or counter an offer.
    Offer {
        /// Offer ID.
        id: String,
        #[command(subcommand)]
        action: OfferAction,
    },
    /// Compare an amount against a slot's asking price.
    Quote {
        /// Slot ID.
        slot_id: String,
        /// Proposed amount in whole dollars.
        amount: Option<String>,
    },
    /// Show a booking with its status timeline.
    Booking {
        /// Booking ID.
        id: String,
    },
    /// Show the driver's active and upcoming runs.
    Runs,
}

#[derive(Subcommand, Debug)]
enum OfferAction {
    /// Accept the offered amount.
    Accept,
    /// Decline the offer.
    Reject,
    /// Propose a different amount.
    Counter {
        /// Counter amount in whole dollars.
        amount: u32,
    },
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Region to include (repeatable). Overrides [marketplace] default_regions.
    #[arg(short = 'r', long = "region")]
    regions: Vec<Region>,

    /// Only slots on verified trucks.
    #[arg(long, conflicts_with = "no_verified")]
    verified: bool,

    /// Include unverified trucks even if [marketplace] verified_only is set.
    #[arg(long = "no-verified")]
    no_verified: bool,

    /// Maximum price. Only the leading whole number is used; other input is ignored.
    #[arg(long = "max-price")]
    max_price: Option<String>,

    /// Case-insensitive substring of the truck name.
    #[arg(short = 'q', long = "query")]
    query: Option<String>,

    /// Regular expression matched against the truck name.
    #[arg(short = 'p', long = "pattern")]
    pattern: Option<String>,
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[command(flatten)]
    filter: FilterArgs,

    /// Output format (defaults to [export] format, then table).
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Write JSON/CSV output to this file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    // Config is read before logging so [logging] can take effect.
    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_dir);
    let (app_config, config_warnings) = config::load_config(&config_dir);

    ledslot::util::logging::init(
        cli.debug,
        app_config.log_level.as_deref(),
        app_config.log_file.as_deref(),
    );

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        config_dir = %config_dir.display(),
        "LedSlot starting"
    );
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    if let Err(e) = run(cli, &app_config) {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, app_config: &AppConfig) -> Result<()> {
    let catalog_path = cli.catalog.or_else(|| app_config.catalog_path.clone());
    let catalog = catalog_mgr::load_catalog(catalog_path.as_deref())?;
    let mut state = MarketState::new(catalog);

    match cli.command {
        Command::Search(args) => {
            state.set_filter(build_filter(&args.filter, app_config)?);
            let format = args.format.unwrap_or(app_config.output_format);
            write_slots(&state, format, args.output.as_deref())?;
        }
        Command::Regions(args) => {
            state.set_filter(build_filter(&args, app_config)?);
            print!("{}", cards::region_list(&state.region_counts()));
        }
        Command::Offers => print_offers(&state),
        Command::Offer { id, action } => {
            match action {
                OfferAction::Accept => {
                    state.accept_offer(&id)?;
                }
                OfferAction::Reject => {
                    state.reject_offer(&id)?;
                }
                OfferAction::Counter { amount } => {
                    let counter = state.counter_offer(&id, amount)?;
                    println!(
                        "Countered offer #{id} with #{} for {}\n",
                        counter.id,
                        cards::format_currency(counter.amount)
                    );
                }
            }
            print_offers(&state);
        }
        Command::Quote { slot_id, amount } => {
            let slot = state.slot(&slot_id)?;
            let draft = OfferDraft {
                amount_input: amount.unwrap_or_default(),
                ..Default::default()
            };
            let comparison = draft.can_submit().then(|| draft.comparison(slot));
            print!("{}", cards::quote(slot, comparison.as_ref()));
        }
        Command::Booking { id } => {
            print!("{}", cards::booking_detail(state.booking(&id)?));
        }
        Command::Runs => print!("{}", cards::driver_schedule(&state.driver_schedule())),
    }

    Ok(())
}

/// CLI flags override config defaults field by field.
fn build_filter(args: &FilterArgs, app_config: &AppConfig) -> Result<FilterState> {
    let mut filter = FilterState::default();

    let regions = if args.regions.is_empty() {
        &app_config.default_regions
    } else {
        &args.regions
    };
    filter.regions = regions.iter().copied().collect();
    filter.verified_only = if args.no_verified {
        false
    } else {
        args.verified || app_config.verified_only
    };
    match args.max_price {
        Some(ref input) => filter.set_max_price_input(input),
        None => filter.max_price = app_config.max_price,
    }
    filter.text_search = args.query.clone().unwrap_or_default();
    if let Some(ref pattern) = args.pattern {
        filter.set_regex(pattern)?;
    }

    tracing::debug!(
        regions = filter.regions.len(),
        verified_only = filter.verified_only,
        max_price = ?filter.max_price,
        active = filter.active_filter_count(),
        "Filter built"
    );
    Ok(filter)
}

fn print_offers(state: &MarketState) {
    let (pending, history) = state.partitioned_offers();
    print!("{}", cards::offer_list(&pending, &history, &state.catalog));
}

fn write_slots(state: &MarketState, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let slots = state.filtered_slots();
    let Some(path) = output else {
        let stdout = std::io::stdout();
        let path = Path::new("<stdout>");
        match format {
            OutputFormat::Table => print!("{}", cards::slot_table(&slots)),
            OutputFormat::Json => {
                let mut lock = stdout.lock();
                export::export_json(&slots, &mut lock, path)?;
                writeln!(lock).map_err(|e| ExportError::Io {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            }
            OutputFormat::Csv => {
                export::export_csv(&slots, stdout.lock(), path)?;
            }
        }
        return Ok(());
    };

    let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let count = match format {
        OutputFormat::Json => export::export_json(&slots, file, path)?,
        OutputFormat::Csv => export::export_csv(&slots, file, path)?,
        OutputFormat::Table => {
            let mut file = file;
            file.write_all(cards::slot_table(&slots).as_bytes())
                .map_err(|e| ExportError::Io {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            slots.len()
        }
    };
    tracing::info!(path = %path.display(), count, format = %format, "Slots exported");
    println!("Wrote {count} slot(s) to {}", path.display());
    Ok(())
}
