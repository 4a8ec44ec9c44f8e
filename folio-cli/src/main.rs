//! folio CLI
//!
//! Command-line interface for collecting the site's build-time data.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use folio_core::BuildData;
use folio_scraper::{
    BuildEvent, BuildOptions, FetchError, SiteConfig, ValueSource, cache, collect, config_sources,
    default_config_path,
};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Collect build data for the portfolio site", long_about = None)]
struct Cli {
    /// Config file path (defaults to folio.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all catalogs and write the build data file
    Build {
        /// Output file
        #[arg(short, long, default_value = "build-data.json")]
        out: PathBuf,

        /// Refetch even when a fresh cache entry exists
        #[arg(long)]
        force: bool,

        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Manage the build cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Show the cache entry on disk
    Show,

    /// Remove the cache entry
    Clear,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current values and where they come from
    Show,

    /// Print the default config file path
    Path,
}

fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    match cli.command {
        Commands::Build { out, force, pretty } => run_build(cli.config, out, force, pretty),
        Commands::Cache { action } => match action {
            CacheAction::Show => run_cache_show(cli.config),
            CacheAction::Clear => run_cache_clear(cli.config),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => run_config_show(cli.config),
            ConfigAction::Path => run_config_path(),
        },
    }
}

fn load_config(path: Option<&PathBuf>) -> Option<SiteConfig> {
    match SiteConfig::load(path.map(|p| p.as_path())) {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!(
                "{} Failed to load configuration: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            None
        }
    }
}

/// Run the build command.
fn run_build(config_path: Option<PathBuf>, out: PathBuf, force: bool, pretty: bool) {
    let Some(config) = load_config(config_path.as_ref()) else {
        std::process::exit(1);
    };

    println!(
        "Collecting build data into: {}",
        out.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    if force {
        println!(
            "{}",
            "Force: ignoring any cached entry".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    println!();

    let options = BuildOptions { force };
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    let (data, from_cache) = rt.block_on(async {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .unwrap()
                .tick_chars("/-\\|"),
        );
        pb.set_message("Checking cache...");
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel::<BuildEvent>();
        let mut from_cache = false;

        let data = folio_scraper::async_util::run_with_events(
            collect(&config, &options, event_tx),
            event_rx,
            |event| match event {
                BuildEvent::CacheHit => {
                    from_cache = true;
                }
                BuildEvent::Fetching => {
                    pb.set_message("Fetching catalogs...");
                }
                BuildEvent::Enriching { bands } => {
                    pb.set_message(format!("Enriching concerts for {bands} bands..."));
                }
                BuildEvent::Saving => {
                    pb.set_message("Saving cache...");
                }
                BuildEvent::Done => {
                    pb.finish_and_clear();
                }
            },
        )
        .await;

        pb.finish_and_clear();
        (data, from_cache)
    });

    if from_cache {
        println!(
            "{} Using cached data (less than a day old)",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        );
    }
    print_summary(&data);

    match write_output(&out, &data, pretty) {
        Ok(bytes) => {
            println!(
                "{} {} written ({})",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                out.display().if_supports_color(Stdout, |t| t.bold()),
                format_bytes(bytes),
            );
        }
        Err(e) => {
            eprintln!(
                "{} Failed to write {}: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                out.display(),
                e,
            );
            std::process::exit(1);
        }
    }
}

fn write_output(path: &Path, data: &BuildData, pretty: bool) -> Result<u64, FetchError> {
    let json = if pretty {
        serde_json::to_string_pretty(data)?
    } else {
        serde_json::to_string(data)?
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, &json)?;
    Ok(json.len() as u64)
}

/// Print the per-catalog summary.
fn print_summary(data: &BuildData) {
    println!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));

    match &data.github.user {
        Some(user) => {
            println!(
                "  {} GitHub: {} ({} pinned, {} repos)",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                user.login,
                data.github.pinned_repos.len(),
                data.github.repos.len(),
            );
        }
        None => {
            println!(
                "  {} GitHub: no data",
                "?".if_supports_color(Stdout, |t| t.yellow()),
            );
        }
    }

    match &data.youtube.channel {
        Some(channel) => {
            println!(
                "  {} YouTube: {} ({} videos)",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                channel.name,
                data.youtube.videos.len(),
            );
        }
        None => {
            println!(
                "  {} YouTube: no data",
                "?".if_supports_color(Stdout, |t| t.yellow()),
            );
        }
    }

    let bands = &data.sawthat.bands;
    if bands.is_empty() {
        println!(
            "  {} Concerts: no data",
            "?".if_supports_color(Stdout, |t| t.yellow()),
        );
    } else {
        let concerts: usize = bands.iter().map(|b| b.concerts.len()).sum();
        let with_album = bands
            .iter()
            .flat_map(|b| &b.concerts)
            .filter(|c| c.album.is_some())
            .count();
        println!(
            "  {} Concerts: {} bands, {} concerts ({} matched to an album)",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            bands.len(),
            concerts,
            with_album,
        );
    }
    println!();
}

/// Show the cache entry on disk.
fn run_cache_show(config_path: Option<PathBuf>) {
    let Some(config) = load_config(config_path.as_ref()) else {
        std::process::exit(1);
    };

    match cache::inspect(&config.cache.path) {
        Some(info) => {
            println!("{}", "Build cache:".if_supports_color(Stdout, |t| t.bold()));
            println!(
                "  Path:  {}",
                info.path.display().if_supports_color(Stdout, |t| t.cyan()),
            );
            println!("  Size:  {}", format_bytes(info.size_bytes));
            println!("  Saved: {}", format_saved_at(info.saved_at_millis));
            if info.fresh {
                println!(
                    "  State: {}",
                    "fresh".if_supports_color(Stdout, |t| t.green()),
                );
            } else {
                println!(
                    "  State: {}",
                    "expired".if_supports_color(Stdout, |t| t.yellow()),
                );
            }
        }
        None => {
            println!(
                "{}",
                "No cache entry.".if_supports_color(Stdout, |t| t.dimmed()),
            );
            println!("Run 'folio build' to create one.");
        }
    }
}

/// Remove the cache entry.
fn run_cache_clear(config_path: Option<PathBuf>) {
    let Some(config) = load_config(config_path.as_ref()) else {
        std::process::exit(1);
    };

    match cache::clear(&config.cache.path) {
        Ok(0) => {
            println!(
                "{}",
                "No cache entry to remove.".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        Ok(freed) => {
            println!(
                "{} Cache cleared ({} freed)",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                format_bytes(freed),
            );
        }
        Err(e) => {
            eprintln!(
                "{} Error clearing cache: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
        }
    }
}

// -- Config subcommands --

/// Mask a secret, showing only the first 2 characters.
fn mask_value(s: &str) -> String {
    if s.len() <= 2 {
        "****".to_string()
    } else {
        format!("{}****", &s[..2])
    }
}

/// Show current values and their sources.
fn run_config_show(config_path: Option<PathBuf>) {
    let path = config_path.clone().unwrap_or_else(default_config_path);
    let sources = config_sources(config_path.as_deref());
    let config = SiteConfig::load(config_path.as_deref()).unwrap_or_default();

    println!(
        "{}",
        "Site Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    println!();

    if path.exists() {
        println!(
            "  Config file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        println!(
            "  Config file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    println!();

    let pins = (!config.github.pins.is_empty()).then(|| config.github.pins.join(", "));
    let fields: &[(&str, &ValueSource, Option<String>)] = &[
        (
            "github.owner",
            &sources.github_owner,
            config.github.owner.clone(),
        ),
        ("github.pins", &sources.github_pins, pins),
        (
            "youtube.channel",
            &sources.youtube_channel,
            config.youtube.channel.clone(),
        ),
        (
            "youtube.api_key",
            &sources.youtube_api_key,
            config.youtube.api_key.as_deref().map(mask_value),
        ),
        ("sawthat.id", &sources.sawthat_id, config.sawthat.id.clone()),
        (
            "cache.path",
            &sources.cache_path,
            Some(config.cache.path.display().to_string()),
        ),
    ];

    for (name, source, value) in fields {
        let source_str = format!("({})", source);
        match value {
            Some(v) => {
                println!(
                    "  {} {} {}",
                    format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                    v,
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
            None => {
                println!(
                    "  {} {} {}",
                    format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                    "not set".if_supports_color(Stdout, |t| t.yellow()),
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
    }
}

/// Print the default config file path.
fn run_config_path() {
    println!("{}", default_config_path().display());
}

/// Format a byte size as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} bytes", bytes)
    }
}

fn format_saved_at(millis: i64) -> String {
    match chrono::DateTime::from_timestamp_millis(millis) {
        Some(when) => format!(
            "{} ({} ago)",
            when.format("%Y-%m-%d %H:%M UTC"),
            format_age(chrono::Utc::now() - when),
        ),
        None => "unknown".to_string(),
    }
}

fn format_age(age: chrono::TimeDelta) -> String {
    let minutes = age.num_minutes();
    if minutes < 1 {
        "moments".to_string()
    } else if minutes < 60 {
        format!("{minutes}m")
    } else if minutes < 24 * 60 {
        format!("{}h {}m", minutes / 60, minutes % 60)
    } else {
        format!("{}d", minutes / (24 * 60))
    }
}
