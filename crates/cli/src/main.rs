#![deny(unsafe_code)]
//! CLI binary for sigfield.
//!
//! Subcommands:
//! - `render <kind>`: materialize a field through the raster cache, write a colorized PNG
//! - `fingerprint <kind>`: print the cache key and entry path without evaluating
//! - `list`: print available field kinds and color ramps

mod error;
mod kind;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use log::info;
use sigfield_cache::{codec, colorize, entry_path, fingerprint, CacheStatus, RasterCache};
use sigfield_core::{ColorRamp, Region};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "sigfield", about = "Procedural signal fields with a disk raster cache")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Field kind, parameters and the integer region to materialize.
#[derive(Args)]
struct FieldArgs {
    /// Field kind ("noise" or "distance").
    kind: String,

    /// Field parameters as a JSON string.
    #[arg(long, default_value = "{}")]
    params: String,

    /// Region origin x.
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    x: i64,

    /// Region origin y.
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    y: i64,

    /// Region width in pixels.
    #[arg(short = 'W', long, default_value_t = 256)]
    width: i64,

    /// Region height in pixels.
    #[arg(short = 'H', long, default_value_t = 256)]
    height: i64,

    /// Cache directory.
    #[arg(long, default_value = ".sigfield-cache")]
    cache_dir: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Materialize a field through the cache and write a colorized PNG.
    Render {
        #[command(flatten)]
        field: FieldArgs,

        /// Color ramp name (grayscale, heat, spectrum, ocean, fire).
        #[arg(short, long, default_value = "grayscale")]
        ramp: String,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,

        /// Evaluate in memory without reading or writing the cache.
        #[arg(long)]
        no_cache: bool,

        /// Fail on cache storage errors instead of evaluating in memory.
        #[arg(long, conflicts_with = "no_cache")]
        strict: bool,
    },
    /// Print the cache key and entry path for a field and region.
    Fingerprint {
        #[command(flatten)]
        field: FieldArgs,
    },
    /// List available field kinds and color ramps.
    List,
}

fn status_label(status: CacheStatus) -> &'static str {
    match status {
        CacheStatus::Hit => "hit",
        CacheStatus::Miss => "miss",
        CacheStatus::Uncached => "uncached",
    }
}

fn parse_params(params: &str) -> Result<serde_json::Value, CliError> {
    serde_json::from_str(params).map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let kinds = kind::list_kinds();
            let ramps = ColorRamp::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "kinds": kinds,
                    "ramps": ramps,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Kinds:");
                for name in kinds {
                    println!("  {name}");
                }
                println!("Ramps:");
                println!("  {}", ramps.join(", "));
            }
        }
        Command::Fingerprint { field: args } => {
            let params = parse_params(&args.params)?;
            let region = Region::new(args.x, args.y, args.width, args.height)?;
            let field = kind::build_field(&args.kind, &params, region)?;
            let key = fingerprint(field.as_ref(), &region);
            let path = entry_path(&args.cache_dir, &key);

            if cli.json {
                let info = serde_json::json!({
                    "kind": args.kind,
                    "fingerprint": key,
                    "path": path.display().to_string(),
                    "cached": path.is_file(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{key}");
                println!("{}", path.display());
            }
        }
        Command::Render {
            field: args,
            ramp,
            output,
            no_cache,
            strict,
        } => {
            let params = parse_params(&args.params)?;
            let ramp = ColorRamp::from_name(&ramp).map_err(|e| CliError::Input(e.to_string()))?;
            let region = Region::new(args.x, args.y, args.width, args.height)?;
            let field = kind::build_field(&args.kind, &params, region)?;

            let raster = if no_cache {
                RasterCache::in_memory(field.as_ref(), region)?
            } else if strict {
                RasterCache::new(field.as_ref(), region, &args.cache_dir)?
            } else {
                RasterCache::new_or_in_memory(field.as_ref(), region, &args.cache_dir)?
            };
            info!(
                "{} raster {} ({})",
                args.kind,
                raster.fingerprint(),
                status_label(raster.status())
            );

            // Region::new guarantees positive dimensions and the cache
            // already rejected anything wider than u32.
            let (w, h) = (region.width() as u32, region.height() as u32);
            codec::write_rgba(&output, w, h, &colorize(&raster, &ramp))?;

            if cli.json {
                let info = serde_json::json!({
                    "kind": args.kind,
                    "region": [args.x, args.y, args.width, args.height],
                    "fingerprint": raster.fingerprint(),
                    "status": status_label(raster.status()),
                    "cache_entry": raster.path().map(|p| p.display().to_string()),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} {}x{} at ({}, {}) [{}] -> {}",
                    args.kind,
                    args.width,
                    args.height,
                    args.x,
                    args.y,
                    status_label(raster.status()),
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
