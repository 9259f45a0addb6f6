mod cli;
mod config;

use std::error::Error;
use std::path::Path;

use blockdump_blocks::{MaterialCatalog, MaterialNames, RegistrySnapshot};
use blockdump_extract::Extractor;
use blockdump_io::write_snapshot;
use clap::Parser;

use crate::cli::CliArgs;
use crate::config::{DEFAULT_CONFIG, RunConfig, load_config};

fn init_logging(level: Option<&str>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(spec) = level {
        builder.parse_filters(spec);
    }
    builder.init();
}

fn resolve_config(args: &CliArgs) -> Result<RunConfig, Box<dyn Error>> {
    let mut cfg = match &args.config {
        Some(path) => load_config(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => load_config(Path::new(DEFAULT_CONFIG))?,
        None => RunConfig::default(),
    };
    cfg.apply_cli_overrides(args);
    Ok(cfg)
}

fn run(cfg: &RunConfig) -> Result<(), Box<dyn Error>> {
    let registry_path = cfg
        .registry
        .as_ref()
        .ok_or("no registry snapshot given (pass a path or set `registry` in blockdump.toml)")?;
    log::info!("Loading registry snapshot {}", registry_path.display());
    let registry = RegistrySnapshot::load_from_path(registry_path)?;

    let names = match &cfg.materials {
        Some(path) => MaterialNames::from_path(path)?,
        None => MaterialNames::builtin(),
    };
    let catalog = MaterialCatalog::build(&names, &registry.materials);
    if catalog.is_empty() {
        log::warn!("No catalog material is defined by the registry");
    } else {
        log::info!("{} materials in catalog", catalog.len());
    }

    log::info!(
        "Extracting data for {} (world version {})...",
        registry.version,
        registry.world_version
    );
    let snapshot = Extractor::new(&catalog, cfg.extract_options()).run(&registry)?;
    write_snapshot(&cfg.output, &snapshot, &cfg.write_options())?;
    log::info!("Done");
    Ok(())
}

fn main() {
    let args = CliArgs::parse();
    init_logging(args.log_level.as_deref());
    if let Err(e) = resolve_config(&args).and_then(|cfg| run(&cfg)) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
