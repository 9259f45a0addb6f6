use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use blockdump_extract::ExtractOptions;
use blockdump_io::WriteOptions;

use crate::cli::CliArgs;

pub const DEFAULT_CONFIG: &str = "blockdump.toml";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RunConfig {
    pub registry: Option<PathBuf>,
    pub materials: Option<PathBuf>,
    pub output: PathBuf,
    pub intern_shapes: bool,
    pub parallel: bool,
    pub compact_arrays: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            registry: None,
            materials: None,
            output: PathBuf::from("blocks.json"),
            intern_shapes: true,
            parallel: true,
            compact_arrays: true,
        }
    }
}

pub fn load_config(path: &Path) -> Result<RunConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: RunConfig = toml::from_str(&s)?;
    Ok(cfg)
}

impl RunConfig {
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref p) = args.registry {
            self.registry = Some(p.clone());
        }
        if let Some(ref p) = args.materials {
            self.materials = Some(p.clone());
        }
        if let Some(ref p) = args.output {
            self.output = p.clone();
        }
        if args.no_shapes {
            self.intern_shapes = false;
        }
        if args.sequential {
            self.parallel = false;
        }
        if args.no_compact {
            self.compact_arrays = false;
        }
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            intern_shapes: self.intern_shapes,
            parallel: self.parallel,
        }
    }

    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            compact_arrays: self.compact_arrays,
        }
    }
}
