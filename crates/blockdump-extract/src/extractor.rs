use blockdump_blocks::{ExtractError, MaterialCatalog, RegistrySnapshot};
use rayon::prelude::*;

use crate::merge::{AliasResolver, MergeOutcome};
use crate::record::{PreparedBlock, prepare_block};
use crate::shapes::ShapeTable;
use crate::snapshot::Snapshot;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Emit an occlusion shape channel per block plus the shared shape table.
    pub intern_shapes: bool,
    /// Prepare blocks on the rayon pool. Output is identical either way.
    pub parallel: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            intern_shapes: true,
            parallel: true,
        }
    }
}

pub struct Extractor<'a> {
    catalog: &'a MaterialCatalog,
    options: ExtractOptions,
}

impl<'a> Extractor<'a> {
    pub fn new(catalog: &'a MaterialCatalog, options: ExtractOptions) -> Self {
        Self { catalog, options }
    }

    /// Runs the whole pipeline. Any error aborts the run; there is no partial
    /// snapshot.
    pub fn run(&self, registry: &RegistrySnapshot) -> Result<Snapshot, ExtractError> {
        let catalog = self.catalog;
        let prepared: Vec<Result<PreparedBlock, ExtractError>> = if self.options.parallel {
            registry
                .blocks
                .par_iter()
                .map(|b| prepare_block(b, catalog))
                .collect()
        } else {
            registry
                .blocks
                .iter()
                .map(|b| prepare_block(b, catalog))
                .collect()
        };
        // First failure in registry order, regardless of which thread hit it
        let prepared = prepared.into_iter().collect::<Result<Vec<_>, _>>()?;

        // Interning and merging stay on one thread, in registry order, so shape
        // ids and alias order are deterministic.
        let mut shapes = self.options.intern_shapes.then(ShapeTable::new);
        let mut resolver = AliasResolver::new();
        let mut num_block_states = 0usize;
        for block in prepared {
            num_block_states += block.num_states;
            let alias = block.alias.clone();
            let record = block.into_record(shapes.as_mut());
            match resolver.insert(record) {
                MergeOutcome::Added(_) => log::debug!("block {alias}"),
                MergeOutcome::Merged(i) => log::debug!(
                    "block {alias} merged into {}",
                    resolver.records()[i].names[0]
                ),
            }
        }

        log::info!(
            "extracted {} records from {} registry entries ({} states, {} shapes)",
            resolver.len(),
            registry.blocks.len(),
            num_block_states,
            shapes.as_ref().map_or(0, ShapeTable::len)
        );

        Ok(Snapshot {
            version: registry.version.clone(),
            world_version: registry.world_version,
            num_block_states,
            blocks: resolver.into_records(),
            materials: catalog.entries().to_vec(),
            shapes: shapes.map(|t| t.export()),
        })
    }
}
