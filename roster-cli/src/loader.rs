use roster_core::{Catalog, CatalogLoader, CatalogSources, RosterError};
use std::path::PathBuf;
use thiserror::Error;

const TABLE_FILES: [&str; 5] = [
    "vehicles.json",
    "sponsors.json",
    "weapons.json",
    "upgrades.json",
    "perks.json",
];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Catalog(#[from] RosterError),
}

/// Reads the five catalog tables from a directory of JSON files.
#[derive(Debug, Clone)]
pub struct DirCatalogLoader {
    dir: PathBuf,
}

impl DirCatalogLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read(&self, file: &str) -> Result<String, LoadError> {
        let path = self.dir.join(file);
        std::fs::read_to_string(&path).map_err(|source| LoadError::Io { path, source })
    }
}

impl CatalogLoader for DirCatalogLoader {
    type Error = LoadError;

    fn load_catalog(&self) -> Result<Catalog, Self::Error> {
        let [vehicles, sponsors, weapons, upgrades, perks] = TABLE_FILES.map(|file| self.read(file));
        let (vehicles, sponsors, weapons, upgrades, perks) =
            (vehicles?, sponsors?, weapons?, upgrades?, perks?);
        log::debug!("loaded catalog tables from {}", self.dir.display());
        Ok(Catalog::from_json(&CatalogSources {
            vehicles: &vehicles,
            sponsors: &sponsors,
            weapons: &weapons,
            upgrades: &upgrades,
            perks: &perks,
        })?)
    }
}
