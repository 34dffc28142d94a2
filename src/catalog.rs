//! Cataloging of model input data sources.

use crate::error::CatalogError;
use crate::io::utils;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The role a data source plays in a model run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Bathymetry,
    Spectra,
    Wind,
    GridFile,
}

/// A named pointer to an input data set on disk.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataSource {
    name: String,
    kind: SourceKind,
    path: PathBuf,
    #[serde(default)]
    description: String,
}

impl DataSource {
    pub fn new<S: Into<String>, P: Into<PathBuf>>(name: S, kind: SourceKind, path: P) -> Self {
        Self {
            name: name.into(),
            kind,
            path: path.into(),
            description: String::new(),
        }
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A collection of data sources indexed by name.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Catalog {
    sources: BTreeMap<String, DataSource>,
}

impl Catalog {
    /// Builds a catalog from a list of sources, rejecting duplicate names.
    pub fn from_sources(sources: Vec<DataSource>) -> Result<Self, CatalogError> {
        let mut map = BTreeMap::new();
        for source in sources {
            let name = source.name().to_string();
            if map.insert(name.clone(), source).is_some() {
                return Err(CatalogError::DuplicateSource(name));
            }
        }
        Ok(Self { sources: map })
    }

    /// Reads a catalog from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let text = utils::read_text_file(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Writes the catalog to a JSON file.
    pub fn save_json_file(&self, path: &Path) -> Result<(), CatalogError> {
        let text = serde_json::to_string_pretty(self)?;
        utils::write_text_file(path, &text)?;
        Ok(())
    }

    /// Looks up a source by name.
    pub fn source(&self, name: &str) -> Result<&DataSource, CatalogError> {
        self.sources
            .get(name)
            .ok_or_else(|| CatalogError::SourceNotFound(name.to_string()))
    }

    /// Returns the sources of the given kind, in name order.
    pub fn sources_of_kind(&self, kind: SourceKind) -> impl Iterator<Item = &DataSource> {
        self.sources.values().filter(move |source| source.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Iterates over all sources in name order.
    pub fn iter(&self) -> impl Iterator<Item = &DataSource> {
        self.sources.values()
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn example_catalog() -> Catalog {
        Catalog::from_sources(vec![
            DataSource::new("perth_bathy", SourceKind::Bathymetry, "data/bathy.bot")
                .with_description("Perth coastal bathymetry"),
            DataSource::new("era5_wind", SourceKind::Wind, "data/wind.nc"),
        ])
        .unwrap()
    }

    #[test]
    fn duplicate_source_names_are_rejected() {
        let result = Catalog::from_sources(vec![
            DataSource::new("bathy", SourceKind::Bathymetry, "a.bot"),
            DataSource::new("bathy", SourceKind::Bathymetry, "b.bot"),
        ]);
        assert!(matches!(
            result,
            Err(CatalogError::DuplicateSource(name)) if name == "bathy"
        ));
    }

    #[test]
    fn lookup_by_name_and_kind() {
        let catalog = example_catalog();
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.source("perth_bathy").unwrap().path(),
            Path::new("data/bathy.bot")
        );
        assert!(catalog.source("missing").is_err());
        let winds: Vec<_> = catalog.sources_of_kind(SourceKind::Wind).collect();
        assert_eq!(winds.len(), 1);
        assert_eq!(winds[0].name(), "era5_wind");
    }

    #[test]
    fn json_round_trip_preserves_sources() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let catalog = example_catalog();
        catalog.save_json_file(&path).unwrap();
        let read_back = Catalog::from_json_file(&path).unwrap();
        assert_eq!(read_back.len(), 2);
        assert_eq!(
            read_back.source("era5_wind").unwrap().kind(),
            SourceKind::Wind
        );
        assert_eq!(
            read_back.source("perth_bathy").unwrap().description(),
            "Perth coastal bathymetry"
        );
    }
}
