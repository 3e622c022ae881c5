//! Data Sources
//!
//! Where catalog data comes from. The catalogs only see typed records; the file
//! formats are handled here.

use std::fs;
use std::path::{Path, PathBuf};

use super::creatable::CreatableDocument;
use super::resource::ResourceRecord;
use crate::config::GameConfig;
use crate::error::LoadError;

/// Yields the rows of the resource table
pub trait ResourceSource {
    fn resource_records(&self) -> Result<Vec<ResourceRecord>, LoadError>;
}

/// Yields the shape-checked creatable document
pub trait CreatableSource {
    fn creatable_document(&self) -> Result<CreatableDocument, LoadError>;
}

impl ResourceSource for [ResourceRecord] {
    fn resource_records(&self) -> Result<Vec<ResourceRecord>, LoadError> {
        Ok(self.to_vec())
    }
}

impl ResourceSource for Vec<ResourceRecord> {
    fn resource_records(&self) -> Result<Vec<ResourceRecord>, LoadError> {
        Ok(self.clone())
    }
}

/// TOML document text
impl CreatableSource for str {
    fn creatable_document(&self) -> Result<CreatableDocument, LoadError> {
        CreatableDocument::from_toml_str(self)
    }
}

impl CreatableSource for CreatableDocument {
    fn creatable_document(&self) -> Result<CreatableDocument, LoadError> {
        Ok(self.clone())
    }
}

/// Catalog data files on disk: a JSON resource table and a TOML creatable document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub resources: PathBuf,
    pub creatables: PathBuf,
}

impl DataFiles {
    pub fn new(resources: impl Into<PathBuf>, creatables: impl Into<PathBuf>) -> Self {
        Self {
            resources: resources.into(),
            creatables: creatables.into(),
        }
    }

    /// Resolve both file names against a data directory
    pub fn in_dir(dir: impl AsRef<Path>, resources_file: &str, creatables_file: &str) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(resources_file), dir.join(creatables_file))
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.resources_path(), config.creatables_path())
    }
}

fn read_source(path: &Path) -> Result<String, LoadError> {
    tracing::info!("Loading {}", path.display());
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl ResourceSource for DataFiles {
    fn resource_records(&self) -> Result<Vec<ResourceRecord>, LoadError> {
        ResourceRecord::parse_table(&read_source(&self.resources)?)
    }
}

impl CreatableSource for DataFiles {
    fn creatable_document(&self) -> Result<CreatableDocument, LoadError> {
        CreatableDocument::from_toml_str(&read_source(&self.creatables)?)
    }
}

/// Catalog data held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticData {
    pub resources: Vec<ResourceRecord>,
    pub creatables: CreatableDocument,
}

impl StaticData {
    pub fn new(resources: Vec<ResourceRecord>, creatables: CreatableDocument) -> Self {
        Self {
            resources,
            creatables,
        }
    }
}

impl ResourceSource for StaticData {
    fn resource_records(&self) -> Result<Vec<ResourceRecord>, LoadError> {
        Ok(self.resources.clone())
    }
}

impl CreatableSource for StaticData {
    fn creatable_document(&self) -> Result<CreatableDocument, LoadError> {
        Ok(self.creatables.clone())
    }
}
