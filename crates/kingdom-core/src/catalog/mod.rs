//! Catalogs
//!
//! Load-once, read-only collections of named templates: resource definitions and
//! creatable recipes. Game sessions never mutate catalog entries; creatables are
//! instantiated as independent copies.

pub mod creatable;
pub mod resource;
pub mod source;

pub use creatable::{
    CreatableCatalog, CreatableDocument, CreatableEntry, CreatableTemplate, OutputAction,
    OutputEntry, PrerequisiteEntry,
};
pub use resource::{Resource, ResourceCatalog, ResourceRecord, CATEGORY_DEFAULT};
pub use source::{CreatableSource, DataFiles, ResourceSource, StaticData};
