//! Creatable recipes: the document schema, validated templates, and the catalog.
//!
//! The document is TOML with a `creatable` array at the root:
//!
//! ```toml
//! [[creatable]]
//! name = "house"
//! description = "A small house"
//! ticks_required = 3
//!
//! [[creatable.pre_requisite]]
//! name = "wood"
//! count = 2
//!
//! [[creatable.output]]
//! name = "shelter"
//! count = 1
//! action = "accumulate"
//! ```

use bevy_ecs::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::resource::ResourceCatalog;
use super::source::CreatableSource;
use crate::components::creatable::{Creatable, OutputSpec};
use crate::error::LoadError;

/// Tick cost used when an entry does not give one
pub const DEFAULT_TICKS_REQUIRED: i64 = 10;

/// Key that must hold the list of entries at the document root
pub const ROOT_KEY: &str = "creatable";

/// How an output is applied to the inventory on completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputAction {
    /// Add the output count to whatever is held
    #[default]
    Accumulate,
    /// Set the held quantity to the output count
    Replace,
}

/// A parsed creatable document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatableDocument {
    #[serde(rename = "creatable", default)]
    pub entries: Vec<CreatableEntry>,
}

/// One `[[creatable]]` table.
///
/// Fields are read leniently: a value of the wrong type falls back to its default
/// instead of failing the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatableEntry {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default = "default_ticks_required", deserialize_with = "lenient_ticks")]
    pub ticks_required: i64,
    #[serde(rename = "pre_requisite", default, deserialize_with = "lenient_rows")]
    pub pre_requisites: Vec<PrerequisiteEntry>,
    #[serde(rename = "output", default, deserialize_with = "lenient_rows")]
    pub outputs: Vec<OutputEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrerequisiteEntry {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default = "default_count", deserialize_with = "lenient_count")]
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputEntry {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default = "default_count", deserialize_with = "lenient_count")]
    pub count: u32,
    #[serde(default, deserialize_with = "lenient_action")]
    pub action: OutputAction,
}

fn default_ticks_required() -> i64 {
    DEFAULT_TICKS_REQUIRED
}

fn default_count() -> u32 {
    1
}

/// Text stays text, numbers and booleans are stringified, anything else is `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match toml::Value::deserialize(deserializer)? {
        toml::Value::String(s) => Some(s),
        toml::Value::Integer(n) => Some(n.to_string()),
        toml::Value::Float(n) => Some(n.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        other => {
            tracing::warn!("Ignoring non-text value {}", other);
            None
        }
    })
}

/// An integer, or an integer written as text
fn integer_value(value: &toml::Value) -> Option<i64> {
    match value {
        toml::Value::Integer(n) => Some(*n),
        toml::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_ticks<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = toml::Value::deserialize(deserializer)?;
    Ok(integer_value(&value).unwrap_or_else(|| {
        tracing::warn!("Bad ticks_required {}, using {}", value, DEFAULT_TICKS_REQUIRED);
        DEFAULT_TICKS_REQUIRED
    }))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = toml::Value::deserialize(deserializer)?;
    Ok(integer_value(&value)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or_else(|| {
            tracing::warn!("Bad count {}, using {}", value, default_count());
            default_count()
        }))
}

fn lenient_action<'de, D>(deserializer: D) -> Result<OutputAction, D::Error>
where
    D: Deserializer<'de>,
{
    let value = toml::Value::deserialize(deserializer)?;
    Ok(value.clone().try_into().unwrap_or_else(|_| {
        tracing::warn!("Unknown output action {}, using accumulate", value);
        OutputAction::default()
    }))
}

/// Rows that are not tables are dropped; a value that is not a list yields no rows.
fn lenient_rows<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match toml::Value::deserialize(deserializer)? {
        toml::Value::Array(items) => items,
        other => {
            tracing::warn!("Expected a list of tables, found {}", other);
            return Ok(Vec::new());
        }
    };

    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        let row: Result<T, _> = item.clone().try_into();
        match row {
            Ok(row) => rows.push(row),
            Err(e) => tracing::warn!("Skipping row {}: {}", item, e),
        }
    }
    Ok(rows)
}

impl CreatableEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>, ticks_required: i64) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            ticks_required,
            pre_requisites: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn with_pre_requisite(mut self, name: impl Into<String>, count: u32) -> Self {
        self.pre_requisites.push(PrerequisiteEntry {
            name: Some(name.into()),
            count,
        });
        self
    }

    pub fn with_output(mut self, name: impl Into<String>, count: u32, action: OutputAction) -> Self {
        self.outputs.push(OutputEntry {
            name: Some(name.into()),
            count,
            action,
        });
        self
    }
}

impl CreatableDocument {
    pub fn new(entries: Vec<CreatableEntry>) -> Self {
        Self { entries }
    }

    /// Parse and shape-check a TOML creatable document.
    ///
    /// The root must carry a `creatable` array whose items are all tables.
    pub fn from_toml_str(text: &str) -> Result<Self, LoadError> {
        let root: toml::Table = toml::from_str(text)?;

        match root.get(ROOT_KEY) {
            Some(toml::Value::Array(items)) if items.iter().all(toml::Value::is_table) => {}
            Some(_) => {
                return Err(LoadError::MalformedRoot(format!(
                    "'{}' must be an array of tables",
                    ROOT_KEY
                )))
            }
            None => {
                return Err(LoadError::MalformedRoot(format!(
                    "expected a '{}' list at the document root",
                    ROOT_KEY
                )))
            }
        }

        let document: CreatableDocument = toml::Value::Table(root).try_into()?;
        Ok(document)
    }
}

fn usable_name(name: Option<String>) -> Option<String> {
    name.filter(|n| !n.trim().is_empty())
}

/// An immutable recipe held by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatableTemplate {
    pub name: String,
    pub description: String,
    /// Zero means the creatable is complete as soon as it exists
    pub ticks_required: u32,
    pub pre_requisites: BTreeMap<String, u32>,
    pub outputs: BTreeMap<String, OutputSpec>,
}

impl CreatableTemplate {
    /// Validate one document entry. Entries without a name yield `None`.
    pub fn from_entry(entry: CreatableEntry) -> Option<Self> {
        let name = usable_name(entry.name)?;
        let ticks_required = u32::try_from(entry.ticks_required.max(0)).unwrap_or(u32::MAX);

        let mut pre_requisites = BTreeMap::new();
        for pre_requisite in entry.pre_requisites {
            let Some(resource) = usable_name(pre_requisite.name) else {
                tracing::warn!("Creatable '{}': skipping pre-requisite with no name", name);
                continue;
            };
            let held: &mut u32 = pre_requisites.entry(resource).or_insert(0);
            *held = held.saturating_add(pre_requisite.count);
        }

        let mut outputs: BTreeMap<String, OutputSpec> = BTreeMap::new();
        for output in entry.outputs {
            let Some(resource) = usable_name(output.name) else {
                tracing::warn!("Creatable '{}': skipping output with no name", name);
                continue;
            };
            let spec = outputs.entry(resource).or_insert(OutputSpec {
                count: 0,
                action: output.action,
            });
            spec.count = spec.count.saturating_add(output.count);
            spec.action = output.action;
        }

        Some(Self {
            description: entry.description.unwrap_or_default(),
            name,
            ticks_required,
            pre_requisites,
            outputs,
        })
    }

    /// Fresh, independent instance with no progress
    pub fn instantiate(&self) -> Creatable {
        Creatable::from_template(self)
    }
}

/// Registry of creatable templates, in document order
#[derive(Resource, Debug, Clone, Default)]
pub struct CreatableCatalog {
    templates: Vec<CreatableTemplate>,
    index: HashMap<String, usize>,
}

impl CreatableCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the document from a source and build a fresh catalog.
    pub fn load<S: CreatableSource + ?Sized>(source: &S) -> Result<Self, LoadError> {
        let document = source.creatable_document()?;
        let catalog = Self::from_document(document);
        tracing::info!("{} creatables loaded", catalog.len());
        Ok(catalog)
    }

    pub fn from_document(document: CreatableDocument) -> Self {
        let mut catalog = Self::new();
        for (position, entry) in document.entries.into_iter().enumerate() {
            match CreatableTemplate::from_entry(entry) {
                Some(template) => {
                    tracing::debug!(
                        "Loaded creatable '{}' ({} ticks, {} pre-requisites)",
                        template.name,
                        template.ticks_required,
                        template.pre_requisites.len()
                    );
                    catalog.register(template);
                }
                None => tracing::warn!("Skipping creatable entry {}: no name", position + 1),
            }
        }
        catalog
    }

    /// Register a template; a repeated name replaces the earlier template in place.
    pub fn register(&mut self, template: CreatableTemplate) {
        match self.index.get(&template.name) {
            Some(&slot) => self.templates[slot] = template,
            None => {
                self.index.insert(template.name.clone(), self.templates.len());
                self.templates.push(template);
            }
        }
    }

    pub fn get_by_name(&self, name: &str) -> Option<&CreatableTemplate> {
        self.index.get(name).map(|&slot| &self.templates[slot])
    }

    /// New independent instance of the named creatable
    pub fn get_copy(&self, name: &str) -> Option<Creatable> {
        self.get_by_name(name).map(CreatableTemplate::instantiate)
    }

    pub fn list_names(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CreatableTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// (creatable, resource) pairs whose resource is not in the resource catalog
    pub fn unknown_references(&self, resources: &ResourceCatalog) -> Vec<(String, String)> {
        let mut unknown = Vec::new();
        for template in &self.templates {
            let names = template
                .pre_requisites
                .keys()
                .chain(template.outputs.keys());
            for name in names {
                if !resources.contains(name) {
                    unknown.push((template.name.clone(), name.clone()));
                }
            }
        }
        unknown
    }
}
