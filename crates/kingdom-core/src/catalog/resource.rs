//! Resource definitions and the catalog that holds them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use super::source::ResourceSource;
use crate::error::LoadError;

/// Category given to resources whose record leaves it blank
pub const CATEGORY_DEFAULT: &str = "default";

/// One row of the resource table, as read from the data source.
///
/// Every column is optional; a missing or non-text cell is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    #[serde(rename = "Name", default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(rename = "Description", default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(rename = "Category", default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(rename = "Graphic", default, deserialize_with = "lenient_text")]
    pub graphic: Option<String>,
}

impl ResourceRecord {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            category: None,
            graphic: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_graphic(mut self, graphic: impl Into<String>) -> Self {
        self.graphic = Some(graphic.into());
        self
    }

    /// Parse a JSON resource table: an array of row objects.
    ///
    /// A root that is not an array is a load error. Rows that are not objects are skipped.
    pub fn parse_table(text: &str) -> Result<Vec<ResourceRecord>, LoadError> {
        let rows: Vec<Value> = serde_json::from_str(text)?;
        let mut records = Vec::with_capacity(rows.len());
        for (line, row) in rows.into_iter().enumerate() {
            if !row.is_object() {
                tracing::warn!("Skipping resource row {}: not an object", line + 1);
                continue;
            }
            records.push(serde_json::from_value(row)?);
        }
        Ok(records)
    }
}

/// Accept any JSON cell: text stays text, numbers and booleans are stringified,
/// anything else becomes `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// An immutable resource definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub description: String,
    pub category: String,
    /// Character used when the resource is drawn on the map
    pub glyph: Option<char>,
}

impl Resource {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: CATEGORY_DEFAULT.to_string(),
            glyph: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_glyph(mut self, glyph: char) -> Self {
        self.glyph = Some(glyph);
        self
    }

    /// Build a resource from a table row, filling blanks with defaults
    pub fn from_record(record: ResourceRecord) -> Self {
        let category = record
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| CATEGORY_DEFAULT.to_string());
        let glyph = record
            .graphic
            .as_deref()
            .and_then(|g| g.trim().chars().next());

        Self {
            name: record.name.unwrap_or_default(),
            description: record.description.unwrap_or_default(),
            category,
            glyph,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.name, self.description, self.category)
    }
}

/// Registry of every resource definition, in registration order
#[derive(bevy_ecs::system::Resource, Debug, Clone, Default)]
pub struct ResourceCatalog {
    resources: Vec<Resource>,
    index: HashMap<String, usize>,
}

impl ResourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every record from a source and build a fresh catalog.
    pub fn load<S: ResourceSource + ?Sized>(source: &S) -> Result<Self, LoadError> {
        let records = source.resource_records()?;
        let catalog = Self::from_records(records);
        tracing::info!("{} resources loaded", catalog.len());
        Ok(catalog)
    }

    pub fn from_records(records: impl IntoIterator<Item = ResourceRecord>) -> Self {
        let mut catalog = Self::new();
        for record in records {
            let resource = Resource::from_record(record);
            if resource.name.is_empty() {
                tracing::warn!("Resource row has no name: {}", resource);
            }
            tracing::debug!("Loaded resource {}", resource);
            catalog.register(resource);
        }
        catalog
    }

    /// Register a resource. A later definition with the same name replaces the earlier
    /// one but keeps its position.
    pub fn register(&mut self, resource: Resource) {
        match self.index.get(&resource.name) {
            Some(&slot) => self.resources[slot] = resource,
            None => {
                self.index.insert(resource.name.clone(), self.resources.len());
                self.resources.push(resource);
            }
        }
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Resource> {
        self.index.get(name).map(|&slot| &self.resources[slot])
    }

    /// Independent copy of a definition
    pub fn get_copy(&self, name: &str) -> Option<Resource> {
        self.get_by_name(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All names in registration order
    pub fn list_names(&self) -> Vec<&str> {
        self.resources.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
