//! Category layout for grouping biomarkers on dashboard pages.
//!
//! Read from a YAML document mapping each category to its subcategories and
//! each subcategory to the marker names it lists:
//!
//! ```yaml
//! Metabolic:
//!   Glucose Control:
//!     - Glucose
//!     - Hemoglobin A1c %
//! Blood Counts:
//!   White Cells:
//!     - WBC
//! ```
//!
//! Categories, subcategories and markers keep their document order.

use std::path::Path;

use serde_yaml::Value;

use crate::error::util::safe_read_to_string;
use crate::error::{BiomarkerError, Result};

/// A named group of marker names inside a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subcategory {
    pub name: String,
    pub markers: Vec<String>,
}

/// A dashboard page grouping one or more subcategories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub subcategories: Vec<Subcategory>,
}

impl Category {
    /// All marker names listed under this category, in document order
    pub fn marker_names(&self) -> impl Iterator<Item = &str> {
        self.subcategories
            .iter()
            .flat_map(|sub| sub.markers.iter().map(String::as_str))
    }
}

/// Ordered category -> subcategory -> marker layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryLayout {
    pub categories: Vec<Category>,
}

impl CategoryLayout {
    /// Parse a layout from YAML text; an empty document yields an empty layout
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let document: Value = serde_yaml::from_str(content)
            .map_err(|e| BiomarkerError::Config(format!("Parse YAML failed: {e}")))?;

        let categories: Vec<Category> = match document {
            Value::Null => Vec::new(),
            Value::Mapping(entries) => entries
                .iter()
                .map(|(key, value)| parse_category(key, value))
                .collect::<Result<_>>()?,
            _ => {
                return Err(BiomarkerError::Config(
                    "Category layout must map category names to subcategories".to_string(),
                ));
            }
        };

        Ok(Self { categories })
    }

    /// Load a layout from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = safe_read_to_string(path, "category layout")?;
        Self::from_yaml_str(&content)
            .map_err(|e| e.context(format!("Category file: {}", path.display())))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Check whether any subcategory lists the marker
    #[must_use]
    pub fn contains_marker(&self, marker_name: &str) -> bool {
        self.categories
            .iter()
            .flat_map(Category::marker_names)
            .any(|name| name == marker_name)
    }
}

fn parse_category(key: &Value, value: &Value) -> Result<Category> {
    let name = key_name(key)?;
    let subcategories: Vec<Subcategory> = match value {
        Value::Null => Vec::new(),
        Value::Mapping(entries) => entries
            .iter()
            .map(|(key, value)| parse_subcategory(&name, key, value))
            .collect::<Result<_>>()?,
        _ => {
            return Err(BiomarkerError::Config(format!(
                "Category '{name}' must map subcategory names to marker lists"
            )));
        }
    };

    Ok(Category {
        name,
        subcategories,
    })
}

fn parse_subcategory(category: &str, key: &Value, value: &Value) -> Result<Subcategory> {
    let name = key_name(key)?;
    let markers: Vec<String> = match value {
        Value::Null => Vec::new(),
        Value::Sequence(items) => items
            .iter()
            .map(|item| match item {
                Value::String(marker) => Ok(marker.trim().to_string()),
                other => Err(BiomarkerError::Config(format!(
                    "Subcategory '{category} / {name}' lists a non-text marker: {other:?}"
                ))),
            })
            .collect::<Result<_>>()?,
        _ => {
            return Err(BiomarkerError::Config(format!(
                "Subcategory '{category} / {name}' must be a list of marker names"
            )));
        }
    };

    Ok(Subcategory { name, markers })
}

fn key_name(key: &Value) -> Result<String> {
    match key {
        Value::String(name) => Ok(name.trim().to_string()),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(BiomarkerError::Config(format!(
            "Category names must be text, found {other:?}"
        ))),
    }
}
