// SPDX-License-Identifier: MIT

//! Model catalog: the declarative document the planner draws candidates
//! from.

use crate::error::CoreError;
use serde::Deserialize;
use std::collections::HashSet;

/// Role a catalog model can serve in a placement pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Large,
    Small,
    Both,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogModel {
    pub name: String,
    pub memory_gb: f64,
    pub role: Role,
    pub quality: i32,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogDocument {
    #[serde(rename = "model")]
    models: Vec<CatalogModel>,
}

/// A validated collection of candidate models.
#[derive(Debug, Clone)]
pub struct Catalog {
    models: Vec<CatalogModel>,
}

impl Catalog {
    /// Parse and validate a catalog from its embedded TOML document.
    pub fn parse(toml_text: &str) -> Result<Self, CoreError> {
        let doc: CatalogDocument = toml::from_str(toml_text)
            .map_err(|e| CoreError::Validation(format!("invalid catalog document: {e}")))?;

        let mut seen = HashSet::new();
        for model in &doc.models {
            if model.memory_gb <= 0.0 {
                return Err(CoreError::Validation(format!(
                    "catalog model '{}' has non-positive memory_gb",
                    model.name
                )));
            }
            if !seen.insert(model.name.clone()) {
                return Err(CoreError::Validation(format!(
                    "duplicate catalog model name '{}'",
                    model.name
                )));
            }
        }

        Ok(Catalog { models: doc.models })
    }

    /// Models eligible to serve as the large member of a pair.
    pub fn large_models(&self) -> impl Iterator<Item = &CatalogModel> {
        self.models
            .iter()
            .filter(|m| matches!(m.role, Role::Large | Role::Both))
    }

    /// Models eligible to serve as the small member of a pair.
    pub fn small_models(&self) -> impl Iterator<Item = &CatalogModel> {
        self.models
            .iter()
            .filter(|m| matches!(m.role, Role::Small | Role::Both))
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
