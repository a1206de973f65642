use crate::db::models::NewRecipe;
use crate::error::{Error, Result};
use crate::utils::validation::{validate_new_recipe, validate_rating};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Recipe catalog loaded into the store at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCatalog {
    pub version: u32,
    pub recipes: Vec<CatalogEntry>,
    #[serde(default = "default_max_recipes")]
    pub max_recipes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub recipe: NewRecipe,
    #[serde(default)]
    pub rating: u32,
    #[serde(default)]
    pub review_count: u32,
}

fn default_max_recipes() -> usize {
    1000
}

impl RecipeCatalog {
    pub fn new(recipes: Vec<CatalogEntry>) -> Self {
        Self {
            version: 1,
            recipes,
            max_recipes: default_max_recipes(),
        }
    }

    /// Load a recipe catalog from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "Failed to read recipe catalog from {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let catalog: RecipeCatalog = serde_yaml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse recipe catalog from {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        catalog.validate()?;
        Ok(catalog)
    }

    /// Validate the entire catalog
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(Error::Config(format!(
                "Unsupported catalog version: {}. Expected version 1",
                self.version
            )));
        }

        if self.recipes.len() > self.max_recipes {
            return Err(Error::Config(format!(
                "Too many recipes: {} > {}",
                self.recipes.len(),
                self.max_recipes
            )));
        }

        let mut seen = HashSet::new();
        for entry in &self.recipes {
            if !seen.insert(entry.recipe.title.trim().to_lowercase()) {
                return Err(Error::Config(format!(
                    "Duplicate recipe title: {}",
                    entry.recipe.title
                )));
            }
        }

        for (index, entry) in self.recipes.iter().enumerate() {
            validate_new_recipe(entry.recipe.clone())
                .and_then(|_| validate_rating(entry.rating))
                .map_err(|e| {
                    Error::Config(format!(
                        "Recipe #{} ({}): {}",
                        index + 1,
                        entry.recipe.title,
                        e
                    ))
                })?;
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
