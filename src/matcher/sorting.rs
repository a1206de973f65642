use crate::db::models::Recipe;
use crate::matcher::engine::RecipeMatch;
use serde::{Deserialize, Serialize};

/// Order of search results. `BestMatch` keeps the ranking order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchSort {
    #[default]
    #[serde(rename = "Best Match")]
    BestMatch,
    #[serde(rename = "Preparation Time")]
    PrepTime,
    Rating,
    Difficulty,
}

impl SearchSort {
    /// Reorder ranked matches. The sort is stable, so equal keys keep their
    /// ranking order.
    pub fn apply(&self, matches: &mut [RecipeMatch]) {
        match self {
            SearchSort::BestMatch => {}
            SearchSort::PrepTime => {
                matches.sort_by_key(|m| m.recipe.total_time_minutes());
            }
            SearchSort::Rating => {
                matches.sort_by(|a, b| b.recipe.rating.cmp(&a.recipe.rating));
            }
            SearchSort::Difficulty => {
                matches.sort_by_key(|m| m.recipe.difficulty);
            }
        }
    }
}

/// Order of a user's favorites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FavoriteSort {
    /// Newest recipes (highest id) first
    #[serde(rename = "Recently Added")]
    RecentlyAdded,
    Alphabetical,
    Rating,
    #[serde(rename = "Prep Time")]
    PrepTime,
}

/// Narrow favorites to those whose title, description or cuisine contains
/// `query` (case-insensitive), then order them. Without a sort the incoming
/// order is kept.
pub fn arrange_favorites(
    favorites: Vec<Recipe>,
    query: Option<&str>,
    sort: Option<FavoriteSort>,
) -> Vec<Recipe> {
    let needle = query.unwrap_or_default().to_lowercase();
    let mut recipes: Vec<Recipe> = favorites
        .into_iter()
        .filter(|recipe| {
            needle.is_empty()
                || recipe.title.to_lowercase().contains(&needle)
                || recipe.description.to_lowercase().contains(&needle)
                || recipe.cuisine.to_lowercase().contains(&needle)
        })
        .collect();

    match sort {
        None => {}
        Some(FavoriteSort::RecentlyAdded) => recipes.sort_by(|a, b| b.id.cmp(&a.id)),
        Some(FavoriteSort::Alphabetical) => {
            recipes.sort_by_cached_key(|recipe| recipe.title.to_lowercase());
        }
        Some(FavoriteSort::Rating) => recipes.sort_by(|a, b| b.rating.cmp(&a.rating)),
        Some(FavoriteSort::PrepTime) => recipes.sort_by_key(Recipe::total_time_minutes),
    }

    recipes
}
