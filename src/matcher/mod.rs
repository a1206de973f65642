// Ingredient matching: scoring, hard filters, ordering and the search engine
pub mod engine;
pub mod filters;
pub mod scoring;
pub mod sorting;

pub use engine::{rank, MatchEngine, RecipeMatch};
pub use filters::{CuisineFilter, DietFilter, Filters, TimeBucket};
pub use scoring::{missing_ingredients, MatchScore, Pantry};
pub use sorting::{arrange_favorites, FavoriteSort, SearchSort};
