use crate::db::models::{Recipe, ShoppingListItem};
use crate::error::Result;
use crate::matcher::filters::Filters;
use crate::matcher::scoring::{missing_ingredients, MatchScore, Pantry};
use crate::matcher::sorting::SearchSort;
use crate::store::RecipeStore;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// A recipe included in search results together with its score
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeMatch {
    pub recipe: Recipe,
    pub score: MatchScore,
}

/// Score every recipe, drop those scoring zero and order the rest by
/// descending score. The sort is stable, so recipes with equal scores keep
/// the order they came in.
pub fn rank(recipes: Vec<Recipe>, pantry: &Pantry) -> Vec<RecipeMatch> {
    let mut matches: Vec<RecipeMatch> = recipes
        .into_iter()
        .filter_map(|recipe| {
            let score = MatchScore::compute(&recipe, pantry);
            score.is_match().then_some(RecipeMatch { recipe, score })
        })
        .collect();

    matches.sort_by(|a, b| b.score.ratio().total_cmp(&a.score.ratio()));
    matches
}

/// Ingredient-driven recipe search over a store
#[derive(Clone)]
pub struct MatchEngine {
    store: Arc<dyn RecipeStore>,
}

impl MatchEngine {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    /// Ranked matches that also pass every hard filter, reordered by `sort`
    pub async fn search_with_scores<S: AsRef<str>>(
        &self,
        ingredients: &[S],
        filters: &Filters,
        sort: SearchSort,
    ) -> Result<Vec<RecipeMatch>> {
        if ingredients.is_empty() {
            debug!("Search with no ingredients, returning nothing");
            return Ok(Vec::new());
        }
        let pantry = Pantry::new(ingredients);

        let recipes = self.store.get_all_recipes().await?;
        let total = recipes.len();

        let mut matches: Vec<RecipeMatch> = rank(recipes, &pantry)
            .into_iter()
            .filter(|m| filters.accepts(&m.recipe))
            .collect();
        sort.apply(&mut matches);

        debug!(
            "Search matched {} of {} recipes (filters: {:?}, sort: {:?})",
            matches.len(),
            total,
            filters,
            sort
        );
        Ok(matches)
    }

    /// Recipes whose required ingredients overlap the user's, best first
    pub async fn search<S: AsRef<str>>(
        &self,
        ingredients: &[S],
        filters: &Filters,
        sort: SearchSort,
    ) -> Result<Vec<Recipe>> {
        Ok(self
            .search_with_scores(ingredients, filters, sort)
            .await?
            .into_iter()
            .map(|m| m.recipe)
            .collect())
    }

    /// The recipe plus the ingredients the user still needs to buy for it
    pub async fn missing_for<S: AsRef<str>>(
        &self,
        recipe_id: i64,
        ingredients: &[S],
    ) -> Result<(Recipe, Vec<ShoppingListItem>)> {
        let recipe = self.store.get_recipe_by_id(recipe_id).await?;
        let missing = missing_ingredients(&recipe, &Pantry::new(ingredients));
        Ok((recipe, missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{Difficulty, Ingredient, NewRecipe};
    use crate::error::Error;
    use crate::store::MemoryStore;

    fn new_recipe(
        title: &str,
        cuisine: &str,
        tags: &[&str],
        prep: u32,
        cook: u32,
        ingredients: &[(&str, bool)],
    ) -> NewRecipe {
        NewRecipe {
            title: title.to_string(),
            description: String::new(),
            image: "https://example.com/recipe.jpg".to_string(),
            prep_time: prep,
            cook_time: cook,
            servings: 2,
            difficulty: Difficulty::Easy,
            cuisine: cuisine.to_string(),
            dietary_restrictions: tags.iter().map(|t| t.to_string()).collect(),
            ingredients: ingredients
                .iter()
                .map(|(name, required)| Ingredient {
                    name: name.to_string(),
                    amount: "1".to_string(),
                    required: *required,
                })
                .collect(),
            instructions: vec!["Cook.".to_string()],
        }
    }

    async fn engine_with(recipes: Vec<NewRecipe>) -> MatchEngine {
        let store = MemoryStore::new();
        for recipe in recipes {
            store.create_recipe(recipe).await.unwrap();
        }
        MatchEngine::new(Arc::new(store))
    }

    fn titles(recipes: &[Recipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_higher_score_ranks_first() {
        let engine = engine_with(vec![
            new_recipe(
                "One Third",
                "Italian",
                &[],
                10,
                10,
                &[("chicken thighs", true), ("lemons", true), ("capers", true)],
            ),
            new_recipe(
                "Two Thirds",
                "Mediterranean",
                &[],
                10,
                15,
                &[("chicken breast", true), ("bell peppers", true), ("tomatoes", true)],
            ),
        ])
        .await;

        let results = engine
            .search_with_scores(&["chicken", "tomato"], &Filters::default(), SearchSort::BestMatch)
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].recipe.title, "Two Thirds");
        assert!((results[0].score.ratio() - 0.667).abs() < 0.001);
        assert!((results[1].score.ratio() - 0.333).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_empty_ingredient_list_returns_nothing() {
        let engine = engine_with(vec![new_recipe(
            "Toast",
            "American",
            &[],
            1,
            2,
            &[("bread", true)],
        )])
        .await;

        let none: [&str; 0] = [];
        let results = engine
            .search(&none, &Filters::default(), SearchSort::BestMatch)
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_blank_entries_use_plain_substring_rule() {
        let engine = engine_with(vec![
            new_recipe("Toast", "American", &[], 1, 2, &[("bread", true)]),
            new_recipe(
                "Dressing",
                "Italian",
                &[],
                5,
                0,
                &[("olive oil", true), ("vinegar", true)],
            ),
        ])
        .await;

        // "" is a substring of every name
        let results = engine
            .search(&[""], &Filters::default(), SearchSort::BestMatch)
            .await
            .unwrap();
        assert_eq!(titles(&results), vec!["Toast", "Dressing"]);

        // " " only hits multi-word names
        let results = engine
            .search_with_scores(&[" "], &Filters::default(), SearchSort::BestMatch)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].recipe.title, "Dressing");
        assert_eq!(results[0].score.matched, 1);
    }

    #[tokio::test]
    async fn test_sort_reorders_filtered_matches() {
        let engine = engine_with(vec![
            new_recipe("Slow", "Asian", &[], 30, 30, &[("rice", true)]),
            new_recipe("Quick", "Asian", &[], 5, 5, &[("rice", true), ("egg", true)]),
            new_recipe("Medium", "Asian", &[], 10, 10, &[("rice", true)]),
        ])
        .await;

        let best = engine
            .search(&["rice"], &Filters::default(), SearchSort::BestMatch)
            .await
            .unwrap();
        assert_eq!(titles(&best), vec!["Slow", "Medium", "Quick"]);

        let fastest = engine
            .search(&["rice"], &Filters::default(), SearchSort::PrepTime)
            .await
            .unwrap();
        assert_eq!(titles(&fastest), vec!["Quick", "Medium", "Slow"]);
    }

    #[tokio::test]
    async fn test_recipe_without_required_ingredients_never_matches() {
        let engine = engine_with(vec![new_recipe(
            "Garnish",
            "French",
            &[],
            1,
            0,
            &[("parsley", false)],
        )])
        .await;

        let results = engine.search(&["parsley"], &Filters::default(), SearchSort::BestMatch).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_equal_scores_keep_store_order() {
        let engine = engine_with(vec![
            new_recipe("First", "Asian", &[], 5, 5, &[("rice", true), ("egg", true)]),
            new_recipe("Full", "Asian", &[], 5, 5, &[("rice", true)]),
            new_recipe("Second", "Asian", &[], 5, 5, &[("rice", true), ("scallion", true)]),
        ])
        .await;

        let results = engine.search(&["rice"], &Filters::default(), SearchSort::BestMatch).await.unwrap();
        assert_eq!(titles(&results), vec!["Full", "First", "Second"]);
    }

    #[tokio::test]
    async fn test_filters_apply_after_matching() {
        let engine = engine_with(vec![
            new_recipe(
                "Skillet",
                "Mediterranean",
                &["gluten-free"],
                10,
                15,
                &[("chicken breast", true)],
            ),
            new_recipe(
                "Grill",
                "American",
                &["gluten-free"],
                15,
                20,
                &[("chicken breast", true)],
            ),
            new_recipe("Bowl", "Asian", &["vegan"], 10, 5, &[("chicken breast", true)]),
        ])
        .await;

        let quick = Filters::from_raw(None, None, Some("15-30 min"));
        let results = engine.search(&["chicken"], &quick, SearchSort::BestMatch).await.unwrap();
        assert_eq!(titles(&results), vec!["Skillet", "Bowl"]);

        let gluten_free = Filters::from_raw(None, Some("Gluten-Free"), None);
        let results = engine.search(&["chicken"], &gluten_free, SearchSort::BestMatch).await.unwrap();
        assert_eq!(titles(&results), vec!["Skillet", "Grill"]);

        let american = Filters::from_raw(Some("American"), None, None);
        let results = engine.search(&["chicken"], &american, SearchSort::BestMatch).await.unwrap();
        assert_eq!(titles(&results), vec!["Grill"]);
    }

    #[tokio::test]
    async fn test_unknown_filter_values_asymmetry() {
        let engine = engine_with(vec![new_recipe(
            "Slow Roast",
            "American",
            &["keto"],
            30,
            240,
            &[("beef", true)],
        )])
        .await;

        let unknown_cuisine = Filters::from_raw(Some("Atlantean"), None, None);
        assert!(engine.search(&["beef"], &unknown_cuisine, SearchSort::BestMatch).await.unwrap().is_empty());

        let unknown_diet = Filters::from_raw(None, Some("Breatharian"), None);
        assert!(engine.search(&["beef"], &unknown_diet, SearchSort::BestMatch).await.unwrap().is_empty());

        let unknown_time = Filters::from_raw(None, None, Some("whenever"));
        assert_eq!(engine.search(&["beef"], &unknown_time, SearchSort::BestMatch).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_adding_ingredient_never_lowers_score() {
        let engine = engine_with(vec![new_recipe(
            "Caprese",
            "Italian",
            &["vegetarian"],
            10,
            0,
            &[("tomatoes", true), ("mozzarella", true), ("basil", true)],
        )])
        .await;

        let before = engine
            .search_with_scores(&["tomato"], &Filters::default(), SearchSort::BestMatch)
            .await
            .unwrap();
        let after = engine
            .search_with_scores(&["tomato", "basil"], &Filters::default(), SearchSort::BestMatch)
            .await
            .unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 1);
        assert!(after[0].score.ratio() >= before[0].score.ratio());
        assert_eq!(after[0].score.matched, 2);
    }

    #[tokio::test]
    async fn test_missing_for() {
        let engine = engine_with(vec![new_recipe(
            "Stir Fry",
            "Asian",
            &[],
            10,
            5,
            &[("chicken breast", true), ("soy sauce", true), ("green onions", false)],
        )])
        .await;

        let (recipe, missing) = engine.missing_for(1, &["chicken"]).await.unwrap();
        assert_eq!(recipe.title, "Stir Fry");
        assert_eq!(missing.len(), 2);

        assert!(matches!(
            engine.missing_for(9, &["chicken"]).await,
            Err(Error::NotFound(_))
        ));
    }
}
