use crate::api::models::SearchRequest;
use crate::db::models::Recipe;
use crate::matcher::{MatchScore, Pantry};
use crate::utils::truncate;
use crate::{Error, Result};
use reqwest::{Client, StatusCode};

/// Search the server for recipes matching the given ingredients
pub async fn search(server_url: &str, request: &SearchRequest) -> Result<()> {
    let recipes = fetch_matches(server_url, request).await?;
    print_search_results(&recipes, &Pantry::new(&request.ingredients));
    Ok(())
}

/// Show a single recipe
pub async fn show(server_url: &str, recipe_id: i64) -> Result<()> {
    let recipe = fetch_recipe(server_url, recipe_id).await?;
    print_recipe(&recipe);
    Ok(())
}

pub(crate) async fn fetch_matches(server_url: &str, request: &SearchRequest) -> Result<Vec<Recipe>> {
    let client = Client::new();
    let url = format!("{server_url}/api/recipes/search");

    let response = client.post(&url).json(request).send().await?;
    Ok(response.error_for_status()?.json().await?)
}

pub(crate) async fn fetch_recipe(server_url: &str, recipe_id: i64) -> Result<Recipe> {
    let client = Client::new();
    let url = format!("{server_url}/api/recipes/{recipe_id}");

    let response = client.get(&url).send().await?;
    if response.status() == StatusCode::NOT_FOUND {
        return Err(Error::NotFound(format!("Recipe {recipe_id} not found")));
    }

    Ok(response.error_for_status()?.json().await?)
}

fn print_search_results(recipes: &[Recipe], pantry: &Pantry) {
    if recipes.is_empty() {
        println!("No recipes found");
        return;
    }

    println!("\nFound {} recipes:\n", recipes.len());
    println!(
        "{:<5} {:<40} {:<15} {:<8} {:<6}",
        "ID", "Title", "Cuisine", "Time", "Uses"
    );
    println!("{}", "-".repeat(78));

    for recipe in recipes {
        let score = MatchScore::compute(recipe, pantry);
        println!(
            "{:<5} {:<40} {:<15} {:<8} {:<6}",
            recipe.id,
            truncate(&recipe.title, 38),
            truncate(&recipe.cuisine, 13),
            format!("{}m", recipe.total_time_minutes()),
            format!("{}/{}", score.matched, score.required)
        );
    }

    println!("\nTo see a recipe: recipe-finder show <ID>");
}

fn print_recipe(recipe: &Recipe) {
    println!("\n{}", recipe.title);
    println!("{}", "=".repeat(recipe.title.chars().count()));
    if !recipe.description.is_empty() {
        println!("{}", recipe.description);
    }

    println!(
        "\n{} | {} | serves {} | prep {}m, cook {}m | {:.1} stars ({} reviews)",
        recipe.cuisine,
        recipe.difficulty,
        recipe.servings,
        recipe.prep_time,
        recipe.cook_time,
        recipe.stars(),
        recipe.review_count
    );
    if !recipe.dietary_restrictions.is_empty() {
        println!("Diet: {}", recipe.dietary_restrictions.join(", "));
    }

    println!("\nIngredients:");
    for ingredient in &recipe.ingredients {
        let marker = if ingredient.required { "" } else { " (optional)" };
        println!("  - {} {}{}", ingredient.amount, ingredient.name, marker);
    }

    println!("\nInstructions:");
    for (step, instruction) in recipe.instructions.iter().enumerate() {
        println!("  {}. {}", step + 1, instruction);
    }
}
