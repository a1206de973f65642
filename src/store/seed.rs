use crate::config::catalog::{CatalogEntry, RecipeCatalog};
use crate::config::CatalogConfig;
use crate::db::models::{Difficulty, Ingredient, NewRecipe};
use crate::error::Result;
use crate::store::RecipeStore;
use tracing::{info, warn};

fn ingredients(items: &[(&str, &str, bool)]) -> Vec<Ingredient> {
    items
        .iter()
        .map(|(name, amount, required)| Ingredient {
            name: name.to_string(),
            amount: amount.to_string(),
            required: *required,
        })
        .collect()
}

fn steps(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The starter recipes shipped with the service
pub fn sample_catalog() -> RecipeCatalog {
    RecipeCatalog::new(vec![
        CatalogEntry {
            recipe: NewRecipe {
                title: "Mediterranean Chicken Skillet".to_string(),
                description: "A delicious one-pan meal with chicken, bell peppers, and tomatoes in Mediterranean herbs".to_string(),
                image: "https://images.unsplash.com/photo-1555939594-58d7cb561ad1?auto=format&fit=crop&w=800&h=600".to_string(),
                prep_time: 10,
                cook_time: 15,
                servings: 4,
                difficulty: Difficulty::Easy,
                cuisine: "Mediterranean".to_string(),
                dietary_restrictions: vec!["gluten-free".to_string()],
                ingredients: ingredients(&[
                    ("chicken breast", "1 lb, diced", true),
                    ("bell peppers", "2, sliced", true),
                    ("tomatoes", "3, chopped", true),
                    ("olive oil", "2 tbsp", true),
                    ("onion", "1, diced", true),
                    ("garlic", "3 cloves, minced", true),
                    ("oregano", "1 tsp", true),
                    ("salt", "to taste", true),
                    ("pepper", "to taste", true),
                ]),
                instructions: steps(&[
                    "Heat olive oil in a large skillet over medium-high heat. Season chicken with salt and pepper.",
                    "Add chicken to the skillet and cook for 5-6 minutes until golden brown and cooked through.",
                    "Add onion and garlic, cook for 2 minutes until fragrant.",
                    "Add bell peppers and cook for 3-4 minutes until slightly softened.",
                    "Add tomatoes and oregano, cook for 2-3 minutes until heated through. Serve immediately.",
                ]),
            },
            rating: 46,
            review_count: 128,
        },
        CatalogEntry {
            recipe: NewRecipe {
                title: "Asian Chicken Stir Fry".to_string(),
                description: "Quick and healthy stir fry with tender chicken and crisp vegetables in savory sauce".to_string(),
                image: "https://images.unsplash.com/photo-1603133872878-684f208fb84b?auto=format&fit=crop&w=800&h=600".to_string(),
                prep_time: 10,
                cook_time: 5,
                servings: 3,
                difficulty: Difficulty::Easy,
                cuisine: "Asian".to_string(),
                dietary_restrictions: Vec::new(),
                ingredients: ingredients(&[
                    ("chicken breast", "1 lb, sliced thin", true),
                    ("bell peppers", "2, sliced", true),
                    ("broccoli", "1 cup florets", true),
                    ("soy sauce", "3 tbsp", true),
                    ("garlic", "2 cloves, minced", true),
                    ("ginger", "1 tsp, grated", true),
                    ("vegetable oil", "2 tbsp", true),
                    ("green onions", "2, chopped", false),
                ]),
                instructions: steps(&[
                    "Heat oil in a wok or large skillet over high heat.",
                    "Add chicken and cook for 3-4 minutes until cooked through.",
                    "Add garlic and ginger, stir for 30 seconds until fragrant.",
                    "Add bell peppers and broccoli, stir fry for 2-3 minutes until crisp-tender.",
                    "Add soy sauce and toss to combine. Garnish with green onions and serve immediately.",
                ]),
            },
            rating: 43,
            review_count: 87,
        },
        CatalogEntry {
            recipe: NewRecipe {
                title: "Fresh Caprese Salad".to_string(),
                description: "Simple yet elegant salad with fresh tomatoes, mozzarella, and basil".to_string(),
                image: "https://images.unsplash.com/photo-1592417817098-8fd3d9eb14a5?auto=format&fit=crop&w=800&h=600".to_string(),
                prep_time: 10,
                cook_time: 0,
                servings: 2,
                difficulty: Difficulty::VeryEasy,
                cuisine: "Italian".to_string(),
                dietary_restrictions: vec!["vegetarian".to_string()],
                ingredients: ingredients(&[
                    ("tomatoes", "2 large, sliced", true),
                    ("mozzarella", "8 oz fresh, sliced", true),
                    ("basil", "1/4 cup fresh leaves", true),
                    ("olive oil", "2 tbsp", true),
                    ("balsamic vinegar", "1 tbsp", true),
                    ("salt", "to taste", true),
                    ("pepper", "to taste", true),
                ]),
                instructions: steps(&[
                    "Arrange alternating slices of tomato and mozzarella on a serving plate.",
                    "Tuck fresh basil leaves between the slices.",
                    "Drizzle with olive oil and balsamic vinegar.",
                    "Season with salt and pepper to taste.",
                    "Serve immediately at room temperature.",
                ]),
            },
            rating: 48,
            review_count: 203,
        },
        CatalogEntry {
            recipe: NewRecipe {
                title: "Herb-Grilled Chicken & Veggies".to_string(),
                description: "Perfectly grilled chicken with a medley of roasted seasonal vegetables".to_string(),
                image: "https://images.unsplash.com/photo-1604503468506-a8da13d82791?auto=format&fit=crop&w=800&h=600".to_string(),
                prep_time: 15,
                cook_time: 20,
                servings: 4,
                difficulty: Difficulty::Medium,
                cuisine: "American".to_string(),
                dietary_restrictions: vec!["gluten-free".to_string()],
                ingredients: ingredients(&[
                    ("chicken breast", "4 pieces", true),
                    ("bell peppers", "2, cut into chunks", true),
                    ("zucchini", "2, sliced", true),
                    ("olive oil", "3 tbsp", true),
                    ("garlic", "3 cloves, minced", true),
                    ("rosemary", "2 tsp dried", true),
                    ("thyme", "1 tsp dried", true),
                    ("salt", "to taste", true),
                    ("pepper", "to taste", true),
                ]),
                instructions: steps(&[
                    "Preheat grill to medium-high heat.",
                    "Mix olive oil, garlic, rosemary, thyme, salt, and pepper in a bowl.",
                    "Brush chicken and vegetables with herb mixture.",
                    "Grill chicken for 6-7 minutes per side until cooked through.",
                    "Grill vegetables for 4-5 minutes per side until tender and lightly charred.",
                    "Let chicken rest for 5 minutes before serving with vegetables.",
                ]),
            },
            rating: 41,
            review_count: 64,
        },
    ])
}

/// Import every catalog entry, returning how many recipes were stored
pub async fn import_catalog(store: &dyn RecipeStore, catalog: &RecipeCatalog) -> Result<usize> {
    let mut imported = 0;
    for entry in &catalog.recipes {
        store
            .import_recipe(entry.recipe.clone(), entry.rating, entry.review_count)
            .await?;
        imported += 1;
    }
    Ok(imported)
}

/// Seed an empty store from the configured catalog file or the built-in
/// samples. Stores that already hold recipes are left alone.
pub async fn seed_store(store: &dyn RecipeStore, config: &CatalogConfig) -> Result<usize> {
    if !store.get_all_recipes().await?.is_empty() {
        info!("Store already holds recipes, skipping seed");
        return Ok(0);
    }

    let catalog = match &config.path {
        Some(path) => {
            let catalog = RecipeCatalog::from_file(path)?;
            info!("Loaded recipe catalog from {}: {} recipes", path.display(), catalog.len());
            catalog
        }
        None if config.seed_samples => sample_catalog(),
        None => {
            warn!("No recipe catalog configured and sample seeding disabled");
            return Ok(0);
        }
    };

    let imported = import_catalog(store, &catalog).await?;
    info!("Seeded {} recipes", imported);
    Ok(imported)
}
