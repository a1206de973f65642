// Validation utilities
use crate::db::models::{NewRecipe, NewShoppingList, ShoppingListItem, MAX_RATING};
use crate::error::{Error, Result};
use crate::matcher::filters::normalize_diet;
use tracing::warn;
use url::Url;

/// Dietary tags a recipe may carry, in canonical form
pub const KNOWN_DIETARY_TAGS: &[&str] = &[
    "vegetarian",
    "vegan",
    "gluten-free",
    "dairy-free",
    "keto",
    "paleo",
    "low-carb",
    "low-fat",
    "high-protein",
];

const MAX_TITLE_LEN: usize = 200;
const MAX_LIST_NAME_LEN: usize = 200;

/// Validate an image reference: an absolute http(s) URL with a host
pub fn validate_image_url(image: &str) -> Result<Url> {
    let url = Url::parse(image)?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            warn!("Rejected image URL with scheme {}: {}", scheme, image);
            return Err(Error::Validation(format!(
                "Image URL must use http or https scheme: {image}"
            )));
        }
    }

    if url.host_str().is_none() {
        return Err(Error::Validation(
            "Image URL must have a valid host".to_string(),
        ));
    }

    Ok(url)
}

/// Map a dietary tag to its canonical spelling ("Gluten-Free" -> "gluten-free").
/// Unknown tags are rejected.
pub fn canonical_dietary_tag(tag: &str) -> Result<&'static str> {
    let wanted = normalize_diet(tag.trim());
    KNOWN_DIETARY_TAGS
        .iter()
        .copied()
        .find(|known| normalize_diet(known) == wanted)
        .ok_or_else(|| Error::Validation(format!("Unknown dietary restriction: {tag}")))
}

pub fn validate_rating(rating: u32) -> Result<()> {
    if rating > MAX_RATING {
        return Err(Error::Validation(format!(
            "Rating must be between 0 and {MAX_RATING}, got {rating}"
        )));
    }
    Ok(())
}

pub fn validate_user_id(user_id: &str) -> Result<()> {
    if user_id.trim().is_empty() {
        return Err(Error::Validation("User id cannot be empty".to_string()));
    }
    Ok(())
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("Recipe {field} cannot be empty")));
    }
    Ok(())
}

/// Validate recipe input and return it with dietary tags canonicalized
pub fn validate_new_recipe(mut recipe: NewRecipe) -> Result<NewRecipe> {
    require_text("title", &recipe.title)?;
    if recipe.title.len() > MAX_TITLE_LEN {
        return Err(Error::Validation(format!(
            "Recipe title exceeds {MAX_TITLE_LEN} characters"
        )));
    }
    require_text("cuisine", &recipe.cuisine)?;
    validate_image_url(&recipe.image)?;

    if recipe.servings == 0 {
        return Err(Error::Validation(
            "Recipe servings must be at least 1".to_string(),
        ));
    }

    for (index, ingredient) in recipe.ingredients.iter().enumerate() {
        if ingredient.name.trim().is_empty() {
            return Err(Error::Validation(format!(
                "Ingredient #{} has an empty name",
                index + 1
            )));
        }
    }

    if recipe.instructions.iter().any(|step| step.trim().is_empty()) {
        return Err(Error::Validation(
            "Recipe instructions cannot contain empty steps".to_string(),
        ));
    }

    let mut tags: Vec<String> = Vec::with_capacity(recipe.dietary_restrictions.len());
    for tag in &recipe.dietary_restrictions {
        let canonical = canonical_dietary_tag(tag)?.to_string();
        if !tags.contains(&canonical) {
            tags.push(canonical);
        }
    }
    recipe.dietary_restrictions = tags;

    Ok(recipe)
}

pub fn validate_shopping_items(items: &[ShoppingListItem]) -> Result<()> {
    for (index, item) in items.iter().enumerate() {
        if item.ingredient.trim().is_empty() {
            return Err(Error::Validation(format!(
                "Shopping list item #{} has an empty ingredient",
                index + 1
            )));
        }
    }
    Ok(())
}

pub fn validate_new_shopping_list(list: &NewShoppingList) -> Result<()> {
    validate_user_id(&list.user_id)?;

    if list.name.trim().is_empty() {
        return Err(Error::Validation(
            "Shopping list name cannot be empty".to_string(),
        ));
    }
    if list.name.len() > MAX_LIST_NAME_LEN {
        return Err(Error::Validation(format!(
            "Shopping list name exceeds {MAX_LIST_NAME_LEN} characters"
        )));
    }

    validate_shopping_items(&list.items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{Difficulty, Ingredient};

    fn recipe() -> NewRecipe {
        NewRecipe {
            title: "Pancakes".to_string(),
            description: "Fluffy".to_string(),
            image: "https://example.com/pancakes.jpg".to_string(),
            prep_time: 5,
            cook_time: 10,
            servings: 4,
            difficulty: Difficulty::Easy,
            cuisine: "American".to_string(),
            dietary_restrictions: vec!["Vegetarian".to_string()],
            ingredients: vec![Ingredient {
                name: "flour".to_string(),
                amount: "2 cups".to_string(),
                required: true,
            }],
            instructions: vec!["Mix.".to_string(), "Fry.".to_string()],
        }
    }

    #[test]
    fn test_validate_image_url() {
        assert!(validate_image_url("https://images.example.com/a.jpg").is_ok());
        assert!(validate_image_url("http://example.com/a.png").is_ok());

        assert!(validate_image_url("ftp://example.com/a.jpg").is_err());
        assert!(validate_image_url("not-a-url").is_err());
        assert!(validate_image_url("data:image/png;base64,AAAA").is_err());
    }

    #[test]
    fn test_canonical_dietary_tag() {
        assert_eq!(canonical_dietary_tag("Gluten-Free").unwrap(), "gluten-free");
        assert_eq!(canonical_dietary_tag("glutenfree").unwrap(), "gluten-free");
        assert_eq!(canonical_dietary_tag("VEGAN").unwrap(), "vegan");
        assert!(canonical_dietary_tag("carnivore").is_err());
    }

    #[test]
    fn test_validate_new_recipe() {
        let validated = validate_new_recipe(recipe()).unwrap();
        assert_eq!(validated.dietary_restrictions, vec!["vegetarian"]);

        let mut bad = recipe();
        bad.servings = 0;
        assert!(validate_new_recipe(bad).is_err());

        let mut bad = recipe();
        bad.title = "   ".to_string();
        assert!(validate_new_recipe(bad).is_err());

        let mut bad = recipe();
        bad.ingredients[0].name = String::new();
        assert!(validate_new_recipe(bad).is_err());

        let mut bad = recipe();
        bad.dietary_restrictions = vec!["pescatarian".to_string()];
        assert!(matches!(validate_new_recipe(bad), Err(Error::Validation(_))));
    }

    #[test]
    fn test_duplicate_tags_collapse() {
        let mut input = recipe();
        input.dietary_restrictions = vec!["vegan".to_string(), "Vegan".to_string()];
        let validated = validate_new_recipe(input).unwrap();
        assert_eq!(validated.dietary_restrictions, vec!["vegan"]);
    }

    #[test]
    fn test_validate_shopping_list() {
        let list = NewShoppingList {
            user_id: "user-1".to_string(),
            name: "Weekend".to_string(),
            items: vec![ShoppingListItem {
                ingredient: "eggs".to_string(),
                amount: "12".to_string(),
                checked: false,
            }],
        };
        assert!(validate_new_shopping_list(&list).is_ok());

        let no_name = NewShoppingList {
            name: " ".to_string(),
            ..list.clone()
        };
        assert!(validate_new_shopping_list(&no_name).is_err());

        let no_user = NewShoppingList {
            user_id: String::new(),
            ..list
        };
        assert!(validate_new_shopping_list(&no_user).is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(0).is_ok());
        assert!(validate_rating(50).is_ok());
        assert!(validate_rating(51).is_err());
    }
}
