use crate::db::models::Recipe;
use serde::{Deserialize, Serialize};

pub const ANY_CUISINE: &str = "Any Cuisine";
pub const ANY_DIET: &str = "Any Diet";
pub const ANY_TIME: &str = "Any Time";

/// Lowercase and drop every hyphen ("Gluten-Free" -> "glutenfree").
/// All hyphens go, not just the first, so "gluten--free" also matches.
pub fn normalize_diet(value: &str) -> String {
    value.to_lowercase().replace('-', "")
}

/// Cuisine filter. Any value other than the sentinel is compared literally,
/// so an unknown cuisine matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CuisineFilter {
    Any,
    Exact(String),
}

impl CuisineFilter {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None | Some("") | Some(ANY_CUISINE) => CuisineFilter::Any,
            Some(cuisine) => CuisineFilter::Exact(cuisine.to_string()),
        }
    }

    pub fn accepts(&self, recipe: &Recipe) -> bool {
        match self {
            CuisineFilter::Any => true,
            CuisineFilter::Exact(cuisine) => recipe.cuisine == *cuisine,
        }
    }
}

/// Diet filter, compared case- and hyphen-insensitively against each of the
/// recipe's dietary restrictions. Unknown diets match nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DietFilter {
    Any,
    Tag(String),
}

impl DietFilter {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None | Some("") | Some(ANY_DIET) => DietFilter::Any,
            Some(diet) => DietFilter::Tag(normalize_diet(diet)),
        }
    }

    pub fn accepts(&self, recipe: &Recipe) -> bool {
        match self {
            DietFilter::Any => true,
            DietFilter::Tag(wanted) => recipe
                .dietary_restrictions
                .iter()
                .any(|restriction| normalize_diet(restriction) == *wanted),
        }
    }
}

/// Total-time bucket offered to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeBucket {
    #[serde(rename = "Any Time")]
    Any,
    #[serde(rename = "Under 15 min")]
    Under15,
    #[serde(rename = "15-30 min")]
    From15To30,
    #[serde(rename = "30-60 min")]
    From30To60,
    #[serde(rename = "Over 1 hour")]
    OverOneHour,
}

impl TimeBucket {
    /// Parse a bucket label. Unrecognized labels fall back to `Any`, which
    /// never filters anything out.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("Under 15 min") => TimeBucket::Under15,
            Some("15-30 min") => TimeBucket::From15To30,
            Some("30-60 min") => TimeBucket::From30To60,
            Some("Over 1 hour") => TimeBucket::OverOneHour,
            _ => TimeBucket::Any,
        }
    }

    /// Upper bound on prep + cook minutes, `None` when unbounded
    pub fn max_minutes(&self) -> Option<u32> {
        match self {
            TimeBucket::Under15 => Some(15),
            TimeBucket::From15To30 => Some(30),
            TimeBucket::From30To60 => Some(60),
            TimeBucket::OverOneHour | TimeBucket::Any => None,
        }
    }

    pub fn accepts(&self, recipe: &Recipe) -> bool {
        self.max_minutes()
            .map_or(true, |limit| recipe.total_time_minutes() <= limit)
    }
}

/// The three hard filters applied after ingredient matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    pub cuisine: CuisineFilter,
    pub diet: DietFilter,
    pub max_time: TimeBucket,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            cuisine: CuisineFilter::Any,
            diet: DietFilter::Any,
            max_time: TimeBucket::Any,
        }
    }
}

impl Filters {
    pub fn from_raw(cuisine: Option<&str>, diet: Option<&str>, max_time: Option<&str>) -> Self {
        Self {
            cuisine: CuisineFilter::parse(cuisine),
            diet: DietFilter::parse(diet),
            max_time: TimeBucket::parse(max_time),
        }
    }

    pub fn accepts(&self, recipe: &Recipe) -> bool {
        self.cuisine.accepts(recipe) && self.diet.accepts(recipe) && self.max_time.accepts(recipe)
    }
}
