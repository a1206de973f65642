pub mod commands;

use crate::matcher::SearchSort;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "recipe-finder")]
#[command(about = "Recipe Finder - find recipes for the ingredients you have", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Run database migrations (SQLite backend only)
    Migrate,

    /// Find recipes for the ingredients on hand
    Search {
        /// Ingredients you have, e.g. chicken tomato rice
        #[arg(required = true)]
        ingredients: Vec<String>,

        /// Only recipes of this cuisine
        #[arg(long)]
        cuisine: Option<String>,

        /// Only recipes with this dietary tag
        #[arg(long)]
        diet: Option<String>,

        /// Time bucket: "Under 15 min", "15-30 min", "30-60 min" or "Over 1 hour"
        #[arg(long)]
        max_time: Option<String>,

        /// Result order: "Best Match", "Preparation Time", "Rating" or "Difficulty"
        #[arg(long, value_parser = parse_sort)]
        sort: Option<SearchSort>,
    },

    /// Show a recipe
    Show {
        /// Recipe ID
        id: i64,
    },
}

fn parse_sort(label: &str) -> Result<SearchSort, String> {
    serde_json::from_value(serde_json::Value::String(label.to_string()))
        .map_err(|_| format!("unknown sort order: {label}"))
}
