pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod matcher;
pub mod recipe;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
pub use matcher::{ingredient_matches, rank, tokenize, MatchField, RankOptions};
pub use recipe::Recipe;
