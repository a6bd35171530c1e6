pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "picaplate")]
#[command(about = "PicAPlate - find recipes for the ingredients you have", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the recipe server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Run database migrations
    Migrate,

    /// Import recipe documents from a JSON file (one object or an array)
    Import {
        /// Path to the JSON file
        file: String,
    },

    /// Search a running server for recipes using the given ingredients
    Search {
        /// Ingredients you have
        #[arg(required = true)]
        ingredients: Vec<String>,

        /// Show match counts and matched lines
        #[arg(long)]
        scored: bool,

        /// Server base URL (defaults to EXTERNAL_URL or the configured host and port)
        #[arg(long)]
        server: Option<String>,
    },

    /// Print the tokens an ingredient line reduces to
    Tokenize {
        /// Ingredient line
        line: String,
    },
}
