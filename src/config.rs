//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

use crate::recipe::Recipe;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "recipe-walkthrough")]
#[command(about = "A state-managed HTTP server that walks through recipe steps with a prep timer")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Recipe JSON file (uses a built-in sample when omitted)
    #[arg(short, long)]
    pub recipe: Option<PathBuf>,

    /// Prep timer duration in minutes, overriding the recipe (0 disables it)
    #[arg(short = 't', long)]
    pub prep_minutes: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Resolve the recipe to serve, applying the prep-time override
    pub async fn load_recipe(&self) -> Result<Recipe, String> {
        let recipe = match &self.recipe {
            Some(path) => Recipe::load(path).await?,
            None => Recipe::sample(),
        };
        Ok(recipe.with_prep_minutes(self.prep_minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["recipe-walkthrough"]).unwrap();
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.log_level(), "info");
        assert!(config.recipe.is_none());
        assert!(config.prep_minutes.is_none());
    }

    #[test]
    fn flags() {
        let config = Config::try_parse_from([
            "recipe-walkthrough",
            "--host",
            "127.0.0.1",
            "-p",
            "8080",
            "-t",
            "3",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.address(), "127.0.0.1:8080");
        assert_eq!(config.prep_minutes, Some(3));
        assert_eq!(config.log_level(), "debug");
    }

    #[tokio::test]
    async fn sample_recipe_takes_override() {
        let config = Config::try_parse_from(["recipe-walkthrough", "--prep-minutes", "1"]).unwrap();
        let recipe = config.load_recipe().await.unwrap();
        assert_eq!(recipe.prep_minutes, 1);
        assert!(!recipe.steps.is_empty());
    }
}
