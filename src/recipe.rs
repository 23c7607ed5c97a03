//! Recipe content loading

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything a walkthrough needs to know about a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    /// Prep countdown length; 0 disables the timer
    #[serde(default)]
    pub prep_minutes: u64,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

impl Recipe {
    /// Parse a recipe from JSON text
    pub fn from_json(text: &str) -> Result<Self, String> {
        let recipe: Recipe =
            serde_json::from_str(text).map_err(|e| format!("Invalid recipe JSON: {}", e))?;
        recipe.validate()?;
        Ok(recipe)
    }

    /// Load a recipe from a JSON file
    pub async fn load(path: &Path) -> Result<Self, String> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read recipe {}: {}", path.display(), e))?;
        let recipe = Self::from_json(&text)?;
        info!(
            "Loaded recipe '{}' with {} steps from {}",
            recipe.title,
            recipe.steps.len(),
            path.display()
        );
        Ok(recipe)
    }

    fn validate(&self) -> Result<(), String> {
        if self.steps.is_empty() {
            return Err(format!("Recipe '{}' has no steps", self.title));
        }
        Ok(())
    }

    /// Built-in recipe used when no file is given
    pub fn sample() -> Self {
        Self {
            title: "Classic Pancakes".to_string(),
            prep_minutes: 10,
            ingredients: vec![
                "1 1/2 cups all-purpose flour".to_string(),
                "3 1/2 tsp baking powder".to_string(),
                "1 tbsp sugar".to_string(),
                "1/4 tsp salt".to_string(),
                "1 1/4 cups milk".to_string(),
                "1 egg".to_string(),
                "3 tbsp melted butter".to_string(),
            ],
            steps: vec![
                "Whisk the flour, baking powder, sugar and salt in a large bowl.".to_string(),
                "Make a well in the center and pour in the milk, egg and melted butter.".to_string(),
                "Mix until smooth and let the batter rest for a few minutes.".to_string(),
                "Heat a lightly oiled griddle over medium-high heat.".to_string(),
                "Pour about 1/4 cup of batter per pancake and cook until bubbles form.".to_string(),
                "Flip and cook until golden brown on the other side.".to_string(),
            ],
        }
    }

    /// Replace the prep time, e.g. from a CLI override
    pub fn with_prep_minutes(mut self, prep_minutes: Option<u64>) -> Self {
        if let Some(minutes) = prep_minutes {
            self.prep_minutes = minutes;
        }
        self
    }
}
