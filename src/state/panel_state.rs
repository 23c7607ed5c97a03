//! Collapsible panel state

use serde::{Deserialize, Serialize};

/// The two collapsible content regions of a recipe card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Ingredients,
    Steps,
}

impl Panel {
    pub const ALL: [Panel; 2] = [Panel::Ingredients, Panel::Steps];

    // Method to get a panel by its route name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ingredients" => Some(Self::Ingredients),
            "steps" => Some(Self::Steps),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Panel::Ingredients => "ingredients",
            Panel::Steps => "steps",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Panel::Ingredients => "Ingredients",
            Panel::Steps => "Steps",
        }
    }
}

/// Visibility of a single panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PanelState {
    pub collapsed: bool,
}

impl PanelState {
    /// Flip visibility. Returns the new expanded state.
    pub fn toggle(&mut self) -> bool {
        self.collapsed = !self.collapsed;
        self.is_expanded()
    }

    pub fn is_expanded(&self) -> bool {
        !self.collapsed
    }

    /// Label for the toggle control of `panel` in this state
    pub fn label(&self, panel: Panel) -> String {
        let verb = if self.is_expanded() { "Hide" } else { "Show" };
        format!("{} {}", verb, panel.title())
    }
}

/// Visibility of both panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Panels {
    pub ingredients: PanelState,
    pub steps: PanelState,
}

impl Panels {
    pub fn get(&self, panel: Panel) -> PanelState {
        match panel {
            Panel::Ingredients => self.ingredients,
            Panel::Steps => self.steps,
        }
    }

    pub fn get_mut(&mut self, panel: Panel) -> &mut PanelState {
        match panel {
            Panel::Ingredients => &mut self.ingredients,
            Panel::Steps => &mut self.steps,
        }
    }
}
