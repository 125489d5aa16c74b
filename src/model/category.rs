use serde::Serialize;
use std::fmt::{Display, Formatter};

/// A CSS hex color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color(&'static str);

impl Color {
    pub const fn new(hex: &'static str) -> Self {
        Self(hex)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Stroke used for the time series when every category is selected.
pub const ALL_CATEGORIES: Color = Color::new("#3498db");

/// The product classes that have a dedicated color. Every other item type is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Wine,
    Beer,
    Liquor,
    Other,
}

impl Category {
    /// Classifies an item type, ignoring case.
    pub fn of(item_type: &str) -> Self {
        match item_type.trim().to_lowercase().as_str() {
            "wine" => Category::Wine,
            "beer" => Category::Beer,
            "liquor" => Category::Liquor,
            _ => Category::Other,
        }
    }

    pub fn color(self) -> Color {
        match self {
            Category::Wine => Color::new("#722f37"),
            Category::Beer => Color::new("#f39c12"),
            Category::Liquor => Color::new("#8e44ad"),
            Category::Other => Color::new("#95a5a6"),
        }
    }
}

/// The two pathways through which sales are made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Retail,
    Warehouse,
}

impl Channel {
    pub fn color(self) -> Color {
        match self {
            Channel::Retail => Color::new("#3498db"),
            Channel::Warehouse => Color::new("#e74c3c"),
        }
    }

    /// The legend label.
    pub fn label(self) -> &'static str {
        match self {
            Channel::Retail => "Retail Sales",
            Channel::Warehouse => "Warehouse Sales",
        }
    }
}
