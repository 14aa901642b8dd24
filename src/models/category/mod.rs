//! Timeline categories and their subcategory rows.
//!
//! Every production phase owns one category bucket on the Gantt timeline.
//! A category is split into subcategory rows ("lanes") that events can be
//! assigned to explicitly; events without an explicit row land in the first
//! subcategory of their phase's category.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::event::ProductionPhase;

/// Identifier of a timeline category.
///
/// The default categories use the phase slug as their id so that
/// `CategoryId::for_phase` is stable across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The category bucket a phase maps to.
    pub fn for_phase(phase: ProductionPhase) -> Self {
        Self(phase.slug().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a subcategory row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubcategoryId(pub Uuid);

impl SubcategoryId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubcategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A horizontal lane inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub name: String,
    /// Hidden rows are kept for their events but take no space in the layout.
    #[serde(default)]
    pub is_hidden: bool,
}

impl Subcategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SubcategoryId::new_v4(),
            name: name.into(),
            is_hidden: false,
        }
    }
}

/// A category bucket on the production timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineCategory {
    pub id: CategoryId,
    /// Display name of the category
    pub name: String,
    /// Phase whose events fall into this bucket
    pub phase: ProductionPhase,
    /// Hex color code (e.g., "#3B82F6")
    pub color: String,
    /// Collapsed categories show only their header row
    pub is_expanded: bool,
    pub subcategories: Vec<Subcategory>,
}

impl TimelineCategory {
    /// Create an expanded category for a phase with no subcategories.
    pub fn new(name: impl Into<String>, phase: ProductionPhase, color: impl Into<String>) -> Self {
        Self {
            id: CategoryId::for_phase(phase),
            name: name.into(),
            phase,
            color: color.into(),
            is_expanded: true,
            subcategories: Vec::new(),
        }
    }

    /// Append a subcategory row.
    pub fn with_subcategory(mut self, name: impl Into<String>) -> Self {
        self.subcategories.push(Subcategory::new(name));
        self
    }

    pub fn contains_subcategory(&self, id: SubcategoryId) -> bool {
        self.subcategories.iter().any(|sub| sub.id == id)
    }

    /// Subcategories that take space in the layout, in display order.
    pub fn visible_subcategories(&self) -> impl Iterator<Item = &Subcategory> {
        self.subcategories.iter().filter(|sub| !sub.is_hidden)
    }

    /// Validate the category data.
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        if name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong);
        }
        if !is_valid_hex_color(&self.color) {
            return Err(CategoryValidationError::InvalidColor);
        }
        if self.subcategories.iter().any(|sub| sub.name.trim().is_empty()) {
            return Err(CategoryValidationError::EmptySubcategoryName);
        }
        Ok(())
    }
}

/// Validation errors for TimelineCategory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryValidationError {
    #[error("Category name cannot be empty")]
    EmptyName,
    #[error("Category name must be 50 characters or less")]
    NameTooLong,
    #[error("Invalid color format (use hex like #FF0000)")]
    InvalidColor,
    #[error("Subcategory name cannot be empty")]
    EmptySubcategoryName,
}

/// Check if a string is a valid hex color code.
pub(crate) fn is_valid_hex_color(color: &str) -> bool {
    let color = color.trim();
    let Some(hex) = color.strip_prefix('#') else {
        return false;
    };
    // Accept 3, 6, or 8 character hex codes
    matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// First subcategory of the category a phase maps to, used as the fallback
/// row for events without an explicit assignment.
pub fn first_subcategory(
    categories: &[TimelineCategory],
    phase: ProductionPhase,
) -> Option<SubcategoryId> {
    let category_id = CategoryId::for_phase(phase);
    categories
        .iter()
        .find(|category| category.id == category_id)
        .and_then(|category| category.subcategories.first())
        .map(|sub| sub.id)
}

/// The category that owns a subcategory row.
pub fn owning_category(
    categories: &[TimelineCategory],
    subcategory: SubcategoryId,
) -> Option<&TimelineCategory> {
    categories
        .iter()
        .find(|category| category.contains_subcategory(subcategory))
}

/// Categories a new project starts with: one per production phase.
pub fn default_categories() -> Vec<TimelineCategory> {
    vec![
        TimelineCategory::new("Development", ProductionPhase::Development, "#8B5CF6")
            .with_subcategory("Script")
            .with_subcategory("Financing"),
        TimelineCategory::new("Pre-Production", ProductionPhase::PreProduction, "#3B82F6")
            .with_subcategory("Prep")
            .with_subcategory("Scouting")
            .with_subcategory("Meetings"),
        TimelineCategory::new("Production", ProductionPhase::Production, "#10B981")
            .with_subcategory("Shoot Days")
            .with_subcategory("Rehearsals")
            .with_subcategory("Milestones"),
        TimelineCategory::new("Post-Production", ProductionPhase::PostProduction, "#F59E0B")
            .with_subcategory("Editorial")
            .with_subcategory("Sound & Color"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_new_uses_phase_slug() {
        let cat = TimelineCategory::new("Production", ProductionPhase::Production, "#10B981");
        assert_eq!(cat.id.as_str(), "production");
        assert!(cat.is_expanded);
        assert!(cat.subcategories.is_empty());
    }

    #[test]
    fn test_validate_valid_category() {
        let cat = TimelineCategory::new("Prep", ProductionPhase::PreProduction, "#3B82F6")
            .with_subcategory("Scouting");
        assert!(cat.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_name() {
        let cat = TimelineCategory::new("   ", ProductionPhase::Production, "#3B82F6");
        assert_eq!(cat.validate(), Err(CategoryValidationError::EmptyName));
    }

    #[test]
    fn test_validate_name_too_long() {
        let cat = TimelineCategory::new("a".repeat(51), ProductionPhase::Production, "#3B82F6");
        assert_eq!(cat.validate(), Err(CategoryValidationError::NameTooLong));
    }

    #[test]
    fn test_validate_invalid_color() {
        let cat = TimelineCategory::new("Production", ProductionPhase::Production, "green");
        assert_eq!(cat.validate(), Err(CategoryValidationError::InvalidColor));
    }

    #[test]
    fn test_validate_empty_subcategory_name() {
        let cat = TimelineCategory::new("Production", ProductionPhase::Production, "#10B981")
            .with_subcategory(" ");
        assert_eq!(
            cat.validate(),
            Err(CategoryValidationError::EmptySubcategoryName)
        );
    }

    #[test]
    fn test_is_valid_hex_color() {
        assert!(is_valid_hex_color("#FFF"));
        assert!(is_valid_hex_color("#AbCdEf"));
        assert!(is_valid_hex_color("#FF0000FF"));

        assert!(!is_valid_hex_color("FFF"));
        assert!(!is_valid_hex_color("#FFFF"));
        assert!(!is_valid_hex_color("#GGG"));
        assert!(!is_valid_hex_color(""));
    }

    #[test]
    fn test_default_categories_cover_every_phase() {
        let defaults = default_categories();
        assert_eq!(defaults.len(), 4);

        for phase in ProductionPhase::ALL {
            let cat = defaults
                .iter()
                .find(|c| c.phase == phase)
                .expect("phase should have a category");
            assert_eq!(cat.id, CategoryId::for_phase(phase));
            assert!(!cat.subcategories.is_empty());
            assert!(cat.validate().is_ok());
        }
    }

    #[test]
    fn test_first_subcategory_falls_back_per_phase() {
        let defaults = default_categories();
        let production = defaults
            .iter()
            .find(|c| c.phase == ProductionPhase::Production)
            .unwrap();

        assert_eq!(
            first_subcategory(&defaults, ProductionPhase::Production),
            Some(production.subcategories[0].id)
        );
        assert_eq!(first_subcategory(&[], ProductionPhase::Production), None);
    }

    #[test]
    fn test_owning_category() {
        let defaults = default_categories();
        let post = &defaults[3];
        let sub = post.subcategories[1].id;

        let owner = owning_category(&defaults, sub).unwrap();
        assert_eq!(owner.phase, ProductionPhase::PostProduction);
        assert!(owning_category(&defaults, SubcategoryId::new_v4()).is_none());
    }

    #[test]
    fn test_visible_subcategories_skip_hidden() {
        let mut cat = TimelineCategory::new("Production", ProductionPhase::Production, "#10B981")
            .with_subcategory("Shoot Days")
            .with_subcategory("Second Unit");
        cat.subcategories[1].is_hidden = true;

        let names: Vec<&str> = cat.visible_subcategories().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Shoot Days"]);
    }
}
