//! Closed keyword sets driving the sanitizer rules.
//!
//! The built-in sets are plain constants; [`Keywords`] is the owned,
//! config-overridable form handed to [`super::Sanitizer::new`].

use serde::{Deserialize, Serialize};

/// Item categories. A category word after the start of a line marks where the
/// trailing category/trait columns of an export begin.
pub const CATEGORIES: &[&str] = &[
    "Ammunition",
    "Apex",
    "Armor",
    "Bomb",
    "Companion",
    "Elixir",
    "Held",
    "Mutagen",
    "Oil",
    "Other",
    "Poison",
    "Potion",
    "Rune",
    "Scroll",
    "Shield",
    "Snare",
    "Staff",
    "Structure",
    "Talisman",
    "Tool",
    "Wand",
    "Weapon",
    "Worn",
];

/// Potency grades written as `Name, grade`.
pub const GRADES: &[&str] = &["major", "lesser", "moderate", "minor", "greater", "true"];

/// Item variants written as `Name, variant`: numbered types, precious
/// materials and gems.
pub const ITEM_TYPES: &[&str] = &[
    "Type I",
    "Type II",
    "Type III",
    "Type IV",
    "Type V",
    "Abysium",
    "Adamantine",
    "Cold Iron",
    "Dawnsilver",
    "Djezet",
    "Dragonhide",
    "Duskwood",
    "Inubrix",
    "Noqual",
    "Orichalcum",
    "Siccatite",
    "Silver",
    "Sisterstone",
    "Sovereign Steel",
    "Warpglass",
    "Amethyst",
    "Diamond",
    "Emerald",
    "Garnet",
    "Jade",
    "Opal",
    "Pearl",
    "Ruby",
    "Sapphire",
    "Topaz",
];

/// Material grade tiers.
pub const COARSE_GRADES: &[&str] = &["low-grade", "medium-grade", "high-grade"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keywords {
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    #[serde(default = "default_grades")]
    pub grades: Vec<String>,

    #[serde(default = "default_item_types")]
    pub item_types: Vec<String>,

    #[serde(default = "default_coarse_grades")]
    pub coarse_grades: Vec<String>,
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            grades: default_grades(),
            item_types: default_item_types(),
            coarse_grades: default_coarse_grades(),
        }
    }
}

impl Keywords {
    /// Every keyword that may stand alone on a line and be folded into the
    /// previous line as a qualifier, lowercased.
    pub fn qualifiers(&self) -> impl Iterator<Item = String> + '_ {
        self.grades
            .iter()
            .chain(&self.item_types)
            .chain(&self.coarse_grades)
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn default_categories() -> Vec<String> {
    owned(CATEGORIES)
}

fn default_grades() -> Vec<String> {
    owned(GRADES)
}

fn default_item_types() -> Vec<String> {
    owned(ITEM_TYPES)
}

fn default_coarse_grades() -> Vec<String> {
    owned(COARSE_GRADES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualifiers_cover_grades_types_and_tiers() {
        let qualifiers: Vec<String> = Keywords::default().qualifiers().collect();
        assert!(qualifiers.contains(&"moderate".to_string()));
        assert!(qualifiers.contains(&"type ii".to_string()));
        assert!(qualifiers.contains(&"high-grade".to_string()));
        assert!(!qualifiers.contains(&"potion".to_string()));
    }

    #[test]
    fn keyword_sets_do_not_overlap_categories() {
        let keywords = Keywords::default();
        let categories: Vec<String> =
            keywords.categories.iter().map(|c| c.to_lowercase()).collect();
        for qualifier in keywords.qualifiers() {
            assert!(!categories.contains(&qualifier), "{} is also a category", qualifier);
        }
    }
}
