//! Category registry: the fixed mapping from category to its permitted
//! subcategories.
//!
//! The mapping is an explicit static table rather than anything dynamic, so
//! construction-time validation and UI option lists read from one place.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use unimart_core::{DomainError, DomainResult};

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    BookOrManual,
    LearningResource,
    ItEquipment,
    OfficeEquipment,
    StationeryArticle,
}

/// Subcategory tag. One flat enum across all categories; which tags a
/// product may carry is decided by [`Category::subcategories`].
///
/// The `Other*` variants all display as "other" — parsing is always scoped
/// to a category, so the shared label is unambiguous in practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subcategory {
    // Book or manual genres.
    Novel,
    Comic,
    Documentary,
    Textbook,
    OtherBook,
    // Learning resource kinds.
    Printed,
    Electronic,
    // IT equipment.
    Computer,
    Mouse,
    Keyboard,
    ExternalDrive,
    OtherIt,
    // Office equipment.
    Table,
    Chair,
    Lamp,
    OtherOffice,
    // Stationery articles.
    Notebook,
    Pencil,
    Highlighter,
    OtherStationery,
}

const BOOK_SUBCATEGORIES: &[Subcategory] = &[
    Subcategory::Novel,
    Subcategory::Comic,
    Subcategory::Documentary,
    Subcategory::Textbook,
    Subcategory::OtherBook,
];

const LEARNING_SUBCATEGORIES: &[Subcategory] =
    &[Subcategory::Printed, Subcategory::Electronic];

const IT_SUBCATEGORIES: &[Subcategory] = &[
    Subcategory::Computer,
    Subcategory::Mouse,
    Subcategory::Keyboard,
    Subcategory::ExternalDrive,
    Subcategory::OtherIt,
];

const OFFICE_SUBCATEGORIES: &[Subcategory] = &[
    Subcategory::Table,
    Subcategory::Chair,
    Subcategory::Lamp,
    Subcategory::OtherOffice,
];

const STATIONERY_SUBCATEGORIES: &[Subcategory] = &[
    Subcategory::Notebook,
    Subcategory::Pencil,
    Subcategory::Highlighter,
    Subcategory::OtherStationery,
];

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 5] = [
        Category::BookOrManual,
        Category::LearningResource,
        Category::ItEquipment,
        Category::OfficeEquipment,
        Category::StationeryArticle,
    ];

    /// Human-readable category name.
    pub fn label(self) -> &'static str {
        match self {
            Category::BookOrManual => "book or manual",
            Category::LearningResource => "learning resource",
            Category::ItEquipment => "IT equipment",
            Category::OfficeEquipment => "office equipment",
            Category::StationeryArticle => "stationery article",
        }
    }

    /// Ordered slice of subcategories permitted for this category.
    pub fn subcategories(self) -> &'static [Subcategory] {
        match self {
            Category::BookOrManual => BOOK_SUBCATEGORIES,
            Category::LearningResource => LEARNING_SUBCATEGORIES,
            Category::ItEquipment => IT_SUBCATEGORIES,
            Category::OfficeEquipment => OFFICE_SUBCATEGORIES,
            Category::StationeryArticle => STATIONERY_SUBCATEGORIES,
        }
    }

    /// Whether `subcategory` belongs to this category's enumeration.
    pub fn permits(self, subcategory: Subcategory) -> bool {
        self.subcategories().contains(&subcategory)
    }

    /// Parse a subcategory label scoped to this category.
    pub fn parse_subcategory(self, s: &str) -> DomainResult<Subcategory> {
        let wanted = s.trim();
        self.subcategories()
            .iter()
            .copied()
            .find(|sub| sub.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::InvalidSubcategory {
                category: self.label().to_string(),
                subcategory: wanted.to_string(),
            })
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::InvalidCategory(wanted.to_string()))
    }
}

impl Subcategory {
    /// Human-readable subcategory name.
    pub fn label(self) -> &'static str {
        match self {
            Subcategory::Novel => "novel",
            Subcategory::Comic => "comic",
            Subcategory::Documentary => "documentary",
            Subcategory::Textbook => "textbook",
            Subcategory::Printed => "printed",
            Subcategory::Electronic => "electronic",
            Subcategory::Computer => "computer",
            Subcategory::Mouse => "mouse",
            Subcategory::Keyboard => "keyboard",
            Subcategory::ExternalDrive => "external drive",
            Subcategory::Table => "table",
            Subcategory::Chair => "chair",
            Subcategory::Lamp => "lamp",
            Subcategory::Notebook => "notebook",
            Subcategory::Pencil => "pencil",
            Subcategory::Highlighter => "highlighter",
            Subcategory::OtherBook
            | Subcategory::OtherIt
            | Subcategory::OtherOffice
            | Subcategory::OtherStationery => "other",
        }
    }
}

impl core::fmt::Display for Subcategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Registry lookup: subcategories of a category given by name.
///
/// Fails with [`DomainError::InvalidCategory`] when the name is unknown.
pub fn subcategories_by_name(category: &str) -> DomainResult<&'static [Subcategory]> {
    let category: Category = category.parse()?;
    Ok(category.subcategories())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_lists_only_its_own_subcategories() {
        for category in Category::ALL {
            for sub in category.subcategories() {
                assert!(category.permits(*sub), "{category} must permit {sub}");
            }
        }
    }

    #[test]
    fn subcategory_sets_are_disjoint() {
        for (i, a) in Category::ALL.iter().enumerate() {
            for b in &Category::ALL[i + 1..] {
                for sub in a.subcategories() {
                    assert!(
                        !b.permits(*sub),
                        "{sub:?} appears in both {a} and {b}"
                    );
                }
            }
        }
    }

    #[test]
    fn category_parses_by_label_case_insensitively() {
        let parsed: Category = "IT Equipment".parse().unwrap();
        assert_eq!(parsed, Category::ItEquipment);
    }

    #[test]
    fn unknown_category_fails_with_invalid_category() {
        let err = subcategories_by_name("groceries").unwrap_err();
        assert_eq!(err, DomainError::InvalidCategory("groceries".to_string()));
    }

    #[test]
    fn registry_lookup_by_name_matches_static_table() {
        let subs = subcategories_by_name("book or manual").unwrap();
        assert_eq!(subs, Category::BookOrManual.subcategories());
    }

    #[test]
    fn scoped_subcategory_parse_rejects_foreign_tags() {
        let err = Category::ItEquipment.parse_subcategory("comic").unwrap_err();
        match err {
            DomainError::InvalidSubcategory { category, subcategory } => {
                assert_eq!(category, "IT equipment");
                assert_eq!(subcategory, "comic");
            }
            other => panic!("expected InvalidSubcategory, got {other:?}"),
        }
    }

    #[test]
    fn other_label_resolves_per_category() {
        assert_eq!(
            Category::BookOrManual.parse_subcategory("other").unwrap(),
            Subcategory::OtherBook
        );
        assert_eq!(
            Category::ItEquipment.parse_subcategory("other").unwrap(),
            Subcategory::OtherIt
        );
        assert_eq!(
            Category::StationeryArticle.parse_subcategory("other").unwrap(),
            Subcategory::OtherStationery
        );
    }
}
