//! Display-name tables supplied to the engine at construction.
//!
//! The engine never hardcodes meaning into ids - callers provide the
//! attribute and monster-type name tables (a `Default` set matching
//! the canonical game data is included), while the row/column phrase
//! tables are fixed process-wide constants.

use rustc_hash::FxHashMap;

/// Descriptive phrase for each board row, top to bottom.
pub const ROW_PHRASES: [&str; 5] = [
    "the top row",
    "the 2nd row from the top",
    "the middle row",
    "the 2nd row from the bottom",
    "the bottom row",
];

/// Descriptive phrase for each board column, left to right.
pub const COLUMN_PHRASES: [&str; 6] = [
    "the far left column",
    "the 2nd column from the left",
    "the 3rd column from the left",
    "the 3rd column from the right",
    "the 2nd column from the right",
    "the far right column",
];

/// Number of distinct orb attributes, including hazard orbs.
pub const ATTRIBUTE_UNIVERSE: usize = 10;

/// Number of matchable attributes (the five colors plus Heal).
pub const MATCHABLE_ATTRIBUTES: usize = 6;

/// Id -> display-name lookups for attributes and monster types.
///
/// Unknown ids degrade to `"???"` with an audit warning rather than
/// failing the conversion; the id tables are external data and may
/// lag behind newly added game content.
#[derive(Clone, Debug)]
pub struct NameTables {
    attributes: FxHashMap<u8, String>,
    types: FxHashMap<u8, String>,
}

impl NameTables {
    /// Build tables from caller-supplied maps.
    pub fn new(attributes: FxHashMap<u8, String>, types: FxHashMap<u8, String>) -> Self {
        Self { attributes, types }
    }

    /// Display name for an orb/monster attribute id.
    pub fn attribute(&self, id: u8) -> &str {
        match self.attributes.get(&id) {
            Some(name) => name,
            None => {
                tracing::warn!(target: "skill_text::audit", id, "unknown attribute id");
                "???"
            }
        }
    }

    /// Display name for a monster type id.
    pub fn monster_type(&self, id: u8) -> &str {
        match self.types.get(&id) {
            Some(name) => name,
            None => {
                tracing::warn!(target: "skill_text::audit", id, "unknown monster type id");
                "???"
            }
        }
    }
}

impl Default for NameTables {
    fn default() -> Self {
        let attributes = [
            (0, "Fire"),
            (1, "Water"),
            (2, "Wood"),
            (3, "Light"),
            (4, "Dark"),
            (5, "Heal"),
            (6, "Jammer"),
            (7, "Poison"),
            (8, "Mortal Poison"),
            (9, "Bomb"),
        ]
        .into_iter()
        .map(|(id, name)| (id, name.to_string()))
        .collect();

        let types = [
            (0, "Evo Material"),
            (1, "Balanced"),
            (2, "Physical"),
            (3, "Healer"),
            (4, "Dragon"),
            (5, "God"),
            (6, "Attacker"),
            (7, "Devil"),
            (8, "Machine"),
            (12, "Awoken Material"),
            (14, "Enhance Material"),
            (15, "Redeemable Material"),
        ]
        .into_iter()
        .map(|(id, name)| (id, name.to_string()))
        .collect();

        Self { attributes, types }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_attribute_names() {
        let tables = NameTables::default();
        assert_eq!(tables.attribute(0), "Fire");
        assert_eq!(tables.attribute(4), "Dark");
        assert_eq!(tables.attribute(9), "Bomb");
    }

    #[test]
    fn test_unknown_ids_degrade() {
        let tables = NameTables::default();
        assert_eq!(tables.attribute(200), "???");
        assert_eq!(tables.monster_type(200), "???");
    }

    #[test]
    fn test_custom_tables() {
        let attrs: FxHashMap<u8, String> = [(0u8, "Feuer".to_string())].into_iter().collect();
        let tables = NameTables::new(attrs, FxHashMap::default());
        assert_eq!(tables.attribute(0), "Feuer");
    }

    #[test]
    fn test_line_phrases() {
        assert_eq!(ROW_PHRASES[0], "the top row");
        assert_eq!(ROW_PHRASES[2], "the middle row");
        assert_eq!(COLUMN_PHRASES[5], "the far right column");
    }
}
