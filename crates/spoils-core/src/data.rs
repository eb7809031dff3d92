//! Static attribute tables for treasure and maze generation.
//!
//! Treasure items combine one entry from each of the kind, material and
//! condition tables; the tables carry the worth and weight multipliers that
//! define an item's value. Ordering matters: the most common entries sit at
//! the front of each table and are favored by the generator.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

/// A named attribute with worth and weight multipliers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attribute {
    pub name: &'static str,
    pub worth: f32,
    pub weight: f32,
}

const fn attr(name: &'static str, worth: f32, weight: f32) -> Attribute {
    Attribute {
        name,
        worth,
        weight,
    }
}

/// Currency denominations, ordered by descending reference worth.
/// Reference value: 1.0 = gold. Every coin weighs 0.01 units.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumCount,
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Denomination {
    Platinum = 0,
    Gold = 1,
    Silver = 2,
    Bronze = 3,
    Copper = 4,
    Wood = 5,
}

impl Denomination {
    /// Worth of one coin, in gold.
    pub const fn worth(self) -> f32 {
        match self {
            Denomination::Platinum => 10.0,
            Denomination::Gold => 1.0,
            Denomination::Silver => 0.6,
            Denomination::Bronze => 0.4,
            Denomination::Copper => 0.2,
            Denomination::Wood => 0.01,
        }
    }

    /// Weight of one coin.
    pub const fn weight(self) -> f32 {
        0.01
    }

    /// Denomination at a ledger index; clamps to the cheapest kind.
    pub fn from_index(index: usize) -> Denomination {
        Denomination::iter().nth(index).unwrap_or(Denomination::Wood)
    }
}

/// Conditions an item can be in. Reference value: 1.0 = excellent.
/// The three most common condition types are listed first.
pub static COND_TYPES: [Attribute; 7] = [
    attr("awesome", 1.2, 0.0),
    attr("excellent", 1.0, 0.0),
    attr("good", 0.9, 0.0),
    attr("average", 0.75, 0.0),
    attr("poor", 0.5, 0.0),
    attr("bad", 0.6, 0.0),
    attr("thrashed", 0.4, 0.0),
];

/// Building materials, with raw material cost and weight.
/// The two most common materials are listed first.
pub static MATERIALS: [Attribute; 12] = [
    attr("iron", 0.4, 3.0),
    attr("fur", 0.01, 0.2),
    attr("gold", 1.0, 3.5),
    attr("bronze", 0.1, 2.7),
    attr("pewter", 0.05, 2.0),
    attr("chromium", 0.9, 2.0),
    attr("platinum", 2.0, 4.0),
    attr("bamboo", 0.01, 1.0),
    attr("leather", 0.09, 0.5),
    attr("silk", 0.03, 0.1),
    attr("steel", 0.7, 3.0),
    attr("glass", 0.04, 2.0),
];

/// Kinds of treasure. Reference values: shirt = 1.0 worth, 1.0 weight.
/// The four most common kinds are listed first. Mostly wearables, because
/// the material list spans both hard and soft materials.
pub static ITEM_KINDS: [Attribute; 13] = [
    attr("shirt", 1.0, 1.0),
    attr("shoe", 0.4, 1.0),
    attr("bracelet", 0.2, 0.2),
    attr("tie", 0.25, 0.25),
    attr("sceptre", 4.0, 2.5),
    attr("crown", 3.0, 0.6),
    attr("leggings", 0.8, 0.5),
    attr("dagger", 0.1, 1.5),
    attr("cap", 0.6, 0.5),
    attr("battlesuit", 10.0, 5.0),
    attr("hammer", 0.4, 3.0),
    attr("cape", 0.7, 1.0),
    attr("overalls", 4.0, 4.0),
];

/// Body parts that can get sprained while prying, with the cost in
/// hitpoints stored in the worth field.
pub static BODY_PARTS: [Attribute; 5] = [
    attr("finger", 10.0, 0.0),
    attr("elbow", 60.0, 0.0),
    attr("teeth", 30.0, 0.0),
    attr("toe", 40.0, 0.0),
    attr("shoulder", 100.0, 0.0),
];

/// Tunnel flavors. Purely cosmetic variance between rooms.
pub static ENVIRONMENTS: [&str; 5] = ["dark", "tall", "humid", "beautiful", "narrow"];

/// How many entries at the front of [`ITEM_KINDS`] count as common.
pub const COMMON_KINDS: usize = 4;
/// How many entries at the front of [`MATERIALS`] count as common.
pub const COMMON_MATERIALS: usize = 2;
/// How many entries at the front of [`COND_TYPES`] count as common.
pub const COMMON_CONDITIONS: usize = 3;

/// Base constant for item valuation.
pub const BASE_VALUE: f32 = 300.0;

#[cfg(test)]
mod tests {
    use super::*;
    use strum::EnumCount;

    #[test]
    fn test_denominations_descend_in_worth() {
        let worths: Vec<f32> = Denomination::iter().map(Denomination::worth).collect();
        for pair in worths.windows(2) {
            assert!(pair[0] > pair[1]);
        }
    }

    #[test]
    fn test_denomination_display_is_lowercase() {
        assert_eq!(Denomination::Platinum.to_string(), "platinum");
        assert_eq!(Denomination::Wood.to_string(), "wood");
    }

    #[test]
    fn test_from_index_round_trips() {
        for (i, d) in Denomination::iter().enumerate() {
            assert_eq!(Denomination::from_index(i), d);
        }
        assert_eq!(
            Denomination::from_index(Denomination::COUNT + 5),
            Denomination::Wood
        );
    }

    #[test]
    fn test_common_prefixes_fit_tables() {
        assert!(COMMON_KINDS <= ITEM_KINDS.len());
        assert!(COMMON_MATERIALS <= MATERIALS.len());
        assert!(COMMON_CONDITIONS <= COND_TYPES.len());
    }
}
