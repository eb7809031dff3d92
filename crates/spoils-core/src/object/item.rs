//! Treasure items and their generative model.

use serde::{Deserialize, Serialize};

use crate::data::{
    BASE_VALUE, COMMON_CONDITIONS, COMMON_KINDS, COMMON_MATERIALS, COND_TYPES, ITEM_KINDS,
    MATERIALS,
};
use crate::object::container::Container;
use crate::object::name::{self, CondStyle, MaterialStyle};
use crate::rng::GameRng;

/// Weight reported for chests and carts; far beyond anything carryable.
pub const IMMOVABLE_WEIGHT: f32 = 999.0;

/// Integrity below which a chest reads as "dented".
const CHEST_DENTED: f32 = 0.75;
/// Integrity below which a chest reads as "battered".
const CHEST_BATTERED: f32 = 0.35;

/// Anything that can lie on a floor, in a pocket, or in a cart.
///
/// Exactly one variant is ever active; chests and carts are immovable and
/// bypass the attribute tables entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Item {
    /// A sellable treasure; each index points into a static attribute table.
    Treasure {
        kind: usize,
        material: usize,
        condition: usize,
    },
    /// A closed chest. Destroyed, spilling its contents, at integrity <= 0.
    Chest { integrity: f32 },
    /// A cart transporting a nested container.
    Cart { contents: Box<Container> },
}

impl Item {
    /// Generate a treasure with the standard rarity bias: kinds favor the
    /// four most common entries, materials the first two, conditions the
    /// first three.
    pub fn random_treasure(rng: &mut GameRng) -> Item {
        let kind = if rng.frand() > 0.4 {
            rng.rn2(ITEM_KINDS.len() as u32)
        } else {
            rng.rn2(COMMON_KINDS as u32)
        };
        let material = if rng.frand() > 0.4 {
            rng.rn2(MATERIALS.len() as u32)
        } else {
            rng.rn2(COMMON_MATERIALS as u32)
        };
        let condition = if rng.frand() > 0.8 {
            rng.rn2(COND_TYPES.len() as u32)
        } else {
            rng.rn2(COMMON_CONDITIONS as u32)
        };
        Item::Treasure {
            kind: kind as usize,
            material: material as usize,
            condition: condition as usize,
        }
    }

    /// A fresh, fully intact chest.
    pub fn new_chest() -> Item {
        Item::Chest { integrity: 1.0 }
    }

    /// An empty cart.
    pub fn new_cart() -> Item {
        Item::Cart {
            contents: Box::new(Container::new()),
        }
    }

    /// The base noun for this item.
    pub fn kind_name(&self) -> String {
        match self {
            Item::Treasure { kind, .. } => ITEM_KINDS[*kind].name.to_string(),
            Item::Chest { .. } => "chest".to_string(),
            Item::Cart { .. } => "cart".to_string(),
        }
    }

    /// The material name; empty for chests and carts.
    pub fn material_name(&self) -> &'static str {
        match self {
            Item::Treasure { material, .. } => MATERIALS[*material].name,
            Item::Chest { .. } | Item::Cart { .. } => "",
        }
    }

    /// The condition descriptor.
    ///
    /// Chests derive theirs from integrity, carts from how full they are.
    pub fn condition_name(&self) -> String {
        match self {
            Item::Treasure { condition, .. } => COND_TYPES[*condition].name.to_string(),
            Item::Chest { integrity } => {
                if *integrity < CHEST_BATTERED {
                    "battered".to_string()
                } else if *integrity < CHEST_DENTED {
                    "dented".to_string()
                } else {
                    "good".to_string()
                }
            }
            Item::Cart { contents } => match contents.count_items() {
                0 => "empty".to_string(),
                1 => "1 item".to_string(),
                n => format!("{n} items"),
            },
        }
    }

    /// Render this item's name in the requested style.
    pub fn name(&self, cond: CondStyle, mat: MaterialStyle) -> String {
        name::render(self, cond, mat)
    }

    /// Weight of the item. Chests and carts report a sentinel weight,
    /// independent of their contents.
    pub fn weight(&self) -> f32 {
        match self {
            Item::Treasure { kind, material, .. } => {
                MATERIALS[*material].weight * ITEM_KINDS[*kind].weight
            }
            Item::Chest { .. } | Item::Cart { .. } => IMMOVABLE_WEIGHT,
        }
    }

    /// Monetary value at the standard valuation constant.
    pub fn value(&self) -> f32 {
        self.value_with(BASE_VALUE)
    }

    /// Monetary value at an explicit valuation constant. Chests and carts
    /// are worthless as objects regardless of contents.
    pub fn value_with(&self, constant: f32) -> f32 {
        match self {
            Item::Treasure {
                kind,
                material,
                condition,
            } => {
                constant
                    * MATERIALS[*material].worth
                    * ITEM_KINDS[*kind].worth
                    * COND_TYPES[*condition].worth
            }
            Item::Chest { .. } | Item::Cart { .. } => 0.0,
        }
    }

    /// True for variants that a move can match but never relocate.
    pub fn immovable(&self) -> bool {
        matches!(self, Item::Chest { .. } | Item::Cart { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_treasure_weight_and_value() {
        // gold shirt in excellent condition
        let item = Item::Treasure {
            kind: 0,
            material: 2,
            condition: 1,
        };
        assert!((item.weight() - 3.5).abs() < f32::EPSILON);
        assert!((item.value() - 300.0).abs() < f32::EPSILON);
        assert!((item.value_with(1.0) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_immovable_sentinels() {
        let chest = Item::new_chest();
        let cart = Item::new_cart();
        for item in [&chest, &cart] {
            assert!(item.immovable());
            assert_eq!(item.weight(), IMMOVABLE_WEIGHT);
            assert_eq!(item.value(), 0.0);
        }
        let shirt = Item::Treasure {
            kind: 0,
            material: 0,
            condition: 0,
        };
        assert!(!shirt.immovable());
    }

    #[test]
    fn test_chest_condition_thresholds() {
        assert_eq!(Item::Chest { integrity: 1.0 }.condition_name(), "good");
        assert_eq!(Item::Chest { integrity: 0.75 }.condition_name(), "good");
        assert_eq!(Item::Chest { integrity: 0.5 }.condition_name(), "dented");
        assert_eq!(Item::Chest { integrity: 0.2 }.condition_name(), "battered");
    }

    #[test]
    fn test_cart_condition_counts_contents() {
        let mut cart = Item::new_cart();
        assert_eq!(cart.condition_name(), "empty");
        if let Item::Cart { contents } = &mut cart {
            contents.items.push(Item::Treasure {
                kind: 0,
                material: 0,
                condition: 0,
            });
        }
        assert_eq!(cart.condition_name(), "1 item");
        if let Item::Cart { contents } = &mut cart {
            contents.money[1] = 30;
        }
        assert_eq!(cart.condition_name(), "2 items");
    }

    #[test]
    fn test_random_treasure_indices_in_bounds() {
        let mut rng = GameRng::new(99);
        for _ in 0..500 {
            match Item::random_treasure(&mut rng) {
                Item::Treasure {
                    kind,
                    material,
                    condition,
                } => {
                    assert!(kind < ITEM_KINDS.len());
                    assert!(material < MATERIALS.len());
                    assert!(condition < COND_TYPES.len());
                }
                other => panic!("unexpected variant {other:?}"),
            }
        }
    }
}
