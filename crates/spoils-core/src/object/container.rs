//! Containers: ordered items plus a coin ledger.
//!
//! A container is the floor of a room, a pocket, or the bed of a cart. It
//! supports phrase matching over its contents and an all-or-nothing
//! `transfer` of everything a request names.

use serde::{Deserialize, Serialize};
use strum::EnumCount;

use crate::data::Denomination;
use crate::object::item::Item;
use crate::object::name::{self, CondStyle, MaterialStyle};
use crate::parse::{ItemQuery, ItemRequest};
use crate::rng::GameRng;

/// Number of denominations tracked by every coin ledger.
pub const DENOMINATIONS: usize = Denomination::COUNT;

/// Outcome of a transfer, with display names ready for presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Everything that changed hands, most recent last.
    pub moved: Vec<String>,
    /// Requested phrases that matched nothing.
    pub not_found: Vec<String>,
    /// Matched items that can never be relocated.
    pub immovable: Vec<String>,
}

/// An ordered collection of items and a fixed-size coin ledger.
///
/// The item at index 0 is the most recently placed one; transfers always
/// insert at the front.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub items: Vec<Item>,
    pub money: [i64; DENOMINATIONS],
}

impl Container {
    /// An empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `n` freshly generated treasures.
    pub fn generate(&mut self, n: usize, rng: &mut GameRng) {
        for _ in 0..n {
            self.items.push(Item::random_treasure(rng));
        }
    }

    /// Total worth of all items and coins, in gold.
    pub fn value(&self) -> f32 {
        let coins: f32 = self
            .money
            .iter()
            .enumerate()
            .map(|(i, &m)| m as f32 * Denomination::from_index(i).worth())
            .sum();
        coins + self.items.iter().map(Item::value).sum::<f32>()
    }

    /// Total weight of all items and coins.
    pub fn weight(&self) -> f32 {
        let coins: f32 = self
            .money
            .iter()
            .enumerate()
            .map(|(i, &m)| m as f32 * Denomination::from_index(i).weight())
            .sum();
        coins + self.items.iter().map(Item::weight).sum::<f32>()
    }

    /// Carrying cost per step for whoever holds this container.
    pub fn burden(&self) -> i64 {
        1 + self.weight() as i64
    }

    /// Number of items plus nonzero coin piles.
    pub fn count_items(&self) -> usize {
        self.items.len() + self.money.iter().filter(|&&m| m != 0).count()
    }

    /// Find the next item matching a query, scanning from `first`.
    ///
    /// A positional query (index set, no amount) counts matches across the
    /// whole container and returns only the index-th one; anything else
    /// returns the first match at or after `first`. An empty phrase
    /// matches every item.
    pub fn find_item(&self, what: &ItemQuery, first: usize) -> Option<usize> {
        let mut occurrences = 0i64;
        for (idx, item) in self.items.iter().enumerate() {
            if !name::matches_phrase(item, &what.phrase) {
                continue;
            }
            if what.index != 0 && what.amount == 0 {
                occurrences += 1;
                if occurrences != what.index {
                    continue;
                }
            }
            if idx < first {
                continue;
            }
            return Some(idx);
        }
        None
    }

    /// Find the next denomination with a positive balance matching a query,
    /// scanning from `first`.
    ///
    /// Accepted phrases: blank, "money", "coin", "coins", the denomination
    /// name, or the name followed by "coin"/"coins". Amount and index are
    /// ignored here.
    pub fn find_money(&self, what: &ItemQuery, first: usize) -> Option<usize> {
        let phrase = what.phrase.as_str();
        for idx in first..DENOMINATIONS {
            if self.money[idx] <= 0 {
                continue;
            }
            let denom = Denomination::from_index(idx).to_string();
            let matched = phrase.is_empty()
                || phrase == "money"
                || phrase == "coin"
                || phrase == "coins"
                || phrase == denom
                || phrase == format!("{denom} coin")
                || phrase == format!("{denom} coins");
            if matched {
                return Some(idx);
            }
        }
        None
    }

    /// Move everything a request names into `target`, all or nothing.
    ///
    /// Each sub-request is resolved in two passes: a dry run that checks an
    /// explicitly requested amount is actually available, then a commit
    /// pass that relocates items to the front of the target and transfers
    /// coins. Immovable matches are reported but stay put. When an
    /// except-list is present, its matches are moved back afterwards. If
    /// anything requested was not found, the whole call is rolled back and
    /// nothing changes hands.
    pub fn transfer(&mut self, target: &mut Container, what: &ItemRequest) -> MoveOutcome {
        let mut outcome = MoveOutcome::default();
        let target_snapshot = target.clone();
        let source_snapshot = self.clone();

        for w in &what.refs {
            let mut found_item = false;
            let mut found_money = false;
            let all = w.index == 0;

            for round in 1..=2 {
                let mut remaining = if w.amount != 0 { w.amount } else { 1 };
                let mut item_id = 0usize;
                while let Some(found) = self.find_item(w, item_id) {
                    item_id = found;
                    if round == 2 {
                        let name = name::add_article(
                            &self.items[item_id].name(CondStyle::None, MaterialStyle::Prefix),
                            false,
                        );
                        if self.items[item_id].immovable() {
                            outcome.immovable.push(name);
                            item_id += 1;
                        } else {
                            outcome.moved.push(name);
                            let item = self.items.remove(item_id);
                            target.items.insert(0, item);
                        }
                    } else {
                        item_id += 1;
                    }
                    found_item = true;
                    if !all {
                        remaining -= 1;
                        if remaining <= 0 {
                            break;
                        }
                    }
                }
                // Take nothing when the request named more than exists,
                // e.g. "get 3 shirts" with two on the ground.
                if round == 1 && found_item && !all && remaining > 0 {
                    found_item = false;
                    break;
                }
            }

            for round in 1..=2 {
                let mut remaining = if w.amount != 0 { w.amount } else { i64::MAX };
                let mut money_id = 0usize;
                while let Some(found) = self.find_money(w, money_id) {
                    money_id = found;
                    let take = remaining.min(self.money[money_id]);
                    if take <= 0 {
                        break;
                    }
                    if round == 2 {
                        outcome.moved.push(coin_phrase(take, money_id));
                        target.money[money_id] += take;
                        self.money[money_id] -= take;
                    } else {
                        money_id += 1;
                    }
                    found_money = true;
                    remaining -= take;
                    if !all && (w.amount == 0 || remaining <= 0) {
                        break;
                    }
                }
                if round == 1 && found_money && w.amount != 0 && !all && remaining > 0 {
                    found_money = false;
                    break;
                }
            }

            if !found_item && !found_money && !what.everything {
                outcome.not_found.push(w.phrase.clone());
            }
        }

        if !what.except.is_empty() {
            let takeback = ItemRequest::from_queries(what.except.clone());
            let MoveOutcome {
                moved,
                not_found,
                immovable,
            } = target.transfer(self, &takeback);
            outcome.not_found.extend(not_found);
            let moved: std::collections::HashSet<String> = moved.into_iter().collect();
            outcome.moved.retain(|s| !moved.contains(s));
            let immovable: std::collections::HashSet<String> = immovable.into_iter().collect();
            outcome.immovable.retain(|s| !immovable.contains(s));
        }

        if !outcome.not_found.is_empty() {
            outcome.moved.clear();
        }
        if outcome.moved.is_empty() {
            *target = target_snapshot;
            *self = source_snapshot;
        }
        outcome
    }

    /// List everything in the container.
    ///
    /// Items render with an indefinite article and material prefix, folded
    /// through the counted-list grouping; coin piles follow. With
    /// `include_totals`, value summary lines are appended. The flag in the
    /// return value is true when anything was listed.
    pub fn render_all(&self, include_totals: bool) -> (String, bool) {
        let mut out = String::new();

        let mut items_value = 0.0f32;
        let mut names = Vec::with_capacity(self.items.len());
        for item in &self.items {
            names.push(name::add_article(
                &item.name(CondStyle::None, MaterialStyle::Prefix),
                false,
            ));
            items_value += item.value();
        }
        out.push_str(&name::counted_list(&names, false));

        if include_totals && items_value != 0.0 {
            out.push_str(&format!(
                "The total value of your items is {items_value:.2} gold.\n"
            ));
        }

        let mut money_value = 0.0f32;
        for (idx, &m) in self.money.iter().enumerate() {
            money_value += m as f32 * Denomination::from_index(idx).worth();
            if m != 0 {
                out.push_str(&coin_phrase(m, idx));
                out.push('\n');
            }
        }

        if include_totals && money_value != 0.0 {
            out.push_str(&format!(
                "The coins are worth {money_value:.2} gold total.\n"
            ));
        }

        (out, money_value != 0.0 || !self.items.is_empty())
    }
}

/// "12 gold coins", "1 platinum coin".
fn coin_phrase(count: i64, index: usize) -> String {
    let denom = Denomination::from_index(index);
    let unit = if count == 1 { "coin" } else { "coins" };
    format!("{count} {denom} {unit}")
}
