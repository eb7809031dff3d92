//! Item naming and English word manipulation.
//!
//! Every item has many surface forms ("shirt", "a silk shirt", "shirts made
//! of silk", ...) and the matching engine compares player phrases against
//! all of them, so these transforms must be exact string functions.

use crate::object::Item;

/// How an item's condition is shown in its rendered name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CondStyle {
    /// Condition omitted
    None,
    /// Adjective prefix: "awesome shirt"
    Adjective,
    /// Parenthetical suffix: "chest (battered)"
    Parenthetical,
}

/// How an item's material is shown in its rendered name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialStyle {
    /// Material omitted
    None,
    /// Prefix: "silk shirt"
    Prefix,
    /// Suffix clause: "shirt made of silk"
    MadeOf,
}

/// English words for the numbers one through twelve.
pub static NUMBER_WORDS: [&str; 12] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve",
];

/// Word for a small count, if it has one.
pub fn number_word(n: usize) -> Option<&'static str> {
    n.checked_sub(1).and_then(|i| NUMBER_WORDS.get(i).copied())
}

/// Strip one leading indefinite or definite article.
pub fn remove_article(s: &str) -> &str {
    for article in ["a ", "an ", "the "] {
        if let Some(rest) = s.strip_prefix(article) {
            return rest.trim_start_matches(' ');
        }
    }
    s
}

/// Make a name plural.
///
/// The suffix lands on the head noun, before any "of", "made of" or
/// parenthetical clause. The rule table handles the forms occurring in the
/// game correctly; it is by no means a complete reference for English
/// inflection.
pub fn pluralize(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    let (head, tail) = split_qualifier(s);
    format!("{}{}", inflect(head), tail)
}

/// Split a name into its head noun and trailing qualifier clause.
fn split_qualifier(s: &str) -> (&str, &str) {
    for (i, _) in s.match_indices(' ') {
        let rest = &s[i + 1..];
        if rest.starts_with('(') || word_at(rest, "of") || word_at(rest, "made of") {
            return (&s[..i], &s[i..]);
        }
    }
    (s, "")
}

/// True if `rest` begins with `word` at a word boundary.
fn word_at(rest: &str, word: &str) -> bool {
    match rest.strip_prefix(word) {
        Some(after) => !after
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_'),
        None => false,
    }
}

/// Plural suffix selection; the first matching rule wins.
fn inflect(head: &str) -> String {
    if head.ends_with('s') {
        // leggings, overalls
        head.to_string()
    } else if head.ends_with('y') {
        // berry
        format!("{}ies", &head[..head.len() - 1])
    } else if head.ends_with('o') || head.ends_with("sh") {
        // dish, potato
        format!("{head}es")
    } else if head.ends_with("ff") {
        // staff
        format!("{}ves", &head[..head.len() - 2])
    } else if head.ends_with('f') {
        // wolf
        format!("{}ves", &head[..head.len() - 1])
    } else {
        format!("{head}s")
    }
}

/// Prefix a name with an article.
///
/// Definite always gets "the"; plural forms take no indefinite article;
/// otherwise "an" before a vowel and "a" elsewhere.
pub fn add_article(s: &str, definite: bool) -> String {
    let p = remove_article(s);
    if definite {
        return format!("the {p}");
    }
    if p == pluralize(p) {
        return p.to_string();
    }
    let article = if p.starts_with(['a', 'e', 'i', 'o', 'u']) {
        "an"
    } else {
        "a"
    };
    format!("{article} {p}")
}

/// Capitalize the first character.
pub fn uc_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render an item's name in the requested style.
///
/// Chests and carts override the requested styles: their material never
/// shows, and their condition renders parenthetically exactly when the
/// caller asked for none (so that addressing them by bare name still
/// works). A "wood" material prefix renders as "wooden".
pub fn render(item: &Item, cond: CondStyle, mat: MaterialStyle) -> String {
    let (cond, mat) = match item {
        Item::Chest { .. } => {
            let cond = if cond == CondStyle::None && item.condition_name() != "good" {
                CondStyle::Parenthetical
            } else {
                CondStyle::None
            };
            (cond, MaterialStyle::None)
        }
        Item::Cart { .. } => {
            let cond = if cond == CondStyle::None {
                CondStyle::Parenthetical
            } else {
                CondStyle::None
            };
            (cond, MaterialStyle::None)
        }
        Item::Treasure { .. } => (cond, mat),
    };

    let mut result = item.kind_name();
    let material = item.material_name();
    if mat == MaterialStyle::Prefix {
        let material = if material == "wood" { "wooden" } else { material };
        result = format!("{material} {result}");
    }
    match cond {
        CondStyle::Adjective => result = format!("{} {}", item.condition_name(), result),
        CondStyle::Parenthetical => result = format!("{} ({})", result, item.condition_name()),
        CondStyle::None => {}
    }
    if mat == MaterialStyle::MadeOf {
        result = format!("{result} made of {material}");
    }
    result
}

/// Check a phrase against all 24 surface forms of an item.
///
/// The forms are {plain, indefinite article, definite article, plural} x
/// {condition off, condition adjective} x {material off, prefix, made-of}.
/// An empty phrase matches unconditionally.
pub fn matches_phrase(item: &Item, phrase: &str) -> bool {
    if phrase.is_empty() {
        return true;
    }
    for cond in [CondStyle::None, CondStyle::Adjective] {
        for mat in [MaterialStyle::None, MaterialStyle::Prefix, MaterialStyle::MadeOf] {
            let base = render(item, cond, mat);
            if phrase == base
                || phrase == add_article(&base, false)
                || phrase == add_article(&base, true)
                || phrase == pluralize(&base)
            {
                return true;
            }
        }
    }
    false
}

/// Fold duplicate display strings into counted plurals.
///
/// `["a shirt", "a shirt", "a cap"]` becomes "two shirts, and a cap" on one
/// line, or one entry per line when `oneliner` is false. Counts up to
/// twelve use their English word.
pub fn counted_list(items: &[String], oneliner: bool) -> String {
    use std::collections::{HashMap, HashSet};

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for s in items {
        *counts.entry(s.as_str()).or_insert(0) += 1;
    }

    let mut folded: Vec<String> = Vec::new();
    let mut done: HashSet<&str> = HashSet::new();
    for s in items {
        let n = counts[s.as_str()];
        if n == 1 {
            folded.push(s.clone());
            continue;
        }
        if !done.insert(s.as_str()) {
            continue;
        }
        let base = remove_article(s);
        let counted = match number_word(n) {
            Some(word) => format!("{word} {base}"),
            None => format!("{n} {base}"),
        };
        folded.push(pluralize(&counted));
    }

    let mut output = String::new();
    for (i, entry) in folded.iter().enumerate() {
        if oneliner {
            if i > 0 {
                output.push_str(if i + 1 == folded.len() { ", and " } else { ", " });
            }
            output.push_str(entry);
        } else {
            output.push_str(entry);
            output.push('\n');
        }
    }
    output
}
