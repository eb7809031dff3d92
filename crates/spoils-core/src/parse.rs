//! Free-form item reference parsing.
//!
//! Turns player phrases like "2 awesome gold shirts", "shirt 2" or
//! "all except wood coins" into structured, quantified queries. Parsing
//! never fails: malformed input degrades into a literal phrase that will
//! simply match nothing downstream.

use serde::{Deserialize, Serialize};

use crate::object::name::{remove_article, NUMBER_WORDS};

/// One quantified query against a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemQuery {
    /// What was referred to; blank matches everything.
    pub phrase: String,
    /// Amount, if given. 0 = one item, or one pile of coins (default);
    /// n = n items, or n coins.
    pub amount: i64,
    /// Ordinal, if given. 0 = every match; 1 = first match (default);
    /// n = n-th match. Ignored for money.
    pub index: i64,
}

impl Default for ItemQuery {
    fn default() -> Self {
        Self {
            phrase: String::new(),
            amount: 0,
            index: 1,
        }
    }
}

impl ItemQuery {
    /// The wildcard query: matches every item.
    pub fn wildcard() -> Self {
        Self {
            index: 0,
            ..Self::default()
        }
    }
}

/// A parsed request: a list of queries plus an optional except-list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequest {
    /// The queries to satisfy.
    pub refs: Vec<ItemQuery>,
    /// Queries naming what must stay behind.
    pub except: Vec<ItemQuery>,
    /// Was this "all"/"everything" without any specifiers?
    pub everything: bool,
    /// The request text before the except-clause.
    pub original: String,
}

impl ItemRequest {
    /// A request built directly from queries, with no except-list.
    pub fn from_queries(refs: Vec<ItemQuery>) -> Self {
        Self {
            refs,
            ..Self::default()
        }
    }

    /// True if this request clearly addresses one specific item.
    pub fn is_specific(&self) -> bool {
        !self.everything
            && self.refs.len() == 1
            && self.refs[0].amount <= 1
            && self.refs[0].index >= 1
    }
}

/// Parse a free-form request phrase.
pub fn parse_request(text: &str) -> ItemRequest {
    let (head, except) = match text.split_once(" except ") {
        Some((head, tail)) => (head, Some(tail)),
        None => (text, None),
    };

    let mut request = ItemRequest {
        original: head.to_string(),
        ..ItemRequest::default()
    };

    let bare = remove_article(head);
    if bare == "all" || bare == "everything" {
        request.everything = true;
        request.refs.push(ItemQuery::wildcard());
    } else if !head.is_empty() {
        parse_queries(&mut request.refs, head);
    }

    if let Some(tail) = except {
        parse_queries(&mut request.except, tail);
    }
    request
}

/// Split a comma/"and"-separated list into queries.
fn parse_queries(list: &mut Vec<ItemQuery>, text: &str) {
    for chunk in text.split(',') {
        for part in chunk.split(" and ") {
            let part = part.trim();
            if !part.is_empty() {
                list.push(parse_single(part));
            }
        }
    }
}

/// Parse one list element into a query.
///
/// A leading number word is first rewritten to digits. A leading "all"
/// makes the query match every occurrence; a leading count sets the
/// amount; otherwise a trailing integer, if any, selects the n-th match.
fn parse_single(part: &str) -> ItemQuery {
    let mut query = ItemQuery::default();
    let word = rewrite_leading_number_word(part);
    let mut phrase = word.as_str();

    if let Some((first, rest)) = phrase.split_once(' ') {
        if first == "all" {
            query.index = 0;
            phrase = rest.trim_start();
        } else if let Some(amount) = parse_integer(first) {
            query.amount = amount;
            phrase = rest.trim_start();
        }
    }

    if query.index != 0 && query.amount == 0 {
        if let Some((head, tail)) = phrase.rsplit_once(' ') {
            if let Some(index) = parse_integer(tail) {
                query.index = index;
                phrase = head.trim_end();
            }
        }
    }

    query.phrase = phrase.to_string();
    query
}

/// Parse an all-digit token; anything else, including overflow, is None.
fn parse_integer(token: &str) -> Option<i64> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Rewrite a leading "one".."twelve" into its digit form.
fn rewrite_leading_number_word(part: &str) -> String {
    let (first, rest) = match part.split_once(' ') {
        Some((first, rest)) => (first, Some(rest)),
        None => (part, None),
    };
    match NUMBER_WORDS.iter().position(|w| *w == first) {
        Some(pos) => match rest {
            Some(rest) => format!("{} {}", pos + 1, rest),
            None => (pos + 1).to_string(),
        },
        None => part.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_phrase() {
        let r = parse_request("shirt");
        assert!(!r.everything);
        assert_eq!(r.refs.len(), 1);
        assert_eq!(r.refs[0].phrase, "shirt");
        assert_eq!(r.refs[0].amount, 0);
        assert_eq!(r.refs[0].index, 1);
        assert!(r.is_specific());
    }

    #[test]
    fn test_leading_count() {
        let r = parse_request("2 awesome gold shirts");
        assert_eq!(r.refs.len(), 1);
        assert_eq!(r.refs[0].phrase, "awesome gold shirts");
        assert_eq!(r.refs[0].amount, 2);
        assert_eq!(r.refs[0].index, 1);
        assert!(!r.is_specific());
    }

    #[test]
    fn test_leading_number_word() {
        let r = parse_request("three shirts");
        assert_eq!(r.refs[0].amount, 3);
        assert_eq!(r.refs[0].phrase, "shirts");
        let r = parse_request("twelve caps");
        assert_eq!(r.refs[0].amount, 12);
    }

    #[test]
    fn test_trailing_ordinal() {
        let r = parse_request("shirt 2");
        assert_eq!(r.refs[0].phrase, "shirt");
        assert_eq!(r.refs[0].amount, 0);
        assert_eq!(r.refs[0].index, 2);
    }

    #[test]
    fn test_leading_count_wins_over_trailing_ordinal() {
        // with a leading count the trailing number stays in the phrase
        let r = parse_request("3 shirts 2");
        assert_eq!(r.refs[0].amount, 3);
        assert_eq!(r.refs[0].index, 1);
        assert_eq!(r.refs[0].phrase, "shirts 2");
    }

    #[test]
    fn test_all_prefix_is_wildcard() {
        let r = parse_request("all shirts");
        assert!(!r.everything);
        assert_eq!(r.refs[0].index, 0);
        assert_eq!(r.refs[0].phrase, "shirts");
    }

    #[test]
    fn test_everything_forms() {
        for text in ["all", "everything", "the everything"] {
            let r = parse_request(text);
            assert!(r.everything, "text {text:?}");
            assert_eq!(r.refs.len(), 1);
            assert_eq!(r.refs[0], ItemQuery::wildcard());
        }
    }

    #[test]
    fn test_comma_and_list() {
        let r = parse_request("shirt, cap and two ties");
        assert_eq!(r.refs.len(), 3);
        assert_eq!(r.refs[0].phrase, "shirt");
        assert_eq!(r.refs[1].phrase, "cap");
        assert_eq!(r.refs[2].phrase, "ties");
        assert_eq!(r.refs[2].amount, 2);
    }

    #[test]
    fn test_except_clause() {
        let r = parse_request("all except gold coins, shirt 2");
        assert!(r.everything);
        assert_eq!(r.original, "all");
        assert_eq!(r.except.len(), 2);
        assert_eq!(r.except[0].phrase, "gold coins");
        assert_eq!(r.except[1].phrase, "shirt");
        assert_eq!(r.except[1].index, 2);
    }

    #[test]
    fn test_only_first_except_splits() {
        let r = parse_request("all except shirt except cap");
        assert_eq!(r.except.len(), 1);
        assert_eq!(r.except[0].phrase, "shirt except cap");
    }

    #[test]
    fn test_empty_input() {
        let r = parse_request("");
        assert!(r.refs.is_empty());
        assert!(!r.everything);
        assert!(!r.is_specific());
    }

    #[test]
    fn test_degraded_inputs_stay_literal() {
        // no space after the digits, so it is not a count
        let r = parse_request("12shirts");
        assert_eq!(r.refs[0].phrase, "12shirts");
        assert_eq!(r.refs[0].amount, 0);
        // a bare number word degrades to its digit form as a phrase
        let r = parse_request("one");
        assert_eq!(r.refs[0].phrase, "1");
        // overflowing counts are left in the phrase
        let r = parse_request("99999999999999999999 shirts");
        assert_eq!(r.refs[0].amount, 0);
        assert_eq!(r.refs[0].phrase, "99999999999999999999 shirts");
    }

    #[test]
    fn test_number_word_not_rewritten_mid_phrase() {
        let r = parse_request("shirt one");
        // trailing word is not a digit, so it stays in the phrase
        assert_eq!(r.refs[0].phrase, "shirt one");
        assert_eq!(r.refs[0].index, 1);
    }

    #[test]
    fn test_is_specific() {
        assert!(parse_request("shirt").is_specific());
        assert!(parse_request("shirt 3").is_specific());
        assert!(parse_request("one shirt").is_specific());
        assert!(!parse_request("2 shirts").is_specific());
        assert!(!parse_request("all shirts").is_specific());
        assert!(!parse_request("everything").is_specific());
        assert!(!parse_request("shirt, cap").is_specific());
    }
}
