use serde_derive::{Deserialize, Serialize};

use crate::route::Route;
use crate::rules::predicate::Predicate;

/// Default route priority. Earlier entries win when text names more than one
/// line.
pub const ROUTE_KEYWORDS: &[(&str, Route)] = &[
    ("淡海", Route::Danhai),
    ("安坑", Route::Ankeng),
    ("環狀", Route::Circular),
    ("三鶯", Route::Sanying),
];

/// Default advertising sub-types, in priority order.
pub const SUB_TYPE_KEYWORDS: &[(&str, &str)] = &[("柱", "柱體廣告"), ("外牆", "外牆廣告")];

/// Sub-type for advertising that matched none of `SUB_TYPE_KEYWORDS`.
pub const DEFAULT_SUB_TYPE: &str = "車站/車廂廣告";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Rule<L> {
    pub predicate: Predicate,
    pub label: L,
}

impl<L> Rule<L> {
    pub fn contains<S: Into<String>>(keyword: S, label: L) -> Self {
        Rule {
            predicate: Predicate::Contains(keyword.into()),
            label,
        }
    }
}

/// Returns the label of the first rule whose predicate matches `text`.
fn first_match<'a, L>(rules: &'a [Rule<L>], text: &str) -> Option<&'a L> {
    rules
        .iter()
        .find(|rule| rule.predicate.is_match(text))
        .map(|rule| &rule.label)
}

/// Ordered rules assigning text to a route. Text that no rule matches is
/// `Route::Shared`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RouteRules(pub Vec<Rule<Route>>);

impl Default for RouteRules {
    fn default() -> Self {
        RouteRules(
            ROUTE_KEYWORDS
                .iter()
                .map(|&(keyword, route)| Rule::contains(keyword, route))
                .collect(),
        )
    }
}

impl RouteRules {
    pub fn classify(&self, text: &str) -> Route {
        first_match(&self.0, text)
            .copied()
            .unwrap_or(Route::Shared)
    }
}

/// Ordered rules assigning text to a reporting sub-type, with a fallback.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SubTypeTable {
    pub rules: Vec<Rule<String>>,
    pub fallback: String,
}

impl Default for SubTypeTable {
    fn default() -> Self {
        SubTypeTable {
            rules: SUB_TYPE_KEYWORDS
                .iter()
                .map(|&(keyword, label)| Rule::contains(keyword, label.to_string()))
                .collect(),
            fallback: DEFAULT_SUB_TYPE.to_string(),
        }
    }
}

impl SubTypeTable {
    /// Returns the sub-type for `text` and its rank in the table (rule order,
    /// fallback last).
    pub fn classify(&self, text: &str) -> (usize, &str) {
        self.rules
            .iter()
            .position(|rule| rule.predicate.is_match(text))
            .map(|idx| (idx, self.rules[idx].label.as_str()))
            .unwrap_or((self.rules.len(), self.fallback.as_str()))
    }
}
