use std::fmt;

#[cfg(test)]
use anyhow::Result;
use serde::{de, ser};
use serde_derive::{Deserialize, Serialize};

/// A test against a piece of classification text.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub enum Predicate {
    All(Vec<Predicate>),
    Any(Vec<Predicate>),
    AsLower(Box<Predicate>),
    Contains(String),
    Eq(String),
    Matches(Regex),
    Not(Box<Predicate>),
    True,
}

impl Predicate {
    pub fn is_match(&self, text: &str) -> bool {
        use Predicate::*;
        match self {
            True => true,
            All(preds) => preds.iter().all(|p| p.is_match(text)),
            Any(preds) => preds.iter().any(|p| p.is_match(text)),
            AsLower(pred) => pred.is_match(&text.to_lowercase()),
            Contains(want) => text.contains(want.as_str()),
            Eq(want) => want == text,
            Matches(regex) => regex.0.is_match(text),
            Not(pred) => !pred.is_match(text),
        }
    }

    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        ron::de::from_str(s).map_err(Into::into)
    }
}

#[derive(Clone, Debug)]
pub struct Regex(regex::Regex);

impl ser::Serialize for Regex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> de::Deserialize<'de> for Regex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(RegexVisitor)
    }
}

struct RegexVisitor;

impl<'de> de::Visitor<'de> for RegexVisitor {
    type Value = Regex;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a string containing a regular expression")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        regex::Regex::new(v)
            .map(Regex)
            .map_err(|e| E::custom(format!("{}", e)))
    }
}
