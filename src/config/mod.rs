//! Report configuration, read from RON.

use std::collections::HashSet;

use anyhow::{Context, Result};
use serde_derive::{Deserialize, Serialize};

use crate::filespec::FileSpec;
use crate::layout::ColumnLayout;
use crate::route::Route;
use crate::rules::{RouteRules, SubTypeTable};

pub mod cmd;

pub const ADVERTISING: &str = "廣告收入";
pub const PASSENGER: &str = "客運收入";
pub const LEASE: &str = "租賃收入";
pub const SUBSIDY: &str = "政府補助收入";
pub const MISCELLANEOUS: &str = "什項營業收入";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("category keywords must not be empty")]
    EmptyKeyword,
    #[error("category {keyword:?} is configured more than once")]
    DuplicateCategory { keyword: String },
    #[error("category {keyword:?} must split shared amounts between two distinct named routes")]
    InvalidSplit { keyword: String },
    #[error("layout.search_columns must be at least 1")]
    NoSearchColumns,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub layout: ColumnLayout,
    pub routes: RouteRules,
    /// Appended to the category keyword to label its net amount column.
    pub net_label_suffix: String,
    pub categories: Vec<CategorySpec>,
}

/// A revenue category and the extra processing it receives.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CategorySpec {
    pub keyword: String,
    /// Routes that receive half each of every shared amount.
    #[serde(default)]
    pub split_shared: Option<(Route, Route)>,
    /// Reporting sub-types cross-tabulated against routes.
    #[serde(default)]
    pub sub_types: Option<SubTypeTable>,
}

impl CategorySpec {
    pub fn plain<S: Into<String>>(keyword: S) -> Self {
        CategorySpec {
            keyword: keyword.into(),
            split_shared: None,
            sub_types: None,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.keyword.is_empty() {
            return Err(ConfigError::EmptyKeyword);
        }
        if let Some((a, b)) = self.split_shared {
            if a == b || a == Route::Shared || b == Route::Shared {
                return Err(ConfigError::InvalidSplit {
                    keyword: self.keyword.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            layout: ColumnLayout::default(),
            routes: RouteRules::default(),
            net_label_suffix: "淨額".to_string(),
            categories: vec![
                CategorySpec {
                    sub_types: Some(SubTypeTable::default()),
                    ..CategorySpec::plain(ADVERTISING)
                },
                CategorySpec {
                    split_shared: Some((Route::Danhai, Route::Ankeng)),
                    ..CategorySpec::plain(PASSENGER)
                },
                CategorySpec::plain(LEASE),
                CategorySpec::plain(SUBSIDY),
                CategorySpec::plain(MISCELLANEOUS),
            ],
        }
    }
}

impl Config {
    /// Reads the config from `file_spec`, or returns the defaults if none is
    /// given.
    pub fn load(file_spec: Option<&FileSpec>) -> Result<Self> {
        match file_spec {
            Some(file_spec) => Self::from_filespec(file_spec),
            None => Ok(Self::default()),
        }
    }

    pub fn from_filespec(file_spec: &FileSpec) -> Result<Self> {
        let reader = file_spec.reader()?;
        let config: Config =
            ron::de::from_reader(reader).with_context(|| format!("parsing {}", file_spec))?;
        config
            .validate()
            .with_context(|| format!("validating {}", file_spec))?;
        Ok(config)
    }

    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        let config: Config = ron::de::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron(&self) -> Result<String> {
        let pretty = ron::ser::PrettyConfig::new().struct_names(true);
        ron::ser::to_string_pretty(self, pretty).map_err(Into::into)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.search_columns == 0 {
            return Err(ConfigError::NoSearchColumns);
        }
        let mut seen = HashSet::new();
        for category in &self.categories {
            category.validate()?;
            if !seen.insert(category.keyword.as_str()) {
                return Err(ConfigError::DuplicateCategory {
                    keyword: category.keyword.clone(),
                });
            }
        }
        Ok(())
    }

    /// The categories named by `keywords`, or all configured categories if
    /// `keywords` is empty. Unconfigured keywords get plain processing.
    pub fn select(&self, keywords: &[String]) -> Result<Vec<CategorySpec>, ConfigError> {
        if keywords.is_empty() {
            return Ok(self.categories.clone());
        }
        keywords
            .iter()
            .map(|keyword| {
                let category = self
                    .categories
                    .iter()
                    .find(|c| &c.keyword == keyword)
                    .cloned()
                    .unwrap_or_else(|| CategorySpec::plain(keyword.as_str()));
                category.validate()?;
                Ok(category)
            })
            .collect()
    }

    pub fn net_label(&self, keyword: &str) -> String {
        format!("{}{}", keyword, self.net_label_suffix)
    }
}
