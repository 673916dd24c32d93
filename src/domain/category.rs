// Copyright (c) 2025 - Cowboy AI, Inc.
//! Classifying Field Categories
//!
//! Each category names one allow-list. The four single-valued classifying
//! fields of a server record plus the multi-valued tag set share the same
//! vocabulary model: a category owns a set of accepted string values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::InventoryError;

/// Allow-list category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Deployment environment (prod, dev, ...)
    Environment,
    /// Business solution the server belongs to
    Solution,
    /// System within the solution
    System,
    /// Operating system
    Os,
    /// Free-form labels, many per server
    Tags,
}

impl Category {
    /// Every category, in validation and listing order
    pub const ALL: [Category; 5] = [
        Category::Environment,
        Category::Solution,
        Category::System,
        Category::Os,
        Category::Tags,
    ];

    /// The single-valued categories, in validation order
    pub const CLASSIFYING: [Category; 4] = [
        Category::Environment,
        Category::Solution,
        Category::System,
        Category::Os,
    ];

    /// Canonical name, also the JSON key and the allow-list column name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Environment => "environment",
            Self::Solution => "solution",
            Self::System => "system",
            Self::Os => "os",
            Self::Tags => "tags",
        }
    }

    /// Name of the table holding this category's allow-list
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Environment => "possible_environment",
            Self::Solution => "possible_solution",
            Self::System => "possible_system",
            Self::Os => "possible_os",
            Self::Tags => "possible_tags",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = InventoryError;

    /// Strict parse; only the five canonical names are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| InventoryError::InvalidCategory(s.to_string()))
    }
}
