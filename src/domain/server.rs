// Copyright (c) 2025 - Cowboy AI, Inc.
//! Server Inventory Records

use serde::{Deserialize, Serialize};

use super::Category;

/// Mutable, allow-list constrained fields of a server record
///
/// An update replaces all of these at once: a `None` here clears the
/// corresponding column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerFields {
    pub environment: Option<String>,
    pub solution: Option<String>,
    pub system: Option<String>,
    pub os: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl ServerFields {
    /// Value of a single-valued classifying field
    ///
    /// Returns `None` for [`Category::Tags`]; use [`ServerFields::tags`] for those.
    pub fn classifying(&self, category: Category) -> Option<&str> {
        match category {
            Category::Environment => self.environment.as_deref(),
            Category::Solution => self.solution.as_deref(),
            Category::System => self.system.as_deref(),
            Category::Os => self.os.as_deref(),
            Category::Tags => None,
        }
    }

    /// Set a single-valued classifying field; tags are ignored
    pub fn set_classifying(&mut self, category: Category, value: Option<String>) {
        match category {
            Category::Environment => self.environment = value,
            Category::Solution => self.solution = value,
            Category::System => self.system = value,
            Category::Os => self.os = value,
            Category::Tags => {}
        }
    }
}

/// A machine in the inventory, keyed by hostname
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRecord {
    pub hostname: String,
    pub environment: Option<String>,
    pub solution: Option<String>,
    pub system: Option<String>,
    pub os: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl ServerRecord {
    /// Assemble a record from its key and validated fields
    pub fn new(hostname: impl Into<String>, fields: ServerFields) -> Self {
        Self {
            hostname: hostname.into(),
            environment: fields.environment,
            solution: fields.solution,
            system: fields.system,
            os: fields.os,
            tags: fields.tags,
        }
    }

    /// Split off the mutable fields
    pub fn fields(&self) -> ServerFields {
        ServerFields {
            environment: self.environment.clone(),
            solution: self.solution.clone(),
            system: self.system.clone(),
            os: self.os.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Accepted values for every category, in storage order
///
/// Serializes as `{"environment": [...], "solution": [...], ...}` with the
/// keys in [`Category::ALL`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowLists {
    pub environment: Vec<String>,
    pub solution: Vec<String>,
    pub system: Vec<String>,
    pub os: Vec<String>,
    pub tags: Vec<String>,
}

impl AllowLists {
    /// Values registered for one category
    pub fn values(&self, category: Category) -> &[String] {
        match category {
            Category::Environment => &self.environment,
            Category::Solution => &self.solution,
            Category::System => &self.system,
            Category::Os => &self.os,
            Category::Tags => &self.tags,
        }
    }

    /// Replace the values of one category
    pub fn set_values(&mut self, category: Category, values: Vec<String>) {
        match category {
            Category::Environment => self.environment = values,
            Category::Solution => self.solution = values,
            Category::System => self.system = values,
            Category::Os => self.os = values,
            Category::Tags => self.tags = values,
        }
    }
}
