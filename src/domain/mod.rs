// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Domain Models
//!
//! Core domain concepts for the server inventory: the allow-list categories,
//! server records, and the pure validation rules applied to request payloads
//! before any store access.
//!
//! # Value Objects with Invariants
//!
//! - [`Hostname`] - primary key of a server record
//! - [`Category`] - allow-list taxonomy (environment, solution, system, os, tags)
//!
//! # Records
//!
//! - [`ServerRecord`] - a machine in the inventory
//! - [`ServerFields`] - the mutable, allow-list constrained part of a record
//! - [`AllowLists`] - accepted values for every category

pub mod category;
pub mod hostname;
pub mod invariants;
pub mod server;

pub use category::Category;
pub use hostname::{Hostname, HostnameError};
pub use invariants::{Payload, ValidationError, ValidationResult};
pub use server::{AllowLists, ServerFields, ServerRecord};
