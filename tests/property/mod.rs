// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Validation and persistence properties of the registry and allow-lists.

mod registry_properties;
