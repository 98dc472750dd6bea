//! # SchoolHub Theme Engine
//!
//! Core library for theme generation and resolution. It builds validated
//! light/dark palettes from seed colors, serves themes from a set of
//! providers, and resolves the theme to show for a session.
//!
//! ## Modules
//!
//! - [`palette`] - Seed-based palette generation and palette validation
//! - [`theme`] - Theme values and the built-in catalog
//! - [`providers`] - Predefined, catalog, organization, user and dynamic sources
//! - [`cache`] - Time-to-live cache used by the resolver
//! - [`resolver`] - Precedence walk with caching, timeouts and emergency fallback
//! - [`validation`] - The shared `Validator` trait
//! - [`common`] - Error types

pub mod cache;
pub mod common;
pub mod palette;
pub mod providers;
pub mod resolver;
pub mod theme;
pub mod validation;
