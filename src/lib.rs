//! tokmerge - design token merging
//!
//! Folds colors extracted from a design-file export into a namespaced section
//! of a token document, and renders token documents as CSS custom properties.

pub mod config;
pub mod css;
pub mod driver;
pub mod error;
pub mod extract;
pub mod merge;
pub mod namespace;
pub mod normalize;
pub mod store;
pub mod token;

pub use error::{Result, TokenError};
