//! Test utilities for qtforge unit tests.
//!
//! Provides small catalog and target fixtures so tests can describe a
//! module graph or build environment in one line.
//!
//! # Example
//!
//! ```rust,ignore
//! use qtforge::test_support::{catalog, ids};
//!
//! #[test]
//! fn test_example() {
//!     let catalog = catalog(&[("qtbase", &[]), ("qtsvg", &["qtbase"])]);
//!     assert_eq!(catalog.active_ids(), ids(&["qtbase", "qtsvg"]));
//! }
//! ```

pub mod fixtures;

pub use fixtures::*;
