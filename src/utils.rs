//! Common small functions used throughout the crate

use itertools::Itertools;
use std::fmt::Display;

// Alias for the format! macro out of laziness
pub use std::format as f;

/// Join anything displayable into a single space separated string
///
/// ```rust
/// # use halfspace::utils::space_separated;
/// assert_eq!(space_separated(&[1, -2, 3]), "1 -2 3".to_string());
/// ```
pub fn space_separated<T: Display>(items: &[T]) -> String {
    items.iter().join(" ")
}
