//! Shared identifiers

use std::fmt;

/// Which of the two merge inputs a record or stream belongs to.
///
/// `Left` is the first input and wins ties against `Right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// First input file
    Left,
    /// Second input file
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "first input"),
            Side::Right => write!(f, "second input"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_input() {
        assert_eq!(Side::Left.to_string(), "first input");
        assert_eq!(Side::Right.to_string(), "second input");
    }
}
