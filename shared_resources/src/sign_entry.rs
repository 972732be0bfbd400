use std::fmt;

use super::direction::Direction;

/// One lift sign: a location line followed by a direction line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignEntry {
    pub label: String,
    pub direction: Direction,
}

impl SignEntry {
    pub fn new(label: impl Into<String>, direction: Direction) -> Self {
        SignEntry {
            label: label.into(),
            direction,
        }
    }

    /// Lines in the order they are written onto the sign.
    pub fn lines(&self) -> [&str; 2] {
        [self.label.as_str(), self.direction.as_sign_text()]
    }
}

impl fmt::Display for SignEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" - \"{}\"", self.label, self.direction)
    }
}
