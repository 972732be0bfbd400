use std::fmt;

/// Call direction printed on the second line of a lift sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_sign_text(self) -> &'static str {
        match self {
            Direction::Up => "[Lift Up]",
            Direction::Down => "[Lift Down]",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sign_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_text_matches_lift_sign_syntax() {
        assert_eq!(Direction::Up.as_sign_text(), "[Lift Up]");
        assert_eq!(Direction::Down.to_string(), "[Lift Down]");
    }
}
