//! Token classification.
//!
//! Decides which tokens inside a condition or effect are literals or operators
//! (never graph nodes) and which name referenceable state.

/// Conditions the game computes itself. They can be read but never set, so
/// they are never graphed as variables.
pub const READ_ONLY_CONDITIONS: &[&str] = &[
    "random",
    "net worth",
    "cargo space",
    "passenger space",
    "flagship crew",
    "flagship required crew",
    "flagship bunks",
    "cargo attractiveness",
    "armament deterrence",
    "pirate attraction",
    "day",
    "month",
    "year",
];

const ARITHMETIC_OPERATORS: &[&str] = &["+", "-", "*", "/", "%"];

pub fn is_read_only(token: &str) -> bool {
    READ_ONLY_CONDITIONS.contains(&token)
}

/// True for numeric literals (optionally negative), arithmetic operators, and
/// read-only conditions.
pub fn is_terminal_value(token: &str) -> bool {
    is_numeric(token) || ARITHMETIC_OPERATORS.contains(&token) || is_read_only(token)
}

fn is_numeric(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_and_operators_are_terminal() {
        for token in ["0", "42", "-7", "+", "-", "*", "/", "%"] {
            assert!(is_terminal_value(token), "{token} should be terminal");
        }
    }

    #[test]
    fn read_only_conditions_are_terminal() {
        assert!(is_terminal_value("cargo space"));
        assert!(is_terminal_value("year"));
        assert!(is_read_only("random"));
    }

    #[test]
    fn variables_are_not_terminal() {
        for token in ["reputation: Republic", "--", "1.5", "x1", "", "combat rating"] {
            assert!(!is_terminal_value(token), "{token:?} should not be terminal");
        }
    }
}
