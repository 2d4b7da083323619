//! Arithmetic and greeting helpers

use std::io::{self, Write};

/// Integer addition, widened so that no pair of `i64` operands can overflow
pub fn add(x: i64, y: i64) -> i128 {
    i128::from(x) + i128::from(y)
}

/// Write `Hello {name}` to `out` and return the length of `name` in characters
pub fn greet_to<W: Write>(out: &mut W, name: &str) -> io::Result<usize> {
    writeln!(out, "Hello {}", name)?;
    Ok(name.chars().count())
}

/// Print `Hello {name}` to stdout and return the length of `name` in characters
pub fn greet(name: &str) -> usize {
    println!("Hello {}", name);
    name.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() {
        let cases = [(1, 1, 2), (5, -1, 4), (0, 0, 0), (-3, -4, -7)];
        for (x, y, expected) in cases {
            assert_eq!(add(x, y), expected, "add({}, {})", x, y);
        }
    }

    #[test]
    fn test_add_at_i64_bounds() {
        assert_eq!(add(i64::MAX, 1), i128::from(i64::MAX) + 1);
        assert_eq!(add(i64::MIN, -1), i128::from(i64::MIN) - 1);
        assert_eq!(add(i64::MAX, i64::MIN), -1);
    }

    #[test]
    fn test_greet_returns_name_length() {
        let mut out = Vec::new();
        let length = greet_to(&mut out, "Python").unwrap();
        assert_eq!(length, 6);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Hello Python\n");
    }

    #[test]
    fn test_greet_counts_characters() {
        let mut out = Vec::new();
        assert_eq!(greet_to(&mut out, "Zoë").unwrap(), 3);
        assert_eq!(greet("Pyth"), 4);
    }
}
