//! Built-in persona definitions.
//!
//! The default persona is embedded at compile time from the `personas/`
//! directory, so the binary works without any workspace setup. An alternate
//! persona can be supplied at startup with `--persona <file>`.

/// Default teacher persona - used when no persona file is given.
pub const DEFAULT: &str = include_str!("../personas/default.md");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_persona_not_empty() {
        assert!(!DEFAULT.trim().is_empty());
    }

    #[test]
    fn test_default_persona_names_the_character() {
        assert!(DEFAULT.contains("Professor Chalk"));
    }
}
