//! Display initials derived from a user's name

const MAX_WORDS: usize = 2;

/// Derive initials from a display name.
///
/// Takes the first character of each of the first two whitespace-separated
/// words and uppercases it. A blank name yields an empty string.
pub fn derive_initials(name: &str) -> String {
    name.split_whitespace()
        .take(MAX_WORDS)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_words() {
        assert_eq!(derive_initials("Jane Doe"), "JD");
    }

    #[test]
    fn test_lowercase_is_uppercased() {
        assert_eq!(derive_initials("jane doe"), "JD");
    }

    #[test]
    fn test_single_word() {
        assert_eq!(derive_initials("Cher"), "C");
    }

    #[test]
    fn test_more_than_two_words() {
        assert_eq!(derive_initials("Mary Jane Watson"), "MJ");
    }

    #[test]
    fn test_extra_whitespace() {
        assert_eq!(derive_initials("   ada \t  lovelace  "), "AL");
    }

    #[test]
    fn test_blank_name() {
        assert_eq!(derive_initials(""), "");
        assert_eq!(derive_initials("   "), "");
    }

    #[test]
    fn test_unicode() {
        assert_eq!(derive_initials("élodie ölund"), "ÉÖ");
    }
}
