//! Output file naming

/// Longest stem kept from the description, in characters
pub const MAX_STEM_CHARS: usize = 30;

/// Derive the output file name from a function description
///
/// Lowercases, keeps only alphanumerics and whitespace, turns spaces into
/// underscores, truncates to [`MAX_STEM_CHARS`] and appends `.extension`.
pub fn build_filename(description: &str, extension: &str) -> String {
    let stem: String = description
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .map(|c| if c == ' ' { '_' } else { c })
        .take(MAX_STEM_CHARS)
        .collect();

    format!("{}.{}", stem, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_build_filename_basic() {
        assert_eq!(
            build_filename("Calculates the factorial of a number", "py"),
            "calculates_the_factorial_of_a_.py"
        );
    }

    #[test]
    fn test_build_filename_strips_punctuation() {
        assert_eq!(build_filename("Reverse a string, please!", "py"), "reverse_a_string_please.py");
    }

    #[test]
    fn test_build_filename_short() {
        assert_eq!(build_filename("adds", "rs"), "adds.rs");
    }

    #[test]
    fn test_build_filename_only_punctuation() {
        assert_eq!(build_filename("?!", "py"), ".py");
    }

    proptest! {
        #[test]
        fn prop_filename_respects_rules(description in ".{0,80}") {
            let name = build_filename(&description, "py");
            let stem = name.strip_suffix(".py").unwrap();

            prop_assert!(stem.chars().count() <= MAX_STEM_CHARS);
            prop_assert!(!stem.contains(' '));
            prop_assert!(stem.chars().all(|c| c == '_' || c.is_alphanumeric() || c.is_whitespace()));
        }

        #[test]
        fn prop_filename_is_stable_for_clean_input(description in "[a-z ]{0,30}") {
            let name = build_filename(&description, "py");
            prop_assert_eq!(name, format!("{}.py", description.replace(' ', "_")));
        }
    }
}
