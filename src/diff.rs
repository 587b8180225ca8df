//! Unified diffs between a file and the model's proposal

use similar::TextDiff;

pub const NO_CHANGES: &str = "No changes proposed.";

/// Line diff of `original` against `proposed`, fenced as a `diff` block.
pub fn generate_diff(original: &str, proposed: &str) -> String {
    let diff = TextDiff::from_lines(original, proposed);
    let body = diff
        .unified_diff()
        .context_radius(3)
        .header("original", "new")
        .to_string();

    if body.is_empty() {
        return NO_CHANGES.to_string();
    }

    format!("```diff\n{}```", body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_changes() {
        let original = "print('hi')\n";
        assert_eq!(generate_diff(original, original), NO_CHANGES);
    }

    #[test]
    fn test_with_changes() {
        let diff = generate_diff("print('hi')\n", "print('hello')\n");
        assert!(diff.starts_with("```diff\n"));
        assert!(diff.contains("--- original"));
        assert!(diff.contains("+++ new"));
        assert!(diff.contains("-print('hi')"));
        assert!(diff.contains("+print('hello')"));
        assert!(diff.ends_with("```"));
    }

    #[test]
    fn test_new_file() {
        let diff = generate_diff("", "fn main() {}\n");
        assert!(diff.contains("+fn main() {}"));
    }
}
