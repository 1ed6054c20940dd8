//! Property-based tests for path containment functions.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{is_contained_relative, is_safe_pathspec};
    use proptest::prelude::*;
    use std::path::Path;

    proptest! {
        /// Property: any path built from plain components is a safe pathspec
        #[test]
        fn plain_relative_paths_are_safe(
            components in prop::collection::vec("[a-zA-Z0-9_.-]{1,12}", 1..6)
        ) {
            // ".." can still arise from the generator; such paths are the
            // unsafe case and are covered below
            prop_assume!(components.iter().all(|c| c != ".." && c != "."));
            let path = components.join("/");
            prop_assert!(is_safe_pathspec(&path), "expected '{}' to be safe", path);
        }

        /// Property: inserting a parent-traversal component anywhere makes
        /// the path unsafe
        #[test]
        fn parent_traversal_is_always_unsafe(
            prefix in prop::collection::vec("[a-zA-Z0-9_]{1,8}", 0..4),
            suffix in prop::collection::vec("[a-zA-Z0-9_]{1,8}", 0..4)
        ) {
            let mut components: Vec<String> = prefix;
            components.push("..".to_string());
            components.extend(suffix);
            let path = components.join("/");
            prop_assert!(!is_safe_pathspec(&path), "expected '{}' to be unsafe", path);
        }

        /// Property: absolute paths are never safe pathspecs
        #[test]
        fn absolute_paths_are_unsafe(rest in "[a-zA-Z0-9_/.-]{0,32}") {
            let path = format!("/{}", rest);
            prop_assert!(!is_safe_pathspec(&path));
        }

        /// Property: the check is deterministic (same input = same output)
        #[test]
        fn containment_check_is_deterministic(input in ".{0,64}") {
            let first = is_safe_pathspec(&input);
            let second = is_safe_pathspec(&input);
            prop_assert_eq!(first, second);
        }

        /// Property: a contained path stays contained when nested deeper
        #[test]
        fn nesting_preserves_containment(
            base in "[a-zA-Z0-9_]{1,8}",
            child in "[a-zA-Z0-9_]{1,8}"
        ) {
            let base_path = Path::new(&base).to_path_buf();
            prop_assume!(is_contained_relative(&base_path));
            let nested = base_path.join(&child);
            prop_assert!(is_contained_relative(&nested));
        }
    }
}
