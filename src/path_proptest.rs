//! Property-based tests for relative path computation.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{normalize, relative_between};
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn absolute(segments: &[String]) -> PathBuf {
        let mut path = PathBuf::from("/");
        for segment in segments {
            path.push(segment);
        }
        path
    }

    fn segments() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-z]{1,6}", 0..6)
    }

    proptest! {
        /// Walking up `ascend` steps from base and down `descend` reaches target
        #[test]
        fn relative_walk_reaches_target(base in segments(), target in segments()) {
            let base = absolute(&base);
            let target = absolute(&target);
            let relative = relative_between(&base, &target).unwrap();
            let walked = normalize(&base.join(relative.to_path()));
            prop_assert_eq!(walked, target);
        }

        /// The common directory is an ancestor of both paths
        #[test]
        fn common_is_shared_ancestor(base in segments(), target in segments()) {
            let base = absolute(&base);
            let target = absolute(&target);
            let relative = relative_between(&base, &target).unwrap();
            prop_assert!(base.starts_with(&relative.common));
            prop_assert!(target.starts_with(&relative.common));
            prop_assert_eq!(
                base.components().count() - relative.ascend,
                relative.common.components().count()
            );
        }

        /// Swapping base and target swaps ascend and descend lengths
        #[test]
        fn relative_is_symmetric(base in segments(), target in segments()) {
            let base = absolute(&base);
            let target = absolute(&target);
            let forward = relative_between(&base, &target).unwrap();
            let backward = relative_between(&target, &base).unwrap();
            prop_assert_eq!(forward.ascend, backward.descend.len());
            prop_assert_eq!(forward.descend.len(), backward.ascend);
            prop_assert_eq!(forward.common, backward.common);
        }

        /// Normalizing is idempotent
        #[test]
        fn normalize_is_idempotent(parts in prop::collection::vec("[a-z]{1,3}|\\.|\\.\\.", 0..8)) {
            let path = absolute(&parts);
            let once = normalize(&path);
            prop_assert_eq!(normalize(&once), once);
        }
    }
}
