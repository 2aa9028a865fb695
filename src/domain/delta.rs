//! Release delta computation
//!
//! Compares a prior release set against a new one. Releases with no equal
//! counterpart are kept as the delta; every release that did match is treated
//! as already satisfied and is pruned from the delta's dependency lists.
//!
//! Removal throughout this module is swap-and-truncate: it is O(1) but does
//! not keep the order of what remains. Dependency lists should be read as
//! sets of chart names.

use super::release::ReleaseSpec;

/// Computes the releases in `from` that have no equal release in `to`
///
/// Dependencies on charts whose release is unchanged are removed from the
/// returned releases. The result keeps the order of `from`.
pub fn compute_releases_delta(from: &[ReleaseSpec], to: &[ReleaseSpec]) -> Vec<ReleaseSpec> {
    let mut changed = Vec::new();
    let mut unchanged = Vec::new();

    for from_release in from {
        match to.iter().find(|to_release| *to_release == from_release) {
            Some(to_release) => unchanged.push(to_release),
            None => changed.push(from_release.clone()),
        }
    }

    log::debug!(
        "Release delta: {} changed, {} unchanged",
        changed.len(),
        unchanged.len()
    );

    unchanged.iter().fold(changed, |delta, satisfied| {
        remove_chart_from_dependencies(delta, &satisfied.chart_name)
    })
}

/// Removes one occurrence of `chart_name` from every release's dependencies
///
/// When a dependency list names the chart more than once, only the last
/// occurrence is removed. Releases without the dependency pass through.
pub fn remove_chart_from_dependencies(
    specs: Vec<ReleaseSpec>,
    chart_name: &str,
) -> Vec<ReleaseSpec> {
    specs
        .into_iter()
        .map(|mut spec| {
            if spec.depends_on(chart_name) {
                let index = match spec.dependencies.iter().rposition(|d| d == chart_name) {
                    Some(index) => index,
                    None => panic!(
                        "dependency {} of {} vanished between lookup and removal",
                        chart_name, spec.release_name
                    ),
                };
                spec.dependencies.swap_remove(index);
            }
            spec
        })
        .collect()
}

/// Returns the index of the last release deploying `chart_name`
///
/// Last match wins: with duplicate chart names the later entry shadows the
/// earlier ones.
pub fn find_chart_index(specs: &[ReleaseSpec], chart_name: &str) -> Option<usize> {
    specs.iter().rposition(|spec| spec.chart_name == chart_name)
}

/// Removes the release at `index`, moving the last release into its slot
///
/// # Panics
///
/// Panics if `index` is out of bounds.
pub fn remove_chart_at(mut specs: Vec<ReleaseSpec>, index: usize) -> Vec<ReleaseSpec> {
    specs.swap_remove(index);
    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn release(chart: &str, version: &str) -> ReleaseSpec {
        ReleaseSpec::for_environment("test", chart, version)
    }

    fn charts(specs: &[ReleaseSpec]) -> Vec<&str> {
        specs.iter().map(|s| s.chart_name.as_str()).collect()
    }

    #[test]
    fn identical_sets_have_no_delta() {
        let releases = vec![
            release("api", "1.0").with_dependencies(["db"]),
            release("db", "2.0"),
        ];

        assert!(compute_releases_delta(&releases, &releases).is_empty());
    }

    #[test]
    fn empty_target_keeps_everything() {
        let releases = vec![
            release("api", "1.0").with_dependencies(["db"]),
            release("db", "2.0"),
            release("web", "3.0"),
        ];

        let delta = compute_releases_delta(&releases, &[]);
        assert_eq!(charts(&delta), vec!["api", "db", "web"]);
        assert_eq!(delta[0].dependencies, vec!["db"]);
    }

    #[test]
    fn empty_source_has_no_delta() {
        let to = vec![release("api", "1.0")];
        assert!(compute_releases_delta(&[], &to).is_empty());
    }

    #[test]
    fn unchanged_dependency_is_pruned() {
        let from = vec![
            release("a", "1").with_dependencies(["b"]),
            release("b", "1"),
        ];
        let to = vec![release("b", "1")];

        let delta = compute_releases_delta(&from, &to);

        assert_eq!(delta.len(), 1);
        assert_eq!(delta[0].chart_name, "a");
        assert!(delta[0].dependencies.is_empty());
    }

    #[test]
    fn changed_dependency_is_kept() {
        let from = vec![
            release("api", "2.0").with_dependencies(["db"]),
            release("db", "5.1"),
        ];
        let to = vec![release("api", "1.0"), release("db", "5.0")];

        let delta = compute_releases_delta(&from, &to);

        assert_eq!(charts(&delta), vec!["api", "db"]);
        assert_eq!(delta[0].dependencies, vec!["db"]);
    }

    #[test]
    fn version_change_marks_release_changed() {
        let from = vec![release("api", "2.0"), release("web", "1.0")];
        let to = vec![release("api", "1.0"), release("web", "1.0")];

        let delta = compute_releases_delta(&from, &to);
        assert_eq!(charts(&delta), vec!["api"]);
    }

    #[test]
    fn environment_change_marks_release_changed() {
        let from = vec![ReleaseSpec::for_environment("prod", "api", "1.0")];
        let to = vec![ReleaseSpec::for_environment("staging", "api", "1.0")];

        assert_eq!(compute_releases_delta(&from, &to).len(), 1);
    }

    #[test]
    fn unchanged_release_outside_dependency_lists_is_harmless() {
        let from = vec![release("api", "2.0").with_dependencies(["db"]), release("web", "1.0")];
        let to = vec![release("web", "1.0")];

        let delta = compute_releases_delta(&from, &to);
        assert_eq!(charts(&delta), vec!["api"]);
        assert_eq!(delta[0].dependencies, vec!["db"]);
    }

    #[test]
    fn delta_keeps_source_order() {
        let from = vec![release("c", "1"), release("a", "1"), release("b", "1")];
        let delta = compute_releases_delta(&from, &[release("a", "1")]);
        assert_eq!(charts(&delta), vec!["c", "b"]);
    }

    #[test]
    fn pruner_swaps_and_truncates() {
        let specs = vec![release("api", "1").with_dependencies(["x", "b", "y"])];

        let pruned = remove_chart_from_dependencies(specs, "b");

        let deps: HashSet<_> = pruned[0].dependencies.iter().map(String::as_str).collect();
        assert_eq!(pruned[0].dependencies.len(), 2);
        assert_eq!(deps, HashSet::from(["x", "y"]));
    }

    #[test]
    fn pruner_removes_only_last_duplicate() {
        let specs = vec![release("api", "1").with_dependencies(["b", "x", "b"])];

        let pruned = remove_chart_from_dependencies(specs, "b");

        assert_eq!(pruned[0].dependencies, vec!["b", "x"]);
    }

    #[test]
    fn pruner_passes_through_unrelated_releases() {
        let specs = vec![
            release("api", "1").with_dependencies(["db"]),
            release("web", "1").with_dependencies(["api"]),
        ];

        let pruned = remove_chart_from_dependencies(specs, "db");

        assert!(pruned[0].dependencies.is_empty());
        assert_eq!(pruned[1].dependencies, vec!["api"]);
    }

    #[test]
    fn find_chart_index_prefers_last_match() {
        let specs = vec![release("api", "1"), release("db", "1"), release("api", "2")];

        assert_eq!(find_chart_index(&specs, "api"), Some(2));
        assert_eq!(find_chart_index(&specs, "db"), Some(1));
        assert_eq!(find_chart_index(&specs, "web"), None);
    }

    #[test]
    fn remove_chart_at_swaps_last_into_place() {
        let specs = vec![release("a", "1"), release("b", "1"), release("c", "1")];

        let remaining = remove_chart_at(specs, 0);

        assert_eq!(charts(&remaining), vec!["c", "b"]);
    }

    #[test]
    #[should_panic]
    fn remove_chart_at_out_of_bounds_panics() {
        remove_chart_at(vec![release("a", "1")], 3);
    }

    fn arb_releases() -> impl Strategy<Value = Vec<ReleaseSpec>> {
        let entry = ("[0-9]\\.[0-9]", prop::collection::vec("[a-z]{1,8}", 0..4));
        prop::collection::btree_map("[a-z]{1,8}", entry, 0..12).prop_map(|charts| {
            charts
                .into_iter()
                .map(|(chart, (version, deps))| release(&chart, &version).with_dependencies(deps))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn delta_against_itself_is_empty(releases in arb_releases()) {
            prop_assert!(compute_releases_delta(&releases, &releases).is_empty());
        }

        #[test]
        fn delta_against_nothing_is_identity(releases in arb_releases()) {
            let delta = compute_releases_delta(&releases, &[]);
            prop_assert_eq!(delta.len(), releases.len());
            for (got, expected) in delta.iter().zip(&releases) {
                prop_assert_eq!(got, expected);
                prop_assert_eq!(&got.dependencies, &expected.dependencies);
            }
        }

        #[test]
        fn pruning_removes_exactly_one_occurrence(
            deps in prop::collection::vec("[a-c]", 0..8),
            target in "[a-c]",
        ) {
            let before = deps.iter().filter(|d| **d == target).count();
            let pruned = remove_chart_from_dependencies(
                vec![release("api", "1").with_dependencies(deps.clone())],
                &target,
            );
            let after = pruned[0].dependencies.iter().filter(|d| **d == target).count();

            prop_assert_eq!(after, before.saturating_sub(1));
            prop_assert_eq!(pruned[0].dependencies.len(), deps.len() - (before - after));
        }
    }
}
