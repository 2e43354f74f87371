//! Leftover computation: what the previous build produced that this one didn't.

use std::collections::HashSet;

use scour_common::{is_source_map_category, normalize_separators};

use crate::manifest::Manifest;

/// Knobs that shape the leftover set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOptions {
    /// Whether the current run emits source maps. When `false`, every
    /// previously recorded map is a leftover.
    pub source_maps: bool,
    /// Restricts leftovers to these categories when set.
    pub categories: Option<Vec<String>>,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            source_maps: true,
            categories: None,
        }
    }
}

impl DiffOptions {
    fn allows(&self, category: &str) -> bool {
        self.categories
            .as_ref()
            .map_or(true, |allowed| allowed.iter().any(|c| c == category))
    }
}

/// Computes the leftover set: per category of `previous`, the paths that are
/// not in the same category of `current`.
///
/// Categories only present in `current` contribute nothing, and categories
/// with nothing left over are omitted. Paths are compared after separator
/// normalization and each stale path is reported once, in the order
/// `previous` lists it.
pub fn diff(previous: &Manifest, current: &Manifest, options: &DiffOptions) -> Manifest {
    previous
        .categories()
        .filter(|(category, _)| options.allows(category))
        .fold(Manifest::new(), |leftovers, (category, prev_paths)| {
            let stale: Vec<String> = if !options.source_maps && is_source_map_category(category) {
                prev_paths.iter().map(|p| normalize_separators(p)).collect()
            } else {
                let produced: HashSet<String> = current
                    .get(category)
                    .unwrap_or_default()
                    .iter()
                    .map(|p| normalize_separators(p))
                    .collect();
                let mut seen = HashSet::new();
                prev_paths
                    .iter()
                    .map(|p| normalize_separators(p))
                    .filter(|p| !produced.contains(p) && seen.insert(p.clone()))
                    .collect()
            };

            if stale.is_empty() {
                leftovers
            } else {
                leftovers.with_category(category, stale)
            }
        })
}

/// Drops from `leftovers` every path that `current` still produces under
/// any category, so a file that only moved between categories is kept.
///
/// With source maps disabled, the map categories of `current` don't count as
/// produced: those maps are being retired.
pub fn spare_produced(leftovers: &Manifest, current: &Manifest, options: &DiffOptions) -> Manifest {
    let produced: HashSet<String> = current
        .categories()
        .filter(|(category, _)| options.source_maps || !is_source_map_category(category))
        .flat_map(|(_, paths)| paths.iter().map(|p| normalize_separators(p)))
        .collect();

    leftovers
        .categories()
        .fold(Manifest::new(), |kept, (category, paths)| {
            let stale: Vec<String> = paths
                .iter()
                .map(|p| normalize_separators(p))
                .filter(|p| !produced.contains(p))
                .collect();
            if stale.is_empty() {
                kept
            } else {
                kept.with_category(category, stale)
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn js(paths: &[&str]) -> Manifest {
        Manifest::new().with_category("javascripts", paths.iter().copied())
    }

    #[test]
    fn removed_file_is_leftover() {
        let prev = js(&["app.js", "vendor.js"]);
        let curr = js(&["app.js"]);
        let left = diff(&prev, &curr, &DiffOptions::default());
        assert_eq!(left, js(&["vendor.js"]));
    }

    #[test]
    fn unchanged_output_has_no_leftovers() {
        let m = js(&["app.js", "vendor.js"]);
        assert!(diff(&m, &m, &DiffOptions::default()).is_empty());
    }

    #[test]
    fn first_run_has_no_leftovers() {
        let left = diff(&Manifest::new(), &js(&["app.js"]), &DiffOptions::default());
        assert!(left.is_empty());
    }

    #[test]
    fn current_only_categories_contribute_nothing() {
        let prev = js(&["app.js"]);
        let curr = js(&["app.js"]).with_path("stylesheets", "app.css");
        assert!(diff(&prev, &curr, &DiffOptions::default()).is_empty());
    }

    #[test]
    fn category_missing_from_current_is_all_leftover() {
        let prev = js(&["app.js"]).with_path("stylesheets", "app.css");
        let curr = js(&["app.js"]);
        let left = diff(&prev, &curr, &DiffOptions::default());
        assert_eq!(left, Manifest::new().with_path("stylesheets", "app.css"));
    }

    #[test]
    fn comparison_is_per_category() {
        // The same path moving categories counts as stale in its old one.
        let prev = Manifest::new().with_path("assets", "app.js");
        let curr = js(&["app.js"]);
        let left = diff(&prev, &curr, &DiffOptions::default());
        assert_eq!(left, Manifest::new().with_path("assets", "app.js"));
    }

    #[test]
    fn spare_produced_keeps_paths_that_moved_category() {
        let prev = Manifest::new().with_category("assets", ["index.html", "old.png"]);
        let curr = Manifest::new().with_path("compiled-assets", "index.html");
        let options = DiffOptions::default();

        let left = spare_produced(&diff(&prev, &curr, &options), &curr, &options);

        assert_eq!(left, Manifest::new().with_path("assets", "old.png"));
    }

    #[test]
    fn spare_produced_compares_normalized_separators() {
        let left = Manifest::new().with_path("assets", "img/logo.png");
        let curr = Manifest::new().with_path("compiled-assets", "img\\logo.png");
        assert!(spare_produced(&left, &curr, &DiffOptions::default()).is_empty());
    }

    #[test]
    fn spare_produced_ignores_current_maps_when_disabled() {
        let prev = Manifest::new().with_category("javascript-maps", ["app.js.map"]);
        let curr = js(&["app.js"]).with_category("javascript-maps", ["app.js.map"]);
        let options = DiffOptions {
            source_maps: false,
            categories: None,
        };

        let left = spare_produced(&diff(&prev, &curr, &options), &curr, &options);

        assert_eq!(left, prev);
    }

    #[test]
    fn duplicates_reported_once() {
        let prev = js(&["old.js", "old.js", "app.js"]);
        let curr = js(&["app.js"]);
        let left = diff(&prev, &curr, &DiffOptions::default());
        assert_eq!(left, js(&["old.js"]));
    }

    #[test]
    fn separators_are_normalized() {
        let prev = js(&["js\\app.js", "js\\old.js"]);
        let curr = js(&["js/app.js"]);
        let left = diff(&prev, &curr, &DiffOptions::default());
        assert_eq!(left, js(&["js/old.js"]));
    }

    #[test]
    fn disabled_source_maps_clean_all_previous_maps() {
        let prev = js(&["app.js"]).with_category("javascript-maps", ["app.js.map"]);
        let curr = js(&["app.js"]).with_category("javascript-maps", ["app.js.map"]);
        let options = DiffOptions {
            source_maps: false,
            categories: None,
        };
        let left = diff(&prev, &curr, &options);
        assert_eq!(
            left,
            Manifest::new().with_category("javascript-maps", ["app.js.map"])
        );
    }

    #[test]
    fn disabled_source_maps_clean_maps_missing_from_current() {
        let prev = Manifest::new().with_category("javascripts-maps", ["app.js.map"]);
        let options = DiffOptions {
            source_maps: false,
            categories: None,
        };
        let left = diff(&prev, &Manifest::new(), &options);
        assert_eq!(left.get("javascripts-maps").unwrap(), ["app.js.map"]);
    }

    #[test]
    fn enabled_source_maps_diff_normally() {
        let prev = Manifest::new().with_category("javascript-maps", ["app.js.map", "old.js.map"]);
        let curr = Manifest::new().with_category("javascript-maps", ["app.js.map"]);
        let left = diff(&prev, &curr, &DiffOptions::default());
        assert_eq!(left.get("javascript-maps").unwrap(), ["old.js.map"]);
    }

    #[test]
    fn category_filter_limits_leftovers() {
        let prev = js(&["old.js"]).with_path("assets", "old.png");
        let options = DiffOptions {
            source_maps: true,
            categories: Some(vec!["assets".to_string()]),
        };
        let left = diff(&prev, &Manifest::new(), &options);
        assert_eq!(left, Manifest::new().with_path("assets", "old.png"));
    }

    #[test]
    fn empty_filter_allows_nothing() {
        let prev = js(&["old.js"]);
        let options = DiffOptions {
            source_maps: true,
            categories: Some(Vec::new()),
        };
        assert!(diff(&prev, &Manifest::new(), &options).is_empty());
    }
}
