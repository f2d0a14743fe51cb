use crate::model::IgnoreTable;
use globset::{GlobBuilder, GlobSetBuilder};

/// Drop names covered by any applicable ignore pattern.
///
/// Wildcard-scope and package-scope patterns apply as a union. With no
/// applicable patterns the input comes back untouched: same order, same
/// casing, duplicates preserved. Glob semantics are `globset` defaults, so
/// `*` does not cross `/` and `@babel/*` matches `@babel/core` while a bare
/// `*` does not.
pub fn filter(names: &[String], pkg_name: &str, table: &IgnoreTable) -> Vec<String> {
    let patterns = table.effective_patterns(pkg_name);
    if patterns.is_empty() {
        return names.to_vec();
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in &patterns {
        // Patterns are validated during config resolution; an invalid one
        // cannot reach this point. `literal_separator` keeps `*` within one
        // name segment, so `@babel/*` covers the scope but `*` does not.
        if let Ok(glob) = GlobBuilder::new(pattern).literal_separator(true).build() {
            builder.add(glob);
        }
    }
    let Ok(set) = builder.build() else {
        return names.to_vec();
    };

    names
        .iter()
        .filter(|name| !set.is_match(name.as_str()))
        .cloned()
        .collect()
}
