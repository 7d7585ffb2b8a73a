//! Match history correlation.

use std::collections::HashSet;

/// Ids of `a` that also appear anywhere in `b`, in `a`'s order.
///
/// Duplicates in `a` are preserved. Membership is a set built from `b`,
/// keeping the cost linear in the combined history size.
pub fn common_matches(a: &[String], b: &[String]) -> Vec<String> {
    let b_ids: HashSet<&str> = b.iter().map(String::as_str).collect();
    a.iter()
        .filter(|id| b_ids.contains(id.as_str()))
        .cloned()
        .collect()
}
