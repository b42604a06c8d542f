//! Conflict-aware class-list merging and canonical ordering.

use std::collections::HashSet;

use tracing::debug;

use crate::class_list::ClassList;
use crate::groups::{class_key, category_of, split_variants};

const MERGE_TARGET: &str = "stitch_style::merger";

/// Merges `incoming` into `existing`.
///
/// Classes are absorbed in order, existing ones first, so within each
/// conflict group only the most recently added class survives. A class
/// removes the earlier classes it displaces (same conflict group, or a
/// narrower group it overrides, under the same variants and important
/// marker). A class already present keeps its position; otherwise it is
/// appended. Classes outside every group are kept verbatim and
/// de-duplicated. Merging the same classes twice is a no-op.
#[must_use]
pub fn merge(existing: &ClassList, incoming: &ClassList) -> ClassList {
    let mut merged = ClassList::default();
    for class in existing.iter().chain(incoming.iter()) {
        absorb(&mut merged, class);
    }
    merged
}

fn absorb(merged: &mut ClassList, class: &str) {
    if let Some(key) = class_key(class) {
        merged.retain(|current| {
            let displaced =
                current != class && class_key(current).is_some_and(|other| key.displaces(&other));
            if displaced {
                debug!(
                    target: MERGE_TARGET,
                    replaced = current,
                    by = class,
                    group = %key.group,
                    "class displaced"
                );
            }
            !displaced
        });
    }
    if !merged.contains(class) {
        merged.push(class);
    }
}

/// Returns `existing` without any class listed in `to_remove`.
#[must_use]
pub fn remove(existing: &ClassList, to_remove: &ClassList) -> ClassList {
    existing
        .iter()
        .filter(|class| !to_remove.contains(class))
        .collect()
}

/// Returns the first existing class that `new_class` would displace.
#[must_use]
pub fn find_conflict<'a>(existing: &'a ClassList, new_class: &str) -> Option<&'a str> {
    let key = class_key(new_class)?;
    existing.iter().find(|current| {
        *current != new_class && class_key(current).is_some_and(|other| key.displaces(&other))
    })
}

/// Drops repeated tokens, keeping first occurrences.
#[must_use]
pub fn deduplicate(list: &ClassList) -> ClassList {
    let mut seen = HashSet::new();
    list.iter().filter(|class| seen.insert(*class)).collect()
}

/// Orders classes layout, box model, typography, colour, decoration, then
/// everything else.
///
/// Within a category, classes without variants come before variant classes;
/// the sort is stable otherwise.
#[must_use]
pub fn sort(list: &ClassList) -> ClassList {
    let mut tokens: Vec<&str> = list.iter().collect();
    tokens.sort_by_key(|class| {
        let (variants, _) = split_variants(class);
        (category_of(class), !variants.is_empty())
    });
    tokens.into_iter().collect()
}
