//! Category grouping for display and export.
//!
//! Entries are stored in insertion order. Everything that shows them to a
//! person (the `show` preview, the PDF) goes through [`group_entries`]:
//!
//! - Groups are ordered by category key, compared by code point. The empty
//!   (uncategorized) key therefore comes first.
//! - Inside a group, entries are ordered by lowercased term.
//! - Both sorts are stable, so equal keys keep their insertion order.

use crate::model::Entry;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub entries: Vec<Entry>,
}

impl CategoryGroup {
    /// Heading text; uncategorized entries get an empty heading, like their key.
    pub fn heading(&self) -> &str {
        &self.category
    }
}

pub fn group_entries(entries: &[Entry]) -> Vec<CategoryGroup> {
    let mut by_category: BTreeMap<&str, Vec<Entry>> = BTreeMap::new();
    for entry in entries {
        by_category
            .entry(entry.category.as_str())
            .or_default()
            .push(entry.clone());
    }

    by_category
        .into_iter()
        .map(|(category, mut entries)| {
            entries.sort_by_cached_key(|e| e.term.to_lowercase());
            CategoryGroup {
                category: category.to_string(),
                entries,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageRef;

    fn entry(term: &str, category: &str, desc: &str) -> Entry {
        Entry::new(term, category, &PageRef::new(1, None), desc)
    }

    fn terms(group: &CategoryGroup) -> Vec<&str> {
        group.entries.iter().map(|e| e.term.as_str()).collect()
    }

    #[test]
    fn test_case_insensitive_term_order() {
        let entries = vec![
            entry("RDP", "Lateral Movement", ""),
            entry("PsExec", "Lateral Movement", ""),
            entry("at.exe", "Lateral Movement", ""),
        ];
        let groups = group_entries(&entries);
        assert_eq!(groups.len(), 1);
        assert_eq!(terms(&groups[0]), vec!["at.exe", "PsExec", "RDP"]);
    }

    #[test]
    fn test_categories_sorted_with_uncategorized_first() {
        let entries = vec![
            entry("a", "Tools", ""),
            entry("b", "Registry", ""),
            entry("c", "", ""),
            entry("d", "Artifacts", ""),
        ];
        let categories: Vec<String> = group_entries(&entries)
            .into_iter()
            .map(|g| g.category)
            .collect();
        assert_eq!(categories, vec!["", "Artifacts", "Registry", "Tools"]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let entries = vec![
            entry("wmic", "Commands", "first"),
            entry("WMIC", "Commands", "second"),
            entry("Wmic", "Commands", "third"),
        ];
        let groups = group_entries(&entries);
        let descs: Vec<&str> = groups[0].entries.iter().map(|e| e.desc.as_str()).collect();
        assert_eq!(descs, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_first_seen_order_matches_sorted_order() {
        let mut entries = vec![
            entry("x", "Tools", ""),
            entry("y", "", ""),
            entry("z", "Artifacts", ""),
            entry("w", "Tools", ""),
        ];
        let grouped: Vec<String> = group_entries(&entries)
            .into_iter()
            .map(|g| g.category)
            .collect();

        entries.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| a.term.to_lowercase().cmp(&b.term.to_lowercase()))
        });
        let mut first_seen: Vec<String> = Vec::new();
        for e in &entries {
            if !first_seen.contains(&e.category) {
                first_seen.push(e.category.clone());
            }
        }
        assert_eq!(grouped, first_seen);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_entries(&[]).is_empty());
    }

    #[test]
    fn test_grouping_does_not_lose_entries() {
        let entries: Vec<Entry> = (0..20)
            .map(|i| entry(&format!("t{}", i), if i % 3 == 0 { "Tools" } else { "" }, ""))
            .collect();
        let total: usize = group_entries(&entries).iter().map(|g| g.entries.len()).sum();
        assert_eq!(total, 20);
    }
}
