//! Board Partitioning
//!
//! Linear filters over a working set of items. Every item lands in exactly
//! one section and, within it, either one subsection or the unassigned lane.

use serde::Serialize;

use crate::classification::classify;
use crate::item::ToolboxItem;
use crate::taxonomy::{Section, Subsection};

/// Items placed in `section`, any subsection
pub fn partition(items: &[ToolboxItem], section: Section) -> Vec<&ToolboxItem> {
    items.iter().filter(|item| classify(item).section() == section).collect()
}

/// Items placed in exactly `section`/`subsection`
pub fn partition_by_subsection(items: &[ToolboxItem], section: Section, subsection: Subsection) -> Vec<&ToolboxItem> {
    items
        .iter()
        .filter(|item| {
            let c = classify(item);
            c.section() == section && c.subsection() == Some(subsection)
        })
        .collect()
}

/// Items in `section` with no subsection
pub fn unassigned_in_section(items: &[ToolboxItem], section: Section) -> Vec<&ToolboxItem> {
    items
        .iter()
        .filter(|item| {
            let c = classify(item);
            c.section() == section && c.subsection().is_none()
        })
        .collect()
}

/// Header counts for the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSummary {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub per_section: Vec<(Section, usize)>,
}

impl BoardSummary {
    pub fn of(items: &[ToolboxItem]) -> Self {
        let active = items.iter().filter(|item| item.is_active()).count();
        let mut per_section: Vec<(Section, usize)> = Section::ALL.iter().map(|s| (*s, 0)).collect();
        for item in items {
            // per_section is in Section::ALL order
            per_section[classify(item).section() as usize].1 += 1;
        }
        Self { total: items.len(), active, inactive: items.len() - active, per_section }
    }

    pub fn count(&self, section: Section) -> usize {
        self.per_section[section as usize].1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemStatus, ItemType};
    use chrono::{DateTime, Utc};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn item(id: u32, metadata: &str) -> ToolboxItem {
        ToolboxItem {
            id,
            name: format!("item-{}", id),
            item_type: ItemType::System,
            status: if id % 2 == 0 { ItemStatus::Active } else { ItemStatus::Inactive },
            description: String::new(),
            tags: None,
            last_updated: DateTime::<Utc>::from_timestamp(0, 0).unwrap(),
            metadata: Some(metadata.to_string()),
        }
    }

    fn ids(items: Vec<&ToolboxItem>) -> Vec<u32> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_partition_by_section_and_lane() {
        let items = vec![
            item(1, r#"{"section":"support","subsection":"legal"}"#),
            item(2, r#"{"section":"support"}"#),
            item(3, "not json"),
            item(4, r#"{"section":"support","subsection":"risk"}"#),
        ];
        assert_eq!(ids(partition(&items, Section::Support)), vec![1, 2, 4]);
        assert_eq!(ids(partition(&items, Section::Market)), vec![3]);
        assert_eq!(ids(partition_by_subsection(&items, Section::Support, Subsection::Legal)), vec![1]);
        assert_eq!(ids(unassigned_in_section(&items, Section::Support)), vec![2]);
        assert_eq!(ids(unassigned_in_section(&items, Section::Market)), vec![3]);
        assert!(partition(&items, Section::Team).is_empty());
    }

    #[test]
    fn test_summary_counts() {
        let items = vec![
            item(1, r#"{"section":"sell"}"#),
            item(2, r#"{"section":"sell","subsection":"lead-conversion"}"#),
            item(3, ""),
        ];
        let summary = BoardSummary::of(&items);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.active, 1);
        assert_eq!(summary.inactive, 2);
        assert_eq!(summary.count(Section::Sell), 2);
        assert_eq!(summary.count(Section::Market), 1);
        assert_eq!(summary.per_section.iter().map(|(_, n)| n).sum::<usize>(), 3);
    }

    fn metadata_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just("not json".to_string()),
            Just("[]".to_string()),
            Just(r#"{"section":"team","subsection":"legal"}"#.to_string()),
            (0usize..7).prop_map(|s| format!(r#"{{"section":"{}"}}"#, Section::ALL[s].as_str())),
            (0usize..7, 0usize..4).prop_map(|(s, n)| {
                let section = Section::ALL[s];
                let subs: Vec<Subsection> = section.subsections().collect();
                let sub = subs[n % subs.len()];
                format!(r#"{{"section":"{}","subsection":"{}","x":{}}}"#, section, sub, n)
            }),
        ]
    }

    proptest! {
        #[test]
        fn prop_lanes_cover_section_exactly_once(
            metadata in proptest::collection::vec(metadata_strategy(), 0..40),
            s in 0usize..7,
        ) {
            let items: Vec<ToolboxItem> = metadata
                .iter()
                .enumerate()
                .map(|(i, m)| item(i as u32 + 1, m))
                .collect();
            let section = Section::ALL[s];

            let mut lanes = ids(unassigned_in_section(&items, section));
            for sub in section.subsections() {
                lanes.extend(ids(partition_by_subsection(&items, section, sub)));
            }
            let unique: HashSet<u32> = lanes.iter().copied().collect();
            prop_assert_eq!(unique.len(), lanes.len());

            let mut expected = ids(partition(&items, section));
            lanes.sort_unstable();
            expected.sort_unstable();
            prop_assert_eq!(lanes, expected);
        }

        #[test]
        fn prop_every_item_in_one_section(metadata in proptest::collection::vec(metadata_strategy(), 0..40)) {
            let items: Vec<ToolboxItem> = metadata
                .iter()
                .enumerate()
                .map(|(i, m)| item(i as u32 + 1, m))
                .collect();
            let placed: usize = Section::ALL.iter().map(|s| partition(&items, *s).len()).sum();
            prop_assert_eq!(placed, items.len());
        }
    }
}
