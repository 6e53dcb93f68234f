// src/services/catalog.rs
use std::collections::HashSet;

use chrono::DateTime;
use serde::Serialize;

use crate::models::CatalogRecord;

pub const PAGE_SIZE: usize = 9;
pub const ALL_CATEGORIES: &str = "all";

// CMS installs are inconsistent about where the publish date lives; the first
// candidate that parses wins, the record id is the fallback sort key.
const DATE_FIELDS: &[&str] = &[
    "publishedAt",
    "published_at",
    "createdAt",
    "created_at",
    "updatedAt",
    "date",
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub items: Vec<CatalogRecord>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

fn sort_key(record: &CatalogRecord) -> i64 {
    for field in DATE_FIELDS {
        if let Some(value) = record.attrs.get(*field).and_then(|v| v.as_str()) {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
                return parsed.timestamp_millis();
            }
        }
    }
    record.id as i64
}

fn matches_search(record: &CatalogRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    record.name.to_lowercase().contains(needle)
        || record.description.to_lowercase().contains(needle)
        || record.location.to_lowercase().contains(needle)
}

fn matches_category(record: &CatalogRecord, category: &str) -> bool {
    if category.is_empty() || category == ALL_CATEGORIES {
        return true;
    }
    record.categories.iter().any(|slug| slug == category)
}

// Pure function of (records, search, category); newest first.
pub fn select(records: &[CatalogRecord], search: &str, category: &str) -> Vec<CatalogRecord> {
    let needle = search.trim().to_lowercase();
    let mut selected: Vec<CatalogRecord> = records
        .iter()
        .filter(|r| matches_search(r, &needle) && matches_category(r, category))
        .cloned()
        .collect();
    selected.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)).then(b.id.cmp(&a.id)));
    selected
}

pub fn paginate(items: Vec<CatalogRecord>, page: usize, page_size: usize) -> CatalogPage {
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size);

    let items = if start >= total_items {
        Vec::new()
    } else {
        items[start..(start + page_size).min(total_items)].to_vec()
    };

    CatalogPage {
        items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}

// The in-memory equivalent of the listing page's UI state: current filters,
// current page and the like set. Likes are never written back to the CMS.
#[derive(Debug)]
pub struct CatalogView {
    records: Vec<CatalogRecord>,
    search: String,
    category: String,
    page: usize,
    likes: HashSet<u64>,
}

impl CatalogView {
    pub fn new(records: Vec<CatalogRecord>) -> Self {
        Self {
            records,
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
            page: 1,
            likes: HashSet::new(),
        }
    }

    pub fn replace_records(&mut self, records: Vec<CatalogRecord>) {
        self.records = records;
        self.page = 1;
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn set_search(&mut self, search: &str) {
        if self.search != search {
            self.search = search.to_string();
            self.page = 1;
        }
    }

    pub fn set_category(&mut self, category: &str) {
        if self.category != category {
            self.category = category.to_string();
            self.page = 1;
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn toggle_like(&mut self, id: u64) -> bool {
        if self.likes.insert(id) {
            true
        } else {
            self.likes.remove(&id);
            false
        }
    }

    pub fn is_liked(&self, id: u64) -> bool {
        self.likes.contains(&id)
    }

    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    pub fn current_page(&self) -> CatalogPage {
        paginate(
            select(&self.records, &self.search, &self.category),
            self.page,
            PAGE_SIZE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: u64, name: &str, description: &str, location: &str) -> CatalogRecord {
        CatalogRecord {
            id,
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            description: description.to_string(),
            location: location.to_string(),
            images: Vec::new(),
            categories: Vec::new(),
            attrs: serde_json::Map::new(),
        }
    }

    fn with_category(mut record: CatalogRecord, slug: &str) -> CatalogRecord {
        record.categories.push(slug.to_string());
        record
    }

    fn with_attr(mut record: CatalogRecord, field: &str, value: &str) -> CatalogRecord {
        record.attrs.insert(field.to_string(), json!(value));
        record
    }

    fn sample() -> Vec<CatalogRecord> {
        vec![
            with_category(
                record(1, "Loft Kitchen", "Open kitchen with an island", "Berlin"),
                "kitchens",
            ),
            with_category(
                record(2, "Seaside Villa", "Full renovation", "Lisbon"),
                "villas",
            ),
            with_category(
                record(3, "Garden Office", "A quiet office in the garden", "Berlin"),
                "offices",
            ),
        ]
    }

    #[test]
    fn search_matches_name_description_and_location() {
        let records = sample();

        let by_name = select(&records, "LOFT", ALL_CATEGORIES);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, 1);

        let by_description = select(&records, "renovation", ALL_CATEGORIES);
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].id, 2);

        let by_location = select(&records, "berlin", ALL_CATEGORIES);
        assert_eq!(by_location.iter().map(|r| r.id).collect::<Vec<_>>(), [3, 1]);
    }

    #[test]
    fn category_filter_is_exact_and_all_is_a_sentinel() {
        let records = sample();

        let kitchens = select(&records, "", "kitchens");
        assert_eq!(kitchens.len(), 1);
        assert_eq!(kitchens[0].id, 1);

        assert_eq!(select(&records, "", ALL_CATEGORIES).len(), 3);
        assert_eq!(select(&records, "", "").len(), 3);
        assert_eq!(select(&records, "", "kitchen").len(), 0);
    }

    #[test]
    fn selection_is_idempotent() {
        let records = sample();
        let first = select(&records, "berlin", ALL_CATEGORIES);
        let second = select(&records, "berlin", ALL_CATEGORIES);
        assert_eq!(
            first.iter().map(|r| r.id).collect::<Vec<_>>(),
            second.iter().map(|r| r.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn sort_prefers_the_first_populated_date_field() {
        let records = vec![
            with_attr(record(1, "Old", "", ""), "publishedAt", "2023-01-10T10:00:00Z"),
            with_attr(record(2, "New", "", ""), "createdAt", "2025-06-01T08:30:00Z"),
            // Unparseable date falls through to the id.
            with_attr(record(3, "Broken", "", ""), "publishedAt", "yesterday"),
        ];

        let sorted = select(&records, "", ALL_CATEGORIES);
        assert_eq!(sorted.iter().map(|r| r.id).collect::<Vec<_>>(), [2, 1, 3]);
    }

    #[test]
    fn records_without_dates_sort_by_id_descending() {
        let records = vec![record(5, "A", "", ""), record(9, "B", "", ""), record(2, "C", "", "")];
        let sorted = select(&records, "", ALL_CATEGORIES);
        assert_eq!(sorted.iter().map(|r| r.id).collect::<Vec<_>>(), [9, 5, 2]);
    }

    #[test]
    fn pages_partition_the_filtered_list() {
        let records: Vec<CatalogRecord> = (1..=10)
            .map(|id| record(id, &format!("Project {id}"), "", ""))
            .collect();
        let selected = select(&records, "", ALL_CATEGORIES);

        let first = paginate(selected.clone(), 1, 4);
        assert_eq!(first.total_items, 10);
        assert_eq!(first.total_pages, 3);

        let mut reassembled = Vec::new();
        for page in 1..=first.total_pages {
            reassembled.extend(
                paginate(selected.clone(), page, 4)
                    .items
                    .iter()
                    .map(|r| r.id),
            );
        }
        assert_eq!(
            reassembled,
            selected.iter().map(|r| r.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn empty_selection_has_zero_pages() {
        let page = paginate(Vec::new(), 1, PAGE_SIZE);
        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn out_of_range_pages_are_empty_not_errors() {
        let records = sample();
        let page = paginate(select(&records, "", ALL_CATEGORIES), 7, PAGE_SIZE);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn changing_a_filter_resets_the_page() {
        let records: Vec<CatalogRecord> = (1..=30)
            .map(|id| record(id, &format!("Project {id}"), "", ""))
            .collect();
        let mut view = CatalogView::new(records);

        view.set_page(3);
        assert_eq!(view.current_page().page, 3);

        view.set_search("project");
        assert_eq!(view.current_page().page, 1);

        // Re-applying the same filter keeps the page.
        view.set_page(2);
        view.set_search("project");
        assert_eq!(view.current_page().page, 2);

        view.set_category("villas");
        assert_eq!(view.current_page().page, 1);
    }

    #[test]
    fn likes_toggle_in_memory() {
        let mut view = CatalogView::new(sample());
        assert!(view.toggle_like(2));
        assert!(view.is_liked(2));
        assert_eq!(view.like_count(), 1);
        assert!(!view.toggle_like(2));
        assert!(!view.is_liked(2));
        assert_eq!(view.like_count(), 0);
    }
}
