//! The persisted news document and its featured index

use crate::domain::{generate_record_id, NewsRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Root object of the news data file.
///
/// Invariants kept by the mutating methods:
/// - every id in `featured` names a record in `records`
/// - `featured` holds no duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsDocument {
    #[serde(rename = "destaques", default)]
    featured: Vec<String>,
    #[serde(rename = "noticias", default)]
    records: Vec<NewsRecord>,
}

impl NewsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[NewsRecord] {
        &self.records
    }

    pub fn featured_ids(&self) -> &[String] {
        &self.featured
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.featured.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&NewsRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    pub fn is_featured(&self, id: &str) -> bool {
        self.featured.iter().any(|f| f == id)
    }

    /// Featured records, in featured-list order
    pub fn featured_records(&self) -> Vec<&NewsRecord> {
        self.featured.iter().filter_map(|id| self.get(id)).collect()
    }

    /// Insert a record at the front (newest first by insertion)
    pub fn insert_front(&mut self, record: NewsRecord) {
        self.records.insert(0, record);
    }

    /// Append `id` to the featured list unless it is already there.
    /// Ids without a matching record are ignored.
    pub fn mark_featured(&mut self, id: &str) {
        if self.contains(id) && !self.is_featured(id) {
            self.featured.push(id.to_string());
        }
    }

    pub fn unmark_featured(&mut self, id: &str) {
        self.featured.retain(|f| f != id);
    }

    /// Replace the record `original_id` in place, keeping its position.
    /// Returns the previous record, or `None` if `original_id` is absent.
    pub fn replace(&mut self, original_id: &str, record: NewsRecord) -> Option<NewsRecord> {
        let index = self.position(original_id)?;
        let previous = std::mem::replace(&mut self.records[index], record);
        if previous.id != self.records[index].id {
            self.unmark_featured(original_id);
        }
        Some(previous)
    }

    /// Remove a record and its featured entry
    pub fn remove(&mut self, id: &str) -> Option<NewsRecord> {
        let index = self.position(id)?;
        self.unmark_featured(id);
        Some(self.records.remove(index))
    }

    /// Stable sort by date, newest first. Dates compare as strings.
    pub fn sort_by_date_desc(&mut self) {
        self.records.sort_by(|a, b| b.date.cmp(&a.date));
    }

    /// Drop featured ids that are repeated or name no record.
    /// Returns the dropped ids.
    pub fn prune_featured(&mut self) -> Vec<String> {
        let mut kept: Vec<String> = Vec::with_capacity(self.featured.len());
        let mut dropped = Vec::new();

        for id in self.featured.drain(..) {
            let known = self.records.iter().any(|r| r.id == id);
            if known && !kept.contains(&id) {
                kept.push(id);
            } else {
                dropped.push(id);
            }
        }

        self.featured = kept;
        dropped
    }

    /// Drop records whose id already appeared earlier in the list.
    /// The first occurrence wins, matching [`NewsDocument::get`].
    /// Returns the dropped ids.
    pub fn prune_duplicate_records(&mut self) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::with_capacity(self.records.len());
        let mut dropped = Vec::new();

        self.records.retain(|record| {
            if seen.insert(record.id.clone()) {
                true
            } else {
                dropped.push(record.id.clone());
                false
            }
        });
        dropped
    }

    /// Give a fresh unique id to every record stored without one.
    /// Returns the assigned ids.
    pub fn assign_missing_ids(&mut self) -> Vec<String> {
        let mut assigned = Vec::new();

        for index in 0..self.records.len() {
            if !self.records[index].id.trim().is_empty() {
                continue;
            }
            let id = loop {
                let candidate = generate_record_id();
                if !self.contains(&candidate) {
                    break candidate;
                }
            };
            self.records[index].id = id.clone();
            assigned.push(id);
        }
        assigned
    }
}
