//! Per-instance session state.
//!
//! One [`SessionState`] belongs to one widget instance; nothing here is
//! global. The controller mutates it in short, synchronous steps and never
//! holds it across a network await.

use std::collections::{BTreeSet, HashMap};

use crate::models::{Clipboard, Item};
use crate::path::normalize_path;

/// A cached listing of one collection.
#[derive(Clone, Debug, PartialEq)]
pub struct CacheEntry {
    pub items: Vec<Item>,
    /// Milliseconds since the epoch when the listing was stored.
    pub timestamp: f64,
}

/// Token recorded for a fetched page, e.g. `"0-50"`.
pub fn range_token(start: usize, end: usize) -> String {
    format!("{}-{}", start, end)
}

#[derive(Clone, Debug, Default)]
pub struct SessionState {
    /// Collection currently displayed
    pub current_path: String,
    /// Listing of the current path, in server order
    pub items: Vec<Item>,
    /// Selected item paths
    pub selected: BTreeSet<String>,
    pub clipboard: Clipboard,
    /// Page tokens already fetched for the current path
    pub loaded_ranges: BTreeSet<String>,
    pub cache: HashMap<String, CacheEntry>,
    /// Message of the last failed load, shown instead of the grid
    pub error: Option<String>,
}

impl SessionState {
    pub fn new(root: &str) -> Self {
        Self {
            current_path: normalize_path(root),
            ..Self::default()
        }
    }

    /// Start a fresh listing of `path`: drops items, ranges, selection and
    /// the cached listing of that path.
    pub fn reset_listing(&mut self, path: &str) {
        let path = normalize_path(path);
        self.items.clear();
        self.loaded_ranges.clear();
        self.selected.clear();
        self.error = None;
        self.cache.remove(&path);
        self.current_path = path;
    }

    /// Commit a fetched page and refresh the cache entry. Selected paths
    /// that are no longer listed are dropped.
    pub fn record_page(&mut self, items: Vec<Item>, append: bool, token: String, now: f64) {
        if append {
            self.items.extend(items);
        } else {
            self.items = items;
        }
        self.prune_selection();
        self.loaded_ranges.insert(token);
        self.error = None;
        self.cache.insert(
            self.current_path.clone(),
            CacheEntry {
                items: self.items.clone(),
                timestamp: now,
            },
        );
    }

    /// Record a failed load: empty listing plus an error message.
    pub fn record_failure(&mut self, message: String, append: bool) {
        if !append {
            self.items.clear();
        }
        self.error = Some(message);
    }

    /// Forget the cached listing of `path` and, if it is the current path,
    /// the fetched ranges.
    pub fn invalidate(&mut self, path: &str) {
        let path = normalize_path(path);
        self.cache.remove(&path);
        if path == self.current_path {
            self.loaded_ranges.clear();
        }
    }

    pub fn find_item(&self, path: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.path == path)
    }

    pub fn is_selected(&self, path: &str) -> bool {
        self.selected.contains(path)
    }

    /// Selected items resolved against the listing, in listing order.
    pub fn selected_items(&self) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|i| self.selected.contains(&i.path))
            .collect()
    }

    pub fn selected_paths(&self) -> Vec<String> {
        self.selected_items()
            .into_iter()
            .map(|i| i.path.clone())
            .collect()
    }

    /// Replace the selection with `path`.
    pub fn select_only(&mut self, path: &str) {
        self.selected.clear();
        self.selected.insert(path.to_string());
    }

    /// Flip membership of `path`; returns whether it is now selected.
    pub fn toggle(&mut self, path: &str) -> bool {
        if self.selected.remove(path) {
            false
        } else {
            self.selected.insert(path.to_string());
            true
        }
    }

    pub fn add_to_selection(&mut self, path: &str) {
        self.selected.insert(path.to_string());
    }

    /// Select every listed item except the parent entry.
    pub fn select_all(&mut self) {
        self.selected = self
            .items
            .iter()
            .filter(|i| !i.is_parent())
            .map(|i| i.path.clone())
            .collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    fn prune_selection(&mut self) {
        let listed: BTreeSet<&str> = self.items.iter().map(|i| i.path.as_str()).collect();
        self.selected.retain(|p| listed.contains(p.as_str()));
    }
}
