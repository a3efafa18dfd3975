//! Frozen route table with `(type, name)` lookup.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::{RouteEntry, RouteError};
use crate::core::RouteKind;

/// Ordered, read-only route table.
///
/// Entries keep their build order; lookups go through a per-kind index so
/// a `&str` name never needs an allocation.
#[derive(Debug, Default)]
pub struct RouteTable {
    entries: Vec<Arc<RouteEntry>>,
    index: FxHashMap<RouteKind, FxHashMap<String, usize>>,
}

impl RouteTable {
    /// Freeze a list of entries into a table.
    ///
    /// Fails on the first repeated `(type, name)` pair.
    pub fn from_entries(entries: Vec<RouteEntry>) -> Result<Self, RouteError> {
        let mut table = Self {
            entries: Vec::with_capacity(entries.len()),
            index: FxHashMap::default(),
        };

        for entry in entries {
            let names = table.index.entry(entry.kind).or_default();
            if names.contains_key(&entry.name) {
                return Err(RouteError::Duplicate(entry.id));
            }
            names.insert(entry.name.clone(), table.entries.len());
            table.entries.push(Arc::new(entry));
        }

        Ok(table)
    }

    /// Exact `(type, name)` lookup.
    pub fn get(&self, kind: RouteKind, name: &str) -> Option<&Arc<RouteEntry>> {
        let idx = *self.index.get(&kind)?.get(name)?;
        self.entries.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter().map(|entry| entry.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries of one kind.
    pub fn count(&self, kind: RouteKind) -> usize {
        self.index.get(&kind).map_or(0, FxHashMap::len)
    }
}
