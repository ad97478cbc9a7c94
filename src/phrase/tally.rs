//! Insertion-ordered phrase tallies
//!
//! Every aggregator in the crate counts string keys, tracks how many documents
//! contributed, and keeps a bounded list of surface forms. A [`TallyTable`]
//! built from one document has `doc_freq == 1` on every entry; merging the
//! per-document tables in document order yields corpus-wide counts and
//! document frequencies. Entries keep first-seen order, which is the stable
//! tie-break for every ranking downstream.

use rustc_hash::FxHashMap;

/// Default cap on surface forms kept per key
pub const DEFAULT_SURFACE_CAP: usize = 30;

/// Counts for one key
#[derive(Debug, Clone, PartialEq)]
pub struct Tally<M> {
    pub key: String,
    pub count: u32,
    pub doc_freq: u32,
    /// Distinct non-blank surfaces, first-seen order, capped
    pub surfaces: Vec<String>,
    /// Per-key metadata; the first value recorded wins
    pub meta: M,
}

/// Insertion-ordered table of [`Tally`] entries
#[derive(Debug, Clone)]
pub struct TallyTable<M> {
    key_to_id: FxHashMap<String, u32>,
    entries: Vec<Tally<M>>,
    surface_cap: usize,
}

impl<M: Copy> TallyTable<M> {
    pub fn new(surface_cap: usize) -> Self {
        Self {
            key_to_id: FxHashMap::default(),
            entries: Vec::new(),
            surface_cap,
        }
    }

    fn get_or_create(&mut self, key: &str, meta: M) -> usize {
        if let Some(&id) = self.key_to_id.get(key) {
            return id as usize;
        }
        let id = self.entries.len();
        self.key_to_id.insert(key.to_string(), id as u32);
        self.entries.push(Tally {
            key: key.to_string(),
            count: 0,
            doc_freq: 1,
            surfaces: Vec::new(),
            meta,
        });
        id
    }

    /// Record one occurrence within the current document
    pub fn record(&mut self, key: &str, surface: &str, meta: M) {
        let cap = self.surface_cap;
        let id = self.get_or_create(key, meta);
        let entry = &mut self.entries[id];
        entry.count += 1;
        push_surface(&mut entry.surfaces, surface, cap);
    }

    /// Fold another document's table into this one
    pub fn merge(&mut self, other: TallyTable<M>) {
        let cap = self.surface_cap;
        for partial in other.entries {
            let fresh = !self.key_to_id.contains_key(&partial.key);
            let id = self.get_or_create(&partial.key, partial.meta);
            let entry = &mut self.entries[id];
            entry.count += partial.count;
            if fresh {
                entry.doc_freq = partial.doc_freq;
            } else {
                entry.doc_freq += partial.doc_freq;
            }
            for surface in &partial.surfaces {
                push_surface(&mut entry.surfaces, surface, cap);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Tally<M>> {
        self.key_to_id.get(key).map(|&id| &self.entries[id as usize])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tally<M>> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<Tally<M>> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<M: Copy> Default for TallyTable<M> {
    fn default() -> Self {
        Self::new(DEFAULT_SURFACE_CAP)
    }
}

fn push_surface(surfaces: &mut Vec<String>, surface: &str, cap: usize) {
    let surface = surface.trim();
    if surface.is_empty() || surfaces.len() >= cap || surfaces.iter().any(|s| s == surface) {
        return;
    }
    surfaces.push(surface.to_string());
}

/// Sort by count descending; equal counts keep first-seen order
pub fn sort_by_count<M>(entries: &mut [Tally<M>]) {
    entries.sort_by(|a, b| b.count.cmp(&a.count));
}

/// Round to two decimal places
///
/// Results that round to zero are always `+0.0`, so they compare and
/// serialize like any other zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}
