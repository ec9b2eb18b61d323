//! Biomarker table
//!
//! Name-keyed collection of biomarkers that iterates in order of first
//! appearance in the input.

use rustc_hash::FxHashMap;

use crate::models::biomarker::Biomarker;

/// Mapping from marker name to [`Biomarker`], in first-appearance order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BiomarkerTable {
    markers: Vec<Biomarker>,
    index: FxHashMap<String, usize>,
}

impl BiomarkerTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the biomarker stored under `name`, creating it with `create` on
    /// first sight.
    ///
    /// The second element is `true` when the entry was just created.
    pub fn upsert<F>(&mut self, name: &str, create: F) -> (&mut Biomarker, bool)
    where
        F: FnOnce() -> Biomarker,
    {
        if let Some(&idx) = self.index.get(name) {
            return (&mut self.markers[idx], false);
        }

        let idx = self.markers.len();
        self.markers.push(create());
        self.index.insert(name.to_string(), idx);
        (&mut self.markers[idx], true)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Biomarker> {
        self.index.get(name).map(|&idx| &self.markers[idx])
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate over biomarkers in first-appearance order
    pub fn iter(&self) -> impl Iterator<Item = &Biomarker> {
        self.markers.iter()
    }

    /// Marker names in first-appearance order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.markers.iter().map(|m| m.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl<'a> IntoIterator for &'a BiomarkerTable {
    type Item = &'a Biomarker;
    type IntoIter = std::slice::Iter<'a, Biomarker>;

    fn into_iter(self) -> Self::IntoIter {
        self.markers.iter()
    }
}
