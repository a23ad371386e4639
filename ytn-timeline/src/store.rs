//! Annotation store for a single project
//!
//! Holds normalized annotations sorted by timecode ascending. Sorting is
//! stable, so annotations sharing a timecode keep their arrival order; the
//! clustering pass depends on this order.

use tracing::warn;
use ytn_common::{Annotation, AnnotationStatus};

/// Ordered annotation records for one project
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    /// Sorted by `timecode` ascending, ids unique
    annotations: Vec<Annotation>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from annotations in any order
    pub fn from_annotations(annotations: Vec<Annotation>) -> Self {
        let mut store = Self::new();
        store.replace_all(annotations);
        store
    }

    /// Replace the whole contents (project load)
    ///
    /// Later records with an id already seen are dropped.
    pub fn replace_all(&mut self, annotations: Vec<Annotation>) {
        let mut unique: Vec<Annotation> = Vec::with_capacity(annotations.len());
        for annotation in annotations {
            if unique.iter().any(|a| a.id == annotation.id) {
                warn!(id = %annotation.id, "Dropping duplicate annotation id");
                continue;
            }
            unique.push(annotation);
        }
        self.annotations = unique;
        self.sort();
    }

    /// Add a confirmed annotation and restore timecode order
    ///
    /// An annotation whose id is already present replaces the old record.
    pub fn insert(&mut self, annotation: Annotation) {
        match self.annotations.iter_mut().find(|a| a.id == annotation.id) {
            Some(existing) => *existing = annotation,
            None => self.annotations.push(annotation),
        }
        self.sort();
    }

    /// Remove an annotation by id
    pub fn remove(&mut self, id: &str) -> Option<Annotation> {
        let index = self.annotations.iter().position(|a| a.id == id)?;
        Some(self.annotations.remove(index))
    }

    /// Set the status of an annotation in place
    ///
    /// Returns the previous status, or `None` if the id is unknown.
    pub fn set_status(&mut self, id: &str, status: AnnotationStatus) -> Option<AnnotationStatus> {
        let annotation = self.annotations.iter_mut().find(|a| a.id == id)?;
        let old = annotation.status;
        annotation.status = status;
        Some(old)
    }

    pub fn get(&self, id: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Largest timecode in the store
    pub fn max_timecode(&self) -> Option<f64> {
        self.annotations
            .iter()
            .map(|a| a.timecode)
            .fold(None, |max, t| Some(max.map_or(t, |m: f64| m.max(t))))
    }

    fn sort(&mut self) {
        self.annotations.sort_by(|a, b| a.timecode.total_cmp(&b.timecode));
    }
}
