//! Proximity clustering of annotations on the 0-100 timeline axis
//!
//! Greedy single pass, first match wins:
//!
//! 1. Walk annotations in the order given (store order: timecode ascending).
//! 2. Compare the annotation's position with each existing cluster's
//!    *current* position, in creation order.
//! 3. Join the first cluster closer than [`CLUSTER_RADIUS`] and recompute
//!    that cluster's position as the mean of all its members; otherwise
//!    open a new cluster.
//!
//! Because a cluster's mean moves as members join, the result depends on
//! input order, and two clusters can end up closer than the radius after
//! later joins. Both are accepted behavior of this grouping, not defects.

use crate::scale::position;
use serde::Serialize;
use ytn_common::Annotation;

/// Maximum position distance (exclusive, on the 0-100 axis) for joining a cluster
pub const CLUSTER_RADIUS: f64 = 2.0;

/// A group of annotations drawn as one timeline element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    /// Mean of member positions, 0-100
    pub position: f64,
    /// Members in join order (never empty)
    pub members: Vec<Annotation>,
}

impl Cluster {
    fn new(annotation: Annotation, position: f64) -> Self {
        Self {
            position,
            members: vec![annotation],
        }
    }

    /// Add a member and recompute the mean position
    fn join(&mut self, annotation: Annotation, max_time: f64) {
        self.members.push(annotation);
        let sum: f64 = self
            .members
            .iter()
            .map(|a| position(a.timecode, max_time))
            .sum();
        self.position = sum / self.members.len() as f64;
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether this cluster renders as a single plain marker
    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }
}

/// Group annotations into clusters
///
/// `max_time` must be positive. Returns clusters in creation order, which is
/// not necessarily sorted by position.
///
/// # Examples
///
/// ```
/// use ytn_common::{Annotation, AnnotationStatus};
/// use ytn_timeline::cluster_annotations;
///
/// let at = |id: &str, t: f64| Annotation {
///     id: id.into(),
///     author: "A".into(),
///     text: "x".into(),
///     timecode: t,
///     status: AnnotationStatus::Pending,
/// };
///
/// let clusters = cluster_annotations(&[at("a", 10.0), at("b", 11.0), at("c", 50.0)], 100.0);
/// assert_eq!(clusters.len(), 2);
/// assert_eq!(clusters[0].members.len(), 2);
/// assert_eq!(clusters[1].members.len(), 1);
/// ```
pub fn cluster_annotations(annotations: &[Annotation], max_time: f64) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();

    for annotation in annotations {
        let pos = position(annotation.timecode, max_time);

        match clusters
            .iter_mut()
            .find(|c| (c.position - pos).abs() < CLUSTER_RADIUS)
        {
            Some(cluster) => cluster.join(annotation.clone(), max_time),
            None => clusters.push(Cluster::new(annotation.clone(), pos)),
        }
    }

    clusters
}
