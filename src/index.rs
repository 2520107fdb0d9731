//! Spatial index over fingerprints.
//!
//! A BK-tree keyed by Hamming distance: every edge is labelled with the
//! distance between child and parent, and the triangle inequality prunes
//! whole subtrees during a radius query. The tree is built once per run from
//! the complete fingerprint list; there is no incremental maintenance.

use crate::hash::Fingerprint;

/// One query result: an indexed position and its distance from the query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    /// Position in the fingerprint list the index was built from
    pub position: usize,
    /// Hamming distance to the query fingerprint
    pub distance: u32,
}

#[derive(Debug)]
struct Node {
    position: usize,
    fingerprint: Fingerprint,
    /// (edge distance, child node id); edges are unique per node
    children: Vec<(u32, usize)>,
}

/// Batch-built metric tree supporting bounded nearest-neighbor queries.
///
/// Node positions mirror the order of the slice the index was built from,
/// so position `i` always refers to the `i`-th hashed image.
#[derive(Debug, Default)]
pub struct FingerprintIndex {
    nodes: Vec<Node>,
}

impl FingerprintIndex {
    /// Build the index over a complete fingerprint list
    pub fn build(fingerprints: &[Fingerprint]) -> Self {
        let mut index = Self {
            nodes: Vec::with_capacity(fingerprints.len()),
        };
        for (position, fingerprint) in fingerprints.iter().enumerate() {
            index.insert(position, fingerprint.clone());
        }
        index
    }

    /// Number of indexed fingerprints
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn insert(&mut self, position: usize, fingerprint: Fingerprint) {
        if self.nodes.is_empty() {
            self.nodes.push(Node {
                position,
                fingerprint,
                children: Vec::new(),
            });
            return;
        }

        let mut current = 0;
        loop {
            let distance = self.nodes[current].fingerprint.distance(&fingerprint);
            let existing = self.nodes[current]
                .children
                .iter()
                .find(|&&(edge, _)| edge == distance)
                .map(|&(_, child)| child);
            match existing {
                Some(child) => current = child,
                None => {
                    let id = self.nodes.len();
                    self.nodes.push(Node {
                        position,
                        fingerprint,
                        children: Vec::new(),
                    });
                    self.nodes[current].children.push((distance, id));
                    return;
                }
            }
        }
    }

    /// Return up to `limit` indexed positions within `max_distance` of the
    /// query, ordered by ascending distance with ascending position as the
    /// tie-break. A query fingerprint that is itself indexed comes back at
    /// distance 0.
    pub fn find(&self, query: &Fingerprint, max_distance: u32, limit: usize) -> Vec<Neighbor> {
        let mut matches = Vec::new();
        if self.nodes.is_empty() || limit == 0 {
            return matches;
        }

        let mut stack = vec![0];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            let distance = node.fingerprint.distance(query);
            if distance <= max_distance {
                matches.push(Neighbor {
                    position: node.position,
                    distance,
                });
            }

            // Triangle inequality: a match under edge `e` requires
            // |e - distance| <= max_distance.
            let low = distance.saturating_sub(max_distance);
            let high = distance.saturating_add(max_distance);
            for &(edge, child) in &node.children {
                if (low..=high).contains(&edge) {
                    stack.push(child);
                }
            }
        }

        matches.sort_by(|a, b| {
            a.distance
                .cmp(&b.distance)
                .then_with(|| a.position.cmp(&b.position))
        });
        matches.truncate(limit);
        matches
    }
}
