//! The symmetric relation linking item points across items.
//!
//! Edges are stored in both directions so that each endpoint can enumerate
//! its peers. Every mutation updates both directions together.

use crate::item::ItemId;
use crate::point::PointId;
use std::collections::HashMap;

/// Address of a point within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointRef {
    pub item: ItemId,
    pub point: PointId,
}

impl PointRef {
    pub fn new(item: ItemId, point: PointId) -> Self {
        Self { item, point }
    }
}

/// Peer edges between item points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Connections {
    peers: HashMap<PointRef, Vec<PointRef>>,
}

impl Connections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link two points. Returns `false` if they share an item or are already linked.
    pub fn connect(&mut self, a: PointRef, b: PointRef) -> bool {
        if a.item == b.item || self.is_connected(a, b) {
            return false;
        }
        self.peers.entry(a).or_default().push(b);
        self.peers.entry(b).or_default().push(a);
        true
    }

    /// Unlink two points. Returns `false` if they were not linked.
    pub fn disconnect(&mut self, a: PointRef, b: PointRef) -> bool {
        let removed = self.remove_half(a, b);
        if removed {
            self.remove_half(b, a);
        }
        removed
    }

    fn remove_half(&mut self, from: PointRef, to: PointRef) -> bool {
        let Some(list) = self.peers.get_mut(&from) else {
            return false;
        };
        let Some(index) = list.iter().position(|p| *p == to) else {
            return false;
        };
        list.remove(index);
        if list.is_empty() {
            self.peers.remove(&from);
        }
        true
    }

    /// Remove every edge touching `point`, returning the former peers.
    pub fn clear_point(&mut self, point: PointRef) -> Vec<PointRef> {
        let peers = self.peers.remove(&point).unwrap_or_default();
        for peer in &peers {
            self.remove_half(*peer, point);
        }
        peers
    }

    /// Remove every edge touching any point of `item`, returning the removed edges.
    pub fn clear_item(&mut self, item: ItemId) -> Vec<(PointRef, PointRef)> {
        let points: Vec<PointRef> = self.peers.keys().filter(|p| p.item == item).copied().collect();
        let mut removed = Vec::new();
        for point in points {
            for peer in self.clear_point(point) {
                removed.push((point, peer));
            }
        }
        removed
    }

    pub fn is_connected(&self, a: PointRef, b: PointRef) -> bool {
        self.peers.get(&a).is_some_and(|list| list.contains(&b))
    }

    /// Whether `point` has any peer on `item`.
    pub fn is_connected_to_item(&self, point: PointRef, item: ItemId) -> bool {
        self.peers
            .get(&point)
            .is_some_and(|list| list.iter().any(|p| p.item == item))
    }

    /// Peers of `point` in connection order.
    pub fn peers(&self, point: PointRef) -> &[PointRef] {
        self.peers.get(&point).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_peers(&self, point: PointRef) -> bool {
        self.peers.contains_key(&point)
    }

    /// Each edge once, smaller endpoint first, in sorted order.
    pub fn edges(&self) -> Vec<(PointRef, PointRef)> {
        let mut edges: Vec<(PointRef, PointRef)> = self
            .peers
            .iter()
            .flat_map(|(a, list)| list.iter().filter(move |b| a < *b).map(move |b| (*a, *b)))
            .collect();
        edges.sort();
        edges
    }

    /// Edges with both endpoints on items accepted by `keep`.
    pub fn edges_within(&self, keep: impl Fn(ItemId) -> bool) -> Vec<(PointRef, PointRef)> {
        self.edges()
            .into_iter()
            .filter(|(a, b)| keep(a.item) && keep(b.item))
            .collect()
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.peers.values().map(Vec::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn clear(&mut self) {
        self.peers.clear();
    }

    /// Every edge is present in both directions and never joins an item to itself.
    pub fn is_symmetric(&self) -> bool {
        self.peers.iter().all(|(a, list)| {
            list.iter()
                .all(|b| a.item != b.item && self.peers(*b).contains(a))
        })
    }
}
