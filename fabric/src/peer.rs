/*
 * SPDX-FileCopyrightText: Copyright 2024 LG Electronics Inc.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Component E: the peer registry. An owning, ordered container of
//! downstream peers keyed by symbolic-id, with expiry-based liveness —
//! owning containers of value-typed peers keyed by symbolic-id, with
//! identity tokens moving (not copying) into and out of the container.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use common::constants::symbolic_id_name;

/// A downstream neighbour known by opaque identity and symbolic ID.
#[derive(Debug, Clone)]
pub struct Peer {
    pub identity: Vec<u8>,
    pub symbolic_id: u8,
    pub expiry: Instant,
}

impl Peer {
    pub fn name(&self) -> &'static str {
        symbolic_id_name(self.symbolic_id)
    }
}

/// Ordered collection of peers, oldest-refreshed first, so purge is a
/// prefix operation.
#[derive(Debug, Default)]
pub struct PeerRegistry {
    peers: VecDeque<Peer>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        PeerRegistry { peers: VecDeque::new() }
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Peer> {
        self.peers.iter()
    }

    /// Admits (refreshes) a peer: an O(n) scan removes any existing peer
    /// with the same symbolic-id, then the new peer is appended to the
    /// tail. Tail insertion keeps the registry ordered oldest-first, which
    /// is what makes `purge` a cheap prefix scan.
    pub fn admit(&mut self, identity: Vec<u8>, symbolic_id: u8, now: Instant, expiry_span: Duration) {
        if let Some(pos) = self.peers.iter().position(|p| p.symbolic_id == symbolic_id) {
            self.peers.remove(pos);
        }
        self.peers.push_back(Peer { identity, symbolic_id, expiry: now + expiry_span });
    }

    /// Pops the head for load-balancing a request to the next eligible
    /// peer. Non-goal, preserved from the source: capability-aware
    /// selection is not implemented — any peer is acceptable for any
    /// request.
    pub fn next(&mut self) -> Option<Peer> {
        self.peers.pop_front()
    }

    /// Removes every peer whose expiry has passed, stopping at the first
    /// unexpired peer (relies on the oldest-first ordering invariant).
    /// Returns the removed peers, e.g. for logging.
    pub fn purge(&mut self, now: Instant) -> Vec<Peer> {
        let mut removed = Vec::new();
        while let Some(front) = self.peers.front() {
            if front.expiry <= now {
                removed.push(self.peers.pop_front().expect("front just checked"));
            } else {
                break;
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::constants::{ID_LINE, ID_PRINTING, ID_QAS};

    fn expiry_span() -> Duration {
        Duration::from_millis(common::constants::HEARTBEAT_INTERVAL_MS * common::constants::HEARTBEAT_LIVENESS as u64)
    }

    #[test]
    fn admit_replaces_existing_symbolic_id_and_moves_to_tail() {
        let mut registry = PeerRegistry::new();
        let t0 = Instant::now();
        registry.admit(vec![1], ID_LINE, t0, expiry_span());
        registry.admit(vec![2], ID_QAS, t0 + Duration::from_millis(10), expiry_span());
        registry.admit(vec![3], ID_LINE, t0 + Duration::from_millis(20), expiry_span());

        assert_eq!(registry.len(), 2, "re-admitting Line should not duplicate it");
        let ids: Vec<u8> = registry.iter().map(|p| p.symbolic_id).collect();
        assert_eq!(ids, vec![ID_QAS, ID_LINE], "refreshed Line moves to the tail");
    }

    /// No two entries share a symbolic-id, even under heavy churn.
    #[test]
    fn uniqueness_invariant_holds_after_many_admits() {
        let mut registry = PeerRegistry::new();
        let t0 = Instant::now();
        for i in 0..50u64 {
            let id = [ID_LINE, ID_QAS, ID_PRINTING][i as usize % 3];
            registry.admit(vec![i as u8], id, t0 + Duration::from_millis(i), expiry_span());
        }
        let mut seen = std::collections::HashSet::new();
        for peer in registry.iter() {
            assert!(seen.insert(peer.symbolic_id), "duplicate symbolic-id in registry");
        }
    }

    /// Ordering is non-decreasing expiry.
    #[test]
    fn ordering_is_non_decreasing_expiry() {
        let mut registry = PeerRegistry::new();
        let t0 = Instant::now();
        registry.admit(vec![1], ID_LINE, t0, expiry_span());
        registry.admit(vec![2], ID_QAS, t0 + Duration::from_millis(5), expiry_span());
        registry.admit(vec![3], ID_PRINTING, t0 + Duration::from_millis(10), expiry_span());

        let expiries: Vec<Instant> = registry.iter().map(|p| p.expiry).collect();
        assert!(expiries.windows(2).all(|w| w[0] <= w[1]));
    }

    /// Purge is idempotent and removes only expired peers.
    #[test]
    fn purge_removes_only_expired_and_is_idempotent() {
        let mut registry = PeerRegistry::new();
        let t0 = Instant::now();
        let short = Duration::from_millis(1);
        let long = expiry_span();
        registry.admit(vec![1], ID_LINE, t0, short);
        registry.admit(vec![2], ID_QAS, t0, long);

        let now = t0 + Duration::from_millis(50);
        let removed = registry.purge(now);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].symbolic_id, ID_LINE);
        assert_eq!(registry.len(), 1);

        let removed_again = registry.purge(now);
        assert!(removed_again.is_empty(), "purge must be idempotent");
    }

    #[test]
    fn next_pops_head_in_fifo_order() {
        let mut registry = PeerRegistry::new();
        let t0 = Instant::now();
        registry.admit(vec![1], ID_LINE, t0, expiry_span());
        registry.admit(vec![2], ID_QAS, t0, expiry_span());
        assert_eq!(registry.next().unwrap().symbolic_id, ID_LINE);
        assert_eq!(registry.next().unwrap().symbolic_id, ID_QAS);
        assert!(registry.next().is_none());
    }
}
