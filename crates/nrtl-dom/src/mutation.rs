//! Mutation observation
//!
//! Journaled structural edits are routed to registered observers. One
//! `deliver` call groups everything an observer saw into one pending
//! batch, matching how MutationObserver callbacks receive their record
//! lists.

use crate::{DomTree, NodeId};

/// One observed structural change (childList-style)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    /// Parent whose child list changed
    pub target: NodeId,
    /// Nodes added, in insertion order
    pub added: Vec<NodeId>,
    /// Nodes removed
    pub removed: Vec<NodeId>,
}

/// Observer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u32);

/// What an observer watches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverOptions {
    /// Report child list changes
    pub child_list: bool,
    /// Watch the whole subtree rather than direct children only
    pub subtree: bool,
}

impl ObserverOptions {
    /// Whole-subtree childList watch
    pub const DEEP: ObserverOptions = ObserverOptions { child_list: true, subtree: true };
    /// Direct-children-only childList watch
    pub const SHALLOW: ObserverOptions = ObserverOptions { child_list: true, subtree: false };
}

#[derive(Debug)]
struct Observer {
    target: NodeId,
    options: ObserverOptions,
    pending: Vec<MutationRecord>,
    connected: bool,
}

/// Registry of mutation observers over one tree
#[derive(Debug, Default)]
pub struct ObserverRegistry {
    observers: Vec<Observer>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a new observer to a target node
    pub fn observe(&mut self, target: NodeId, options: ObserverOptions) -> ObserverId {
        let id = ObserverId(self.observers.len() as u32);
        self.observers.push(Observer {
            target,
            options,
            pending: Vec::new(),
            connected: true,
        });
        id
    }

    /// Disconnect an observer, dropping its pending records
    pub fn disconnect(&mut self, id: ObserverId) {
        if let Some(obs) = self.observers.get_mut(id.0 as usize) {
            obs.connected = false;
            obs.pending.clear();
        }
    }

    /// Disconnect and re-attach an observer to a new target
    pub fn reobserve(&mut self, id: ObserverId, target: NodeId, options: ObserverOptions) {
        if let Some(obs) = self.observers.get_mut(id.0 as usize) {
            tracing::debug!(?id, ?target, "re-targeting observer");
            obs.pending.clear();
            obs.target = target;
            obs.options = options;
            obs.connected = true;
        }
    }

    /// Route journaled records to interested observers
    pub fn deliver(&mut self, tree: &DomTree, records: &[MutationRecord]) {
        for obs in self.observers.iter_mut() {
            if !obs.connected || !obs.options.child_list {
                continue;
            }
            for record in records {
                let interested = if obs.options.subtree {
                    tree.contains(obs.target, record.target)
                } else {
                    record.target == obs.target
                };
                if interested {
                    obs.pending.push(record.clone());
                }
            }
        }
    }

    /// Drain one observer's pending records as a single batch.
    /// Returns None when nothing is pending (no callback fires).
    pub fn take_batch(&mut self, id: ObserverId) -> Option<Vec<MutationRecord>> {
        let obs = self.observers.get_mut(id.0 as usize)?;
        if !obs.connected || obs.pending.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut obs.pending))
    }

    /// Whether an observer is currently connected
    pub fn is_connected(&self, id: ObserverId) -> bool {
        self.observers
            .get(id.0 as usize)
            .is_some_and(|o| o.connected)
    }

    /// Current target of an observer
    pub fn target_of(&self, id: ObserverId) -> Option<NodeId> {
        self.observers
            .get(id.0 as usize)
            .filter(|o| o.connected)
            .map(|o| o.target)
    }
}
