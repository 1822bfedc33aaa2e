//! Two-tier deferred-member queue.
//!
//! The first [`DEPENDENCY_CACHE_CAPACITY`] deferrals are kept live in a
//! fixed ring. Further deferrals spill into an unbounded overflow that holds
//! only durable references; those members are re-validated from their
//! candidate when retried.

use std::collections::VecDeque;

use ditto_ir::SymbolKey;
use parking_lot::Mutex;

use crate::member::{CandidateRef, Member};
use crate::DEPENDENCY_CACHE_CAPACITY;

/// A re-fetchable reference to a deferred member.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct DurableRef {
    pub origin: CandidateRef,
    pub key: SymbolKey,
    pub hint: String,
}

/// One deferred entry, as handed back by [`DependencyQueue::drain`].
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Deferred {
    Live { member: Box<Member>, hint: String },
    Durable(DurableRef),
}

impl Deferred {
    pub fn key(&self) -> &SymbolKey {
        match self {
            Deferred::Live { member, .. } => &member.key,
            Deferred::Durable(durable) => &durable.key,
        }
    }

    pub fn hint(&self) -> &str {
        match self {
            Deferred::Live { hint, .. } | Deferred::Durable(DurableRef { hint, .. }) => hint,
        }
    }
}

#[derive(Debug)]
struct QueueState {
    /// Live entries; never grows past `capacity`.
    ring: VecDeque<(Member, String)>,
    overflow: VecDeque<DurableRef>,
    capacity: usize,
}

/// Deferred members waiting for their dependencies.
#[derive(Debug)]
pub struct DependencyQueue {
    state: Mutex<QueueState>,
}

impl Default for DependencyQueue {
    fn default() -> Self {
        Self::with_capacity(DEPENDENCY_CACHE_CAPACITY)
    }
}

impl DependencyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A queue keeping at most `capacity` live entries (minimum one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        DependencyQueue {
            state: Mutex::new(QueueState {
                ring: VecDeque::with_capacity(capacity),
                overflow: VecDeque::new(),
                capacity,
            }),
        }
    }

    /// Defer `member`, live if the ring has room, durable otherwise.
    pub fn push(&self, member: Member, hint: String) {
        let mut state = self.state.lock();
        if state.ring.len() < state.capacity {
            state.ring.push_back((member, hint));
        } else {
            tracing::trace!(key = %member.key, "deferral spilled to overflow");
            state.overflow.push_back(DurableRef {
                origin: member.origin,
                key: member.key,
                hint,
            });
        }
    }

    /// Take every entry, live ones first, each tier in deferral order.
    pub fn drain(&self) -> Vec<Deferred> {
        let mut state = self.state.lock();
        let mut entries = Vec::with_capacity(state.ring.len() + state.overflow.len());
        entries.extend(state.ring.drain(..).map(|(member, hint)| Deferred::Live {
            member: Box::new(member),
            hint,
        }));
        entries.extend(state.overflow.drain(..).map(Deferred::Durable));
        entries
    }

    pub fn len(&self) -> usize {
        let state = self.state.lock();
        state.ring.len() + state.overflow.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn live_len(&self) -> usize {
        self.state.lock().ring.len()
    }

    pub fn overflow_len(&self) -> usize {
        self.state.lock().overflow.len()
    }
}
