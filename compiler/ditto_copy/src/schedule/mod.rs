//! Dependency-ordered emission.
//!
//! A member whose targets include other pending members cannot emit until
//! those members are registered. Such members are deferred; after each
//! filter pass the queue is re-driven until it empties or a full retry pass
//! makes no progress. Progress is measured by queue size, not a retry
//! count, so a true cycle or a permanently missing dependency stalls after
//! exactly one unproductive pass.

mod queue;

pub use queue::{Deferred, DependencyQueue, DurableRef};

use ditto_ir::SymbolKey;

use crate::member::Member;
use crate::registry::{GeneratedFragment, SymbolRegistry};
use crate::GenerateError;

/// What the scheduler needs from the generation pass.
pub trait Redrive {
    /// Re-validate the candidate behind a durable reference.
    ///
    /// `Ok(None)` drops the entry (the candidate no longer validates); the
    /// driver is responsible for recording why.
    fn materialize(&mut self, durable: &DurableRef) -> Result<Option<Member>, GenerateError>;

    /// Transform and emit a member whose dependencies are all registered,
    /// returning the text to register for it.
    fn emit(&mut self, member: &Member, hint: &str) -> Result<GeneratedFragment, GenerateError>;
}

/// Outcome of offering one member.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Offer {
    Emitted,
    Deferred,
    /// Already registered in this group.
    Skipped,
}

/// A member dropped because its dependencies never became available.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Stalled {
    pub key: SymbolKey,
    pub hint: String,
    /// Dependencies that were still unregistered, when known.
    pub missing: Vec<SymbolKey>,
}

/// Drives the deferred queue against the registry.
#[derive(Debug, Default)]
pub struct DependencyScheduler {
    queue: DependencyQueue,
}

impl DependencyScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_queue(queue: DependencyQueue) -> Self {
        DependencyScheduler { queue }
    }

    pub fn queue(&self) -> &DependencyQueue {
        &self.queue
    }

    /// Emit `member` now if every dependency is registered, otherwise defer.
    pub fn offer(
        &self,
        registry: &SymbolRegistry,
        member: Member,
        hint: String,
        driver: &mut impl Redrive,
    ) -> Result<Offer, GenerateError> {
        if registry.is_registered(&member.key) {
            return Ok(Offer::Skipped);
        }
        if registry.all_registered(&member.dependencies) {
            let generated = driver.emit(&member, &hint)?;
            registry.register(member.key, generated);
            Ok(Offer::Emitted)
        } else {
            tracing::debug!(key = %member.key, deps = member.dependencies.len(), "deferred");
            self.queue.push(member, hint);
            Ok(Offer::Deferred)
        }
    }

    /// Retry deferred members until the queue empties or stalls.
    ///
    /// Stalled entries are removed from the queue and returned.
    #[tracing::instrument(level = "debug", skip_all, fields(queued = self.queue.len()))]
    pub fn redrive(
        &self,
        registry: &SymbolRegistry,
        driver: &mut impl Redrive,
    ) -> Result<Vec<Stalled>, GenerateError> {
        let mut pass = 0usize;
        loop {
            let before = self.queue.len();
            if before == 0 {
                return Ok(Vec::new());
            }
            pass += 1;
            tracing::debug!(pass, queued = before, "retry pass");

            for entry in self.queue.drain() {
                if registry.is_registered(entry.key()) {
                    continue;
                }
                let (member, hint) = match entry {
                    Deferred::Live { member, hint } => (*member, hint),
                    Deferred::Durable(durable) => match driver.materialize(&durable)? {
                        Some(member) => (member, durable.hint),
                        None => continue,
                    },
                };
                self.offer(registry, member, hint, driver)?;
            }

            if self.queue.len() >= before {
                return self.take_stalled(registry, driver);
            }
        }
    }

    fn take_stalled(
        &self,
        registry: &SymbolRegistry,
        driver: &mut impl Redrive,
    ) -> Result<Vec<Stalled>, GenerateError> {
        let mut stalled = Vec::new();
        for entry in self.queue.drain() {
            let missing = match &entry {
                Deferred::Live { member, .. } => unregistered(registry, member),
                Deferred::Durable(durable) => driver
                    .materialize(durable)?
                    .map(|member| unregistered(registry, &member))
                    .unwrap_or_default(),
            };
            stalled.push(Stalled {
                key: entry.key().clone(),
                hint: entry.hint().to_owned(),
                missing,
            });
        }
        if !stalled.is_empty() {
            let keys: Vec<&str> = stalled.iter().map(|s| s.key.as_str()).collect();
            tracing::warn!(
                count = stalled.len(),
                members = ?keys,
                "dependency queue stalled; members dropped without emission"
            );
        }
        Ok(stalled)
    }
}

fn unregistered(registry: &SymbolRegistry, member: &Member) -> Vec<SymbolKey> {
    member
        .dependencies
        .iter()
        .filter(|dep| !registry.is_registered(dep))
        .cloned()
        .collect()
}
