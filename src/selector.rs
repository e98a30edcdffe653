// Adapter selector: the set of interfaces worth monitoring, decided once at startup

use crate::interface_repo::{InterfaceRepo, InterfaceSource};
use crate::models::InterfaceIdentity;
use std::collections::BTreeSet;

/// Identities of the wired and wireless adapters known at startup. Never changes afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelevantAdapters(BTreeSet<InterfaceIdentity>);

impl RelevantAdapters {
    pub fn contains(&self, identity: &InterfaceIdentity) -> bool {
        self.0.contains(identity.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InterfaceIdentity> {
        self.0.iter()
    }
}

impl<I: Into<InterfaceIdentity>> FromIterator<I> for RelevantAdapters {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Every inventory adapter of class Wired or Wireless, regardless of operational state.
/// A failed inventory query gives an empty set: nothing is monitored and rates stay at zero.
pub fn select_relevant_adapters<S: InterfaceSource>(repo: &InterfaceRepo<S>) -> RelevantAdapters {
    let relevant: RelevantAdapters = repo
        .adapter_inventory()
        .into_iter()
        .filter(|adapter| adapter.class.is_monitored())
        .map(|adapter| adapter.description)
        .collect();

    if relevant.is_empty() {
        tracing::warn!(
            operation = "select_relevant_adapters",
            "No wired or wireless adapters found; rates will stay at 0 B"
        );
    } else {
        tracing::info!(
            operation = "select_relevant_adapters",
            adapters = relevant.len(),
            "Monitoring adapters"
        );
        for identity in relevant.iter() {
            tracing::debug!(adapter = %identity, "relevant adapter");
        }
    }
    relevant
}
