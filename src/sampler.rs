// Rate sampler: cumulative counters in, per-interval byte deltas out.
//
// Counters are summed across interfaces before the delta is taken. When an adapter
// stops contributing (goes down) its counters vanish from the sum, which shows up as
// a one-tick dip or spike; the following tick is accurate again.

use crate::interface_repo::{InterfaceRepo, InterfaceSource};
use crate::models::{AggregateCounters, InterfaceSnapshot, RateSample};
use crate::selector::{RelevantAdapters, select_relevant_adapters};

/// Whether an interface table row counts towards this tick's aggregate.
pub fn contributes(snapshot: &InterfaceSnapshot, relevant: &RelevantAdapters) -> bool {
    snapshot.class.is_monitored() && snapshot.is_up() && relevant.contains(&snapshot.identity)
}

/// Sums the contributing rows; also returns how many rows contributed.
pub fn aggregate(
    table: &[InterfaceSnapshot],
    relevant: &RelevantAdapters,
) -> (AggregateCounters, usize) {
    table
        .iter()
        .filter(|snapshot| contributes(snapshot, relevant))
        .fold(
            (AggregateCounters::default(), 0),
            |(mut counters, count), snapshot| {
                counters.accumulate(snapshot.received_bytes, snapshot.sent_bytes);
                (counters, count + 1)
            },
        )
}

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub adapter_count: usize,
    pub sample: RateSample,
}

/// Holds the previous aggregate; every tick replaces it.
#[derive(Debug, Clone, Default)]
pub struct RateSampler {
    previous: AggregateCounters,
}

impl RateSampler {
    pub fn new(initial: AggregateCounters) -> Self {
        Self { previous: initial }
    }

    /// Takes the throwaway first reading so the first reported rate covers one interval
    /// instead of everything counted since boot.
    pub fn primed<S: InterfaceSource>(repo: &InterfaceRepo<S>, relevant: &RelevantAdapters) -> Self {
        let (initial, _) = aggregate(&repo.interface_table(), relevant);
        Self::new(initial)
    }

    pub fn previous(&self) -> AggregateCounters {
        self.previous
    }

    /// Wraparound-safe delta from the stored aggregate to `current`, which becomes the new previous.
    pub fn advance(&mut self, current: AggregateCounters) -> RateSample {
        let sample = current.delta_since(&self.previous);
        self.previous = current;
        sample
    }

    pub fn tick<S: InterfaceSource>(
        &mut self,
        repo: &InterfaceRepo<S>,
        relevant: &RelevantAdapters,
    ) -> TickReport {
        let (current, adapter_count) = aggregate(&repo.interface_table(), relevant);
        let sample = self.advance(current);
        tracing::trace!(
            adapters = adapter_count,
            down = sample.down,
            up = sample.up,
            "tick"
        );
        TickReport {
            adapter_count,
            sample,
        }
    }
}

/// Everything one sampling loop owns: the source, the startup adapter set and the sampler.
pub struct Monitor<S> {
    repo: InterfaceRepo<S>,
    relevant: RelevantAdapters,
    sampler: RateSampler,
}

impl<S: InterfaceSource> Monitor<S> {
    /// Selects the relevant adapters once, then primes the sampler.
    pub fn start(repo: InterfaceRepo<S>) -> Self {
        let relevant = select_relevant_adapters(&repo);
        Self::with_relevant(repo, relevant)
    }

    pub fn with_relevant(repo: InterfaceRepo<S>, relevant: RelevantAdapters) -> Self {
        let sampler = RateSampler::primed(&repo, &relevant);
        Self {
            repo,
            relevant,
            sampler,
        }
    }

    pub fn relevant(&self) -> &RelevantAdapters {
        &self.relevant
    }

    pub fn repo(&self) -> &InterfaceRepo<S> {
        &self.repo
    }

    pub fn sampler(&self) -> &RateSampler {
        &self.sampler
    }

    pub fn tick(&mut self) -> TickReport {
        self.sampler.tick(&self.repo, &self.relevant)
    }
}
