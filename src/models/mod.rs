// Domain models

mod interface;
mod rate;

/// Cumulative byte counter as reported by the OS interface table.
pub type Counter = u32;

pub use interface::{
    AdapterInfo, AdminStatus, InterfaceClass, InterfaceIdentity, InterfaceSnapshot,
    OperationalState,
};
pub use rate::{AggregateCounters, COUNTER_MODULUS, RateSample, counter_delta};
