// Interface snapshot source: OS backends behind one trait, plus retry and degrade-to-empty

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
mod linux;
mod sysinfo_source;
#[cfg(windows)]
mod ip_helper;

use crate::models::{AdapterInfo, InterfaceSnapshot};
use crate::query::{QueryError, fetch_with_retry};
use tracing::instrument;

pub use sysinfo_source::SysinfoSource;
#[cfg(windows)]
pub use ip_helper::IpHelperSource;

/// The two OS queries the sampling core consumes.
///
/// Both take a buffer size hint and may answer `QueryError::BufferTooSmall` with the
/// size they need; `InterfaceRepo` takes care of the retry.
pub trait InterfaceSource: Send {
    /// General adapter inventory: every known adapter with its class, whatever its state.
    fn adapter_inventory(&self, size_hint: usize) -> Result<Vec<AdapterInfo>, QueryError>;

    /// Live interface table with cumulative byte counters.
    fn interface_table(&self, size_hint: usize) -> Result<Vec<InterfaceSnapshot>, QueryError>;
}

/// Buffer sizes used for the first attempt and the ceiling for the single retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    pub initial_buffer_bytes: usize,
    pub max_buffer_bytes: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            initial_buffer_bytes: 1024,
            max_buffer_bytes: 1024 * 1024,
        }
    }
}

#[cfg(windows)]
pub type PlatformSource = IpHelperSource;
#[cfg(not(windows))]
pub type PlatformSource = SysinfoSource;

/// Backend for the target OS.
pub fn default_source() -> PlatformSource {
    PlatformSource::new()
}

pub struct InterfaceRepo<S> {
    source: S,
    limits: QueryLimits,
}

impl<S: InterfaceSource> InterfaceRepo<S> {
    pub fn new(source: S, limits: QueryLimits) -> Self {
        Self { source, limits }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Adapter inventory; any query failure yields an empty list.
    #[instrument(skip(self), fields(repo = "interface", operation = "adapter_inventory"))]
    pub fn adapter_inventory(&self) -> Vec<AdapterInfo> {
        let query = |hint| self.source.adapter_inventory(hint);
        match fetch_with_retry(
            &query,
            self.limits.initial_buffer_bytes,
            self.limits.max_buffer_bytes,
        ) {
            Ok(adapters) => adapters,
            Err(e) => {
                tracing::debug!(error = %e, "adapter inventory query failed");
                Vec::new()
            }
        }
    }

    /// Live interface table; any query failure yields an empty table.
    #[instrument(skip(self), fields(repo = "interface", operation = "interface_table"))]
    pub fn interface_table(&self) -> Vec<InterfaceSnapshot> {
        let query = |hint| self.source.interface_table(hint);
        match fetch_with_retry(
            &query,
            self.limits.initial_buffer_bytes,
            self.limits.max_buffer_bytes,
        ) {
            Ok(table) => table,
            Err(e) => {
                tracing::debug!(error = %e, "interface table query failed");
                Vec::new()
            }
        }
    }
}
