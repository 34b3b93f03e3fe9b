use crate::collective::Gatherable;
use crate::error::Result;
use crate::types::Rank;

/// Blocking wrapper around [`MusterClient`](super::MusterClient).
///
/// Owns a `tokio::runtime::Runtime` and calls `block_on()` for each
/// operation, giving one synchronous thread of control per participant.
pub struct SyncClient {
    inner: super::MusterClient,
    rt: tokio::runtime::Runtime,
}

impl SyncClient {
    /// Wire up an in-process group and return sync clients for each rank.
    pub fn bootstrap_local(world_size: u32) -> Result<Vec<Self>> {
        super::MusterClient::bootstrap_local(world_size)?
            .into_iter()
            .map(Self::from_async)
            .collect()
    }

    /// Wrap an existing async client with a new tokio runtime.
    pub fn from_async(inner: super::MusterClient) -> Result<Self> {
        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| crate::error::MusterError::transport(format!("tokio runtime: {e}")))?;
        Ok(Self { inner, rt })
    }

    /// This client's rank within the group (0-indexed).
    pub fn rank(&self) -> Rank {
        self.inner.rank()
    }

    /// Total number of ranks in the group.
    pub fn world_size(&self) -> u32 {
        self.inner.world_size()
    }

    /// Gather one value from every rank.
    pub fn gather<T: Gatherable>(&self, value: &T, root: Rank) -> Result<Option<Vec<T>>> {
        self.rt.block_on(self.inner.gather(value, root))
    }

    /// Gather one value from every rank into a caller-provided buffer.
    pub fn gather_into<T: Gatherable>(&self, value: &T, out: &mut [T], root: Rank) -> Result<()> {
        self.rt.block_on(self.inner.gather_into(value, out, root))
    }

    /// Contribute one value to a gather without receiving the result.
    pub fn gather_send<T: Gatherable>(&self, value: &T, root: Rank) -> Result<()> {
        self.rt.block_on(self.inner.gather_send(value, root))
    }

    /// Gather a slice of values from every rank.
    pub fn gather_slice<T: Gatherable>(&self, values: &[T], root: Rank) -> Result<Option<Vec<T>>> {
        self.rt.block_on(self.inner.gather_slice(values, root))
    }

    /// Gather a slice of values into a caller-provided buffer.
    pub fn gather_slice_into<T: Gatherable>(
        &self,
        values: &[T],
        out: &mut [T],
        root: Rank,
    ) -> Result<()> {
        self.rt
            .block_on(self.inner.gather_slice_into(values, out, root))
    }

    /// Contribute a slice of values without receiving the result.
    pub fn gather_slice_send<T: Gatherable>(&self, values: &[T], root: Rank) -> Result<()> {
        self.rt.block_on(self.inner.gather_slice_send(values, root))
    }
}
