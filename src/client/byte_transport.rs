use crate::error::Result;
use crate::transport::buffer_pool::PooledBuf;
use crate::types::Rank;
use std::sync::Arc;

use super::MusterClient;

impl MusterClient {
    /// Send raw bytes to a peer with a u64 tag.
    pub async fn send_bytes_tagged(&self, dest: Rank, tag: u64, data: &[u8]) -> Result<()> {
        let peer = self.peer(dest)?;
        peer.send_tagged(tag, data).await
    }

    /// Receive tagged raw bytes from a peer.
    ///
    /// `expected_size` is advisory and forwarded to the transport as a
    /// pre-allocation hint.
    pub async fn recv_bytes_tagged(
        &self,
        src: Rank,
        tag: u64,
        expected_size: usize,
    ) -> Result<PooledBuf> {
        let peer = self.peer(src)?;
        let data = peer.recv_tagged(tag, expected_size).await?;
        Ok(PooledBuf::from_vec(data, Arc::clone(self.pool())))
    }
}
