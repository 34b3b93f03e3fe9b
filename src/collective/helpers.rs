use crate::client::MusterClient;
use crate::error::{MusterError, Result};
use crate::transport::buffer_pool::PooledBuf;
use crate::types::Rank;

/// Wire tag carried by every frame of one collective call.
pub(crate) type CollectiveTag = u64;

/// Phase of the top-level direct exchange.
pub(crate) const PHASE_DATA: u16 = 0;
/// Phase of the nested size exchange inside a serialized gather.
pub(crate) const PHASE_SIZES: u16 = 1;
/// Phase of the variable-length payload exchange.
pub(crate) const PHASE_PAYLOAD: u16 = 2;

/// Pack a call identifier and phase into one wire tag.
///
/// Layout: `[63:8] call sequence | [7:0] phase`. The call sequence comes
/// from `MusterClient::next_collective_tag`, so the two rounds of one
/// serialized gather, and the rounds of distinct concurrent calls, can
/// never cross-match.
pub(crate) fn phase_tag(call: u64, phase: u16) -> CollectiveTag {
    (call << 8) | phase as u64
}

/// Send bytes to a peer with timeout, wrapping errors as `CollectiveFailed`.
pub(crate) async fn collective_send(
    client: &MusterClient,
    dest: Rank,
    data: &[u8],
    operation: &'static str,
    tag: CollectiveTag,
) -> Result<()> {
    let timeout = client.config().collective_timeout;
    match tokio::time::timeout(timeout, client.send_bytes_tagged(dest, tag, data)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(MusterError::CollectiveFailed {
            operation,
            rank: dest,
            reason: e.to_string(),
        }),
        Err(_) => Err(MusterError::CollectiveFailed {
            operation,
            rank: dest,
            reason: format!("send timed out after {}s", timeout.as_secs()),
        }),
    }
}

/// Receive bytes from a peer with timeout, wrapping errors as `CollectiveFailed`.
pub(crate) async fn collective_recv(
    client: &MusterClient,
    src: Rank,
    operation: &'static str,
    tag: CollectiveTag,
    expected_size: usize,
) -> Result<PooledBuf> {
    let timeout = client.config().collective_timeout;
    match tokio::time::timeout(timeout, client.recv_bytes_tagged(src, tag, expected_size)).await {
        Ok(Ok(buf)) => Ok(buf),
        Ok(Err(e)) => Err(MusterError::CollectiveFailed {
            operation,
            rank: src,
            reason: e.to_string(),
        }),
        Err(_) => Err(MusterError::CollectiveFailed {
            operation,
            rank: src,
            reason: format!("recv timed out after {}s", timeout.as_secs()),
        }),
    }
}
