use crate::client::MusterClient;
use crate::collective::helpers::{CollectiveTag, collective_recv, collective_send};
use crate::error::{MusterError, Result};
use crate::transport::buffer_pool::PooledBuf;
use crate::types::Rank;
use futures::future::try_join_all;

/// Variable-length byte gather: rank `k` contributes `sizes[k]` bytes,
/// landing at `[offsets[k], offsets[k] + sizes[k])` of the root's receive
/// buffer.
///
/// `recv_sizes` and `recv_offsets` are root-only inputs (index = sender
/// rank); non-root ranks pass `None` and only contribute `send`. Returns
/// the filled receive buffer on root, `None` elsewhere.
pub(crate) async fn gather_bytes_variable(
    client: &MusterClient,
    send: &[u8],
    recv_sizes: Option<&[u64]>,
    recv_offsets: Option<&[u64]>,
    root: Rank,
    tag: CollectiveTag,
) -> Result<Option<PooledBuf>> {
    let world = client.world_size();
    let rank = client.rank();

    if rank != root {
        collective_send(client, root, send, "gatherv", tag).await?;
        return Ok(None);
    }

    let sizes = recv_sizes.expect("root gatherv requires per-rank sizes");
    let offsets = recv_offsets.expect("root gatherv requires per-rank offsets");
    debug_assert_eq!(sizes.len(), world as usize);
    debug_assert_eq!(offsets.len(), world as usize);
    debug_assert_eq!(sizes[root as usize] as usize, send.len());

    let total: u64 = sizes.iter().sum();
    let mut buf = client.pool().checkout(total as usize);

    let futs: Vec<_> = (0..world)
        .filter(|&r| r != root)
        .map(|r| async move {
            let expected = sizes[r as usize] as usize;
            let data = collective_recv(client, r, "gatherv", tag, expected).await?;
            if data.len() != expected {
                return Err(MusterError::BufferSizeMismatch {
                    expected,
                    actual: data.len(),
                });
            }
            Ok((r, data))
        })
        .collect();
    let chunks = try_join_all(futs).await?;

    // Each segment lands at its rank-computed, pre-reserved offset; arrival
    // order is irrelevant. The root's own bytes occupy their segment too.
    let own = offsets[root as usize] as usize;
    buf[own..own + send.len()].copy_from_slice(send);
    for (r, data) in chunks {
        let off = offsets[r as usize] as usize;
        buf[off..off + data.len()].copy_from_slice(&data);
    }
    Ok(Some(buf))
}
