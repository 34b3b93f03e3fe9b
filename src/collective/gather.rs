use crate::client::MusterClient;
use crate::collective::helpers::{CollectiveTag, collective_recv, collective_send};
use crate::error::{MusterError, Result};
use crate::types::{Rank, Transmissible, bytes_of, extend_from_bytes};
use futures::future::try_join_all;

/// Direct gather: root collects the fixed-layout elements of `send` from
/// each rank into one buffer ordered by rank.
///
/// Uses flat gather: root posts N-1 concurrent recvs, non-root ranks send
/// their elements to root. Every participant contributes the same element
/// count, so the chunk size is known on both sides in advance.
///
/// Returns `Some(assembled)` on root, `None` on non-root ranks.
pub(crate) async fn gather_direct<T: Transmissible>(
    client: &MusterClient,
    send: &[T],
    root: Rank,
    tag: CollectiveTag,
) -> Result<Option<Vec<T>>> {
    let world = client.world_size();
    let rank = client.rank();
    let chunk_bytes = send.len() * T::DESCRIPTOR.size_in_bytes();

    if world <= 1 {
        // Single participant: the root's contribution is the whole result.
        return Ok(Some(send.to_vec()));
    }

    if rank != root {
        collective_send(client, root, bytes_of(send), "gather", tag).await?;
        return Ok(None);
    }

    // Concurrently receive from all other ranks.
    let futs: Vec<_> = (0..world)
        .filter(|&r| r != root)
        .map(|r| async move {
            let data = collective_recv(client, r, "gather", tag, chunk_bytes).await?;
            if data.len() != chunk_bytes {
                return Err(MusterError::BufferSizeMismatch {
                    expected: chunk_bytes,
                    actual: data.len(),
                });
            }
            Ok((r, data))
        })
        .collect();
    let chunks = try_join_all(futs).await?;

    // Assemble in ascending rank order; arrival order is irrelevant. The
    // root's own elements are copied straight from `send`, no transport
    // round-trip.
    let mut chunks = chunks.into_iter();
    let mut out = Vec::with_capacity(send.len() * world as usize);
    for r in 0..world {
        if r == root {
            out.extend_from_slice(send);
        } else {
            let (from, data) = chunks.next().expect("one chunk per non-root rank");
            debug_assert_eq!(from, r);
            extend_from_bytes(&mut out, &data)?;
        }
    }
    Ok(Some(out))
}
