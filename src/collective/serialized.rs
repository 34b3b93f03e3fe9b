use crate::client::MusterClient;
use crate::codec::{Decoder, encode_values};
use crate::collective::gather::gather_direct;
use crate::collective::gatherv::gather_bytes_variable;
use crate::collective::helpers::{CollectiveTag, PHASE_PAYLOAD, PHASE_SIZES, phase_tag};
use crate::collective::offsets::offsets_from_sizes;
use crate::error::Result;
use crate::types::Rank;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serialized gather for values without a fixed-layout descriptor.
///
/// Two-phase protocol, executed identically by every participant — the
/// size exchange and the payload exchange are both group-wide, so no rank
/// may skip one even when its outputs are discarded:
///
/// 1. encode the local values into one contiguous payload
/// 2. gather the encoded sizes (a direct gather of `u64`s)
/// 3. root: prefix-sum the sizes into placement offsets
/// 4. variable-length payload exchange at those offsets
/// 5. root: decode each sender's segment in rank order; the root's own
///    values are copied from memory, skipping the codec round-trip
///
/// Returns `Some(assembled)` on root, `None` on non-root ranks.
pub(crate) async fn gather_serialized<T>(
    client: &MusterClient,
    send: &[T],
    root: Rank,
    call: CollectiveTag,
) -> Result<Option<Vec<T>>>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    let rank = client.rank();
    let n = send.len();

    let payload = encode_values(send)?;

    // Sizes are plain integers, so this recurses into the direct path.
    let sizes = gather_direct::<u64>(
        client,
        &[payload.len() as u64],
        root,
        phase_tag(call, PHASE_SIZES),
    )
    .await?;

    let offsets = sizes.as_deref().map(offsets_from_sizes);

    let recv = gather_bytes_variable(
        client,
        &payload,
        sizes.as_deref(),
        offsets.as_deref(),
        root,
        phase_tag(call, PHASE_PAYLOAD),
    )
    .await?;

    if rank != root {
        return Ok(None);
    }

    let offsets = offsets.expect("root computed offsets");
    let buf = recv.expect("root received the payload buffer");
    let world = client.world_size();

    let mut out = Vec::with_capacity(n * world as usize);
    for r in 0..world {
        if r == root {
            // Root self-path: local values go in directly, no decode.
            out.extend_from_slice(send);
        } else {
            let mut dec = Decoder::at(&buf, offsets[r as usize]);
            for _ in 0..n {
                out.push(dec.read::<T>()?);
            }
        }
    }
    Ok(Some(out))
}
