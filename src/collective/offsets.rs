//! Placement computation for the variable-length receive buffer.

/// Convert a sequence of per-rank sizes `[s0..sN)` to placement offsets
/// `[o0..oN)` where `o[0] = 0` and `o[k] = o[k-1] + s[k-1]`.
///
/// Pure and root-only: the offsets lay out each sender's segment in the
/// root's receive buffer, contiguous and in rank order. Zero-size entries
/// yield repeated offsets.
pub(crate) fn offsets_from_sizes(sizes: &[u64]) -> Vec<u64> {
    let mut offsets = vec![0u64; sizes.len()];
    for k in 1..sizes.len() {
        offsets[k] = offsets[k - 1] + sizes[k - 1];
    }
    offsets
}
