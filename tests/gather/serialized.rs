use super::helpers::run_collective;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

/// N=3, root=0, one variable-length string per rank.
#[tokio::test]
async fn test_gather_strings_rank_order() {
    run_collective(3, |client| async move {
        let rank = client.rank();
        let value = match rank {
            0 => "x".to_string(),
            1 => "yy".to_string(),
            _ => "zzz".to_string(),
        };

        let out = client.gather(&value, 0).await.unwrap();
        if rank == 0 {
            assert_eq!(
                out,
                Some(vec!["x".to_string(), "yy".to_string(), "zzz".to_string()])
            );
        } else {
            assert_eq!(out, None);
        }
    })
    .await;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Record {
    id: u32,
    name: String,
    samples: Vec<f64>,
}

muster::gather_via_codec!(Record);

/// Nested structs with data-dependent encoded sizes, interior root.
#[tokio::test]
async fn test_gather_records_varying_sizes() {
    run_collective(4, |client| async move {
        let rank = client.rank();
        let value = Record {
            id: rank,
            name: "r".repeat(rank as usize * 3),
            samples: (0..rank).map(f64::from).collect(),
        };

        let out = client.gather(&value, 1).await.unwrap();
        if rank == 1 {
            let out = out.unwrap();
            assert_eq!(out.len(), 4);
            for (k, rec) in out.iter().enumerate() {
                assert_eq!(rec.id, k as u32);
                assert_eq!(rec.name.len(), k * 3);
                assert_eq!(rec.samples.len(), k);
            }
        } else {
            assert_eq!(out, None);
        }
    })
    .await;
}

/// Multiple values per rank: decode order within a sender's segment must
/// mirror encode order.
#[tokio::test]
async fn test_gather_slice_of_strings() {
    run_collective(3, |client| async move {
        let rank = client.rank();
        let values = [format!("{rank}-first"), format!("{rank}-second")];

        let out = client.gather_slice(&values, 2).await.unwrap();
        if rank == 2 {
            let out = out.unwrap();
            assert_eq!(
                out,
                vec![
                    "0-first", "0-second", "1-first", "1-second", "2-first", "2-second",
                ]
            );
        }
    })
    .await;
}

/// A scalar whose encoded size differs per rank (`Vec` as the value type).
#[tokio::test]
async fn test_gather_vec_values() {
    run_collective(3, |client| async move {
        let rank = client.rank();
        let value: Vec<u32> = (0..rank * 2).collect();

        let out = client.gather(&value, 0).await.unwrap();
        if rank == 0 {
            assert_eq!(
                out,
                Some(vec![vec![], vec![0, 1], vec![0, 1, 2, 3]])
            );
        }
    })
    .await;
}

static DECODE_CALLS: AtomicUsize = AtomicUsize::new(0);

/// A value type that counts how many times it is decoded.
#[derive(Debug, Clone, PartialEq)]
struct Tracked(u32);

impl Serialize for Tracked {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Tracked {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        DECODE_CALLS.fetch_add(1, Ordering::SeqCst);
        u32::deserialize(deserializer).map(Tracked)
    }
}

muster::gather_via_codec!(Tracked);

/// The root's own contribution must reach the assembled result without a
/// codec round-trip: only the other ranks' segments are decoded.
#[tokio::test]
async fn test_root_self_path_skips_decode() {
    let before = DECODE_CALLS.load(Ordering::SeqCst);
    run_collective(4, |client| async move {
        let rank = client.rank();
        let values = [Tracked(rank), Tracked(rank + 100)];

        let out = client.gather_slice(&values, 3).await.unwrap();
        if rank == 3 {
            let out = out.unwrap();
            assert_eq!(out.len(), 8);
            for k in 0..4u32 {
                assert_eq!(out[k as usize * 2], Tracked(k));
                assert_eq!(out[k as usize * 2 + 1], Tracked(k + 100));
            }
        }
    })
    .await;
    let decoded = DECODE_CALLS.load(Ordering::SeqCst) - before;
    // 3 non-root ranks × 2 values each; the root's 2 values never decode.
    assert_eq!(decoded, 6);
}

/// Unit values encode to zero bytes: every size is 0, offsets repeat, and
/// the gather still assembles `world_size` values.
#[tokio::test]
async fn test_zero_length_encoded_payloads() {
    run_collective(3, |client| async move {
        let rank = client.rank();
        let out = client.gather(&(), 0).await.unwrap();
        if rank == 0 {
            assert_eq!(out, Some(vec![(), (), ()]));
        }
    })
    .await;
}
