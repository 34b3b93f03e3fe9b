use super::helpers::run_collective;
use muster::MusterError;

/// N=4, root=2, two integers per rank: the assembled result concatenates
/// every rank's pair in rank order; non-root ranks observe no output.
#[tokio::test]
async fn test_gather_slice_four_ranks_interior_root() {
    run_collective(4, |client| async move {
        let rank = client.rank();
        let values = [(2 * rank + 1) as i64, (2 * rank + 2) as i64];

        let out = client.gather_slice(&values, 2).await.unwrap();
        if rank == 2 {
            assert_eq!(out, Some(vec![1, 2, 3, 4, 5, 6, 7, 8]));
        } else {
            assert_eq!(out, None);
        }
    })
    .await;
}

#[tokio::test]
async fn test_gather_scalar_rank_order() {
    run_collective(3, |client| async move {
        let rank = client.rank();
        let out = client.gather(&(rank * 10), 0).await.unwrap();
        if rank == 0 {
            assert_eq!(out, Some(vec![0, 10, 20]));
        } else {
            assert_eq!(out, None);
        }
    })
    .await;
}

#[tokio::test]
async fn test_gather_into_pre_sized_buffer() {
    run_collective(3, |client| async move {
        let rank = client.rank();
        if rank == 1 {
            let mut out = vec![0u32; 3];
            client.gather_into(&(rank + 100), &mut out, 1).await.unwrap();
            assert_eq!(out, vec![100, 101, 102]);
        } else {
            client.gather_send(&(rank + 100), 1).await.unwrap();
        }
    })
    .await;
}

#[tokio::test]
async fn test_gather_slice_into_and_send_forms() {
    run_collective(2, |client| async move {
        let rank = client.rank();
        let values = [rank as f64, rank as f64 + 0.5];
        if rank == 0 {
            let mut out = vec![0.0f64; 4];
            client.gather_slice_into(&values, &mut out, 0).await.unwrap();
            assert_eq!(out, vec![0.0, 0.5, 1.0, 1.5]);
        } else {
            client.gather_slice_send(&values, 0).await.unwrap();
        }
    })
    .await;
}

#[tokio::test]
async fn test_gather_into_wrong_length_is_error() {
    run_collective(2, |client| async move {
        let rank = client.rank();
        if rank == 0 {
            let mut out = vec![0u8; 5]; // group of 2 needs exactly 2
            let err = client.gather_into(&7u8, &mut out, 0).await.unwrap_err();
            assert!(matches!(
                err,
                MusterError::BufferSizeMismatch {
                    expected: 2,
                    actual: 5
                }
            ));
        } else {
            client.gather_send(&7u8, 0).await.unwrap();
        }
    })
    .await;
}

#[tokio::test]
async fn test_root_out_of_range_rejected_before_exchange() {
    run_collective(2, |client| async move {
        let err = client.gather(&1u32, 9).await.unwrap_err();
        assert!(matches!(
            err,
            MusterError::InvalidRank {
                rank: 9,
                world_size: 2
            }
        ));
    })
    .await;
}

#[tokio::test]
#[should_panic]
async fn test_gather_send_from_root_is_caller_error() {
    run_collective(2, |client| async move {
        let rank = client.rank();
        // Rank 0 is the declared root but uses the non-root form.
        client.gather_send(&rank, 0).await.unwrap();
    })
    .await;
}

/// Two gathers in flight concurrently on the same group must not
/// cross-match frames: each call carries its own tag.
#[tokio::test]
async fn test_concurrent_gathers_no_crossmatch() {
    run_collective(3, |client| async move {
        let rank = client.rank();
        let small = rank as u8;
        let wide = [rank as u64; 4];

        let (a, b) = tokio::join!(
            client.gather(&small, 0),
            client.gather_slice(&wide, 0),
        );
        let a = a.unwrap();
        let b = b.unwrap();
        if rank == 0 {
            assert_eq!(a, Some(vec![0u8, 1, 2]));
            assert_eq!(
                b,
                Some(vec![0u64, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2])
            );
        } else {
            assert_eq!(a, None);
            assert_eq!(b, None);
        }
    })
    .await;
}
