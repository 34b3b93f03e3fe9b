use muster::SyncClient;

/// The blocking wrapper drives a multi-rank gather from plain OS threads,
/// one synchronous thread of control per participant.
#[test]
fn test_sync_gather_across_threads() {
    let clients = SyncClient::bootstrap_local(3).unwrap();

    let mut handles = Vec::new();
    for client in clients {
        handles.push(std::thread::spawn(move || {
            let rank = client.rank();
            let value = format!("rank-{rank}");
            let out = client.gather(&value, 0).unwrap();
            if rank == 0 {
                assert_eq!(
                    out,
                    Some(vec![
                        "rank-0".to_string(),
                        "rank-1".to_string(),
                        "rank-2".to_string(),
                    ])
                );
            } else {
                assert_eq!(out, None);
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }
}

#[test]
fn test_sync_gather_into() {
    let clients = SyncClient::bootstrap_local(2).unwrap();

    let mut handles = Vec::new();
    for client in clients {
        handles.push(std::thread::spawn(move || {
            let rank = client.rank();
            if rank == 0 {
                let mut out = vec![0i32; 2];
                client.gather_into(&(rank as i32 - 5), &mut out, 0).unwrap();
                assert_eq!(out, vec![-5, -4]);
            } else {
                client.gather_send(&(rank as i32 - 5), 0).unwrap();
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }
}
