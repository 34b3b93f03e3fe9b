//! Gather variable-length strings from 4 ranks onto rank 0.
//!
//! Each rank contributes a string whose encoded size depends on its rank;
//! the root assembles them in rank order.
//!
//! ```bash
//! cargo run --example gather_strings
//! ```

use muster::MusterClient;

#[tokio::main]
async fn main() -> muster::Result<()> {
    let world_size = 4u32;
    let clients = MusterClient::bootstrap_local(world_size)?;

    let mut handles = Vec::new();
    for client in clients {
        handles.push(tokio::spawn(async move {
            let rank = client.rank();
            let value = format!("greetings from rank {rank}{}", "!".repeat(rank as usize));

            let out = client.gather(&value, 0).await?;
            muster::Result::Ok((rank, out))
        }));
    }

    for h in handles {
        let (rank, out) = h.await.unwrap()?;
        match out {
            Some(values) => {
                println!("rank {rank} (root) assembled:");
                for (k, v) in values.iter().enumerate() {
                    println!("  [{k}] {v}");
                }
            }
            None => println!("rank {rank} contributed"),
        }
    }
    // Output:
    // rank 0 (root) assembled:
    //   [0] greetings from rank 0
    //   [1] greetings from rank 1!
    //   [2] greetings from rank 2!!
    //   [3] greetings from rank 3!!!
    // rank 1 contributed
    // ...

    Ok(())
}
