pub mod client;
mod codec;
pub mod collective;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{MusterClient, SyncClient};
pub use collective::{Direct, GatherRoute, Gatherable, Serialized};
pub use config::MusterConfig;
pub use error::{MusterError, Result};
pub use transport::buffer_pool::{BufferPool, PooledBuf};
pub use transport::{LocalPeer, PeerTransport, TcpPeer, local_pair, tcp_accept, tcp_connect, tcp_listen};
pub use types::{DataType, Rank, Transmissible};
