pub mod buffer_pool;
mod local;
mod router;
mod tcp;

pub use local::{LocalPeer, local_pair};
pub use tcp::{TcpPeer, tcp_accept, tcp_connect, tcp_listen};

pub(crate) use router::TagRouter;

use crate::error::Result;
use futures::future::BoxFuture;

/// A point-to-point link to one peer, carrying tagged frames.
///
/// The `tag` is the per-call identifier collectives use to keep frames of
/// logically distinct concurrent calls from cross-matching. Frames with the
/// same tag arrive in send order; frames with different tags are routed
/// independently.
pub trait PeerTransport: Send + Sync {
    /// Send raw bytes with a u64 tag.
    fn send_tagged<'a>(&'a self, tag: u64, data: &'a [u8]) -> BoxFuture<'a, Result<()>>;

    /// Receive raw bytes for a specific tag.
    ///
    /// `expected_size` is advisory (may be used for buffer pre-allocation
    /// hints).
    fn recv_tagged<'a>(&'a self, tag: u64, expected_size: usize) -> BoxFuture<'a, Result<Vec<u8>>>;
}
