use crate::error::{MusterError, Result};
use crate::transport::{PeerTransport, TagRouter};
use futures::future::BoxFuture;
use std::sync::Arc;

/// In-process transport: one end of a pair of tag-routed channels.
///
/// Used by `bootstrap_local` to wire up a group within a single process,
/// which is also how the test harness runs multi-rank collectives.
pub struct LocalPeer {
    /// Frames we send land in the other end's router.
    remote: Arc<TagRouter>,
    /// Frames the other end sends land here.
    local: Arc<TagRouter>,
}

/// Create both ends of an in-process peer link.
pub fn local_pair(capacity: usize) -> (LocalPeer, LocalPeer) {
    let a = Arc::new(TagRouter::new(capacity));
    let b = Arc::new(TagRouter::new(capacity));
    (
        LocalPeer {
            remote: Arc::clone(&b),
            local: Arc::clone(&a),
        },
        LocalPeer {
            remote: a,
            local: b,
        },
    )
}

impl PeerTransport for LocalPeer {
    fn send_tagged<'a>(&'a self, tag: u64, data: &'a [u8]) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            if self.remote.deliver(tag, data.to_vec()).await {
                Ok(())
            } else {
                Err(MusterError::transport("local peer closed"))
            }
        })
    }

    fn recv_tagged<'a>(&'a self, tag: u64, _expected_size: usize) -> BoxFuture<'a, Result<Vec<u8>>> {
        Box::pin(async move {
            self.local
                .recv(tag)
                .await
                .ok_or_else(|| MusterError::transport("local peer closed"))
        })
    }
}
