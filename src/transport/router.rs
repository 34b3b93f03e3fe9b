use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// Shared state between frame delivery and the per-tag receivers.
///
/// When a tagged frame arrives before `recv` has been called for that tag,
/// the data is buffered in `pending`. When a receiver registers, any pending
/// data is flushed into the new channel.
struct RouterState {
    senders: HashMap<u64, mpsc::Sender<Vec<u8>>>,
    pending: HashMap<u64, Vec<Vec<u8>>>,
}

type TaggedReceiverMap = HashMap<u64, Arc<Mutex<mpsc::Receiver<Vec<u8>>>>>;

/// Routes incoming frames to per-tag channels.
///
/// Each tag gets an independently lockable receiver so concurrent tags don't
/// block each other.
pub(crate) struct TagRouter {
    state: Mutex<RouterState>,
    receivers: Mutex<TaggedReceiverMap>,
    capacity: usize,
}

impl TagRouter {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(RouterState {
                senders: HashMap::new(),
                pending: HashMap::new(),
            }),
            receivers: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Deliver a frame for `tag`, buffering it if no receiver is registered
    /// yet. Returns false if the receiver for this tag has been dropped.
    pub(crate) async fn deliver(&self, tag: u64, data: Vec<u8>) -> bool {
        // Clone the sender outside the lock to avoid holding it across the
        // channel send `.await`.
        let tx = {
            let st = self.state.lock().await;
            st.senders.get(&tag).cloned()
        };
        match tx {
            Some(tx) => tx.send(data).await.is_ok(),
            None => {
                let mut st = self.state.lock().await;
                st.pending.entry(tag).or_default().push(data);
                true
            }
        }
    }

    /// Receive the next frame for `tag`, registering the tag channel on
    /// first use. Returns `None` when the delivering side has shut down.
    pub(crate) async fn recv(&self, tag: u64) -> Option<Vec<u8>> {
        let rx_arc = self.tag_receiver(tag).await;
        let mut rx = rx_arc.lock().await;
        rx.recv().await
    }

    /// Get or create the per-tag receiver. Returns an `Arc<Mutex<Receiver>>`
    /// that can be locked independently of other tags.
    async fn tag_receiver(&self, tag: u64) -> Arc<Mutex<mpsc::Receiver<Vec<u8>>>> {
        // Fast path: already registered.
        {
            let map = self.receivers.lock().await;
            if let Some(rx) = map.get(&tag) {
                return Arc::clone(rx);
            }
        }
        // Slow path: create channel, register sender, then flush pending
        // outside the lock.
        let (tx, rx) = mpsc::channel(self.capacity);
        let flush_tx = tx.clone();
        let pending_data = {
            let mut st = self.state.lock().await;
            let pending = st.pending.remove(&tag);
            st.senders.insert(tag, tx);
            pending
        };
        if let Some(frames) = pending_data {
            for data in frames {
                let _ = flush_tx.send(data).await;
            }
        }
        let rx_arc = Arc::new(Mutex::new(rx));
        self.receivers.lock().await.insert(tag, Arc::clone(&rx_arc));
        rx_arc
    }
}
