use crossbeam_queue::ArrayQueue;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Control tier: 128 buffers × 4 KiB — size-exchange frames are tiny.
const CONTROL_POOL_SIZE: usize = 128;
const CONTROL_BUF_CAPACITY: usize = 4 * 1024;

/// Payload tier: 16 buffers × 4 MiB — encoded payload segments and the
/// root's assembly buffer.
const PAYLOAD_POOL_SIZE: usize = 16;
const PAYLOAD_BUF_CAPACITY: usize = 4 * 1024 * 1024;

/// A two-tier lock-free buffer pool for receive-side allocations.
///
/// Checkout picks the tier by requested size; return goes back to the
/// matching tier. Buffers that have grown beyond 4× their tier's capacity
/// are dropped instead of returned. Requests larger than the payload tier
/// are allocated fresh and never pooled.
pub struct BufferPool {
    control: ArrayQueue<Vec<u8>>,
    payload: ArrayQueue<Vec<u8>>,
}

impl BufferPool {
    pub fn new() -> Arc<Self> {
        Self::with_tier_sizes(CONTROL_POOL_SIZE, PAYLOAD_POOL_SIZE)
    }

    /// Create a pool with custom tier counts (primarily for testing).
    pub fn with_tier_sizes(control_count: usize, payload_count: usize) -> Arc<Self> {
        fn fill_tier(count: usize, capacity: usize) -> ArrayQueue<Vec<u8>> {
            let queue = ArrayQueue::new(count.max(1));
            for _ in 0..count {
                let _ = queue.push(Vec::with_capacity(capacity));
            }
            queue
        }

        Arc::new(Self {
            control: fill_tier(control_count, CONTROL_BUF_CAPACITY),
            payload: fill_tier(payload_count, PAYLOAD_BUF_CAPACITY),
        })
    }

    /// Check out a buffer, resized to `len` bytes (zeroed).
    pub fn checkout(self: &Arc<Self>, len: usize) -> PooledBuf {
        let (queue, tier, capacity) = self.tier_for_size(len);
        let mut buf = match queue {
            Some(q) => q.pop().unwrap_or_else(|| Vec::with_capacity(capacity)),
            None => Vec::with_capacity(len),
        };
        buf.resize(len, 0);
        PooledBuf {
            buf: Some(buf),
            pool: Arc::clone(self),
            tier,
        }
    }

    fn tier_for_size(&self, len: usize) -> (Option<&ArrayQueue<Vec<u8>>>, PoolTier, usize) {
        if len <= CONTROL_BUF_CAPACITY {
            (Some(&self.control), PoolTier::Control, CONTROL_BUF_CAPACITY)
        } else if len <= PAYLOAD_BUF_CAPACITY {
            (Some(&self.payload), PoolTier::Payload, PAYLOAD_BUF_CAPACITY)
        } else {
            (None, PoolTier::Unpooled, len)
        }
    }

    /// Return a buffer to the appropriate tier.
    fn return_buf(&self, mut buf: Vec<u8>, tier: PoolTier) {
        let (queue, max_cap) = match tier {
            PoolTier::Control => (Some(&self.control), CONTROL_BUF_CAPACITY * 4),
            PoolTier::Payload => (Some(&self.payload), PAYLOAD_BUF_CAPACITY * 4),
            PoolTier::Unpooled => (None, 0),
        };
        if let Some(q) = queue
            && buf.capacity() <= max_cap
        {
            buf.clear();
            let _ = q.push(buf);
        }
    }
}

/// Which pool tier a buffer belongs to.
#[derive(Debug, Clone, Copy)]
enum PoolTier {
    Control,
    Payload,
    Unpooled,
}

/// A buffer checked out from a `BufferPool`. Derefs to `[u8]`.
/// On drop, the underlying `Vec` is cleared and returned to its tier.
pub struct PooledBuf {
    buf: Option<Vec<u8>>,
    pool: Arc<BufferPool>,
    tier: PoolTier,
}

impl PooledBuf {
    /// Wrap an externally-received `Vec<u8>` as a `PooledBuf`.
    ///
    /// The buffer will be returned to the pool's appropriate tier on drop.
    pub fn from_vec(v: Vec<u8>, pool: Arc<BufferPool>) -> Self {
        let len = v.len();
        let (_, tier, _) = pool.tier_for_size(len);
        Self {
            buf: Some(v),
            pool,
            tier,
        }
    }
}

impl Deref for PooledBuf {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        // Invariant: `buf` is `Some` from construction until `Drop`.
        self.buf.as_ref().expect("PooledBuf used after drop")
    }
}

impl DerefMut for PooledBuf {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.buf.as_mut().expect("PooledBuf used after drop")
    }
}

impl Drop for PooledBuf {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            self.pool.return_buf(buf, self.tier);
        }
    }
}

impl AsRef<[u8]> for PooledBuf {
    fn as_ref(&self) -> &[u8] {
        self
    }
}
