use crate::config::MusterConfig;
use crate::error::{MusterError, Result};
use crate::transport::buffer_pool::BufferPool;
use crate::transport::{PeerTransport, local_pair};
use crate::types::Rank;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// One participant's handle into a fixed-size group.
///
/// Holds the point-to-point links to every other rank. Collective calls
/// are methods on this handle; every rank of the group must make the same
/// sequence of collective calls with matching parameters.
pub struct MusterClient {
    rank: Rank,
    world_size: u32,
    peers: HashMap<Rank, Arc<dyn PeerTransport>>,
    pool: Arc<BufferPool>,
    config: MusterConfig,
    /// Monotonic per-call identifier; keeps concurrent collective calls
    /// from cross-matching their frames.
    collective_tag: AtomicU64,
}

impl std::fmt::Debug for MusterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MusterClient")
            .field("rank", &self.rank)
            .field("world_size", &self.world_size)
            .field("peers", &self.peers.keys().collect::<Vec<_>>())
            .field("config", &self.config)
            .field("collective_tag", &self.collective_tag)
            .finish()
    }
}

impl MusterClient {
    /// Build a client from an already-wired peer mesh.
    ///
    /// `peers` must hold one link per rank in `[0, world_size)` except the
    /// caller's own rank.
    pub fn from_peers(
        rank: Rank,
        world_size: u32,
        peers: HashMap<Rank, Arc<dyn PeerTransport>>,
        config: MusterConfig,
    ) -> Result<Self> {
        if rank >= world_size {
            return Err(MusterError::InvalidRank { rank, world_size });
        }
        for r in (0..world_size).filter(|&r| r != rank) {
            if !peers.contains_key(&r) {
                return Err(MusterError::UnknownPeer { rank: r });
            }
        }
        Ok(Self {
            rank,
            world_size,
            peers,
            pool: BufferPool::new(),
            config,
            collective_tag: AtomicU64::new(1),
        })
    }

    /// Wire up an in-process group of `world_size` ranks.
    ///
    /// Returns one client per rank, connected pairwise over channel
    /// transports. Mostly useful for tests and single-machine runs.
    pub fn bootstrap_local(world_size: u32) -> Result<Vec<Self>> {
        let config = MusterConfig::default();
        let mut meshes: Vec<HashMap<Rank, Arc<dyn PeerTransport>>> =
            (0..world_size).map(|_| HashMap::new()).collect();

        for i in 0..world_size {
            for j in (i + 1)..world_size {
                let (end_i, end_j) = local_pair(config.channel_capacity);
                meshes[i as usize].insert(j, Arc::new(end_i));
                meshes[j as usize].insert(i, Arc::new(end_j));
            }
        }

        meshes
            .into_iter()
            .enumerate()
            .map(|(rank, peers)| Self::from_peers(rank as Rank, world_size, peers, config.clone()))
            .collect()
    }

    /// This client's rank within the group (0-indexed).
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Total number of ranks in the group.
    pub fn world_size(&self) -> u32 {
        self.world_size
    }

    pub(crate) fn config(&self) -> &MusterConfig {
        &self.config
    }

    pub(crate) fn pool(&self) -> &Arc<BufferPool> {
        &self.pool
    }

    pub(crate) fn peer(&self, rank: Rank) -> Result<&Arc<dyn PeerTransport>> {
        self.peers.get(&rank).ok_or(MusterError::UnknownPeer { rank })
    }

    /// Next unique per-call identifier.
    pub(crate) fn next_collective_tag(&self) -> u64 {
        self.collective_tag.fetch_add(1, Ordering::Relaxed)
    }

    /// Reject an out-of-group root before any exchange starts.
    pub(crate) fn check_root(&self, root: Rank) -> Result<()> {
        if root >= self.world_size {
            return Err(MusterError::InvalidRank {
                rank: root,
                world_size: self.world_size,
            });
        }
        Ok(())
    }
}
