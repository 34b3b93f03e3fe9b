use crate::config::MusterConfig;
use crate::error::{MusterError, Result};
use crate::transport::{PeerTransport, TagRouter};
use futures::future::BoxFuture;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

/// Peer link over raw TCP.
///
/// Carries a `[tag: u64 LE][len: u64 LE][payload]` framing so that tagged
/// collectives can share one connection without cross-matching. A background
/// task reads frames and routes them by tag.
pub struct TcpPeer {
    writer: Mutex<tokio::io::WriteHalf<TcpStream>>,
    router: Arc<TagRouter>,
    /// Background recv task handle.
    _recv_handle: tokio::task::JoinHandle<()>,
}

impl TcpPeer {
    /// Create a `TcpPeer` from an already-connected `TcpStream`.
    pub fn from_stream(stream: TcpStream, config: &MusterConfig) -> Self {
        let (reader, writer) = tokio::io::split(stream);

        let router = Arc::new(TagRouter::new(config.channel_capacity));
        let recv_router = Arc::clone(&router);
        let max_frame = config.max_frame_bytes;
        let recv_handle = tokio::spawn(async move {
            recv_loop(reader, recv_router, max_frame).await;
        });

        Self {
            writer: Mutex::new(writer),
            router,
            _recv_handle: recv_handle,
        }
    }

    /// Write a tagged frame: `[tag: u64 LE][len: u64 LE][payload]`.
    async fn write_frame(&self, tag: u64, data: &[u8]) -> Result<()> {
        let mut writer = self.writer.lock().await;
        writer
            .write_all(&tag.to_le_bytes())
            .await
            .map_err(|e| MusterError::transport(format!("tcp write tag: {e}")))?;
        writer
            .write_all(&(data.len() as u64).to_le_bytes())
            .await
            .map_err(|e| MusterError::transport(format!("tcp write len: {e}")))?;
        writer
            .write_all(data)
            .await
            .map_err(|e| MusterError::transport(format!("tcp write payload: {e}")))?;
        writer
            .flush()
            .await
            .map_err(|e| MusterError::transport(format!("tcp flush: {e}")))?;
        Ok(())
    }
}

impl PeerTransport for TcpPeer {
    fn send_tagged<'a>(&'a self, tag: u64, data: &'a [u8]) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.write_frame(tag, data))
    }

    fn recv_tagged<'a>(&'a self, tag: u64, _expected_size: usize) -> BoxFuture<'a, Result<Vec<u8>>> {
        Box::pin(async move {
            self.router
                .recv(tag)
                .await
                .ok_or_else(|| MusterError::transport("tcp connection closed"))
        })
    }
}

impl Drop for TcpPeer {
    fn drop(&mut self) {
        self._recv_handle.abort();
    }
}

/// Background loop: read frames and route them by tag.
async fn recv_loop(
    mut reader: tokio::io::ReadHalf<TcpStream>,
    router: Arc<TagRouter>,
    max_frame: usize,
) {
    let mut tag_buf = [0u8; 8];
    let mut len_buf = [0u8; 8];
    loop {
        if let Err(e) = reader.read_exact(&mut tag_buf).await {
            tracing::debug!("tcp recv loop ended: {e}");
            return;
        }
        if let Err(e) = reader.read_exact(&mut len_buf).await {
            tracing::debug!("tcp recv loop ended reading len: {e}");
            return;
        }
        let tag = u64::from_le_bytes(tag_buf);
        let len = u64::from_le_bytes(len_buf) as usize;

        if len > max_frame {
            tracing::warn!(len, "tcp: frame too large, closing connection");
            return;
        }

        let mut payload = vec![0u8; len];
        if let Err(e) = reader.read_exact(&mut payload).await {
            tracing::debug!("tcp recv loop ended reading payload: {e}");
            return;
        }

        if !router.deliver(tag, payload).await {
            tracing::debug!(tag, "tcp: receiver gone, dropping frame");
        }
    }
}

/// Bind a listener for incoming peer connections.
pub async fn tcp_listen(
    addr: std::net::SocketAddr,
) -> Result<(TcpListener, std::net::SocketAddr)> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| MusterError::transport(format!("tcp listen: {e}")))?;
    let local = listener
        .local_addr()
        .map_err(|e| MusterError::transport(format!("tcp local_addr: {e}")))?;
    Ok((listener, local))
}

/// Connect to a peer's listener.
pub async fn tcp_connect(addr: std::net::SocketAddr, config: &MusterConfig) -> Result<TcpPeer> {
    let stream = TcpStream::connect(addr)
        .await
        .map_err(|e| MusterError::transport(format!("tcp connect: {e}")))?;
    stream
        .set_nodelay(true)
        .map_err(|e| MusterError::transport(format!("tcp set_nodelay: {e}")))?;
    Ok(TcpPeer::from_stream(stream, config))
}

/// Accept one connection from a listener.
pub async fn tcp_accept(listener: &TcpListener, config: &MusterConfig) -> Result<TcpPeer> {
    let (stream, _addr) = listener
        .accept()
        .await
        .map_err(|e| MusterError::transport(format!("tcp accept: {e}")))?;
    stream
        .set_nodelay(true)
        .map_err(|e| MusterError::transport(format!("tcp set_nodelay: {e}")))?;
    Ok(TcpPeer::from_stream(stream, config))
}
