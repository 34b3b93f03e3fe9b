mod async_client;
mod byte_transport;
mod gather;
mod sync_client;

pub use async_client::MusterClient;
pub use sync_client::SyncClient;
