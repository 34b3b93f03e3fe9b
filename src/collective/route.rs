//! Compile-time selection of the transfer path for a value type.
//!
//! A gatherable type names its route as an associated type, so the direct
//! and serialized implementations are never both instantiated for one
//! call — the choice is resolved at monomorphization, not by branching on
//! a runtime type tag.

use crate::client::MusterClient;
use crate::collective::gather::gather_direct;
use crate::collective::helpers::{PHASE_DATA, phase_tag};
use crate::collective::serialized::gather_serialized;
use crate::error::Result;
use crate::types::{Rank, Transmissible};
use futures::future::BoxFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A value type that can be gathered.
///
/// The associated `Route` decides how values move: [`Direct`] for types
/// with a fixed-layout transport descriptor, [`Serialized`] for everything
/// else. Scalar primitives are registered out of the box; serde types opt
/// in via the provided impls (`String`, `Vec<T>`, `Option<T>`, `()`) or
/// the [`gather_via_codec!`](crate::gather_via_codec) macro.
pub trait Gatherable: Send + Sync + Sized + 'static {
    /// Statically selected transfer path.
    type Route: GatherRoute<Self>;
}

/// One of the two transfer strategies, invoked with the per-call tag.
pub trait GatherRoute<T> {
    fn run<'a>(
        client: &'a MusterClient,
        send: &'a [T],
        root: Rank,
        call: u64,
    ) -> BoxFuture<'a, Result<Option<Vec<T>>>>;
}

/// Route for types the transport moves as raw fixed-layout bytes.
pub enum Direct {}

impl<T: Transmissible> GatherRoute<T> for Direct {
    fn run<'a>(
        client: &'a MusterClient,
        send: &'a [T],
        root: Rank,
        call: u64,
    ) -> BoxFuture<'a, Result<Option<Vec<T>>>> {
        Box::pin(gather_direct(client, send, root, phase_tag(call, PHASE_DATA)))
    }
}

/// Route for types that go through the serialization codec.
pub enum Serialized {}

impl<T> GatherRoute<T> for Serialized
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    fn run<'a>(
        client: &'a MusterClient,
        send: &'a [T],
        root: Rank,
        call: u64,
    ) -> BoxFuture<'a, Result<Option<Vec<T>>>> {
        Box::pin(gather_serialized(client, send, root, call))
    }
}

macro_rules! direct_gatherable {
    ($($ty:ty),* $(,)?) => {$(
        impl Gatherable for $ty {
            type Route = Direct;
        }
    )*};
}

direct_gatherable!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

/// Register types whose gather goes through the serialization codec.
///
/// The type must implement `serde::Serialize`, `serde::de::DeserializeOwned`,
/// `Clone`, `Send`, and `Sync`.
///
/// ```ignore
/// #[derive(Serialize, Deserialize, Clone)]
/// struct Record { id: u32, name: String }
///
/// muster::gather_via_codec!(Record);
/// ```
#[macro_export]
macro_rules! gather_via_codec {
    ($($ty:ty),* $(,)?) => {$(
        impl $crate::Gatherable for $ty {
            type Route = $crate::Serialized;
        }
    )*};
}

impl Gatherable for String {
    type Route = Serialized;
}

impl Gatherable for () {
    type Route = Serialized;
}

impl<T> Gatherable for Vec<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    type Route = Serialized;
}

impl<T> Gatherable for Option<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    type Route = Serialized;
}
