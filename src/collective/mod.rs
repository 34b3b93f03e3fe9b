mod gather;
mod gatherv;
mod offsets;
mod route;
mod serialized;

pub(crate) mod helpers;

pub use route::{Direct, GatherRoute, Gatherable, Serialized};
