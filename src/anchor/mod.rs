//! Placed objects pinned to world poses.

mod object;
mod store;

pub use object::{Material, MeshKind, ObjectDescriptor};
pub use store::{Anchor, AnchorId, AnchorStore, SubscriptionId};
