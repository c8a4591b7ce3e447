//! # Core Module
//!
//! Shared-state primitives bridging the simulation loop and the render loop.
//!
//! ## Key Components
//! - `Shared`: Thread-safe reference-counted state with read-write locking,
//!   used for configuration that both loops read
//! - `Snapshot`: Immutable-snapshot-on-write container, used to publish the
//!   active cell set to the renderer without torn reads

pub mod shared;
pub mod snapshot;

pub use shared::Shared;
pub use snapshot::Snapshot;
