//! Screen capture: adapter seam, snapshots, sampling, extraction
//!
//! This module consolidates:
//! - The platform adapter contract (adapter.rs)
//! - Immutable per-display snapshots and their store (snapshot.rs, store.rs)
//! - Loupe color sampling (sampling.rs)
//! - Selection-to-bitmap extraction (extract.rs)

pub mod adapter;
pub mod extract;
pub mod sampling;
pub mod snapshot;
pub mod store;

pub use adapter::CaptureAdapter;
pub use sampling::PixelSample;
pub use snapshot::Snapshot;
pub use store::SnapshotStore;
