#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Highlight
//!
//! An in-process highlight-overlay engine for voxel worlds: it periodically
//! scans the cells around a moving reference point for a target material and
//! keeps a silhouette-style glow overlay in sync with the matches, visible
//! through occluding geometry.
//!
//! ## Key Modules
//!
//! * `session` - The simulation-side session: configuration, tick loop, and
//!   the control surface exposed to host UI/input code
//! * `scan` - The spatial scanner and the tracked-set reconciler
//! * `overlay` - Marker lifecycle management against a host-owned marker API
//! * `rendering` - The dedicated outline render pass (WGPU)
//! * `voxels` - Cell addressing, materials, geometry, and the world accessor
//!   boundary (plus a chunked in-memory world for tests and demos)
//! * `core` - Snapshot and shared-state primitives bridging the two loops
//!
//! ## Architecture
//!
//! Two independent periodic drivers cooperate without blocking each other:
//!
//! * The host's fixed-rate simulation clock calls
//!   [`session::HighlightSession::tick`], which scans the world, diffs the
//!   result against the tracked set, and creates/destroys overlay markers.
//! * The host's render clock calls
//!   [`rendering::OutlineRenderManager::render_frame`] once per frame, after
//!   its normal passes. The renderer reads an immutable snapshot of the
//!   active cell set, so it never observes a half-applied reconciliation.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut session = HighlightSession::new(SessionConfig::default());
//! let mut overlay_renderer = OutlineRenderManager::new(&device, surface_format, &session);
//!
//! // Simulation loop, once per tick:
//! session.tick(player_cell, &world, &mut marker_host);
//!
//! // Render loop, once per frame, after the normal scene passes:
//! overlay_renderer.render_frame(&world, &camera_view, &device, &queue, &mut render_pass);
//! ```

pub mod core;
pub mod overlay;
pub mod rendering;
pub mod scan;
pub mod session;
pub mod voxels;

pub use overlay::{MarkerHost, OverlayManager};
pub use rendering::{CameraView, OutlineRenderManager};
pub use session::{HighlightSession, SessionConfig};
pub use voxels::{CellPosition, MaterialId, WorldAccessor};
