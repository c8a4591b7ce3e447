//! # Session Module
//!
//! The simulation-side session object: owns the configuration, the overlay
//! manager, and the published active-cell snapshot, and drives the
//! scan → reconcile → sync pipeline from the host's fixed-rate tick clock.
//!
//! ## Control Surface
//!
//! Host UI and input code talk to the session exclusively through the
//! setters and getters on [`HighlightSession`]. Setters clamp their input to
//! the valid ranges and schedule the appropriate follow-up work; the work
//! itself (clearing markers, rescanning) always happens at the next tick
//! boundary, never inside the setter, so the setters are safe to call from
//! anywhere at any time.
//!
//! ## Tick Pipeline
//!
//! Each tick, in order: apply a pending bulk clear, age markers and apply
//! the lifetime/bounds safety nets, then, when a scan is due, scan the
//! world, diff against the marker-owner set, apply the delta to the overlay,
//! and finally republish the active-cell snapshot. The renderer only ever
//! sees the state after all of a tick's transitions have resolved.

use log::{debug, info};

use crate::core::{Shared, Snapshot};
use crate::overlay::{MarkerHost, MarkerVisual, OverlayManager};
use crate::scan::{reconcile, scan};
use crate::voxels::{CellPosition, MaterialId, WorldAccessor};

pub mod config;

pub use config::{HighlightColor, SessionConfig};

/// A highlight session: the explicit, injected replacement for what a host
/// might otherwise keep as global toggle-plus-collection state.
///
/// The session is driven by two collaborators it never owns: a
/// [`WorldAccessor`] for reading cells and a [`MarkerHost`] for
/// materializing markers, both passed into [`HighlightSession::tick`] by
/// reference.
pub struct HighlightSession {
    config: Shared<SessionConfig>,
    overlay: OverlayManager,
    active_view: Snapshot<Vec<CellPosition>>,
    tick_counter: u64,
    clear_pending: bool,
    rescan_pending: bool,
}

impl HighlightSession {
    /// Creates a session with the given configuration.
    ///
    /// Numeric settings are clamped on the way in. If the configuration
    /// arrives enabled, the first tick performs an immediate scan.
    pub fn new(mut config: SessionConfig) -> Self {
        config.scan_radius = SessionConfig::clamp_radius(config.scan_radius);
        config.scan_interval_ticks = SessionConfig::clamp_interval(config.scan_interval_ticks);
        let enabled = config.enabled;

        HighlightSession {
            config: Shared::new(config),
            overlay: OverlayManager::new(),
            active_view: Snapshot::new(Vec::new()),
            tick_counter: 0,
            clear_pending: false,
            rescan_pending: enabled,
        }
    }

    /// Advances the session by one simulation tick.
    ///
    /// # Arguments
    /// * `reference` - The cell the scan cube is centered on (typically the
    ///   player's position)
    /// * `world` - Read-only world access
    /// * `host` - The host's marker instantiation API
    pub fn tick(
        &mut self,
        reference: CellPosition,
        world: &impl WorldAccessor,
        host: &mut impl MarkerHost,
    ) {
        // Pending bulk teardown (disable, target change) applies at the tick
        // boundary, before anything else this tick observes the overlay.
        if self.clear_pending {
            self.overlay.clear_all(host);
            self.active_view.store(Vec::new());
            self.clear_pending = false;
        }

        let config = self.config.copied();
        if !config.enabled {
            return;
        }

        self.tick_counter += 1;

        let before = self.overlay.len();
        self.overlay.tick_markers(host);
        if self.overlay.len() != before {
            // A safety net fired; keep the renderer's view in sync even
            // though no scan ran this tick.
            self.active_view.store(self.overlay.active_cells_sorted());
        }

        let scan_due =
            self.rescan_pending || self.tick_counter % config.scan_interval_ticks as u64 == 0;
        if scan_due {
            self.rescan_pending = false;
            self.run_scan_cycle(reference, world, host, &config);
        }
    }

    /// Runs one scan/reconcile/sync cycle and republishes the snapshot.
    fn run_scan_cycle(
        &mut self,
        reference: CellPosition,
        world: &impl WorldAccessor,
        host: &mut impl MarkerHost,
        config: &SessionConfig,
    ) {
        let current = scan(
            reference,
            config.scan_radius,
            |material| config.matches(material),
            world,
        );

        // The diff baseline is the marker-owner set, not the raw previous
        // scan: a cell whose marker failed to spawn (or was discarded by a
        // safety net) shows up as added again and gets retried.
        let previous = self.overlay.active_cells();
        let delta = reconcile(&previous, &current);

        if !delta.is_empty() {
            debug!(
                "scan at {:?} r={}: {} added, {} removed",
                reference,
                config.scan_radius,
                delta.added.len(),
                delta.removed.len()
            );
        }

        self.overlay.sync_to_scan(
            &delta,
            MarkerVisual::highlight(config.target_material),
            host,
        );

        // Publish only after every transition for this tick has resolved.
        self.active_view.store(self.overlay.active_cells_sorted());
    }

    /// Destroys all markers and resets the session's tracked state.
    ///
    /// Call when the world or session context is torn down. The
    /// configuration survives; re-enabling scans fresh.
    pub fn teardown(&mut self, host: &mut impl MarkerHost) {
        self.overlay.clear_all(host);
        self.active_view.store(Vec::new());
        self.clear_pending = false;
        self.rescan_pending = self.config.read().enabled;
        self.tick_counter = 0;
    }

    /// Enables or disables the session.
    ///
    /// Disabling schedules a bulk marker teardown for the next tick
    /// boundary; enabling schedules a fresh scan.
    pub fn set_enabled(&mut self, enabled: bool) {
        {
            let mut config = self.config.write();
            if config.enabled == enabled {
                return;
            }
            config.enabled = enabled;
        }

        if enabled {
            // Force a fresh scan rather than trusting any stale tracking.
            self.clear_pending = true;
            self.rescan_pending = true;
        } else {
            self.clear_pending = true;
            self.rescan_pending = false;
        }

        info!(
            "highlight overlay {}",
            if enabled { "enabled" } else { "disabled" }
        );
    }

    /// Sets the scan radius, clamped to the valid range. Schedules a fresh
    /// scan; cells that fall out of the new radius are removed by the diff.
    pub fn set_scan_radius(&mut self, radius: i32) {
        let clamped = SessionConfig::clamp_radius(radius);
        let mut config = self.config.write();
        if config.scan_radius != clamped {
            config.scan_radius = clamped;
            self.rescan_pending = true;
        }
    }

    /// Sets the scan interval in ticks, clamped to the valid range.
    /// Schedules a fresh scan so the new cadence starts from current data.
    pub fn set_scan_interval_ticks(&mut self, interval: u32) {
        let clamped = SessionConfig::clamp_interval(interval);
        let mut config = self.config.write();
        if config.scan_interval_ticks != clamped {
            config.scan_interval_ticks = clamped;
            self.rescan_pending = true;
        }
    }

    /// Sets the material the match predicate looks for.
    ///
    /// Existing markers highlight the wrong thing once the target changes,
    /// so this schedules a bulk teardown followed by a fresh scan.
    pub fn set_target_material(&mut self, material: MaterialId) {
        {
            let mut config = self.config.write();
            if config.target_material == material {
                return;
            }
            config.target_material = material;
        }

        self.clear_pending = true;
        self.rescan_pending = true;
        info!("highlight target changed to {}", material.name());
    }

    /// Sets the highlight color. Takes effect on the next rendered frame; no
    /// reconciliation is needed.
    pub fn set_highlight_color(&mut self, color: HighlightColor) {
        self.config.write().highlight_color = color;
    }

    /// Whether the session is enabled.
    pub fn enabled(&self) -> bool {
        self.config.read().enabled
    }

    /// The effective (clamped) scan radius.
    pub fn scan_radius(&self) -> i32 {
        self.config.read().scan_radius
    }

    /// The effective (clamped) scan interval in ticks.
    pub fn scan_interval_ticks(&self) -> u32 {
        self.config.read().scan_interval_ticks
    }

    /// The current match target.
    pub fn target_material(&self) -> MaterialId {
        self.config.read().target_material
    }

    /// The current highlight color.
    pub fn highlight_color(&self) -> HighlightColor {
        self.config.read().highlight_color
    }

    /// The number of live markers.
    pub fn live_marker_count(&self) -> usize {
        self.overlay.len()
    }

    /// A handle to the published active-cell snapshot, for the render loop.
    ///
    /// The returned handle shares state with the session: every completed
    /// reconciliation replaces the snapshot it serves.
    pub fn active_cells_handle(&self) -> Snapshot<Vec<CellPosition>> {
        self.active_view.clone()
    }

    /// A shared read view of the configuration, for the render loop.
    ///
    /// Mutations must go through the session setters so clamping and
    /// reconciliation scheduling stay intact.
    pub fn shared_config(&self) -> Shared<SessionConfig> {
        self.config.clone()
    }
}
