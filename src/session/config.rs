//! # Session Configuration Module
//!
//! The mutable configuration of a highlight session: enablement, scan
//! radius and interval, the match target, and the highlight color. All
//! numeric settings clamp to fixed valid ranges; out-of-range input is
//! recovered locally and never surfaced as a failure.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::voxels::MaterialId;

/// The smallest accepted scan radius, in cells.
pub const SCAN_RADIUS_MIN: i32 = 8;
/// The largest accepted scan radius, in cells.
///
/// A scan costs O(radius³) world lookups, so this bound is what keeps the
/// per-tick cost acceptable.
pub const SCAN_RADIUS_MAX: i32 = 64;

/// The smallest accepted scan interval, in simulation ticks.
pub const SCAN_INTERVAL_MIN: u32 = 1;
/// The largest accepted scan interval, in simulation ticks.
pub const SCAN_INTERVAL_MAX: u32 = 20;

/// An RGB highlight color with 8-bit channels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl HighlightColor {
    /// Bright cyan, the default highlight color.
    pub const CYAN: HighlightColor = HighlightColor {
        r: 0,
        g: 255,
        b: 255,
    };

    /// Builds a color from a packed `0xRRGGBB` integer, masking each channel
    /// into range.
    pub fn from_packed(packed: u32) -> Self {
        HighlightColor {
            r: ((packed >> 16) & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: (packed & 0xFF) as u8,
        }
    }

    /// The packed `0xRRGGBB` form of this color.
    pub fn packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// This color as normalized RGBA with full opacity, for the glow
    /// uniform.
    pub fn as_rgba_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

impl Default for HighlightColor {
    fn default() -> Self {
        Self::CYAN
    }
}

/// The complete configuration of a highlight session.
///
/// Owned by the session; the render loop reads it through a shared handle
/// and copies the whole struct under one lock so predicate and color are
/// always observed together.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Whether the session scans and renders at all.
    pub enabled: bool,
    /// Half the side length of the scanned cube, in cells.
    pub scan_radius: i32,
    /// Simulation ticks between scans.
    pub scan_interval_ticks: u32,
    /// The material the match predicate looks for.
    pub target_material: MaterialId,
    /// The color of the rendered glow silhouette.
    pub highlight_color: HighlightColor,
}

impl SessionConfig {
    /// The match predicate: whether a cell material is the configured
    /// target.
    pub fn matches(&self, material: MaterialId) -> bool {
        material == self.target_material
    }

    /// Clamps a requested radius into the valid range, logging when the
    /// clamp changed the value.
    pub fn clamp_radius(radius: i32) -> i32 {
        let clamped = radius.clamp(SCAN_RADIUS_MIN, SCAN_RADIUS_MAX);
        if clamped != radius {
            debug!("scan radius {} clamped to {}", radius, clamped);
        }
        clamped
    }

    /// Clamps a requested scan interval into the valid range, logging when
    /// the clamp changed the value.
    pub fn clamp_interval(interval: u32) -> u32 {
        let clamped = interval.clamp(SCAN_INTERVAL_MIN, SCAN_INTERVAL_MAX);
        if clamped != interval {
            debug!("scan interval {} clamped to {}", interval, clamped);
        }
        clamped
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            enabled: false,
            scan_radius: 16,
            scan_interval_ticks: 10,
            target_material: MaterialId::DIAMOND_ORE,
            highlight_color: HighlightColor::CYAN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_clamps_at_both_bounds() {
        assert_eq!(SessionConfig::clamp_radius(200), SCAN_RADIUS_MAX);
        assert_eq!(SessionConfig::clamp_radius(1), SCAN_RADIUS_MIN);
        assert_eq!(SessionConfig::clamp_radius(32), 32);
    }

    #[test]
    fn interval_clamps_at_both_bounds() {
        assert_eq!(SessionConfig::clamp_interval(0), SCAN_INTERVAL_MIN);
        assert_eq!(SessionConfig::clamp_interval(500), SCAN_INTERVAL_MAX);
        assert_eq!(SessionConfig::clamp_interval(10), 10);
    }

    #[test]
    fn color_packing_round_trips() {
        let color = HighlightColor::from_packed(0x12AB34);
        assert_eq!(color.r, 0x12);
        assert_eq!(color.g, 0xAB);
        assert_eq!(color.b, 0x34);
        assert_eq!(color.packed(), 0x12AB34);
    }

    #[test]
    fn config_serde_round_trips() {
        let config = SessionConfig {
            enabled: true,
            scan_radius: 24,
            scan_interval_ticks: 5,
            target_material: MaterialId::GOLD_ORE,
            highlight_color: HighlightColor::from_packed(0x00FF7F),
        };

        let json = serde_json::to_string(&config).unwrap();
        let back: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
