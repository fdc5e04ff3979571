use serde::Deserialize;

/// Gameplay tuning knobs. Defaults reproduce the bundled Türkiye map.
///
/// All fields have serde defaults so a host can override any subset from a
/// JSON blob without restating the rest.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Gap between the viewport edge and the frame rectangle (px).
    pub frame_margin: f64,
    /// How far scatter positions sit inward from the frame edge (px).
    pub scatter_inset: f64,
    /// Viewports narrower than this use the touch-friendly constants.
    pub narrow_breakpoint: f64,
    pub snap: SnapConfig,
    pub projection: ProjectionConfig,
    /// GeoJSON property holding the region label. `name` is tried as a
    /// fallback when the key is absent on a feature.
    pub name_property: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            frame_margin: 10.0,
            scatter_inset: 45.0,
            narrow_breakpoint: 600.0,
            snap: SnapConfig::default(),
            projection: ProjectionConfig::default(),
            name_property: "ilad".to_string(),
        }
    }
}

/// Snap tolerance policy: a fixed base radius, widened on narrow viewports
/// where touch input is less precise.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    pub base: f64,
    pub narrow: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        SnapConfig {
            base: 15.0,
            narrow: 30.0,
        }
    }
}

impl SnapConfig {
    pub fn threshold_for(&self, viewport_width: f64, breakpoint: f64) -> f64 {
        if viewport_width < breakpoint {
            self.narrow
        } else {
            self.base
        }
    }
}

/// Mercator placement of the map within the viewport.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Geographic center `[lon, lat]` in degrees.
    pub center: [f64; 2],
    /// Projection scale in px per radian.
    pub scale: f64,
    /// Narrow viewports derive the scale from their width instead.
    pub narrow_scale_per_px: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        ProjectionConfig {
            center: [35.0, 39.0],
            scale: 3000.0,
            narrow_scale_per_px: 3.6,
        }
    }
}

impl ProjectionConfig {
    pub fn scale_for(&self, viewport_width: f64, breakpoint: f64) -> f64 {
        if viewport_width < breakpoint {
            viewport_width * self.narrow_scale_per_px
        } else {
            self.scale
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_survive_partial_override() {
        let cfg: GameConfig = serde_json::from_str(r#"{"snap":{"base":20.0}}"#).unwrap();
        assert_eq!(cfg.snap.base, 20.0);
        assert_eq!(cfg.snap.narrow, 30.0);
        assert_eq!(cfg.frame_margin, 10.0);
        assert_eq!(cfg.name_property, "ilad");
    }

    #[test]
    fn narrow_viewport_widens_threshold_and_rescales() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.snap.threshold_for(800.0, cfg.narrow_breakpoint), 15.0);
        assert_eq!(cfg.snap.threshold_for(480.0, cfg.narrow_breakpoint), 30.0);
        assert_eq!(cfg.projection.scale_for(800.0, cfg.narrow_breakpoint), 3000.0);
        assert_eq!(
            cfg.projection.scale_for(480.0, cfg.narrow_breakpoint),
            480.0 * 3.6
        );
    }
}
