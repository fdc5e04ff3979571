use crate::config::ProjectionConfig;
use crate::geom::Point;

const MERCATOR_MAX_LAT_DEG: f64 = 85.05112878;

fn mercator_x(lon_deg: f64) -> f64 {
    lon_deg.to_radians()
}

fn mercator_y(lat_deg: f64) -> f64 {
    let lat = lat_deg
        .clamp(-MERCATOR_MAX_LAT_DEG, MERCATOR_MAX_LAT_DEG)
        .to_radians();
    (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln()
}

/// Spherical Mercator with center/scale/translate semantics: the configured
/// geographic center lands on the translate point, scale is px per radian,
/// and screen y grows downward.
#[derive(Clone, Copy, Debug)]
pub struct Projector {
    center_x: f64,
    center_y: f64,
    scale: f64,
    translate: (f64, f64),
}

impl Projector {
    pub fn new(center_lon: f64, center_lat: f64, scale: f64, translate: (f64, f64)) -> Self {
        Projector {
            center_x: mercator_x(center_lon),
            center_y: mercator_y(center_lat),
            scale,
            translate,
        }
    }

    /// Projector for a viewport: centered translate, width-derived scale on
    /// narrow screens.
    pub fn for_viewport(cfg: &ProjectionConfig, width: f64, height: f64, breakpoint: f64) -> Self {
        Projector::new(
            cfg.center[0],
            cfg.center[1],
            cfg.scale_for(width, breakpoint),
            (width / 2.0, height / 2.0),
        )
    }

    pub fn project(&self, lon_deg: f64, lat_deg: f64) -> Point {
        Point {
            x: self.translate.0 + self.scale * (mercator_x(lon_deg) - self.center_x),
            y: self.translate.1 - self.scale * (mercator_y(lat_deg) - self.center_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_maps_to_translate() {
        let p = Projector::new(35.0, 39.0, 3000.0, (400.0, 300.0));
        let c = p.project(35.0, 39.0);
        assert!((c.x - 400.0).abs() < 1e-9);
        assert!((c.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn east_is_right_and_north_is_up() {
        let p = Projector::new(35.0, 39.0, 3000.0, (400.0, 300.0));
        let east = p.project(36.0, 39.0);
        let north = p.project(35.0, 40.0);
        assert!(east.x > 400.0);
        assert!((east.y - 300.0).abs() < 1e-9);
        assert!(north.y < 300.0);
    }

    #[test]
    fn polar_latitudes_are_clamped() {
        let p = Projector::new(0.0, 0.0, 100.0, (0.0, 0.0));
        let pole = p.project(0.0, 90.0);
        let near = p.project(0.0, MERCATOR_MAX_LAT_DEG);
        assert!((pole.y - near.y).abs() < 1e-9);
        assert!(pole.y.is_finite());
    }
}
