use serde::{Deserialize, Serialize};

/// Basic two dimensional point in screen space (px, y grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl From<(f64, f64)> for Point {
    fn from(v: (f64, f64)) -> Self {
        Point { x: v.0, y: v.1 }
    }
}

impl Point {
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Even-odd ray cast over a set of rings. Holes fall out of the parity rule.
pub fn rings_contain(rings: &[Vec<Point>], offset: (f64, f64), p: Point) -> bool {
    let (x, y) = (p.x - offset.0, p.y - offset.1);
    let mut inside = false;
    for ring in rings {
        let n = ring.len();
        if n < 3 {
            continue;
        }
        let mut j = n - 1;
        for i in 0..n {
            let xi = ring[i].x;
            let yi = ring[i].y;
            let xj = ring[j].x;
            let yj = ring[j].y;
            let intersect =
                ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi + 1e-12) + xi);
            if intersect {
                inside = !inside;
            }
            j = i;
        }
    }
    inside
}

pub fn bounds_of_rings(rings: &[Vec<Point>]) -> (f64, f64, f64, f64) {
    let mut minx = f64::INFINITY;
    let mut miny = f64::INFINITY;
    let mut maxx = f64::NEG_INFINITY;
    let mut maxy = f64::NEG_INFINITY;
    for ring in rings {
        for p in ring {
            minx = minx.min(p.x);
            miny = miny.min(p.y);
            maxx = maxx.max(p.x);
            maxy = maxy.max(p.y);
        }
    }
    (minx, miny, maxx, maxy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(cx: f64, cy: f64, half: f64) -> Vec<Point> {
        vec![
            Point { x: cx - half, y: cy - half },
            Point { x: cx + half, y: cy - half },
            Point { x: cx + half, y: cy + half },
            Point { x: cx - half, y: cy + half },
        ]
    }

    #[test]
    fn contains_respects_offset() {
        let rings = vec![square(50.0, 50.0, 10.0)];
        assert!(rings_contain(&rings, (0.0, 0.0), Point { x: 50.0, y: 50.0 }));
        assert!(!rings_contain(&rings, (0.0, 0.0), Point { x: 70.0, y: 50.0 }));
        assert!(rings_contain(&rings, (20.0, 0.0), Point { x: 70.0, y: 50.0 }));
    }

    #[test]
    fn hole_is_outside() {
        let rings = vec![square(50.0, 50.0, 20.0), square(50.0, 50.0, 5.0)];
        assert!(!rings_contain(&rings, (0.0, 0.0), Point { x: 50.0, y: 50.0 }));
        assert!(rings_contain(&rings, (0.0, 0.0), Point { x: 40.0, y: 50.0 }));
    }
}
