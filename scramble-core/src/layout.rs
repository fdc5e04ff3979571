use serde::Deserialize;

use crate::error::LayoutError;
use crate::geom::Point;

/// Axis-aligned play area. `margin` is the gap between the viewport edge and
/// the frame; `width`/`height` are the inner rectangle the pieces live in.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Frame {
    pub margin: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn from_viewport(margin: f64, viewport_w: f64, viewport_h: f64) -> Frame {
        Frame {
            margin,
            width: viewport_w - margin * 2.0,
            height: viewport_h - margin * 2.0,
        }
    }

    /// Clamp a display position into the draggable bounds.
    pub fn clamp(&self, p: Point) -> Point {
        Point {
            x: p.x.clamp(self.margin, self.margin + self.width),
            y: p.y.clamp(self.margin, self.margin + self.height),
        }
    }

    pub fn perimeter(&self) -> f64 {
        2.0 * (self.width + self.height)
    }
}

/// Position on the frame's inner perimeter after walking `dist` clockwise
/// from the top-left. On each segment one coordinate holds at `inset` from
/// the edge while the other varies with the remaining distance.
pub fn perimeter_point(frame: &Frame, dist: f64, inset: f64) -> Point {
    let m = frame.margin;
    let w = frame.width;
    let h = frame.height;
    if dist < w {
        Point { x: m + dist, y: m + inset }
    } else if dist < w + h {
        Point {
            x: m + w - inset,
            y: m + (dist - w),
        }
    } else if dist < 2.0 * w + h {
        Point {
            x: m + w - (dist - w - h),
            y: m + h - inset,
        }
    } else {
        Point {
            x: m + inset,
            y: m + h - (dist - 2.0 * w - h),
        }
    }
}

/// Evenly spaced scatter positions for `count` pieces, walked clockwise.
pub fn scatter_positions(frame: &Frame, count: usize, inset: f64) -> Result<Vec<Point>, LayoutError> {
    if count == 0 {
        return Err(LayoutError::NoRegions);
    }
    let step = frame.perimeter() / count as f64;
    Ok((0..count)
        .map(|i| perimeter_point(frame, step * i as f64, inset))
        .collect())
}

// splitmix32: deterministic per seed, enough dispersion for a shuffle.
fn splitmix32(mut value: u32) -> u32 {
    value = value.wrapping_add(0x9E37_79B9);
    let mut z = value;
    z = (z ^ (z >> 16)).wrapping_mul(0x85EB_CA6B);
    z = (z ^ (z >> 13)).wrapping_mul(0xC2B2_AE35);
    z ^ (z >> 16)
}

/// Seeded Fisher-Yates permutation of `0..count`. The scatter takes this as
/// an explicit argument so tests can pin the order.
pub fn shuffled_order(count: usize, seed: u32) -> Vec<usize> {
    let mut order: Vec<usize> = (0..count).collect();
    let mut s = seed;
    for i in (1..count).rev() {
        s = splitmix32(s);
        let j = (s as usize) % (i + 1);
        order.swap(i, j);
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Frame = Frame {
        margin: 10.0,
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn zero_regions_is_a_configuration_error() {
        assert_eq!(
            scatter_positions(&FRAME, 0, 45.0).unwrap_err(),
            LayoutError::NoRegions
        );
    }

    #[test]
    fn every_position_is_inside_the_viewport() {
        for count in [1, 2, 5, 81, 200] {
            let positions = scatter_positions(&FRAME, count, 45.0).unwrap();
            assert_eq!(positions.len(), count);
            for p in &positions {
                assert!(p.x > 0.0 && p.x < FRAME.margin * 2.0 + FRAME.width);
                assert!(p.y > 0.0 && p.y < FRAME.margin * 2.0 + FRAME.height);
                // also inside the drag clamp range
                assert_eq!(FRAME.clamp(*p), *p);
            }
        }
    }

    #[test]
    fn walked_distances_are_distinct() {
        let step = FRAME.perimeter() / 81.0;
        for i in 0..81usize {
            for j in (i + 1)..81 {
                assert!((step * i as f64 - step * j as f64).abs() > 1e-9);
            }
        }
        // distinct distances land on distinct points for a sane inset
        let positions = scatter_positions(&FRAME, 81, 45.0).unwrap();
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                assert!(positions[i].distance(positions[j]) > 1e-9);
            }
        }
    }

    #[test]
    fn layout_is_idempotent() {
        let a = scatter_positions(&FRAME, 81, 45.0).unwrap();
        let b = scatter_positions(&FRAME, 81, 45.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn segments_hold_the_inset_coordinate() {
        let f = FRAME;
        let top = perimeter_point(&f, 1.0, 45.0);
        assert_eq!(top.y, f.margin + 45.0);
        let right = perimeter_point(&f, f.width + 1.0, 45.0);
        assert_eq!(right.x, f.margin + f.width - 45.0);
        let bottom = perimeter_point(&f, 2.0 * f.width + f.height - 1.0, 45.0);
        assert_eq!(bottom.y, f.margin + f.height - 45.0);
        let left = perimeter_point(&f, 2.0 * f.width + f.height + 1.0, 45.0);
        assert_eq!(left.x, f.margin + 45.0);
    }

    #[test]
    fn shuffle_is_a_permutation_and_seed_stable() {
        let a = shuffled_order(81, 7);
        let b = shuffled_order(81, 7);
        assert_eq!(a, b);
        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..81).collect::<Vec<_>>());
        assert_ne!(shuffled_order(81, 8), a);
    }

    #[test]
    fn clamp_pins_runaway_positions() {
        let p = FRAME.clamp(Point { x: -50.0, y: 300.0 });
        assert_eq!(p, Point { x: 10.0, y: 300.0 });
        let q = FRAME.clamp(Point { x: 5000.0, y: -3.0 });
        assert_eq!(q, Point { x: 810.0, y: 10.0 });
    }
}
