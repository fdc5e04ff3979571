use geo::Centroid;
use geo_types::{Coord, LineString, MultiPolygon, Polygon};

use crate::error::{BoardError, LayoutError};
use crate::geojson::{Feature, FeatureCollection};
use crate::geom::{bounds_of_rings, rings_contain, Point};
use crate::layout::{scatter_positions, shuffled_order, Frame};
use crate::projection::Projector;

/// One draggable map piece.
///
/// `rings` hold the projected outline at its true location; the piece is
/// drawn wherever `pos` currently is, offset from `anchor`. `target` is the
/// centroid of the projected outline — the point the piece must be released
/// near to snap. A degenerate outline leaves `target` empty: such a region
/// stays draggable but can never validate as placed.
#[derive(Clone, Debug)]
pub struct Region {
    pub name: String,
    rings: Vec<Vec<Point>>,
    anchor: Point,
    pub target: Option<Point>,
    pub pos: Point,
    pub placed: bool,
}

impl Region {
    pub fn from_feature(feature: &Feature, projector: &Projector, name_key: &str) -> Option<Region> {
        let geometry = feature.geometry.as_ref()?;

        let mut rings: Vec<Vec<Point>> = Vec::new();
        let mut screen_polys: Vec<Polygon<f64>> = Vec::new();
        for poly in geometry.polygons() {
            let mut projected: Vec<Vec<Point>> = Vec::new();
            for ring in poly {
                let pts: Vec<Point> = ring
                    .iter()
                    .map(|&[lon, lat]| projector.project(lon, lat))
                    .collect();
                if pts.len() >= 3 {
                    projected.push(pts);
                }
            }
            if projected.is_empty() {
                continue;
            }
            let to_line = |pts: &Vec<Point>| {
                LineString::from(
                    pts.iter()
                        .map(|p| Coord { x: p.x, y: p.y })
                        .collect::<Vec<_>>(),
                )
            };
            let exterior = to_line(&projected[0]);
            let holes = projected[1..].iter().map(to_line).collect::<Vec<_>>();
            screen_polys.push(Polygon::new(exterior, holes));
            rings.extend(projected);
        }
        if rings.is_empty() {
            return None;
        }

        let target = MultiPolygon::new(screen_polys)
            .centroid()
            .map(|c| Point { x: c.x(), y: c.y() });
        let anchor = target.unwrap_or_else(|| {
            let (minx, miny, maxx, maxy) = bounds_of_rings(&rings);
            Point {
                x: (minx + maxx) / 2.0,
                y: (miny + maxy) / 2.0,
            }
        });

        Some(Region {
            name: feature.label(name_key).unwrap_or_default(),
            rings,
            anchor,
            target,
            pos: anchor,
            placed: false,
        })
    }

    pub fn rings(&self) -> &[Vec<Point>] {
        &self.rings
    }

    /// Translation currently applied to the outline when drawing.
    pub fn offset(&self) -> (f64, f64) {
        (self.pos.x - self.anchor.x, self.pos.y - self.anchor.y)
    }

    pub fn contains(&self, p: Point) -> bool {
        rings_contain(&self.rings, self.offset(), p)
    }
}

/// The full scene: every region plus the frame they are dragged within.
/// Vec order is draw order; the last region renders topmost.
#[derive(Clone, Debug)]
pub struct Board {
    pub frame: Frame,
    pub regions: Vec<Region>,
}

impl Board {
    pub fn from_features(
        collection: &FeatureCollection,
        projector: &Projector,
        frame: Frame,
        name_key: &str,
    ) -> Result<Board, BoardError> {
        if frame.width <= 0.0 || frame.height <= 0.0 {
            return Err(BoardError::EmptyFrame {
                width: frame.width,
                height: frame.height,
            });
        }
        let regions: Vec<Region> = collection
            .features
            .iter()
            .filter_map(|f| Region::from_feature(f, projector, name_key))
            .collect();
        if regions.is_empty() {
            return Err(BoardError::NoRegions);
        }
        Ok(Board { frame, regions })
    }

    /// Scatter all pieces along the frame perimeter in a seeded random order.
    pub fn scatter(&mut self, seed: u32, inset: f64) -> Result<(), LayoutError> {
        let order = shuffled_order(self.regions.len(), seed);
        self.scatter_with_order(&order, inset)
    }

    /// Deterministic scatter under an explicit permutation: the region at
    /// `order[slot]` receives the slot'th perimeter position.
    pub fn scatter_with_order(&mut self, order: &[usize], inset: f64) -> Result<(), LayoutError> {
        if order.len() != self.regions.len() {
            return Err(LayoutError::OrderMismatch {
                got: order.len(),
                expected: self.regions.len(),
            });
        }
        let positions = scatter_positions(&self.frame, order.len(), inset)?;
        for (slot, &idx) in order.iter().enumerate() {
            self.regions[idx].pos = positions[slot];
        }
        Ok(())
    }

    /// Topmost region under the point, or none.
    pub fn hit_test(&self, p: Point) -> Option<usize> {
        self.regions.iter().rposition(|r| r.contains(p))
    }

    /// Move a region to the top of the draw order, returning its new index.
    pub(crate) fn raise(&mut self, idx: usize) -> usize {
        let r = self.regions.remove(idx);
        self.regions.push(r);
        self.regions.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectionConfig;

    fn collection() -> FeatureCollection {
        FeatureCollection::parse(
            r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"ilad": "A"}, "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[34.5, 38.5], [35.5, 38.5], [35.5, 39.5], [34.5, 39.5], [34.5, 38.5]]]
                }},
                {"type": "Feature", "properties": {"ilad": "B"}, "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[36.0, 38.5], [37.0, 38.5], [37.0, 39.5], [36.0, 39.5], [36.0, 38.5]]]
                }},
                {"type": "Feature", "properties": {"ilad": "degenerate"}, "geometry": {
                    "type": "Polygon",
                    "coordinates": [[]]
                }}
            ]
        }"#,
        )
        .unwrap()
    }

    fn board() -> Board {
        let projector = Projector::for_viewport(&ProjectionConfig::default(), 820.0, 620.0, 600.0);
        Board::from_features(
            &collection(),
            &projector,
            Frame::from_viewport(10.0, 820.0, 620.0),
            "ilad",
        )
        .unwrap()
    }

    #[test]
    fn regions_start_at_their_centroid_with_a_target() {
        let b = board();
        // the empty-ring feature is dropped at load
        assert_eq!(b.regions.len(), 2);
        for r in &b.regions {
            let t = r.target.unwrap();
            assert_eq!(r.pos, t);
            assert!(!r.placed);
            assert_eq!(r.offset(), (0.0, 0.0));
        }
    }

    #[test]
    fn hit_test_finds_the_topmost_region() {
        let mut b = board();
        let t0 = b.regions[0].target.unwrap();
        assert_eq!(b.hit_test(t0), Some(0));
        // stack region 1 over region 0 and probe again
        b.regions[1].pos = t0;
        assert_eq!(b.hit_test(t0), Some(1));
        let top = b.raise(0);
        assert_eq!(top, 1);
        assert_eq!(b.hit_test(t0), Some(1));
        assert_eq!(b.regions[top].name, "A");
    }

    #[test]
    fn scatter_moves_every_region_to_the_perimeter() {
        let mut b = board();
        b.scatter(42, 45.0).unwrap();
        for r in &b.regions {
            assert_ne!(Some(r.pos), r.target);
            assert_eq!(b.frame.clamp(r.pos), r.pos);
        }
    }

    #[test]
    fn scatter_order_must_cover_the_board() {
        let mut b = board();
        let err = b.scatter_with_order(&[0], 45.0).unwrap_err();
        assert_eq!(
            err,
            LayoutError::OrderMismatch {
                got: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn empty_collection_and_empty_frame_are_fatal() {
        let projector = Projector::for_viewport(&ProjectionConfig::default(), 820.0, 620.0, 600.0);
        let empty = FeatureCollection { features: vec![] };
        let frame = Frame::from_viewport(10.0, 820.0, 620.0);
        assert!(matches!(
            Board::from_features(&empty, &projector, frame, "ilad"),
            Err(BoardError::NoRegions)
        ));
        let no_area = Frame {
            margin: 10.0,
            width: 0.0,
            height: 600.0,
        };
        assert!(matches!(
            Board::from_features(&collection(), &projector, no_area, "ilad"),
            Err(BoardError::EmptyFrame { .. })
        ));
    }
}
