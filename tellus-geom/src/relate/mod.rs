//! Spatial predicates over the geometry family.
//!
//! All predicates share one computational core: triplet orientation, segment
//! intersection and winding-number ring containment. Dispatch is an
//! exhaustive match over the variant pair, so growing the family forces every
//! predicate to be revisited.
//!
//! Containment of composite geometries is part-wise: a geometry contains
//! another if every part of the second is contained in a single part of the
//! first. Boundary-grazing inputs resolve boundary-inclusively.

mod ring;
mod segment;

use crate::coordinate::Coordinate;
use crate::geometry::{Dimension, Geometry};
use crate::line_string::{LineString, LinearRing};
use crate::point::Point;
use crate::polygon::Polygon;
use ring::{
    line_contains_point, line_interior_contains_point, polygon_contains_point,
    polygon_interior_contains_point, ring_contains_point, segments,
};

/// A primitive shape taking part in a predicate evaluation.
///
/// Composite geometries decompose into these before dispatch. Degenerate
/// one-vertex lines decompose into points, and empty parts disappear, so the
/// matrix below only ever sees well-formed operands.
#[derive(Debug)]
enum Prim<'a> {
    Point(&'a Coordinate),
    Line(&'a [Coordinate]),
    Poly(&'a Polygon),
}

fn collect_line<'a>(coordinates: &'a [Coordinate], out: &mut Vec<Prim<'a>>) {
    match coordinates.len() {
        0 => {}
        1 => out.push(Prim::Point(&coordinates[0])),
        _ => out.push(Prim::Line(coordinates)),
    }
}

fn collect_prims<'a>(geometry: &'a Geometry, out: &mut Vec<Prim<'a>>) {
    match geometry {
        Geometry::Point(p) => {
            if let Some(c) = p.coordinate() {
                out.push(Prim::Point(c));
            }
        }
        Geometry::LineString(l) => collect_line(l.coordinates(), out),
        Geometry::LinearRing(r) => collect_line(r.coordinates(), out),
        Geometry::Polygon(p) => {
            if !p.is_empty() {
                out.push(Prim::Poly(p));
            }
        }
        Geometry::MultiPoint(mp) => {
            for p in mp.points() {
                if let Some(c) = p.coordinate() {
                    out.push(Prim::Point(c));
                }
            }
        }
        Geometry::MultiLineString(ml) => {
            for l in ml.line_strings() {
                collect_line(l.coordinates(), out);
            }
        }
        Geometry::MultiPolygon(mp) => {
            for p in mp.polygons() {
                if !p.is_empty() {
                    out.push(Prim::Poly(p));
                }
            }
        }
        Geometry::GeometryCollection(c) => {
            for g in c.geometries() {
                collect_prims(g, out);
            }
        }
    }
}

fn prims(geometry: &Geometry) -> Vec<Prim<'_>> {
    let mut out = Vec::new();
    collect_prims(geometry, &mut out);
    out
}

/// Sample points of a line for area containment tests: every vertex plus the
/// midpoint of every segment.
fn line_samples(coordinates: &[Coordinate]) -> Vec<Coordinate> {
    let mut samples: Vec<Coordinate> = coordinates.to_vec();
    samples.extend(segments(coordinates).map(|s| s.midpoint()));
    samples
}

fn lines_intersect(a: &[Coordinate], b: &[Coordinate]) -> bool {
    segments(a).any(|sa| segments(b).any(|sb| sa.intersects(&sb)))
}

fn lines_cross_properly(a: &[Coordinate], b: &[Coordinate]) -> bool {
    segments(a).any(|sa| segments(b).any(|sb| sa.crosses_properly(&sb)))
}

fn lines_overlap_collinear(a: &[Coordinate], b: &[Coordinate]) -> bool {
    segments(a).any(|sa| segments(b).any(|sb| sa.overlaps_collinear(&sb)))
}

fn line_crosses_polygon_boundary(line: &[Coordinate], polygon: &Polygon) -> bool {
    polygon
        .rings()
        .any(|ring| lines_cross_properly(line, ring.coordinates()))
}

fn line_intersects_polygon(line: &[Coordinate], polygon: &Polygon) -> bool {
    line.iter().any(|c| polygon_contains_point(polygon, c))
        || polygon
            .rings()
            .any(|ring| lines_intersect(line, ring.coordinates()))
}

fn polygons_intersect(a: &Polygon, b: &Polygon) -> bool {
    a.exterior()
        .coordinates()
        .iter()
        .any(|c| polygon_contains_point(b, c))
        || b.exterior()
            .coordinates()
            .iter()
            .any(|c| polygon_contains_point(a, c))
        || a.rings().any(|ra| {
            b.rings()
                .any(|rb| lines_intersect(ra.coordinates(), rb.coordinates()))
        })
}

fn line_contains_line(a: &[Coordinate], b: &[Coordinate]) -> bool {
    b.iter().all(|c| line_contains_point(a, c))
        && segments(b).all(|s| line_contains_point(a, &s.midpoint()))
}

fn polygon_contains_line(polygon: &Polygon, line: &[Coordinate]) -> bool {
    line_samples(line)
        .iter()
        .all(|c| polygon_contains_point(polygon, c))
        && !line_crosses_polygon_boundary(line, polygon)
}

fn polygon_contains_polygon(a: &Polygon, b: &Polygon) -> bool {
    if !polygon_contains_line(a, b.exterior().coordinates()) {
        return false;
    }

    // A hole of `a` poking into `b` leaves part of `b` uncovered.
    a.interiors().iter().all(|hole| {
        hole.coordinates()
            .iter()
            .all(|c| !polygon_interior_contains_point(b, c))
    })
}

fn line_interiors_intersect(a: &[Coordinate], b: &[Coordinate]) -> bool {
    if lines_cross_properly(a, b) || lines_overlap_collinear(a, b) {
        return true;
    }
    if line_contains_line(a, b) || line_contains_line(b, a) {
        return true;
    }

    let vertex_on_interior = |from: &[Coordinate], to: &[Coordinate]| {
        from.iter().any(|c| {
            line_interior_contains_point(from, c) && line_interior_contains_point(to, c)
        })
    };

    vertex_on_interior(a, b) || vertex_on_interior(b, a)
}

fn line_polygon_interiors_intersect(line: &[Coordinate], polygon: &Polygon) -> bool {
    line_samples(line)
        .iter()
        .any(|c| polygon_interior_contains_point(polygon, c))
        || line_crosses_polygon_boundary(line, polygon)
}

fn polygon_interiors_intersect(a: &Polygon, b: &Polygon) -> bool {
    if polygon_contains_polygon(a, b) || polygon_contains_polygon(b, a) {
        return true;
    }

    let samples_inside = |from: &Polygon, to: &Polygon| {
        line_samples(from.exterior().coordinates())
            .iter()
            .any(|c| polygon_interior_contains_point(to, c))
    };

    samples_inside(a, b)
        || samples_inside(b, a)
        || a.rings().any(|ra| {
            b.rings()
                .any(|rb| lines_cross_properly(ra.coordinates(), rb.coordinates()))
        })
}

fn prim_intersects(a: &Prim, b: &Prim) -> bool {
    match (a, b) {
        (Prim::Point(p), Prim::Point(q)) => p.equal_2d(q),
        (Prim::Point(p), Prim::Line(l)) | (Prim::Line(l), Prim::Point(p)) => {
            line_contains_point(l, p)
        }
        (Prim::Point(p), Prim::Poly(poly)) | (Prim::Poly(poly), Prim::Point(p)) => {
            polygon_contains_point(poly, p)
        }
        (Prim::Line(l1), Prim::Line(l2)) => lines_intersect(l1, l2),
        (Prim::Line(l), Prim::Poly(poly)) | (Prim::Poly(poly), Prim::Line(l)) => {
            line_intersects_polygon(l, poly)
        }
        (Prim::Poly(p1), Prim::Poly(p2)) => polygons_intersect(p1, p2),
    }
}

fn prim_contains(a: &Prim, b: &Prim) -> bool {
    match (a, b) {
        (Prim::Point(p), Prim::Point(q)) => p.equal_2d(q),
        (Prim::Point(_), _) => false,
        (Prim::Line(l), Prim::Point(p)) => line_contains_point(l, p),
        (Prim::Line(l1), Prim::Line(l2)) => line_contains_line(l1, l2),
        (Prim::Line(_), Prim::Poly(_)) => false,
        (Prim::Poly(poly), Prim::Point(p)) => polygon_contains_point(poly, p),
        (Prim::Poly(poly), Prim::Line(l)) => polygon_contains_line(poly, l),
        (Prim::Poly(p1), Prim::Poly(p2)) => polygon_contains_polygon(p1, p2),
    }
}

fn prim_interiors_intersect(a: &Prim, b: &Prim) -> bool {
    match (a, b) {
        (Prim::Point(p), Prim::Point(q)) => p.equal_2d(q),
        (Prim::Point(p), Prim::Line(l)) | (Prim::Line(l), Prim::Point(p)) => {
            line_interior_contains_point(l, p)
        }
        (Prim::Point(p), Prim::Poly(poly)) | (Prim::Poly(poly), Prim::Point(p)) => {
            polygon_interior_contains_point(poly, p)
        }
        (Prim::Line(l1), Prim::Line(l2)) => line_interiors_intersect(l1, l2),
        (Prim::Line(l), Prim::Poly(poly)) | (Prim::Poly(poly), Prim::Line(l)) => {
            line_polygon_interiors_intersect(l, poly)
        }
        (Prim::Poly(p1), Prim::Poly(p2)) => polygon_interiors_intersect(p1, p2),
    }
}

fn prim_crosses(a: &Prim, b: &Prim) -> bool {
    match (a, b) {
        (Prim::Line(l1), Prim::Line(l2)) => lines_cross_properly(l1, l2),
        (Prim::Line(l), Prim::Poly(poly)) | (Prim::Poly(poly), Prim::Line(l)) => {
            if line_crosses_polygon_boundary(l, poly) {
                return true;
            }
            let samples = line_samples(l);
            let inside = samples
                .iter()
                .any(|c| polygon_interior_contains_point(poly, c));
            let outside = samples.iter().any(|c| !polygon_contains_point(poly, c));
            inside && outside
        }
        _ => false,
    }
}

fn prim_overlaps(a: &Prim, b: &Prim) -> bool {
    match (a, b) {
        (Prim::Line(l1), Prim::Line(l2)) => {
            lines_overlap_collinear(l1, l2)
                && !line_contains_line(l1, l2)
                && !line_contains_line(l2, l1)
        }
        (Prim::Poly(p1), Prim::Poly(p2)) => {
            polygon_interiors_intersect(p1, p2)
                && !polygon_contains_polygon(p1, p2)
                && !polygon_contains_polygon(p2, p1)
        }
        _ => false,
    }
}

impl Geometry {
    /// Returns true if the geometries have at least one common point.
    ///
    /// Shared boundaries count as intersecting. Empty operands intersect
    /// nothing.
    pub fn intersects(&self, other: &Geometry) -> bool {
        let a = prims(self);
        let b = prims(other);
        a.iter().any(|pa| b.iter().any(|pb| prim_intersects(pa, pb)))
    }

    /// Returns true if the geometries have no common point.
    pub fn disjoint(&self, other: &Geometry) -> bool {
        !self.intersects(other)
    }

    /// Returns true if every point of `other` is a point of this geometry.
    ///
    /// Containment is part-wise for composite geometries: every part of
    /// `other` must lie within a single part of this geometry. Empty operands
    /// contain nothing and are contained by nothing.
    pub fn contains(&self, other: &Geometry) -> bool {
        let a = prims(self);
        let b = prims(other);
        if a.is_empty() || b.is_empty() {
            return false;
        }

        b.iter().all(|pb| a.iter().any(|pa| prim_contains(pa, pb)))
    }

    /// Returns true if this geometry lies entirely within `other`.
    pub fn within(&self, other: &Geometry) -> bool {
        other.contains(self)
    }

    /// Returns true if the geometries meet only on their boundaries.
    ///
    /// A point touching a line coincides with one of the line's endpoints; a
    /// point touching a polygon lies on its boundary.
    pub fn touches(&self, other: &Geometry) -> bool {
        let a = prims(self);
        let b = prims(other);
        let intersects = a.iter().any(|pa| b.iter().any(|pb| prim_intersects(pa, pb)));

        intersects
            && !a
                .iter()
                .any(|pa| b.iter().any(|pb| prim_interiors_intersect(pa, pb)))
    }

    /// Returns true if the geometries cross: their interiors intersect in a
    /// part of lower dimension than the operands span.
    ///
    /// Always false when either operand has dimension 0 and for
    /// polygon-polygon pairs.
    pub fn crosses(&self, other: &Geometry) -> bool {
        if self.dimension() == Dimension::Point || other.dimension() == Dimension::Point {
            return false;
        }

        let a = prims(self);
        let b = prims(other);
        a.iter().any(|pa| b.iter().any(|pb| prim_crosses(pa, pb)))
    }

    /// Returns true if the geometries share part of their interior in their
    /// common dimension, while neither contains the other.
    ///
    /// Requires equal, non-zero dimensions; always false when a dimension-0
    /// operand is involved.
    pub fn overlaps(&self, other: &Geometry) -> bool {
        let dimension = self.dimension();
        if dimension == Dimension::Point || dimension != other.dimension() {
            return false;
        }
        if self.contains(other) || other.contains(self) {
            return false;
        }

        let a = prims(self);
        let b = prims(other);
        a.iter().any(|pa| b.iter().any(|pb| prim_overlaps(pa, pb)))
    }
}

// Convenience forms for the most common operand kinds, so callers do not have
// to wrap everything into `Geometry` first.
impl Point {
    /// Returns true if the point lies inside the polygon or on its boundary.
    pub fn within_polygon(&self, polygon: &Polygon) -> bool {
        match self.coordinate() {
            Some(c) => polygon_contains_point(polygon, c),
            None => false,
        }
    }

    /// Returns true if the point lies on the line.
    pub fn on_line(&self, line: &LineString) -> bool {
        match self.coordinate() {
            Some(c) => line_contains_point(line.coordinates(), c),
            None => false,
        }
    }
}

impl Polygon {
    /// Returns true if the coordinate lies inside the polygon or on its
    /// boundary.
    pub fn contains_coordinate(&self, coordinate: &Coordinate) -> bool {
        polygon_contains_point(self, coordinate)
    }
}

impl LinearRing {
    /// Returns true if the coordinate lies inside the ring or on it,
    /// ignoring any holes the owning polygon may have.
    pub fn contains_coordinate(&self, coordinate: &Coordinate) -> bool {
        ring_contains_point(self.coordinates(), coordinate)
    }
}

#[cfg(test)]
mod tests {
    use crate::collection::GeometryCollection;
    use crate::multi_point::MultiPoint;

    use super::*;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn square(min: f64, max: f64) -> Polygon {
        Polygon::new(
            LinearRing::new(vec![
                c(min, min),
                c(max, min),
                c(max, max),
                c(min, max),
                c(min, min),
            ]),
            vec![],
        )
    }

    fn line(coordinates: Vec<Coordinate>) -> Geometry {
        LineString::new(coordinates).into()
    }

    #[test]
    fn point_point_predicates() {
        let a: Geometry = Point::from_xy(1.0, 2.0).into();
        let b: Geometry = Point::from_xy(1.0, 2.0).into();
        let other: Geometry = Point::from_xy(3.0, 2.0).into();

        assert!(a.contains(&b));
        assert!(a.intersects(&b));
        assert!(a.within(&b));
        assert!(a.disjoint(&other));
        assert!(!a.overlaps(&b));
        assert!(!a.crosses(&b));
    }

    #[test]
    fn point_line_predicates() {
        let l = line(vec![c(0.0, 0.0), c(4.0, 0.0)]);
        let endpoint: Geometry = Point::from_xy(0.0, 0.0).into();
        let interior: Geometry = Point::from_xy(2.0, 0.0).into();
        let off: Geometry = Point::from_xy(2.0, 1.0).into();

        assert!(l.contains(&endpoint));
        assert!(l.contains(&interior));
        assert!(endpoint.touches(&l));
        assert!(!interior.touches(&l));
        assert!(interior.within(&l));
        assert!(off.disjoint(&l));
        assert!(!endpoint.overlaps(&l));
    }

    #[test]
    fn point_polygon_predicates() {
        let polygon: Geometry = Polygon::new(
            square(0.0, 4.0).exterior().clone(),
            vec![square(1.0, 2.0).exterior().clone()],
        )
        .into();

        let inside: Geometry = Point::from_xy(0.5, 0.5).into();
        let in_hole: Geometry = Point::from_xy(1.5, 1.5).into();
        let on_boundary: Geometry = Point::from_xy(4.0, 2.0).into();
        let on_hole_ring: Geometry = Point::from_xy(1.0, 1.5).into();

        assert!(polygon.contains(&inside));
        assert!(!polygon.contains(&in_hole));
        assert!(in_hole.disjoint(&polygon));
        assert!(on_boundary.touches(&polygon));
        assert!(on_hole_ring.touches(&polygon));
        assert!(!inside.touches(&polygon));
        assert!(!polygon.crosses(&inside));
    }

    #[test]
    fn line_line_predicates() {
        let a = line(vec![c(0.0, 0.0), c(4.0, 4.0)]);
        let crossing = line(vec![c(0.0, 4.0), c(4.0, 0.0)]);
        let touching = line(vec![c(4.0, 4.0), c(8.0, 0.0)]);
        let overlapping = line(vec![c(2.0, 2.0), c(6.0, 6.0)]);
        let inner = line(vec![c(1.0, 1.0), c(2.0, 2.0)]);

        assert!(a.crosses(&crossing));
        assert!(!a.touches(&crossing));
        assert!(a.touches(&touching));
        assert!(!a.crosses(&touching));
        assert!(a.overlaps(&overlapping));
        assert!(!a.overlaps(&inner));
        assert!(a.contains(&inner));
        assert!(inner.within(&a));
    }

    #[test]
    fn line_polygon_predicates() {
        let polygon: Geometry = square(0.0, 4.0).into();
        let crossing = line(vec![c(-1.0, 2.0), c(5.0, 2.0)]);
        let inside = line(vec![c(1.0, 1.0), c(3.0, 3.0)]);
        let boundary = line(vec![c(0.0, 0.0), c(4.0, 0.0)]);
        let outside = line(vec![c(5.0, 5.0), c(6.0, 6.0)]);

        assert!(crossing.crosses(&polygon));
        assert!(polygon.crosses(&crossing));
        assert!(polygon.contains(&inside));
        assert!(inside.within(&polygon));
        assert!(!inside.crosses(&polygon));
        assert!(boundary.touches(&polygon));
        assert!(!boundary.crosses(&polygon));
        assert!(outside.disjoint(&polygon));
        assert!(!polygon.overlaps(&crossing));
    }

    #[test]
    fn polygon_polygon_predicates() {
        let a: Geometry = square(0.0, 4.0).into();
        let overlapping: Geometry = square(2.0, 6.0).into();
        let inner: Geometry = square(1.0, 2.0).into();
        let touching: Geometry = square(4.0, 8.0).into();
        let apart: Geometry = square(5.0, 6.0).into();

        assert!(a.overlaps(&overlapping));
        assert!(a.intersects(&overlapping));
        assert!(!a.touches(&overlapping));
        assert!(a.contains(&inner));
        assert!(!a.overlaps(&inner));
        assert!(a.touches(&touching));
        assert!(!a.overlaps(&touching));
        assert!(a.disjoint(&apart));
        assert!(!a.crosses(&overlapping));
    }

    #[test]
    fn polygon_in_hole_is_disjoint() {
        let with_hole: Geometry = Polygon::new(
            square(0.0, 10.0).exterior().clone(),
            vec![square(2.0, 8.0).exterior().clone()],
        )
        .into();
        let in_hole: Geometry = square(4.0, 6.0).into();

        assert!(with_hole.disjoint(&in_hole));
        assert!(!with_hole.contains(&in_hole));
    }

    #[test]
    fn multi_and_collection_aggregate_members() {
        let multi: Geometry = MultiPoint::new(vec![
            Point::from_xy(0.5, 0.5),
            Point::from_xy(9.0, 9.0),
        ])
        .into();
        let polygon: Geometry = square(0.0, 1.0).into();

        assert!(multi.intersects(&polygon));
        assert!(!polygon.contains(&multi));
        // Per OGC, dimension-0 operands never overlap or cross.
        assert!(!multi.overlaps(&multi.clone()));
        assert!(!multi.crosses(&polygon));

        let collection: Geometry = GeometryCollection::new(vec![
            Point::from_xy(0.5, 0.5).into(),
            square(10.0, 11.0).into(),
        ])
        .into();
        assert!(collection.intersects(&polygon));
    }

    #[test]
    fn empty_operands() {
        let empty: Geometry = Point::empty().into();
        let polygon: Geometry = square(0.0, 1.0).into();

        assert!(!empty.intersects(&polygon));
        assert!(empty.disjoint(&polygon));
        assert!(!polygon.contains(&empty));
        assert!(!empty.within(&polygon));
        assert!(!empty.touches(&polygon));
    }
}
