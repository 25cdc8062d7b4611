//! Set operations over the geometry family.
//!
//! Only point-dimension operands have set-operation semantics implemented.
//! For everything else the operations fail loudly with
//! [`GeometryError::UnsupportedOperation`] instead of guessing: general
//! polygon clipping and buffering are deliberately out of this kernel's
//! scope.

use crate::coordinate::Coordinate;
use crate::error::GeometryError;
use crate::geometry::Geometry;
use crate::multi_point::MultiPoint;
use crate::point::Point;

/// The coordinates of a point-dimension geometry, `None` for any other kind.
fn point_set(geometry: &Geometry) -> Option<Vec<Coordinate>> {
    match geometry {
        Geometry::Point(p) => Some(p.coordinate().copied().into_iter().collect()),
        Geometry::MultiPoint(mp) => Some(
            mp.points()
                .iter()
                .filter_map(|p| p.coordinate().copied())
                .collect(),
        ),
        _ => None,
    }
}

fn push_unique(coordinates: &mut Vec<Coordinate>, candidate: Coordinate) {
    if !coordinates.iter().any(|c| c.equal_2d(&candidate)) {
        coordinates.push(candidate);
    }
}

/// Wraps a coordinate set back into the smallest fitting variant.
fn from_point_set(mut coordinates: Vec<Coordinate>, srid: i32) -> Geometry {
    let mut result = match coordinates.len() {
        0 => Point::empty().into(),
        1 => Geometry::Point(Point::new(coordinates.remove(0))),
        _ => MultiPoint::new(coordinates.into_iter().map(Point::new).collect()).into(),
    };
    result.set_srid(srid);
    result
}

fn unsupported(
    operation: &'static str,
    left: &Geometry,
    right: &Geometry,
) -> Result<Geometry, GeometryError> {
    Err(GeometryError::UnsupportedOperation {
        operation,
        left: left.kind(),
        right: right.kind(),
    })
}

impl Geometry {
    /// Set union of two point-dimension geometries.
    pub fn union(&self, other: &Geometry) -> Result<Geometry, GeometryError> {
        let (Some(a), Some(b)) = (point_set(self), point_set(other)) else {
            return unsupported("union", self, other);
        };

        let mut result = Vec::with_capacity(a.len() + b.len());
        for c in a.into_iter().chain(b) {
            push_unique(&mut result, c);
        }

        Ok(from_point_set(result, self.srid()))
    }

    /// Set intersection of two point-dimension geometries.
    pub fn intersection(&self, other: &Geometry) -> Result<Geometry, GeometryError> {
        let (Some(a), Some(b)) = (point_set(self), point_set(other)) else {
            return unsupported("intersection", self, other);
        };

        let mut result = Vec::new();
        for c in a {
            if b.iter().any(|o| o.equal_2d(&c)) {
                push_unique(&mut result, c);
            }
        }

        Ok(from_point_set(result, self.srid()))
    }

    /// Set difference of two point-dimension geometries.
    pub fn difference(&self, other: &Geometry) -> Result<Geometry, GeometryError> {
        let (Some(a), Some(b)) = (point_set(self), point_set(other)) else {
            return unsupported("difference", self, other);
        };

        let mut result = Vec::new();
        for c in a {
            if !b.iter().any(|o| o.equal_2d(&c)) {
                push_unique(&mut result, c);
            }
        }

        Ok(from_point_set(result, self.srid()))
    }

    /// Symmetric set difference of two point-dimension geometries.
    pub fn sym_difference(&self, other: &Geometry) -> Result<Geometry, GeometryError> {
        let (Some(a), Some(b)) = (point_set(self), point_set(other)) else {
            return unsupported("symmetric difference", self, other);
        };

        let mut result = Vec::new();
        for c in &a {
            if !b.iter().any(|o| o.equal_2d(c)) {
                push_unique(&mut result, *c);
            }
        }
        for c in &b {
            if !a.iter().any(|o| o.equal_2d(c)) {
                push_unique(&mut result, *c);
            }
        }

        Ok(from_point_set(result, self.srid()))
    }

    /// Buffering is not implemented for any variant.
    pub fn buffer(&self, _distance: f64) -> Result<Geometry, GeometryError> {
        Err(GeometryError::Unsupported {
            operation: "buffer",
            kind: self.kind(),
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use crate::geometry::GeometryKind;
    use crate::line_string::LinearRing;
    use crate::polygon::Polygon;

    use super::*;

    fn multi(coordinates: &[(f64, f64)]) -> Geometry {
        MultiPoint::new(
            coordinates
                .iter()
                .map(|&(x, y)| Point::from_xy(x, y))
                .collect(),
        )
        .into()
    }

    #[test]
    fn point_set_operations() {
        let a = multi(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        let b = multi(&[(1.0, 1.0), (3.0, 3.0)]);

        assert_eq!(
            a.union(&b).expect("point union"),
            multi(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)])
        );
        assert_eq!(
            a.intersection(&b).expect("point intersection"),
            Geometry::Point(Point::from_xy(1.0, 1.0))
        );
        assert_eq!(
            a.difference(&b).expect("point difference"),
            multi(&[(0.0, 0.0), (2.0, 2.0)])
        );
        assert_eq!(
            a.sym_difference(&b).expect("point symmetric difference"),
            multi(&[(0.0, 0.0), (2.0, 2.0), (3.0, 3.0)])
        );
    }

    #[test]
    fn empty_results_degrade_to_empty_point() {
        let a = Geometry::Point(Point::from_xy(1.0, 1.0));
        let b = Geometry::Point(Point::from_xy(2.0, 2.0));

        let intersection = a.intersection(&b).expect("point intersection");
        assert_eq!(intersection, Point::empty().into());
    }

    #[test]
    fn non_point_operands_are_rejected() {
        let square = Geometry::Polygon(Polygon::new(
            LinearRing::new(vec![
                Coordinate::new(0.0, 0.0),
                Coordinate::new(1.0, 0.0),
                Coordinate::new(1.0, 1.0),
                Coordinate::new(0.0, 0.0),
            ]),
            vec![],
        ));
        let point = Geometry::Point(Point::from_xy(0.0, 0.0));

        assert_matches!(
            square.union(&square),
            Err(GeometryError::UnsupportedOperation {
                operation: "union",
                left: GeometryKind::Polygon,
                right: GeometryKind::Polygon,
            })
        );
        assert_matches!(point.difference(&square), Err(_));
        assert_matches!(
            point.buffer(1.0),
            Err(GeometryError::Unsupported {
                operation: "buffer",
                kind: GeometryKind::Point,
            })
        );
    }
}
