use crate::coordinate::Coordinate;
use crate::polygon::Polygon;
use crate::relate::segment::{Orientation, Segment};

/// Iterates over the segments of a coordinate sequence.
pub(crate) fn segments(coordinates: &[Coordinate]) -> impl Iterator<Item = Segment<'_>> {
    coordinates.windows(2).map(|w| Segment(&w[0], &w[1]))
}

/// Returns true if the point lies on one of the line's segments.
pub(crate) fn line_contains_point(coordinates: &[Coordinate], point: &Coordinate) -> bool {
    if coordinates.len() == 1 {
        return coordinates[0].equal_2d(point);
    }

    segments(coordinates).any(|s| s.contains_point(point))
}

/// Returns true if the point lies on the line but not on its boundary.
///
/// The boundary of an open line is its two endpoints; a closed line has no
/// boundary, so every point of it is interior.
pub(crate) fn line_interior_contains_point(coordinates: &[Coordinate], point: &Coordinate) -> bool {
    if !line_contains_point(coordinates, point) {
        return false;
    }

    match (coordinates.first(), coordinates.last()) {
        (Some(first), Some(last)) => {
            first.equal_2d(last) || (!point.equal_2d(first) && !point.equal_2d(last))
        }
        _ => false,
    }
}

/// Winding-number containment test for a closed ring, boundary-inclusive.
///
/// The ring is expected to repeat its first coordinate at the end; winding
/// direction does not matter.
pub(crate) fn ring_contains_point(ring: &[Coordinate], point: &Coordinate) -> bool {
    if ring.is_empty() {
        return false;
    }

    if line_contains_point(ring, point) {
        return true;
    }

    let mut wn = 0i64;
    for segment in segments(ring) {
        if segment.0.y <= point.y {
            if segment.1.y > point.y
                && Orientation::triplet(segment.0, segment.1, point)
                    == Orientation::Counterclockwise
            {
                wn += 1;
            }
        } else if segment.1.y <= point.y
            && Orientation::triplet(segment.0, segment.1, point) == Orientation::Clockwise
        {
            wn -= 1;
        }
    }

    wn != 0
}

/// Returns true if the point lies inside the polygon or on its boundary.
///
/// A point strictly inside a hole is outside the polygon; a point on a hole's
/// ring is on the polygon boundary and counts as contained.
pub(crate) fn polygon_contains_point(polygon: &Polygon, point: &Coordinate) -> bool {
    if !ring_contains_point(polygon.exterior().coordinates(), point) {
        return false;
    }

    for hole in polygon.interiors() {
        let coordinates = hole.coordinates();
        if ring_contains_point(coordinates, point) && !line_contains_point(coordinates, point) {
            return false;
        }
    }

    true
}

/// Returns true if the point lies on one of the polygon's rings.
pub(crate) fn polygon_boundary_contains_point(polygon: &Polygon, point: &Coordinate) -> bool {
    polygon
        .rings()
        .any(|ring| line_contains_point(ring.coordinates(), point))
}

/// Returns true if the point lies strictly inside the polygon.
pub(crate) fn polygon_interior_contains_point(polygon: &Polygon, point: &Coordinate) -> bool {
    polygon_contains_point(polygon, point) && !polygon_boundary_contains_point(polygon, point)
}
