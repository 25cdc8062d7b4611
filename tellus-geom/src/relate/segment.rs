use crate::coordinate::Coordinate;

/// Orientation of a triplet of points.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Orientation {
    Clockwise,
    Counterclockwise,
    Collinear,
}

impl Orientation {
    /// Determines orientation of a triplet of points.
    pub fn triplet(p: &Coordinate, q: &Coordinate, r: &Coordinate) -> Self {
        let v = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
        if v == 0.0 {
            Self::Collinear
        } else if v > 0.0 {
            Self::Clockwise
        } else {
            Self::Counterclockwise
        }
    }
}

/// A straight line segment between two points.
#[derive(Debug, PartialEq)]
pub(crate) struct Segment<'a>(pub &'a Coordinate, pub &'a Coordinate);

fn within_bounds(p: &Coordinate, q: &Coordinate, r: &Coordinate) -> bool {
    let x_max = if p.x >= r.x { p.x } else { r.x };
    let x_min = if p.x <= r.x { p.x } else { r.x };
    let y_max = if p.y >= r.y { p.y } else { r.y };
    let y_min = if p.y <= r.y { p.y } else { r.y };

    q.x <= x_max && q.x >= x_min && q.y <= y_max && q.y >= y_min
}

impl Segment<'_> {
    /// Returns true if the segment has at least one common point with the
    /// `other` segment. Touching endpoints count.
    pub fn intersects(&self, other: &Segment) -> bool {
        let o1 = Orientation::triplet(self.0, other.0, self.1);
        let o2 = Orientation::triplet(self.0, other.1, self.1);
        let o3 = Orientation::triplet(other.0, self.0, other.1);
        let o4 = Orientation::triplet(other.0, self.1, other.1);

        if o1 != o2 && o3 != o4 {
            return true;
        }

        if o1 == Orientation::Collinear && within_bounds(self.0, other.0, self.1) {
            return true;
        }
        if o2 == Orientation::Collinear && within_bounds(self.0, other.1, self.1) {
            return true;
        }
        if o3 == Orientation::Collinear && within_bounds(other.0, self.0, other.1) {
            return true;
        }
        if o4 == Orientation::Collinear && within_bounds(other.0, self.1, other.1) {
            return true;
        }

        false
    }

    /// Returns true if the segments cross in a single point that is interior
    /// to both. Touching or collinear segments do not cross properly.
    pub fn crosses_properly(&self, other: &Segment) -> bool {
        let o1 = Orientation::triplet(self.0, other.0, self.1);
        let o2 = Orientation::triplet(self.0, other.1, self.1);
        let o3 = Orientation::triplet(other.0, self.0, other.1);
        let o4 = Orientation::triplet(other.0, self.1, other.1);

        o1 != Orientation::Collinear
            && o2 != Orientation::Collinear
            && o3 != Orientation::Collinear
            && o4 != Orientation::Collinear
            && o1 != o2
            && o3 != o4
    }

    /// Returns true if the point lies on the segment, endpoints included.
    pub fn contains_point(&self, point: &Coordinate) -> bool {
        Orientation::triplet(self.0, point, self.1) == Orientation::Collinear
            && within_bounds(self.0, point, self.1)
    }

    /// Returns true if the segments are collinear and share more than a
    /// single point.
    pub fn overlaps_collinear(&self, other: &Segment) -> bool {
        let collinear = Orientation::triplet(self.0, self.1, other.0) == Orientation::Collinear
            && Orientation::triplet(self.0, self.1, other.1) == Orientation::Collinear;
        if !collinear {
            return false;
        }

        // Compare intervals along the dominant axis of this segment.
        let horizontal = (self.1.x - self.0.x).abs() >= (self.1.y - self.0.y).abs();
        let (a0, a1, b0, b1) = if horizontal {
            (self.0.x, self.1.x, other.0.x, other.1.x)
        } else {
            (self.0.y, self.1.y, other.0.y, other.1.y)
        };
        let (a_min, a_max) = if a0 <= a1 { (a0, a1) } else { (a1, a0) };
        let (b_min, b_max) = if b0 <= b1 { (b0, b1) } else { (b1, b0) };

        let start = if a_min > b_min { a_min } else { b_min };
        let end = if a_max < b_max { a_max } else { b_max };
        start < end
    }

    /// Middle point of the segment. Elevation is dropped.
    pub fn midpoint(&self) -> Coordinate {
        Coordinate::new((self.0.x + self.1.x) / 2.0, (self.0.y + self.1.y) / 2.0)
    }
}
