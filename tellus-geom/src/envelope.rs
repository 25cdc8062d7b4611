use num_traits::{FromPrimitive, Num};
use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::line_string::LinearRing;
use crate::polygon::Polygon;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
struct Bounds<N> {
    x_min: N,
    x_max: N,
    y_min: N,
    y_max: N,
}

/// Axis-aligned bounding box with an explicit empty state.
///
/// An empty envelope behaves as the absorbing element of envelope arithmetic:
/// unioning with it returns the other operand unchanged, intersecting with it
/// returns the empty envelope. Every operation checks for emptiness before
/// touching the bounds, so no sentinel values ever leak into the arithmetic.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<N = f64> {
    bounds: Option<Bounds<N>>,
}

impl<N> Default for Envelope<N> {
    fn default() -> Self {
        Self { bounds: None }
    }
}

impl<N: Num + Copy + PartialOrd + FromPrimitive> Envelope<N> {
    /// Creates an envelope from its bounds. Swapped bounds are normalised.
    pub fn new(x_min: N, x_max: N, y_min: N, y_max: N) -> Self {
        let (x_min, x_max) = if x_min > x_max {
            (x_max, x_min)
        } else {
            (x_min, x_max)
        };
        let (y_min, y_max) = if y_min > y_max {
            (y_max, y_min)
        } else {
            (y_min, y_max)
        };

        Self {
            bounds: Some(Bounds {
                x_min,
                x_max,
                y_min,
                y_max,
            }),
        }
    }

    /// Creates the empty envelope.
    pub fn empty() -> Self {
        Self { bounds: None }
    }

    /// Creates a degenerate envelope covering a single point.
    pub fn from_point(x: N, y: N) -> Self {
        Self {
            bounds: Some(Bounds {
                x_min: x,
                x_max: x,
                y_min: y,
                y_max: y,
            }),
        }
    }

    /// Returns true if the envelope covers no point at all.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// Lower X bound, `None` for the empty envelope.
    pub fn x_min(&self) -> Option<N> {
        self.bounds.map(|b| b.x_min)
    }

    /// Upper X bound, `None` for the empty envelope.
    pub fn x_max(&self) -> Option<N> {
        self.bounds.map(|b| b.x_max)
    }

    /// Lower Y bound, `None` for the empty envelope.
    pub fn y_min(&self) -> Option<N> {
        self.bounds.map(|b| b.y_min)
    }

    /// Upper Y bound, `None` for the empty envelope.
    pub fn y_max(&self) -> Option<N> {
        self.bounds.map(|b| b.y_max)
    }

    /// Extent along the X axis, zero for the empty envelope.
    pub fn width(&self) -> N {
        match self.bounds {
            Some(b) => b.x_max - b.x_min,
            None => N::zero(),
        }
    }

    /// Extent along the Y axis, zero for the empty envelope.
    pub fn height(&self) -> N {
        match self.bounds {
            Some(b) => b.y_max - b.y_min,
            None => N::zero(),
        }
    }

    /// Covered area, zero for the empty envelope.
    pub fn area(&self) -> N {
        self.width() * self.height()
    }

    /// Center point, `None` for the empty envelope.
    pub fn center(&self) -> Option<(N, N)> {
        let b = self.bounds?;
        let two = N::from_f64(2.0)?;
        Some(((b.x_min + b.x_max) / two, (b.y_min + b.y_max) / two))
    }

    /// Grows the envelope to cover the given point.
    pub fn expand_to_include(&mut self, x: N, y: N) {
        match &mut self.bounds {
            Some(b) => {
                if x < b.x_min {
                    b.x_min = x;
                }
                if x > b.x_max {
                    b.x_max = x;
                }
                if y < b.y_min {
                    b.y_min = y;
                }
                if y > b.y_max {
                    b.y_max = y;
                }
            }
            None => *self = Self::from_point(x, y),
        }
    }

    /// Grows the envelope to cover the `other` envelope.
    pub fn expand_to_include_envelope(&mut self, other: &Self) {
        *self = self.union(other);
    }

    /// Returns true if the point lies inside the envelope or on its boundary.
    pub fn contains_point(&self, x: N, y: N) -> bool {
        match self.bounds {
            Some(b) => b.x_min <= x && b.x_max >= x && b.y_min <= y && b.y_max >= y,
            None => false,
        }
    }

    /// Returns true if the `other` envelope lies entirely inside this one.
    ///
    /// An empty envelope contains nothing and is contained by nothing.
    pub fn contains(&self, other: &Self) -> bool {
        match (self.bounds, other.bounds) {
            (Some(a), Some(b)) => {
                a.x_min <= b.x_min && a.x_max >= b.x_max && a.y_min <= b.y_min && a.y_max >= b.y_max
            }
            _ => false,
        }
    }

    /// Returns true if the envelopes have at least one common point.
    ///
    /// A shared edge or corner counts as intersecting. Viewport culling relies
    /// on this being boundary-inclusive.
    pub fn intersects(&self, other: &Self) -> bool {
        match (self.bounds, other.bounds) {
            (Some(a), Some(b)) => {
                a.x_min <= b.x_max && a.x_max >= b.x_min && a.y_min <= b.y_max && a.y_max >= b.y_min
            }
            _ => false,
        }
    }

    /// Smallest envelope covering both operands.
    pub fn union(&self, other: &Self) -> Self {
        match (self.bounds, other.bounds) {
            (Some(a), Some(b)) => Self {
                bounds: Some(Bounds {
                    x_min: if a.x_min < b.x_min { a.x_min } else { b.x_min },
                    x_max: if a.x_max > b.x_max { a.x_max } else { b.x_max },
                    y_min: if a.y_min < b.y_min { a.y_min } else { b.y_min },
                    y_max: if a.y_max > b.y_max { a.y_max } else { b.y_max },
                }),
            },
            (Some(_), None) => *self,
            (None, Some(_)) => *other,
            (None, None) => Self::empty(),
        }
    }

    /// Common part of both operands. Empty when the operands are disjoint.
    pub fn intersection(&self, other: &Self) -> Self {
        if !self.intersects(other) {
            return Self::empty();
        }

        // Both operands are non-empty here, intersects is false otherwise.
        match (self.bounds, other.bounds) {
            (Some(a), Some(b)) => Self {
                bounds: Some(Bounds {
                    x_min: if a.x_min > b.x_min { a.x_min } else { b.x_min },
                    x_max: if a.x_max < b.x_max { a.x_max } else { b.x_max },
                    y_min: if a.y_min > b.y_min { a.y_min } else { b.y_min },
                    y_max: if a.y_max < b.y_max { a.y_max } else { b.y_max },
                }),
            },
            _ => Self::empty(),
        }
    }

    /// Area that would be added by absorbing the `other` envelope.
    ///
    /// Insertion heuristics of R-tree style indexes pick the node with the
    /// smallest enlargement.
    pub fn enlargement(&self, other: &Self) -> N {
        self.union(other).area() - self.area()
    }

    /// Returns the envelope grown by `distance` on every side.
    ///
    /// A negative distance shrinks the envelope; shrinking past zero extent
    /// collapses it to the empty envelope.
    pub fn expand_by(&self, distance: N) -> Self {
        match self.bounds {
            Some(b) => {
                let x_min = b.x_min - distance;
                let x_max = b.x_max + distance;
                let y_min = b.y_min - distance;
                let y_max = b.y_max + distance;
                if x_min > x_max || y_min > y_max {
                    Self::empty()
                } else {
                    Self {
                        bounds: Some(Bounds {
                            x_min,
                            x_max,
                            y_min,
                            y_max,
                        }),
                    }
                }
            }
            None => Self::empty(),
        }
    }
}

impl Envelope<f64> {
    /// Smallest envelope covering all the given coordinates.
    pub fn from_coordinates<'a>(coordinates: impl IntoIterator<Item = &'a Coordinate>) -> Self {
        let mut envelope = Self::empty();
        for c in coordinates {
            envelope.expand_to_include(c.x, c.y);
        }

        envelope
    }

    /// Converts the envelope into a rectangular polygon.
    ///
    /// The exterior ring is closed: it has five coordinates with the first one
    /// repeated at the end. Returns `None` for the empty envelope. Used to
    /// turn a viewport into a spatial filter geometry.
    pub fn to_polygon(&self) -> Option<Polygon> {
        let b = self.bounds?;
        let ring = LinearRing::new(vec![
            Coordinate::new(b.x_min, b.y_min),
            Coordinate::new(b.x_max, b.y_min),
            Coordinate::new(b.x_max, b.y_max),
            Coordinate::new(b.x_min, b.y_max),
            Coordinate::new(b.x_min, b.y_min),
        ]);

        Some(Polygon::new(ring, vec![]))
    }
}

impl FromIterator<Envelope<f64>> for Envelope<f64> {
    fn from_iter<T: IntoIterator<Item = Envelope<f64>>>(iter: T) -> Self {
        let mut result = Envelope::empty();
        for envelope in iter {
            result.expand_to_include_envelope(&envelope);
        }

        result
    }
}
