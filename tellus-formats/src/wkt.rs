//! Well-Known Text codec.
//!
//! [`parse`] returns a typed result: `Ok` with an empty geometry means the
//! input said `EMPTY`, `Err` means the text could not be read. Callers that
//! prefer the degrade-to-empty policy use [`parse_or_empty`].
//!
//! Writing is deterministic: ordinates are formatted with six decimal
//! digits, so a round trip preserves coordinates to 1e-6 absolute error.
//! The binary codec in [`crate::wkb`] is the lossless alternative.

use std::fmt::Write as _;
use std::sync::OnceLock;

use regex::Regex;
use tellus_geom::{
    Coordinate, Geometry, GeometryCollection, GeometryKind, LineString, LinearRing,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};

use crate::error::WktError;

/// One top-level pattern splits any WKT into its keyword, an optional `Z`
/// dimension marker and the payload (`EMPTY` or a parenthesised group).
fn top_level_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?is)^\s*([a-z]+)\s*(?:z\b\s*)?(empty|\(.*\))\s*$").expect("valid pattern")
    })
}

/// Byte offset of `token` within `input`. Both must come from the same
/// original string.
fn offset_in(input: &str, token: &str) -> usize {
    token.as_ptr() as usize - input.as_ptr() as usize
}

fn kind_from_keyword(keyword: &str) -> Option<GeometryKind> {
    match keyword.to_ascii_uppercase().as_str() {
        "POINT" => Some(GeometryKind::Point),
        "LINESTRING" => Some(GeometryKind::LineString),
        "LINEARRING" => Some(GeometryKind::LinearRing),
        "POLYGON" => Some(GeometryKind::Polygon),
        "MULTIPOINT" => Some(GeometryKind::MultiPoint),
        "MULTILINESTRING" => Some(GeometryKind::MultiLineString),
        "MULTIPOLYGON" => Some(GeometryKind::MultiPolygon),
        "GEOMETRYCOLLECTION" => Some(GeometryKind::GeometryCollection),
        _ => None,
    }
}

/// Parses a WKT string into a geometry.
pub fn parse(input: &str) -> Result<Geometry, WktError> {
    parse_geometry(input, input)
}

/// Parses a WKT string, degrading to an empty geometry on failure.
///
/// The parse error is logged. When the keyword is readable the empty
/// instance of that variant is returned, otherwise the empty point.
pub fn parse_or_empty(input: &str) -> Geometry {
    match parse(input) {
        Ok(geometry) => geometry,
        Err(e) => {
            log::warn!("failed to parse WKT input: {e}");
            match leading_keyword_kind(input) {
                Some(kind) => Geometry::empty_of(kind),
                None => Point::empty().into(),
            }
        }
    }
}

fn leading_keyword_kind(input: &str) -> Option<GeometryKind> {
    let keyword: String = input
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    kind_from_keyword(&keyword)
}

fn parse_geometry(input: &str, text: &str) -> Result<Geometry, WktError> {
    let captures = top_level_pattern()
        .captures(text)
        .ok_or_else(|| WktError::Syntax {
            offset: offset_in(input, text),
            message: "expected a geometry keyword followed by a parenthesised payload or EMPTY"
                .into(),
        })?;
    let keyword = captures
        .get(1)
        .map(|m| m.as_str())
        .unwrap_or_default();
    let payload = captures
        .get(2)
        .map(|m| m.as_str())
        .unwrap_or_default();

    let kind =
        kind_from_keyword(keyword).ok_or_else(|| WktError::UnknownType(keyword.to_string()))?;

    if payload.eq_ignore_ascii_case("EMPTY") {
        return Ok(Geometry::empty_of(kind));
    }

    // The pattern guarantees the payload is parenthesised here.
    let body = &payload[1..payload.len() - 1];
    if body.trim().is_empty() {
        return Ok(Geometry::empty_of(kind));
    }

    Ok(match kind {
        GeometryKind::Point => Point::new(parse_tuple(input, body)?).into(),
        GeometryKind::LineString => LineString::new(parse_tuples(input, body)?).into(),
        GeometryKind::LinearRing => LinearRing::new(parse_tuples(input, body)?).into(),
        GeometryKind::Polygon => parse_polygon_body(input, body)?.into(),
        GeometryKind::MultiPoint => parse_multi_point(input, body)?.into(),
        GeometryKind::MultiLineString => parse_multi_line_string(input, body)?.into(),
        GeometryKind::MultiPolygon => parse_multi_polygon(input, body)?.into(),
        GeometryKind::GeometryCollection => parse_collection(input, body)?.into(),
    })
}

/// Splits `body` at the commas that sit outside any parentheses, validating
/// that the parentheses balance.
fn split_top_level<'a>(input: &str, body: &'a str) -> Result<Vec<&'a str>, WktError> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;

    for (i, ch) in body.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(WktError::Syntax {
                        offset: offset_in(input, body) + i,
                        message: "unbalanced closing parenthesis".into(),
                    });
                }
            }
            ',' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(WktError::Syntax {
            offset: offset_in(input, body) + body.len(),
            message: "unbalanced opening parenthesis".into(),
        });
    }

    parts.push(&body[start..]);
    Ok(parts)
}

/// Returns the content of `part` if it is a single parenthesised group
/// spanning the whole (trimmed) text.
///
/// Sibling groups like `(a),(b)` are left alone, which is what makes
/// stripping redundant doubled parentheses safe: a strip that would merge
/// two rings never matches.
fn strip_full_parens(part: &str) -> Option<&str> {
    let part = part.trim();
    if !part.starts_with('(') || !part.ends_with(')') {
        return None;
    }

    let mut depth = 0i32;
    for (i, ch) in part.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return if i == part.len() - 1 {
                        Some(&part[1..i])
                    } else {
                        None
                    };
                }
            }
            _ => {}
        }
    }

    None
}

fn expect_parenthesised<'a>(input: &str, part: &'a str) -> Result<&'a str, WktError> {
    strip_full_parens(part).ok_or_else(|| WktError::Syntax {
        offset: offset_in(input, part),
        message: "expected a parenthesised group".into(),
    })
}

fn parse_tuple(input: &str, text: &str) -> Result<Coordinate, WktError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() < 2 || fields.len() > 3 {
        return Err(WktError::Syntax {
            offset: offset_in(input, text),
            message: format!("expected 2 or 3 ordinates, got {}", fields.len()),
        });
    }

    let mut ordinates = [0.0f64; 3];
    for (value, field) in ordinates.iter_mut().zip(&fields) {
        *value = field.parse().map_err(|_| WktError::InvalidNumber {
            offset: offset_in(input, field),
            text: field.to_string(),
        })?;
    }

    Ok(if fields.len() == 3 {
        Coordinate::new_3d(ordinates[0], ordinates[1], ordinates[2])
    } else {
        Coordinate::new(ordinates[0], ordinates[1])
    })
}

fn parse_tuples(input: &str, body: &str) -> Result<Vec<Coordinate>, WktError> {
    split_top_level(input, body)?
        .into_iter()
        .map(|part| parse_tuple(input, part))
        .collect()
}

/// Parses a comma-separated list of rings, each a parenthesised coordinate
/// list. Tolerates one redundant extra layer of parentheses around a ring,
/// which MultiPolygon WKT from shapefile and SQL sources sometimes carries.
fn parse_rings(input: &str, body: &str) -> Result<Vec<LinearRing>, WktError> {
    let mut rings = Vec::new();
    for part in split_top_level(input, body)? {
        let mut ring_body = expect_parenthesised(input, part)?;
        if let Some(stripped) = strip_full_parens(ring_body) {
            ring_body = stripped;
        }
        rings.push(LinearRing::new(parse_tuples(input, ring_body)?));
    }

    Ok(rings)
}

/// Strips one redundant parenthesis layer wrapped around a whole ring list.
///
/// The layer is stripped only when the inner content still starts with a
/// parenthesised ring group, so a plain single-ring body (which is a tuple
/// list) is left alone and sibling rings are never merged.
fn strip_redundant_ring_layer(body: &str) -> &str {
    match strip_full_parens(body) {
        Some(inner) if inner.trim_start().starts_with('(') => inner,
        _ => body,
    }
}

fn parse_polygon_body(input: &str, body: &str) -> Result<Polygon, WktError> {
    let body = strip_redundant_ring_layer(body);
    let mut rings = parse_rings(input, body)?.into_iter();
    let exterior = rings.next().unwrap_or_default();
    Ok(Polygon::new(exterior, rings.collect()))
}

fn parse_multi_point(input: &str, body: &str) -> Result<MultiPoint, WktError> {
    let mut points = Vec::new();
    for part in split_top_level(input, body)? {
        // Both `MULTIPOINT (1 2, 3 4)` and `MULTIPOINT ((1 2), (3 4))` occur
        // in the wild.
        let tuple = match strip_full_parens(part) {
            Some(inner) => inner,
            None => part,
        };
        points.push(Point::new(parse_tuple(input, tuple)?));
    }

    Ok(MultiPoint::new(points))
}

fn parse_multi_line_string(input: &str, body: &str) -> Result<MultiLineString, WktError> {
    let mut lines = Vec::new();
    for part in split_top_level(input, body)? {
        let line_body = expect_parenthesised(input, part)?;
        lines.push(LineString::new(parse_tuples(input, line_body)?));
    }

    Ok(MultiLineString::new(lines))
}

fn parse_multi_polygon(input: &str, body: &str) -> Result<MultiPolygon, WktError> {
    let mut polygons = Vec::new();
    for part in split_top_level(input, body)? {
        let polygon_body = expect_parenthesised(input, part)?;
        polygons.push(parse_polygon_body(input, polygon_body)?);
    }

    Ok(MultiPolygon::new(polygons))
}

fn parse_collection(input: &str, body: &str) -> Result<GeometryCollection, WktError> {
    let mut geometries = Vec::new();
    for part in split_top_level(input, body)? {
        geometries.push(parse_geometry(input, part)?);
    }

    Ok(GeometryCollection::new(geometries))
}

/// Writes a geometry as WKT.
pub fn write(geometry: &Geometry) -> String {
    let mut out = String::new();
    write_geometry(&mut out, geometry);
    out
}

fn write_geometry(out: &mut String, geometry: &Geometry) {
    match geometry {
        Geometry::Point(p) => match p.coordinate() {
            Some(c) => {
                out.push_str("POINT (");
                write_coordinate(out, c);
                out.push(')');
            }
            None => out.push_str("POINT EMPTY"),
        },
        Geometry::LineString(l) => write_line("LINESTRING", out, l.coordinates()),
        Geometry::LinearRing(r) => write_line("LINEARRING", out, r.coordinates()),
        Geometry::Polygon(p) => {
            if p.is_empty() {
                out.push_str("POLYGON EMPTY");
            } else {
                out.push_str("POLYGON ");
                write_polygon_body(out, p);
            }
        }
        Geometry::MultiPoint(mp) => {
            if mp.is_empty() {
                out.push_str("MULTIPOINT EMPTY");
            } else {
                out.push_str("MULTIPOINT (");
                let coordinates = mp.points().iter().filter_map(|p| p.coordinate());
                for (i, c) in coordinates.enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_coordinate(out, c);
                }
                out.push(')');
            }
        }
        Geometry::MultiLineString(ml) => {
            if ml.is_empty() {
                out.push_str("MULTILINESTRING EMPTY");
            } else {
                out.push_str("MULTILINESTRING (");
                let lines = ml.line_strings().iter().filter(|l| !l.is_empty());
                for (i, line) in lines.enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push('(');
                    write_coordinates(out, line.coordinates());
                    out.push(')');
                }
                out.push(')');
            }
        }
        Geometry::MultiPolygon(mp) => {
            if mp.is_empty() {
                out.push_str("MULTIPOLYGON EMPTY");
            } else {
                out.push_str("MULTIPOLYGON (");
                let polygons = mp.polygons().iter().filter(|p| !p.is_empty());
                for (i, polygon) in polygons.enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_polygon_body(out, polygon);
                }
                out.push(')');
            }
        }
        Geometry::GeometryCollection(c) => {
            if c.geometries().is_empty() {
                out.push_str("GEOMETRYCOLLECTION EMPTY");
            } else {
                out.push_str("GEOMETRYCOLLECTION (");
                for (i, g) in c.geometries().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_geometry(out, g);
                }
                out.push(')');
            }
        }
    }
}

fn write_line(keyword: &str, out: &mut String, coordinates: &[Coordinate]) {
    if coordinates.is_empty() {
        out.push_str(keyword);
        out.push_str(" EMPTY");
    } else {
        out.push_str(keyword);
        out.push_str(" (");
        write_coordinates(out, coordinates);
        out.push(')');
    }
}

fn write_polygon_body(out: &mut String, polygon: &Polygon) {
    out.push('(');
    for (i, ring) in polygon.rings().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('(');
        write_coordinates(out, ring.coordinates());
        out.push(')');
    }
    out.push(')');
}

fn write_coordinates(out: &mut String, coordinates: &[Coordinate]) {
    for (i, c) in coordinates.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_coordinate(out, c);
    }
}

fn write_coordinate(out: &mut String, c: &Coordinate) {
    let _ = write!(out, "{:.6} {:.6}", c.x, c.y);
    if let Some(z) = c.z {
        let _ = write!(out, " {z:.6}");
    }
}
