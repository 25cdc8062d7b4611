//! Well-Known Binary codec.
//!
//! Every (sub-)geometry record starts with a byte-order flag (0x00 big-endian,
//! 0x01 little-endian) followed by a u32 type code: 1-7 for the 2D variants,
//! 1001-1007 for the Z variants. Records are self-describing, so a mixed
//! collection can combine byte orders and dimensions.
//!
//! The round trip is exact: f64 ordinates are stored bit-for-bit. An empty
//! point is encoded as the 2D point (NaN, NaN). The hex entry points use
//! upper-case digits for transport through text-only channels.

use std::fmt::Write as _;

use bytes::{Buf, BufMut};
use tellus_geom::{
    Coordinate, Geometry, GeometryCollection, GeometryKind, LineString, LinearRing,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};

use crate::error::WkbError;

/// Byte order of a WKB record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    /// Most significant byte first, flag 0x00.
    Big,
    /// Least significant byte first, flag 0x01.
    Little,
}

struct Reader<'a> {
    buf: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            buf: bytes,
            position: 0,
        }
    }

    fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    fn require(&self, len: usize) -> Result<(), WkbError> {
        if self.buf.remaining() < len {
            Err(WkbError::UnexpectedEof {
                position: self.position,
            })
        } else {
            Ok(())
        }
    }

    fn read_u8(&mut self) -> Result<u8, WkbError> {
        self.require(1)?;
        self.position += 1;
        Ok(self.buf.get_u8())
    }

    fn read_u32(&mut self, endianness: Endianness) -> Result<u32, WkbError> {
        self.require(4)?;
        self.position += 4;
        Ok(match endianness {
            Endianness::Big => self.buf.get_u32(),
            Endianness::Little => self.buf.get_u32_le(),
        })
    }

    fn read_f64(&mut self, endianness: Endianness) -> Result<f64, WkbError> {
        self.require(8)?;
        self.position += 8;
        Ok(match endianness {
            Endianness::Big => self.buf.get_f64(),
            Endianness::Little => self.buf.get_f64_le(),
        })
    }
}

struct Header {
    endianness: Endianness,
    base: u32,
    has_z: bool,
    code_position: usize,
}

fn read_header(reader: &mut Reader) -> Result<Header, WkbError> {
    let flag_position = reader.position;
    let flag = reader.read_u8()?;
    let endianness = match flag {
        0 => Endianness::Big,
        1 => Endianness::Little,
        _ => {
            return Err(WkbError::InvalidByteOrder {
                flag,
                position: flag_position,
            })
        }
    };

    let code_position = reader.position;
    let code = reader.read_u32(endianness)?;
    let base = code % 1000;
    if !(1..=7).contains(&base) || code / 1000 > 1 {
        return Err(WkbError::InvalidGeometryType {
            code,
            position: code_position,
        });
    }

    Ok(Header {
        endianness,
        base,
        has_z: code >= 1000,
        code_position,
    })
}

/// Reads a count field and rejects it when even `element_size` bytes per
/// element cannot fit in the remaining buffer.
fn read_count(
    reader: &mut Reader,
    endianness: Endianness,
    element_size: usize,
) -> Result<u32, WkbError> {
    let position = reader.position;
    let count = reader.read_u32(endianness)?;
    if (count as usize).saturating_mul(element_size) > reader.remaining() {
        return Err(WkbError::CountOutOfBounds { count, position });
    }

    Ok(count)
}

fn read_coordinate(
    reader: &mut Reader,
    endianness: Endianness,
    has_z: bool,
) -> Result<Coordinate, WkbError> {
    let x = reader.read_f64(endianness)?;
    let y = reader.read_f64(endianness)?;
    Ok(if has_z {
        Coordinate::new_3d(x, y, reader.read_f64(endianness)?)
    } else {
        Coordinate::new(x, y)
    })
}

fn read_coordinates(
    reader: &mut Reader,
    endianness: Endianness,
    has_z: bool,
) -> Result<Vec<Coordinate>, WkbError> {
    let element_size = if has_z { 24 } else { 16 };
    let count = read_count(reader, endianness, element_size)?;
    let mut coordinates = Vec::with_capacity(count as usize);
    for _ in 0..count {
        coordinates.push(read_coordinate(reader, endianness, has_z)?);
    }

    Ok(coordinates)
}

fn read_point(reader: &mut Reader, header: &Header) -> Result<Point, WkbError> {
    let c = read_coordinate(reader, header.endianness, header.has_z)?;
    Ok(if c.x.is_nan() && c.y.is_nan() {
        Point::empty()
    } else {
        Point::new(c)
    })
}

fn read_line_string(reader: &mut Reader, header: &Header) -> Result<LineString, WkbError> {
    Ok(LineString::new(read_coordinates(
        reader,
        header.endianness,
        header.has_z,
    )?))
}

fn read_polygon(reader: &mut Reader, header: &Header) -> Result<Polygon, WkbError> {
    // Rings carry no header of their own, so the polygon's code decides the
    // dimension of every ring.
    let ring_count = read_count(reader, header.endianness, 4)?;
    let mut rings = Vec::with_capacity(ring_count as usize);
    for _ in 0..ring_count {
        rings.push(LinearRing::new(read_coordinates(
            reader,
            header.endianness,
            header.has_z,
        )?));
    }

    let mut rings = rings.into_iter();
    let exterior = rings.next().unwrap_or_default();
    Ok(Polygon::new(exterior, rings.collect()))
}

/// Reads the header of a nested element and checks its base type code.
fn read_element_header(
    reader: &mut Reader,
    expected_base: u32,
    expected: &'static str,
) -> Result<Header, WkbError> {
    let header = read_header(reader)?;
    if header.base != expected_base {
        return Err(WkbError::UnexpectedElementType {
            expected,
            position: header.code_position,
        });
    }

    Ok(header)
}

fn read_geometry(reader: &mut Reader) -> Result<Geometry, WkbError> {
    let header = read_header(reader)?;
    let endianness = header.endianness;

    Ok(match header.base {
        1 => read_point(reader, &header)?.into(),
        2 => read_line_string(reader, &header)?.into(),
        3 => read_polygon(reader, &header)?.into(),
        4 => {
            let count = read_count(reader, endianness, 5)?;
            let mut points = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let element = read_element_header(reader, 1, "Point")?;
                points.push(read_point(reader, &element)?);
            }
            MultiPoint::new(points).into()
        }
        5 => {
            let count = read_count(reader, endianness, 5)?;
            let mut lines = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let element = read_element_header(reader, 2, "LineString")?;
                lines.push(read_line_string(reader, &element)?);
            }
            MultiLineString::new(lines).into()
        }
        6 => {
            let count = read_count(reader, endianness, 5)?;
            let mut polygons = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let element = read_element_header(reader, 3, "Polygon")?;
                polygons.push(read_polygon(reader, &element)?);
            }
            MultiPolygon::new(polygons).into()
        }
        7 => {
            let count = read_count(reader, endianness, 5)?;
            let mut geometries = Vec::with_capacity(count as usize);
            for _ in 0..count {
                geometries.push(read_geometry(reader)?);
            }
            GeometryCollection::new(geometries).into()
        }
        _ => unreachable!("read_header validates the base code"),
    })
}

/// Parses a WKB buffer into a geometry.
pub fn parse(bytes: &[u8]) -> Result<Geometry, WkbError> {
    read_geometry(&mut Reader::new(bytes))
}

/// Parses a WKB buffer, degrading to an empty geometry on failure.
///
/// The error is logged. When the leading record header is still readable the
/// empty instance of that variant is returned, otherwise the empty point.
pub fn parse_or_empty(bytes: &[u8]) -> Geometry {
    match parse(bytes) {
        Ok(geometry) => geometry,
        Err(e) => {
            log::warn!("failed to parse WKB input: {e}");
            match leading_kind(bytes) {
                Some(kind) => Geometry::empty_of(kind),
                None => Point::empty().into(),
            }
        }
    }
}

fn leading_kind(bytes: &[u8]) -> Option<GeometryKind> {
    let header = read_header(&mut Reader::new(bytes)).ok()?;
    Some(match header.base {
        1 => GeometryKind::Point,
        2 => GeometryKind::LineString,
        3 => GeometryKind::Polygon,
        4 => GeometryKind::MultiPoint,
        5 => GeometryKind::MultiLineString,
        6 => GeometryKind::MultiPolygon,
        _ => GeometryKind::GeometryCollection,
    })
}

/// Parses an upper- or lower-case hex string as WKB.
pub fn parse_hex(hex: &str) -> Result<Geometry, WkbError> {
    parse(&from_hex(hex)?)
}

/// Writes a geometry as little-endian WKB.
pub fn write(geometry: &Geometry) -> Vec<u8> {
    write_with(geometry, Endianness::Little)
}

/// Writes a geometry as WKB with the given byte order for every record.
pub fn write_with(geometry: &Geometry, endianness: Endianness) -> Vec<u8> {
    let mut out = Vec::new();
    write_geometry(&mut out, geometry, endianness);
    out
}

/// Writes a geometry as upper-case hexadecimal little-endian WKB.
pub fn write_hex(geometry: &Geometry) -> String {
    to_hex(&write(geometry))
}

fn put_u32(out: &mut Vec<u8>, endianness: Endianness, value: u32) {
    match endianness {
        Endianness::Big => out.put_u32(value),
        Endianness::Little => out.put_u32_le(value),
    }
}

fn put_f64(out: &mut Vec<u8>, endianness: Endianness, value: f64) {
    match endianness {
        Endianness::Big => out.put_f64(value),
        Endianness::Little => out.put_f64_le(value),
    }
}

fn write_header(out: &mut Vec<u8>, endianness: Endianness, base: u32, has_z: bool) {
    out.put_u8(match endianness {
        Endianness::Big => 0,
        Endianness::Little => 1,
    });
    put_u32(out, endianness, if has_z { base + 1000 } else { base });
}

/// Writes one coordinate. In a Z record a coordinate without elevation gets
/// 0.0, the sequence dimension must stay uniform.
fn write_coordinate(out: &mut Vec<u8>, endianness: Endianness, c: &Coordinate, has_z: bool) {
    put_f64(out, endianness, c.x);
    put_f64(out, endianness, c.y);
    if has_z {
        put_f64(out, endianness, c.z.unwrap_or(0.0));
    }
}

fn write_coordinates(
    out: &mut Vec<u8>,
    endianness: Endianness,
    coordinates: &[Coordinate],
    has_z: bool,
) {
    put_u32(out, endianness, coordinates.len() as u32);
    for c in coordinates {
        write_coordinate(out, endianness, c, has_z);
    }
}

fn any_z(coordinates: &[Coordinate]) -> bool {
    coordinates.iter().any(|c| c.has_z())
}

fn polygon_has_z(polygon: &Polygon) -> bool {
    polygon.rings().any(|ring| any_z(ring.coordinates()))
}

fn write_point(out: &mut Vec<u8>, endianness: Endianness, point: &Point) {
    match point.coordinate() {
        Some(c) => {
            write_header(out, endianness, 1, c.has_z());
            write_coordinate(out, endianness, c, c.has_z());
        }
        None => {
            write_header(out, endianness, 1, false);
            put_f64(out, endianness, f64::NAN);
            put_f64(out, endianness, f64::NAN);
        }
    }
}

fn write_line_string(out: &mut Vec<u8>, endianness: Endianness, coordinates: &[Coordinate]) {
    let has_z = any_z(coordinates);
    write_header(out, endianness, 2, has_z);
    write_coordinates(out, endianness, coordinates, has_z);
}

fn write_polygon(out: &mut Vec<u8>, endianness: Endianness, polygon: &Polygon) {
    let has_z = polygon_has_z(polygon);
    write_header(out, endianness, 3, has_z);
    if polygon.is_empty() {
        put_u32(out, endianness, 0);
        return;
    }

    put_u32(out, endianness, 1 + polygon.interiors().len() as u32);
    for ring in polygon.rings() {
        write_coordinates(out, endianness, ring.coordinates(), has_z);
    }
}

fn write_geometry(out: &mut Vec<u8>, geometry: &Geometry, endianness: Endianness) {
    match geometry {
        Geometry::Point(p) => write_point(out, endianness, p),
        Geometry::LineString(l) => write_line_string(out, endianness, l.coordinates()),
        // WKB has no ring type, a standalone ring travels as a line string.
        Geometry::LinearRing(r) => write_line_string(out, endianness, r.coordinates()),
        Geometry::Polygon(p) => write_polygon(out, endianness, p),
        Geometry::MultiPoint(mp) => {
            let has_z = mp
                .points()
                .iter()
                .any(|p| p.coordinate().is_some_and(|c| c.has_z()));
            write_header(out, endianness, 4, has_z);
            put_u32(out, endianness, mp.points().len() as u32);
            for point in mp.points() {
                write_point(out, endianness, point);
            }
        }
        Geometry::MultiLineString(ml) => {
            let has_z = ml.line_strings().iter().any(|l| any_z(l.coordinates()));
            write_header(out, endianness, 5, has_z);
            put_u32(out, endianness, ml.line_strings().len() as u32);
            for line in ml.line_strings() {
                write_line_string(out, endianness, line.coordinates());
            }
        }
        Geometry::MultiPolygon(mp) => {
            let has_z = mp.polygons().iter().any(polygon_has_z);
            write_header(out, endianness, 6, has_z);
            put_u32(out, endianness, mp.polygons().len() as u32);
            for polygon in mp.polygons() {
                write_polygon(out, endianness, polygon);
            }
        }
        Geometry::GeometryCollection(c) => {
            write_header(out, endianness, 7, false);
            put_u32(out, endianness, c.geometries().len() as u32);
            for member in c.geometries() {
                write_geometry(out, member, endianness);
            }
        }
    }
}

fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02X}");
    }
    out
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn from_hex(hex: &str) -> Result<Vec<u8>, WkbError> {
    let hex = hex.trim();
    if hex.len() % 2 != 0 {
        return Err(WkbError::InvalidHex("odd number of digits".into()));
    }

    hex.as_bytes()
        .chunks(2)
        .map(|pair| match (hex_digit(pair[0]), hex_digit(pair[1])) {
            (Some(hi), Some(lo)) => Ok(hi << 4 | lo),
            _ => Err(WkbError::InvalidHex(format!(
                "invalid digit pair {:?}",
                String::from_utf8_lossy(pair)
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn square() -> Polygon {
        Polygon::new(
            LinearRing::new(vec![
                Coordinate::new(0.0, 0.0),
                Coordinate::new(4.0, 0.0),
                Coordinate::new(4.0, 4.0),
                Coordinate::new(0.0, 4.0),
                Coordinate::new(0.0, 0.0),
            ]),
            vec![LinearRing::new(vec![
                Coordinate::new(1.0, 1.0),
                Coordinate::new(2.0, 1.0),
                Coordinate::new(2.0, 2.0),
                Coordinate::new(1.0, 2.0),
                Coordinate::new(1.0, 1.0),
            ])],
        )
    }

    fn sample_geometries() -> Vec<Geometry> {
        vec![
            Point::from_xy(10.0, 20.0).into(),
            Point::from_xyz(1.5, -2.5, 3.25).into(),
            Point::empty().into(),
            LineString::new(vec![
                Coordinate::new(0.1, 0.2),
                Coordinate::new(-3.0, 4.0),
                Coordinate::new(5.0, -6.0),
            ])
            .into(),
            LineString::empty().into(),
            square().into(),
            Polygon::empty().into(),
            MultiPoint::new(vec![Point::from_xy(1.0, 2.0), Point::from_xyz(3.0, 4.0, 5.0)]).into(),
            MultiLineString::new(vec![
                LineString::new(vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)]),
                LineString::new(vec![Coordinate::new(2.0, 2.0), Coordinate::new(3.0, 3.0)]),
            ])
            .into(),
            MultiPolygon::new(vec![square()]).into(),
            GeometryCollection::new(vec![
                Point::from_xy(7.0, 8.0).into(),
                square().into(),
                Point::empty().into(),
            ])
            .into(),
        ]
    }

    #[test]
    fn round_trip_is_exact_in_both_byte_orders() {
        for geometry in sample_geometries() {
            for endianness in [Endianness::Little, Endianness::Big] {
                let bytes = write_with(&geometry, endianness);
                let parsed = parse(&bytes).expect("own output parses");
                assert_eq!(parsed, geometry, "{:?} via {endianness:?}", geometry.kind());
            }
        }
    }

    #[test]
    fn hex_round_trip_preserves_elevation() {
        let line: Geometry = LineString::new(vec![
            Coordinate::new_3d(0.25, 0.5, 100.0),
            Coordinate::new_3d(1.0, 2.0, -50.5),
            Coordinate::new_3d(3.0, 4.0, 0.125),
        ])
        .into();

        let hex = write_hex(&line);
        assert!(hex.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        // Little-endian flag and Z line string code 1002.
        assert!(hex.starts_with("01EA030000"));

        assert_eq!(parse_hex(&hex).expect("hex parses"), line);
        assert_eq!(parse_hex(&hex.to_lowercase()).expect("hex parses"), line);
    }

    #[test]
    fn ring_travels_as_line_string() {
        let ring: Geometry = LinearRing::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(0.0, 0.0),
        ])
        .into();

        let parsed = parse(&write(&ring)).expect("ring parses");
        assert_eq!(parsed.kind(), GeometryKind::LineString);
        let Geometry::LineString(line) = parsed else {
            panic!("expected a line string");
        };
        assert_eq!(line.coordinates().len(), 4);
    }

    #[test]
    fn empty_point_is_nan_nan() {
        let bytes = write(&Point::empty().into());
        assert_eq!(bytes.len(), 21);
        let parsed = parse(&bytes).expect("empty point parses");
        assert_eq!(parsed, Point::empty().into());
    }

    #[test]
    fn truncated_and_corrupt_buffers_are_typed_errors() {
        let bytes = write(&Point::from_xy(1.0, 2.0).into());

        assert_matches!(parse(&[]), Err(WkbError::UnexpectedEof { position: 0 }));
        assert_matches!(
            parse(&bytes[..bytes.len() - 1]),
            Err(WkbError::UnexpectedEof { .. })
        );
        assert_matches!(
            parse(&[0x02]),
            Err(WkbError::InvalidByteOrder {
                flag: 0x02,
                position: 0
            })
        );

        let mut bad_code = bytes.clone();
        bad_code[1] = 99;
        assert_matches!(
            parse(&bad_code),
            Err(WkbError::InvalidGeometryType {
                code: 99,
                position: 1
            })
        );
    }

    #[test]
    fn huge_count_is_rejected_without_allocating() {
        // Little-endian line string claiming u32::MAX coordinates.
        let mut bytes = vec![0x01, 0x02, 0x00, 0x00, 0x00];
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());

        assert_matches!(
            parse(&bytes),
            Err(WkbError::CountOutOfBounds {
                count: u32::MAX,
                position: 5
            })
        );
    }

    #[test]
    fn typed_collection_rejects_foreign_elements() {
        // A MultiPoint whose single element is a line string record.
        let mut bytes = vec![0x01, 0x04, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00];
        bytes.extend(write(&LineString::empty().into()));

        assert_matches!(
            parse(&bytes),
            Err(WkbError::UnexpectedElementType {
                expected: "Point",
                position: 10
            })
        );
    }

    #[test]
    fn parse_or_empty_degrades_to_the_declared_kind() {
        // A truncated polygon record keeps its kind.
        let bytes = write(&square().into());
        assert_eq!(
            parse_or_empty(&bytes[..8]),
            Geometry::empty_of(GeometryKind::Polygon)
        );

        assert_eq!(parse_or_empty(&[]), Point::empty().into());
        assert_eq!(parse_or_empty(&[0xFF, 0x00]), Point::empty().into());
    }

    #[test]
    fn invalid_hex_is_rejected() {
        assert_matches!(parse_hex("01020"), Err(WkbError::InvalidHex(_)));
        assert_matches!(parse_hex("01ZZ"), Err(WkbError::InvalidHex(_)));
        // Signs and whitespace inside a digit pair are not hex digits.
        assert_matches!(
            parse_hex("+101000000000000000000F03F0000000000000040"),
            Err(WkbError::InvalidHex(_))
        );
    }

    #[test]
    fn mixed_dimension_sequence_fills_missing_z() {
        let line: Geometry = LineString::new(vec![
            Coordinate::new_3d(1.0, 2.0, 3.0),
            Coordinate::new(4.0, 5.0),
        ])
        .into();

        let Geometry::LineString(parsed) = parse(&write(&line)).expect("line parses") else {
            panic!("expected a line string");
        };
        assert_eq!(parsed.coordinates()[0].z, Some(3.0));
        assert_eq!(parsed.coordinates()[1].z, Some(0.0));
    }
}
