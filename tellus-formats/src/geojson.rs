//! GeoJSON (RFC 7946) codec.
//!
//! Reading walks the generic JSON tree (`serde_json::Value`) and dispatches
//! on the `type` member, accepting `Geometry`, `Feature` and
//! `FeatureCollection` documents; the latter two are flattened to the
//! feature geometries. Walking the tree keeps failures local: a malformed
//! member of a collection is skipped with a warning instead of aborting the
//! whole document. Writing builds the `geojson` crate's document tree and
//! produces a `Geometry` document, or a `Feature`/`FeatureCollection` when
//! attributes are supplied through [`AttributeSource`].
//!
//! GeoJSON has no spelling for an empty point, so writing one is an error.
//! Linear rings are written as line strings.

use std::collections::HashMap;

use geojson::{GeoJson, JsonObject, JsonValue};
use tellus_geom::{
    Coordinate, Geometry, GeometryCollection, LineString, LinearRing, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};

use crate::error::GeoJsonError;

/// An attribute table consumed by the feature writers.
///
/// The writer asks for the attribute names and looks each one up to build
/// the feature's `properties` object.
pub trait AttributeSource {
    /// Names of the attributes this source carries.
    fn names(&self) -> Vec<String>;

    /// The value of the named attribute, `None` when absent.
    fn get(&self, name: &str) -> Option<JsonValue>;
}

impl AttributeSource for JsonObject {
    fn names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }

    fn get(&self, name: &str) -> Option<JsonValue> {
        JsonObject::get(self, name).cloned()
    }
}

impl AttributeSource for HashMap<String, JsonValue> {
    fn names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }

    fn get(&self, name: &str) -> Option<JsonValue> {
        HashMap::get(self, name).cloned()
    }
}

fn properties(source: &impl AttributeSource) -> JsonObject {
    source
        .names()
        .into_iter()
        .filter_map(|name| {
            let value = source.get(&name)?;
            Some((name, value))
        })
        .collect()
}

/// Parses a GeoJSON document into a geometry.
///
/// A `Feature` yields its geometry. A `FeatureCollection` yields a
/// [`GeometryCollection`] of the feature geometries. Malformed or missing
/// geometries inside a `FeatureCollection` or `GeometryCollection` are
/// skipped with a warning; everywhere else they are an error.
pub fn parse(input: &str) -> Result<Geometry, GeoJsonError> {
    let document: JsonValue =
        serde_json::from_str(input).map_err(|e| GeoJsonError::Document(e.to_string()))?;
    parse_document(&document)
}

/// Parses a GeoJSON document, degrading to the empty point on failure.
pub fn parse_or_empty(input: &str) -> Geometry {
    match parse(input) {
        Ok(geometry) => geometry,
        Err(e) => {
            log::warn!("failed to parse GeoJSON input: {e}");
            Point::empty().into()
        }
    }
}

fn object_type(value: &JsonValue) -> Result<&str, GeoJsonError> {
    value
        .get("type")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| GeoJsonError::Document("object has no \"type\" member".into()))
}

fn parse_document(document: &JsonValue) -> Result<Geometry, GeoJsonError> {
    match object_type(document)? {
        "Feature" => match document.get("geometry") {
            Some(geometry) if !geometry.is_null() => parse_geometry_object(geometry),
            _ => Err(GeoJsonError::MissingGeometry),
        },
        "FeatureCollection" => {
            let features = document
                .get("features")
                .and_then(JsonValue::as_array)
                .ok_or_else(|| {
                    GeoJsonError::Document("FeatureCollection has no \"features\" array".into())
                })?;

            let mut members = Vec::new();
            for feature in features {
                match feature.get("geometry") {
                    Some(geometry) if !geometry.is_null() => match parse_geometry_object(geometry)
                    {
                        Ok(geometry) => members.push(geometry),
                        Err(e) => log::warn!("skipping an unreadable feature geometry: {e}"),
                    },
                    _ => log::warn!("skipping a feature without geometry"),
                }
            }

            Ok(GeometryCollection::new(members).into())
        }
        _ => parse_geometry_object(document),
    }
}

fn parse_geometry_object(value: &JsonValue) -> Result<Geometry, GeoJsonError> {
    let type_name = object_type(value)?;

    if type_name == "GeometryCollection" {
        let members = value
            .get("geometries")
            .and_then(JsonValue::as_array)
            .ok_or_else(|| {
                GeoJsonError::Document("GeometryCollection has no \"geometries\" array".into())
            })?;

        let mut geometries = Vec::new();
        for member in members {
            match parse_geometry_object(member) {
                Ok(geometry) => geometries.push(geometry),
                Err(e) => log::warn!("skipping an unreadable collection member: {e}"),
            }
        }

        return Ok(GeometryCollection::new(geometries).into());
    }

    let coordinates = value.get("coordinates").ok_or_else(|| {
        GeoJsonError::Document(format!("{type_name} has no \"coordinates\" member"))
    })?;

    Ok(match type_name {
        "Point" => Point::new(parse_position(coordinates)?).into(),
        "MultiPoint" => MultiPoint::new(
            parse_positions(coordinates)?
                .into_iter()
                .map(Point::new)
                .collect(),
        )
        .into(),
        "LineString" => LineString::new(parse_positions(coordinates)?).into(),
        "MultiLineString" => MultiLineString::new(
            parse_array(coordinates, parse_positions)?
                .into_iter()
                .map(LineString::new)
                .collect(),
        )
        .into(),
        "Polygon" => parse_polygon(coordinates)?.into(),
        "MultiPolygon" => MultiPolygon::new(parse_array(coordinates, parse_polygon)?).into(),
        other => {
            return Err(GeoJsonError::Document(format!(
                "unknown geometry type {other:?}"
            )))
        }
    })
}

fn parse_array<T>(
    value: &JsonValue,
    element: impl Fn(&JsonValue) -> Result<T, GeoJsonError>,
) -> Result<Vec<T>, GeoJsonError> {
    value
        .as_array()
        .ok_or_else(|| GeoJsonError::Document("expected a coordinate array".into()))?
        .iter()
        .map(element)
        .collect()
}

fn parse_position(value: &JsonValue) -> Result<Coordinate, GeoJsonError> {
    let fields = value
        .as_array()
        .ok_or_else(|| GeoJsonError::Document("a position must be an array".into()))?;
    let ordinates = fields
        .iter()
        .map(|field| {
            field
                .as_f64()
                .ok_or_else(|| GeoJsonError::Document("a position ordinate must be a number".into()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match ordinates.len() {
        0 | 1 => Err(GeoJsonError::InvalidPosition(ordinates.len())),
        2 => Ok(Coordinate::new(ordinates[0], ordinates[1])),
        // Ordinates beyond the third are ignored, as RFC 7946 recommends.
        _ => Ok(Coordinate::new_3d(ordinates[0], ordinates[1], ordinates[2])),
    }
}

fn parse_positions(value: &JsonValue) -> Result<Vec<Coordinate>, GeoJsonError> {
    parse_array(value, parse_position)
}

fn parse_polygon(value: &JsonValue) -> Result<Polygon, GeoJsonError> {
    let mut rings = parse_array(value, parse_positions)?
        .into_iter()
        .map(LinearRing::new);

    let exterior = rings.next().unwrap_or_default();
    Ok(Polygon::new(exterior, rings.collect()))
}

/// Writes a geometry as a GeoJSON `Geometry` document.
pub fn write(geometry: &Geometry) -> Result<String, GeoJsonError> {
    Ok(GeoJson::Geometry(geojson::Geometry::new(to_value(geometry)?)).to_string())
}

/// Writes a geometry with attributes as a GeoJSON `Feature` document.
pub fn write_feature(
    geometry: &Geometry,
    attributes: &impl AttributeSource,
) -> Result<String, GeoJsonError> {
    Ok(GeoJson::Feature(feature(geometry, attributes)?).to_string())
}

/// Writes geometries with attributes as a GeoJSON `FeatureCollection`.
pub fn write_feature_collection<'a, I, A>(features: I) -> Result<String, GeoJsonError>
where
    I: IntoIterator<Item = (&'a Geometry, &'a A)>,
    A: AttributeSource + 'a,
{
    let features = features
        .into_iter()
        .map(|(geometry, attributes)| feature(geometry, attributes))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GeoJson::FeatureCollection(geojson::FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
    .to_string())
}

fn feature(
    geometry: &Geometry,
    attributes: &impl AttributeSource,
) -> Result<geojson::Feature, GeoJsonError> {
    Ok(geojson::Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(to_value(geometry)?)),
        id: None,
        properties: Some(properties(attributes)),
        foreign_members: None,
    })
}

fn position(c: &Coordinate) -> Vec<f64> {
    match c.z {
        Some(z) => vec![c.x, c.y, z],
        None => vec![c.x, c.y],
    }
}

fn positions(coordinates: &[Coordinate]) -> Vec<Vec<f64>> {
    coordinates.iter().map(position).collect()
}

fn polygon_rings(polygon: &Polygon) -> Vec<Vec<Vec<f64>>> {
    if polygon.is_empty() {
        Vec::new()
    } else {
        polygon
            .rings()
            .map(|ring| positions(ring.coordinates()))
            .collect()
    }
}

fn to_value(geometry: &Geometry) -> Result<geojson::Value, GeoJsonError> {
    Ok(match geometry {
        Geometry::Point(p) => {
            let c = p.coordinate().ok_or(GeoJsonError::EmptyPoint)?;
            geojson::Value::Point(position(c))
        }
        Geometry::LineString(l) => geojson::Value::LineString(positions(l.coordinates())),
        Geometry::LinearRing(r) => geojson::Value::LineString(positions(r.coordinates())),
        Geometry::Polygon(p) => geojson::Value::Polygon(polygon_rings(p)),
        Geometry::MultiPoint(mp) => geojson::Value::MultiPoint(
            mp.points()
                .iter()
                .filter_map(|p| p.coordinate())
                .map(position)
                .collect(),
        ),
        Geometry::MultiLineString(ml) => geojson::Value::MultiLineString(
            ml.line_strings()
                .iter()
                .map(|l| positions(l.coordinates()))
                .collect(),
        ),
        Geometry::MultiPolygon(mp) => geojson::Value::MultiPolygon(
            mp.polygons().iter().map(polygon_rings).collect(),
        ),
        Geometry::GeometryCollection(c) => geojson::Value::GeometryCollection(
            c.geometries()
                .iter()
                .map(|g| Ok(geojson::Geometry::new(to_value(g)?)))
                .collect::<Result<_, GeoJsonError>>()?,
        ),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;
    use tellus_geom::GeometryKind;

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
            vec![],
        )
    }

    fn square_with_hole() -> Polygon {
        Polygon::new(
            square().exterior().clone(),
            vec![LinearRing::new(vec![
                Coordinate::new(1.0, 1.0),
                Coordinate::new(2.0, 1.0),
                Coordinate::new(2.0, 2.0),
                Coordinate::new(1.0, 2.0),
                Coordinate::new(1.0, 1.0),
            ])],
        )
    }

    #[test]
    fn parse_point_document() {
        let geometry =
            parse(r#"{"type":"Point","coordinates":[10.0,20.0]}"#).expect("valid point");
        assert_eq!(geometry, Point::from_xy(10.0, 20.0).into());

        let geometry =
            parse(r#"{"type":"Point","coordinates":[1.0,2.0,3.0]}"#).expect("valid 3D point");
        assert_eq!(geometry, Point::from_xyz(1.0, 2.0, 3.0).into());
    }

    #[test]
    fn parse_feature_and_collection() {
        let feature = r#"{
            "type": "Feature",
            "properties": {"name": "origin"},
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}
        }"#;
        assert_eq!(parse(feature).expect("valid feature"), Point::from_xy(0.0, 0.0).into());

        let collection = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": null,
                 "geometry": {"type": "Point", "coordinates": [1.0, 1.0]}},
                {"type": "Feature", "properties": null,
                 "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [2.0, 2.0]]}}
            ]
        }"#;
        let Geometry::GeometryCollection(parsed) =
            parse(collection).expect("valid feature collection")
        else {
            panic!("expected a collection");
        };
        assert_eq!(parsed.geometries().len(), 2);
        assert_eq!(parsed.geometries()[1].kind(), GeometryKind::LineString);
    }

    #[test]
    fn feature_without_geometry_is_an_error() {
        let input = r#"{"type":"Feature","properties":{},"geometry":null}"#;
        assert_matches!(parse(input), Err(GeoJsonError::MissingGeometry));
    }

    #[test]
    fn short_position_is_an_error() {
        let input = r#"{"type":"LineString","coordinates":[[0.0,0.0],[1.0]]}"#;
        assert_matches!(parse(input), Err(GeoJsonError::InvalidPosition(1)));

        let not_a_number = r#"{"type":"Point","coordinates":[0.0,"north"]}"#;
        assert_matches!(parse(not_a_number), Err(GeoJsonError::Document(_)));
    }

    #[test]
    fn structural_round_trip() {
        let geometries: Vec<Geometry> = vec![
            Point::from_xyz(1.0, 2.0, 3.0).into(),
            LineString::new(vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.5, -2.5)]).into(),
            square().into(),
            square_with_hole().into(),
            MultiPoint::new(vec![Point::from_xy(1.0, 2.0), Point::from_xy(3.0, 4.0)]).into(),
            MultiLineString::new(vec![
                LineString::new(vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)]),
                LineString::new(vec![Coordinate::new(2.0, 2.0), Coordinate::new(3.0, 3.0)]),
            ])
            .into(),
            MultiPolygon::new(vec![square(), square_with_hole()]).into(),
            GeometryCollection::new(vec![Point::from_xy(9.0, 9.0).into(), square().into()])
                .into(),
        ];

        for geometry in geometries {
            let text = write(&geometry).expect("writable geometry");
            let parsed = parse(&text).expect("own output parses");
            assert_eq!(parsed, geometry, "{:?}", geometry.kind());
        }
    }

    #[test]
    fn empty_point_cannot_be_written() {
        assert_matches!(
            write(&Point::empty().into()),
            Err(GeoJsonError::EmptyPoint)
        );
        // Inside a multi point, empty members are dropped instead.
        let mp: Geometry = MultiPoint::new(vec![Point::from_xy(1.0, 2.0), Point::empty()]).into();
        let text = write(&mp).expect("writable multi point");
        assert_eq!(parse(&text).expect("parses"), MultiPoint::new(vec![Point::from_xy(1.0, 2.0)]).into());
    }

    #[test]
    fn ring_is_written_as_line_string() {
        let ring: Geometry = LinearRing::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(0.0, 0.0),
        ])
        .into();

        let parsed = parse(&write(&ring).expect("writable ring")).expect("parses");
        assert_eq!(parsed.kind(), GeometryKind::LineString);
    }

    #[test]
    fn unreadable_collection_members_are_skipped() {
        let input = r#"{
            "type": "GeometryCollection",
            "geometries": [
                {"type": "Point", "coordinates": [1.0, 2.0]},
                {"type": "Point", "coordinates": [3.0]},
                {"type": "Bezier", "coordinates": [[0.0, 0.0]]}
            ]
        }"#;

        let Geometry::GeometryCollection(parsed) = parse(input).expect("lenient collection")
        else {
            panic!("expected a collection");
        };
        assert_eq!(parsed.geometries().len(), 1);
        assert_eq!(parsed.geometries()[0], Point::from_xy(1.0, 2.0).into());
    }

    #[test]
    fn unreadable_feature_geometries_are_skipped() {
        let input = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": null,
                 "geometry": {"type": "Point", "coordinates": [1.0, 1.0]}},
                {"type": "Feature", "properties": null,
                 "geometry": {"type": "Point", "coordinates": [2.0]}},
                {"type": "Feature", "properties": null, "geometry": null}
            ]
        }"#;

        let Geometry::GeometryCollection(parsed) = parse(input).expect("lenient collection")
        else {
            panic!("expected a collection");
        };
        assert_eq!(parsed.geometries().len(), 1);
        assert_eq!(parsed.geometries()[0], Point::from_xy(1.0, 1.0).into());
    }

    #[test]
    fn feature_writer_attaches_properties() {
        let mut attributes = JsonObject::new();
        attributes.insert("name".into(), json!("summit"));
        attributes.insert("elevation_m".into(), json!(4810));

        let text = write_feature(&Point::from_xy(6.86, 45.83).into(), &attributes)
            .expect("writable feature");
        let document: serde_json::Value = serde_json::from_str(&text).expect("valid JSON");

        assert_eq!(document["type"], "Feature");
        assert_eq!(document["properties"]["name"], "summit");
        assert_eq!(document["geometry"]["type"], "Point");

        assert_eq!(parse(&text).expect("parses"), Point::from_xy(6.86, 45.83).into());
    }

    #[test]
    fn feature_collection_writer() {
        let a: Geometry = Point::from_xy(0.0, 0.0).into();
        let b: Geometry = square().into();
        let empty = JsonObject::new();

        let text = write_feature_collection([(&a, &empty), (&b, &empty)])
            .expect("writable collection");
        let document: serde_json::Value = serde_json::from_str(&text).expect("valid JSON");

        assert_eq!(document["type"], "FeatureCollection");
        assert_eq!(document["features"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn parse_or_empty_degrades_silently() {
        assert_eq!(parse_or_empty("not json"), Point::empty().into());
        assert_eq!(parse_or_empty("{}"), Point::empty().into());
    }
}
