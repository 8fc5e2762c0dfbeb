// Map overlay - GeoJSON route and markers for the map view
use crate::domain::location::{DailyLocationGroup, LocationPoint};
use serde::Serialize;

/// Where the map opens when there is nothing to show, as (latitude, longitude)
pub const DEFAULT_CENTER: (f64, f64) = (40.7128, -74.0060);
pub const DEFAULT_ZOOM: f64 = 12.0;
/// Zoom used when flying to a selected location; also the cap when fitting bounds
pub const FOCUS_ZOOM: f64 = 15.0;
/// Screen padding kept around `bounds` when the map fits them
pub const FIT_PADDING_PX: u32 = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapOverlay {
    /// `[longitude, latitude]`
    pub center: [f64; 2],
    pub zoom: f64,
    pub bounds: Option<Bounds>,
    pub fit_padding_px: u32,
    pub fit_max_zoom: f64,
    pub route: Option<Feature>,
    pub points: FeatureCollection,
    pub focused_id: Option<String>,
}

/// South-west and north-east corners, each `[longitude, latitude]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south_west: [f64; 2],
    pub north_east: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub properties: serde_json::Map<String, serde_json::Value>,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point([f64; 2]),
    LineString(Vec<[f64; 2]>),
}

impl MapOverlay {
    /// Flatten day groups in display order and build the overlay
    pub fn from_groups(groups: &[DailyLocationGroup], focus: Option<&LocationPoint>) -> Self {
        let points: Vec<LocationPoint> = groups.iter().flat_map(|g| g.points.iter().cloned()).collect();
        Self::from_points(&points, focus)
    }

    /// The route connects points in the order given. The view centers on
    /// `focus` when set, else the first point, else the default center
    pub fn from_points(points: &[LocationPoint], focus: Option<&LocationPoint>) -> Self {
        let route = (points.len() >= 2).then(|| Feature {
            kind: "Feature",
            properties: serde_json::Map::new(),
            geometry: Geometry::LineString(points.iter().map(lng_lat).collect()),
        });

        let features = points
            .iter()
            .map(|p| {
                let mut properties = serde_json::Map::new();
                properties.insert("id".to_string(), p.id.clone().into());
                properties.insert("timestamp".to_string(), p.timestamp.into());
                if let Some(accuracy) = p.accuracy {
                    properties.insert("accuracy".to_string(), accuracy.into());
                }
                Feature {
                    kind: "Feature",
                    properties,
                    geometry: Geometry::Point(lng_lat(p)),
                }
            })
            .collect();

        let (center, zoom) = match (focus, points.first()) {
            (Some(f), _) => (lng_lat(f), FOCUS_ZOOM),
            (None, Some(first)) => (lng_lat(first), DEFAULT_ZOOM),
            (None, None) => ([DEFAULT_CENTER.1, DEFAULT_CENTER.0], DEFAULT_ZOOM),
        };

        Self {
            center,
            zoom,
            bounds: Bounds::enclosing(points),
            fit_padding_px: FIT_PADDING_PX,
            fit_max_zoom: FOCUS_ZOOM,
            route,
            points: FeatureCollection {
                kind: "FeatureCollection",
                features,
            },
            focused_id: focus.map(|f| f.id.clone()),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Bounds {
    pub fn enclosing(points: &[LocationPoint]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Bounds {
            south_west: lng_lat(first),
            north_east: lng_lat(first),
        };
        for p in &points[1..] {
            bounds.south_west[0] = bounds.south_west[0].min(p.longitude);
            bounds.south_west[1] = bounds.south_west[1].min(p.latitude);
            bounds.north_east[0] = bounds.north_east[0].max(p.longitude);
            bounds.north_east[1] = bounds.north_east[1].max(p.latitude);
        }
        Some(bounds)
    }
}

fn lng_lat(point: &LocationPoint) -> [f64; 2] {
    [point.longitude, point.latitude]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn points() -> Vec<LocationPoint> {
        vec![
            LocationPoint::new("a", 40.70, -74.01, 1_000).with_accuracy(5.0),
            LocationPoint::new("b", 40.72, -73.99, 2_000),
            LocationPoint::new("c", 40.71, -74.02, 3_000),
        ]
    }

    #[test]
    fn test_empty_overlay_uses_default_view() {
        let overlay = MapOverlay::from_points(&[], None);

        assert_eq!(overlay.center, [-74.0060, 40.7128]);
        assert_eq!(overlay.zoom, DEFAULT_ZOOM);
        assert!(overlay.route.is_none());
        assert!(overlay.bounds.is_none());
        assert!(overlay.points.features.is_empty());
    }

    #[test]
    fn test_route_points_and_bounds() {
        let overlay = MapOverlay::from_points(&points(), None);

        assert_eq!(overlay.center, [-74.01, 40.70]);
        assert_eq!(
            overlay.route.as_ref().unwrap().geometry,
            Geometry::LineString(vec![[-74.01, 40.70], [-73.99, 40.72], [-74.02, 40.71]])
        );
        assert_eq!(
            overlay.bounds,
            Some(Bounds {
                south_west: [-74.02, 40.70],
                north_east: [-73.99, 40.72],
            })
        );
        assert_eq!(overlay.points.features.len(), 3);
    }

    #[test]
    fn test_bounds_carry_fit_padding_and_zoom_cap() {
        let overlay = MapOverlay::from_points(&points(), None);
        let value = serde_json::to_value(&overlay).unwrap();

        assert_eq!(overlay.fit_padding_px, 50);
        assert_eq!(overlay.fit_max_zoom, FOCUS_ZOOM);
        assert_eq!(value["fit_padding_px"], json!(50));
        assert_eq!(value["fit_max_zoom"], json!(15.0));
    }

    #[test]
    fn test_focus_recenters_and_zooms() {
        let pts = points();
        let overlay = MapOverlay::from_points(&pts, Some(&pts[1]));

        assert_eq!(overlay.center, [-73.99, 40.72]);
        assert_eq!(overlay.zoom, FOCUS_ZOOM);
        assert_eq!(overlay.focused_id.as_deref(), Some("b"));
    }

    #[test]
    fn test_geojson_shape() {
        let overlay = MapOverlay::from_points(&points()[..1], None);
        let value = serde_json::to_value(&overlay).unwrap();

        assert_eq!(value["route"], serde_json::Value::Null);
        assert_eq!(
            value["points"],
            json!({
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "properties": {"id": "a", "timestamp": 1000, "accuracy": 5.0},
                    "geometry": {"type": "Point", "coordinates": [-74.01, 40.70]}
                }]
            })
        );
    }

    #[test]
    fn test_from_groups_flattens_in_display_order() {
        let pts = points();
        let groups = vec![
            DailyLocationGroup::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(), vec![pts[2].clone()]),
            DailyLocationGroup::new(
                NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
                vec![pts[0].clone(), pts[1].clone()],
            ),
        ];

        let overlay = MapOverlay::from_groups(&groups, None);

        let ids: Vec<_> = overlay
            .points
            .features
            .iter()
            .map(|f| f.properties["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }
}
