//! Nearby golf course lookup via the OpenStreetMap Overpass API
//!
//! Queries `leisure=golf_course` features around a point and cleans up the
//! raw results: mislabeled mini-golf and driving-range features are dropped,
//! duplicate entries for the same course are collapsed, and the survivors
//! are sorted by distance from the search origin.

use crate::config::{CoursesConfig, GolfcastConfig};
use crate::error::{GolfcastError, Result};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, info};

/// Overpass server-side query timeout in seconds
const OVERPASS_QUERY_TIMEOUT_SECS: u32 = 25;

/// Two candidates closer than this with the same normalized name are
/// treated as one course (e.g. a way and its relation twin)
const DUPLICATE_PROXIMITY_KM: f64 = 0.5;

/// Tag combinations that disqualify a candidate outright
const EXCLUDED_TAGS: &[(&str, &str)] = &[
    ("leisure", "miniature_golf"),
    ("golf", "driving_range"),
    ("leisure", "driving_range"),
    ("sport", "miniature_golf"),
];

/// Name fragments that identify non-course golf facilities
const EXCLUDED_NAME_PATTERNS: &[&str] = &[
    r"(?i)\bmini[\s-]?golf\b",
    r"(?i)\bminiature\b",
    r"(?i)\bdriving\s+range\b",
    r"(?i)\badventure\s*golf\b",
    r"(?i)\bcrazy\s*golf\b",
    r"(?i)\bputt[\s-]?putt\b",
];

/// A golf course near the searched location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// OpenStreetMap element id
    pub id: u64,
    /// Course name, or a generic placeholder when untagged
    pub name: String,
    /// Latitude of the course centroid
    pub latitude: f64,
    /// Longitude of the course centroid
    pub longitude: f64,
    /// Distance from the search origin in kilometers
    pub distance_km: f64,
    /// Number of holes when tagged
    pub holes: Option<u32>,
}

/// Raw Overpass response envelope
#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

/// A single OSM element; ways and relations carry a `center`, nodes
/// carry `lat`/`lon` directly
#[derive(Debug, Deserialize)]
struct OverpassElement {
    id: u64,
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OverpassCenter>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

impl OverpassElement {
    fn position(&self) -> Option<(f64, f64)> {
        if let Some(center) = &self.center {
            return Some((center.lat, center.lon));
        }
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// Convert to a course candidate, or `None` when the element has no
    /// usable position or carries a disqualifying tag
    fn into_course(self, origin_lat: f64, origin_lon: f64) -> Option<Course> {
        let (latitude, longitude) = self.position()?;

        if has_excluded_tags(&self.tags) {
            return None;
        }

        let name = self
            .tags
            .get("name")
            .cloned()
            .unwrap_or_else(|| "Golf course".to_string());

        let holes = self
            .tags
            .get("golf:holes")
            .or_else(|| self.tags.get("holes"))
            .and_then(|raw| raw.parse().ok());

        Some(Course {
            id: self.id,
            name,
            latitude,
            longitude,
            distance_km: distance_km(origin_lat, origin_lon, latitude, longitude),
            holes,
        })
    }
}

/// Client for the Overpass golf course search
pub struct CourseSearch {
    client: reqwest::Client,
    config: CoursesConfig,
}

impl CourseSearch {
    /// Create a new client from the application configuration
    pub fn new(config: &GolfcastConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(OVERPASS_QUERY_TIMEOUT_SECS) + 5))
            .user_agent(concat!("golfcast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GolfcastError::general(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: config.courses.clone(),
        })
    }

    /// Find golf courses around a point, nearest first
    pub async fn search_nearby(&self, latitude: f64, longitude: f64) -> Result<Vec<Course>> {
        let radius_m = self.config.radius_km * 1000;
        let query = format!(
            "[out:json][timeout:{OVERPASS_QUERY_TIMEOUT_SECS}];\
             (\
               way[\"leisure\"=\"golf_course\"](around:{radius_m},{latitude},{longitude});\
               relation[\"leisure\"=\"golf_course\"](around:{radius_m},{latitude},{longitude});\
               node[\"leisure\"=\"golf_course\"](around:{radius_m},{latitude},{longitude});\
             );\
             out center tags;"
        );

        debug!(
            "Searching courses within {}km of ({:.4}, {:.4})",
            self.config.radius_km, latitude, longitude
        );

        let response = self
            .client
            .post(&self.config.base_url)
            .form(&[("data", query.as_str())])
            .send()
            .await
            .map_err(|e| GolfcastError::api(format!("Overpass request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            return match status.as_u16() {
                429 => Err(GolfcastError::api(
                    "Overpass API rate limit exceeded, try again later",
                )),
                504 => Err(GolfcastError::api("Overpass API timed out")),
                _ => Err(GolfcastError::api(format!(
                    "Overpass API error {status}: {error_text}"
                ))),
            };
        }

        let body: OverpassResponse = response
            .json()
            .await
            .map_err(|e| GolfcastError::api(format!("Failed to parse Overpass response: {e}")))?;

        let courses = collect_courses(body.elements, latitude, longitude, self.config.max_results);
        info!(
            "Found {} golf courses within {}km",
            courses.len(),
            self.config.radius_km
        );
        Ok(courses)
    }
}

/// Filter, sort and cap raw Overpass elements into the course list
fn collect_courses(
    elements: Vec<OverpassElement>,
    latitude: f64,
    longitude: f64,
    max_results: usize,
) -> Vec<Course> {
    let mut courses: Vec<Course> = elements
        .into_iter()
        .filter_map(|element| element.into_course(latitude, longitude))
        .filter(|course| !is_excluded_name(&course.name))
        .collect();

    courses.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    let mut courses = dedup_nearby(courses);
    courses.truncate(max_results);
    for course in &mut courses {
        course.distance_km = (course.distance_km * 10.0).round() / 10.0;
    }
    courses
}

fn has_excluded_tags(tags: &HashMap<String, String>) -> bool {
    EXCLUDED_TAGS
        .iter()
        .any(|(key, value)| tags.get(*key).is_some_and(|tagged| tagged == value))
}

fn is_excluded_name(name: &str) -> bool {
    name_exclude_patterns()
        .iter()
        .any(|pattern| pattern.is_match(name))
}

fn name_exclude_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        EXCLUDED_NAME_PATTERNS
            .iter()
            .filter_map(|pattern| Regex::new(pattern).ok())
            .collect()
    })
}

/// Collapse near-identical entries; input must already be sorted by
/// distance so the nearest copy of a duplicate group survives
fn dedup_nearby(courses: Vec<Course>) -> Vec<Course> {
    let mut kept: Vec<Course> = Vec::with_capacity(courses.len());

    for candidate in courses {
        let duplicate = kept.iter().any(|existing| {
            normalized_name(&existing.name) == normalized_name(&candidate.name)
                && distance_km(
                    existing.latitude,
                    existing.longitude,
                    candidate.latitude,
                    candidate.longitude,
                ) < DUPLICATE_PROXIMITY_KM
        });

        if !duplicate {
            kept.push(candidate);
        }
    }

    kept
}

fn normalized_name(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn distance_km(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> f64 {
    haversine::distance(
        haversine::Location {
            latitude: lat_a,
            longitude: lon_a,
        },
        haversine::Location {
            latitude: lat_b,
            longitude: lon_b,
        },
        haversine::Units::Kilometers,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_element(id: u64, lat: f64, lon: f64, name: &str) -> OverpassElement {
        let mut tags = HashMap::new();
        tags.insert("leisure".to_string(), "golf_course".to_string());
        tags.insert("name".to_string(), name.to_string());
        OverpassElement {
            id,
            lat: Some(lat),
            lon: Some(lon),
            center: None,
            tags,
        }
    }

    #[test]
    fn test_excluded_tags_drop_candidate() {
        let mut element = make_element(1, 52.5, 13.4, "Fun Park");
        element
            .tags
            .insert("leisure".to_string(), "miniature_golf".to_string());

        assert!(element.into_course(52.5, 13.4).is_none());
    }

    #[test]
    fn test_excluded_names() {
        assert!(is_excluded_name("Sunset Mini-Golf"));
        assert!(is_excluded_name("City Driving Range"));
        assert!(is_excluded_name("Pirate Adventure Golf"));
        assert!(is_excluded_name("Putt-Putt Paradise"));
        assert!(!is_excluded_name("Sunset Golf Club"));
        assert!(!is_excluded_name("Royal Birkdale"));
    }

    #[test]
    fn test_position_prefers_center() {
        let mut element = make_element(7, 1.0, 1.0, "Course");
        element.center = Some(OverpassCenter { lat: 48.1, lon: 11.5 });

        assert_eq!(element.position(), Some((48.1, 11.5)));
    }

    #[test]
    fn test_element_without_position_is_skipped() {
        let mut element = make_element(8, 0.0, 0.0, "Course");
        element.lat = None;
        element.lon = None;

        assert!(element.into_course(48.0, 11.0).is_none());
    }

    #[test]
    fn test_courses_sorted_by_distance_and_capped() {
        let elements = vec![
            make_element(1, 52.60, 13.40, "Far Course"),
            make_element(2, 52.51, 13.40, "Near Course"),
            make_element(3, 52.55, 13.40, "Middle Course"),
        ];

        let courses = collect_courses(elements, 52.50, 13.40, 2);

        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].name, "Near Course");
        assert_eq!(courses[1].name, "Middle Course");
        assert!(courses[0].distance_km < courses[1].distance_km);
    }

    #[test]
    fn test_dedup_same_name_nearby() {
        // A way and its relation twin, ~100m apart
        let elements = vec![
            make_element(1, 52.500, 13.400, "Royal Oaks Golf Club"),
            make_element(2, 52.501, 13.400, "Royal Oaks Golf Club"),
        ];

        let courses = collect_courses(elements, 52.5, 13.4, 10);
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].id, 1);
    }

    #[test]
    fn test_same_name_far_apart_both_kept() {
        let elements = vec![
            make_element(1, 52.50, 13.40, "Golf Club"),
            make_element(2, 52.55, 13.40, "Golf Club"),
        ];

        let courses = collect_courses(elements, 52.5, 13.4, 10);
        assert_eq!(courses.len(), 2);
    }

    #[test]
    fn test_normalized_name_collapses_whitespace() {
        assert_eq!(
            normalized_name("  Royal   Oaks\tGolf Club "),
            "royal oaks golf club"
        );
    }

    #[test]
    fn test_holes_parsed_from_tags() {
        let mut element = make_element(4, 52.5, 13.4, "Eighteen Holes");
        element
            .tags
            .insert("golf:holes".to_string(), "18".to_string());

        let course = element.into_course(52.5, 13.4).unwrap();
        assert_eq!(course.holes, Some(18));
    }

    #[test]
    fn test_parse_overpass_response() {
        let json = r#"{
            "version": 0.6,
            "elements": [
                {
                    "type": "way",
                    "id": 101,
                    "center": {"lat": 48.15, "lon": 11.55},
                    "tags": {"leisure": "golf_course", "name": "Isar Valley Golf"}
                },
                {
                    "type": "node",
                    "id": 102,
                    "lat": 48.20,
                    "lon": 11.60,
                    "tags": {"leisure": "golf_course"}
                }
            ]
        }"#;

        let response: OverpassResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.elements.len(), 2);

        let courses = collect_courses(response.elements, 48.15, 11.55, 10);
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].name, "Isar Valley Golf");
        assert_eq!(courses[0].distance_km, 0.0);
        // Untagged node falls back to the generic name
        assert_eq!(courses[1].name, "Golf course");
    }
}
