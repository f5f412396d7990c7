//! Real Istanbul locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap. Labels hold the district.

#![allow(dead_code)]

use route_order::traits::{Point, Waypoint};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub id: String,
    pub name: &'static str,
    pub district: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(id: &str, name: &'static str, district: &'static str, lat: f64, lng: f64) -> Self {
        Self {
            id: id.to_string(),
            name,
            district,
            lat,
            lng,
        }
    }

    pub fn coords(&self) -> Point {
        (self.lat, self.lng)
    }
}

impl Waypoint for Location {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn label(&self) -> Option<&str> {
        if self.district.is_empty() {
            None
        } else {
            Some(self.district)
        }
    }

    fn location(&self) -> Point {
        (self.lat, self.lng)
    }
}

const SITES: &[(&str, &str, f64, f64)] = &[
    // Historic peninsula
    ("Hagia Sophia", "Fatih", 41.0086, 28.9802),
    ("Topkapi Palace", "Fatih", 41.0115, 28.9833),
    ("Grand Bazaar", "Fatih", 41.0107, 28.9681),
    ("Suleymaniye Mosque", "Fatih", 41.0162, 28.9639),
    ("Spice Bazaar", "Fatih", 41.0166, 28.9706),
    ("Sirkeci Station", "Fatih", 41.0150, 28.9770),
    ("Aksaray", "Fatih", 41.0097, 28.9536),
    ("Yenikapi", "Fatih", 41.0036, 28.9512),
    // Beyoglu / Besiktas
    ("Galata Tower", "Beyoglu", 41.0256, 28.9741),
    ("Taksim Square", "Beyoglu", 41.0370, 28.9850),
    ("Karakoy Pier", "Beyoglu", 41.0222, 28.9770),
    ("Kasimpasa", "Beyoglu", 41.0380, 28.9680),
    ("Dolmabahce Palace", "Besiktas", 41.0391, 29.0004),
    ("Besiktas Pier", "Besiktas", 41.0424, 29.0073),
    ("Ortakoy Mosque", "Besiktas", 41.0473, 29.0270),
    ("Levent", "Besiktas", 41.0819, 29.0110),
    ("Bebek", "Besiktas", 41.0770, 29.0430),
    // Sisli / Kagithane
    ("Mecidiyekoy", "Sisli", 41.0670, 28.9950),
    ("Nisantasi", "Sisli", 41.0510, 28.9940),
    ("Kagithane Square", "Kagithane", 41.0810, 28.9720),
    // Asian side
    ("Kadikoy Pier", "Kadikoy", 40.9920, 29.0230),
    ("Moda", "Kadikoy", 40.9830, 29.0260),
    ("Fenerbahce", "Kadikoy", 40.9700, 29.0380),
    ("Uskudar Square", "Uskudar", 41.0260, 29.0150),
    ("Maiden's Tower", "Uskudar", 41.0211, 29.0041),
    ("Camlica Hill", "Uskudar", 41.0270, 29.0690),
    ("Altunizade", "Uskudar", 41.0220, 29.0440),
    ("Atasehir", "Atasehir", 40.9920, 29.1050),
    ("Bostanci", "Kadikoy", 40.9520, 29.0960),
    ("Maltepe Coast", "Maltepe", 40.9240, 29.1310),
    // West
    ("Bakirkoy Square", "Bakirkoy", 40.9800, 28.8720),
    ("Atakoy Marina", "Bakirkoy", 40.9730, 28.8730),
    ("Zeytinburnu", "Zeytinburnu", 40.9940, 28.9040),
    ("Eyup Sultan Mosque", "Eyupsultan", 41.0480, 28.9340),
    ("Balat", "Fatih", 41.0290, 28.9490),
    ("Esenler Bus Terminal", "Bayrampasa", 41.0390, 28.8950),
];

/// Returns all locations with ids `loc-0`, `loc-1`, ...
pub fn all_locations() -> Vec<Location> {
    SITES
        .iter()
        .enumerate()
        .map(|(i, (name, district, lat, lng))| {
            Location::new(&format!("loc-{}", i), *name, *district, *lat, *lng)
        })
        .collect()
}

/// Returns a subset of locations for smaller tests.
pub fn sample_locations(count: usize) -> Vec<Location> {
    all_locations().into_iter().take(count).collect()
}

/// Coordinates of a selection, in selection order.
pub fn coords_of(locations: &[Location]) -> Vec<Point> {
    locations.iter().map(Location::coords).collect()
}

/// A location with an arbitrary position and no district.
pub fn custom(id: &str, lat: f64, lng: f64) -> Location {
    Location::new(id, "Custom", "", lat, lng)
}
