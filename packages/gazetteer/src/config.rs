//! Municipality profile: bounding box, search center, and the
//! authoritative division roster.

use serde::{Deserialize, Serialize};

use crate::geo::BoundingBox;
use crate::types::record::Coordinates;

/// Official PSA barangay roster for Basey, Samar (2020 census).
///
/// Consumed by the completeness check; never harvested from the network.
pub const BASEY_BARANGAYS: [&str; 51] = [
    "Amandayehan",
    "Anglit",
    "Bacubac",
    "Balante",
    "Balo-og",
    "Balud",
    "Baybay",
    "Binungtu-an",
    "Bulao",
    "Buenavista",
    "Burgos",
    "Buscada",
    "Cambayan",
    "Can-Abay",
    "Can-Manila",
    "Canca-iyas",
    "Catadman",
    "Cogon",
    "Del Pilar",
    "Dolongan",
    "Guintigui-an",
    "Guirang",
    "Iba",
    "Inuntan",
    "Lawa-an",
    "Lo-og",
    "Loyo",
    "Mabini",
    "Magallanes",
    "Manlilinab",
    "May-it",
    "Mercado",
    "Mongabong",
    "New San Agustin",
    "Old San Agustin",
    "Palaypay",
    "Panugmonon",
    "Pelit",
    "Roxas",
    "Salvacion",
    "San Antonio",
    "San Fernando",
    "Sawa",
    "Serum",
    "Sogponon",
    "Sugca",
    "Sulod",
    "Tinaogan",
    "Tingib",
    "Villa Aurora",
    "Basiao",
];

/// Everything source adapters and validators need to know about the
/// target municipality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MunicipalityConfig {
    /// Municipality name, e.g. "Basey"
    pub municipality: String,

    /// Province name, e.g. "Samar"
    pub province: String,

    /// Rectangular approximation of the municipal boundary.
    /// Coarse on purpose; the boundary polygons are only used for centroids.
    pub bounds: BoundingBox,

    /// Town center, used as the bias point for radius searches
    pub center: Coordinates,

    /// Radius for place searches around the center, in meters
    pub search_radius_m: u32,

    /// Authoritative primary-division names for the completeness check
    pub barangays: Vec<String>,
}

impl MunicipalityConfig {
    /// The built-in Basey, Samar profile.
    pub fn basey() -> Self {
        Self {
            municipality: "Basey".to_string(),
            province: "Samar".to_string(),
            bounds: BoundingBox::new(11.2, 11.6, 124.9, 125.4),
            center: Coordinates::new(11.2792, 125.0650),
            search_radius_m: 15_000,
            barangays: BASEY_BARANGAYS.iter().map(|b| b.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basey_profile() {
        let config = MunicipalityConfig::basey();
        assert_eq!(config.barangays.len(), 51);
        assert!(config.bounds.contains(config.center.lat, config.center.lng));
    }
}
