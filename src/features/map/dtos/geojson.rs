//! GeoJSON (RFC 7946) for the map layers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::map::models::AddressFeatureRow;
use crate::shared::urls::Urls;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeatureCollection {
    /// Always "FeatureCollection"
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Feature {
    /// Always "Feature"
    #[serde(rename = "type")]
    pub kind: String,
    /// Address id
    pub id: i64,
    pub geometry: PointGeometry,
    pub properties: FeatureProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PointGeometry {
    /// Always "Point"
    #[serde(rename = "type")]
    pub kind: String,
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeatureProperties {
    /// Evaluation level code of the report
    pub evaluation: Option<String>,
    pub published: bool,
    #[serde(rename = "popupUrl")]
    pub popup_url: String,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: "FeatureCollection".to_string(),
            features,
        }
    }
}

impl Feature {
    pub fn from_row(row: AddressFeatureRow, urls: &Urls) -> Self {
        Self {
            kind: "Feature".to_string(),
            id: row.id,
            geometry: PointGeometry {
                kind: "Point".to_string(),
                coordinates: [row.lon, row.lat],
            },
            properties: FeatureProperties {
                evaluation: row.evaluation,
                published: row.published,
                popup_url: urls.popup(row.id),
            },
        }
    }
}
