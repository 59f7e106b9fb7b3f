use serde::{Deserialize, Serialize};

use super::Residual;

/// Location a feed is assigned to. The `id` can be passed back as the
/// `location` query parameter.
///
/// Coordinates pass through unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "pid", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,

    /// e.g. `"Karlsruhe, Germany"`
    #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
    pub title_with_region: Option<String>,

    /// e.g. `"Karlsruhe"`
    #[serde(rename = "n", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,

    #[serde(flatten)]
    pub extra: Residual,
}

impl Location {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.lat?, self.lng?))
    }
}
