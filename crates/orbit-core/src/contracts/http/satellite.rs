use serde::{Deserialize, Serialize};

use super::STATUS_SUCCESS;
use crate::domain::SatellitePosition;

const DEFAULT_SATELLITE_NAME: &str = "ISS";

/// Response of `GET /api/iss-position`.
///
/// Position fields are optional on the wire: failures only carry `status`
/// and `message`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SatellitePositionResponse {
    pub status: String,
    #[serde(default)]
    pub satellite_name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub altitude_km: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    /// Where the backend got the data from (`n2yo_api`, mock, ...).
    #[serde(default)]
    pub data_source: Option<String>,
}

impl SatellitePositionResponse {
    /// Convert into a domain position.
    ///
    /// Returns the server's message (or a description of the missing field)
    /// when the response is not a usable position.
    pub fn into_position(self) -> Result<SatellitePosition, String> {
        if self.status != STATUS_SUCCESS {
            return Err(self
                .message
                .unwrap_or_else(|| "Satellite position unavailable".to_string()));
        }

        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            return Err("Response is missing latitude/longitude".to_string());
        };

        Ok(SatellitePosition {
            satellite_name: self
                .satellite_name
                .unwrap_or_else(|| DEFAULT_SATELLITE_NAME.to_string()),
            latitude,
            longitude,
            altitude_km: self.altitude_km.unwrap_or_default(),
            timestamp: self.timestamp.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_converts_to_position() {
        let response: SatellitePositionResponse = serde_json::from_value(json!({
            "status": "success",
            "satellite_name": "SPACE STATION",
            "latitude": 25.2048,
            "longitude": 55.2708,
            "altitude_km": 408.5,
            "timestamp": 1_700_000_000,
            "data_source": "n2yo_api"
        }))
        .unwrap();

        let position = response.into_position().unwrap();
        assert_eq!(position.satellite_name, "SPACE STATION");
        assert_eq!(position.timestamp, 1_700_000_000);
    }

    #[test]
    fn error_status_returns_message() {
        let response: SatellitePositionResponse = serde_json::from_value(json!({
            "status": "error",
            "message": "No position data available"
        }))
        .unwrap();
        assert_eq!(
            response.into_position().unwrap_err(),
            "No position data available"
        );
    }

    #[test]
    fn missing_coordinates_is_error() {
        let response: SatellitePositionResponse =
            serde_json::from_value(json!({"status": "success"})).unwrap();
        assert!(response.into_position().is_err());
    }

    #[test]
    fn missing_name_defaults_to_iss() {
        let response: SatellitePositionResponse = serde_json::from_value(json!({
            "status": "success",
            "latitude": 1.0,
            "longitude": 2.0
        }))
        .unwrap();
        assert_eq!(response.into_position().unwrap().satellite_name, "ISS");
    }
}
