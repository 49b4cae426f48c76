//! API query and error types.

use serde::{Deserialize, Serialize};

/// Query parameters for `/forecast`.
///
/// `lat` and `lng` go together; without them the configured location is used.
/// `hour` defaults to the server's local hour.
#[derive(Debug, Default, Deserialize)]
pub struct ForecastQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub hour: Option<u32>,
}

/// Error response body for 4xx/5xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_fields_are_optional() {
        let q: ForecastQuery = serde_json::from_str("{}").unwrap();
        assert!(q.lat.is_none() && q.lng.is_none() && q.hour.is_none());

        let q: ForecastQuery = serde_json::from_str(r#"{"lat":51.5,"lng":-0.12,"hour":7}"#).unwrap();
        assert_eq!(q.hour, Some(7));
        assert_eq!(q.lng, Some(-0.12));
    }

    #[test]
    fn error_response_shape() {
        let json = serde_json::to_value(ErrorResponse {
            error: "bad hour".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "error": "bad hour" }));
    }
}
