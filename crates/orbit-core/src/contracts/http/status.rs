use serde::{Deserialize, Serialize};

use super::STATUS_SUCCESS;

/// Which upstream APIs the backend has credentials for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApisConfigured {
    #[serde(default)]
    pub n2yo: bool,
    #[serde(default)]
    pub gemini: bool,
}

/// Response of `GET /test`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatusResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub apis_configured: ApisConfigured,
}

impl ServiceStatusResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_test_route() {
        let response: ServiceStatusResponse = serde_json::from_value(serde_json::json!({
            "status": "success",
            "message": "Flask app is running!",
            "apis_configured": {"n2yo": false, "gemini": true}
        }))
        .unwrap();

        assert!(response.is_success());
        assert!(response.apis_configured.gemini);
        assert!(!response.apis_configured.n2yo);
    }
}
