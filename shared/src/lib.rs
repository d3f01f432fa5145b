use serde::{Deserialize, Serialize};

/// Wire-format version reported by the status endpoint.
pub const API_VERSION: u32 = 1;

/// One classification result: a label paired with a confidence score in (0, 1].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Match {
    pub name: String,
    pub score: f32,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct MatchesResponse {
    pub matches: Vec<Match>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Error,
}

/// Snapshot of the success/fail counters.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Processed {
    pub success: u64,
    pub fail: u64,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct StatusBody {
    pub uptime: f64,
    pub processed: Processed,
    pub health: HealthStatus,
    pub api_version: u32,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct StatusEnvelope {
    pub status: StatusBody,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct ErrorBody {
    pub http_status: u16,
    pub message: String,
}

/// Fixed top-level wrapper every error response conforms to.
#[derive(Serialize, Deserialize, Clone)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

impl ErrorEnvelope {
    pub fn new(http_status: u16, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                http_status,
                message: message.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&HealthStatus::Ok).unwrap(), "\"ok\"");
        assert_eq!(
            serde_json::to_string(&HealthStatus::Error).unwrap(),
            "\"error\""
        );
    }

    #[test]
    fn error_envelope_shape() {
        let env = ErrorEnvelope::new(400, "Missing image field");
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["error"]["http_status"], 400);
        assert_eq!(json["error"]["message"], "Missing image field");
    }
}
