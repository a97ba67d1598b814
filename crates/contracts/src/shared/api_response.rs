use serde::{Deserialize, Serialize};

/// Ответ об ошибке `{ success: false, error }`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Ответ на входящий webhook платформы
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WebhookAck {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}
