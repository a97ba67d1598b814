use serde::{Deserialize, Serialize};

/// Правила мерчанта, передаваемые во внешний workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantRules {
    #[serde(default = "default_auto_approve_threshold")]
    pub auto_approve_threshold: f64,
    #[serde(default = "default_enable_ai")]
    pub enable_ai: bool,
}

fn default_auto_approve_threshold() -> f64 {
    500.0
}

fn default_enable_ai() -> bool {
    true
}

impl Default for MerchantRules {
    fn default() -> Self {
        Self {
            auto_approve_threshold: default_auto_approve_threshold(),
            enable_ai: default_enable_ai(),
        }
    }
}

/// Настройки мерчанта (компании)
///
/// Хранятся одним JSON-блоком по company_id, последняя запись побеждает.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MerchantConfig {
    /// URL внешней автоматизации (Boltic), пустая строка - не настроен
    #[serde(default)]
    pub boltic_url: String,
    #[serde(default)]
    pub rules: MerchantRules,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Ответ на сохранение настроек
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveConfigResponse {
    pub success: bool,
    pub message: String,
}
