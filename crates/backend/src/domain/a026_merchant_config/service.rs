use contracts::domain::a026_merchant_config::aggregate::MerchantConfig;

use super::ConfigStore;

/// Маркер незаполненного шаблонного URL из документации workflow
const PLACEHOLDER_MARKER: &str = "YOUR_WORKFLOW_ID";

/// Настройки компании; отсутствующие - значения по умолчанию
pub async fn get_config(store: &dyn ConfigStore, company_id: &str) -> anyhow::Result<MerchantConfig> {
    Ok(store.get(company_id).await?.unwrap_or_default())
}

/// Сохранить настройки целиком, проставив updated_at
pub async fn save_config(
    store: &dyn ConfigStore,
    company_id: &str,
    mut config: MerchantConfig,
) -> anyhow::Result<MerchantConfig> {
    config.updated_at = Some(chrono::Utc::now().to_rfc3339());
    store.set(company_id, &config).await?;
    tracing::info!("Saved merchant config for company {}", company_id);
    Ok(config)
}

fn usable_url(url: &str) -> Option<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() || trimmed.contains(PLACEHOLDER_MARKER) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// URL для пересылки: собственный URL мерчанта, иначе общий из конфигурации
///
/// Пустой или шаблонный URL считается отсутствующим.
pub fn resolve_forward_url(config: &MerchantConfig, default_url: Option<&str>) -> Option<String> {
    usable_url(&config.boltic_url).or_else(|| default_url.and_then(usable_url))
}
