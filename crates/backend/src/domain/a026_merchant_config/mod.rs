pub mod repository;
pub mod service;

use async_trait::async_trait;
use contracts::domain::a026_merchant_config::aggregate::MerchantConfig;

/// Хранилище настроек мерчанта (один JSON-блок на company_id)
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn get(&self, company_id: &str) -> anyhow::Result<Option<MerchantConfig>>;

    /// Перезаписать блок целиком, последняя запись побеждает
    async fn set(&self, company_id: &str, config: &MerchantConfig) -> anyhow::Result<()>;
}
