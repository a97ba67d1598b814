use async_trait::async_trait;
use contracts::domain::a026_merchant_config::aggregate::MerchantConfig;
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, EntityTrait, Statement,
};

use super::ConfigStore;

mod merchant_config {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "a026_merchant_config")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub company_id: String,
        pub config_json: String,
        pub updated_at: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Настройки мерчантов в SQLite
pub struct SqliteConfigStore {
    conn: DatabaseConnection,
}

impl SqliteConfigStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl ConfigStore for SqliteConfigStore {
    async fn get(&self, company_id: &str) -> anyhow::Result<Option<MerchantConfig>> {
        let model = merchant_config::Entity::find_by_id(company_id.to_string())
            .one(&self.conn)
            .await?;

        let Some(model) = model else {
            return Ok(None);
        };

        let mut config: MerchantConfig = serde_json::from_str(&model.config_json)?;
        if config.updated_at.is_none() {
            config.updated_at = Some(model.updated_at);
        }
        Ok(Some(config))
    }

    async fn set(&self, company_id: &str, config: &MerchantConfig) -> anyhow::Result<()> {
        let config_json = serde_json::to_string(config)?;
        let updated_at = config
            .updated_at
            .clone()
            .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());

        let query = r#"
            INSERT INTO a026_merchant_config (company_id, config_json, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(company_id) DO UPDATE SET
                config_json = excluded.config_json,
                updated_at = excluded.updated_at
        "#;

        self.conn
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                query,
                vec![company_id.into(), config_json.into(), updated_at.into()],
            ))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use contracts::domain::a026_merchant_config::aggregate::MerchantRules;

    #[tokio::test]
    async fn test_missing_company_is_none() {
        let store = SqliteConfigStore::new(connect_in_memory().await.unwrap());
        assert!(store.get("42").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_last_write_wins() {
        let store = SqliteConfigStore::new(connect_in_memory().await.unwrap());

        let first = MerchantConfig {
            boltic_url: "https://automation.test/first".to_string(),
            rules: MerchantRules::default(),
            updated_at: Some("2026-01-01T00:00:00+00:00".to_string()),
        };
        store.set("1", &first).await.unwrap();

        let second = MerchantConfig {
            boltic_url: "https://automation.test/second".to_string(),
            rules: MerchantRules {
                auto_approve_threshold: 1200.0,
                enable_ai: false,
            },
            updated_at: Some("2026-01-02T00:00:00+00:00".to_string()),
        };
        store.set("1", &second).await.unwrap();

        assert_eq!(store.get("1").await.unwrap(), Some(second));
        assert!(store.get("2").await.unwrap().is_none());
    }
}
