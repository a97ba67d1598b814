use std::sync::Arc;

use crate::domain::a026_merchant_config::ConfigStore;
use crate::shared::config::Config;
use crate::shared::forwarder::Forwarder;
use crate::shared::workflow::JudgmentSource;
use crate::usecases::u508_simulate_return::SimulateReturnExecutor;

/// Общее состояние обработчиков
///
/// Внешние зависимости передаются явно, тесты подставляют свои реализации.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub judgments: Arc<dyn JudgmentSource>,
    pub config_store: Arc<dyn ConfigStore>,
    pub forwarder: Arc<dyn Forwarder>,
}

impl AppState {
    pub fn new(
        config: Config,
        judgments: Arc<dyn JudgmentSource>,
        config_store: Arc<dyn ConfigStore>,
        forwarder: Arc<dyn Forwarder>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            judgments,
            config_store,
            forwarder,
        }
    }

    pub fn default_forward_url(&self) -> Option<&str> {
        self.config.forwarder.default_url.as_deref()
    }

    pub fn simulate_return_executor(&self) -> SimulateReturnExecutor {
        SimulateReturnExecutor::new(
            self.config_store.clone(),
            self.forwarder.clone(),
            self.config.forwarder.default_url.clone(),
            self.config.forwarder.timeout(),
        )
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use crate::domain::a026_merchant_config::testing::MemoryConfigStore;
    use crate::shared::config::test_config;
    use crate::shared::forwarder::testing::RecordingForwarder;
    use crate::shared::workflow::testing::StubSource;

    /// Состояние с подменными зависимостями; возвращает и forwarder для проверок
    pub fn test_state(
        source: StubSource,
        store: MemoryConfigStore,
        default_url: Option<&str>,
    ) -> (AppState, Arc<RecordingForwarder>) {
        let forwarder = Arc::new(RecordingForwarder::default());
        let mut config = test_config();
        config.forwarder.default_url = default_url.map(str::to_string);
        let state = AppState::new(config, Arc::new(source), Arc::new(store), forwarder.clone());
        (state, forwarder)
    }
}
