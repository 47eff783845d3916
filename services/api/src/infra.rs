use compare_offer::config::SessionConfig;
use compare_offer::offers::{OwnerId, SessionError, SessionProvider};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Owner used for offers loaded by the local CLI commands.
pub(crate) const CLI_OWNER: &str = "local-cli";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Identity provider backed by the tokens listed in `APP_SESSION_TOKENS`.
#[derive(Debug, Default, Clone)]
pub(crate) struct StaticSessionProvider {
    tokens: BTreeMap<String, OwnerId>,
}

impl StaticSessionProvider {
    pub(crate) fn from_config(config: &SessionConfig) -> Self {
        Self {
            tokens: config.tokens.clone(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl SessionProvider for StaticSessionProvider {
    fn resolve(&self, token: &str) -> Result<Option<OwnerId>, SessionError> {
        Ok(self.tokens.get(token).cloned())
    }
}
