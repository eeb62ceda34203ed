use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::AppState;

/// Фоновая очистка брошенных сессий выбора.
pub struct CleanupService {
    state: Arc<AppState>,
}

impl CleanupService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Один проход: удаляет сессии, простаивающие дольше таймаута.
    pub async fn run_once(&self) -> usize {
        let max_idle = Duration::from_secs(self.state.config.sessions.idle_ttl_seconds);
        let evicted = self.state.sessions.evict_idle(max_idle).await;

        if evicted > 0 {
            info!("🧹 Evicted {} idle sessions", evicted);
        } else {
            debug!("🧹 No idle sessions to evict");
        }
        evicted
    }

    /// Бесконечный цикл очистки, запускается через `tokio::spawn`.
    pub async fn run(self) {
        let period = Duration::from_secs(self.state.config.sessions.sweep_interval_seconds.max(1));
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            self.run_once().await;
        }
    }
}
