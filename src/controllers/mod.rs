pub mod analytics;
pub mod events;
pub mod sessions;

use axum::Router;
use std::sync::Arc;

use crate::config::FeatureFlags;

pub fn routes(features: &FeatureFlags) -> Router<Arc<crate::AppState>> {
    let mut router = Router::new()
        .merge(events::routes(features.enable_event_editing))
        .merge(sessions::routes());

    if features.enable_dashboard {
        router = router.merge(analytics::routes());
    }
    router
}
