use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use std::sync::Arc;
use uuid::Uuid;

pub const SESSION_HEADER: &str = "x-session-id";

/// Идентификатор сессии выбора из заголовка `X-Session-Id`.
///
/// Экстрактор проверяет только формат; существование сессии проверяет хендлер.
#[derive(Debug, Clone, Copy)]
pub struct SessionKey(pub Uuid);

impl FromRequestParts<Arc<crate::AppState>> for SessionKey {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &Arc<crate::AppState>,
    ) -> Result<Self, Self::Rejection> {
        // Получаем заголовок
        let raw = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or((StatusCode::BAD_REQUEST, "Не передан заголовок X-Session-Id".to_string()))?;

        let id = Uuid::parse_str(raw.trim())
            .map_err(|_| (StatusCode::BAD_REQUEST, "X-Session-Id должен быть UUID".to_string()))?;

        Ok(SessionKey(id))
    }
}
