use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::CatalogError;
use crate::models::{Event, EventDraft};

pub mod search;
pub mod seed;

pub use search::{EventFilter, SortBy};

/// Источник данных о событиях: статический набор в памяти.
#[derive(Clone)]
pub struct CatalogService {
    events: Arc<RwLock<Vec<Event>>>,
}

impl CatalogService {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events: Arc::new(RwLock::new(events)) }
    }

    pub fn seeded() -> Self {
        let events = seed::events();
        info!("Loaded {} mock events", events.len());
        Self::new(events)
    }

    pub async fn list(&self) -> Vec<Event> {
        self.events.read().await.clone()
    }

    pub async fn get(&self, id: Uuid) -> Option<Event> {
        self.events.read().await.iter().find(|e| e.id == id).cloned()
    }

    pub async fn create(&self, draft: EventDraft) -> Result<Event, CatalogError> {
        draft.validate()?;

        let event = draft.into_event(Uuid::new_v4(), Uuid::new_v4(), Utc::now());
        self.events.write().await.push(event.clone());
        info!("Created event {} ({})", event.id, event.title);
        Ok(event)
    }

    /// Заменяет редактируемые поля; id, организатор и created_at сохраняются.
    pub async fn update(&self, id: Uuid, draft: EventDraft) -> Result<Event, CatalogError> {
        draft.validate()?;

        let mut events = self.events.write().await;
        let slot = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(CatalogError::EventNotFound(id))?;

        let updated = draft.into_event(slot.id, slot.organizer_id, slot.created_at);
        *slot = updated.clone();
        info!("Updated event {} ({})", updated.id, updated.title);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> EventDraft {
        serde_json::from_value(serde_json::json!({
            "title": title,
            "description": "desc",
            "date": "2024-06-01",
            "start_time": "10:00:00",
            "end_time": "12:00:00",
            "location": "Hall",
            "city": "Boston",
            "organizer": "Org",
            "category": "Community",
            "ticket_types": [{ "name": "Entry", "price": 5.0, "available": 50 }]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn create_then_update_keeps_identity() {
        let catalog = CatalogService::new(vec![]);
        let created = catalog.create(draft("Meetup")).await.unwrap();

        let updated = catalog.update(created.id, draft("Meetup v2")).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.organizer_id, created.organizer_id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(catalog.get(created.id).await.unwrap().title, "Meetup v2");
        assert_eq!(catalog.list().await.len(), 1);
    }

    #[tokio::test]
    async fn invalid_draft_changes_nothing() {
        let catalog = CatalogService::new(vec![]);
        assert!(matches!(catalog.create(draft("")).await, Err(CatalogError::Invalid(_))));
        assert!(catalog.list().await.is_empty());

        let missing = Uuid::new_v4();
        assert!(matches!(
            catalog.update(missing, draft("x")).await,
            Err(CatalogError::EventNotFound(id)) if id == missing
        ));
    }
}
