use serde::Deserialize;
use std::cmp::Ordering;

use crate::catalog::CatalogService;
use crate::models::Event;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Date,
    Price,
    Popularity,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFilter {
    pub query: Option<String>,
    pub category: Option<String>,
    pub featured: Option<bool>,
    #[serde(default)]
    pub sort: SortBy,
    /// Обрезает список после сортировки; главная страница берет `sort=date&limit=3`.
    pub limit: Option<usize>,
}

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        let text_ok = match self.query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(q) => {
                let q = q.to_lowercase();
                event.title.to_lowercase().contains(&q) || event.description.to_lowercase().contains(&q)
            }
        };
        let category_ok = match self.category.as_deref() {
            None | Some("") | Some("all") => true,
            Some(c) => event.category == c,
        };
        let featured_ok = self.featured.map_or(true, |f| event.featured == f);
        text_ok && category_ok && featured_ok
    }

    pub fn apply(&self, events: Vec<Event>) -> Vec<Event> {
        let mut found: Vec<Event> = events.into_iter().filter(|e| self.matches(e)).collect();
        // sort_by стабильный: при равенстве сохраняется порядок каталога
        match self.sort {
            SortBy::Date => found.sort_by_key(|e| (e.date, e.start_time)),
            SortBy::Price => found.sort_by(|a, b| compare_min_price(a, b)),
            SortBy::Popularity => found.sort_by(|a, b| {
                b.sold_percentage()
                    .partial_cmp(&a.sold_percentage())
                    .unwrap_or(Ordering::Equal)
            }),
        }
        if let Some(limit) = self.limit {
            found.truncate(limit);
        }
        found
    }
}

// события без билетов уходят в конец
fn compare_min_price(a: &Event, b: &Event) -> Ordering {
    match (a.min_price(), b.min_price()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl CatalogService {
    pub async fn search(&self, filter: &EventFilter) -> Vec<Event> {
        filter.apply(self.list().await)
    }

    /// Похожие события: та же категория, максимум `limit`.
    pub async fn related(&self, event: &Event, limit: usize) -> Vec<Event> {
        self.list()
            .await
            .into_iter()
            .filter(|e| e.category == event.category && e.id != event.id)
            .take(limit)
            .collect()
    }
}
