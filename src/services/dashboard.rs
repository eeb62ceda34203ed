//! dashboard.rs
//!
//! Сводка для дашборда организатора. Только статическая агрегация:
//! - итоги по событиям и продажи за неделю из мок-рядов;
//! - выручка текущего месяца и рост относительно предыдущего;
//! - строки по событиям с процентом продаж и статусом;
//! - таблица управления событиями с поиском и сортировкой.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

use crate::catalog::seed::{MONTHLY_REVENUE, TICKET_CATEGORY_DISTRIBUTION, WEEKLY_TICKET_SALES};
use crate::models::{Event, SalesStatus};

#[derive(Debug, Clone, Serialize)]
pub struct SeriesPoint {
    pub label: &'static str,
    pub value: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventSalesRow {
    pub id: Uuid,
    pub title: String,
    pub date: chrono::NaiveDate,
    pub location: String,
    pub category: String,
    pub sold_tickets: u32,
    pub total_tickets: u32,
    pub sold_percentage: f64,
    pub status: SalesStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_events: usize,
    pub weekly_tickets_sold: u32,
    pub current_month_revenue: u32,
    pub previous_month_revenue: u32,
    /// Рост в процентах с одним знаком после запятой.
    pub revenue_growth_percent: f64,
    pub weekly_sales: Vec<SeriesPoint>,
    pub monthly_revenue: Vec<SeriesPoint>,
    pub category_distribution: Vec<SeriesPoint>,
    pub events: Vec<EventSalesRow>,
}

fn series(points: &[(&'static str, u32)]) -> Vec<SeriesPoint> {
    points.iter().map(|&(label, value)| SeriesPoint { label, value }).collect()
}

/// `month0` - номер текущего месяца с нуля (январь = 0).
pub fn summarize(events: &[Event], month0: usize) -> DashboardSummary {
    let month0 = month0 % 12;
    // для января предыдущий - декабрь
    let previous0 = (month0 + 11) % 12;
    let current = MONTHLY_REVENUE[month0].1;
    let previous = MONTHLY_REVENUE[previous0].1;

    let growth = if previous == 0 {
        0.0
    } else {
        (f64::from(current) - f64::from(previous)) / f64::from(previous) * 100.0
    };

    DashboardSummary {
        total_events: events.len(),
        weekly_tickets_sold: WEEKLY_TICKET_SALES.iter().map(|(_, sales)| sales).sum(),
        current_month_revenue: current,
        previous_month_revenue: previous,
        revenue_growth_percent: (growth * 10.0).round() / 10.0,
        weekly_sales: series(&WEEKLY_TICKET_SALES),
        monthly_revenue: series(&MONTHLY_REVENUE),
        category_distribution: series(&TICKET_CATEGORY_DISTRIBUTION),
        events: events.iter().map(EventSalesRow::from).collect(),
    }
}

impl From<&Event> for EventSalesRow {
    fn from(e: &Event) -> Self {
        EventSalesRow {
            id: e.id,
            title: e.title.clone(),
            date: e.date,
            location: e.location.clone(),
            category: e.category.clone(),
            sold_tickets: e.sold_tickets,
            total_tickets: e.total_tickets,
            sold_percentage: e.sold_percentage(),
            status: e.sales_status(),
        }
    }
}

/* ---------- таблица управления событиями ---------- */

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableSort {
    #[default]
    Date,
    Title,
    Location,
    TotalTickets,
    SoldTickets,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventTableQuery {
    pub query: Option<String>,
    #[serde(default)]
    pub sort: TableSort,
    #[serde(default)]
    pub direction: SortDirection,
}

impl EventTableQuery {
    fn matches(&self, event: &Event) -> bool {
        match self.query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(q) => {
                let q = q.to_lowercase();
                [&event.title, &event.category, &event.location]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&q))
            }
        }
    }

    fn compare(&self, a: &Event, b: &Event) -> Ordering {
        let ord = match self.sort {
            TableSort::Date => a.date.cmp(&b.date),
            TableSort::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            TableSort::Location => a.location.to_lowercase().cmp(&b.location.to_lowercase()),
            TableSort::TotalTickets => a.total_tickets.cmp(&b.total_tickets),
            TableSort::SoldTickets => a.sold_tickets.cmp(&b.sold_tickets),
        };
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

/// Строки таблицы организатора: поиск по названию, категории и площадке, затем сортировка.
pub fn event_table(events: &[Event], query: &EventTableQuery) -> Vec<EventSalesRow> {
    let mut found: Vec<&Event> = events.iter().filter(|e| query.matches(e)).collect();
    // sort_by стабильный: равные строки остаются в порядке каталога
    found.sort_by(|a, b| query.compare(a, b));
    found.into_iter().map(EventSalesRow::from).collect()
}
