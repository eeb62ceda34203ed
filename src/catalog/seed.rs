//! Статический набор данных витрины: события, категории и ряды продаж для дашборда.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use uuid::Uuid;

use crate::models::{Event, SeatId, SeatingPlan, TicketCategory};

pub const CATEGORIES: [&str; 13] = [
    "Music",
    "Business",
    "Food & Drink",
    "Community",
    "Arts",
    "Sports & Fitness",
    "Health",
    "Technology",
    "Travel & Outdoor",
    "Film & Media",
    "Charity & Causes",
    "Education",
    "Other",
];

pub const WEEKLY_TICKET_SALES: [(&str, u32); 7] = [
    ("Mon", 120),
    ("Tue", 180),
    ("Wed", 150),
    ("Thu", 250),
    ("Fri", 300),
    ("Sat", 290),
    ("Sun", 200),
];

pub const MONTHLY_REVENUE: [(&str, u32); 12] = [
    ("Jan", 12500),
    ("Feb", 15000),
    ("Mar", 18000),
    ("Apr", 16000),
    ("May", 21000),
    ("Jun", 25000),
    ("Jul", 28000),
    ("Aug", 30000),
    ("Sep", 26000),
    ("Oct", 22000),
    ("Nov", 20000),
    ("Dec", 24000),
];

pub const TICKET_CATEGORY_DISTRIBUTION: [(&str, u32); 4] = [
    ("General", 60),
    ("VIP", 20),
    ("Premium", 15),
    ("Other", 5),
];

// Литералы ниже валидны; default только чтобы не паниковать
fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

fn stamp(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).single().unwrap_or_default()
}

fn ticket(name: &str, price: f64, available: u32, sold: u32, description: &str) -> TicketCategory {
    TicketCategory {
        id: Uuid::new_v4(),
        name: name.to_string(),
        price,
        available,
        sold,
        description: Some(description.to_string()),
    }
}

fn seating(total_seats: u32, booked: &[&str], max_selectable_seats: Option<u32>) -> SeatingPlan {
    SeatingPlan {
        total_seats,
        booked_seats: booked.iter().filter_map(|s| s.parse::<SeatId>().ok()).collect(),
        max_selectable_seats,
    }
}

struct Venue<'a> {
    location: &'a str,
    address: &'a str,
    city: &'a str,
    state: &'a str,
    zip_code: &'a str,
}

#[allow(clippy::too_many_arguments)]
fn event(
    title: &str,
    description: &str,
    (day, start, end): (NaiveDate, NaiveTime, NaiveTime),
    venue: Venue<'_>,
    organizer: &str,
    image: &str,
    featured: bool,
    category: &str,
    ticket_types: Vec<TicketCategory>,
    seating: Option<SeatingPlan>,
    (created_at, updated_at): (DateTime<Utc>, DateTime<Utc>),
) -> Event {
    let total_tickets = ticket_types.iter().map(|t| t.available).sum();
    let sold_tickets = ticket_types.iter().map(|t| t.sold).sum();
    Event {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: description.to_string(),
        date: day,
        start_time: start,
        end_time: end,
        location: venue.location.to_string(),
        address: venue.address.to_string(),
        city: venue.city.to_string(),
        state: venue.state.to_string(),
        zip_code: venue.zip_code.to_string(),
        organizer: organizer.to_string(),
        organizer_id: Uuid::new_v4(),
        image: image.to_string(),
        featured,
        category: category.to_string(),
        ticket_types,
        total_tickets,
        sold_tickets,
        seating,
        created_at,
        updated_at,
    }
}

pub fn events() -> Vec<Event> {
    vec![
        event(
            "Summer Music Festival 2023",
            "Join us for three days of amazing music from top artists across the globe. There will be multiple stages, food vendors, and camping available.",
            (date(2023, 7, 15), time(12, 0), time(23, 0)),
            Venue { location: "Central Park", address: "123 Park Avenue", city: "New York", state: "NY", zip_code: "10001" },
            "Music Events Inc",
            "https://images.unsplash.com/photo-1459749411175-04bf5292ceea",
            true,
            "Music",
            vec![
                ticket("General Admission", 99.99, 5000, 3500, "Access to all stages and common areas"),
                ticket("VIP", 199.99, 1000, 750, "VIP lounge access, complimentary drinks, and premium viewing areas"),
            ],
            None,
            (stamp(2023, 1, 15, 8, 30), stamp(2023, 2, 20, 14, 15)),
        ),
        event(
            "Tech Conference 2023",
            "A two-day conference featuring talks from industry leaders, workshops, and networking opportunities for tech professionals.",
            (date(2023, 9, 20), time(9, 0), time(18, 0)),
            Venue { location: "Tech Convention Center", address: "456 Innovation Blvd", city: "San Francisco", state: "CA", zip_code: "94107" },
            "TechEvents Co",
            "https://images.unsplash.com/photo-1540575467063-178a50c2df87",
            true,
            "Technology",
            vec![
                ticket("Standard", 299.99, 2000, 1800, "Access to all talks and workshops"),
                ticket("Premium", 499.99, 500, 350, "Standard access plus exclusive networking events and speaker meet-and-greets"),
            ],
            Some(seating(45, &["A1", "A2", "B5", "C7", "D10", "E3"], None)),
            (stamp(2023, 3, 10, 10, 45), stamp(2023, 4, 5, 16, 20)),
        ),
        event(
            "Food & Wine Festival",
            "Sample delicious cuisine from local restaurants and taste premium wines from regional vineyards.",
            (date(2023, 8, 5), time(11, 0), time(20, 0)),
            Venue { location: "Riverfront Park", address: "789 Riverside Dr", city: "Chicago", state: "IL", zip_code: "60601" },
            "Taste of the City",
            "https://images.unsplash.com/photo-1555939594-58d7cb561ad1",
            false,
            "Food & Drink",
            vec![
                ticket("General", 75.00, 3000, 2250, "Includes 10 food and 5 wine tasting tokens"),
                ticket("Gourmet", 150.00, 1000, 850, "Includes 20 food and 10 wine tasting tokens, plus chef meet-and-greets"),
            ],
            None,
            (stamp(2023, 2, 18, 9, 15), stamp(2023, 3, 22, 13, 40)),
        ),
        event(
            "Basketball Tournament",
            "Watch top college basketball teams compete in this annual tournament.",
            (date(2023, 11, 12), time(13, 0), time(19, 0)),
            Venue { location: "Sports Arena", address: "101 Arena Way", city: "Los Angeles", state: "CA", zip_code: "90015" },
            "College Sports Network",
            "https://images.unsplash.com/photo-1574623452334-1e0ac2b3ccb4",
            false,
            "Sports & Fitness",
            vec![
                ticket("Upper Level", 35.00, 8000, 6000, "Upper level seating with good view of the court"),
                ticket("Lower Level", 75.00, 5000, 4500, "Lower level seating closer to the action"),
                ticket("Courtside", 250.00, 500, 480, "Exclusive courtside seating"),
            ],
            Some(seating(25, &["A4", "A5", "B1", "C2"], Some(4))),
            (stamp(2023, 5, 5, 11, 30), stamp(2023, 6, 10, 15, 45)),
        ),
        event(
            "Art Exhibition: Modern Masters",
            "A curated collection of modern art masterpieces from renowned galleries around the world.",
            (date(2023, 10, 8), time(10, 0), time(19, 0)),
            Venue { location: "Metropolitan Art Museum", address: "234 Gallery Ave", city: "Boston", state: "MA", zip_code: "02115" },
            "Arts Council",
            "https://images.unsplash.com/photo-1531058020387-3be344556be6",
            true,
            "Arts",
            vec![
                ticket("Adult", 25.00, 10000, 7500, "Regular admission for adults"),
                ticket("Student/Senior", 15.00, 5000, 3000, "Discounted admission for students and seniors with ID"),
                ticket("VIP Preview", 100.00, 500, 350, "Exclusive preview before public opening and guided tour"),
            ],
            None,
            (stamp(2023, 4, 12, 13, 20), stamp(2023, 5, 18, 10, 15)),
        ),
        event(
            "Charity 5K Run",
            "Run or walk to support local children's hospitals. All proceeds go directly to medical equipment and patient care programs.",
            (date(2023, 9, 2), time(8, 0), time(12, 0)),
            Venue { location: "Memorial Park", address: "345 Park Rd", city: "Seattle", state: "WA", zip_code: "98101" },
            "Health Foundation",
            "https://images.unsplash.com/photo-1452626038306-9aae5e071dd3",
            false,
            "Charity & Causes",
            vec![
                ticket("Adult Runner", 35.00, 2000, 1850, "Race entry, t-shirt, and finisher medal"),
                ticket("Child Runner", 20.00, 1000, 750, "Race entry for kids under 12, includes t-shirt and medal"),
                ticket("Virtual Runner", 25.00, 5000, 2500, "Support the cause and receive a t-shirt by mail"),
            ],
            None,
            (stamp(2023, 3, 28, 9, 45), stamp(2023, 5, 2, 14, 30)),
        ),
    ]
}
