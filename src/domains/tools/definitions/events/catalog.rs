//! Static in-process event catalog.

use serde::Serialize;

/// Event category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Music,
    Sports,
    Tech,
    Food,
    Arts,
}

impl EventCategory {
    pub const ALL: [EventCategory; 5] = [
        Self::Music,
        Self::Sports,
        Self::Tech,
        Self::Food,
        Self::Arts,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Music => "music",
            Self::Sports => "sports",
            Self::Tech => "tech",
            Self::Food => "food",
            Self::Arts => "arts",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str().eq_ignore_ascii_case(s))
    }
}

/// A catalog entry. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub name: &'static str,
    pub city: &'static str,
    pub venue: &'static str,
    pub date: &'static str,
    pub category: EventCategory,
}

pub static EVENTS: &[Event] = &[
    Event {
        name: "Golden Gate Jazz Nights",
        city: "San Francisco",
        venue: "SFJAZZ Center",
        date: "2026-11-06",
        category: EventCategory::Music,
    },
    Event {
        name: "Bay Area Developer Summit",
        city: "San Francisco",
        venue: "Moscone West",
        date: "2026-11-18",
        category: EventCategory::Tech,
    },
    Event {
        name: "Ferry Building Harvest Market",
        city: "San Francisco",
        venue: "Ferry Building",
        date: "2026-10-31",
        category: EventCategory::Food,
    },
    Event {
        name: "Hudson River Half Marathon",
        city: "New York",
        venue: "Battery Park",
        date: "2026-11-08",
        category: EventCategory::Sports,
    },
    Event {
        name: "Modern Light Retrospective",
        city: "New York",
        venue: "Chelsea Galleries",
        date: "2026-12-02",
        category: EventCategory::Arts,
    },
    Event {
        name: "Lakefront Winter Lights",
        city: "Chicago",
        venue: "Navy Pier",
        date: "2026-12-12",
        category: EventCategory::Arts,
    },
    Event {
        name: "Windy City Food Truck Rally",
        city: "Chicago",
        venue: "Grant Park",
        date: "2026-11-14",
        category: EventCategory::Food,
    },
    Event {
        name: "Thames Open Air Orchestra",
        city: "London",
        venue: "Southbank Centre",
        date: "2026-11-21",
        category: EventCategory::Music,
    },
    Event {
        name: "London Rust Meetup",
        city: "London",
        venue: "Shoreditch Works",
        date: "2026-11-03",
        category: EventCategory::Tech,
    },
    Event {
        name: "Derby Day Classic",
        city: "London",
        venue: "Wembley Stadium",
        date: "2027-01-09",
        category: EventCategory::Sports,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::schema::parse_date;

    #[test]
    fn test_catalog_dates_are_valid() {
        for event in EVENTS {
            assert!(parse_date(event.date).is_some(), "bad date for {}", event.name);
        }
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(EventCategory::parse("Music"), Some(EventCategory::Music));
        assert_eq!(EventCategory::parse("opera"), None);
    }
}
