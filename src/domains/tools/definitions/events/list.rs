//! Event listing tool over the static catalog.

use tracing::{info, instrument};

use super::catalog::{EVENTS, Event, EventCategory};
use crate::domains::tools::{
    HandlerFault, InvocationContext, ParamSpec, ToolHandler, ToolResult, ToolSchema,
    ValidatedArguments,
};

/// Default and maximum number of events returned.
const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 50;

/// Filters applied to the catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    pub city: Option<String>,
    pub category: Option<EventCategory>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: usize,
}

impl EventFilter {
    fn matches(&self, event: &Event) -> bool {
        self.city
            .as_deref()
            .is_none_or(|city| event.city.eq_ignore_ascii_case(city.trim()))
            && self.category.is_none_or(|c| event.category == c)
            && self
                .start_date
                .as_deref()
                .is_none_or(|start| event.date >= start)
            && self.end_date.as_deref().is_none_or(|end| event.date <= end)
    }

    /// Matching events sorted by date then name, at most `limit`.
    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        let mut found: Vec<&Event> = events.iter().filter(|e| self.matches(e)).collect();
        found.sort_by(|a, b| a.date.cmp(b.date).then_with(|| a.name.cmp(b.name)));
        found.truncate(self.limit);
        found
    }
}

/// List upcoming events from the built-in catalog.
#[derive(Debug, Clone, Default)]
pub struct ListEventsTool;

impl ListEventsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_events";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List upcoming events, optionally filtered by city, \
         category and date range. Returns one line per event with date, name, venue and city.";

    pub fn new() -> Self {
        Self
    }

    pub fn schema() -> ToolSchema {
        ToolSchema::new(Self::DESCRIPTION)
            .param(
                ParamSpec::non_empty_string("city")
                    .optional()
                    .describe("City to list events for (case-insensitive)"),
            )
            .param(
                ParamSpec::one_of("category", EventCategory::ALL.map(EventCategory::as_str))
                    .optional()
                    .describe("Event category"),
            )
            .param(
                ParamSpec::date("start_date")
                    .optional()
                    .describe("Only events on or after this date"),
            )
            .param(
                ParamSpec::date("end_date")
                    .optional()
                    .describe("Only events on or before this date"),
            )
            .param(
                ParamSpec::integer_in("limit", 1, MAX_LIMIT)
                    .with_default(DEFAULT_LIMIT)
                    .describe("Maximum number of events (default: 10, max: 50)"),
            )
    }

    fn filter(arguments: &ValidatedArguments) -> Result<EventFilter, HandlerFault> {
        let filter = EventFilter {
            city: arguments.str("city").map(str::to_string),
            category: arguments.str("category").and_then(EventCategory::parse),
            start_date: arguments.str("start_date").map(str::to_string),
            end_date: arguments.str("end_date").map(str::to_string),
            limit: arguments.i64("limit").unwrap_or(DEFAULT_LIMIT) as usize,
        };
        if let (Some(start), Some(end)) = (&filter.start_date, &filter.end_date) {
            if start > end {
                return Err(HandlerFault::invalid_input(format!(
                    "start_date {} is after end_date {}",
                    start, end
                )));
            }
        }
        Ok(filter)
    }
}

fn render(events: &[&Event]) -> String {
    let lines: Vec<String> = events
        .iter()
        .map(|e| {
            format!(
                "- {}: {} at {}, {} ({})",
                e.date,
                e.name,
                e.venue,
                e.city,
                e.category.as_str()
            )
        })
        .collect();
    format!("Found {} event(s):\n{}", events.len(), lines.join("\n"))
}

#[async_trait::async_trait]
impl ToolHandler for ListEventsTool {
    fn activity(&self) -> &str {
        "listing events for"
    }

    fn subject(&self, arguments: &ValidatedArguments) -> String {
        arguments.str("city").unwrap_or("all cities").to_string()
    }

    #[instrument(skip_all)]
    async fn call(
        &self,
        arguments: &ValidatedArguments,
        _context: &InvocationContext,
    ) -> Result<ToolResult, HandlerFault> {
        let filter = Self::filter(arguments)?;
        let events = filter.apply(EVENTS);
        info!("Listing events: {} match(es)", events.len());

        if events.is_empty() {
            return Ok(ToolResult::text("No events found matching the given filters."));
        }
        Ok(ToolResult::text(render(&events)))
    }
}
