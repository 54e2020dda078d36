//! Geocoding tool: city name to latitude/longitude.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::client::OpenMeteoClient;
use crate::domains::tools::{
    HandlerFault, InvocationContext, ParamSpec, ToolHandler, ToolResult, ToolSchema,
    ValidatedArguments,
};

/// Resolve a city name to coordinates via the geocoding API.
pub struct GetCoordinatesTool {
    client: Arc<OpenMeteoClient>,
}

impl GetCoordinatesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_coordinates";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the latitude and longitude for a given city name. \
         Provide only the city, without including the state, province, or country. \
         Example: If the full address is 'San Francisco, CA', use 'San Francisco' as the input.";

    pub fn new(client: Arc<OpenMeteoClient>) -> Self {
        Self { client }
    }

    pub fn schema() -> ToolSchema {
        ToolSchema::new(Self::DESCRIPTION).param(
            ParamSpec::non_empty_string("address").describe("The city name to get coordinates for"),
        )
    }
}

#[async_trait::async_trait]
impl ToolHandler for GetCoordinatesTool {
    fn activity(&self) -> &str {
        "geocoding address"
    }

    fn subject(&self, arguments: &ValidatedArguments) -> String {
        arguments.str("address").unwrap_or_default().to_string()
    }

    #[instrument(skip_all, fields(address = arguments.str("address").unwrap_or_default()))]
    async fn call(
        &self,
        arguments: &ValidatedArguments,
        context: &InvocationContext,
    ) -> Result<ToolResult, HandlerFault> {
        let address = arguments.str("address").unwrap_or_default();
        info!("Geocoding address: {}", address);

        if let Some(agent) = context.user_agent() {
            debug!("Request from: {}", agent);
        }
        if context.has_authorization() {
            debug!("Authorization header present");
        }

        match self.client.search_city(address).await? {
            Some(coordinates) => Ok(ToolResult::text(serde_json::to_string_pretty(&coordinates)?)),
            None => {
                info!("No geocoding results for: {}", address);
                Ok(ToolResult::text(format!(
                    "No geocoding results found for address: {}",
                    address
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::test_support::{MockUpstream, unreachable_upstream};
    use crate::domains::tools::{ToolRegistry, TransportKind};
    use serde_json::json;

    async fn registry_for(config: &crate::core::config::UpstreamConfig) -> ToolRegistry {
        let client = Arc::new(OpenMeteoClient::new(config).unwrap());
        let mut registry = ToolRegistry::new();
        registry
            .register(
                GetCoordinatesTool::NAME,
                GetCoordinatesTool::schema(),
                GetCoordinatesTool::new(client),
            )
            .unwrap();
        registry
    }

    #[tokio::test]
    async fn test_returns_first_result_as_json() {
        let upstream = MockUpstream::start(
            200,
            r#"{"results":[{"name":"San Francisco","latitude":37.77493,"longitude":-122.41942,"country":"United States"},{"latitude":1.0,"longitude":2.0}]}"#,
        )
        .await;
        let registry = registry_for(&upstream.upstream_config()).await;

        let ctx = InvocationContext::new(TransportKind::Http).with_header("User-Agent", "test");
        let result = registry
            .invoke("get_coordinates", &json!({ "address": "San Francisco" }), &ctx)
            .await
            .unwrap();

        assert_eq!(
            result.first_text(),
            "{\n  \"latitude\": 37.77493,\n  \"longitude\": -122.41942\n}"
        );
        assert_eq!(
            upstream.requests(),
            vec!["/v1/search?name=San+Francisco&count=1".to_string()]
        );
    }

    #[tokio::test]
    async fn test_no_results_message() {
        let upstream = MockUpstream::start(200, r#"{"generationtime_ms":0.3}"#).await;
        let registry = registry_for(&upstream.upstream_config()).await;

        let result = registry
            .invoke("get_coordinates", &json!({ "address": "Atlantis" }), &InvocationContext::default())
            .await
            .unwrap();
        assert_eq!(result.first_text(), "No geocoding results found for address: Atlantis");
    }

    #[tokio::test]
    async fn test_http_error_status_is_reported() {
        let upstream = MockUpstream::start(500, "{}").await;
        let registry = registry_for(&upstream.upstream_config()).await;

        let result = registry
            .invoke("get_coordinates", &json!({ "address": "Paris" }), &InvocationContext::default())
            .await
            .unwrap();
        assert_eq!(
            result.first_text(),
            "Error geocoding address \"Paris\": HTTP error! status: 500"
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_reported() {
        let upstream = MockUpstream::start(200, "<html>").await;
        let registry = registry_for(&upstream.upstream_config()).await;

        let result = registry
            .invoke("get_coordinates", &json!({ "address": "Paris" }), &InvocationContext::default())
            .await
            .unwrap();
        assert!(result.first_text().starts_with("Error geocoding address \"Paris\": Failed to decode"));
    }

    #[tokio::test]
    async fn test_network_failure_is_contained() {
        let registry = registry_for(&unreachable_upstream()).await;

        let result = registry
            .invoke("get_coordinates", &json!({ "address": "Oslo" }), &InvocationContext::default())
            .await
            .unwrap();
        assert_eq!(result.content().len(), 1);
        assert!(result.first_text().starts_with("Error geocoding address \"Oslo\": "));
    }

    #[tokio::test]
    async fn test_network_failure_hides_api_key() {
        let config = crate::core::config::UpstreamConfig {
            api_key: Some("TOPSECRET123".to_string()),
            ..unreachable_upstream()
        };
        let registry = registry_for(&config).await;

        let result = registry
            .invoke("get_coordinates", &json!({ "address": "Oslo" }), &InvocationContext::default())
            .await
            .unwrap();
        let text = result.first_text();
        assert!(text.starts_with("Error geocoding address \"Oslo\": "));
        assert!(!text.contains("TOPSECRET123"));
        assert!(!text.contains("apikey"));
    }

    #[tokio::test]
    async fn test_empty_address_rejected() {
        let registry = registry_for(&unreachable_upstream()).await;

        let result = registry
            .invoke("get_coordinates", &json!({ "address": "" }), &InvocationContext::default())
            .await
            .unwrap();
        assert!(result.first_text().contains("address: must be at least 1 character(s) long"));
    }

    // Integration test (requires network, run with: cargo test -- --ignored)
    #[ignore]
    #[tokio::test]
    async fn test_live_geocoding() {
        let registry = registry_for(&crate::core::config::UpstreamConfig::default()).await;
        let result = registry
            .invoke("get_coordinates", &json!({ "address": "Berlin" }), &InvocationContext::default())
            .await
            .unwrap();
        assert!(result.first_text().contains("latitude"));
    }
}
