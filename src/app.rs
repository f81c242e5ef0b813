use crate::config::Settings;
use crate::errors::ToolError;
use crate::managers::operation::OperationManager;
use crate::products::ProductLine;
use crate::services::api_client::ApiClient;
use crate::services::logger::Logger;
use crate::services::security::InboundAuth;
use crate::services::tool_executor::{ToolExecutor, ToolHandler};
use crate::services::validation::Validation;
use std::collections::HashMap;
use std::sync::Arc;

pub struct App {
    pub logger: Logger,
    pub product: ProductLine,
    pub client: Arc<ApiClient>,
    pub tool_executor: Arc<ToolExecutor>,
}

impl App {
    fn validate_tool_wiring(
        product: ProductLine,
        handlers: &HashMap<String, Arc<dyn ToolHandler>>,
    ) -> Result<(), ToolError> {
        let mut missing: Vec<&str> = product
            .operations()
            .into_iter()
            .map(|kind| kind.name())
            .filter(|name| !handlers.contains_key(*name))
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        missing.sort();
        Err(ToolError::internal("Tool wiring is incomplete")
            .with_hint("Every operation of the product line must have a handler.")
            .with_details(serde_json::json!({ "missing_tools": missing })))
    }

    pub fn initialize(settings: &Settings, product: ProductLine) -> Result<Self, ToolError> {
        let logger = Logger::new(&product.server_name());
        let validation = Validation::new();

        if settings.api.credentials.is_none() {
            logger.warn(
                "ACERTPIX_CLIENT_ID/ACERTPIX_CLIENT_SECRET are not set; authenticated tools will report a configuration error",
                None,
            );
        }
        if !settings.api.ssl_verify {
            logger.warn("TLS certificate verification is disabled", None);
        }

        let client = Arc::new(
            ApiClient::new(logger.clone(), settings.api.clone())
                .map_err(|err| ToolError::configuration(err.to_string()))?,
        );

        let mut handlers: HashMap<String, Arc<dyn ToolHandler>> = HashMap::new();
        for kind in product.operations() {
            let manager = OperationManager::new(
                kind,
                logger.clone(),
                validation.clone(),
                client.clone(),
            );
            handlers.insert(kind.name().to_string(), Arc::new(manager));
        }
        Self::validate_tool_wiring(product, &handlers)?;

        let auth = InboundAuth::new(settings.inbound_api_key.as_deref());
        let tool_executor = Arc::new(ToolExecutor::new(logger.clone(), auth, handlers));

        logger.info(
            "Initialized",
            Some(&serde_json::json!({
                "product": product.as_str(),
                "base_url": client.base_url(),
                "tools": tool_executor.tool_names(),
            })),
        );

        Ok(Self {
            logger,
            product,
            client,
            tool_executor,
        })
    }
}
