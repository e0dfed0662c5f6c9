use super::models::ShiftTemplate;
use super::validation::validate_template;
use crate::config::Config;
use crate::error::{api_error, component_error, config_error, AppResult};
use reqwest::{Client, Method};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, RwLock};
use tracing::{debug, info, warn};
use url::Url;

/// The shift template actor that forwards accepted templates to the backend
pub struct ShiftTemplateActor {
    config: Arc<RwLock<Config>>,
    client: Client,
    command_rx: mpsc::Receiver<ShiftTemplateCommand>,
}

/// Commands that can be sent to the shift template actor
pub enum ShiftTemplateCommand {
    Create(ShiftTemplate, oneshot::Sender<AppResult<Value>>),
    Update(String, ShiftTemplate, oneshot::Sender<AppResult<Value>>),
    Shutdown,
}

/// Handle for communicating with the shift template actor
#[derive(Clone)]
pub struct ShiftTemplateActorHandle {
    command_tx: mpsc::Sender<ShiftTemplateCommand>,
}

impl ShiftTemplateActorHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<AppResult<T>>) -> ShiftTemplateCommand,
    ) -> AppResult<T> {
        let (response_tx, response_rx) = oneshot::channel();

        // Queue the command behind any request already in flight
        self.command_tx
            .send(build(response_tx))
            .await
            .map_err(|e| component_error(&format!("Actor mailbox error: {}", e)))?;

        // The actor drops the sender if it stops before answering
        response_rx
            .await
            .map_err(|_| component_error("Response channel closed"))?
    }

    /// Create a template on the backend
    pub async fn create(&self, template: ShiftTemplate) -> AppResult<Value> {
        self.request(|tx| ShiftTemplateCommand::Create(template, tx)).await
    }

    /// Replace an existing template on the backend
    pub async fn update(&self, id: String, template: ShiftTemplate) -> AppResult<Value> {
        self.request(|tx| ShiftTemplateCommand::Update(id, template, tx)).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AppResult<()> {
        let _ = self.command_tx.send(ShiftTemplateCommand::Shutdown).await;
        Ok(())
    }
}

impl ShiftTemplateActor {
    /// Create a new actor and return its handle
    pub fn new(config: Arc<RwLock<Config>>, timeout: Duration) -> AppResult<(Self, ShiftTemplateActorHandle)> {
        let (command_tx, command_rx) = mpsc::channel(32);

        // Build HTTP client with the request timeout
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| config_error(&format!("Failed to build HTTP client: {}", e)))?;

        let actor = Self {
            config,
            client,
            command_rx,
        };

        let handle = ShiftTemplateActorHandle { command_tx };

        Ok((actor, handle))
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Shift template actor started");

        // Process commands
        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                ShiftTemplateCommand::Create(template, response_tx) => {
                    let result = self.submit(Method::POST, None, &template).await;
                    let _ = response_tx.send(result);
                }
                ShiftTemplateCommand::Update(id, template, response_tx) => {
                    let result = self.submit(Method::PUT, Some(&id), &template).await;
                    let _ = response_tx.send(result);
                }
                ShiftTemplateCommand::Shutdown => {
                    info!("Shift template actor shutting down");
                    break;
                }
            }
        }

        info!("Shift template actor shut down");
    }

    /// Build the endpoint URL for the collection or a single template
    async fn endpoint(&self, id: Option<&str>) -> AppResult<Url> {
        let (base_url, templates_path) = {
            let config_read = self.config.read().await;
            (config_read.api_base_url.clone(), config_read.templates_path.clone())
        };

        // Build URL from base and collection path
        let mut url = Url::parse(&base_url)
            .map_err(|e| config_error(&format!("Invalid API base URL '{}': {}", base_url, e)))?;

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| config_error("API base URL cannot be a base"))?;
            // Avoid a double slash when the base URL ends with '/'
            segments.pop_if_empty();
            segments.extend(templates_path.split('/').filter(|s| !s.is_empty()));
            if let Some(id) = id {
                segments.push(id);
            }
        }

        Ok(url)
    }

    /// Validate a template and send it to the backend
    async fn submit(&self, method: Method, id: Option<&str>, template: &ShiftTemplate) -> AppResult<Value> {
        // Never send a template the form would reject
        if let Err(e) = validate_template(template) {
            warn!("Rejected shift template '{}': {}", template.name, e);
            return Err(e.into());
        }

        let url = self.endpoint(id).await?;
        let token = {
            let config_read = self.config.read().await;
            config_read.api_token.clone()
        };

        debug!("Sending shift template '{}' with {} {}", template.name, method, url);

        // Make API request
        let mut request = self.client.request(method, url).json(&template.to_request());
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(api_error(&format!(
                "Failed to save shift template: HTTP {} - {}",
                status, error_body
            )));
        }

        // Some backends answer an update with an empty body
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        let saved: Value = serde_json::from_str(&body)
            .map_err(|e| api_error(&format!("Failed to parse template response: {}", e)))?;

        info!("Saved shift template '{}'", template.name);
        Ok(saved)
    }
}
