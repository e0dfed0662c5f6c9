use super::actor::{ShiftTemplateActor, ShiftTemplateActorHandle};
use super::models::ShiftTemplate;
use crate::config::Config;
use crate::error::AppResult;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Handle for interacting with the shift template actor
#[derive(Clone)]
pub struct ShiftTemplateHandle {
    actor_handle: ShiftTemplateActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl ShiftTemplateHandle {
    /// Create a new ShiftTemplateHandle and spawn the actor
    pub async fn new(config: Arc<RwLock<Config>>) -> AppResult<Self> {
        let timeout = {
            let config_read = config.read().await;
            Duration::from_secs(config_read.request_timeout_secs)
        };

        // Create the actor and get its handle
        let (mut actor, handle) = ShiftTemplateActor::new(config, timeout)?;

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Ok(Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        })
    }

    /// Validate and create a template on the backend
    pub async fn create(&self, template: ShiftTemplate) -> AppResult<Value> {
        self.actor_handle.create(template).await
    }

    /// Validate and update an existing template on the backend
    pub async fn update(&self, id: impl Into<String>, template: ShiftTemplate) -> AppResult<Value> {
        self.actor_handle.update(id.into(), template).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AppResult<()> {
        self.actor_handle.shutdown().await
    }
}
