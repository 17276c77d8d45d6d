use crate::auth::{Authorizer, PermissionAuthorizer};
use crate::config::{ConfigLoadError, ServiceConfig};
use crate::dispatch::ResourceService;
use crate::handlers::ResourceHandlerSet;
use crate::model::ResourceKind;
use crate::router::RouterError;
use crate::routes::build_router;
use crate::store;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Config(#[from] ConfigLoadError),

    #[error("failed to build routes: {0}")]
    Router(#[from] RouterError),

    #[error("store actor task failed: {0}")]
    ActorTaskFailed(#[from] tokio::task::JoinError),
}

/// Owns the running store actors and the service in front of them.
pub struct ResourceSystem {
    service: ResourceService,
    handles: Vec<JoinHandle<()>>,
}

impl ResourceSystem {
    /// Starts the system with the default [`PermissionAuthorizer`].
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(config: &ServiceConfig) -> Result<Self, SystemError> {
        Self::with_authorizer(config, Arc::new(PermissionAuthorizer))
    }

    pub fn with_authorizer(
        config: &ServiceConfig,
        authorizer: Arc<dyn Authorizer>,
    ) -> Result<Self, SystemError> {
        config.validate()?;
        let router = build_router(&config.base_path)?;

        let mut handles = Vec::with_capacity(ResourceKind::ALL.len());
        let mut handler_sets = Vec::with_capacity(ResourceKind::ALL.len());
        for kind in ResourceKind::ALL {
            let (actor, client) = store::new(kind, config.channel_capacity);
            handles.push(tokio::spawn(actor.run(kind)));
            handler_sets.push(ResourceHandlerSet::new(kind, client, authorizer.clone()));
        }

        info!(
            routes = router.len(),
            base_path = %config.base_path,
            "Resource system started"
        );
        Ok(Self {
            service: ResourceService::new(router, handler_sets),
            handles,
        })
    }

    pub fn service(&self) -> &ResourceService {
        &self.service
    }

    /// Closes every store and waits for the actors to finish.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        drop(self.service);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::ActorTaskFailed(e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
