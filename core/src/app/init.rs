// Startup sequencing
//
// Three steps, in order:
//   1. bring up push messaging, the only fatal step
//   2. create notification channels, fire and forget
//   3. configure background fetch, fetch + persist the push token, and
//      check notification permission, all concurrently; each failure is
//      logged on its own and never cancels the others.

use crate::app::context::ServiceContext;
use crate::platform::permissions::PermissionStatus;
use crate::CoreError;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct InitOutcome {
    pub push_token: Option<String>,
    pub permission_status: Option<PermissionStatus>,
}

pub struct AppInitializer {
    context: Arc<ServiceContext>,
}

impl AppInitializer {
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self { context }
    }

    pub async fn initialize_all(&self) -> Result<InitOutcome, CoreError> {
        let ctx = &self.context;

        // Step 1: without messaging nothing downstream works.
        ctx.adapters.messaging.initialize().await.map_err(|e| {
            tracing::error!(error = %e, "messaging initialization failed");
            CoreError::Initialization(e.to_string())
        })?;
        tracing::info!("messaging initialized");

        // Step 2: channel creation happens off the critical path. A
        // failure here degrades notifications, not startup.
        let notifier = Arc::clone(&ctx.adapters.notifier);
        tokio::spawn(async move {
            if let Err(e) = notifier.initialize_channels().await {
                tracing::error!(error = %e, "notification channel setup failed");
            }
        });

        // Step 3: three independent tasks, joined.
        let (fetch_result, token_result, permission_result) = tokio::join!(
            Arc::clone(&ctx.background_sync).configure(),
            self.fetch_and_persist_token(),
            ctx.notifications.check_permission(),
        );

        if let Err(e) = fetch_result {
            tracing::error!(error = %e, "background fetch configuration failed");
        }

        let push_token = match token_result {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(error = %e, "push token retrieval failed");
                None
            }
        };

        let permission_status = match permission_result {
            Ok(status) => Some(status),
            Err(e) => {
                tracing::error!(error = %e, "notification permission check failed");
                None
            }
        };

        tracing::info!(
            has_token = push_token.is_some(),
            permission = ?permission_status,
            "startup complete"
        );

        Ok(InitOutcome {
            push_token,
            permission_status,
        })
    }

    async fn fetch_and_persist_token(&self) -> Result<Option<String>, CoreError> {
        let token = self.context.adapters.messaging.token().await?;
        if let Some(ref token) = token {
            self.context.token_store.save(token)?;
            tracing::info!("push token persisted");
        } else {
            tracing::warn!("platform returned no push token");
        }
        Ok(token)
    }
}
