use std::sync::Arc;

use crate::app::error::{GramError, Result};
use crate::config::{BackendKind, Config};
use crate::domain::Target;
use crate::fetcher::{Backend, Downloader, HikerBackend, HttpDownloader, Paginator, PrivateApiBackend};
use crate::normalizer::Normalizer;
use crate::report::ReportSink;

/// Everything one session against one target needs.
pub struct AppContext {
    pub backend: Arc<dyn Backend>,
    pub downloader: Arc<dyn Downloader>,
    pub target: Target,
    pub sink: ReportSink,
    pub paginator: Paginator,
    pub normalizer: Normalizer,
}

impl AppContext {
    pub fn new(
        backend: Arc<dyn Backend>,
        downloader: Arc<dyn Downloader>,
        target: Target,
        sink: ReportSink,
        paginator: Paginator,
    ) -> Self {
        Self {
            backend,
            downloader,
            target,
            sink,
            paginator,
            normalizer: Normalizer::new(),
        }
    }

    /// Build the configured backend and resolve `username` through it.
    ///
    /// The username must already be validated; it ends up in request paths.
    pub async fn connect(config: &Config, username: &str) -> Result<Self> {
        let backend = Self::backend(config)?;
        let downloader: Arc<dyn Downloader> = Arc::new(HttpDownloader::new(
            &config.backend.user_agent,
            config.backend.timeout(),
        )?);

        let target = backend.resolve_target(username).await?;
        tracing::info!(
            account = %target.username,
            id = target.id,
            private = target.is_private,
            following = target.is_following,
            "Target resolved"
        );

        let sink = ReportSink::new(
            config.output.target_dir(username),
            config.output.write_text,
            config.output.json_dump,
        );

        Ok(Self::new(
            backend,
            downloader,
            target,
            sink,
            Paginator::new(config.backend.max_pages),
        ))
    }

    fn backend(config: &Config) -> Result<Arc<dyn Backend>> {
        let backend = &config.backend;
        let credential = backend.credential().ok_or_else(|| {
            GramError::Config(format!("no credential configured for the {:?} backend", backend.kind))
        })?;

        let built: Arc<dyn Backend> = match backend.kind {
            BackendKind::Private => Arc::new(PrivateApiBackend::connect(
                &backend.private_base_url,
                credential,
                &backend.user_agent,
                backend.timeout(),
            )?),
            BackendKind::Hiker => Arc::new(HikerBackend::connect(
                &backend.hiker_base_url,
                credential,
                &backend.user_agent,
                backend.timeout(),
            )?),
        };
        Ok(built)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_requires_credential() {
        let config = Config::default();
        let result = AppContext::connect(&config, "targetuser").await;
        assert!(matches!(result, Err(GramError::Config(_))));
    }
}
