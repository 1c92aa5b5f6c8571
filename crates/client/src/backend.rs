//! Mock-or-remote selection for list views.

use std::sync::Arc;
use std::time::Duration;

use ballie_core::chat::ChatCollaborator;
use ballie_core::collaborator::SharedCollaborator;
use ballie_db::{DataStores, StoredResource};
use reqwest::{Client, Url};

use crate::chat::HttpChat;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::{parse_base_url, HttpCollaborator};

/// Where collaborators come from. Every collaborator built from one
/// backend shares its stores (mock) or connection pool (remote).
#[derive(Clone)]
pub enum Backend {
    Mock(DataStores),
    Remote { client: Client, base_url: Url },
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Mock(_) => f.write_str("Backend::Mock"),
            Backend::Remote { base_url, .. } => f
                .debug_struct("Backend::Remote")
                .field("base_url", &base_url.as_str())
                .finish_non_exhaustive(),
        }
    }
}

impl Backend {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        match config.remote_url() {
            None => {
                tracing::info!("Using in-memory mock data");
                Ok(Backend::Mock(DataStores::seeded()))
            }
            Some(url) => {
                let base_url = parse_base_url(url)?;
                let client = Client::builder()
                    .timeout(Duration::from_secs(config.request_timeout_secs))
                    .build()?;
                tracing::info!(api_url = %base_url, "Using remote admin API");
                Ok(Backend::Remote { client, base_url })
            }
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, Backend::Mock(_))
    }

    /// A collaborator for resource `R`.
    pub fn collaborator<R: StoredResource>(&self) -> SharedCollaborator<R> {
        match self {
            Backend::Mock(stores) => stores.collaborator::<R>(),
            Backend::Remote { client, base_url } => Arc::new(HttpCollaborator::<R>::with_client(
                client.clone(),
                base_url.clone(),
            )),
        }
    }

    pub fn chat(&self) -> Arc<dyn ChatCollaborator> {
        match self {
            Backend::Mock(stores) => Arc::clone(&stores.chat) as Arc<dyn ChatCollaborator>,
            Backend::Remote { client, base_url } => {
                Arc::new(HttpChat::with_client(client.clone(), base_url.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use ballie_core::collaborator::Collaborator;
    use ballie_core::query::ListQuery;
    use ballie_core::resources::Users;

    #[tokio::test]
    async fn default_config_uses_seeded_mock_data() {
        let backend = Backend::from_config(&ClientConfig::default()).unwrap();
        assert!(backend.is_mock());

        let page = backend
            .collaborator::<Users>()
            .list(&ListQuery::new(10))
            .await
            .unwrap();
        assert!(page.total > 0);
        assert!(!backend.chat().list_chats().await.unwrap().is_empty());
    }

    #[test]
    fn api_url_selects_remote_backend() {
        let config = ClientConfig {
            api_url: Some("http://localhost:3000".into()),
            ..ClientConfig::default()
        };
        let backend = Backend::from_config(&config).unwrap();
        assert!(!backend.is_mock());
    }

    #[test]
    fn invalid_api_url_is_rejected() {
        let config = ClientConfig {
            api_url: Some("localhost".into()),
            ..ClientConfig::default()
        };
        assert_matches!(Backend::from_config(&config), Err(ClientError::InvalidUrl(_)));
    }
}
