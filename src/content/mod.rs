//! # MetaObject Content Loader
//!
//! Fetches the MetaObjects the extension renders and narrows them to the configured handles.

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::clients::MetaObjectClient;
use crate::framework::PAGE_SIZE;
use crate::model::MetaObject;
use crate::settings::ExtensionSettings;

/// Why no content could be loaded. The display text is merchant-facing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("MetaObject type is required. Please configure it in the extension settings (e.g., 'global_site_data').")]
    MissingType,

    #[error("Failed to fetch MetaObjects of type \"{kind}\". Make sure the type exists in your store.")]
    FetchFailed { kind: String },

    #[error(
        "No MetaObjects found with configured handles \"{}\". Available handles: {}",
        .handles.join("\", \""),
        list_or_none(.available)
    )]
    NoMatchingHandles {
        handles: Vec<String>,
        available: Vec<String>,
    },

    #[error("No MetaObjects found for type \"{kind}\". Make sure you have MetaObjects of this type created in your store.")]
    Empty { kind: String },
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

#[derive(Clone, Debug)]
pub struct ContentLoader {
    client: MetaObjectClient,
}

impl ContentLoader {
    pub fn new(client: MetaObjectClient) -> Self {
        Self { client }
    }

    /// Loads the content described by `settings`.
    pub async fn load(&self, settings: &ExtensionSettings) -> Result<Vec<MetaObject>, ContentError> {
        let kind = settings.metaobject_type().ok_or(ContentError::MissingType)?;
        self.load_type(kind, &settings.handles()).await
    }

    /// Loads up to one page of `kind` MetaObjects, keeping only those matching `handles` when
    /// any are given.
    ///
    /// A handle matches an object whose lower-cased handle equals or contains it, or whose id
    /// contains it.
    #[instrument(skip(self))]
    pub async fn load_type(&self, kind: &str, handles: &[String]) -> Result<Vec<MetaObject>, ContentError> {
        let objects = self.client.list_by_type(kind, PAGE_SIZE).await.map_err(|e| {
            warn!(error = %e, "MetaObject fetch failed");
            ContentError::FetchFailed { kind: kind.to_string() }
        })?;

        if handles.is_empty() {
            if objects.is_empty() {
                return Err(ContentError::Empty { kind: kind.to_string() });
            }
            info!(count = objects.len(), "Loaded");
            return Ok(objects);
        }

        let wanted: Vec<String> = handles.iter().map(|h| h.trim().to_lowercase()).collect();
        let available: Vec<String> = objects.iter().filter_map(|o| o.handle.clone()).collect();
        let kept: Vec<MetaObject> = objects
            .into_iter()
            .filter(|object| {
                let handle = object.handle.as_deref().unwrap_or_default().to_lowercase();
                wanted
                    .iter()
                    .any(|h| handle == *h || handle.contains(h.as_str()) || object.id.contains(h.as_str()))
            })
            .collect();

        if kept.is_empty() {
            return Err(ContentError::NoMatchingHandles {
                handles: handles.to_vec(),
                available,
            });
        }
        info!(count = kept.len(), "Loaded");
        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockQueryClient;
    use crate::framework::FrameworkError;

    fn loader(mock: &MockQueryClient) -> ContentLoader {
        ContentLoader::new(MetaObjectClient::new(mock.client()))
    }

    fn objects() -> Vec<MetaObject> {
        vec![
            MetaObject::new("gid://shopify/Metaobject/1", "global_site_data", "Hero-Banner"),
            MetaObject::new("gid://shopify/Metaobject/2", "global_site_data", "footer-note"),
        ]
    }

    #[tokio::test]
    async fn test_missing_type() {
        let mock = MockQueryClient::new();
        let result = loader(&mock).load(&ExtensionSettings::default()).await;
        assert_eq!(result, Err(ContentError::MissingType));
        mock.verify();
    }

    #[tokio::test]
    async fn test_handles_match_case_insensitively_and_by_id() {
        let mut mock = MockQueryClient::new();
        mock.expect_metaobjects("global_site_data").return_ok(objects());
        mock.expect_metaobjects("global_site_data").return_ok(objects());

        let loader = loader(&mock);
        let kept = loader
            .load_type("global_site_data", &["HERO".to_string()])
            .await
            .unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].handle.as_deref(), Some("Hero-Banner"));

        let kept = loader
            .load_type("global_site_data", &["/2".to_string()])
            .await
            .unwrap();
        assert_eq!(kept[0].id, "gid://shopify/Metaobject/2");
        mock.verify();
    }

    #[tokio::test]
    async fn test_no_matching_handles_lists_available() {
        let mut mock = MockQueryClient::new();
        mock.expect_metaobjects("global_site_data").return_ok(objects());

        let err = loader(&mock)
            .load_type("global_site_data", &["promo".to_string()])
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "No MetaObjects found with configured handles \"promo\". Available handles: Hero-Banner, footer-note"
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_empty_type_and_fetch_failure() {
        let mut mock = MockQueryClient::new();
        mock.expect_metaobjects("banner").return_ok(Vec::new());
        mock.expect_metaobjects("banner").return_err(FrameworkError::ActorDropped);

        let loader = loader(&mock);
        assert_eq!(
            loader.load_type("banner", &[]).await,
            Err(ContentError::Empty { kind: "banner".into() })
        );
        assert_eq!(
            loader.load_type("banner", &[]).await,
            Err(ContentError::FetchFailed { kind: "banner".into() })
        );
        mock.verify();
    }
}
