//! Concrete LLM provider implementations
//!
//! This module contains implementations of the LLMProvider trait and the
//! factory that picks one from configuration.

pub mod mock;

pub use mock::MockProvider;

use crate::{LLMError, LLMProvider, Result};
use agent_utils::ProviderSettings;
use std::sync::Arc;
use tracing::debug;

/// Build the provider described by `settings`
///
/// Only the `mock` kind ships with this crate; hosted backends implement
/// [`LLMProvider`] in their own crates.
pub fn from_settings(settings: &ProviderSettings) -> Result<Arc<dyn LLMProvider>> {
    match settings.kind.trim().to_ascii_lowercase().as_str() {
        "mock" => {
            let mut provider = MockProvider::new();
            if let Some(model) = &settings.model {
                provider = provider.with_model(model.as_str());
            }
            if let Some(response) = &settings.default_response {
                provider = provider.with_default_response(response.as_str());
            }
            debug!(model = provider.model(), "Using mock LLM provider");
            Ok(Arc::new(provider))
        }
        other => Err(LLMError::ConfigurationError(format!(
            "Unknown provider kind '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_mock() {
        let settings = ProviderSettings {
            kind: "Mock".to_string(),
            model: Some("offline".to_string()),
            default_response: None,
        };
        let provider = from_settings(&settings).unwrap();
        assert_eq!(provider.name(), "mock");
        assert_eq!(provider.model(), "offline");
    }

    #[tokio::test]
    async fn test_from_settings_applies_override() {
        let settings = ProviderSettings {
            default_response: Some("canned".to_string()),
            ..ProviderSettings::default()
        };
        let provider = from_settings(&settings).unwrap();
        let response = provider
            .complete(crate::CompletionRequest::new(vec![crate::Message::user(
                "search",
            )]))
            .await
            .unwrap();
        assert_eq!(response.content, "canned");
    }

    #[test]
    fn test_from_settings_unknown_kind() {
        let settings = ProviderSettings {
            kind: "anthropic".to_string(),
            ..ProviderSettings::default()
        };
        let err = from_settings(&settings).err().unwrap();
        assert!(matches!(err, LLMError::ConfigurationError(_)));
        assert!(err.to_string().contains("anthropic"));
    }
}
