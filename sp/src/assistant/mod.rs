//! Model query adapter
//!
//! Answers free-text prompts through one of three strategies, picked once at
//! startup: a backend relay, the provider API, or canned offline replies.

use std::sync::Arc;

use tracing::debug;

mod error;
mod gemini;
mod offline;
mod proxy;
pub mod responder;

pub use error::AssistantError;
pub use gemini::GeminiResponder;
pub use offline::{OfflineResponder, canned_reply};
pub use proxy::ProxyResponder;
pub use responder::Responder;

use crate::config::{AssistantConfig, Transport};

/// Create the responder selected by the configuration and environment
///
/// Proxy URL wins over API key; with neither, replies are canned.
pub fn create_responder(config: &AssistantConfig) -> Result<Arc<dyn Responder>, AssistantError> {
    create_responder_for(config, config.transport())
}

/// Create a responder for an already-resolved transport
pub fn create_responder_for(
    config: &AssistantConfig,
    transport: Transport,
) -> Result<Arc<dyn Responder>, AssistantError> {
    match transport {
        Transport::Proxy { url } => {
            debug!(%url, "create_responder_for: creating proxy responder");
            Ok(Arc::new(ProxyResponder::new(url, config)?))
        }
        Transport::Direct { api_key } => {
            debug!(model = %config.model, "create_responder_for: creating Gemini responder");
            Ok(Arc::new(GeminiResponder::from_config(config, api_key)?))
        }
        Transport::Offline => {
            debug!("create_responder_for: no transport configured, using offline replies");
            Ok(Arc::new(OfflineResponder::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_for_each_transport() {
        let config = AssistantConfig::default();

        let proxy = create_responder_for(
            &config,
            Transport::Proxy {
                url: "http://localhost:5178/chat".to_string(),
            },
        )
        .unwrap();
        assert_eq!(proxy.name(), "proxy");

        let direct = create_responder_for(
            &config,
            Transport::Direct {
                api_key: "k".to_string(),
            },
        )
        .unwrap();
        assert_eq!(direct.name(), "gemini");

        let offline = create_responder_for(&config, Transport::Offline).unwrap();
        assert_eq!(offline.name(), "offline");
    }
}
