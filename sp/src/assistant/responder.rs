//! Responder trait definition

use async_trait::async_trait;

/// Turns a free-text prompt into a reply
///
/// Implementations never fail: transport and parse errors are rendered
/// into the returned text so the chat always shows something.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Resolve a reply for `prompt`
    async fn reply(&self, prompt: &str) -> String;

    /// Short strategy name for logs and the REPL banner
    fn name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::debug;

    /// Mock responder for unit tests
    pub struct MockResponder {
        replies: Vec<String>,
        call_count: AtomicUsize,
        prompts: Mutex<Vec<String>>,
    }

    impl MockResponder {
        pub fn new(replies: Vec<&str>) -> Self {
            debug!(reply_count = %replies.len(), "MockResponder::new: called");
            Self {
                replies: replies.into_iter().map(String::from).collect(),
                call_count: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl Responder for MockResponder {
        async fn reply(&self, prompt: &str) -> String {
            debug!("MockResponder::reply: called");
            let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut prompts) = self.prompts.lock() {
                prompts.push(prompt.to_string());
            }
            self.replies.get(idx).cloned().unwrap_or_default()
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_returns_replies_in_order() {
            let responder = MockResponder::new(vec!["un", "deux"]);

            assert_eq!(responder.reply("a").await, "un");
            assert_eq!(responder.reply("b").await, "deux");
            assert_eq!(responder.reply("c").await, "");
            assert_eq!(responder.call_count(), 3);
            assert_eq!(responder.prompts(), vec!["a", "b", "c"]);
        }
    }
}
