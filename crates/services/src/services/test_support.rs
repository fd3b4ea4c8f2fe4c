//! Scripted model endpoint for unit tests.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;

use super::llm_api::{CompletionRequest, LlmApiError, ModelEndpoint};

pub enum Reply {
    Text(String),
    Error(LlmApiError),
    /// Never answers within any reasonable timeout.
    Stall,
}

impl Reply {
    pub fn text(s: impl Into<String>) -> Self {
        Reply::Text(s.into())
    }
}

/// Replays `replies` in order and records every request it receives.
pub struct ScriptedEndpoint {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedEndpoint {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelEndpoint for ScriptedEndpoint {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmApiError> {
        self.requests.lock().unwrap().push(request);
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Error(e)) => Err(e),
            Some(Reply::Stall) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(LlmApiError::Timeout)
            }
            None => Err(LlmApiError::Transport("script exhausted".to_string())),
        }
    }
}

/// A page that satisfies every keyword rule for both markets.
pub const COMPLETE_PAGE: &str = r#"<html><head><title>Acme Dental | Austin</title></head><body>
<nav class="navbar sticky top-0">Acme</nav>
<section id="hero" class="min-h-screen">Smiles in Austin</section>
<section id="services">Our services: what we offer</section>
<section id="about">About us, who we are, why patients trust us</section>
<section id="testimonials">Testimonial: great review from a client</section>
<section id="contact">Contact us at our location and address, see the map</section>
<section id="hours">Business hours: open Mon-Sat</section>
<section id="booking">Book a consultation</section>
<div class="fixed bottom-0 md:hidden">Call | WhatsApp</div>
<footer>© Acme</footer>
</body></html>"#;
