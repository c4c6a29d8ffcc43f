// src/chat/dispatcher.rs

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::client::CompletionClient;
use super::message::ChatMessage;
use super::transcript::Transcript;
use crate::event::{AppEvent, Event};

/// What happened to a submit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing left after trimming; no entry, no request.
    Ignored,
    /// A request is already outstanding; no entry, no request.
    Busy,
    /// User entry appended and a completion task spawned.
    Dispatched,
}

/// Turns submitted text into transcript entries, one request at a time.
///
/// The completion runs on a spawned task and its result comes back through the
/// event channel as [`AppEvent::ReplyReady`], to be handed to
/// [`QueryDispatcher::complete`] on the UI loop.
pub struct QueryDispatcher {
    client: Arc<dyn CompletionClient>,
    system_prompt: Arc<str>,
    events: mpsc::UnboundedSender<Event>,
    in_flight: bool,
}

impl QueryDispatcher {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        system_prompt: impl Into<String>,
        events: mpsc::UnboundedSender<Event>,
    ) -> Self {
        Self {
            client,
            system_prompt: Arc::from(system_prompt.into()),
            events,
            in_flight: false,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn submit(&mut self, user_text: &str, transcript: &mut Transcript) -> SubmitOutcome {
        let query = user_text.trim();
        if query.is_empty() {
            return SubmitOutcome::Ignored;
        }
        if self.in_flight {
            debug!("submit while a request is outstanding, ignoring");
            return SubmitOutcome::Busy;
        }

        // The user's own text shows up even if the request fails.
        transcript.append(ChatMessage::new_user(query.to_string()));
        self.in_flight = true;

        let client = Arc::clone(&self.client);
        let system_prompt = Arc::clone(&self.system_prompt);
        let events = self.events.clone();
        let query = query.to_string();

        tokio::spawn(async move {
            let reply = AssertUnwindSafe(answer(client.as_ref(), &system_prompt, &query))
                .catch_unwind()
                .await
                .unwrap_or_else(|payload| {
                    let description = panic_description(payload.as_ref());
                    error!("completion task panicked: {}", description);
                    ChatMessage::new_system_error(description)
                });
            if events.send(Event::App(AppEvent::ReplyReady(reply))).is_err() {
                debug!("event loop gone, dropping reply");
            }
        });

        SubmitOutcome::Dispatched
    }

    /// Appends a posted reply and frees the slot for the next request.
    pub fn complete(&mut self, reply: ChatMessage, transcript: &mut Transcript) {
        self.in_flight = false;
        transcript.append(reply);
    }
}

/// Runs one stateless completion and converts the outcome into an entry.
pub async fn answer(client: &dyn CompletionClient, system_prompt: &str, query: &str) -> ChatMessage {
    match client.complete(system_prompt, query).await {
        Ok(text) => {
            info!("completion succeeded ({} chars)", text.len());
            ChatMessage::new_assistant(text)
        }
        Err(e) => {
            warn!("completion failed: {:#}", e);
            ChatMessage::new_system_error(format!("{:#}", e))
        }
    }
}

fn panic_description(payload: &(dyn std::any::Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("request task panicked: {}", detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Sender;
    use async_trait::async_trait;
    use color_eyre::eyre::eyre;
    use std::sync::Mutex;

    struct FakeClient {
        reply: Result<String, String>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl FakeClient {
        fn ok(text: &str) -> Arc<Self> {
            Arc::new(Self { reply: Ok(text.to_string()), calls: Mutex::new(Vec::new()) })
        }

        fn failing(description: &str) -> Arc<Self> {
            Arc::new(Self { reply: Err(description.to_string()), calls: Mutex::new(Vec::new()) })
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionClient for FakeClient {
        async fn complete(&self, system: &str, user: &str) -> color_eyre::Result<String> {
            self.calls.lock().unwrap().push((system.to_string(), user.to_string()));
            self.reply.clone().map_err(|e| eyre!(e))
        }
    }

    fn dispatcher(
        client: Arc<FakeClient>,
    ) -> (QueryDispatcher, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (QueryDispatcher::new(client, "system prompt", tx), rx)
    }

    async fn next_reply(rx: &mut mpsc::UnboundedReceiver<Event>) -> ChatMessage {
        match rx.recv().await {
            Some(Event::App(AppEvent::ReplyReady(msg))) => msg,
            other => panic!("expected a reply, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_blank_input_is_a_no_op() {
        let client = FakeClient::ok("unused");
        let (mut dispatcher, mut rx) = dispatcher(client.clone());
        let mut transcript = Transcript::new();

        for input in ["", "   ", "\t\n "] {
            assert_eq!(dispatcher.submit(input, &mut transcript), SubmitOutcome::Ignored);
        }

        assert!(transcript.is_empty());
        assert!(!dispatcher.is_in_flight());
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_success_appends_user_then_assistant() {
        let client = FakeClient::ok("Diwali is a festival of lights.");
        let (mut dispatcher, mut rx) = dispatcher(client.clone());
        let mut transcript = Transcript::new();

        let outcome = dispatcher.submit("  What is Diwali?  ", &mut transcript);
        assert_eq!(outcome, SubmitOutcome::Dispatched);
        assert_eq!(transcript.senders(), vec![Sender::User]);
        assert_eq!(transcript.messages()[0].text(), "What is Diwali?");

        let reply = next_reply(&mut rx).await;
        dispatcher.complete(reply, &mut transcript);

        assert_eq!(transcript.senders(), vec![Sender::User, Sender::Assistant]);
        assert_eq!(transcript.messages()[1].text(), "Diwali is a festival of lights.");
        assert!(!dispatcher.is_in_flight());
        assert_eq!(
            client.calls(),
            vec![("system prompt".to_string(), "What is Diwali?".to_string())]
        );
    }

    #[tokio::test]
    async fn test_failure_appends_system_error() {
        let (mut dispatcher, mut rx) = dispatcher(FakeClient::failing("timeout"));
        let mut transcript = Transcript::new();

        dispatcher.submit("Tell me about Pongal", &mut transcript);
        let reply = next_reply(&mut rx).await;
        dispatcher.complete(reply, &mut transcript);

        assert_eq!(transcript.senders(), vec![Sender::User, Sender::System]);
        assert_eq!(transcript.messages()[1].text(), "Error: timeout");
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_rejected() {
        let client = FakeClient::ok("answer");
        let (mut dispatcher, mut rx) = dispatcher(client.clone());
        let mut transcript = Transcript::new();

        assert_eq!(dispatcher.submit("first", &mut transcript), SubmitOutcome::Dispatched);
        assert_eq!(dispatcher.submit("second", &mut transcript), SubmitOutcome::Busy);
        assert_eq!(transcript.len(), 1);

        let reply = next_reply(&mut rx).await;
        dispatcher.complete(reply, &mut transcript);
        assert_eq!(dispatcher.submit("second", &mut transcript), SubmitOutcome::Dispatched);
        let reply = next_reply(&mut rx).await;
        dispatcher.complete(reply, &mut transcript);

        assert_eq!(
            transcript.senders(),
            vec![Sender::User, Sender::Assistant, Sender::User, Sender::Assistant]
        );
        let users: Vec<_> = client.calls().into_iter().map(|(_, user)| user).collect();
        assert_eq!(users, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_panicking_client_still_frees_the_slot() {
        struct Exploding;

        #[async_trait]
        impl CompletionClient for Exploding {
            async fn complete(&self, _: &str, _: &str) -> color_eyre::Result<String> {
                panic!("client blew up");
            }
        }

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut dispatcher = QueryDispatcher::new(Arc::new(Exploding), "sys", tx);
        let mut transcript = Transcript::new();

        assert_eq!(dispatcher.submit("q", &mut transcript), SubmitOutcome::Dispatched);
        let reply = tokio::time::timeout(std::time::Duration::from_secs(5), next_reply(&mut rx))
            .await
            .expect("a reply is posted even when the client panics");
        dispatcher.complete(reply, &mut transcript);

        assert!(!dispatcher.is_in_flight());
        assert_eq!(transcript.senders(), vec![Sender::User, Sender::System]);
        assert_eq!(
            transcript.messages()[1].text(),
            "Error: request task panicked: client blew up"
        );
        assert_eq!(dispatcher.submit("again", &mut transcript), SubmitOutcome::Dispatched);
    }

    #[tokio::test]
    async fn test_answer_keeps_error_context_chain() {
        struct Wrapped;

        #[async_trait]
        impl CompletionClient for Wrapped {
            async fn complete(&self, _: &str, _: &str) -> color_eyre::Result<String> {
                use color_eyre::eyre::WrapErr;
                Err(eyre!("connection refused")).wrap_err("request failed")
            }
        }

        let msg = answer(&Wrapped, "sys", "q").await;
        assert_eq!(msg.sender(), Sender::System);
        assert_eq!(msg.text(), "Error: request failed: connection refused");
    }
}
