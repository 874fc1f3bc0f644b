//! Session context for a client run
//!
//! A [`Session`] owns the API handle, the carrier list and the chat
//! transcript. Nothing is kept in globals; a new session starts empty.

use std::sync::Arc;

use crate::client::FlightApi;
use crate::error::{Result, ValidationError};
use crate::models::{
    AirlineDelayStats, AvailableFeatures, ChatContext, ChatMessage, ChatRequest, RouteOverview,
    CHAT_ERROR_REPLY,
};
use crate::observability::StructuredLogger;
use crate::orchestrator::{run_prediction, PredictionOutcome};
use crate::route::{default_carriers, search_route, FetchMode, RouteReport};
use crate::search::{ensure_distinct, normalize_code, SearchForm};

/// Number of transcript messages sent along with a chat request
pub const CHAT_HISTORY_WINDOW: usize = 5;

/// Portal label reported to the chat assistant when none was set
pub const DEFAULT_PORTAL: &str = "passenger";

/// Per-run client context
pub struct Session {
    api: Arc<dyn FlightApi>,
    logger: StructuredLogger,
    carriers: Vec<String>,
    fetch_mode: FetchMode,
    portal: String,
    transcript: Vec<ChatMessage>,
}

impl Session {
    pub fn new(api: Arc<dyn FlightApi>, logger: StructuredLogger) -> Self {
        Self {
            api,
            logger,
            carriers: default_carriers(),
            fetch_mode: FetchMode::default(),
            portal: DEFAULT_PORTAL.to_string(),
            transcript: Vec::new(),
        }
    }

    /// Replace the carrier list used for route summaries
    pub fn with_carriers(mut self, carriers: Vec<String>) -> Self {
        self.carriers = carriers;
        self
    }

    pub fn with_fetch_mode(mut self, mode: FetchMode) -> Self {
        self.fetch_mode = mode;
        self
    }

    pub fn with_portal(mut self, portal: impl Into<String>) -> Self {
        self.portal = portal.into();
        self
    }

    pub fn carriers(&self) -> &[String] {
        &self.carriers
    }

    pub fn fetch_mode(&self) -> FetchMode {
        self.fetch_mode
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Predict a delay and load the route's flights
    pub async fn predict(&self, form: SearchForm) -> Result<PredictionOutcome> {
        run_prediction(self.api.as_ref(), &self.logger, form).await
    }

    /// Summarize a route across the configured carriers
    pub async fn route_report(
        &self,
        origin: Option<String>,
        destination: Option<String>,
    ) -> Result<RouteReport> {
        let report = search_route(
            self.api.as_ref(),
            &self.logger,
            origin,
            destination,
            &self.carriers,
            self.fetch_mode,
        )
        .await?;
        Ok(report)
    }

    /// Service-side overview of a route across every airline
    pub async fn route_overview(
        &self,
        origin: Option<String>,
        destination: Option<String>,
    ) -> Result<RouteOverview> {
        let origin = normalize_code(origin, "origin")?;
        let destination = normalize_code(destination, "destination")?;
        ensure_distinct(&origin, &destination)?;
        Ok(self.api.route_overview(&origin, &destination).await?)
    }

    /// Delay statistics and ranking for one airline
    pub async fn airline_stats(&self, airline: Option<String>) -> Result<AirlineDelayStats> {
        let airline = normalize_code(airline, "airline")?;
        Ok(self.api.airline_delay_stats(&airline).await?)
    }

    /// Send a message to the chat assistant and return its reply
    ///
    /// When the call fails the error is returned and a bot apology is
    /// recorded after the user message, so later history windows see it.
    pub async fn send_chat(&mut self, text: &str) -> Result<ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::MissingField("message").into());
        }

        self.transcript.push(ChatMessage::user(text));
        let request = self.chat_request(text);
        let history_len = request.context.conversation_history.len();

        let reply = match self.api.chat(&request).await {
            Ok(reply) => reply,
            Err(err) => {
                self.logger.log_chat(&self.portal, history_len, false);
                self.transcript.push(ChatMessage::bot(CHAT_ERROR_REPLY));
                return Err(err.into());
            }
        };
        self.logger.log_chat(&self.portal, history_len, true);

        let message = ChatMessage::bot(reply.text());
        self.transcript.push(message.clone());
        Ok(message)
    }

    fn chat_request(&self, text: &str) -> ChatRequest {
        let start = self.transcript.len().saturating_sub(CHAT_HISTORY_WINDOW);
        ChatRequest {
            message: text.to_string(),
            context: ChatContext {
                current_portal: self.portal.clone(),
                conversation_history: self.transcript[start..].to_vec(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                available_features: AvailableFeatures::default(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::mock::MockApi;
    use crate::models::MessageKind;

    fn session(api: Arc<MockApi>) -> Session {
        Session::new(api, StructuredLogger::new("mock://"))
    }

    #[tokio::test]
    async fn test_chat_reply_appended_to_transcript() {
        let api = Arc::new(MockApi::new());
        let mut session = session(api.clone());

        let reply = session.send_chat("  Will my flight be late?  ").await.unwrap();

        assert_eq!(reply.kind, MessageKind::Bot);
        assert_eq!(reply.text, "echo: Will my flight be late?");
        assert_eq!(session.transcript().len(), 2);

        let sent = api.last_chat().unwrap();
        assert_eq!(sent.context.current_portal, DEFAULT_PORTAL);
        assert_eq!(sent.context.conversation_history.len(), 1);
        assert!(sent.context.available_features.route_analysis);
    }

    #[tokio::test]
    async fn test_chat_history_window() {
        let api = Arc::new(MockApi::new());
        let mut session = session(api.clone()).with_portal("analytics");

        for i in 0..4 {
            session.send_chat(&format!("message {i}")).await.unwrap();
        }

        let sent = api.last_chat().unwrap();
        let history = &sent.context.conversation_history;
        assert_eq!(history.len(), CHAT_HISTORY_WINDOW);
        assert_eq!(history.last().unwrap().text, "message 3");
        assert_eq!(history.first().unwrap().text, "message 1");
        assert_eq!(sent.context.current_portal, "analytics");
    }

    #[tokio::test]
    async fn test_empty_chat_rejected_without_call() {
        let api = Arc::new(MockApi::new());
        let mut session = session(api.clone());

        let err = session.send_chat("   ").await.unwrap_err();

        assert!(matches!(
            err,
            SearchError::Validation(ValidationError::MissingField("message"))
        ));
        assert!(api.calls().is_empty());
        assert!(session.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_failed_chat_records_error_reply() {
        let api = Arc::new(MockApi::new().failing_chat());
        let mut session = session(api.clone());

        assert!(session.send_chat("hello").await.is_err());
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[0].kind, MessageKind::User);
        assert_eq!(session.transcript()[1].kind, MessageKind::Bot);
        assert_eq!(session.transcript()[1].text, CHAT_ERROR_REPLY);

        assert!(session.send_chat("still there?").await.is_err());
        let history = api.last_chat().unwrap().context.conversation_history;
        assert_eq!(history.len(), 3);
        assert_eq!(history[1].text, CHAT_ERROR_REPLY);
        assert_eq!(history[2].text, "still there?");
    }

    #[tokio::test]
    async fn test_route_report_uses_configured_carriers() {
        let api = Arc::new(MockApi::new());
        let session = session(api.clone())
            .with_carriers(vec!["UA".to_string(), "AA".to_string()])
            .with_fetch_mode(FetchMode::Concurrent);

        let report = session
            .route_report(Some("SFO".to_string()), Some("BOS".to_string()))
            .await
            .unwrap();

        assert_eq!(report.carriers, vec!["UA", "AA"]);
        assert_eq!(report.stats.unwrap().total_flights, 400);
        assert_eq!(api.route_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_airline_stats_requires_code() {
        let api = Arc::new(MockApi::new());
        let session = session(api.clone());

        assert!(session.airline_stats(None).await.is_err());
        let stats = session.airline_stats(Some("dl".to_string())).await.unwrap();
        assert_eq!(stats.total_flights, 200);
        assert_eq!(api.calls(), vec!["airline:DL".to_string()]);
    }

    #[tokio::test]
    async fn test_route_overview_validates_route() {
        let api = Arc::new(MockApi::new());
        let session = session(api.clone());

        assert!(session
            .route_overview(Some("MIA".to_string()), Some("MIA".to_string()))
            .await
            .is_err());
        assert!(api.calls().is_empty());

        let overview = session
            .route_overview(Some("MIA".to_string()), Some("ATL".to_string()))
            .await
            .unwrap();
        assert_eq!(overview.total_airlines, Some(4));
    }

    #[tokio::test]
    async fn test_predict_through_session() {
        let api = Arc::new(MockApi::new());
        let session = session(api.clone());

        let form = SearchForm {
            origin: Some("ATL".to_string()),
            destination: Some("ORD".to_string()),
            date: Some("2024-12-01".to_string()),
            time: Some("06:05".to_string()),
            airline: Some("WN".to_string()),
            scheduled_time: Some(125),
            distance: Some(606),
        };

        let outcome = session.predict(form).await.unwrap();
        assert_eq!(outcome.input.scheduled_departure, 605);
        assert_eq!(api.predict_count(), 1);
    }
}
