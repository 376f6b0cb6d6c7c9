use std::env;
use std::time::Duration;

use aptitude_core::SubmissionPayload;
use aptitude_core::model::{CareerCatalog, Question, ScoredResult};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::Url;

use crate::repository::{CatalogGateway, GatewayError, ScoringGateway};

const QUESTIONS_PATH: &str = "aptitude-test/questions";
const CAREERS_PATH: &str = "careers";
const SUBMIT_PATH: &str = "aptitude-test/submit";

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl GatewayConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:5000";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// # Errors
    ///
    /// Returns `GatewayError::InvalidUrl` if `base_url` does not parse.
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        Ok(Self {
            base_url: Url::parse(base_url.trim())?,
            timeout: Self::DEFAULT_TIMEOUT,
        })
    }

    /// # Errors
    ///
    /// Returns `GatewayError::InvalidUrl` if `base_url` does not parse.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, GatewayError> {
        self.base_url = Url::parse(base_url.trim())?;
        Ok(self)
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `CAREER_API_URL` and `CAREER_API_TIMEOUT_SECS`, falling back to
    /// the local development backend.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::InvalidUrl` if `CAREER_API_URL` does not parse.
    pub fn from_env() -> Result<Self, GatewayError> {
        let base_url = env::var("CAREER_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_BASE_URL.into());
        let timeout = env::var("CAREER_API_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map_or(Self::DEFAULT_TIMEOUT, Duration::from_secs);

        Ok(Self::new(&base_url)?.with_timeout(timeout))
    }

    /// # Errors
    ///
    /// Returns `GatewayError::InvalidUrl` if the joined url does not parse.
    pub fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        let joined = format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path);
        Ok(Url::parse(&joined)?)
    }
}

/// Talks to the question bank and scorer over JSON/HTTP.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpGateway {
    /// # Errors
    ///
    /// Returns `GatewayError::Http` if the client cannot be built.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let url = self.config.endpoint(path)?;
        debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    if !response.status().is_success() {
        return Err(GatewayError::HttpStatus(response.status()));
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// The scorer must answer with an object carrying at least one section.
fn scored_result(body: Map<String, Value>) -> Result<ScoredResult, GatewayError> {
    let result: ScoredResult = serde_json::from_value(Value::Object(body))?;
    if result.is_empty() {
        return Err(GatewayError::EmptyResult);
    }
    Ok(result)
}

#[async_trait]
impl CatalogGateway for HttpGateway {
    async fn fetch_questions(&self) -> Result<Vec<Question>, GatewayError> {
        self.get_json(QUESTIONS_PATH).await
    }

    async fn fetch_careers(&self) -> Result<CareerCatalog, GatewayError> {
        self.get_json(CAREERS_PATH).await
    }
}

#[async_trait]
impl ScoringGateway for HttpGateway {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<ScoredResult, GatewayError> {
        let url = self.config.endpoint(SUBMIT_PATH)?;
        debug!("POST {url} ({} answers)", payload.len());
        let response = self.client.post(url).json(payload).send().await?;
        scored_result(decode(response).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aptitude_core::model::{AnswerMap, QuestionCatalog, QuestionId, UserId};
    use aptitude_core::build_payload;
    use mockito::Matcher;

    fn gateway(server: &mockito::Server) -> HttpGateway {
        HttpGateway::new(GatewayConfig::new(&server.url()).unwrap()).unwrap()
    }

    #[test]
    fn endpoint_tolerates_trailing_slash_and_prefix() {
        let config = GatewayConfig::new("http://localhost:5000/api/").unwrap();
        assert_eq!(
            config.endpoint(QUESTIONS_PATH).unwrap().as_str(),
            "http://localhost:5000/api/aptitude-test/questions"
        );

        let config = GatewayConfig::new("http://localhost:5000").unwrap();
        assert_eq!(
            config.endpoint(CAREERS_PATH).unwrap().as_str(),
            "http://localhost:5000/careers"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        assert!(matches!(
            GatewayConfig::new("not a url"),
            Err(GatewayError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn fetches_questions() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/aptitude-test/questions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"question_id": 1, "question": "2+2?", "options": ["3", "4"], "category": "numerical"}]"#,
            )
            .create_async()
            .await;

        let questions = gateway(&server).fetch_questions().await.unwrap();

        mock.assert_async().await;
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id(), &QuestionId::number(1));
    }

    #[tokio::test]
    async fn non_array_questions_body_is_a_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/aptitude-test/questions")
            .with_status(200)
            .with_body(r#"{"error": "db down"}"#)
            .create_async()
            .await;

        let err = gateway(&server).fetch_questions().await.unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[tokio::test]
    async fn server_error_maps_to_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/careers")
            .with_status(503)
            .create_async()
            .await;

        let err = gateway(&server).fetch_careers().await.unwrap_err();
        assert!(matches!(err, GatewayError::HttpStatus(status) if status.as_u16() == 503));
    }

    #[tokio::test]
    async fn submit_posts_payload_and_decodes_result() {
        let catalog = QuestionCatalog::new(vec![
            Question::new(10_i64, "A", vec!["x".into(), "y".into()], "verbal"),
            Question::new(20_i64, "B", vec!["x".into(), "y".into()], "verbal"),
        ])
        .unwrap();
        let mut answers = AnswerMap::new();
        answers.record(QuestionId::number(20), 0);
        answers.record(QuestionId::number(10), 1);
        let payload = build_payload(&answers, &catalog, UserId::new(1));

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/aptitude-test/submit")
            .match_body(Matcher::Json(serde_json::json!({
                "answers": [
                    {"question_id": 10, "user_answer": 1},
                    {"question_id": 20, "user_answer": 0}
                ],
                "user_id": 1
            })))
            .with_status(200)
            .with_body(
                r#"{"results": {"category_scores": {"verbal": {"percentage": 50.0}}},
                    "recommendations": [{"career_title": "Writer", "reasoning": "Words", "match_percentage": 72.4}]}"#,
            )
            .create_async()
            .await;

        let result = gateway(&server).submit(&payload).await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.category_scores().unwrap()["verbal"].percentage, 50.0);
        assert_eq!(result.recommendations().unwrap()[0].career_title, "Writer");
    }

    #[tokio::test]
    async fn submit_rejects_bodies_without_a_result() {
        let payload = SubmissionPayload {
            answers: Vec::new(),
            user_id: UserId::new(1),
        };
        let mut server = mockito::Server::new_async().await;
        let _error_body = server
            .mock("POST", "/aptitude-test/submit")
            .with_status(200)
            .with_body(r#"{"error": "scoring engine crashed"}"#)
            .create_async()
            .await;

        let err = gateway(&server).submit(&payload).await.unwrap_err();
        assert!(matches!(err, GatewayError::EmptyResult));

        server.reset();
        let _array_body = server
            .mock("POST", "/aptitude-test/submit")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let err = gateway(&server).submit(&payload).await.unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }
}
