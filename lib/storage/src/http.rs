use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use skigraph_common::{CountQuery, StoreError, TripleStoreGateway, Update};
use sparesults::{QueryResultsFormat, QueryResultsParser, ReaderQueryResultsParserOutput};
use std::time::Duration;
use tracing::trace;

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_QUERY_ENDPOINT: &str = "http://localhost:7200/repositories/Ski-Tp3";
pub const DEFAULT_UPDATE_ENDPOINT: &str = "http://localhost:7200/repositories/Ski-Tp3/statements";

/// Holds the configuration of an [`HttpGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpGatewayConfig {
    /// The URL queries are sent to.
    pub query_endpoint: String,
    /// The URL updates are sent to.
    pub update_endpoint: String,
    /// The timeout of a single request.
    pub timeout: Duration,
}

impl Default for HttpGatewayConfig {
    fn default() -> Self {
        Self {
            query_endpoint: DEFAULT_QUERY_ENDPOINT.to_owned(),
            update_endpoint: DEFAULT_UPDATE_ENDPOINT.to_owned(),
            timeout: HTTP_TIMEOUT,
        }
    }
}

/// A gateway to a remote store speaking the [SPARQL 1.1 Protocol](https://www.w3.org/TR/sparql11-protocol/).
pub struct HttpGateway {
    client: Client,
    config: HttpGatewayConfig,
}

impl HttpGateway {
    pub fn new(config: HttpGatewayConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(StoreError::unavailable)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpGatewayConfig {
        &self.config
    }

    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, StoreError> {
        let response = request.send().await.map_err(StoreError::unavailable)?;
        let status = response.status();
        let body = response.bytes().await.map_err(StoreError::unavailable)?;
        if !status.is_success() {
            return Err(StoreError::Rejected {
                status: status.to_string(),
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl TripleStoreGateway for HttpGateway {
    async fn apply_rule(&self, update: &Update) -> Result<(), StoreError> {
        let update = update.to_string();
        trace!(endpoint = %self.config.update_endpoint, %update, "Sending update");
        let request = self
            .client
            .post(self.config.update_endpoint.as_str())
            .header(CONTENT_TYPE, "application/sparql-update")
            .body(update);
        self.send(request).await.map(|_| ())
    }

    async fn count_matches(&self, query: &CountQuery) -> Result<u64, StoreError> {
        let text = query.to_string();
        trace!(endpoint = %self.config.query_endpoint, query = %text, "Sending count query");
        let request = self
            .client
            .post(self.config.query_endpoint.as_str())
            .header(CONTENT_TYPE, "application/sparql-query")
            .header(ACCEPT, QueryResultsFormat::Json.media_type())
            .body(text);
        let body = self.send(request).await?;
        parse_count(query, &body)
    }
}

/// Reads the count of `query` from a SPARQL JSON results document.
fn parse_count(query: &CountQuery, body: &[u8]) -> Result<u64, StoreError> {
    let output = QueryResultsParser::from_format(QueryResultsFormat::Json)
        .for_reader(body)
        .map_err(|e| StoreError::InvalidCount(e.to_string()))?;
    let ReaderQueryResultsParserOutput::Solutions(mut solutions) = output else {
        return Err(StoreError::InvalidCount(
            "expected solutions, found a boolean".to_owned(),
        ));
    };
    let solution = solutions
        .next()
        .transpose()
        .map_err(|e| StoreError::InvalidCount(e.to_string()))?
        .ok_or_else(|| StoreError::InvalidCount("the count query returned no row".to_owned()))?;
    query.read_count(solution.get(query.row_count_variable()))
}
