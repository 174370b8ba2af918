/*
[INPUT]:  Endpoint URL, signed query string and call style
[OUTPUT]: Raw response body from the transport
[POS]:    HTTP layer - chooses GET or POST and hands off to the transport
[UPDATE]: When the wire placement of the signed query changes
*/

use reqwest::{Method, Url};
use tracing::debug;

use super::error::Result;
use super::transport::Transport;

/// A request ready for the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
}

impl PreparedRequest {
    /// GET with the query appended, or POST with the query as form body
    pub fn new(endpoint: &Url, query: &str, as_post: bool) -> Self {
        if as_post {
            return Self {
                method: Method::POST,
                url: endpoint.to_string(),
                body: Some(query.to_string()),
            };
        }

        let mut url = endpoint.clone();
        url.set_query((!query.is_empty()).then_some(query));
        Self {
            method: Method::GET,
            url: url.to_string(),
            body: None,
        }
    }
}

/// Sends signed queries to the fixed API endpoint
pub struct Dispatcher {
    endpoint: Url,
    transport: Box<dyn Transport>,
}

impl Dispatcher {
    pub fn new(endpoint: Url, transport: Box<dyn Transport>) -> Self {
        Self {
            endpoint,
            transport,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn dispatch(&self, query: &str, as_post: bool) -> Result<String> {
        let request = PreparedRequest::new(&self.endpoint, query, as_post);
        debug!(method = %request.method, endpoint = %self.endpoint, "dispatching issuu request");
        self.transport
            .send(request.method, &request.url, request.body)
            .await
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}
