/*
[INPUT]:  API credentials, client configuration and Options
[OUTPUT]: Signed API calls returning full envelopes or slim payloads
[POS]:    HTTP layer - client facade over signer, dispatcher and envelope
[UPDATE]: When adding connection options or changing client behavior
*/

use std::fmt;
use std::time::Duration;

use reqwest::Url;
use serde_json::Value;
use tracing::trace;

use super::dispatcher::Dispatcher;
use super::error::{IssuuError, Result};
use super::signature::{RequestSigner, SignedQuery};
use super::transport::{HttpTransport, Transport};
use crate::types::{Envelope, Options, ParamValue, PostData};

/// Base URL for the Issuu API
pub const DEFAULT_ENDPOINT: &str = "http://api.issuu.com/1_0";

const DEFAULT_USER_AGENT: &str = concat!("issuu-adapter/", env!("CARGO_PKG_VERSION"));

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// API key and shared secret, fixed for the life of a client
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub(crate) api_key: String,
    pub(crate) secret_key: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Result of a `get<Field>` / `has<Field>` accessor call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    /// Field value, `None` if the field is not declared
    Get(Option<ParamValue>),
    /// Whether the field is declared
    Has(bool),
}

/// Main HTTP client for the Issuu API
#[derive(Debug)]
pub struct IssuuClient {
    signer: RequestSigner,
    dispatcher: Dispatcher,
    options: Options,
}

impl IssuuClient {
    /// Create a new client with default configuration
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        Self::with_config(Credentials::new(api_key, secret_key), ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::with_config(&config)?;
        Self::with_transport(credentials, &config.endpoint, transport)
    }

    /// Create a client that sends through the given transport
    pub fn with_transport(
        credentials: Credentials,
        endpoint: &str,
        transport: impl Transport + 'static,
    ) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        Ok(Self {
            signer: RequestSigner::new(credentials),
            dispatcher: Dispatcher::new(endpoint, Box::new(transport)),
            options: Options::default(),
        })
    }

    pub fn credentials(&self) -> &Credentials {
        self.signer.credentials()
    }

    pub fn endpoint(&self) -> &Url {
        self.dispatcher.endpoint()
    }

    /// Replace the option set used by every following request
    pub fn set_options(&mut self, options: Options) {
        self.options = options;
    }

    /// Replace the option set from name/value pairs
    pub fn set_options_from<I, K, V>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<ParamValue>,
    {
        self.options = Options::new(pairs)?;
        Ok(())
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Signature and query the next request would carry
    pub fn signed_query(&self, post_data: Option<&PostData>) -> SignedQuery {
        self.signer.signed_query(&self.options, post_data)
    }

    /// Send a request with the current options.
    ///
    /// Without post data this is a GET with the signed query in the URL; with
    /// post data it is a POST carrying the signed query as form body.
    pub async fn request(&self, post_data: Option<&PostData>) -> Result<Value> {
        self.execute(&self.options, post_data).await
    }

    pub(crate) async fn execute(&self, options: &Options, post_data: Option<&PostData>) -> Result<Value> {
        let signed = self.signer.signed_query(options, post_data);
        trace!(
            action = options.action(),
            query = %redact_signature(&signed),
            "signed issuu query"
        );

        let body = self
            .dispatcher
            .dispatch(&signed.query, post_data.is_some())
            .await?;
        let response: Value = serde_json::from_str(&body)
            .map_err(|e| IssuuError::MalformedResponse(format!("response is not JSON: {e}")))?;

        if options.is_full_response() {
            return Ok(response);
        }

        Envelope::from_value(response)?.into_payload()
    }

    /// Resolve a `get<Field>` or `has<Field>` accessor against the options.
    ///
    /// `getPageSize` reads `pageSize`, `hasOrgDocName` checks `orgDocName`.
    pub fn accessor(&self, method: &str) -> Result<Accessor> {
        let unknown = || IssuuError::UnknownMethod(method.to_string());
        let (prefix, rest) = match (method.get(..3), method.get(3..)) {
            (Some(prefix), Some(rest)) if !rest.is_empty() => (prefix, rest),
            _ => return Err(unknown()),
        };

        let mut chars = rest.chars();
        let key = match chars.next() {
            Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
            None => return Err(unknown()),
        };

        match prefix {
            "get" => Ok(Accessor::Get(self.options.field(&key))),
            "has" => Ok(Accessor::Has(self.options.has_field(&key))),
            _ => Err(unknown()),
        }
    }
}

fn redact_signature(signed: &SignedQuery) -> String {
    signed.query.replace(&signed.signature, "<signature>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn client() -> IssuuClient {
        let mut client = IssuuClient::new("K", "S").expect("client init");
        client
            .set_options_from([("access", ParamValue::from("public")), ("pageSize", 10.into())])
            .unwrap();
        client
    }

    #[test]
    fn test_default_endpoint() {
        let client = IssuuClient::new("K", "S").unwrap();
        assert_eq!(client.endpoint().as_str(), DEFAULT_ENDPOINT);
        assert!(client.options().is_full_response());
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let config = ClientConfig {
            endpoint: "not a url".to_string(),
            ..ClientConfig::default()
        };
        let err = IssuuClient::with_config(Credentials::new("K", "S"), config).unwrap_err();
        assert!(matches!(err, IssuuError::InvalidEndpoint(_)));
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let rendered = format!("{:?}", Credentials::new("K", "top-secret"));
        assert!(rendered.contains("K"));
        assert!(!rendered.contains("top-secret"));
    }

    #[test]
    fn test_invalid_options_keep_previous_set() {
        let mut client = client();
        assert!(client.set_options_from([("bogus", 1)]).is_err());
        assert_eq!(client.options().field("access"), Some(ParamValue::from("public")));
    }

    #[rstest]
    #[case("getAccess", Accessor::Get(Some(ParamValue::from("public"))))]
    #[case("getPageSize", Accessor::Get(Some(ParamValue::Integer(10))))]
    #[case("getOrgDocName", Accessor::Get(Some(ParamValue::from(""))))]
    #[case("getBogus", Accessor::Get(None))]
    #[case("hasResultOrder", Accessor::Has(true))]
    #[case("hasBogus", Accessor::Has(false))]
    fn test_accessor(#[case] method: &str, #[case] expected: Accessor) {
        assert_eq!(client().accessor(method).unwrap(), expected);
    }

    #[rstest]
    #[case("get")]
    #[case("has")]
    #[case("setAccess")]
    #[case("fetchAccess")]
    #[case("")]
    fn test_unknown_accessor(#[case] method: &str) {
        match client().accessor(method) {
            Err(IssuuError::UnknownMethod(name)) => assert_eq!(name, method),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_signed_query_uses_current_options() {
        let client = client();
        let signed = client.signed_query(None);
        assert!(signed.query.starts_with("access=public&apiKey=K&pageSize=10&signature="));
    }

    #[test]
    fn test_redact_signature() {
        let signed = client().signed_query(None);
        let redacted = redact_signature(&signed);
        assert!(!redacted.contains(&signed.signature));
        assert!(redacted.ends_with("signature=<signature>"));
    }
}
