/*
[INPUT]:  Credentials, Options and optional call-scoped PostData
[OUTPUT]: MD5 request signature and the canonical signed query string
[POS]:    HTTP layer - request signing and query canonicalization
[UPDATE]: When changing signing algorithm or canonicalization rules
*/

use std::collections::BTreeMap;

use md5::{Digest, Md5};
use url::form_urlencoded;

use super::client::Credentials;
use crate::types::{Options, ParamValue, PostData};

pub const API_KEY_PARAM: &str = "apiKey";
pub const SIGNATURE_PARAM: &str = "signature";

/// Keys containing this marker carry a positional prefix on the wire map
pub const WIRE_KEY_MARKER: char = '*';
/// Length of the `\0*\0` prefix dropped from marked keys
pub const WIRE_KEY_PREFIX_LEN: usize = 3;

/// Wire name of a parameter key.
///
/// Legacy callers hand over keys of the form `"\0*\0name"` (the layout of a
/// non-public field dumped into a map). Any key containing `*` loses its first
/// three characters; every other key is returned unchanged.
pub fn wire_key(key: &str) -> &str {
    if !key.contains(WIRE_KEY_MARKER) {
        return key;
    }
    key.char_indices()
        .nth(WIRE_KEY_PREFIX_LEN)
        .map_or("", |(index, _)| &key[index..])
}

/// Values that never reach the wire: empty text, integer zero and null.
///
/// Zero is dropped too, so `startIndex=0` or `pageSize=0` cannot be sent
/// explicitly. The remote signature check expects this.
pub fn is_omitted_value(value: &ParamValue) -> bool {
    match value {
        ParamValue::Null => true,
        ParamValue::Integer(n) => *n == 0,
        ParamValue::Text(text) => text.is_empty(),
    }
}

/// Sorted, filtered parameters built from options merged with post data.
///
/// Post data wins on key collisions. A caller-supplied `signature` is dropped:
/// that key is reserved for the computed digest.
pub fn canonical_params(options: &Options, post_data: Option<&PostData>) -> BTreeMap<String, String> {
    let options = options
        .wire_params()
        .map(|(key, value)| (key.to_string(), value));
    let post_data = post_data
        .into_iter()
        .flatten()
        .map(|(key, value)| (key.clone(), value.clone()));
    canonicalize(options.chain(post_data))
}

fn canonicalize<I>(params: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (String, ParamValue)>,
{
    let mut merged: BTreeMap<String, ParamValue> = BTreeMap::new();
    for (key, value) in params {
        merged.insert(wire_key(&key).to_string(), value);
    }
    merged.remove(SIGNATURE_PARAM);

    merged
        .into_iter()
        .filter(|(_, value)| !is_omitted_value(value))
        .map(|(key, value)| (key, value.to_string()))
        .collect()
}

/// Signature plus the encoded query it was issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedQuery {
    pub signature: String,
    pub query: String,
}

/// Signs requests with the shared secret
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Canonical parameters with the API key slotted in
    fn signing_params(&self, options: &Options, post_data: Option<&PostData>) -> BTreeMap<String, String> {
        let mut params = canonical_params(options, post_data);
        let api_key = ParamValue::from(self.credentials.api_key.as_str());
        if !is_omitted_value(&api_key) {
            params.insert(API_KEY_PARAM.to_string(), api_key.to_string());
        }
        params
    }

    /// Compute the request signature.
    ///
    /// Format: md5(secret + key1 + value1 + key2 + value2 ...) over the sorted
    /// canonical parameters including `apiKey`, as lowercase hex.
    pub fn signature(&self, options: &Options, post_data: Option<&PostData>) -> String {
        let params = self.signing_params(options, post_data);
        digest(&self.credentials.secret_key, &params)
    }

    /// Build the signed, form-encoded query for one request
    pub fn signed_query(&self, options: &Options, post_data: Option<&PostData>) -> SignedQuery {
        let mut params = self.signing_params(options, post_data);
        let signature = digest(&self.credentials.secret_key, &params);
        params.insert(SIGNATURE_PARAM.to_string(), signature.clone());

        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params.iter())
            .finish();

        SignedQuery { signature, query }
    }
}

fn digest(secret: &str, params: &BTreeMap<String, String>) -> String {
    let mut hasher = Md5::new();
    hasher.update(secret.as_bytes());
    for (key, value) in params {
        hasher.update(key.as_bytes());
        hasher.update(value.as_bytes());
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn signer(api_key: &str, secret: &str) -> RequestSigner {
        RequestSigner::new(Credentials::new(api_key, secret))
    }

    fn post(pairs: &[(&str, ParamValue)]) -> PostData {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_signature_concatenates_sorted_pairs() {
        let data = post(&[("b", 2.into()), ("a", 1.into())]);
        let signature = signer("K", "S").signature(&Options::default(), Some(&data));

        // md5("S" + "a1" + "apiKeyK" + "b2")
        assert_eq!(signature, "b0ec3e91c09d99bb48e89ad421a1a103");
    }

    #[test]
    fn test_signature_includes_options() {
        let options = Options::new([("action", "issuu.documents.list"), ("access", "public")]).unwrap();
        let signature = signer("key", "secret").signature(&options, None);

        // md5("secret" + "accesspublic" + "actionissuu.documents.list" + "apiKeykey")
        assert_eq!(signature, "a945a416373a6cec136035f488b23a91");
    }

    #[test]
    fn test_signed_query_layout() {
        let options = Options::new([("access", "public")]).unwrap();
        let signed = signer("K", "S").signed_query(&options, None);

        assert_eq!(
            signed.query,
            format!("access=public&apiKey=K&signature={}", signed.signature)
        );
        assert!(!signed.query.contains("startIndex"));
        assert!(!signed.query.contains("pageSize"));
        assert!(!signed.query.contains("responseType"));
    }

    #[test]
    fn test_signed_query_is_deterministic() {
        let options = Options::new([("access", "private"), ("pageSize", "10")]).unwrap();
        let data = post(&[("names", "a,b".into())]);
        let signer = signer("K", "S");

        let first = signer.signed_query(&options, Some(&data));
        let second = signer.signed_query(&options, Some(&data));
        assert_eq!(first, second);
    }

    #[test]
    fn test_option_order_does_not_matter() {
        let forward = Options::new([
            ("access", ParamValue::from("public")),
            ("resultOrder", ParamValue::from("desc")),
            ("pageSize", ParamValue::from(5)),
        ])
        .unwrap();
        let reverse = Options::new([
            ("pageSize", ParamValue::from(5)),
            ("resultOrder", ParamValue::from("desc")),
            ("access", ParamValue::from("public")),
        ])
        .unwrap();

        let signer = signer("K", "S");
        assert_eq!(signer.signed_query(&forward, None), signer.signed_query(&reverse, None));
    }

    #[test]
    fn test_post_data_overrides_options() {
        let options = Options::new([("access", "public")]).unwrap();
        let data = post(&[("access", "private".into())]);

        let params = canonical_params(&options, Some(&data));
        assert_eq!(params.get("access").map(String::as_str), Some("private"));
    }

    #[test]
    fn test_blank_post_data_drops_option() {
        let options = Options::new([("access", "public")]).unwrap();
        let data = post(&[("access", "".into())]);

        let params = canonical_params(&options, Some(&data));
        assert!(!params.contains_key("access"));
    }

    #[rstest]
    #[case(ParamValue::from(""))]
    #[case(ParamValue::from(0))]
    #[case(ParamValue::Null)]
    fn test_omitted_values_never_sent(#[case] value: ParamValue) {
        let data = post(&[("folderId", value)]);
        let signed = signer("K", "S").signed_query(&Options::default(), Some(&data));

        assert!(!signed.query.contains("folderId"));
        assert!(is_omitted_value(&data["folderId"]));
    }

    #[test]
    fn test_explicit_zero_option_is_dropped() {
        let options = Options::new([("startIndex", 0), ("pageSize", 0)]).unwrap();
        let params = canonical_params(&options, None);
        assert!(params.is_empty());
    }

    #[rstest]
    #[case("\0*\0access", "access")]
    #[case("ab*cdef", "cdef")]
    #[case("**", "")]
    #[case("pageSize", "pageSize")]
    fn test_wire_key(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(wire_key(key), expected);
    }

    #[test]
    fn test_marked_post_key_is_stripped() {
        let data = post(&[("\0*\0title", "Annual report".into())]);
        let signed = signer("K", "S").signed_query(&Options::default(), Some(&data));

        assert!(signed.query.starts_with("apiKey=K&signature="));
        assert!(signed.query.ends_with("&title=Annual+report"));
    }

    #[test]
    fn test_reserved_signature_key_is_not_signed() {
        let signer = signer("K", "S");
        let spoofed = post(&[("signature", "zzz".into()), ("a", "1".into())]);
        let plain = post(&[("a", "1".into())]);

        let signed = signer.signed_query(&Options::default(), Some(&spoofed));
        assert_eq!(signed.signature, signer.signature(&Options::default(), Some(&plain)));
        assert_eq!(signed, signer.signed_query(&Options::default(), Some(&plain)));
        assert!(!signed.query.contains("zzz"));
    }

    #[test]
    fn test_marked_signature_key_is_not_signed() {
        let spoofed = post(&[("\0*\0signature", "zzz".into())]);
        let params = canonical_params(&Options::default(), Some(&spoofed));
        assert!(params.is_empty());
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let data = post(&[("names", "a&b=c".into())]);
        let signed = signer("K", "S").signed_query(&Options::default(), Some(&data));
        assert!(signed.query.contains("names=a%26b%3Dc"));
    }
}
