//! OAuth 1.0a user-context request signing (HMAC-SHA1).

use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha1::Sha1;

/// RFC 3986 unreserved characters pass through; everything else is encoded.
const RFC3986: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Clone)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("access_token", &self.access_token)
            .finish_non_exhaustive()
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, RFC3986).to_string()
}

impl Credentials {
    /// `Authorization` header for a request with a fresh nonce and timestamp.
    pub fn authorization(&self, method: &str, url: &str, params: &[(String, String)]) -> String {
        let nonce = uuid::Uuid::new_v4().simple().to_string();
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
            .to_string();
        self.authorization_with(method, url, params, &nonce, &timestamp)
    }

    /// `url` must not carry a query string; query and body parameters go in
    /// `params`.
    pub fn authorization_with(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        nonce: &str,
        timestamp: &str,
    ) -> String {
        let mut oauth = vec![
            ("oauth_consumer_key", self.consumer_key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp),
            ("oauth_token", self.access_token.as_str()),
            ("oauth_version", "1.0"),
        ];

        let signature = self.signature(method, url, &oauth, params);
        oauth.push(("oauth_signature", signature.as_str()));

        let fields = oauth
            .iter()
            .map(|(key, value)| format!("{}=\"{}\"", encode(key), encode(value)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("OAuth {fields}")
    }

    fn signature(
        &self,
        method: &str,
        url: &str,
        oauth: &[(&str, &str)],
        params: &[(String, String)],
    ) -> String {
        let mut pairs: Vec<(String, String)> = oauth
            .iter()
            .map(|(k, v)| (encode(k), encode(v)))
            .chain(params.iter().map(|(k, v)| (encode(k), encode(v))))
            .collect();
        pairs.sort();

        let parameter_string = pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        let base = format!(
            "{}&{}&{}",
            method.to_ascii_uppercase(),
            encode(url),
            encode(&parameter_string)
        );
        let key = format!(
            "{}&{}",
            encode(&self.consumer_secret),
            encode(&self.access_token_secret)
        );

        let mut mac =
            Hmac::<Sha1>::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length");
        mac.update(base.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }
}
