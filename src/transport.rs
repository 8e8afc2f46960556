use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;

use crate::error::ClientError;

// Basic-auth credentials, supplied by the caller on every call. The client
// never caches a session or token.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Blocking HTTP access to the vendor. Schema documents are fetched without
/// authentication, endpoint calls carry basic auth.
pub trait Transport {
    fn get(&self, url: &str, auth: Option<&Credentials>) -> Result<Vec<u8>, ClientError>;

    fn post(
        &self,
        url: &str,
        auth: Option<&Credentials>,
        body: Vec<u8>,
    ) -> Result<Vec<u8>, ClientError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Use a preconfigured client to control timeouts, proxies or TLS.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn execute(
        &self,
        request: RequestBuilder,
        auth: Option<&Credentials>,
    ) -> Result<Vec<u8>, ClientError> {
        let request = match auth {
            Some(credentials) => {
                request.basic_auth(&credentials.username, Some(&credentials.password))
            }
            None => request,
        };

        let response = request
            .send()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(body.to_vec())
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, auth: Option<&Credentials>) -> Result<Vec<u8>, ClientError> {
        self.execute(self.client.get(url), auth)
    }

    fn post(
        &self,
        url: &str,
        auth: Option<&Credentials>,
        body: Vec<u8>,
    ) -> Result<Vec<u8>, ClientError> {
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/xml")
            .body(body);
        self.execute(request, auth)
    }
}
