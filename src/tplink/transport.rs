//! HTTP transport to the switch web interface
//!
//! The switch keeps its login session in a cookie, so every [`HttpTransport`]
//! owns a `reqwest::Client` with its own cookie store. Two instances never share
//! a session.

use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

const LOGON_PATH: &str = "/logon.cgi";
const PORT_STATISTICS_PATH: &str = "/PortStatisticsRpm.htm";

/// Raw page exchanges with the switch
///
/// Implementations return response bodies untouched; interpreting them is the
/// session client's job.
#[async_trait]
pub trait SwitchTransport: Send + Sync {
    /// Submit the logon form and return the response body
    async fn logon(&self, username: &str, password: &str) -> Result<String>;

    /// Fetch the port statistics page and return its body
    async fn fetch_port_statistics(&self) -> Result<String>;
}

pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(host: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url(host),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Build the base URL, assuming plain HTTP when no scheme is given
fn base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}

#[async_trait]
impl SwitchTransport for HttpTransport {
    async fn logon(&self, username: &str, password: &str) -> Result<String> {
        let url = self.url(LOGON_PATH);
        debug!("Posting logon form to {}", url);

        let form = [
            ("username", username),
            ("password", password),
            ("logon", "Login"),
        ];
        let body = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(body)
    }

    async fn fetch_port_statistics(&self) -> Result<String> {
        let url = self.url(PORT_STATISTICS_PATH);
        debug!("Fetching {}", url);

        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(body)
    }
}
