//! TP-Link Easy Smart Switch Session Client
//!
//! The switch web interface (TL-SG108E and relatives) has no API. Port statistics
//! are scraped from an HTML page that is only served to a logged-in session.
//!
//! # Session Handling
//!
//! - **Login**: form POST to `/logon.cgi`; the session lives in a cookie
//! - **Expiry**: the switch drops sessions silently and answers with its logon page
//!   instead of the statistics page
//! - **Recovery**: one re-login and re-fetch per call, no retry loop
//!
//! The cached [`SessionState`] is only a hint. The response content decides whether
//! the session is still valid.
//!
//! # Example
//!
//! ```no_run
//! use secrecy::SecretString;
//! use std::time::Duration;
//! use tplink_exporter::tplink::SessionClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = SessionClient::new(
//!     "192.168.0.1",
//!     "admin",
//!     SecretString::from("secret"),
//!     Duration::from_secs(10),
//! )?;
//!
//! for (i, port) in client.get_port_stats().await?.iter().enumerate() {
//!     println!("port {}: state={} link={}", i + 1, port.state, port.link_status);
//! }
//! # Ok(())
//! # }
//! ```

use crate::config::SwitchConfig;
use crate::error::{ExporterError, Result};
use crate::tplink::parser;
use crate::tplink::transport::{HttpTransport, SwitchTransport};
use crate::tplink::types::{PortRecord, SessionState};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Marker the switch puts in its logon page when the logon error code is 0
///
/// A successful logon response carries it, and so does the logon page served in
/// place of the statistics page once the session has expired.
pub const LOGON_INFO_MARKER: &str = "var logonInfo = new Array(\n0,";

/// Whether a response body is the switch's logon page
pub fn is_logon_page(body: &str) -> bool {
    body.contains(LOGON_INFO_MARKER)
}

/// Client for one switch
///
/// # Thread Safety
///
/// The session state is held behind an async mutex for the whole
/// login/fetch/re-login sequence, so concurrent callers never race a login
/// against a fetch on the same cookie session.
pub struct SessionClient<T = HttpTransport> {
    host: String,
    username: String,
    password: SecretString,
    transport: T,
    session: Mutex<SessionState>,
}

impl SessionClient<HttpTransport> {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
        timeout: Duration,
    ) -> Result<Self> {
        let host = host.into();
        let transport = HttpTransport::new(&host, timeout)?;
        Ok(Self::with_transport(host, username, password, transport))
    }

    /// Build a client from validated configuration
    pub fn from_config(config: &SwitchConfig) -> Result<Self> {
        let password = config
            .password
            .clone()
            .ok_or_else(|| ExporterError::Config("switch password is not set".to_string()))?;

        Self::new(
            config.host.clone(),
            config.username.clone(),
            password,
            Duration::from_secs(config.request_timeout_seconds),
        )
    }
}

impl<T: SwitchTransport> SessionClient<T> {
    pub fn with_transport(
        host: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
        transport: T,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password,
            transport,
            session: Mutex::new(SessionState::Unauthenticated),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn session_state(&self) -> SessionState {
        *self.session.lock().await
    }

    /// Log in, replacing whatever session the client had
    pub async fn login(&self) -> Result<()> {
        let mut session = self.session.lock().await;
        self.login_locked(&mut session).await
    }

    async fn login_locked(&self, session: &mut SessionState) -> Result<()> {
        *session = SessionState::Unauthenticated;

        let body = self
            .transport
            .logon(&self.username, self.password.expose_secret())
            .await?;

        if is_logon_page(&body) {
            *session = SessionState::Authenticated;
            info!("Logged in to {} as {}", self.host, self.username);
            Ok(())
        } else {
            warn!("Switch {} rejected login for {}", self.host, self.username);
            Err(ExporterError::Auth {
                host: self.host.clone(),
                username: self.username.clone(),
            })
        }
    }

    /// Fetch current statistics for every port, logging in as needed
    ///
    /// If the switch answers with its logon page, the client logs in once more and
    /// fetches again. A second logon page is handed to the parser as is.
    pub async fn get_port_stats(&self) -> Result<Vec<PortRecord>> {
        let mut session = self.session.lock().await;

        if *session != SessionState::Authenticated {
            self.login_locked(&mut session).await?;
        }

        let mut body = self.transport.fetch_port_statistics().await?;

        if is_logon_page(&body) {
            warn!("Session on {} expired, logging in again", self.host);
            *session = SessionState::Unauthenticated;
            self.login_locked(&mut session).await?;

            body = self.transport.fetch_port_statistics().await?;
            if is_logon_page(&body) {
                *session = SessionState::Unauthenticated;
                warn!(
                    "Switch {} still served its logon page after re-login, parsing it anyway",
                    self.host
                );
            }
        }

        let ports = parser::parse_port_statistics(&body)?;
        debug!("Fetched statistics for {} ports from {}", ports.len(), self.host);

        Ok(ports)
    }
}
