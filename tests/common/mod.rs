//! Shared test helpers: canned switch pages and a scripted transport

#![allow(dead_code)]

use async_trait::async_trait;
use secrecy::SecretString;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tplink_exporter::error::{ExporterError, Result};
use tplink_exporter::tplink::{SessionClient, SwitchTransport};

pub const HOST: &str = "switch.test";
pub const USERNAME: &str = "admin";

/// Logon page as served after a successful login or once the session expired
pub const LOGON_PAGE: &str = "<script>\nvar logonInfo = new Array(\n0,\n0,0);\nvar g_Lan = 0;\n</script>";

/// Logon page carrying a non-zero logon error code
pub const LOGON_REJECTED_PAGE: &str =
    "<script>\nvar logonInfo = new Array(\n1,\n0,0);\nvar g_Lan = 0;\n</script>";

pub const STATS_PAGE: &str = "<script>
var max_port_num = 3;
var all_info = {
state:[1,1,0],
link_status:[6,6,0],
pkts:[100,0,50,2,0,0,0,0,9,9,9,9]
};
var tip = \"\";
</script>";

pub fn stats_page(state: &[i64], link_status: &[i64], pkts: &[u64]) -> String {
    fn join<T: ToString>(values: &[T]) -> String {
        values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
    format!(
        "<script>\nvar all_info = {{\nstate:[{}],\nlink_status:[{}],\npkts:[{}]\n}};\n</script>",
        join(state),
        join(link_status),
        join(pkts)
    )
}

pub fn connection_refused() -> ExporterError {
    ExporterError::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection refused",
    ))
}

/// Transport that replays queued responses and counts calls
#[derive(Default)]
pub struct ScriptedTransport {
    logons: Mutex<VecDeque<Result<String>>>,
    pages: Mutex<VecDeque<Result<String>>>,
    logon_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logon_response(self, response: Result<String>) -> Self {
        self.logons.lock().unwrap().push_back(response);
        self
    }

    pub fn logon_ok(self) -> Self {
        self.logon_response(Ok(LOGON_PAGE.to_string()))
    }

    pub fn page(self, response: Result<String>) -> Self {
        self.pages.lock().unwrap().push_back(response);
        self
    }

    pub fn stats(self) -> Self {
        self.page(Ok(STATS_PAGE.to_string()))
    }

    pub fn logon_calls(&self) -> usize {
        self.logon_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SwitchTransport for ScriptedTransport {
    async fn logon(&self, username: &str, password: &str) -> Result<String> {
        assert_eq!(username, USERNAME);
        assert_eq!(password, "secret");
        self.logon_calls.fetch_add(1, Ordering::SeqCst);
        self.logons
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(connection_refused()))
    }

    async fn fetch_port_statistics(&self) -> Result<String> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(connection_refused()))
    }
}

pub fn scripted_client(transport: ScriptedTransport) -> SessionClient<ScriptedTransport> {
    SessionClient::with_transport(HOST, USERNAME, SecretString::from("secret"), transport)
}
