//! Fakes shared by the unit tests.

use std::cell::RefCell;
use std::io;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::http::{Error, Transport};
use crate::logging::{self, Format, LogSettings};
use crate::secret::{SecretError, SecretProvider};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl Request {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A transport answering every request through `handler`, remembering
/// what was asked.
pub struct FakeTransport<F> {
    handler: F,
    requests: RefCell<Vec<Request>>,
}

impl<F> FakeTransport<F>
where
    F: Fn(&str, &[(&str, &str)]) -> Result<String, Error>,
{
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }
}

impl<F> Transport for FakeTransport<F>
where
    F: Fn(&str, &[(&str, &str)]) -> Result<String, Error>,
{
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, Error> {
        self.requests.borrow_mut().push(Request {
            url: url.to_owned(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });

        (self.handler)(url, query)
    }
}

pub struct FakeSecret(pub Option<&'static str>);

impl SecretProvider for FakeSecret {
    fn resolve(&self) -> Result<String, SecretError> {
        match self.0 {
            Some(token) => Ok(token.to_owned()),
            None => Err(SecretError::NoCommand),
        }
    }
}

/// An in-memory log sink.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Every line parsed as a JSON log record.
    pub fn records(&self) -> Vec<Value> {
        self.text()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    /// The first record with the given message.
    pub fn find(&self, message: &str) -> Option<Value> {
        self.records()
            .into_iter()
            .find(|record| record["fields"]["message"] == message)
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Runs `f` with every event down to debug level recorded as JSON.
pub fn capture<T>(f: impl FnOnce() -> T) -> (T, CapturedLogs) {
    let logs = CapturedLogs::default();
    let settings = LogSettings {
        level: LevelFilter::DEBUG,
        format: Format::Json,
    };

    let dispatch = logging::dispatch(&settings, logs.clone());
    let result = tracing::dispatcher::with_default(&dispatch, f);

    (result, logs)
}
