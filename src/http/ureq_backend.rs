use std::error::Error as _;
use std::time::Duration;

use ureq::{Agent, AgentBuilder};

use super::{read_body, Error, Transport};

pub const USER_AGENT: &str = concat!("dduckdns/", env!("CARGO_PKG_VERSION"));

/// The blocking HTTP client used for every request made by the program.
pub struct Client {
    agent: Agent,
}

impl Client {
    /// Every request (connect, send and receive combined) is bounded by
    /// `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let agent = AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();

        Self { agent }
    }
}

impl Transport for Client {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, Error> {
        let request = query
            .iter()
            .fold(self.agent.get(url), |request, (param, value)| {
                request.query(param, value)
            });

        let transport_error = |reason: String| Error::Transport {
            url: url.into(),
            reason: reason.into(),
        };

        match request.call() {
            Ok(resp) => read_body(resp.into_reader()).map_err(|e| transport_error(e.to_string())),

            Err(ureq::Error::Status(code, resp)) => Err(Error::Status {
                url: url.into(),
                code,
                body: read_body(resp.into_reader())
                    .unwrap_or_default()
                    .trim()
                    .into(),
            }),

            // ureq's own Display for this includes the full URL, query and all.
            Err(ureq::Error::Transport(tp)) => Err(transport_error(describe(&tp))),
        }
    }
}

/// Kind, message and underlying cause of a transport failure, without the URL.
fn describe(tp: &ureq::Transport) -> String {
    let mut reason = tp.kind().to_string();

    if let Some(message) = tp.message() {
        reason += ": ";
        reason += message;
    }

    if let Some(source) = tp.source() {
        reason += ": ";
        reason += &source.to_string();
    }

    reason
}
