mod ureq_backend;

use std::io::{self, Read};

use thiserror::Error;

pub use ureq_backend::Client;

/// Upper bound on how much of a response body is read into memory.
const MAX_BODY_LEN: u64 = 2 * 1024 * 1024;

/// A failure to get a usable response out of an HTTP endpoint.
///
/// Only the endpoint itself is recorded, never the query string, since the
/// query of an update request carries the account token.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("{url} returned HTTP {code}: {body:?}")]
    Status {
        url: Box<str>,
        code: u16,
        body: Box<str>,
    },

    #[error("unable to reach {url}: {reason}")]
    Transport { url: Box<str>, reason: Box<str> },
}

/// Anything able to perform a plain GET request and hand back the body.
///
/// A non-2xx status must be reported as [`Error::Status`].
pub trait Transport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, Error> {
        (**self).get(url, query)
    }
}

pub(crate) fn read_body(reader: impl Read) -> Result<String, io::Error> {
    read_limited(reader, MAX_BODY_LEN)
}

fn read_limited(reader: impl Read, limit: u64) -> Result<String, io::Error> {
    let mut vec = Vec::with_capacity(1024);
    reader.take(limit + 1).read_to_end(&mut vec)?;

    if vec.len() as u64 > limit {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("response too large (over {} bytes)", limit),
        ));
    }

    String::from_utf8(vec).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
