//! The [`Fetch`] transport capability.
//!
//! The client never talks to the network directly. Every request goes through a [`Fetch`]
//! implementation, which by default is [`HttpFetch`]. Closures of the shape
//! `Fn(&str) -> Result<Response, FetchError>` implement [`Fetch`] too, which is handy for tests.

use std::{
	error::Error,
	fmt::{self, Display, Formatter},
};

/// A fetched HTTP response.
#[derive(Debug, Hash, Default, Clone, PartialEq, Eq)]
pub struct Response {
	/// The HTTP status code.
	pub status: u16,
	/// The raw response body.
	pub body: Vec<u8>,
}

impl Response {
	/// Creates a new [`Response`].
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Gets whether the status code is in the `2xx` range.
	#[inline] pub const fn is_success(&self) -> bool { self.status >= 200 && self.status < 300 }
}

/// An opaque transport failure.
#[derive(Debug)]
pub struct FetchError(Box<dyn Error + Send + Sync>);

impl FetchError {
	/// Wraps a transport error.
	pub fn new(error: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
		Self(error.into())
	}
}

impl Display for FetchError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

impl Error for FetchError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		self.0.source()
	}
}

impl From<reqwest::Error> for FetchError {
	fn from(error: reqwest::Error) -> Self {
		Self::new(error)
	}
}

/// Performs an HTTP `GET`.
pub trait Fetch: Send + Sync {
	/// Gets the given URL.
	///
	/// A non-`2xx` status is not an error at this level; only I/O failures are.
	fn fetch(&self, url: &str) -> Result<Response, FetchError>;
}

impl<F> Fetch for F
where F: Fn(&str) -> Result<Response, FetchError> + Send + Sync {
	#[inline] fn fetch(&self, url: &str) -> Result<Response, FetchError> { self(url) }
}

/// [`Fetch`] over a blocking [`reqwest`] client.
///
/// Like [`reqwest::blocking::Client`], it must not be created or used inside an async runtime.
#[derive(Debug, Clone, Default)]
pub struct HttpFetch(reqwest::blocking::Client);

impl From<reqwest::blocking::Client> for HttpFetch {
	#[inline] fn from(client: reqwest::blocking::Client) -> Self { Self(client) }
}

impl Fetch for HttpFetch {
	fn fetch(&self, url: &str) -> Result<Response, FetchError> {
		let response = self.0.get(url).send()?;
		let status = response.status().as_u16();
		let body = response.bytes()?.to_vec();
		Ok(Response { status, body })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_closure_fetch() {
		let fetch = |url: &str| -> Result<Response, FetchError> {
			Ok(Response::new(200, url.as_bytes()))
		};
		let response = Fetch::fetch(&fetch, "http://localhost/").unwrap();
		assert!(response.is_success());
		assert_eq!(response.body, b"http://localhost/");
	}

	#[test]
	fn test_is_success() {
		assert!(Response::new(204, Vec::new()).is_success());
		assert!(!Response::new(302, Vec::new()).is_success());
		assert!(!Response::new(500, Vec::new()).is_success());
	}
}
