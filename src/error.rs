//! Crate-level error types shared by the token manager, the variant decoder, and the API client.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// JSON failure annotated with the path of the offending field.
pub type PathError = serde_path_to_error::Error<serde_json::Error>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem (missing credentials, bad endpoints).
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, cancellation, deadline).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Malformed or type-mismatched JSON with no safe fallback.
	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// Token endpoint rejected the client-credentials exchange.
	#[error("Token endpoint rejected the credentials: {reason}.")]
	Authentication {
		/// Vendor-supplied error string (or a summary of the rejection).
		reason: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Resource API answered with a non-success status.
	#[error("API request failed with HTTP {status}: {message}.")]
	Api {
		/// HTTP status code.
		status: u16,
		/// Message extracted from the response envelope, or the raw body preview.
		message: String,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
}
impl Error {
	/// Returns `true` when the error came from the caller's cancellation signal.
	pub fn is_cancelled(&self) -> bool {
		matches!(self, Self::Transport(TransportError::Cancelled))
	}

	/// Returns `true` when the error came from an elapsed deadline.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Self::Transport(TransportError::TimedOut { .. }))
	}
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// A URL could not be parsed or joined.
	#[error("URL `{url}` is invalid.")]
	InvalidUrl {
		/// Offending URL or path.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},

	/// A credential component is empty.
	#[error("Credential `{field}` must not be empty.")]
	MissingCredential {
		/// Name of the missing component.
		field: &'static str,
	},
	/// Endpoints must use HTTPS.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// A request path resolved to a URL outside the configured API origin.
	#[error("Request URL `{url}` is outside the configured API origin.")]
	ForeignEndpoint {
		/// Resolved URL that was rejected.
		url: String,
	},
	/// API host does not map onto a known token endpoint.
	#[error("No token endpoint is known for API host `{host}`.")]
	UnknownEnvironment {
		/// Host of the configured API URL.
		host: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, cancellation).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {target}.")]
	Network {
		/// Endpoint family being called (`token endpoint` or `API`).
		target: &'static str,
		/// HTTP status code, when the failure happened after headers arrived.
		status: Option<u16>,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during an HTTP call.")]
	Io(#[from] std::io::Error),
	/// The caller's cancellation token fired before the call completed.
	#[error("The call was cancelled.")]
	Cancelled,
	/// The call did not complete before its deadline.
	#[error("The call exceeded its deadline.")]
	TimedOut {
		/// Deadline that elapsed, when set by the caller.
		limit: Option<StdDuration>,
	},
	/// The token endpoint answered with a status that is neither success nor a client error.
	#[error("Token endpoint returned unexpected HTTP {status}.")]
	UnexpectedStatus {
		/// HTTP status code.
		status: u16,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		target: &'static str,
		status: Option<u16>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { target, status, source: Box::new(src) }
	}
}

/// Failures raised while decoding JSON payloads.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Payload is not valid JSON or does not match the expected shape.
	#[error("Payload could not be decoded at `{}`.", .source.path())]
	Json {
		/// Structured parsing failure.
		#[source]
		source: PathError,
	},
	/// Payload carries trailing characters after a complete JSON document.
	#[error("Payload is not a single JSON document.")]
	Syntax(#[source] serde_json::Error),
	/// Payload has the wrong JSON shape (for example a string where an object was expected).
	#[error("Expected a JSON object{} but found {found}.", fmt_index(.index))]
	UnexpectedShape {
		/// Array position of the offending element, if inside an array.
		index: Option<usize>,
		/// JSON type that was found instead.
		found: &'static str,
	},
	/// A recognized discriminator carried fields of the wrong type.
	#[error("Variant `{tag}`{} could not be decoded at `{}`.", fmt_index(.index), .source.path())]
	Variant {
		/// Discriminator value that selected the variant.
		tag: String,
		/// Array position of the offending element, if inside an array.
		index: Option<usize>,
		/// Structured parsing failure.
		#[source]
		source: PathError,
	},
	/// A required field is missing or empty.
	#[error("Required field `{field}` is missing.")]
	MissingField {
		/// Field name as it appears on the wire.
		field: &'static str,
	},
	/// A numeric field does not fit the supported range.
	#[error("Field `{field}` is out of range.")]
	OutOfRange {
		/// Field name as it appears on the wire.
		field: &'static str,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	Serialize(#[source] serde_json::Error),
}
impl From<PathError> for DecodeError {
	fn from(source: PathError) -> Self {
		Self::Json { source }
	}
}

fn fmt_index(index: &Option<usize>) -> String {
	index.map(|i| format!(" at index {i}")).unwrap_or_default()
}
