use std::fmt;
use thiserror::Error;

/// ArangoDB error numbers the graph client knows how to interpret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ErrorCode {
    // General errors
    NoError = 0,
    Failed = 1,
    Internal = 4,
    IllegalOption = 7,
    NotImplemented = 9,
    BadParameter = 10,
    SerializationError = 40,

    // HTTP errors
    HttpBadParameter = 400,
    HttpUnauthorized = 401,
    HttpForbidden = 403,
    HttpNotFound = 404,
    HttpMethodNotSupported = 405,
    HttpConflict = 409,
    HttpPreconditionFailed = 412,
    HttpInternalServerError = 500,
    HttpServiceUnavailable = 503,

    // ArangoDB errors
    ArangoConflict = 1200,
    ArangoDocumentNotFound = 1202,
    ArangoDataSourceNotFound = 1203,
    ArangoDocumentHandleBad = 1205,
    ArangoDocumentKeyBad = 1221,
    ArangoUniqueConstraintViolated = 1210,
    ArangoDuplicateName = 1207,
    ArangoIllegalName = 1208,

    // Graph errors
    GraphInvalidGraph = 1901,
    GraphCouldNotCreateGraph = 1902,
    GraphInvalidVertex = 1903,
    GraphCouldNotCreateVertex = 1904,
    GraphCouldNotChangeVertex = 1905,
    GraphInvalidEdge = 1906,
    GraphCouldNotCreateEdge = 1907,
    GraphCouldNotChangeEdge = 1908,
    GraphNotFound = 1924,
    GraphDuplicate = 1925,

    /// Any number this client does not model explicitly
    Unknown = u32::MAX,
}

impl ErrorCode {
    pub fn as_u32(&self) -> u32 {
        *self as u32
    }

    pub fn from_u32(value: u32) -> Self {
        match value {
            0 => ErrorCode::NoError,
            1 => ErrorCode::Failed,
            4 => ErrorCode::Internal,
            7 => ErrorCode::IllegalOption,
            9 => ErrorCode::NotImplemented,
            10 => ErrorCode::BadParameter,
            40 => ErrorCode::SerializationError,
            400 => ErrorCode::HttpBadParameter,
            401 => ErrorCode::HttpUnauthorized,
            403 => ErrorCode::HttpForbidden,
            404 => ErrorCode::HttpNotFound,
            405 => ErrorCode::HttpMethodNotSupported,
            409 => ErrorCode::HttpConflict,
            412 => ErrorCode::HttpPreconditionFailed,
            500 => ErrorCode::HttpInternalServerError,
            503 => ErrorCode::HttpServiceUnavailable,
            1200 => ErrorCode::ArangoConflict,
            1202 => ErrorCode::ArangoDocumentNotFound,
            1203 => ErrorCode::ArangoDataSourceNotFound,
            1205 => ErrorCode::ArangoDocumentHandleBad,
            1207 => ErrorCode::ArangoDuplicateName,
            1208 => ErrorCode::ArangoIllegalName,
            1210 => ErrorCode::ArangoUniqueConstraintViolated,
            1221 => ErrorCode::ArangoDocumentKeyBad,
            1901 => ErrorCode::GraphInvalidGraph,
            1902 => ErrorCode::GraphCouldNotCreateGraph,
            1903 => ErrorCode::GraphInvalidVertex,
            1904 => ErrorCode::GraphCouldNotCreateVertex,
            1905 => ErrorCode::GraphCouldNotChangeVertex,
            1906 => ErrorCode::GraphInvalidEdge,
            1907 => ErrorCode::GraphCouldNotCreateEdge,
            1908 => ErrorCode::GraphCouldNotChangeEdge,
            1924 => ErrorCode::GraphNotFound,
            1925 => ErrorCode::GraphDuplicate,
            _ => ErrorCode::Unknown,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::NoError => write!(f, "no error"),
            ErrorCode::Failed => write!(f, "failed"),
            ErrorCode::Internal => write!(f, "internal error"),
            ErrorCode::IllegalOption => write!(f, "illegal option"),
            ErrorCode::BadParameter => write!(f, "bad parameter"),
            ErrorCode::HttpNotFound => write!(f, "not found"),
            ErrorCode::HttpPreconditionFailed => write!(f, "precondition failed"),
            ErrorCode::ArangoConflict => write!(f, "conflict"),
            ErrorCode::ArangoDocumentNotFound => write!(f, "document not found"),
            ErrorCode::ArangoDataSourceNotFound => write!(f, "collection or view not found"),
            ErrorCode::ArangoDuplicateName => write!(f, "duplicate name"),
            ErrorCode::GraphNotFound => write!(f, "graph not found"),
            ErrorCode::GraphDuplicate => write!(f, "graph already exists"),
            ErrorCode::Unknown => write!(f, "unknown error"),
            _ => write!(f, "error code {}", self.as_u32()),
        }
    }
}

/// Main error type of the graph client
#[derive(Error, Debug)]
pub enum ArangoError {
    /// Non-2xx answer (or an error body) from the server
    #[error("Server error {status} ({code}): {message}")]
    Server {
        status: u16,
        code: ErrorCode,
        message: String,
    },

    /// The server's answer disagrees with what the client sent
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("Revision conflict: {0}")]
    RevisionConflict(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl ArangoError {
    pub fn server(status: u16, code: ErrorCode, message: impl Into<String>) -> Self {
        ArangoError::Server {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_parameter(message: impl Into<String>) -> Self {
        ArangoError::Validation(message.into())
    }

    pub fn invalid_option(message: impl Into<String>) -> Self {
        ArangoError::InvalidOption(message.into())
    }

    pub fn protocol_violation(message: impl Into<String>) -> Self {
        ArangoError::ProtocolViolation(message.into())
    }

    pub fn revision_conflict(message: impl Into<String>) -> Self {
        ArangoError::RevisionConflict(message.into())
    }

    pub fn unsupported_operation(operation: &str, replacement: &str) -> Self {
        ArangoError::UnsupportedOperation(format!(
            "'{}' is not available on a graph handle, use {} instead",
            operation, replacement
        ))
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            ArangoError::Server { code, .. } => *code,
            ArangoError::ProtocolViolation(_) => ErrorCode::Internal,
            ArangoError::RevisionConflict(_) => ErrorCode::ArangoConflict,
            ArangoError::InvalidOption(_) => ErrorCode::IllegalOption,
            ArangoError::UnsupportedOperation(_) => ErrorCode::NotImplemented,
            ArangoError::Serde(_) => ErrorCode::SerializationError,
            ArangoError::Validation(_) => ErrorCode::BadParameter,
            ArangoError::Config(_) => ErrorCode::BadParameter,
            ArangoError::Network(_) => ErrorCode::HttpServiceUnavailable,
        }
    }

    /// HTTP status of a server error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ArangoError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.error_code(),
            ErrorCode::ArangoDocumentNotFound |
            ErrorCode::ArangoDataSourceNotFound |
            ErrorCode::HttpNotFound |
            ErrorCode::GraphNotFound
        ) || self.status() == Some(404)
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ArangoError::RevisionConflict(_))
            || matches!(self.error_code(),
                ErrorCode::ArangoUniqueConstraintViolated |
                ErrorCode::ArangoDuplicateName |
                ErrorCode::GraphDuplicate
            )
    }
}

impl From<reqwest::Error> for ArangoError {
    fn from(err: reqwest::Error) -> Self {
        ArangoError::Network(err.to_string())
    }
}

impl From<config::ConfigError> for ArangoError {
    fn from(err: config::ConfigError) -> Self {
        ArangoError::Config(err.to_string())
    }
}

/// Result type alias for graph client operations
pub type Result<T> = std::result::Result<T, ArangoError>;

/// Macro for creating a validation error
#[macro_export]
macro_rules! arango_error {
    ($($arg:tt)*) => {
        $crate::common::error::ArangoError::Validation(format!($($arg)*))
    };
}

/// Macro for early return on error
#[macro_export]
macro_rules! arango_bail {
    ($($arg:tt)*) => {
        return Err($crate::arango_error!($($arg)*))
    };
}

/// Macro for ensuring a condition or returning a validation error
#[macro_export]
macro_rules! arango_ensure {
    ($cond:expr, $($arg:tt)*) => {
        if !($cond) {
            $crate::arango_bail!($($arg)*);
        }
    };
}
