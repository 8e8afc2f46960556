use thiserror::Error;

// Error kinds surfaced by the client. Nothing is recovered locally;
// every failure propagates as the outcome of the call.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    #[error("malformed XML: {0}")]
    MalformedXml(String),

    #[error("invalid schema document: {0}")]
    InvalidSchema(String),

    #[error("schema violation: {0}")]
    SchemaViolation(String),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}
