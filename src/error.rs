use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatrixError {
    #[error("{op}: shapes do not match: {lhs:?} vs {rhs:?}")]
    ShapeMismatch {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
    #[error("{op}: buffer of length {len} cannot back a {rows}x{cols} matrix")]
    InvalidShape {
        op: &'static str,
        rows: usize,
        cols: usize,
        len: usize,
    },
    #[error("{op}: {msg}")]
    InvalidArgument { op: &'static str, msg: String },
    #[error("telemetry: {msg}")]
    Telemetry { msg: String },
}

pub type Result<T> = std::result::Result<T, MatrixError>;
