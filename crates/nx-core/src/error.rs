use thiserror::Error;

pub type NxResult<T> = Result<T, NxError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NxError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Index {index} exceeds the id range")]
    IdOverflow { index: usize },
}
