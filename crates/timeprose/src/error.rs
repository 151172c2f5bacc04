//! Error types for timeprose parsing.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    /// No grammar alternative consumed the entire input, or the shape that
    /// matched syntactically was calendrically invalid (e.g. `31/Feb/1978`).
    /// The two cases are indistinguishable to the caller, who gets no
    /// partial result either way.
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    /// A builder's accumulated fields could not be materialized into a
    /// concrete value. The built-in grammar validates every field before
    /// writing, so this only surfaces for caller-supplied builders whose
    /// field state was corrupted outside a parse call.
    #[error("Invalid field resolution: {0}")]
    InvalidResolution(String),
}

pub type Result<T> = std::result::Result<T, ParseError>;
