// vim: tw=80
//! Errors raised while defining or exercising mocks.

use thiserror::Error;

/// Why a call's arguments could not be bound to a [`Signature`].
///
/// [`Signature`]: crate::Signature
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum BindError {
    #[error("takes {expected} positional arguments but {given} were given")]
    TooManyPositional { expected: usize, given: usize },

    #[error("got an unexpected keyword argument '{0}'")]
    UnexpectedKeyword(String),

    #[error("got multiple values for argument '{0}'")]
    MultipleValues(String),

    #[error("missing required arguments: {}", .0.join(", "))]
    MissingArguments(Vec<String>),
}

/// Every way that defining, calling, or verifying a mock can fail.
#[derive(Debug, Error)]
pub enum MockError {
    /// Two argument validators were bound to the same parameter name.
    #[error("list of argument validators contains duplicate names: {names:?}")]
    DuplicateNames { names: Vec<String> },

    /// Two argument validators were bound to the same position.
    #[error("list of argument validators contains duplicate positions: \
            {positions:?}")]
    DuplicatePositions { positions: Vec<usize> },

    /// A call or a setup pattern does not fit the mocked function's
    /// signature.
    #[error("{signature}: {reason}")]
    SignatureMismatch { signature: String, reason: BindError },

    /// The matching setup never had a return value bound with `returns`.
    #[error("setup {setup} of {function} matched, but no return value was \
            bound; call `returns` first")]
    UnboundSetup { function: String, setup: String },

    /// A strict mock received a call that no setup accepts.
    #[error("no setup of {function} matches the call {call}")]
    NoMatch { function: String, call: String },

    /// An object mock was asked for a member it does not have.
    #[error("name {name} not found in {mock}")]
    UnknownMember { mock: String, name: String },

    /// A call-count verification did not hold.
    #[error("expected {function} to be called {expected} with {pattern}, \
            but it was called {actual} times")]
    VerificationFailed {
        function: String,
        pattern: String,
        expected: String,
        actual: usize,
    },
}

pub type Result<T, E = MockError> = std::result::Result<T, E>;
