use std::error::Error;

/// The error type used by the tools, any error that implements
/// [`std::error::Error`] can be converted into it with `?`.
pub type FsmError = Box<dyn Error>;
