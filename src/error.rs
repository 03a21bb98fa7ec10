use thiserror::Error;

/// Convenience alias used throughout `figmacros`.
pub type Result<T> = std::result::Result<T, MacroError>;

/// All different error types this crate uses.
#[derive(Error, Debug)]
pub enum MacroError {
    /// The host exposes no url normalizer under any of the probed names.
    #[error("No url normalizer registered, tried: {}", .probed.join(", "))]
    MissingNormalizer {
        /// The names that were looked up, in probing order.
        probed: Vec<&'static str>,
    },
    /// A template called a macro without a required argument.
    #[error("Macro `{name}` requires the `{arg}` argument")]
    MissingArgument {
        /// The name the macro is registered under.
        name: &'static str,
        /// The missing argument.
        arg: &'static str,
    },
    /// A template passed an argument of the wrong type.
    #[error("Macro `{name}` expected `{arg}` to be {expected}")]
    InvalidArgument {
        /// The name the macro is registered under.
        name: &'static str,
        /// The offending argument.
        arg: &'static str,
        /// Description of the accepted values.
        expected: &'static str,
    },
    /// Failed to turn the site environment into a mapping.
    #[error("Failed to serialize the site environment: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<MacroError> for tera::Error {
    fn from(err: MacroError) -> Self {
        tera::Error::msg(err.to_string())
    }
}
