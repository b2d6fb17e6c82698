use thiserror::Error as ThisError;

/// The `macrogen` error type
#[derive(Debug, Clone, PartialEq, ThisError)]
#[non_exhaustive]
pub enum Error {
    /// The input could not be read, or the wrong number of inputs was given
    #[error("source error: {0}")]
    SourceError(String),

    /// A production line opened a macro reference with `${` but never closed it
    #[error("unclosed macro in line '{0}'")]
    UnclosedMacroError(String),

    /// A referenced macro (plain or pipe) does not exist
    #[error("no such macro: {0}")]
    UndefinedMacroError(String),

    /// A pipe macro key was expanded as if it were a plain macro
    #[error("tried to expand function macro: {0}")]
    MalformedFunctionCallError(String),

    /// A production broke the terminal/nonterminal count invariant.
    ///
    /// This is never caused by bad input.
    #[error("invalid production: {nonterminals} nonterminals, {terminals} terminals")]
    InvalidProductionError {
        /// Number of terminals found
        terminals: usize,
        /// Number of nonterminals found
        nonterminals: usize,
    },

    /// A macro was declared with a name but no alternatives
    #[error("macro has no productions: {0}")]
    EmptyMacroError(String),

    /// There is no entry macro to expand, usually because the input was empty
    #[error("no entry macro defined")]
    MissingEntryError,

    /// Expansion ran for more rewrite rounds than the configured limit
    #[error("grammar did not terminate after {0} rounds")]
    RoundLimitError(usize),

    /// Generated text could not be written out
    #[error("output error: {0}")]
    OutputError(String),

    /// Error encountered while parsing JSON input
    #[cfg(feature = "json")]
    #[error("json error: {0}")]
    JsonError(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::SourceError(format!("{}", e))
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::JsonError(format!("{}", e))
    }
}
