//! Error types for the preprocessor

use std::fmt;

/// Result type for preprocessor operations
pub type PreprocessorResult<T> = Result<T, PreprocessorError>;

/// Errors that can occur during preprocessing.
///
/// Every variant carries the file and line it was raised on so that it can be
/// reported as `path(line)> message`. Only some of them abort an expansion,
/// see [`PreprocessorError::is_fatal`].
#[derive(Debug, Clone, PartialEq)]
pub enum PreprocessorError {
    /// A `#define` or `#include` line that does not follow its grammar
    MalformedDirective {
        path: String,
        line: usize,
        message: String,
    },

    /// Any other line starting with `#`
    UnrecognizedDirective {
        path: String,
        line: usize,
        directive: String,
    },

    /// A macro name or value was rejected by the registry
    InvalidMacro {
        path: String,
        line: usize,
        message: String,
    },

    /// Storage for a new macro could not be reserved
    AllocationFailure {
        path: String,
        line: usize,
        name: String,
    },

    /// Header named by `#include` could not be opened
    IncludeNotFound {
        path: String,
        line: usize,
        include: String,
        message: String,
    },

    /// Header is already being included further up the chain
    CircularInclude {
        path: String,
        line: usize,
        include: String,
        chain: Vec<String>,
    },

    /// Include nesting went past the configured limit
    IncludeDepthExceeded {
        path: String,
        line: usize,
        include: String,
        limit: usize,
    },

    /// Rewriting a line did not reach a fixed point
    NonConvergentExpansion {
        path: String,
        line: usize,
        rewrites: usize,
    },

    /// Line is longer than the line buffer, either as read or after substitution
    LineTooLong {
        path: String,
        line: usize,
        length: usize,
        limit: usize,
    },

    /// IO error opening, reading or writing a file
    IoError { path: String, message: String },
}

impl PreprocessorError {
    /// Fatal errors abort the expansion; the rest are reported and skipped.
    pub fn is_fatal(&self) -> bool {
        match self {
            PreprocessorError::MalformedDirective { .. }
            | PreprocessorError::UnrecognizedDirective { .. }
            | PreprocessorError::InvalidMacro { .. }
            | PreprocessorError::AllocationFailure { .. }
            | PreprocessorError::IncludeNotFound { .. } => false,
            PreprocessorError::CircularInclude { .. }
            | PreprocessorError::IncludeDepthExceeded { .. }
            | PreprocessorError::NonConvergentExpansion { .. }
            | PreprocessorError::LineTooLong { .. }
            | PreprocessorError::IoError { .. } => true,
        }
    }

    pub fn io(path: impl fmt::Display, err: std::io::Error) -> Self {
        PreprocessorError::IoError {
            path: path.to_string(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for PreprocessorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreprocessorError::MalformedDirective {
                path,
                line,
                message,
            } => {
                write!(f, "{}({})> Malformed directive: {}", path, line, message)
            }
            PreprocessorError::UnrecognizedDirective {
                path,
                line,
                directive,
            } => {
                write!(
                    f,
                    "{}({})> Unrecognized preprocessor directive: {}",
                    path, line, directive
                )
            }
            PreprocessorError::InvalidMacro {
                path,
                line,
                message,
            } => {
                write!(f, "{}({})> Invalid macro: {}", path, line, message)
            }
            PreprocessorError::AllocationFailure { path, line, name } => {
                write!(
                    f,
                    "{}({})> Memory allocation failure registering macro {}",
                    path, line, name
                )
            }
            PreprocessorError::IncludeNotFound {
                path,
                line,
                include,
                message,
            } => {
                write!(
                    f,
                    "{}({})> Could not include header file at \"{}\": {}",
                    path, line, include, message
                )
            }
            PreprocessorError::CircularInclude {
                path,
                line,
                include,
                chain,
            } => {
                write!(
                    f,
                    "{}({})> Circular include detected: {} -> {}",
                    path,
                    line,
                    chain.join(" -> "),
                    include
                )
            }
            PreprocessorError::IncludeDepthExceeded {
                path,
                line,
                include,
                limit,
            } => {
                write!(
                    f,
                    "{}({})> Including \"{}\" exceeds the maximum include depth of {}",
                    path, line, include, limit
                )
            }
            PreprocessorError::NonConvergentExpansion {
                path,
                line,
                rewrites,
            } => {
                write!(
                    f,
                    "{}({})> Macro expansion did not converge after {} rewrites",
                    path, line, rewrites
                )
            }
            PreprocessorError::LineTooLong {
                path,
                line,
                length,
                limit,
            } => {
                write!(
                    f,
                    "{}({})> Line is {} bytes long, the limit is {}",
                    path, line, length, limit
                )
            }
            PreprocessorError::IoError { path, message } => {
                write!(f, "IO error on '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for PreprocessorError {}
