use crate::preprocessor::PreprocessorError;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrepErrorKind {
    Warning,
    Error,
}

/// Failure reported by the command-line driver.
#[derive(Debug, Clone)]
pub struct PrepError {
    pub kind: PrepErrorKind,
    pub msg: String,
}

impl PrepError {
    pub fn new(kind: PrepErrorKind, msg: &str) -> Self {
        PrepError {
            kind,
            msg: String::from(msg),
        }
    }
    pub fn warning(msg: &str) -> Self {
        PrepError::new(PrepErrorKind::Warning, msg)
    }
    pub fn error(msg: &str) -> Self {
        PrepError::new(PrepErrorKind::Error, msg)
    }
}

impl std::error::Error for PrepError {}

impl std::fmt::Display for PrepError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return write!(f, "{}", &self.msg);
    }
}

impl From<std::io::Error> for PrepError {
    fn from(value: std::io::Error) -> Self {
        let msg = value.to_string();
        return PrepError::error(&msg);
    }
}

impl From<PreprocessorError> for PrepError {
    fn from(value: PreprocessorError) -> Self {
        let msg = value.to_string();
        if value.is_fatal() {
            return PrepError::error(&msg);
        }
        return PrepError::warning(&msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_preprocessor_error_is_a_warning() {
        let error = PrepError::from(PreprocessorError::UnrecognizedDirective {
            path: "a.vsh".to_string(),
            line: 2,
            directive: "#pragma".to_string(),
        });
        assert_eq!(error.kind, PrepErrorKind::Warning);
        assert_eq!(error.to_string(), "a.vsh(2)> Unrecognized preprocessor directive: #pragma");
    }

    #[test]
    fn test_fatal_preprocessor_error_is_an_error() {
        let error = PrepError::from(PreprocessorError::NonConvergentExpansion {
            path: "a.vsh".to_string(),
            line: 3,
            rewrites: 511,
        });
        assert_eq!(error.kind, PrepErrorKind::Error);
    }
}
