//! Preprocessor
//!
//! Resolves the two directives understood by the shader assemblers' front end:
//! - `#define NAME VALUE` registers a textual macro
//! - `#include "path"` pulls the macros of a header, relative to the including file
//!
//! Every other line is rewritten until no registered macro name occurs in it.

mod error;
mod include;
mod line_source;
mod parser;
mod processor;
mod registry;
mod substitute;

pub use error::{PreprocessorError, PreprocessorResult};
pub use line_source::{Line, LineSource};
pub use parser::{parse_directive, Directive, DirectiveError};
pub use processor::{expand, expand_to_path, Preprocessor};
pub use registry::{Macro, MacroRegistry, RegisterError};
pub use substitute::{substitute_line, SubstituteError, SubstituteLimits};
