//! Preprocessor implementation

use crate::models::config::PrepConfig;
use crate::preprocessor::error::{PreprocessorError, PreprocessorResult};
use crate::preprocessor::line_source::{Line, LineSource};
use crate::preprocessor::parser::{parse_directive, Directive, DirectiveError};
use crate::preprocessor::registry::{MacroRegistry, RegisterError};
use crate::preprocessor::substitute::{substitute_line, SubstituteError, SubstituteLimits};

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// File being scanned, used for diagnostics and for resolving its includes.
#[derive(Debug, Clone)]
pub(super) struct FileContext {
    pub path: PathBuf,
    pub base_dir: PathBuf,
}

impl FileContext {
    pub fn new(path: &Path) -> Self {
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            base_dir,
        }
    }

    pub fn display(&self) -> String {
        self.path.display().to_string()
    }
}

/// Expands `#define` macros of one compilation unit at a time.
///
/// Every call to [`Preprocessor::expand`] starts from an empty registry (plus
/// anything added with [`Preprocessor::define`]) and clears it once the output
/// has been written. Relative includes are resolved against the directory of
/// the including file, without touching the process working directory.
pub struct Preprocessor {
    pub(super) config: PrepConfig,

    /// Macros registered before any source is read
    predefined: Vec<(String, String)>,

    pub(super) registry: MacroRegistry,

    /// Canonical paths on the active include chain, in inclusion order
    pub(super) include_chain: Vec<PathBuf>,

    /// Same paths as `include_chain`, for membership tests
    pub(super) include_stack: HashSet<PathBuf>,

    /// Recoverable problems reported during the last expansion
    diagnostics: Vec<PreprocessorError>,
}

impl Preprocessor {
    /// Create a new preprocessor
    pub fn new() -> Self {
        Self::with_config(PrepConfig::default())
    }

    pub fn with_config(config: PrepConfig) -> Self {
        let registry = MacroRegistry::new(config.max_token_length);
        Self {
            config,
            predefined: Vec::new(),
            registry,
            include_chain: Vec::new(),
            include_stack: HashSet::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn config(&self) -> &PrepConfig {
        &self.config
    }

    /// Add a macro registered ahead of every compilation unit
    pub fn define(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.predefined.push((name.into(), value.into()));
    }

    pub fn diagnostics(&self) -> &[PreprocessorError] {
        &self.diagnostics
    }

    /// Expand `input_path` into `output`.
    pub fn expand<W: Write>(&mut self, input_path: &Path, output: &mut W) -> PreprocessorResult<()> {
        self.diagnostics.clear();

        let result = self.expand_unit(input_path, output);

        // Macros live for one compilation unit.
        self.registry.clear();
        self.include_chain.clear();
        self.include_stack.clear();
        result
    }

    /// Expand `input_path` into a newly created file at `output_path`.
    pub fn expand_to_path(&mut self, input_path: &Path, output_path: &Path) -> PreprocessorResult<()> {
        // Open the input first so a missing input leaves no empty output behind.
        File::open(input_path).map_err(|e| PreprocessorError::io(input_path.display(), e))?;
        let file =
            File::create(output_path).map_err(|e| PreprocessorError::io(output_path.display(), e))?;
        let mut writer = BufWriter::new(file);
        self.expand(input_path, &mut writer)
    }

    fn expand_unit<W: Write>(&mut self, input_path: &Path, output: &mut W) -> PreprocessorResult<()> {
        let mut source = LineSource::open(input_path, self.config.max_line_length)
            .map_err(|e| PreprocessorError::io(input_path.display(), e))?;
        let canonical = input_path
            .canonicalize()
            .map_err(|e| PreprocessorError::io(input_path.display(), e))?;
        self.include_chain.push(canonical.clone());
        self.include_stack.insert(canonical);

        let context = FileContext::new(input_path);
        self.register_predefined(&context);

        while let Some(mut line) = source.next_line()? {
            self.substitute(&context, &mut line)?;
            if line.is_directive() {
                self.process_directive(&context, &line)?;
            } else {
                output
                    .write_all(&line.text)
                    .map_err(|e| PreprocessorError::io("<output>", e))?;
            }
        }

        output
            .flush()
            .map_err(|e| PreprocessorError::io("<output>", e))?;
        log::debug!(
            "{}> Expanded {} lines with {} macros",
            context.display(),
            source.line_number(),
            self.registry.len()
        );
        Ok(())
    }

    fn register_predefined(&mut self, context: &FileContext) {
        let predefined = std::mem::take(&mut self.predefined);
        for (name, value) in &predefined {
            self.register(context, 0, name.as_bytes(), value.as_bytes());
        }
        self.predefined = predefined;
    }

    fn substitute(&self, context: &FileContext, line: &mut Line) -> PreprocessorResult<()> {
        let limits = SubstituteLimits {
            max_rewrites: self.config.max_rewrites_per_line,
            max_line_length: self.config.max_line_length,
        };
        match substitute_line(&mut line.text, &self.registry, &limits) {
            Ok(0) => Ok(()),
            Ok(rewrites) => {
                log::debug!(
                    "{}({})> {} substitutions",
                    context.display(),
                    line.number,
                    rewrites
                );
                Ok(())
            }
            Err(SubstituteError::NonConvergent { rewrites }) => {
                Err(PreprocessorError::NonConvergentExpansion {
                    path: context.display(),
                    line: line.number,
                    rewrites,
                })
            }
            Err(SubstituteError::LineTooLong { length, limit }) => {
                Err(PreprocessorError::LineTooLong {
                    path: context.display(),
                    line: line.number,
                    length,
                    limit,
                })
            }
        }
    }

    /// Interpret a line starting with `#`. Only fatal errors are returned.
    pub(super) fn process_directive(&mut self, context: &FileContext, line: &Line) -> PreprocessorResult<()> {
        match parse_directive(&line.text) {
            Ok(Directive::Define { name, value }) => {
                self.register(context, line.number, &name, &value);
                Ok(())
            }
            Ok(Directive::Include { path }) => self.include_header(context, line.number, &path),
            Err(DirectiveError::Malformed(message)) => {
                self.report(PreprocessorError::MalformedDirective {
                    path: context.display(),
                    line: line.number,
                    message,
                });
                Ok(())
            }
            Err(DirectiveError::Unrecognized(directive)) => {
                self.report(PreprocessorError::UnrecognizedDirective {
                    path: context.display(),
                    line: line.number,
                    directive,
                });
                Ok(())
            }
        }
    }

    fn register(&mut self, context: &FileContext, line: usize, name: &[u8], value: &[u8]) {
        match self.registry.register(name, value) {
            Ok(()) => {
                log::info!(
                    "{}({})> Registered macro: {} -> {}",
                    context.display(),
                    line,
                    String::from_utf8_lossy(name),
                    String::from_utf8_lossy(value)
                );
            }
            Err(RegisterError::Allocation) => {
                self.report(PreprocessorError::AllocationFailure {
                    path: context.display(),
                    line,
                    name: String::from_utf8_lossy(name).into_owned(),
                });
            }
            Err(e) => {
                self.report(PreprocessorError::InvalidMacro {
                    path: context.display(),
                    line,
                    message: e.to_string(),
                });
            }
        }
    }

    pub(super) fn report(&mut self, error: PreprocessorError) {
        log::warn!("{}", error);
        self.diagnostics.push(error);
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand `input_path` into `output` with the default limits.
pub fn expand<W: Write>(input_path: &Path, output: &mut W) -> PreprocessorResult<()> {
    Preprocessor::new().expand(input_path, output)
}

/// Expand `input_path` into a file at `output_path` with the default limits.
pub fn expand_to_path(input_path: &Path, output_path: &Path) -> PreprocessorResult<()> {
    Preprocessor::new().expand_to_path(input_path, output_path)
}
