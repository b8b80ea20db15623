//! `#include` handling. Headers only contribute macros; their other lines are dropped.

use crate::preprocessor::error::{PreprocessorError, PreprocessorResult};
use crate::preprocessor::line_source::LineSource;
use crate::preprocessor::processor::{FileContext, Preprocessor};

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

impl Preprocessor {
    /// Include `header`, resolved against the directory of the including file.
    ///
    /// A header that cannot be opened, or is not a regular file, is reported and
    /// skipped. Circular and too-deep includes are fatal.
    pub(super) fn include_header(
        &mut self,
        context: &FileContext,
        line: usize,
        header: &str,
    ) -> PreprocessorResult<()> {
        let candidate = context.base_dir.join(header);
        let canonical = match candidate.canonicalize() {
            Ok(canonical) => canonical,
            Err(e) => {
                self.report_missing(context, line, &candidate, e);
                return Ok(());
            }
        };
        match std::fs::metadata(&canonical) {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => {
                self.report_missing(context, line, &candidate, "not a regular file");
                return Ok(());
            }
            Err(e) => {
                self.report_missing(context, line, &candidate, e);
                return Ok(());
            }
        }

        if self.include_stack.contains(&canonical) {
            return Err(PreprocessorError::CircularInclude {
                path: context.display(),
                line,
                include: canonical.display().to_string(),
                chain: self
                    .include_chain
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect(),
            });
        }
        if self.include_chain.len() >= self.config.max_include_depth {
            return Err(PreprocessorError::IncludeDepthExceeded {
                path: context.display(),
                line,
                include: candidate.display().to_string(),
                limit: self.config.max_include_depth,
            });
        }

        let source = match LineSource::open(&candidate, self.config.max_line_length) {
            Ok(source) => source,
            Err(e) => {
                self.report_missing(context, line, &candidate, e);
                return Ok(());
            }
        };

        log::info!(
            "{}({})> Including header: {}",
            context.display(),
            line,
            candidate.display()
        );
        self.push_include(canonical);
        let result = self.scan_header(&FileContext::new(&candidate), source);
        self.pop_include();
        result
    }

    fn scan_header(
        &mut self,
        context: &FileContext,
        mut source: LineSource<BufReader<File>>,
    ) -> PreprocessorResult<()> {
        while let Some(line) = source.next_line()? {
            if line.is_directive() {
                self.process_directive(context, &line)?;
            }
        }
        Ok(())
    }

    fn push_include(&mut self, canonical: PathBuf) {
        self.include_chain.push(canonical.clone());
        self.include_stack.insert(canonical);
    }

    fn pop_include(&mut self) {
        if let Some(canonical) = self.include_chain.pop() {
            self.include_stack.remove(&canonical);
        }
    }

    fn report_missing(
        &mut self,
        context: &FileContext,
        line: usize,
        candidate: &Path,
        message: impl std::fmt::Display,
    ) {
        self.report(PreprocessorError::IncludeNotFound {
            path: context.display(),
            line,
            include: candidate.display().to_string(),
            message: message.to_string(),
        });
    }
}
