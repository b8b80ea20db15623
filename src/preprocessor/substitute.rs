//! Fixed-point macro substitution on a single line.
//!
//! Matching is plain substring search with no word boundaries, so a macro named
//! `MAX` also rewrites the `MAX` inside `MAXIMUM`. Trying longer names first
//! only narrows this down.

use super::registry::MacroRegistry;

use memchr::memmem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubstituteLimits {
    pub max_rewrites: usize,
    pub max_line_length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstituteError {
    NonConvergent { rewrites: usize },
    LineTooLong { length: usize, limit: usize },
}

/// Rewrite `line` until no registered name occurs in it.
///
/// After every replacement the scan restarts at the head of the registry, so a
/// value that contains another macro's name gets expanded as well. Returns the
/// number of replacements made.
///
/// Outgrowing the line limit is non-convergence if some replacement put its own
/// macro name back into the line, and `LineTooLong` otherwise.
pub fn substitute_line(
    line: &mut Vec<u8>,
    registry: &MacroRegistry,
    limits: &SubstituteLimits,
) -> Result<usize, SubstituteError> {
    let macros = registry.as_slice();
    let mut rewrites = 0;
    let mut reintroduced = false;
    let mut index = 0;

    while index < macros.len() {
        let current = &macros[index];
        let name = current.name();
        let Some(pos) = memmem::find(line, name) else {
            index += 1;
            continue;
        };

        if rewrites == limits.max_rewrites {
            return Err(SubstituteError::NonConvergent { rewrites });
        }
        let value = current.value();
        line.splice(pos..pos + name.len(), value.iter().copied());
        rewrites += 1;

        // Any occurrence overlapping the inserted value.
        let start = pos.saturating_sub(name.len() - 1);
        let end = (pos + value.len() + name.len() - 1).min(line.len());
        if memmem::find(&line[start..end], name).is_some() {
            reintroduced = true;
        }

        if line.len() > limits.max_line_length {
            if reintroduced {
                return Err(SubstituteError::NonConvergent { rewrites });
            }
            return Err(SubstituteError::LineTooLong {
                length: line.len(),
                limit: limits.max_line_length,
            });
        }
        index = 0;
    }

    Ok(rewrites)
}
