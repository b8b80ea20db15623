use std::fmt;

/// A name/value pair registered by `#define`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Macro {
    name: Vec<u8>,
    value: Vec<u8>,
}

impl Macro {
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    EmptyToken { what: &'static str },
    TokenTooLong { what: &'static str, length: usize, limit: usize },
    Whitespace { what: &'static str },
    Allocation,
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterError::EmptyToken { what } => write!(f, "macro {} is empty", what),
            RegisterError::TokenTooLong {
                what,
                length,
                limit,
            } => write!(
                f,
                "macro {} is {} bytes long, the limit is {}",
                what, length, limit
            ),
            RegisterError::Whitespace { what } => {
                write!(f, "macro {} contains whitespace", what)
            }
            RegisterError::Allocation => write!(f, "memory allocation failure"),
        }
    }
}

/// Macros of one compilation unit, longest names first.
///
/// Entries are kept non-increasing by name length. A new entry goes in front of
/// the first entry whose name is not longer than its own, so among names of
/// equal length the most recent registration is tried first.
#[derive(Debug, Clone)]
pub struct MacroRegistry {
    macros: Vec<Macro>,
    max_token_length: usize,
}

impl MacroRegistry {
    pub fn new(max_token_length: usize) -> Self {
        Self {
            macros: Vec::new(),
            max_token_length,
        }
    }

    fn check_token(&self, what: &'static str, token: &[u8]) -> Result<(), RegisterError> {
        if token.is_empty() {
            return Err(RegisterError::EmptyToken { what });
        }
        if token.len() > self.max_token_length {
            return Err(RegisterError::TokenTooLong {
                what,
                length: token.len(),
                limit: self.max_token_length,
            });
        }
        if token.iter().any(u8::is_ascii_whitespace) {
            return Err(RegisterError::Whitespace { what });
        }
        Ok(())
    }

    pub fn register(
        &mut self,
        name: impl Into<Vec<u8>>,
        value: impl Into<Vec<u8>>,
    ) -> Result<(), RegisterError> {
        let name = name.into();
        let value = value.into();
        self.check_token("name", &name)?;
        self.check_token("value", &value)?;

        self.macros
            .try_reserve(1)
            .map_err(|_| RegisterError::Allocation)?;
        let index = self
            .macros
            .partition_point(|existing| existing.name.len() > name.len());
        self.macros.insert(index, Macro { name, value });
        Ok(())
    }

    pub fn clear(&mut self) {
        self.macros.clear();
        self.macros.shrink_to_fit();
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Macro> {
        self.macros.iter()
    }

    pub fn as_slice(&self) -> &[Macro] {
        &self.macros
    }
}

impl<'a> IntoIterator for &'a MacroRegistry {
    type Item = &'a Macro;
    type IntoIter = std::slice::Iter<'a, Macro>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
