//! Parser combinators for preprocessor directives using nom
//!
//! Lines are parsed as raw bytes. Only the directive syntax itself is ASCII.

use nom::{
    bytes::complete::{tag, take_till1, take_while},
    character::complete::{char, multispace0, space1},
    combinator::{all_consuming, eof},
    sequence::{delimited, preceded, terminated},
    IResult,
};

/// Represents a preprocessor directive
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// #define NAME VALUE
    Define { name: Vec<u8>, value: Vec<u8> },

    /// #include "path"
    Include { path: String },
}

/// Why a `#` line is not a usable directive
#[derive(Debug, Clone, PartialEq)]
pub enum DirectiveError {
    /// Known keyword, wrong shape
    Malformed(String),
    /// Unknown keyword
    Unrecognized(String),
}

/// A single whitespace-delimited token
fn token(input: &[u8]) -> IResult<&[u8], &[u8]> {
    take_till1(|c: u8| c.is_ascii_whitespace())(input)
}

/// Directive keyword right after the `#`
fn keyword(input: &[u8]) -> IResult<&[u8], &[u8]> {
    preceded(
        char('#'),
        take_while(|c: u8| c.is_ascii_alphanumeric() || c == b'_'),
    )(input)
}

/// Trailing whitespace and line terminator
fn line_end(input: &[u8]) -> IResult<&[u8], &[u8]> {
    terminated(multispace0, eof)(input)
}

/// Parse a #define directive
fn parse_define(input: &[u8]) -> IResult<&[u8], Directive> {
    let (input, _) = tag("#define")(input)?;
    let (input, _) = space1(input)?;
    let (input, name) = token(input)?;
    let (input, _) = space1(input)?;
    let (input, value) = token(input)?;
    let (input, _) = line_end(input)?;

    Ok((
        input,
        Directive::Define {
            name: name.to_vec(),
            value: value.to_vec(),
        },
    ))
}

/// Parse the quoted path of an include
fn parse_include_quoted(input: &[u8]) -> IResult<&[u8], &[u8]> {
    delimited(
        char('"'),
        take_till1(|c: u8| c == b'"' || c == b'\n' || c == b'\r'),
        char('"'),
    )(input)
}

/// Parse a #include directive
fn parse_include(input: &[u8]) -> IResult<&[u8], Directive> {
    let (input, _) = tag("#include")(input)?;
    let (input, _) = space1(input)?;
    let (input, path) = parse_include_quoted(input)?;
    let (input, _) = line_end(input)?;

    Ok((
        input,
        Directive::Include {
            path: String::from_utf8_lossy(path).into_owned(),
        },
    ))
}

/// Line text without trailing whitespace, for messages
fn trimmed(line: &[u8]) -> String {
    let end = line
        .iter()
        .rposition(|c| !c.is_ascii_whitespace())
        .map_or(0, |pos| pos + 1);
    String::from_utf8_lossy(&line[..end]).into_owned()
}

/// Parse a line that starts with `#`.
pub fn parse_directive(line: &[u8]) -> Result<Directive, DirectiveError> {
    let name = match keyword(line) {
        Ok((_, name)) => name,
        Err(_) => return Err(DirectiveError::Unrecognized(trimmed(line))),
    };
    match name {
        b"define" => all_consuming(parse_define)(line)
            .map(|(_, directive)| directive)
            .map_err(|_| {
                DirectiveError::Malformed(format!(
                    "expected `#define NAME VALUE`, found `{}`",
                    trimmed(line)
                ))
            }),
        b"include" => all_consuming(parse_include)(line)
            .map(|(_, directive)| directive)
            .map_err(|_| {
                DirectiveError::Malformed(format!(
                    "expected `#include \"path\"`, found `{}`",
                    trimmed(line)
                ))
            }),
        _ => Err(DirectiveError::Unrecognized(trimmed(line))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_define() {
        let result = parse_directive(b"#define PI 3.14159\n");
        assert_eq!(
            result,
            Ok(Directive::Define {
                name: b"PI".to_vec(),
                value: b"3.14159".to_vec(),
            })
        );
    }

    #[test]
    fn test_parse_define_with_tabs_and_crlf() {
        let result = parse_directive(b"#define\tc_one\t\tc1 \r\n");
        assert_eq!(
            result,
            Ok(Directive::Define {
                name: b"c_one".to_vec(),
                value: b"c1".to_vec(),
            })
        );
    }

    #[test]
    fn test_parse_define_missing_value() {
        let result = parse_directive(b"#define EMPTY\n");
        assert!(matches!(result, Err(DirectiveError::Malformed(_))));
    }

    #[test]
    fn test_parse_define_extra_token() {
        let result = parse_directive(b"#define TWO_PI 2.0 * PI\n");
        assert!(matches!(result, Err(DirectiveError::Malformed(_))));
    }

    #[test]
    fn test_parse_define_non_utf8_value() {
        let result = parse_directive(b"#define GREETING caf\xE9\n");
        assert_eq!(
            result,
            Ok(Directive::Define {
                name: b"GREETING".to_vec(),
                value: b"caf\xE9".to_vec(),
            })
        );
    }

    #[test]
    fn test_parse_include_quoted() {
        let result = parse_directive(b"#include \"lib/common.h\"\n");
        assert_eq!(
            result,
            Ok(Directive::Include {
                path: "lib/common.h".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_include_angled_is_malformed() {
        let result = parse_directive(b"#include <common.h>\n");
        assert!(matches!(result, Err(DirectiveError::Malformed(_))));
    }

    #[test]
    fn test_parse_include_unterminated() {
        let result = parse_directive(b"#include \"common.h\n");
        assert!(matches!(result, Err(DirectiveError::Malformed(_))));
    }

    #[test]
    fn test_parse_unknown_keyword() {
        assert_eq!(
            parse_directive(b"#ifdef DEBUG\n"),
            Err(DirectiveError::Unrecognized("#ifdef DEBUG".to_string()))
        );
        assert_eq!(
            parse_directive(b"#defined A B\n"),
            Err(DirectiveError::Unrecognized("#defined A B".to_string()))
        );
        assert_eq!(
            parse_directive(b"# \n"),
            Err(DirectiveError::Unrecognized("#".to_string()))
        );
    }
}
