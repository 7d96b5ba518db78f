//! Line-oriented tokenizing shared by the OBJ and MTL readers.

use lume_math::Vec3;
use thiserror::Error;

/// Errors that can occur while parsing a single statement.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("line {line}: '{keyword}' expects {expected} values")]
    MissingValues {
        line: usize,
        keyword: String,
        expected: usize,
    },

    #[error("line {line}: invalid number '{value}'")]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// A non-empty, non-comment line split into a keyword and its arguments.
pub(crate) struct Statement<'a> {
    pub line: usize,
    pub keyword: &'a str,
    pub args: Vec<&'a str>,
}

/// Iterate over the statements of a file, skipping blanks and `#` comments.
pub(crate) fn statements(content: &str) -> impl Iterator<Item = Statement<'_>> {
    content.lines().enumerate().filter_map(|(i, raw)| {
        let line = raw.split('#').next().unwrap_or_default();
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next()?;
        Some(Statement {
            line: i + 1,
            keyword,
            args: tokens.collect(),
        })
    })
}

impl<'a> Statement<'a> {
    /// Parse the first `N` arguments as numbers. Extra arguments are ignored.
    pub fn floats<const N: usize>(&self) -> ParseResult<[f64; N]> {
        if self.args.len() < N {
            return Err(ParseError::MissingValues {
                line: self.line,
                keyword: self.keyword.to_string(),
                expected: N,
            });
        }

        let mut values = [0.0; N];
        for (value, token) in values.iter_mut().zip(&self.args) {
            *value = parse_number(token, self.line)?;
        }
        Ok(values)
    }

    /// Parse the first three arguments as a vector.
    pub fn vec3(&self) -> ParseResult<Vec3> {
        let [x, y, z] = self.floats::<3>()?;
        Ok(Vec3::new(x, y, z))
    }

    /// Parse the single numeric argument.
    pub fn scalar(&self) -> ParseResult<f64> {
        let [value] = self.floats::<1>()?;
        Ok(value)
    }

    /// The first argument as a name. Any further tokens are ignored.
    pub fn name(&self) -> ParseResult<String> {
        let Some(name) = self.args.first() else {
            return Err(ParseError::MissingValues {
                line: self.line,
                keyword: self.keyword.to_string(),
                expected: 1,
            });
        };
        Ok(name.to_string())
    }
}

pub(crate) fn parse_number<T: std::str::FromStr>(token: &str, line: usize) -> ParseResult<T> {
    token.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        value: token.to_string(),
    })
}
