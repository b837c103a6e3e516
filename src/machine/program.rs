//! Program text representation.
//!
//! A program is written as comma-separated decimal integers, e.g.
//! `1,9,10,3,2,3,11,0,99,30,40,50`. [`Program`] parses that text once; the
//! interpreter copies its words into memory.

use crate::machine::errors::VMError;
use std::str::FromStr;

/// Parsed program words.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Program {
    words: Vec<i64>,
}

impl Program {
    pub fn new(words: Vec<i64>) -> Self {
        Self { words }
    }

    pub fn words(&self) -> &[i64] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn into_words(self) -> Vec<i64> {
        self.words
    }
}

impl From<Vec<i64>> for Program {
    fn from(words: Vec<i64>) -> Self {
        Self::new(words)
    }
}

impl FromStr for Program {
    type Err = VMError;

    /// Parses comma-separated integers, ignoring surrounding whitespace.
    fn from_str(source: &str) -> Result<Self, Self::Err> {
        source
            .trim()
            .split(',')
            .enumerate()
            .map(|(index, token)| {
                let token = token.trim();
                token.parse::<i64>().map_err(|_| VMError::InvalidProgram {
                    index,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Program::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated() {
        let program: Program = "1,0,0,3,99".parse().unwrap();
        assert_eq!(program.words(), &[1, 0, 0, 3, 99]);
        assert_eq!(program.len(), 5);
    }

    #[test]
    fn tolerates_whitespace_and_newline() {
        let program: Program = " 104, -5 ,\t99\n".parse().unwrap();
        assert_eq!(program.words(), &[104, -5, 99]);
    }

    #[test]
    fn large_values() {
        let program: Program = "104,1125899906842624,99".parse().unwrap();
        assert_eq!(program.words()[1], 1125899906842624);
    }

    #[test]
    fn rejects_bad_token() {
        assert_eq!(
            "1,2,x,99".parse::<Program>(),
            Err(VMError::InvalidProgram {
                index: 2,
                token: "x".to_string()
            })
        );
    }

    #[test]
    fn rejects_empty_token() {
        assert!(matches!(
            "1,,99".parse::<Program>(),
            Err(VMError::InvalidProgram { index: 1, .. })
        ));
        assert!(matches!(
            "".parse::<Program>(),
            Err(VMError::InvalidProgram { index: 0, .. })
        ));
    }
}
