use crate::sml::errors::SmlError;
use crate::sml::registers::Register;

/// A line may hold at most this many whitespace characters once trimmed.
pub(crate) const MAX_LINE_WHITESPACE: usize = 3;

/// Word-at-a-time reader over one trimmed source line.
pub(crate) struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(line: &'a str) -> Result<Self, SmlError> {
        let line = line.trim();
        if line.chars().filter(|c| c.is_whitespace()).count() > MAX_LINE_WHITESPACE {
            return Err(SmlError::MalformedLine(format!(
                "more than {MAX_LINE_WHITESPACE} spaces in {line:?}"
            )));
        }
        Ok(Self { rest: line })
    }

    pub(crate) fn next_word(&mut self) -> Option<&'a str> {
        let rest = self.rest.trim_start();
        if rest.is_empty() {
            self.rest = rest;
            return None;
        }
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (word, tail) = rest.split_at(end);
        self.rest = tail;
        Some(word)
    }

    /// A missing operand is reported as an empty register name.
    pub(crate) fn register(&mut self) -> Result<Register, SmlError> {
        self.next_word().unwrap_or("").parse()
    }

    pub(crate) fn integer(&mut self) -> Result<i32, SmlError> {
        let word = self.next_word().unwrap_or("");
        parse_imm(word).ok_or_else(|| SmlError::InvalidIntegerLiteral(word.to_string()))
    }

    pub(crate) fn label(&mut self) -> Result<String, SmlError> {
        self.next_word()
            .map(str::to_string)
            .ok_or_else(|| SmlError::MalformedLine("missing label operand".into()))
    }

    /// Fails if any word is left after the operands.
    pub(crate) fn finish(mut self) -> Result<(), SmlError> {
        match self.next_word() {
            None => Ok(()),
            Some(extra) => Err(SmlError::MalformedLine(format!(
                "unexpected operand {extra:?}"
            ))),
        }
    }
}

/// Decimal `i32`, optionally signed.
pub(crate) fn parse_imm(s: &str) -> Option<i32> {
    s.parse::<i32>().ok()
}

/// Splits `word` into a label name when it ends with `:`.
pub(crate) fn strip_label(word: &str) -> Option<&str> {
    word.strip_suffix(':')
}
