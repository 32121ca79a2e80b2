//! Lexer for infix expression lines.

use crate::error::{ParseError, ParseReason};
use crate::number::{is_unit, scan_unsigned, unsigned_value};
use rhizome_helix_complex::Complex;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Lexeme {
    Number(Complex<f64>),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Eof,
}

impl Lexeme {
    /// Source-like rendering used in error messages.
    pub(crate) fn text(&self) -> String {
        match self {
            Lexeme::Number(c) => c.to_string(),
            Lexeme::Ident(name) => name.clone(),
            Lexeme::Plus => "+".into(),
            Lexeme::Minus => "-".into(),
            Lexeme::Star => "*".into(),
            Lexeme::Slash => "/".into(),
            Lexeme::Caret => "^".into(),
            Lexeme::LParen => "(".into(),
            Lexeme::RParen => ")".into(),
            Lexeme::Eof => "end of line".into(),
        }
    }
}

pub(crate) struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(line: usize, input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line,
        }
    }

    pub(crate) fn line(&self) -> usize {
        self.line
    }

    /// 1-based character column of a byte offset.
    pub(crate) fn column_at(&self, pos: usize) -> usize {
        self.input[..pos].chars().count() + 1
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn error(&self, pos: usize, reason: ParseReason) -> ParseError {
        ParseError::new(self.line, self.column_at(pos), reason)
    }

    /// Unsigned real or imaginary literal. A unit suffix only counts when it
    /// is not the start of a longer word (`2i` but not `2in`).
    fn read_number(&mut self, start: usize) -> Result<Complex<f64>, ParseError> {
        let len = scan_unsigned(&self.input[start..]);
        let span = &self.input[start..start + len];
        let value = unsigned_value(span)
            .ok_or_else(|| self.error(start, ParseReason::InvalidNumber(span.to_string())))?;
        self.pos = start + len;

        let mut rest = self.input[self.pos..].chars();
        match rest.next() {
            Some(c) if is_unit(c) && !rest.next().is_some_and(is_word_char) => {
                self.pos += c.len_utf8();
                Ok(Complex::imag(value))
            }
            _ => Ok(Complex::real(value)),
        }
    }

    fn read_ident(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if is_word_char(c) {
                self.next_char();
            } else {
                break;
            }
        }
        self.input[start..self.pos].to_string()
    }

    /// Returns the next lexeme with the byte offset it starts at.
    pub(crate) fn next_token(&mut self) -> Result<(Lexeme, usize), ParseError> {
        self.skip_whitespace();
        let start = self.pos;

        let Some(c) = self.peek_char() else {
            return Ok((Lexeme::Eof, start));
        };

        let single = match c {
            '+' => Some(Lexeme::Plus),
            '-' => Some(Lexeme::Minus),
            '*' => Some(Lexeme::Star),
            '/' => Some(Lexeme::Slash),
            '^' => Some(Lexeme::Caret),
            '(' => Some(Lexeme::LParen),
            ')' => Some(Lexeme::RParen),
            _ => None,
        };
        if let Some(lexeme) = single {
            self.next_char();
            return Ok((lexeme, start));
        }

        if c.is_ascii_digit() || ((c == '.' || c == ',') && scan_unsigned(&self.input[start..]) > 0) {
            return Ok((Lexeme::Number(self.read_number(start)?), start));
        }

        if c.is_alphabetic() {
            let ident = self.read_ident();
            if ident.chars().count() == 1 && ident.chars().all(is_unit) {
                return Ok((Lexeme::Number(Complex::i()), start));
            }
            return Ok((Lexeme::Ident(ident), start));
        }

        Err(self.error(start, ParseReason::UnexpectedChar(c)))
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
