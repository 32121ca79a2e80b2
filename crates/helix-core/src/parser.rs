//! Line parser.
//!
//! Each line classifies as blank, comment, assignment, literal, lone
//! operator, or infix expression. Infix expressions are parsed by recursive
//! descent and emitted straight into Reverse-Polish order, so evaluation
//! needs no precedence handling.
//!
//! ```text
//! // Precedence, low to high
//! a + b, a - b     // left associative
//! a * b, a / b     // left associative
//! -a, +a           // prefix
//! a ^ b            // right associative, binds tighter than prefix minus
//! f(a)             // named unary operators: sin(x), ln(x), ...
//! ```

use crate::error::{ParseError, ParseReason};
use crate::lexer::{Lexeme, Lexer};
use crate::number::{is_unit, parse_number};
use crate::token::{BinOp, Operator, Token, UnaryOp};

/// Nesting limit for parentheses, prefix operators and exponents.
pub const MAX_DEPTH: usize = 128;

/// Parses one source line into its tokens.
///
/// `line` is the 1-based line number used in errors. Blank lines give no
/// tokens and comment lines give a single [`Token::Comment`].
pub fn parse_line(line: usize, text: &str) -> Result<Vec<Token>, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if let Some(comment) = trimmed.strip_prefix('#') {
        return Ok(vec![Token::Comment(comment.trim().to_string())]);
    }

    if let Some(rest) = trimmed.strip_prefix('=') {
        let leading = text.chars().take_while(|c| c.is_whitespace()).count();
        let gap = rest.chars().take_while(|c| c.is_whitespace()).count();
        let column = leading + 1 + gap + 1;
        return parse_assignment(line, column, rest.trim()).map(|token| vec![token]);
    }

    if let Some(value) = parse_number(trimmed) {
        return Ok(vec![Token::Number(value)]);
    }

    if let Ok(op) = trimmed.parse::<Operator>() {
        return Ok(vec![Token::Operator(op)]);
    }

    parse_expression(line, text)
}

fn parse_assignment(line: usize, column: usize, name: &str) -> Result<Token, ParseError> {
    if name.is_empty() {
        return Err(ParseError::new(line, column, ParseReason::UnexpectedEnd));
    }
    if !is_assignable(name) {
        return Err(ParseError::new(
            line,
            column,
            ParseReason::InvalidAssignment(name.to_string()),
        ));
    }
    Ok(Token::Assign(name.to_string()))
}

/// Valid identifier that does not collide with `x`, the imaginary unit, or an
/// operator name.
fn is_assignable(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_alphabetic() || !chars.all(|c| c.is_alphanumeric() || c == '_') {
        return false;
    }
    let is_unit_name = name.chars().count() == 1 && is_unit(first);
    name != "x" && !is_unit_name && UnaryOp::from_name(name).is_none()
}

/// Parses an infix expression into Reverse-Polish tokens.
pub fn parse_expression(line: usize, text: &str) -> Result<Vec<Token>, ParseError> {
    let mut parser = Parser::new(line, text)?;
    parser.parse_expr()?;
    match parser.current {
        Lexeme::Eof => Ok(parser.output),
        Lexeme::RParen => Err(parser.error(ParseReason::UnmatchedCloseParen)),
        ref other => {
            let text = other.text();
            Err(parser.error(ParseReason::MissingOperator(text)))
        }
    }
}

// ============================================================================
// Parser
// ============================================================================

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Lexeme,
    /// Byte offset of `current`.
    pos: usize,
    depth: usize,
    output: Vec<Token>,
}

impl<'a> Parser<'a> {
    fn new(line: usize, input: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(line, input);
        let (current, pos) = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            pos,
            depth: 0,
            output: Vec::new(),
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        let (current, pos) = self.lexer.next_token()?;
        self.current = current;
        self.pos = pos;
        Ok(())
    }

    fn error(&self, reason: ParseReason) -> ParseError {
        self.error_at(self.pos, reason)
    }

    fn error_at(&self, pos: usize, reason: ParseReason) -> ParseError {
        ParseError::new(self.lexer.line(), self.lexer.column_at(pos), reason)
    }

    fn emit(&mut self, token: Token) {
        self.output.push(token);
    }

    fn emit_binary(&mut self, op: BinOp) {
        self.emit(Token::Operator(Operator::Binary(op)));
    }

    fn emit_unary(&mut self, op: UnaryOp) {
        self.emit(Token::Operator(Operator::Unary(op)));
    }

    /// Runs `f` one nesting level deeper.
    fn nested(&mut self, f: impl FnOnce(&mut Self) -> Result<(), ParseError>) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(ParseReason::TooDeep));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn parse_expr(&mut self) -> Result<(), ParseError> {
        self.parse_add_sub()
    }

    fn parse_add_sub(&mut self) -> Result<(), ParseError> {
        self.parse_mul_div()?;

        loop {
            let op = match self.current {
                Lexeme::Plus => BinOp::Add,
                Lexeme::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance()?;
            self.parse_mul_div()?;
            self.emit_binary(op);
        }

        Ok(())
    }

    fn parse_mul_div(&mut self) -> Result<(), ParseError> {
        self.parse_unary()?;

        loop {
            let op = match self.current {
                Lexeme::Star => BinOp::Mul,
                Lexeme::Slash => BinOp::Div,
                _ => break,
            };
            self.advance()?;
            self.parse_unary()?;
            self.emit_binary(op);
        }

        Ok(())
    }

    fn parse_unary(&mut self) -> Result<(), ParseError> {
        match self.current {
            Lexeme::Minus => {
                self.advance()?;
                self.nested(Self::parse_unary)?;
                self.emit_unary(UnaryOp::Neg);
                Ok(())
            }
            Lexeme::Plus => {
                self.advance()?;
                self.nested(Self::parse_unary)
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> Result<(), ParseError> {
        self.parse_primary()?;

        if self.current == Lexeme::Caret {
            self.advance()?;
            // right associative; the exponent may carry its own sign
            self.nested(Self::parse_unary)?;
            self.emit_binary(BinOp::Pow);
        }

        Ok(())
    }

    fn parse_primary(&mut self) -> Result<(), ParseError> {
        match &self.current {
            Lexeme::Number(value) => {
                let value = *value;
                self.advance()?;
                self.emit(Token::Number(value));
                Ok(())
            }
            Lexeme::Ident(name) => {
                let name = name.clone();
                let start = self.pos;
                self.advance()?;

                if self.current == Lexeme::LParen {
                    let op = UnaryOp::from_name(&name).ok_or_else(|| {
                        self.error_at(start, ParseReason::UnknownFunction(name.clone()))
                    })?;
                    self.parse_group()?;
                    self.emit_unary(op);
                    return Ok(());
                }

                if UnaryOp::from_name(&name).is_some() {
                    return Err(self.error_at(start, ParseReason::MissingArguments(name)));
                }
                if name == "x" {
                    self.emit(Token::XRef);
                } else {
                    self.emit(Token::Identifier(name));
                }
                Ok(())
            }
            Lexeme::LParen => self.parse_group(),
            Lexeme::Eof => Err(self.error(ParseReason::UnexpectedEnd)),
            other => {
                let text = other.text();
                Err(self.error(ParseReason::UnexpectedToken(text)))
            }
        }
    }

    /// `( expr )`, with `current` on the opening paren.
    fn parse_group(&mut self) -> Result<(), ParseError> {
        let open = self.pos;
        self.advance()?;
        self.nested(Self::parse_expr)?;

        match self.current {
            Lexeme::RParen => self.advance(),
            Lexeme::Eof => Err(self.error_at(open, ParseReason::UnclosedParen)),
            ref other => {
                let text = other.text();
                Err(self.error(ParseReason::MissingOperator(text)))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rhizome_helix_complex::Complex;

    fn parse(text: &str) -> Vec<Token> {
        parse_line(1, text).unwrap()
    }

    fn err(text: &str) -> ParseError {
        parse_line(1, text).unwrap_err()
    }

    fn num(v: f64) -> Token {
        Token::Number(Complex::real(v))
    }

    fn bin(op: BinOp) -> Token {
        Token::Operator(Operator::Binary(op))
    }

    fn un(op: UnaryOp) -> Token {
        Token::Operator(Operator::Unary(op))
    }

    #[test]
    fn test_blank_and_comment() {
        assert_eq!(parse(""), vec![]);
        assert_eq!(parse("   \t"), vec![]);
        assert_eq!(parse("  # the real part"), vec![Token::Comment("the real part".into())]);
    }

    #[test]
    fn test_assignment() {
        assert_eq!(parse("=a"), vec![Token::Assign("a".into())]);
        assert_eq!(parse("  = radius2 "), vec![Token::Assign("radius2".into())]);
    }

    #[test]
    fn test_invalid_assignment() {
        assert_eq!(
            err("=x"),
            ParseError::new(1, 2, ParseReason::InvalidAssignment("x".into()))
        );
        assert_eq!(
            err(" = sin"),
            ParseError::new(1, 4, ParseReason::InvalidAssignment("sin".into()))
        );
        assert_eq!(err("=2a").reason, ParseReason::InvalidAssignment("2a".into()));
        assert_eq!(err("=i").reason, ParseReason::InvalidAssignment("i".into()));
        assert_eq!(err("=").reason, ParseReason::UnexpectedEnd);
    }

    #[test]
    fn test_single_atoms() {
        assert_eq!(parse("x"), vec![Token::XRef]);
        assert_eq!(parse("pi"), vec![Token::Identifier("pi".into())]);
        assert_eq!(parse("2"), vec![num(2.0)]);
        assert_eq!(parse("4-3i"), vec![Token::Number(Complex::new(4.0, -3.0))]);
        assert_eq!(parse("-i"), vec![Token::Number(Complex::new(0.0, -1.0))]);
    }

    #[test]
    fn test_lone_operators() {
        assert_eq!(parse("^"), vec![bin(BinOp::Pow)]);
        assert_eq!(parse(" - "), vec![bin(BinOp::Sub)]);
        assert_eq!(parse("sin"), vec![un(UnaryOp::Sin)]);
        assert_eq!(parse("neg"), vec![un(UnaryOp::Neg)]);
        assert_eq!(parse("log"), vec![un(UnaryOp::Ln)]);
    }

    #[test]
    fn test_precedence() {
        // 2 + 3 * x  =>  2 3 x * +
        assert_eq!(
            parse("2+3*x"),
            vec![num(2.0), num(3.0), Token::XRef, bin(BinOp::Mul), bin(BinOp::Add)]
        );
        // (2 + 3) * x  =>  2 3 + x *
        assert_eq!(
            parse("(2 + 3) * x"),
            vec![num(2.0), num(3.0), bin(BinOp::Add), Token::XRef, bin(BinOp::Mul)]
        );
    }

    #[test]
    fn test_left_associative() {
        // 8 / 4 / 2  =>  8 4 / 2 /
        assert_eq!(
            parse("8 / 4 / 2"),
            vec![num(8.0), num(4.0), bin(BinOp::Div), num(2.0), bin(BinOp::Div)]
        );
        assert_eq!(
            parse("1 - 2 + 3"),
            vec![num(1.0), num(2.0), bin(BinOp::Sub), num(3.0), bin(BinOp::Add)]
        );
    }

    #[test]
    fn test_power_right_associative() {
        // 2 ^ 3 ^ 2  =>  2 3 2 ^ ^
        assert_eq!(
            parse("2^3^2"),
            vec![num(2.0), num(3.0), num(2.0), bin(BinOp::Pow), bin(BinOp::Pow)]
        );
    }

    #[test]
    fn test_unary_minus() {
        // -x^2  =>  x 2 ^ neg
        assert_eq!(
            parse("-x^2"),
            vec![Token::XRef, num(2.0), bin(BinOp::Pow), un(UnaryOp::Neg)]
        );
        // x^-1  =>  x 1 neg ^
        assert_eq!(
            parse("x^-1"),
            vec![Token::XRef, num(1.0), un(UnaryOp::Neg), bin(BinOp::Pow)]
        );
        assert_eq!(parse("+x"), vec![Token::XRef]);
    }

    #[test]
    fn test_function_calls() {
        assert_eq!(parse("sin(x)"), vec![Token::XRef, un(UnaryOp::Sin)]);
        assert_eq!(
            parse("exp(i*x) + ln(2)"),
            vec![
                Token::Number(Complex::i()),
                Token::XRef,
                bin(BinOp::Mul),
                un(UnaryOp::Exp),
                num(2.0),
                un(UnaryOp::Ln),
                bin(BinOp::Add),
            ]
        );
    }

    #[test]
    fn test_spaced_rectangular_literal_is_infix() {
        assert_eq!(
            parse("4 - 3i"),
            vec![num(4.0), Token::Number(Complex::imag(3.0)), bin(BinOp::Sub)]
        );
    }

    #[test]
    fn test_comma_decimal_in_expression() {
        assert_eq!(parse("x*0,5"), vec![Token::XRef, num(0.5), bin(BinOp::Mul)]);
    }

    #[test]
    fn test_unmatched_parens() {
        assert_eq!(err("(x + 1"), ParseError::new(1, 1, ParseReason::UnclosedParen));
        assert_eq!(err("x + 1)"), ParseError::new(1, 6, ParseReason::UnmatchedCloseParen));
        assert_eq!(err("sin(x").reason, ParseReason::UnclosedParen);
        assert_eq!(err("()").reason, ParseReason::UnexpectedToken(")".into()));
    }

    #[test]
    fn test_trailing_operator() {
        assert_eq!(err("2 +"), ParseError::new(1, 4, ParseReason::UnexpectedEnd));
        assert_eq!(err("x * * 2").reason, ParseReason::UnexpectedToken("*".into()));
    }

    #[test]
    fn test_missing_operator() {
        assert_eq!(
            err("2 x"),
            ParseError::new(1, 3, ParseReason::MissingOperator("x".into()))
        );
    }

    #[test]
    fn test_unknown_function() {
        assert_eq!(
            err("1 + foo(x)"),
            ParseError::new(1, 5, ParseReason::UnknownFunction("foo".into()))
        );
    }

    #[test]
    fn test_function_without_arguments() {
        assert_eq!(
            err("2 * sin"),
            ParseError::new(1, 5, ParseReason::MissingArguments("sin".into()))
        );
    }

    #[test]
    fn test_unexpected_char() {
        assert_eq!(
            err("x $ 2"),
            ParseError::new(1, 3, ParseReason::UnexpectedChar('$'))
        );
    }

    #[test]
    fn test_column_counts_characters() {
        // 'π' is two bytes but one column
        assert_eq!(err("π $").column, 3);
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}x{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        assert_eq!(err(&deep).reason, ParseReason::TooDeep);

        let ok = format!("{}x{}", "(".repeat(MAX_DEPTH - 1), ")".repeat(MAX_DEPTH - 1));
        assert_eq!(parse(&ok), vec![Token::XRef]);
    }

    #[test]
    fn test_line_number_in_error() {
        let err = parse_line(7, "2 +").unwrap_err();
        assert_eq!(err.line, 7);
        assert_eq!(err.to_string(), "line 7, column 4: unexpected end of expression");
    }
}
