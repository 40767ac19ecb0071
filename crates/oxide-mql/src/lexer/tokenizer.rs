//! Tokenizer implementation.

use super::{Keyword, Span, Token, TokenKind};
use crate::ast::{ParamMap, ParamValue};
use crate::parser::ParseError;

const UNTERMINATED_JSON: &str = "Unterminated JSON object";

/// Default nesting limit, shared with `ParserOptions`.
pub(crate) const DEFAULT_MAX_DEPTH: usize = 64;

/// A lexer over a single input string.
///
/// Tokens are produced on demand: either through [`Lexer::next_token`], which reports
/// problems as [`TokenKind::Error`] tokens, or through the [`Iterator`] impl, which
/// yields `Result`s and stops after the first error or the end-of-input token.
pub struct Lexer<'a> {
    /// The input source text.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Set once the iterator has yielded `Eof` or an error.
    finished: bool,
    /// Maximum nesting of JSON objects and arrays.
    max_depth: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self::with_max_depth(input, DEFAULT_MAX_DEPTH)
    }

    /// Creates a new lexer that rejects JSON literals nested deeper than `max_depth`.
    #[must_use]
    pub const fn with_max_depth(input: &'a str, max_depth: usize) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            finished: false,
            max_depth,
        }
    }

    /// Returns the full input text.
    #[must_use]
    pub const fn input(&self) -> &'a str {
        self.input
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the character after the current one without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn advance_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_line(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    /// Skips a `/* ... */` comment. Returns false if it is not terminated.
    fn skip_block_comment(&mut self) -> bool {
        self.advance(); // /
        self.advance(); // *
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return true;
                }
                Some(_) => {}
                None => return false,
            }
        }
    }

    /// Skips whitespace and comments (`-- ...`, `# ...`, `/* ... */`).
    fn skip_whitespace_and_comments(&mut self) -> Result<(), Token> {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            match (self.peek(), self.peek_next()) {
                (Some('-'), Some('-')) | (Some('#'), _) => self.skip_line(),
                (Some('/'), Some('*')) => {
                    let comment_start = self.pos;
                    if !self.skip_block_comment() {
                        return Err(Token::new(
                            TokenKind::Error("Unterminated block comment".to_string()),
                            Span::new(comment_start, self.pos),
                        ));
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Creates a span from start to current position.
    const fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Creates a token with the current span.
    const fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span())
    }

    fn error_token(&self, message: impl Into<String>) -> Token {
        self.make_token(TokenKind::Error(message.into()))
    }

    /// Reads a run of identifier characters starting at the current position.
    fn read_word(&mut self) -> &'a str {
        let begin = self.pos;
        while self.peek().is_some_and(is_identifier_char) {
            self.advance();
        }
        &self.input[begin..self.pos]
    }

    /// Reads a quoted run starting at the opening quote. A doubled quote embeds the
    /// quote character; backslash has no special meaning. Returns `None` if the
    /// input ends before the closing quote.
    fn read_quoted(&mut self, quote: char) -> Option<String> {
        self.advance(); // opening quote
        let mut value = String::new();
        loop {
            match self.advance()? {
                c if c == quote => {
                    if self.advance_if(quote) {
                        value.push(quote);
                    } else {
                        return Some(value);
                    }
                }
                c => value.push(c),
            }
        }
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        let text = self.read_word();
        match Keyword::from_str(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Identifier(text.to_string())),
        }
    }

    /// Scans a backtick-quoted identifier. The result is never a keyword.
    fn scan_quoted_identifier(&mut self) -> Token {
        match self.read_quoted('`') {
            Some(name) => self.make_token(TokenKind::Identifier(name)),
            None => self.error_token("Unterminated quoted identifier"),
        }
    }

    /// Scans a single- or double-quoted string literal.
    fn scan_string(&mut self, quote: char) -> Token {
        match self.read_quoted(quote) {
            Some(value) if quote == '"' => self.make_token(TokenKind::DoubleQuotedString(value)),
            Some(value) => self.make_token(TokenKind::String(value)),
            None => self.error_token("Unterminated string literal"),
        }
    }

    /// Consumes digits, an optional fraction and an optional exponent. Returns true
    /// if the literal has float form.
    fn consume_number(&mut self) -> bool {
        let mut is_float = false;

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance(); // .
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            let mark = self.pos;
            self.advance(); // e/E
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            } else {
                self.pos = mark;
            }
        }

        is_float
    }

    /// Decodes a numeric literal. Integers that do not fit in `i64` are kept as
    /// floats; values outside the `f64` range are errors.
    fn number_kind(text: &str, is_float: bool) -> TokenKind {
        if !is_float {
            if let Ok(i) = text.parse::<i64>() {
                return TokenKind::Integer(i);
            }
        }
        match text.parse::<f64>() {
            Ok(f) if f.is_finite() => TokenKind::Float(f),
            Ok(_) if is_float => TokenKind::Error(format!("Invalid float: {text} is out of range")),
            Ok(_) => TokenKind::Error(format!("Invalid integer: {text} is out of range")),
            Err(e) => TokenKind::Error(format!("Invalid float: {e}")),
        }
    }

    /// Scans a number (integer or float).
    fn scan_number(&mut self) -> Token {
        let is_float = self.consume_number();
        let kind = Self::number_kind(&self.input[self.start..self.pos], is_float);
        self.make_token(kind)
    }

    /// Scans `@name` or `@@name` (the position is just past the first `@`).
    fn scan_variable(&mut self) -> Token {
        let system = self.advance_if('@');
        let begin = self.pos;
        while self
            .peek()
            .is_some_and(|c| is_identifier_char(c) || (system && c == '.'))
        {
            self.advance();
        }
        let name = &self.input[begin..self.pos];
        if name.is_empty() {
            return self.error_token("Expected variable name after '@'");
        }
        if system {
            self.make_token(TokenKind::SystemVariable(name.to_string()))
        } else {
            self.make_token(TokenKind::Variable(name.to_string()))
        }
    }

    /// Scans a `{ ... }` JSON object literal.
    fn scan_json(&mut self) -> Token {
        match self.json_object(1) {
            Ok(map) => self.make_token(TokenKind::Json(map)),
            Err(message) => self.error_token(message),
        }
    }

    fn skip_json_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn json_object(&mut self, depth: usize) -> Result<ParamMap, String> {
        self.advance(); // {
        let mut map = ParamMap::new();
        self.skip_json_whitespace();
        if self.advance_if('}') {
            return Ok(map);
        }
        loop {
            self.skip_json_whitespace();
            let key = match self.peek() {
                Some(quote @ ('\'' | '"')) => self
                    .read_quoted(quote)
                    .ok_or_else(|| UNTERMINATED_JSON.to_string())?,
                Some(c) if is_identifier_start(c) => self.read_word().to_string(),
                Some(c) => return Err(format!("Malformed JSON object: unexpected '{c}'")),
                None => return Err(UNTERMINATED_JSON.to_string()),
            };
            self.skip_json_whitespace();
            match self.advance() {
                Some(':') => {}
                Some(c) => return Err(format!("Malformed JSON object: expected ':', found '{c}'")),
                None => return Err(UNTERMINATED_JSON.to_string()),
            }
            let value = self.json_value(depth)?;
            map.insert(key, value);
            self.skip_json_whitespace();
            match self.advance() {
                Some(',') => {}
                Some('}') => return Ok(map),
                Some(c) => {
                    return Err(format!(
                        "Malformed JSON object: expected ',' or '}}', found '{c}'"
                    ))
                }
                None => return Err(UNTERMINATED_JSON.to_string()),
            }
        }
    }

    fn json_array(&mut self, depth: usize) -> Result<ParamValue, String> {
        self.advance(); // [
        let mut items = Vec::new();
        self.skip_json_whitespace();
        if self.advance_if(']') {
            return Ok(ParamValue::List(items));
        }
        loop {
            items.push(self.json_value(depth)?);
            self.skip_json_whitespace();
            match self.advance() {
                Some(',') => {}
                Some(']') => return Ok(ParamValue::List(items)),
                Some(c) => {
                    return Err(format!(
                        "Malformed JSON array: expected ',' or ']', found '{c}'"
                    ))
                }
                None => return Err(UNTERMINATED_JSON.to_string()),
            }
        }
    }

    /// Decodes one value inside a container nested `depth` levels deep.
    fn json_value(&mut self, depth: usize) -> Result<ParamValue, String> {
        self.skip_json_whitespace();
        if matches!(self.peek(), Some('{' | '[')) && depth >= self.max_depth {
            return Err(format!(
                "JSON nesting exceeds the limit of {}",
                self.max_depth
            ));
        }
        match self.peek() {
            Some('{') => self.json_object(depth + 1).map(ParamValue::Map),
            Some('[') => self.json_array(depth + 1),
            Some(quote @ ('\'' | '"')) => self
                .read_quoted(quote)
                .map(ParamValue::String)
                .ok_or_else(|| UNTERMINATED_JSON.to_string()),
            Some(c) if c.is_ascii_digit() || c == '-' => {
                let begin = self.pos;
                self.advance_if('-');
                if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    return Err("Malformed JSON number".to_string());
                }
                let is_float = self.consume_number();
                match Self::number_kind(&self.input[begin..self.pos], is_float) {
                    TokenKind::Integer(i) => Ok(ParamValue::Integer(i)),
                    TokenKind::Float(f) => Ok(ParamValue::Float(f)),
                    _ => Err("Malformed JSON number".to_string()),
                }
            }
            Some(c) if is_identifier_start(c) => {
                let word = self.read_word();
                match word.to_ascii_lowercase().as_str() {
                    "true" => Ok(ParamValue::Boolean(true)),
                    "false" => Ok(ParamValue::Boolean(false)),
                    "null" => Ok(ParamValue::Null),
                    _ => Err(format!("Malformed JSON object: unexpected word '{word}'")),
                }
            }
            Some(c) => Err(format!("Malformed JSON object: unexpected '{c}'")),
            None => Err(UNTERMINATED_JSON.to_string()),
        }
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        if let Err(error) = self.skip_whitespace_and_comments() {
            return error;
        }
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eof);
        };

        match c {
            // Single-character tokens
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '.' => self.make_token(TokenKind::Dot),
            '+' => self.make_token(TokenKind::Plus),
            '*' => self.make_token(TokenKind::Star),
            '/' => self.make_token(TokenKind::Slash),
            '%' => self.make_token(TokenKind::Percent),
            '=' => self.make_token(TokenKind::Eq),
            '~' => self.make_token(TokenKind::Tilde),
            '?' => self.make_token(TokenKind::Question),

            // Potentially multi-character tokens, longest match first
            '-' => {
                if self.advance_if('>') {
                    self.make_token(TokenKind::Arrow)
                } else {
                    self.make_token(TokenKind::Minus)
                }
            }
            '<' => {
                let three = match (self.peek(), self.peek_next()) {
                    (Some('='), Some('>')) => Some(TokenKind::CosineDistance),
                    (Some('-'), Some('>')) => Some(TokenKind::L2Distance),
                    (Some('+'), Some('>')) => Some(TokenKind::L1Distance),
                    (Some('#'), Some('>')) => Some(TokenKind::InnerProduct),
                    (Some('~'), Some('>')) => Some(TokenKind::HammingDistance),
                    (Some('%'), Some('>')) => Some(TokenKind::JaccardDistance),
                    _ => None,
                };
                if let Some(kind) = three {
                    self.advance();
                    self.advance();
                    self.make_token(kind)
                } else if self.advance_if('=') {
                    self.make_token(TokenKind::LtEq)
                } else if self.advance_if('>') {
                    self.make_token(TokenKind::NotEq)
                } else {
                    self.make_token(TokenKind::Lt)
                }
            }
            '>' => {
                if self.advance_if('=') {
                    self.make_token(TokenKind::GtEq)
                } else {
                    self.make_token(TokenKind::Gt)
                }
            }
            '!' => {
                if self.advance_if('=') {
                    self.make_token(TokenKind::NotEq)
                } else if self.advance_if('~') {
                    self.make_token(TokenKind::NotTilde)
                } else {
                    self.error_token("Unexpected character: !")
                }
            }
            '|' => {
                if self.advance_if('|') {
                    self.make_token(TokenKind::Concat)
                } else {
                    self.error_token("Unexpected character: |")
                }
            }

            // Markers
            '@' => self.scan_variable(),
            ':' => {
                if self.peek().is_some_and(is_identifier_start) {
                    let name = self.read_word().to_string();
                    self.make_token(TokenKind::NamedParameter(name))
                } else {
                    self.error_token("Unexpected character: :")
                }
            }

            // Quoted forms
            '\'' | '"' => {
                self.pos = self.start;
                self.scan_string(c)
            }
            '`' => {
                self.pos = self.start;
                self.scan_quoted_identifier()
            }
            '{' => {
                self.pos = self.start;
                self.scan_json()
            }

            // Numbers
            c if c.is_ascii_digit() => {
                self.pos = self.start;
                self.scan_number()
            }

            // Identifiers and keywords
            c if is_identifier_start(c) => {
                self.pos = self.start;
                self.scan_identifier()
            }

            _ => self.error_token(format!("Unexpected character: {c}")),
        }
    }

    /// Repositions the lexer at a byte offset.
    pub fn reset(&mut self, pos: usize) {
        self.pos = pos.min(self.input.len());
        self.start = self.pos;
        self.finished = false;
    }

    /// Scans the balanced parenthesized group opening at byte offset `open` and
    /// returns the span strictly inside the outer parentheses. Quoted text and
    /// comments are skipped while balancing. The lexer continues after the
    /// closing parenthesis.
    ///
    /// # Errors
    ///
    /// Returns a lexical error if the group, or a quoted run inside it, is not
    /// terminated.
    pub fn scan_group(&mut self, open: usize) -> Result<Span, ParseError> {
        self.reset(open);
        if !self.advance_if('(') {
            return Err(ParseError::lexical(
                "Expected '('",
                Span::new(open, open),
                self.input,
            ));
        }
        let mut depth = 1_usize;
        loop {
            let Some(c) = self.peek() else {
                return Err(ParseError::lexical(
                    "Unterminated parenthesized text",
                    Span::new(open, self.pos),
                    self.input,
                ));
            };
            match c {
                '(' => {
                    depth += 1;
                    self.advance();
                }
                ')' => {
                    let close = self.pos;
                    self.advance();
                    depth -= 1;
                    if depth == 0 {
                        return Ok(Span::new(open + 1, close));
                    }
                }
                '\'' | '"' | '`' => {
                    let quote_start = self.pos;
                    if self.read_quoted(c).is_none() {
                        return Err(ParseError::lexical(
                            "Unterminated string literal",
                            Span::new(quote_start, self.pos),
                            self.input,
                        ));
                    }
                }
                // `<#>` is an operator, not a comment
                '<' if self.peek_next() == Some('#') => {
                    self.advance();
                    self.advance();
                }
                '#' => self.skip_line(),
                '-' if self.peek_next() == Some('-') => self.skip_line(),
                '/' if self.peek_next() == Some('*') => {
                    let comment_start = self.pos;
                    if !self.skip_block_comment() {
                        return Err(ParseError::lexical(
                            "Unterminated block comment",
                            Span::new(comment_start, self.pos),
                            self.input,
                        ));
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Consumes the rest of the input from byte offset `from` and returns its span,
    /// without surrounding whitespace and without a trailing `;`.
    pub fn take_rest(&mut self, from: usize) -> Span {
        let from = from.min(self.input.len());
        let rest = self.input[from..].trim_end();
        let rest = rest.strip_suffix(';').unwrap_or(rest).trim_end();
        let leading = rest.len() - rest.trim_start().len();
        self.reset(self.input.len());
        Span::new(from + leading, from + rest.len())
    }

    /// Returns true if `text` ends inside a `--` or `#` comment, so that anything
    /// written after it on the same line would be commented out.
    #[must_use]
    pub fn ends_in_line_comment(text: &str) -> bool {
        let mut lexer = Lexer::new(text);
        while let Some(c) = lexer.peek() {
            match c {
                '\'' | '"' | '`' => {
                    if lexer.read_quoted(c).is_none() {
                        return false;
                    }
                }
                '<' if lexer.peek_next() == Some('#') => {
                    lexer.advance();
                    lexer.advance();
                }
                '#' => {
                    lexer.skip_line();
                    if lexer.peek().is_none() {
                        return true;
                    }
                }
                '-' if lexer.peek_next() == Some('-') => {
                    lexer.skip_line();
                    if lexer.peek().is_none() {
                        return true;
                    }
                }
                '/' if lexer.peek_next() == Some('*') => {
                    if !lexer.skip_block_comment() {
                        return false;
                    }
                }
                _ => {
                    lexer.advance();
                }
            }
        }
        false
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        match &token.kind {
            TokenKind::Error(message) => {
                self.finished = true;
                Some(Err(ParseError::lexical(
                    message.clone(),
                    token.span,
                    self.input,
                )))
            }
            TokenKind::Eof => {
                self.finished = true;
                Some(Ok(token))
            }
            _ => Some(Ok(token)),
        }
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ErrorKind;

    fn tokenize(input: &str) -> Vec<Token> {
        Lexer::new(input)
            .collect::<Result<Vec<_>, _>>()
            .unwrap_or_else(|e| panic!("Failed to tokenize {input}: {e}"))
    }

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    fn lex_error(input: &str) -> ParseError {
        Lexer::new(input)
            .find_map(Result::err)
            .unwrap_or_else(|| panic!("Expected lexical error for {input}"))
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(token_kinds(""), vec![TokenKind::Eof]);
        assert_eq!(token_kinds("   \n\t  "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            token_kinds("SELECT -- comment\n# another\n/* multi\nline */ FROM"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(
            token_kinds("select SeLeCt"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_backtick_identifier_is_never_keyword() {
        assert_eq!(
            token_kinds("`select` `a``b`"),
            vec![
                TokenKind::Identifier("select".into()),
                TokenKind::Identifier("a`b".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_strings_double_the_quote() {
        assert_eq!(
            token_kinds(r#"'it''s' "say ""hi""" 'back\slash'"#),
            vec![
                TokenKind::String("it's".into()),
                TokenKind::DoubleQuotedString("say \"hi\"".into()),
                TokenKind::String("back\\slash".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            token_kinds("42 3.25 1e3 7.name"),
            vec![
                TokenKind::Integer(42),
                TokenKind::Float(3.25),
                TokenKind::Float(1000.0),
                TokenKind::Integer(7),
                TokenKind::Dot,
                TokenKind::Identifier("name".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_variables_keep_prefix_count() {
        assert_eq!(
            token_kinds("@version @@version @@session.autocommit"),
            vec![
                TokenKind::Variable("version".into()),
                TokenKind::SystemVariable("version".into()),
                TokenKind::SystemVariable("session.autocommit".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_parameters() {
        assert_eq!(
            token_kinds("? :col_1"),
            vec![
                TokenKind::Question,
                TokenKind::NamedParameter("col_1".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_multi_char_operators_longest_first() {
        assert_eq!(
            token_kinds("<=> <-> <+> <#> <~> <%> !~ || != <> >= <= -> < > ~"),
            vec![
                TokenKind::CosineDistance,
                TokenKind::L2Distance,
                TokenKind::L1Distance,
                TokenKind::InnerProduct,
                TokenKind::HammingDistance,
                TokenKind::JaccardDistance,
                TokenKind::NotTilde,
                TokenKind::Concat,
                TokenKind::NotEq,
                TokenKind::NotEq,
                TokenKind::GtEq,
                TokenKind::LtEq,
                TokenKind::Arrow,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Tilde,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_less_than_negative_is_not_vector_operator() {
        assert_eq!(
            token_kinds("a<-1"),
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::Lt,
                TokenKind::Minus,
                TokenKind::Integer(1),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_json_object() {
        let kinds = token_kinds(
            r#"{"user": "admin", 'pw': 'a''b{}[]', "port": 3306, "n": {"x": [1, -2.5, true, null]}}"#,
        );
        let TokenKind::Json(map) = &kinds[0] else {
            panic!("Expected JSON token, got {:?}", kinds[0]);
        };
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["user", "pw", "port", "n"]);
        assert_eq!(map.get("pw"), Some(&ParamValue::String("a'b{}[]".into())));
        assert_eq!(map.get("port"), Some(&ParamValue::Integer(3306)));
        let nested = map.get("n").and_then(ParamValue::as_map).unwrap();
        assert_eq!(
            nested.get("x"),
            Some(&ParamValue::List(vec![
                ParamValue::Integer(1),
                ParamValue::Float(-2.5),
                ParamValue::Boolean(true),
                ParamValue::Null,
            ]))
        );
    }

    #[test]
    fn test_malformed_json_is_lexical_error() {
        let err = lex_error(r#"{"a": }"#);
        assert_eq!(err.kind, ErrorKind::Lexical);
        let err = lex_error(r#"{"a": 1"#);
        assert_eq!(err.message, UNTERMINATED_JSON);
    }

    #[test]
    fn test_unterminated_literals() {
        assert_eq!(lex_error("'abc").message, "Unterminated string literal");
        assert_eq!(lex_error("`abc").message, "Unterminated quoted identifier");
        assert_eq!(lex_error("SELECT /* x").message, "Unterminated block comment");
    }

    #[test]
    fn test_unexpected_character_has_position() {
        let err = lex_error("SELECT\n  a $");
        assert_eq!(err.kind, ErrorKind::Lexical);
        assert_eq!(err.position.line, 2);
        assert_eq!(err.position.column, 5);
    }

    #[test]
    fn test_iterator_stops_after_eof() {
        let mut lexer = Lexer::new("a");
        assert!(lexer.next().is_some());
        assert!(matches!(lexer.next(), Some(Ok(t)) if t.is_eof()));
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_scan_group_is_balanced_and_verbatim() {
        let input = "int1 (select ')' , (1) from `t)` -- )\n) rest";
        let mut lexer = Lexer::new(input);
        let open = input.find('(').unwrap();
        let inner = lexer.scan_group(open).unwrap();
        assert_eq!(inner.slice(input), "select ')' , (1) from `t)` -- )\n");
        assert_eq!(lexer.next_token().kind, TokenKind::Identifier("rest".into()));
    }

    #[test]
    fn test_scan_group_unterminated() {
        let input = "(select (1)";
        let err = Lexer::new(input).scan_group(0).unwrap_err();
        assert_eq!(err.message, "Unterminated parenthesized text");
    }

    #[test]
    fn test_take_rest() {
        let input = "alter table t   disable keys ;  ";
        let mut lexer = Lexer::new(input);
        let span = lexer.take_rest(13);
        assert_eq!(span.slice(input), "disable keys");
        assert!(lexer.next_token().is_eof());
    }

    #[test]
    fn test_integer_beyond_i64_becomes_float() {
        assert_eq!(
            token_kinds("99999999999999999999"),
            vec![TokenKind::Float(1e20), TokenKind::Eof]
        );
    }

    #[test]
    fn test_float_out_of_range() {
        let err = lex_error("SELECT 1e400");
        assert_eq!(err.kind, ErrorKind::Lexical);
        assert!(err.message.starts_with("Invalid float"));
        let err = lex_error(&"9".repeat(400));
        assert!(err.message.starts_with("Invalid integer"));
    }

    #[test]
    fn test_json_nesting_limit() {
        let nested = |depth: usize| format!("{}1{}", "{a: ".repeat(depth), "}".repeat(depth));
        assert!(Lexer::with_max_depth(&nested(4), 4).all(|t| t.is_ok()));
        let err = Lexer::with_max_depth(&nested(5), 4)
            .find_map(Result::err)
            .unwrap();
        assert_eq!(err.message, "JSON nesting exceeds the limit of 4");
        let err = Lexer::with_max_depth("{a: [[[1]]]}", 3)
            .find_map(Result::err)
            .unwrap();
        assert_eq!(err.kind, ErrorKind::Lexical);
    }

    #[test]
    fn test_ends_in_line_comment() {
        assert!(Lexer::ends_in_line_comment("select 1 -- c"));
        assert!(Lexer::ends_in_line_comment("select 1 # c"));
        assert!(!Lexer::ends_in_line_comment("select 1 -- c\nfrom t"));
        assert!(!Lexer::ends_in_line_comment("select '-- c'"));
        assert!(!Lexer::ends_in_line_comment("select /* -- c */ 1"));
        assert!(!Lexer::ends_in_line_comment("select a <#> b"));
    }

    #[test]
    fn test_scan_group_keeps_inner_product_operator() {
        let input = "(select a <#> b)";
        let inner = Lexer::new(input).scan_group(0).unwrap();
        assert_eq!(inner.slice(input), "select a <#> b");
    }
}
