use std::{iter::Peekable, str::CharIndices};

use crate::{
  ast::Spanned,
  error::LexicalError,
  source::LineOffsets,
  token::{Lexeme, Literal, Token, TokenKind},
};
use tracing::{debug, trace};

/// A scanner for the lox language. This struct is
/// responsible for taking a source string and tokenizing it
pub struct Scanner<'a> {
  /// The input source string
  source: &'a str,

  /// A peekable char indicies iterator
  char_indices: Peekable<CharIndices<'a>>,

  /// The offsets each line starts at
  line_offsets: Vec<usize>,

  /// The start of the current token
  start: usize,

  /// The line the current token started on
  start_line: u32,

  /// The offset of the next unconsumed char
  current: usize,

  /// Set once an unterminated string is found, after which
  /// only eof is produced
  halted: bool,
}

impl<'a> Scanner<'a> {
  /// Create a new scanner from the provided source string.
  /// The scanner produces a sequence of tokens
  /// by calling the `scan_token` method
  pub fn new(source: &'a str) -> Scanner<'a> {
    assert!(
      source.len() < u32::MAX as usize,
      "Can only read files less than {} bytes",
      u32::MAX
    );

    let mut line_offsets = Vec::with_capacity(source_line_heuristic_guess(source.len()));
    line_offsets.push(0);

    Scanner {
      source,
      char_indices: source.char_indices().peekable(),
      line_offsets,
      start: 0,
      start_line: 1,
      current: 0,
      halted: false,
    }
  }

  /// Scan the whole source. Lexical errors are collected rather
  /// than returned as tokens and the token list always ends with
  /// a single eof token
  ///
  /// # Examples
  /// ```
  /// use lox_interp::scanner::Scanner;
  /// use lox_interp::token::TokenKind;
  ///
  /// let (tokens, errors) = Scanner::new("1 + $").scan();
  /// let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind()).collect();
  ///
  /// assert_eq!(kinds, vec![TokenKind::Number, TokenKind::Plus, TokenKind::Eof]);
  /// assert_eq!(errors[0].to_string(), "[line 1] Error: Unexpected character: $");
  /// ```
  pub fn scan(&mut self) -> (Vec<Token<'a>>, Vec<LexicalError>) {
    let mut tokens = Vec::with_capacity(source_token_heuristic_guess(self.source.len()));
    let mut errors = vec![];

    loop {
      let token = self.scan_token();

      match token.kind() {
        TokenKind::Error => errors.push(LexicalError::new(token.str(), token.line(), token.span())),
        TokenKind::Eof => {
          tokens.push(token);
          break;
        },
        _ => {
          trace!(kind = %token.kind(), lexeme = token.str(), line = token.line(), "scanned token");
          tokens.push(token);
        },
      }
    }

    debug!(
      tokens = tokens.len(),
      errors = errors.len(),
      "scanned source"
    );
    (tokens, errors)
  }

  /// Scan the next token from the source
  /// string provided.
  pub fn scan_token(&mut self) -> Token<'a> {
    if self.halted {
      return self.eof();
    }

    // advance whitespace
    self.skip_white_space();

    self.start = self.current;
    self.start_line = self.line();

    let c = match self.next() {
      Some(c) => c,
      None => return self.eof(),
    };

    match c {
      '(' => self.make_token_source(TokenKind::LeftParen),
      ')' => self.make_token_source(TokenKind::RightParen),
      '{' => self.make_token_source(TokenKind::LeftBrace),
      '}' => self.make_token_source(TokenKind::RightBrace),
      ';' => self.make_token_source(TokenKind::Semicolon),
      ',' => self.make_token_source(TokenKind::Comma),
      '.' => self.make_token_source(TokenKind::Dot),
      '-' => self.make_token_source(TokenKind::Minus),
      '+' => self.make_token_source(TokenKind::Plus),
      '/' => self.make_token_source(TokenKind::Slash),
      '*' => self.make_token_source(TokenKind::Star),
      '=' => self.match_or(TokenKind::EqualEqual, TokenKind::Equal),
      '<' => self.match_or(TokenKind::LessEqual, TokenKind::Less),
      '>' => self.match_or(TokenKind::GreaterEqual, TokenKind::Greater),
      '!' => self.match_or(TokenKind::BangEqual, TokenKind::Bang),
      '"' => self.string(),
      _ => {
        if is_digit(c) {
          return self.number();
        }

        if is_alpha(c) {
          return self.identifier();
        }

        self.error_token_owned(format!("Unexpected character: {c}"))
      },
    }
  }

  /// Retrieve this files line offsets after it has
  /// been scanned
  pub fn line_offsets(mut self) -> LineOffsets {
    while let Some(c) = self.next() {
      if c == '\n' {
        self.new_line();
      }
    }

    self.line_offsets.shrink_to_fit();
    LineOffsets::new(self.line_offsets, self.source.len())
  }

  /// Generate an identifier token
  fn identifier(&mut self) -> Token<'a> {
    // advance until we hit whitespace or a special char
    while self.next_if(|c| is_alpha(*c) || is_digit(*c)).is_some() {}

    // identifier if we are actually a keyword
    self.make_token_source(self.identifier_type())
  }

  /// Generate a number token
  fn number(&mut self) -> Token<'a> {
    // advance consecutive digits
    while self.next_if(|c| is_digit(*c)).is_some() {}

    // a trailing dot is only part of the number when digits follow it
    if let (Some('.'), Some(next)) = (self.peek(), self.peek_next()) {
      if is_digit(next) {
        self.next();

        while self.next_if(|c| is_digit(*c)).is_some() {}
      }
    }

    let token = self.make_token_source(TokenKind::Number);
    match token.str().parse::<f64>() {
      Ok(number) => token.with_literal(Literal::Number(number)),
      Err(_) => token,
    }
  }

  /// Generate a string token. Strings have no escapes so the
  /// first closing quote ends the literal
  fn string(&mut self) -> Token<'a> {
    loop {
      match self.next() {
        Some('"') => break,
        Some('\n') => self.new_line(),
        Some(_) => (),
        None => {
          self.halted = true;
          return self.error_token("Unterminated string.");
        },
      }
    }

    let content = &self.source[self.start + 1..self.current - 1];
    self
      .make_token_source(TokenKind::String)
      .with_literal(Literal::String(content))
  }

  /// Advance through whitespace effectively throwing it away
  fn skip_white_space(&mut self) {
    while let Some(c) = self.peek() {
      match c {
        ' ' | '\r' | '\t' => {
          self.next();
        },
        '\n' => {
          self.next();
          self.new_line();
        },
        '/' => {
          if self.peek_next() == Some('/') {
            while self.next_if(|c| *c != '\n').is_some() {}
          } else {
            return;
          }
        },
        _ => return,
      }
    }
  }

  /// Identify if the current slice is a keyword.
  /// This uses a short of hard coded trie
  fn identifier_type(&self) -> TokenKind {
    let mut chars = self.current_slice().chars();

    match chars.next() {
      Some(c1) => match c1 {
        'a' => self.check_keyword(1, "nd", TokenKind::And),
        'c' => self.check_keyword(1, "lass", TokenKind::Class),
        'e' => self.check_keyword(1, "lse", TokenKind::Else),
        'f' => match chars.next() {
          Some(c2) => match c2 {
            'a' => self.check_keyword(2, "lse", TokenKind::False),
            'o' => self.check_keyword(2, "r", TokenKind::For),
            'u' => self.check_keyword(2, "n", TokenKind::Fun),
            _ => TokenKind::Identifier,
          },
          None => TokenKind::Identifier,
        },
        'i' => self.check_keyword(1, "f", TokenKind::If),
        'n' => self.check_keyword(1, "il", TokenKind::Nil),
        'o' => self.check_keyword(1, "r", TokenKind::Or),
        'p' => self.check_keyword(1, "rint", TokenKind::Print),
        'r' => self.check_keyword(1, "eturn", TokenKind::Return),
        's' => self.check_keyword(1, "uper", TokenKind::Super),
        't' => match chars.next() {
          Some(c2) => match c2 {
            'h' => self.check_keyword(2, "is", TokenKind::This),
            'r' => self.check_keyword(2, "ue", TokenKind::True),
            _ => TokenKind::Identifier,
          },
          None => TokenKind::Identifier,
        },
        'v' => self.check_keyword(1, "ar", TokenKind::Var),
        'w' => self.check_keyword(1, "hile", TokenKind::While),
        _ => TokenKind::Identifier,
      },
      None => TokenKind::Identifier,
    }
  }

  /// Check if the remainder of the current slice matches the rest
  /// of the keyword
  fn check_keyword(&self, start: usize, rest: &str, kind: TokenKind) -> TokenKind {
    // we can do a straight addition here because identifiers are ascii
    let start_index = self.start + start;

    if start_index <= self.current && rest == &self.source[start_index..self.current] {
      return kind;
    }

    TokenKind::Identifier
  }

  /// Make a token from the current state of the scanner
  fn make_token_source(&self, kind: TokenKind) -> Token<'a> {
    Token::new(
      kind,
      Lexeme::Slice(self.current_slice()),
      self.start_line,
      self.start as u32,
      self.current as u32,
    )
  }

  /// Make the two char kind if the next char is '=' otherwise the single char kind
  fn match_or(&mut self, matched: TokenKind, single: TokenKind) -> Token<'a> {
    if self.match_char('=') {
      self.make_token_source(matched)
    } else {
      self.make_token_source(single)
    }
  }

  /// Make the terminating eof token
  fn eof(&self) -> Token<'a> {
    let end = self.source.len() as u32;
    Token::new(TokenKind::Eof, Lexeme::Slice(""), self.line(), end, end)
  }

  /// Make a new error token
  fn error_token(&self, message: &'a str) -> Token<'a> {
    Token::new(
      TokenKind::Error,
      Lexeme::Slice(message),
      self.start_line,
      self.start as u32,
      self.current as u32,
    )
  }

  /// Make a owned error error token
  fn error_token_owned(&self, message: String) -> Token<'a> {
    Token::new(
      TokenKind::Error,
      Lexeme::Owned(message),
      self.start_line,
      self.start as u32,
      self.current as u32,
    )
  }

  /// Advance the character iterator if condition is met
  fn next_if(&mut self, f: impl FnOnce(&char) -> bool) -> Option<char> {
    self.char_indices.next_if(|(_, c)| f(c)).map(|(index, c)| {
      self.current = index + c.len_utf8();
      c
    })
  }

  /// Get the next character
  fn next(&mut self) -> Option<char> {
    self.char_indices.next().map(|(index, c)| {
      self.current = index + c.len_utf8();
      c
    })
  }

  /// Peek the current character
  fn peek(&mut self) -> Option<char> {
    self.char_indices.peek().map(|(_, c)| *c)
  }

  /// Peek the character after the current one
  fn peek_next(&self) -> Option<char> {
    let mut chars = self.source[self.current..].chars();
    chars.next();
    chars.next()
  }

  /// Insert a new line
  fn new_line(&mut self) {
    self.line_offsets.push(self.current);
  }

  /// The 1-based line of the next unconsumed char
  fn line(&self) -> u32 {
    self.line_offsets.len() as u32
  }

  /// Get the current str slice
  fn current_slice(&self) -> &'a str {
    &self.source[self.start..self.current]
  }

  /// match the current token against an expected
  fn match_char(&mut self, expected: char) -> bool {
    self.next_if(|c| *c == expected).is_some()
  }
}

/// Is the char a digit
fn is_digit(c: char) -> bool {
  c.is_ascii_digit()
}

/// Is the char a letter or underscore
fn is_alpha(c: char) -> bool {
  c.is_ascii_alphabetic() || c == '_'
}

/// A loose estimate for how many characters are in a typical line
const fn source_line_heuristic_guess(len: usize) -> usize {
  len / 20
}

/// A loose estimate for how many characters are in a typical token
const fn source_token_heuristic_guess(len: usize) -> usize {
  len / 3
}

#[cfg(test)]
mod test {
  use super::*;

  fn token_gen() -> Vec<(TokenKind, &'static str)> {
    vec![
      (TokenKind::LeftParen, "("),
      (TokenKind::RightParen, ")"),
      (TokenKind::LeftBrace, "{"),
      (TokenKind::RightBrace, "}"),
      (TokenKind::Comma, ","),
      (TokenKind::Dot, "."),
      (TokenKind::Minus, "-"),
      (TokenKind::Plus, "+"),
      (TokenKind::Semicolon, ";"),
      (TokenKind::Slash, "/"),
      (TokenKind::Star, "*"),
      (TokenKind::Bang, "!"),
      (TokenKind::BangEqual, "!="),
      (TokenKind::Equal, "="),
      (TokenKind::EqualEqual, "=="),
      (TokenKind::Greater, ">"),
      (TokenKind::GreaterEqual, ">="),
      (TokenKind::Less, "<"),
      (TokenKind::LessEqual, "<="),
      (TokenKind::Identifier, "example"),
      (TokenKind::String, "\"example\""),
      (TokenKind::Number, "12345"),
      (TokenKind::And, "and"),
      (TokenKind::Class, "class"),
      (TokenKind::Else, "else"),
      (TokenKind::False, "false"),
      (TokenKind::For, "for"),
      (TokenKind::Fun, "fun"),
      (TokenKind::If, "if"),
      (TokenKind::Nil, "nil"),
      (TokenKind::Or, "or"),
      (TokenKind::Print, "print"),
      (TokenKind::Return, "return"),
      (TokenKind::Super, "super"),
      (TokenKind::This, "this"),
      (TokenKind::True, "true"),
      (TokenKind::Var, "var"),
      (TokenKind::While, "while"),
      (TokenKind::Error, "$"),
      (TokenKind::Eof, ""),
    ]
  }

  fn kinds(source: &str) -> Vec<TokenKind> {
    let (tokens, _) = Scanner::new(source).scan();
    tokens.iter().map(|token| token.kind()).collect()
  }

  #[test]
  fn single_token() {
    let examples = token_gen();
    assert_eq!(examples.len(), TokenKind::VARIANT_COUNT);

    for (kind, example) in examples {
      let mut scanner = Scanner::new(example);
      let scanned_token = scanner.scan_token();
      assert_eq!(scanned_token.kind(), kind, "scanning {example:?}");
    }
  }

  #[test]
  fn scan_token() {
    let source = "
    var x = \"something\";
    x != \"something\"
    ";

    let mut scanner = Scanner::new(source);
    let mut token = scanner.scan_token();
    assert_eq!(token.start(), 5);
    assert_eq!(token.end(), 8);
    assert_eq!(token.kind(), TokenKind::Var);
    assert_eq!(token.str(), "var");
    assert_eq!(token.line(), 2);

    token = scanner.scan_token();
    assert_eq!(token.start(), 9);
    assert_eq!(token.end(), 10);
    assert_eq!(token.kind(), TokenKind::Identifier);
    assert_eq!(token.str(), "x");

    token = scanner.scan_token();
    assert_eq!(token.start(), 11);
    assert_eq!(token.end(), 12);
    assert_eq!(token.kind(), TokenKind::Equal);
    assert_eq!(token.str(), "=");
  }

  #[test]
  fn multiple_tokens() {
    let (tokens, errors) = Scanner::new("1 + 2 * 3").scan();
    assert!(errors.is_empty());

    let expected = [
      (TokenKind::Number, "1"),
      (TokenKind::Plus, "+"),
      (TokenKind::Number, "2"),
      (TokenKind::Star, "*"),
      (TokenKind::Number, "3"),
      (TokenKind::Eof, ""),
    ];

    assert_eq!(tokens.len(), expected.len());
    for (token, (kind, lexeme)) in tokens.iter().zip(expected.iter()) {
      assert_eq!(token.kind(), *kind);
      assert_eq!(token.str(), *lexeme);
    }
  }

  #[test]
  fn punctuation_preserves_order() {
    assert_eq!(
      kinds("(){};,.-+*/ ! != = == < <= > >="),
      vec![
        TokenKind::LeftParen,
        TokenKind::RightParen,
        TokenKind::LeftBrace,
        TokenKind::RightBrace,
        TokenKind::Semicolon,
        TokenKind::Comma,
        TokenKind::Dot,
        TokenKind::Minus,
        TokenKind::Plus,
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::Bang,
        TokenKind::BangEqual,
        TokenKind::Equal,
        TokenKind::EqualEqual,
        TokenKind::Less,
        TokenKind::LessEqual,
        TokenKind::Greater,
        TokenKind::GreaterEqual,
        TokenKind::Eof,
      ]
    );

    assert_eq!(
      kinds("!==="),
      vec![TokenKind::BangEqual, TokenKind::EqualEqual, TokenKind::Eof]
    );
  }

  #[test]
  fn empty_string() {
    let (tokens, errors) = Scanner::new("").scan();

    assert!(errors.is_empty());
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind(), TokenKind::Eof);
    assert_eq!(tokens[0].str(), "");
    assert_eq!(tokens[0].line(), 1);
  }

  #[test]
  fn comments() {
    let (tokens, _) = Scanner::new("// leading\n1 // trailing / * \n/ 2").scan();
    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind()).collect();

    assert_eq!(
      kinds,
      vec![
        TokenKind::Number,
        TokenKind::Slash,
        TokenKind::Number,
        TokenKind::Eof
      ]
    );
    assert_eq!(tokens[0].line(), 2);
    assert_eq!(tokens[1].line(), 3);
  }

  #[test]
  fn numbers() {
    let (tokens, _) = Scanner::new("42 2.75 5.000 7.").scan();

    assert_eq!(tokens[0].literal(), Some(Literal::Number(42.0)));
    assert_eq!(tokens[1].literal(), Some(Literal::Number(2.75)));
    assert_eq!(tokens[2].str(), "5.000");
    assert_eq!(tokens[2].to_string(), "NUMBER 5.000 5.0");

    // a trailing dot is not part of the number
    assert_eq!(tokens[3].str(), "7");
    assert_eq!(tokens[4].kind(), TokenKind::Dot);
    assert_eq!(tokens[5].kind(), TokenKind::Eof);
  }

  #[test]
  fn strings() {
    let (tokens, errors) = Scanner::new("\"multi\nline\" \"\"").scan();
    assert!(errors.is_empty());

    assert_eq!(tokens[0].kind(), TokenKind::String);
    assert_eq!(tokens[0].str(), "\"multi\nline\"");
    assert_eq!(tokens[0].literal(), Some(Literal::String("multi\nline")));
    assert_eq!(tokens[0].line(), 1);

    assert_eq!(tokens[1].literal(), Some(Literal::String("")));
    assert_eq!(tokens[1].line(), 2);
    assert_eq!(tokens[2].line(), 2);
  }

  #[test]
  fn unterminated_string_halts() {
    let (tokens, errors) = Scanner::new("1\n\"abc\n+ 2").scan();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line, 2);
    assert_eq!(errors[0].message, "Unterminated string.");
    assert_eq!(errors[0].to_string(), "[line 2] Error: Unterminated string.");

    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind()).collect();
    assert_eq!(kinds, vec![TokenKind::Number, TokenKind::Eof]);
  }

  #[test]
  fn unexpected_characters_accumulate() {
    let (tokens, errors) = Scanner::new(",.$(#\n@").scan();

    let messages: Vec<String> = errors.iter().map(|error| error.to_string()).collect();
    assert_eq!(
      messages,
      vec![
        "[line 1] Error: Unexpected character: $",
        "[line 1] Error: Unexpected character: #",
        "[line 2] Error: Unexpected character: @",
      ]
    );

    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind()).collect();
    assert_eq!(
      kinds,
      vec![
        TokenKind::Comma,
        TokenKind::Dot,
        TokenKind::LeftParen,
        TokenKind::Eof
      ]
    );
  }

  #[test]
  fn identifiers_maximal_munch() {
    let (tokens, _) = Scanner::new("orchid or _or or_ f fun funny t this thistle").scan();
    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind()).collect();

    assert_eq!(
      kinds,
      vec![
        TokenKind::Identifier,
        TokenKind::Or,
        TokenKind::Identifier,
        TokenKind::Identifier,
        TokenKind::Identifier,
        TokenKind::Fun,
        TokenKind::Identifier,
        TokenKind::Identifier,
        TokenKind::This,
        TokenKind::Identifier,
        TokenKind::Eof,
      ]
    );
  }

  #[test]
  fn keywords_are_case_sensitive() {
    assert_eq!(
      kinds("And NIL True"),
      vec![
        TokenKind::Identifier,
        TokenKind::Identifier,
        TokenKind::Identifier,
        TokenKind::Eof
      ]
    );
  }

  #[test]
  fn line_offsets() {
    let source = "
    var x = \"something\";
    x != \"something\"
    }";

    let mut scanner = Scanner::new(source);

    scanner.scan_token();
    let offsets = scanner.line_offsets();

    assert_eq!(offsets.lines(), 4);
    assert_eq!(offsets.line_range(0), Some(0..1));
    assert_eq!(offsets.line_range(1), Some(1..26));
    assert_eq!(offsets.line_range(2), Some(26..47));
    assert_eq!(offsets.line_range(3), Some(47..52));
    assert_eq!(offsets.line_range(4), None);
  }

  #[test]
  fn line_offsets_after_scan() {
    let mut scanner = Scanner::new("1\n\"a\nb\"\n");
    let (tokens, errors) = scanner.scan();
    assert_eq!(tokens.len(), 3);
    assert!(errors.is_empty());

    let offsets = scanner.line_offsets();
    assert_eq!(offsets.lines(), 4);
    assert_eq!(offsets.line_index(3), Some(1));
    assert_eq!(offsets.line_range(2), Some(5..8));
    assert_eq!(offsets.line_range(3), Some(8..8));
  }
}
