/// Produces tokens on demand from a source buffer. Tokens borrow their lexeme
/// from the buffer, so nothing is allocated while scanning.
pub struct Scanner<'source> {
    source: &'source str,
    start: usize,
    current: usize,
    line: u32,
}

impl<'source> Scanner<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            line: 1,
        }
    }

    /// The next token. Keeps returning `Eof` once the source is exhausted.
    pub fn scan_token(&mut self) -> Token<'source> {
        self.skip_whitespace();
        self.start = self.current;

        let Some(c) = self.advance() else {
            return self.make_token(TokenType::Eof);
        };

        let token_type = match c {
            b'(' => TokenType::LeftParen,
            b')' => TokenType::RightParen,
            b'{' => TokenType::LeftBrace,
            b'}' => TokenType::RightBrace,
            b';' => TokenType::Semicolon,
            b',' => TokenType::Comma,
            b'.' => TokenType::Dot,
            b'-' => TokenType::Minus,
            b'+' => TokenType::Plus,
            b'/' => TokenType::Slash,
            b'*' => TokenType::Star,
            b'!' => self.either(b'=', TokenType::BangEqual, TokenType::Bang),
            b'=' => self.either(b'=', TokenType::EqualEqual, TokenType::Equal),
            b'<' => self.either(b'=', TokenType::LessEqual, TokenType::Less),
            b'>' => self.either(b'=', TokenType::GreaterEqual, TokenType::Greater),
            b'"' => return self.string(),
            c if c.is_ascii_digit() => self.number(),
            c if is_identifier_start(c) => self.identifier(),
            _ => return self.error_token("Unexpected character."),
        };
        self.make_token(token_type)
    }

    fn either(&mut self, expected: u8, matched: TokenType, single: TokenType) -> TokenType {
        if self.peek() == Some(expected) {
            self.current += 1;
            matched
        } else {
            single
        }
    }

    fn advance(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.current += 1;
        Some(c)
    }

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.current).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.source.as_bytes().get(self.current + 1).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                b' ' | b'\r' | b'\t' => self.current += 1,
                b'\n' => {
                    self.line += 1;
                    self.current += 1;
                }
                // Comments run until the end of the line, newline excluded
                b'/' if self.peek_next() == Some(b'/') => {
                    while self.peek().is_some_and(|c| c != b'\n') {
                        self.current += 1;
                    }
                }
                _ => return,
            }
        }
    }

    fn string(&mut self) -> Token<'source> {
        loop {
            match self.advance() {
                None => return self.error_token("Unterminated string."),
                Some(b'"') => return self.make_token(TokenType::String),
                Some(b'\n') => self.line += 1,
                Some(_) => {}
            }
        }
    }

    fn number(&mut self) -> TokenType {
        self.skip_digits();
        // A trailing '.' isn't part of the number
        if self.peek() == Some(b'.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.current += 1;
            self.skip_digits();
        }
        TokenType::Number
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.current += 1;
        }
    }

    fn identifier(&mut self) -> TokenType {
        while self
            .peek()
            .is_some_and(|c| is_identifier_start(c) || c.is_ascii_digit())
        {
            self.current += 1;
        }
        keyword(&self.source[self.start..self.current]).unwrap_or(TokenType::Identifier)
    }

    fn make_token(&self, token_type: TokenType) -> Token<'source> {
        Token {
            token_type,
            lexeme: &self.source[self.start..self.current],
            line: self.line,
        }
    }

    fn error_token(&self, message: &'static str) -> Token<'source> {
        Token {
            token_type: TokenType::Error,
            lexeme: message,
            line: self.line,
        }
    }
}

impl<'source> Iterator for Scanner<'source> {
    type Item = Token<'source>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.scan_token();
        (token.token_type != TokenType::Eof).then_some(token)
    }
}

fn is_identifier_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn keyword(lexeme: &str) -> Option<TokenType> {
    let token_type = match lexeme {
        "and" => TokenType::And,
        "class" => TokenType::Class,
        "else" => TokenType::Else,
        "false" => TokenType::False,
        "for" => TokenType::For,
        "fun" => TokenType::Fun,
        "if" => TokenType::If,
        "nil" => TokenType::Nil,
        "or" => TokenType::Or,
        "print" => TokenType::Print,
        "return" => TokenType::Return,
        "super" => TokenType::Super,
        "this" => TokenType::This,
        "true" => TokenType::True,
        "var" => TokenType::Var,
        "while" => TokenType::While,
        _ => return None,
    };
    Some(token_type)
}

// Tokens are pretty small, so we'll pass them around by value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'source> {
    pub token_type: TokenType,
    /// The matched source slice, or the message of an error token
    pub lexeme: &'source str,
    pub line: u32,
}

impl Token<'_> {
    pub fn len(&self) -> usize {
        self.lexeme.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexeme.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    // Single-character tokens.
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character tokens.
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals.
    Identifier,
    String,
    Number,

    // Keywords.
    And,
    Class,
    Else,
    False,
    For,
    Fun,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Error,
    Eof,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn types(source: &str) -> Vec<TokenType> {
        Scanner::new(source).map(|t| t.token_type).collect()
    }

    #[test]
    fn punctuation_and_operators() {
        use TokenType::*;
        assert_eq!(
            types("(){};,.-+/* ! != = == < <= > >="),
            vec![
                LeftParen, RightParen, LeftBrace, RightBrace, Semicolon, Comma, Dot, Minus,
                Plus, Slash, Star, Bang, BangEqual, Equal, EqualEqual, Less, LessEqual, Greater,
                GreaterEqual
            ]
        );
    }

    #[test]
    fn keywords_and_identifiers() {
        use TokenType::*;
        assert_eq!(
            types("and class else false for fun if nil or print return super this true var while"),
            vec![
                And, Class, Else, False, For, Fun, If, Nil, Or, Print, Return, Super, This, True,
                Var, While
            ]
        );
        assert_eq!(types("andy f fo _this9 t th"), vec![Identifier; 6]);
    }

    #[test]
    fn numbers() {
        let tokens: Vec<Token> = Scanner::new("12 3.25 7.").collect();
        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme).collect();
        assert_eq!(lexemes, vec!["12", "3.25", "7", "."]);
        assert_eq!(tokens[1].len(), 4);
        assert_eq!(tokens[3].token_type, TokenType::Dot);
    }

    #[test]
    fn lines_are_tracked_through_comments_and_strings() {
        let source = "var a; // comment\n\"multi\nline\" b\n\n c";
        let tokens: Vec<Token> = Scanner::new(source).collect();
        let lines: Vec<(&str, u32)> = tokens.iter().map(|t| (t.lexeme, t.line)).collect();
        assert_eq!(
            lines,
            vec![
                ("var", 1),
                ("a", 1),
                (";", 1),
                ("\"multi\nline\"", 3),
                ("b", 3),
                ("c", 5)
            ]
        );
    }

    #[test]
    fn errors_are_tokens() {
        let mut scanner = Scanner::new("@ \"open");
        let unexpected = scanner.scan_token();
        assert_eq!(unexpected.token_type, TokenType::Error);
        assert_eq!(unexpected.lexeme, "Unexpected character.");
        let unterminated = scanner.scan_token();
        assert_eq!(unterminated.token_type, TokenType::Error);
        assert_eq!(unterminated.lexeme, "Unterminated string.");
    }

    #[test]
    fn eof_repeats_at_the_end() {
        let mut scanner = Scanner::new("x //trailing");
        assert_eq!(scanner.scan_token().token_type, TokenType::Identifier);
        for _ in 0..3 {
            let eof = scanner.scan_token();
            assert_eq!(eof.token_type, TokenType::Eof);
            assert!(eof.is_empty());
        }
    }

    #[test]
    fn lone_slash_is_a_token() {
        assert_eq!(types("/"), vec![TokenType::Slash]);
    }
}
