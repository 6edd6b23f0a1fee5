use crate::diagnostics::{Diagnostic, make_span};
use crate::qname::{NameTest, Namespaces, QName};
use crate::types::{Prim, SymbolSpace, Type};

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    start: usize,
    end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Bar,
    Amp,
    Question,
    Plus,
    Star,
    Name(String),
}

impl TokenKind {
    fn describe(&self) -> String {
        match self {
            TokenKind::LParen => "`(`".to_string(),
            TokenKind::RParen => "`)`".to_string(),
            TokenKind::LBrace => "`{`".to_string(),
            TokenKind::RBrace => "`}`".to_string(),
            TokenKind::Comma => "`,`".to_string(),
            TokenKind::Bar => "`|`".to_string(),
            TokenKind::Amp => "`&`".to_string(),
            TokenKind::Question => "`?`".to_string(),
            TokenKind::Plus => "`+`".to_string(),
            TokenKind::Star => "`*`".to_string(),
            TokenKind::Name(n) => format!("`{n}`"),
        }
    }
}

/// Parses a type written in the pretty-printer's syntax.
pub fn parse_type(src: &str, namespaces: &Namespaces) -> Result<Type, Vec<Diagnostic>> {
    let tokens = lex(src)?;
    let mut parser = Parser {
        src,
        tokens: &tokens,
        pos: 0,
        namespaces,
    };
    let t = parser.parse_all().map_err(|d| vec![d])?;
    if let Some(tok) = parser.peek() {
        return Err(vec![parser.error_at(
            tok,
            format!("unexpected {} after type", tok.kind.describe()),
        )]);
    }
    Ok(t)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')
}

fn lex(src: &str) -> Result<Vec<Token>, Vec<Diagnostic>> {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let bytes = src.as_bytes();
    let mut i = 0usize;

    while i < bytes.len() {
        let ch = bytes[i] as char;
        if ch.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        let single = match ch {
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            '{' => Some(TokenKind::LBrace),
            '}' => Some(TokenKind::RBrace),
            ',' => Some(TokenKind::Comma),
            '|' => Some(TokenKind::Bar),
            '&' => Some(TokenKind::Amp),
            '?' => Some(TokenKind::Question),
            '+' => Some(TokenKind::Plus),
            '*' => Some(TokenKind::Star),
            _ => None,
        };
        if let Some(kind) = single {
            tokens.push(Token {
                kind,
                start: i,
                end: i + 1,
            });
            i += 1;
            continue;
        }
        if ch.is_ascii_alphabetic() || ch == '_' {
            let start = i;
            while i < bytes.len() && is_name_char(bytes[i] as char) {
                i += 1;
            }
            tokens.push(Token {
                kind: TokenKind::Name(src[start..i].to_string()),
                start,
                end: i,
            });
            continue;
        }

        let len = src[i..].chars().next().map_or(1, char::len_utf8);
        errors.push(Diagnostic::new(
            "E-PARSE",
            format!("unexpected character `{}`", &src[i..i + len]),
            Some(make_span(src, i, i + len)),
        ));
        i += len;
    }

    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}

struct Parser<'a> {
    src: &'a str,
    tokens: &'a [Token],
    pos: usize,
    namespaces: &'a Namespaces,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&'a TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn peek_kind_at(&self, offset: usize) -> Option<&'a TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| &t.kind)
    }

    fn bump(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn error_at(&self, tok: &Token, message: impl Into<String>) -> Diagnostic {
        Diagnostic::new(
            "E-PARSE",
            message,
            Some(make_span(self.src, tok.start, tok.end)),
        )
    }

    fn error_here(&self, expected: &str) -> Diagnostic {
        match self.peek() {
            Some(tok) => self.error_at(
                tok,
                format!("expected {expected}, found {}", tok.kind.describe()),
            ),
            None => Diagnostic::new(
                "E-PARSE",
                format!("expected {expected}, found end of input"),
                Some(make_span(self.src, self.src.len(), self.src.len())),
            ),
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), Diagnostic> {
        if self.eat(&kind) {
            Ok(())
        } else {
            Err(self.error_here(&kind.describe()))
        }
    }

    fn parse_all(&mut self) -> Result<Type, Diagnostic> {
        let mut parts = vec![self.parse_choice()?];
        while self.eat(&TokenKind::Amp) {
            parts.push(self.parse_choice()?);
        }
        Ok(fold_right(parts, Type::all))
    }

    fn parse_choice(&mut self) -> Result<Type, Diagnostic> {
        let mut parts = vec![self.parse_seq()?];
        while self.eat(&TokenKind::Bar) {
            parts.push(self.parse_seq()?);
        }
        Ok(fold_right(parts, Type::choice))
    }

    fn parse_seq(&mut self) -> Result<Type, Diagnostic> {
        let mut parts = vec![self.parse_postfix()?];
        while self.eat(&TokenKind::Comma) {
            parts.push(self.parse_postfix()?);
        }
        Ok(fold_right(parts, Type::seq))
    }

    fn parse_postfix(&mut self) -> Result<Type, Diagnostic> {
        let mut t = self.parse_primary()?;
        loop {
            t = match self.peek_kind() {
                Some(TokenKind::Question) => Type::opt(t),
                Some(TokenKind::Plus) => Type::plus(t),
                Some(TokenKind::Star) => Type::star(t),
                _ => return Ok(t),
            };
            self.pos += 1;
        }
    }

    fn parse_primary(&mut self) -> Result<Type, Diagnostic> {
        let Some(tok) = self.peek() else {
            return Err(self.error_here("a type"));
        };
        match &tok.kind {
            TokenKind::LParen => {
                self.pos += 1;
                if self.eat(&TokenKind::RParen) {
                    return Ok(Type::Empty);
                }
                let t = self.parse_all()?;
                self.expect(TokenKind::RParen)?;
                Ok(t)
            }
            TokenKind::Name(word) => {
                self.pos += 1;
                self.parse_word(tok, word)
            }
            other => Err(self.error_at(tok, format!("expected a type, found {}", other.describe()))),
        }
    }

    fn parse_word(&mut self, tok: &'a Token, word: &str) -> Result<Type, Diagnostic> {
        if word == "none" {
            return Ok(Type::None);
        }
        if let Some(p) = Prim::from_keyword(word) {
            return Ok(Type::Prim(p));
        }
        if let Some(space) = SymbolSpace::from_keyword(word) {
            let reference = self.peek_kind() == Some(&TokenKind::LParen)
                && matches!(self.peek_kind_at(1), Some(TokenKind::Name(_)))
                && self.peek_kind_at(2) == Some(&TokenKind::RParen);
            if reference {
                self.pos += 1;
                let name = self.parse_qname()?;
                self.expect(TokenKind::RParen)?;
                return Ok(Type::named_in(space, name));
            }
        }
        match word {
            "element" => {
                let name = self.parse_name_test()?;
                Ok(Type::Elem(name, Box::new(self.parse_braced_content()?)))
            }
            "attribute" => {
                let name = self.parse_name_test()?;
                Ok(Type::Attr(name, Box::new(self.parse_braced_content()?)))
            }
            "document" => Ok(Type::doc(self.parse_braced_content()?)),
            "processing-instruction" => {
                let target = match self.peek_kind() {
                    Some(TokenKind::Star) => {
                        self.pos += 1;
                        None
                    }
                    Some(TokenKind::Name(target)) => {
                        self.pos += 1;
                        Some(target.clone())
                    }
                    _ => None,
                };
                self.expect(TokenKind::LBrace)?;
                self.expect(TokenKind::RBrace)?;
                Ok(Type::Pi(target))
            }
            _ => Ok(Type::named(self.resolve(tok, word)?)),
        }
    }

    fn parse_name_test(&mut self) -> Result<NameTest, Diagnostic> {
        match self.peek_kind() {
            Some(TokenKind::Star) => {
                self.pos += 1;
                Ok(NameTest::Wildcard)
            }
            Some(TokenKind::Name(_)) => Ok(NameTest::Name(self.parse_qname()?)),
            _ => Ok(NameTest::Wildcard),
        }
    }

    fn parse_braced_content(&mut self) -> Result<Type, Diagnostic> {
        self.expect(TokenKind::LBrace)?;
        if self.eat(&TokenKind::RBrace) {
            return Ok(Type::Empty);
        }
        let content = self.parse_all()?;
        self.expect(TokenKind::RBrace)?;
        Ok(content)
    }

    fn parse_qname(&mut self) -> Result<QName, Diagnostic> {
        match self.bump() {
            Some(tok) => match &tok.kind {
                TokenKind::Name(word) => self.resolve(tok, word),
                other => Err(self.error_at(tok, format!("expected a name, found {}", other.describe()))),
            },
            None => Err(self.error_here("a name")),
        }
    }

    fn resolve(&self, tok: &Token, lexical: &str) -> Result<QName, Diagnostic> {
        let well_formed = lexical.split(':').count() <= 2
            && lexical.split(':').all(|part| !part.is_empty());
        if !well_formed {
            return Err(self.error_at(tok, format!("malformed qualified name `{lexical}`")));
        }
        self.namespaces.resolve(lexical).ok_or_else(|| {
            self.error_at(
                tok,
                format!("unbound namespace prefix in `{lexical}`"),
            )
        })
    }
}

fn fold_right(parts: Vec<Type>, build: fn(Type, Type) -> Type) -> Type {
    parts
        .into_iter()
        .rev()
        .reduce(|acc, t| build(t, acc))
        .unwrap_or(Type::Empty)
}
