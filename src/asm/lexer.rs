/*!
lexer.rs - Source text to token stream.

Single forward pass with one character of lookahead (two around the
radix prefix). Whitespace separates tokens and is discarded; comments
are kept as tokens so later tooling can see them, and the parser skips
them.

Identifiers whose upper-cased spelling matches one of the 56 mnemonics
become instruction tokens; everything else stays an identifier (label
names, index registers).
*/

use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

use crate::asm::span::{Position, Span};
use crate::cpu::table::Mnemonic;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Instruction(Mnemonic),
    Identifier(String),
    Number(u16),
    Operator(char),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character '{ch}' at {pos}")]
    UnexpectedChar { ch: char, pos: Position },
    #[error("unexpected end of input inside block comment opened at {pos}")]
    UnterminatedComment { pos: Position },
    #[error("bad numeric literal '{literal}' at {pos}")]
    BadNumber { literal: String, pos: Position },
}

/// Characters that form single-character operator tokens.
const OPERATORS: [char; 5] = ['(', ')', '#', ',', ':'];

pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn pos(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(c) = self.peek() {
            let start = self.pos();
            match c {
                ' ' | '\t' | '\r' | '\n' => {
                    self.bump();
                }
                _ if OPERATORS.contains(&c) => {
                    self.bump();
                    tokens.push(self.token(TokenKind::Operator(c), start));
                }
                '/' => tokens.push(self.comment(start)?),
                _ if c.is_ascii_digit() => tokens.push(self.number(start)?),
                _ if c.is_ascii_alphabetic() || c == '_' => tokens.push(self.identifier(start)),
                other => {
                    return Err(LexError::UnexpectedChar {
                        ch: other,
                        pos: start,
                    })
                }
            }
        }
        Ok(tokens)
    }

    fn token(&self, kind: TokenKind, start: Position) -> Token {
        Token {
            kind,
            span: Span::new(start, self.pos()),
        }
    }

    fn comment(&mut self, start: Position) -> Result<Token, LexError> {
        self.bump(); // leading '/'
        match self.peek() {
            Some('/') => {
                self.bump();
                let mut text = String::new();
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    text.push(c);
                    self.bump();
                }
                Ok(self.token(TokenKind::Comment(text.trim().to_string()), start))
            }
            Some('*') => {
                self.bump();
                let mut text = String::new();
                loop {
                    match self.bump() {
                        Some('*') if self.peek() == Some('/') => {
                            self.bump();
                            break;
                        }
                        Some(c) => text.push(c),
                        None => return Err(LexError::UnterminatedComment { pos: start }),
                    }
                }
                Ok(self.token(TokenKind::Comment(text.trim().to_string()), start))
            }
            _ => Err(LexError::UnexpectedChar {
                ch: '/',
                pos: start,
            }),
        }
    }

    fn number(&mut self, start: Position) -> Result<Token, LexError> {
        let mut literal = String::new();
        let first = self.bump().unwrap_or('0');
        literal.push(first);

        // A radix prefix is only recognized directly after a leading 0.
        let radix = if first == '0' {
            match self.peek() {
                Some('x') => {
                    literal.push(self.bump().unwrap_or('x'));
                    16
                }
                Some('o') => {
                    literal.push(self.bump().unwrap_or('o'));
                    8
                }
                Some('b') => {
                    literal.push(self.bump().unwrap_or('b'));
                    2
                }
                _ => 10,
            }
        } else {
            10
        };

        let mut digits = String::new();
        if radix == 10 {
            digits.push(first);
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                literal.push(c);
                digits.push(c);
                self.bump();
            } else {
                break;
            }
        }

        let value = u32::from_str_radix(&digits, radix)
            .ok()
            .filter(|&v| v <= u16::MAX as u32)
            .ok_or_else(|| LexError::BadNumber {
                literal: literal.clone(),
                pos: start,
            })?;
        Ok(self.token(TokenKind::Number(value as u16), start))
    }

    fn identifier(&mut self, start: Position) -> Token {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        let kind = match Mnemonic::from_str(&name) {
            Some(m) => TokenKind::Instruction(m),
            None => TokenKind::Identifier(name),
        };
        self.token(kind, start)
    }
}
