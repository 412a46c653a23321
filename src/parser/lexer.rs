//! Logos-based lexer for Logo source lines.
//!
//! Two token sets cover the line's two lexical worlds. Outside
//! brackets, comments run from `;` to end of line and words carry a
//! leading quote marker. Inside a list literal nothing is interpreted:
//! every whitespace-separated run (semicolons, quotes and all) is one
//! verbatim element. The wrapper iterator morphs between the two logos
//! lexers on `[` and `]`.

use logos::Logos;
use text_size::TextSize;

use crate::base::Span;

/// A token with its unified kind, source text and position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
}

/// Token kinds over both lexer modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `123`, `12.5`, `.5` — no sign; unary minus is grammar.
    Number,
    /// `"word` — the quote is a marker, not part of the value.
    Word,
    /// `:name` — the colon is a marker, not part of the name.
    Variable,
    /// `fd`, `Ob.1c.2d` — candidate procedure name.
    ProcName,
    /// A verbatim run inside a list literal.
    ListElement,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Plus,
    Minus,
    Star,
    Slash,
    Equals,
    /// Anything the lexer does not recognize.
    Error,
}

/// Tokens of the ordinary statement context. Whitespace and `;`
/// comments are skipped in one pattern.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+|;[^\n]*")]
enum StatementToken {
    #[regex(r"[0-9]+(\.[0-9]*)?|\.[0-9]+")]
    Number,

    // A word is a quote, an alphanumeric, then any run of characters
    // that are not whitespace, parentheses, brackets or semicolons.
    #[regex(r#""[0-9A-Za-z][^ \t\r\n()\[\];]*"#)]
    Word,

    #[regex(r":[^ \t\r\n()\[\];]+")]
    Variable,

    // Interior dots are allowed between alphanumeric segments.
    #[regex(r"[A-Za-z][0-9A-Za-z]*(\.[0-9A-Za-z]+)*")]
    ProcName,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("=")]
    Equals,
}

/// Tokens inside a list literal: brackets and verbatim runs.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
enum ListToken {
    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[regex(r"[^ \t\r\n\[\]]+")]
    Element,
}

impl From<StatementToken> for TokenKind {
    fn from(token: StatementToken) -> Self {
        match token {
            StatementToken::Number => TokenKind::Number,
            StatementToken::Word => TokenKind::Word,
            StatementToken::Variable => TokenKind::Variable,
            StatementToken::ProcName => TokenKind::ProcName,
            StatementToken::LBracket => TokenKind::LBracket,
            StatementToken::RBracket => TokenKind::RBracket,
            StatementToken::LParen => TokenKind::LParen,
            StatementToken::RParen => TokenKind::RParen,
            StatementToken::Plus => TokenKind::Plus,
            StatementToken::Minus => TokenKind::Minus,
            StatementToken::Star => TokenKind::Star,
            StatementToken::Slash => TokenKind::Slash,
            StatementToken::Equals => TokenKind::Equals,
        }
    }
}

impl From<ListToken> for TokenKind {
    fn from(token: ListToken) -> Self {
        match token {
            ListToken::LBracket => TokenKind::LBracket,
            ListToken::RBracket => TokenKind::RBracket,
            ListToken::Element => TokenKind::ListElement,
        }
    }
}

enum Mode<'a> {
    Statement(logos::Lexer<'a, StatementToken>),
    List(logos::Lexer<'a, ListToken>),
}

/// Lexer wrapping the two logos-generated tokenizers.
pub struct Lexer<'a> {
    mode: Option<Mode<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            mode: Some(Mode::Statement(StatementToken::lexer(input))),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.mode.take()? {
            Mode::Statement(mut lex) => {
                let token = lex.next();
                let text = lex.slice();
                let span = span_of(lex.span());
                match token {
                    None => None,
                    Some(Ok(StatementToken::LBracket)) => {
                        self.mode = Some(Mode::List(lex.morph()));
                        Some(Token {
                            kind: TokenKind::LBracket,
                            text,
                            span,
                        })
                    }
                    Some(Ok(other)) => {
                        self.mode = Some(Mode::Statement(lex));
                        Some(Token {
                            kind: other.into(),
                            text,
                            span,
                        })
                    }
                    Some(Err(())) => {
                        self.mode = Some(Mode::Statement(lex));
                        Some(Token {
                            kind: TokenKind::Error,
                            text,
                            span,
                        })
                    }
                }
            }
            Mode::List(mut lex) => {
                let token = lex.next();
                let text = lex.slice();
                let span = span_of(lex.span());
                match token {
                    None => None,
                    Some(Ok(ListToken::RBracket)) => {
                        self.mode = Some(Mode::Statement(lex.morph()));
                        Some(Token {
                            kind: TokenKind::RBracket,
                            text,
                            span,
                        })
                    }
                    Some(Ok(other)) => {
                        self.mode = Some(Mode::List(lex));
                        Some(Token {
                            kind: other.into(),
                            text,
                            span,
                        })
                    }
                    Some(Err(())) => {
                        self.mode = Some(Mode::List(lex));
                        Some(Token {
                            kind: TokenKind::Error,
                            text,
                            span,
                        })
                    }
                }
            }
        }
    }
}

/// Tokenize an entire line into a Vec.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

fn span_of(range: std::ops::Range<usize>) -> Span {
    Span::new(
        TextSize::new(range.start as u32),
        TextSize::new(range.end as u32),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_numbers() {
        assert_eq!(kinds("3 12345 12.345 .345 12."), vec![TokenKind::Number; 5]);
    }

    #[test]
    fn test_words_and_variables() {
        assert_eq!(kinds("\"hello \"3.14 \",max.32"), vec![TokenKind::Word; 3]);
        assert_eq!(kinds(":hello :var+1 :,max.32"), vec![TokenKind::Variable; 3]);
        // A quote or colon alone is not a token.
        assert!(kinds("\"").contains(&TokenKind::Error));
        assert!(kinds(":").contains(&TokenKind::Error));
        // Parentheses end a word or variable.
        assert_eq!(
            kinds(":var)"),
            vec![TokenKind::Variable, TokenKind::RParen]
        );
    }

    #[test]
    fn test_proc_names() {
        assert_eq!(
            kinds("test FD h264 h45.32 Ob.1c.2d"),
            vec![TokenKind::ProcName; 5]
        );
        // Leading digits make a number, not a name.
        assert_eq!(
            kinds("33.a"),
            vec![TokenKind::Number, TokenKind::ProcName]
        );
    }

    #[test]
    fn test_operators_and_brackets() {
        assert_eq!(
            kinds("( 1 + 2 ) * 3 / 4 - 5 = 6"),
            vec![
                TokenKind::LParen,
                TokenKind::Number,
                TokenKind::Plus,
                TokenKind::Number,
                TokenKind::RParen,
                TokenKind::Star,
                TokenKind::Number,
                TokenKind::Slash,
                TokenKind::Number,
                TokenKind::Minus,
                TokenKind::Number,
                TokenKind::Equals,
                TokenKind::Number,
            ]
        );
    }

    #[test]
    fn test_comments_stripped_outside_brackets() {
        assert_eq!(kinds("; just a comment"), vec![]);
        assert_eq!(
            kinds("print 10;world"),
            vec![TokenKind::ProcName, TokenKind::Number]
        );
        assert_eq!(
            kinds("print \"hello;world"),
            vec![TokenKind::ProcName, TokenKind::Word]
        );
    }

    #[test]
    fn test_list_mode_is_verbatim() {
        let tokens = tokenize("print [hello;world \"2+3]");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::ProcName,
                TokenKind::LBracket,
                TokenKind::ListElement,
                TokenKind::ListElement,
                TokenKind::RBracket,
            ]
        );
        assert_eq!(tokens[2].text, "hello;world");
        assert_eq!(tokens[3].text, "\"2+3");
    }

    #[test]
    fn test_mode_returns_after_bracket() {
        assert_eq!(
            kinds("repeat 4 [fd 10] rt 90"),
            vec![
                TokenKind::ProcName,
                TokenKind::Number,
                TokenKind::LBracket,
                TokenKind::ListElement,
                TokenKind::ListElement,
                TokenKind::RBracket,
                TokenKind::ProcName,
                TokenKind::Number,
            ]
        );
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let tokens = tokenize("fd 10");
        assert_eq!(tokens[0].span.start(), 0);
        assert_eq!(tokens[0].span.end(), 2);
        assert_eq!(tokens[1].span.start(), 3);
        assert_eq!(tokens[1].span.end(), 5);
    }
}
