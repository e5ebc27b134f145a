//! Expression tokens.

use logos::{Lexer, Logos};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum Token {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    #[token("and")]
    #[token("&&")]
    And,
    #[token("or")]
    #[token("||")]
    Or,
    #[token("not")]
    #[token("!")]
    Not,

    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'[^']*'")]
    Str,

    /// `name`, `$name`, `$`, `ENV_NAME`, each optionally followed by
    /// `.segment`s. Hyphens join words (`user-name`) but never precede a
    /// digit, so `n-1` is a subtraction.
    #[regex(r"\$?[a-zA-Z_][a-zA-Z0-9_]*", path_tail)]
    #[token("$", path_tail)]
    Path,
}

/// Extend a path token over `-word` and `.segment` continuations.
fn path_tail(lex: &mut Lexer<'_, Token>) -> bool {
    let rest = lex.remainder().as_bytes();
    let is_word = |b: &u8| b.is_ascii_alphanumeric() || *b == b'_';
    let mut len = 0;
    loop {
        match rest.get(len) {
            Some(b'-') if rest.get(len + 1).is_some_and(u8::is_ascii_alphabetic) => len += 2,
            Some(b'.') if rest.get(len + 1).is_some_and(is_word) => len += 2,
            Some(b) if len > 0 && is_word(b) => len += 1,
            _ => break,
        }
    }
    lex.bump(len);
    true
}

/// The text of a string literal token, without quotes.
pub(crate) fn unquote(slice: &str) -> String {
    let inner = &slice[1..slice.len() - 1];
    if slice.starts_with('\'') {
        return inner.to_string();
    }
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => {}
            },
            c => out.push(c),
        }
    }
    out
}
