//! Lexer for the signature language, using logos.
//!
//! The lexer is total: characters that belong to no token (operators inside
//! a function body, decorators, stray punctuation) lex as [`Token::Unknown`]
//! instead of failing. Extraction only cares about the tokens of a
//! declaration header, so everything around the header merely has to be
//! survivable, not meaningful.

use logos::Logos;

/// Strip the surrounding quotes from a string literal and process escapes.
fn unescape(raw: &str) -> String {
    let inner = &raw[1..raw.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('0') => out.push('\0'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Tokens of the signature language.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f\\]+")]
#[logos(skip(r"#[^\n]*", allow_greedy = true))]
pub enum Token {
    #[token("def")]
    Def,
    #[token("True")]
    True,
    #[token("False")]
    False,
    #[token("None")]
    None,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("=")]
    Eq,
    #[token("->")]
    Arrow,
    #[token("*")]
    Star,
    #[token("**")]
    StarStar,
    #[token("...")]
    Ellipsis,
    #[token(".")]
    Dot,
    #[token("-")]
    Minus,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| unescape(lex.slice()))]
    #[regex(r"'([^'\\]|\\.)*'", |lex| unescape(lex.slice()))]
    Str(String),

    /// Any character the grammar has no use for. Tolerated so function
    /// bodies and surrounding code never poison the token stream.
    #[regex(r"[^ \t\r\n\f]", |lex| lex.slice().chars().next().unwrap_or('\u{0}'), priority = 0)]
    Unknown(char),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Def => write!(f, "def"),
            Token::True => write!(f, "True"),
            Token::False => write!(f, "False"),
            Token::None => write!(f, "None"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Comma => write!(f, ","),
            Token::Colon => write!(f, ":"),
            Token::Eq => write!(f, "="),
            Token::Arrow => write!(f, "->"),
            Token::Star => write!(f, "*"),
            Token::StarStar => write!(f, "**"),
            Token::Ellipsis => write!(f, "..."),
            Token::Dot => write!(f, "."),
            Token::Minus => write!(f, "-"),
            Token::Ident(name) => write!(f, "{name}"),
            Token::Int(n) => write!(f, "{n}"),
            Token::Float(x) => write!(f, "{x}"),
            Token::Str(s) => write!(f, "{s:?}"),
            Token::Unknown(ch) => write!(f, "{ch}"),
        }
    }
}

/// A token with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: std::ops::Range<usize>,
}

/// Tokenize source text. Never fails: unlexable input becomes
/// [`Token::Unknown`].
pub fn tokenize(source: &str) -> Vec<SpannedToken> {
    Token::lexer(source)
        .spanned()
        .map(|(result, span)| SpannedToken {
            token: result.unwrap_or(Token::Unknown('\u{0}')),
            span,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).into_iter().map(|st| st.token).collect()
    }

    #[test]
    fn simple_header() {
        let tokens = kinds("def f(a: int):");
        assert_eq!(
            tokens,
            vec![
                Token::Def,
                Token::Ident("f".into()),
                Token::LParen,
                Token::Ident("a".into()),
                Token::Colon,
                Token::Ident("int".into()),
                Token::RParen,
                Token::Colon,
            ]
        );
    }

    #[test]
    fn variadic_markers() {
        assert_eq!(
            kinds("*args **kw"),
            vec![
                Token::Star,
                Token::Ident("args".into()),
                Token::StarStar,
                Token::Ident("kw".into()),
            ]
        );
    }

    #[test]
    fn arrow_beats_minus() {
        assert_eq!(kinds("->"), vec![Token::Arrow]);
        assert_eq!(kinds("- >"), vec![Token::Minus, Token::Unknown('>')]);
    }

    #[test]
    fn string_literals_unescape() {
        assert_eq!(kinds(r#""a\"b""#), vec![Token::Str("a\"b".into())]);
        assert_eq!(kinds("'default'"), vec![Token::Str("default".into())]);
        assert_eq!(kinds(r#""line\n""#), vec![Token::Str("line\n".into())]);
    }

    #[test]
    fn numbers() {
        assert_eq!(kinds("42"), vec![Token::Int(42)]);
        assert_eq!(kinds("3.14"), vec![Token::Float(3.14)]);
        assert_eq!(kinds("1e3"), vec![Token::Float(1000.0)]);
    }

    #[test]
    fn ellipsis_beats_dot() {
        assert_eq!(kinds("..."), vec![Token::Ellipsis]);
        assert_eq!(kinds("a.b"), vec![
            Token::Ident("a".into()),
            Token::Dot,
            Token::Ident("b".into()),
        ]);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(kinds("def # trailing\nf"), vec![
            Token::Def,
            Token::Ident("f".into()),
        ]);
    }

    #[test]
    fn unknown_characters_are_tolerated() {
        let tokens = kinds("@decorator\ndef f():\n    return a % b");
        assert!(tokens.contains(&Token::Unknown('@')));
        assert!(tokens.contains(&Token::Def));
        assert!(tokens.contains(&Token::Unknown('%')));
    }
}
