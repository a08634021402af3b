//! Parser for signature declarations.
//!
//! Transforms a token stream from the lexer into a [`FunctionDecl`].
//! Uses chumsky for parser combinators with good error messages. Only
//! declaration headers are parsed; extraction is responsible for locating
//! the header inside larger source text and slicing the token stream down
//! to it.

use chumsky::{input::ValueInput, prelude::*};

use crate::ast::{FunctionDecl, Param, ParamKind, TypeExpr};
use crate::lexer::{SpannedToken, Token};
use crate::value::Value;

/// Span type used throughout the parser.
pub type Span = SimpleSpan;

/// Parse error with location and context.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub span: Span,
    pub message: String,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {:?}", self.message, self.span)
    }
}

impl std::error::Error for ParseError {}

/// Parse a declaration header from an exact token slice.
///
/// The slice must start at the `def` token and end at the header's
/// terminating colon; [`crate::extract`] does that slicing.
pub fn parse_decl_tokens(
    tokens: &[SpannedToken],
    end_of_input: usize,
) -> Result<FunctionDecl, Vec<ParseError>> {
    let tokens: Vec<(Token, Span)> = tokens
        .iter()
        .map(|st| (st.token.clone(), (st.span.start..st.span.end).into()))
        .collect();

    let end_span: Span = (end_of_input..end_of_input).into();

    let parser = decl_parser();
    let result = parser.parse(tokens.as_slice().map(end_span, |(t, s)| (t, s)));

    result.into_result().map_err(|errs| {
        errs.into_iter()
            .map(|e| ParseError {
                span: *e.span(),
                message: e.to_string(),
            })
            .collect()
    })
}

/// Parse a standalone type expression, e.g. an annotation supplied as text.
pub fn parse_type_text(source: &str) -> Result<TypeExpr, Vec<ParseError>> {
    let tokens: Vec<(Token, Span)> = crate::lexer::tokenize(source)
        .into_iter()
        .map(|st| (st.token, (st.span.start..st.span.end).into()))
        .collect();

    let end_span: Span = (source.len()..source.len()).into();

    let parser = type_expr_parser();
    let result = parser.parse(tokens.as_slice().map(end_span, |(t, s)| (t, s)));

    result.into_result().map_err(|errs| {
        errs.into_iter()
            .map(|e| ParseError {
                span: *e.span(),
                message: e.to_string(),
            })
            .collect()
    })
}

/// Declaration header: `def name(params) [-> type] :`
fn decl_parser<'tokens, I>(
) -> impl Parser<'tokens, I, FunctionDecl, extra::Err<Rich<'tokens, Token, Span>>>
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    just(Token::Def)
        .ignore_then(ident_parser())
        .then_ignore(just(Token::LParen))
        .then(
            param_parser()
                .separated_by(just(Token::Comma))
                .allow_trailing()
                .collect::<Vec<_>>(),
        )
        .then_ignore(just(Token::RParen))
        .then(
            just(Token::Arrow)
                .ignore_then(type_expr_parser())
                .or_not(),
        )
        .then_ignore(just(Token::Colon))
        .map(|((name, params), returns)| FunctionDecl {
            name,
            params,
            returns,
        })
        .labelled("function declaration")
        .boxed()
}

/// One parameter: `**name`, `*name`, or `name [: type] [= literal]`.
fn param_parser<'tokens, I>(
) -> impl Parser<'tokens, I, Param, extra::Err<Rich<'tokens, Token, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    let annotation = just(Token::Colon).ignore_then(type_expr_parser()).or_not();

    let kwargs = just(Token::StarStar)
        .ignore_then(ident_parser())
        .then(annotation.clone())
        .map(|(name, annotation)| Param {
            name,
            kind: ParamKind::KwArgs,
            annotation,
            default: None,
        });

    let varargs = just(Token::Star)
        .ignore_then(ident_parser())
        .then(annotation.clone())
        .map(|(name, annotation)| Param {
            name,
            kind: ParamKind::VarArgs,
            annotation,
            default: None,
        });

    let plain = ident_parser()
        .then(annotation)
        .then(just(Token::Eq).ignore_then(literal_parser()).or_not())
        .map(|((name, annotation), default)| Param {
            name,
            kind: ParamKind::Positional,
            annotation,
            default,
        });

    choice((kwargs, varargs, plain)).labelled("parameter").boxed()
}

/// Type expression: a possibly dotted name with an optional subscript.
fn type_expr_parser<'tokens, I>(
) -> impl Parser<'tokens, I, TypeExpr, extra::Err<Rich<'tokens, Token, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    recursive(|ty| {
        let name = ident_parser()
            .separated_by(just(Token::Dot))
            .at_least(1)
            .collect::<Vec<_>>()
            .map(|parts| parts.join("."));

        // `None` is a keyword token but a perfectly good annotation.
        let base = name.or(just(Token::None).to("None".to_string()));

        let subscript_arg = choice((just(Token::Ellipsis).to(TypeExpr::Ellipsis), ty));

        base.then(
            just(Token::LBracket)
                .ignore_then(
                    subscript_arg
                        .separated_by(just(Token::Comma))
                        .allow_trailing()
                        .at_least(1)
                        .collect::<Vec<_>>(),
                )
                .then_ignore(just(Token::RBracket))
                .or_not(),
        )
        .map(|(base, args)| match args {
            Some(args) => TypeExpr::Generic { base, args },
            None => TypeExpr::Name(base),
        })
        .labelled("type annotation")
    })
    .boxed()
}

/// Literal default value: scalars, lists, tuples, and string-keyed dicts.
fn literal_parser<'tokens, I>(
) -> impl Parser<'tokens, I, Value, extra::Err<Rich<'tokens, Token, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    recursive(|lit| {
        let atom = select! {
            Token::True => Value::Bool(true),
            Token::False => Value::Bool(false),
            Token::None => Value::None,
            Token::Int(n) => Value::Int(n),
            Token::Float(x) => Value::Float(x),
            Token::Str(s) => Value::Str(s),
        };

        let negative = just(Token::Minus).ignore_then(select! {
            Token::Int(n) => Value::Int(-n),
            Token::Float(x) => Value::Float(-x),
        });

        let list = just(Token::LBracket)
            .ignore_then(
                lit.clone()
                    .separated_by(just(Token::Comma))
                    .allow_trailing()
                    .collect::<Vec<_>>(),
            )
            .then_ignore(just(Token::RBracket))
            .map(Value::List);

        let tuple = just(Token::LParen)
            .ignore_then(
                lit.clone()
                    .separated_by(just(Token::Comma))
                    .allow_trailing()
                    .collect::<Vec<_>>(),
            )
            .then_ignore(just(Token::RParen))
            .map(Value::Tuple);

        let entry = select! { Token::Str(s) => s }
            .then_ignore(just(Token::Colon))
            .then(lit);

        let dict = just(Token::LBrace)
            .ignore_then(
                entry
                    .separated_by(just(Token::Comma))
                    .allow_trailing()
                    .collect::<Vec<_>>(),
            )
            .then_ignore(just(Token::RBrace))
            .map(Value::Dict);

        choice((atom, negative, list, tuple, dict)).labelled("literal")
    })
    .boxed()
}

/// Bare identifier.
fn ident_parser<'tokens, I>(
) -> impl Parser<'tokens, I, String, extra::Err<Rich<'tokens, Token, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    select! {
        Token::Ident(name) => name,
    }
    .labelled("identifier")
}
