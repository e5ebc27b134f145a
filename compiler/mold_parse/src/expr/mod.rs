//! Infix expressions.
//!
//! String values of `::ref`, `::get` and `::when`, and the keys of
//! `::case`, are small expressions: literals, reference paths, arithmetic,
//! comparison and boolean connectives. Operators become applications of the
//! corresponding built-in functions, so an expression evaluates exactly like
//! the equivalent nested `::add`/`::lt`/... directives would.
//!
//! Precedence, loosest first: `or`, `and`, `== !=`, `< <= > >=`, `+ -`,
//! `* /`, then unary `-` and `not`. Binary operators associate left.

mod token;

use std::str::FromStr;

use logos::Logos;
use mold_functions::Registry;
use mold_ir::{ApplyArgs, Ast, NodeId, NodeKind, Path};
use mold_value::{Decimal, Value};

use crate::names::is_env_name;
use crate::ParseError;
use token::{unquote, Token};

/// Expression tree before it is placed in the arena.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Expr {
    Literal(Value),
    Ref(Path),
    Apply(&'static str, Vec<Expr>),
}

/// The node kind for a reference path: `$name` reads a dynamic variable,
/// `UPPER_CASE` an OS variable, anything else a lexical binding.
pub(crate) fn reference_kind(path: Path) -> NodeKind {
    if let Some(name) = path.name.strip_prefix('$') {
        let name = name.to_string();
        NodeKind::GetDyn(Path { name, ..path })
    } else if is_env_name(&path.name) {
        NodeKind::GetEnvVar(path)
    } else {
        NodeKind::GetLet(path)
    }
}

/// Parse `source` and place it in `ast` under `parent`.
pub(crate) fn parse_expression(
    source: &str,
    parent: NodeId,
    ast: &mut Ast,
    registry: &Registry,
) -> Result<NodeId, ParseError> {
    let expr = ExprParser::new(source)?.parse()?;
    lower(expr, parent, ast, registry)
}

fn lower(
    expr: Expr,
    parent: NodeId,
    ast: &mut Ast,
    registry: &Registry,
) -> Result<NodeId, ParseError> {
    match expr {
        Expr::Literal(value) => Ok(ast.alloc(parent, NodeKind::Constant(value))),
        Expr::Ref(path) => Ok(ast.alloc(parent, reference_kind(path))),
        Expr::Apply(name, operands) => {
            let function = registry
                .lookup(name)
                .ok_or_else(|| ParseError::UnknownFunction {
                    name: name.to_string(),
                })?;
            let id = ast.reserve(parent);
            let args = operands
                .into_iter()
                .map(|operand| lower(operand, id, ast, registry))
                .collect::<Result<ApplyArgs, _>>()?;
            ast.set_kind(id, NodeKind::Apply { function, args });
            Ok(id)
        }
    }
}

struct ExprParser<'a> {
    source: &'a str,
    tokens: Vec<(Token, &'a str)>,
    pos: usize,
}

impl<'a> ExprParser<'a> {
    fn new(source: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Token::lexer(source);
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next() {
            match token {
                Ok(token) => tokens.push((token, lexer.slice())),
                Err(()) => {
                    return Err(ParseError::expression(
                        source,
                        format!("unexpected {:?} at offset {}", lexer.slice(), lexer.span().start),
                    ));
                }
            }
        }
        Ok(ExprParser {
            source,
            tokens,
            pos: 0,
        })
    }

    fn parse(mut self) -> Result<Expr, ParseError> {
        if self.tokens.is_empty() {
            return Err(ParseError::expression(self.source, "empty expression"));
        }
        let expr = self.or()?;
        match self.tokens.get(self.pos) {
            None => Ok(expr),
            Some((_, slice)) => Err(self.error(format!("unexpected {slice:?}"))),
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::expression(self.source, message)
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).map(|(token, _)| *token)
    }

    fn advance(&mut self) -> Option<(Token, &'a str)> {
        let next = self.tokens.get(self.pos).copied();
        if next.is_some() {
            self.pos += 1;
        }
        next
    }

    /// One left-associative precedence level.
    fn binary(
        &mut self,
        operand: fn(&mut Self) -> Result<Expr, ParseError>,
        operators: &[(Token, &'static str)],
    ) -> Result<Expr, ParseError> {
        let mut left = operand(self)?;
        while let Some(function) = self.peek().and_then(|next| {
            operators
                .iter()
                .find(|(token, _)| *token == next)
                .map(|(_, function)| *function)
        }) {
            self.pos += 1;
            let right = operand(self)?;
            left = Expr::Apply(function, vec![left, right]);
        }
        Ok(left)
    }

    fn or(&mut self) -> Result<Expr, ParseError> {
        self.binary(Self::and, &[(Token::Or, "or")])
    }

    fn and(&mut self) -> Result<Expr, ParseError> {
        self.binary(Self::equality, &[(Token::And, "and")])
    }

    fn equality(&mut self) -> Result<Expr, ParseError> {
        self.binary(Self::comparison, &[(Token::EqEq, "eq"), (Token::NotEq, "neq")])
    }

    fn comparison(&mut self) -> Result<Expr, ParseError> {
        self.binary(
            Self::additive,
            &[
                (Token::Lt, "lt"),
                (Token::LtEq, "lte"),
                (Token::Gt, "gt"),
                (Token::GtEq, "gte"),
            ],
        )
    }

    fn additive(&mut self) -> Result<Expr, ParseError> {
        self.binary(Self::term, &[(Token::Plus, "add"), (Token::Minus, "sub")])
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        self.binary(Self::unary, &[(Token::Star, "mul"), (Token::Slash, "div")])
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(match self.unary()? {
                    Expr::Literal(Value::Number(n)) => Expr::Literal(Value::Number(-n)),
                    operand => Expr::Apply("neg", vec![operand]),
                })
            }
            Some(Token::Not) => {
                self.pos += 1;
                Ok(Expr::Apply("not", vec![self.unary()?]))
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        let Some((token, slice)) = self.advance() else {
            return Err(self.error("unexpected end of expression"));
        };
        match token {
            Token::Number => Decimal::from_str(slice)
                .map(|n| Expr::Literal(Value::Number(n)))
                .map_err(|e| self.error(e.to_string())),
            Token::Str => Ok(Expr::Literal(Value::String(unquote(slice)))),
            Token::True => Ok(Expr::Literal(Value::Bool(true))),
            Token::False => Ok(Expr::Literal(Value::Bool(false))),
            Token::Null => Ok(Expr::Literal(Value::Null)),
            Token::Path => Ok(Expr::Ref(Path::parse_dotted(slice))),
            Token::LParen => {
                let inner = self.or()?;
                match self.advance() {
                    Some((Token::RParen, _)) => Ok(inner),
                    _ => Err(self.error("expected `)`")),
                }
            }
            _ => Err(self.error(format!("unexpected {slice:?}"))),
        }
    }
}
