use crate::{
    ast::{
        ast::Expr,
        expressions::{BinaryExpr, BinaryOperator, CallExpr, LiteralExpr, LiteralKind, SymbolExpr},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// Parses `primary (op primary)*`.
///
/// All four operators share one precedence level and fold to the left, so
/// `a + b * c` is `(a + b) * c`.
pub fn parse_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    let mut left = parse_primary_expr(parser)?;

    while let Some(operator) = BinaryOperator::from_token_kind(parser.current_token_kind()) {
        parser.advance()?;
        let right = parse_primary_expr(parser)?;

        left = Expr::Binary(BinaryExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        });
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    let handler = parser.get_nud_lookup().get(&parser.current_token_kind()).copied();

    match handler {
        Some(handler) => handler(parser),
        None => Err(parser.unexpected("expression")),
    }
}

pub fn parse_literal_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    let token = parser.advance()?;
    let kind = if token.kind == TokenKind::String {
        LiteralKind::String
    } else {
        LiteralKind::Number
    };

    Ok(Expr::Literal(LiteralExpr {
        kind,
        value: token.value,
    }))
}

/// A name, or a call when the name is directly followed by `(`.
pub fn parse_symbol_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    let name = parser.advance()?.value;

    if parser.check(TokenKind::OpenParen) {
        return parse_call_expr(parser, name);
    }

    Ok(Expr::Symbol(SymbolExpr { value: name }))
}

pub fn parse_call_expr(parser: &mut Parser<'_>, callee: String) -> Result<Expr, Error> {
    parser.nested(|parser| {
        parser.advance()?;

        let mut arguments = vec![];
        if !parser.check(TokenKind::CloseParen) {
            loop {
                arguments.push(parse_expr(parser)?);

                if !parser.match_kind(TokenKind::Comma)? {
                    break;
                }
            }
        }

        parser.expect(TokenKind::CloseParen, "')' after arguments")?;

        Ok(Expr::Call(CallExpr { callee, arguments }))
    })
}

pub fn parse_grouping_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    parser.nested(|parser| {
        parser.advance()?;
        let expr = parse_expr(parser)?;
        parser.expect(TokenKind::CloseParen, "')' after expression")?;

        Ok(expr)
    })
}
