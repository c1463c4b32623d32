use log::debug;

use crate::{
    ast::{
        ast::Stmt,
        statements::{BlockStmt, ExpressionStmt, FnDeclStmt, Param, ReturnStmt, VarDeclStmt},
        types::PrimitiveType,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::expr::parse_expr,
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    let handler = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied();
    if let Some(handler) = handler {
        return handler(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_expression_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    let expression = parse_expr(parser)?;

    parser.expect(TokenKind::Semicolon, "';' after expression")?;

    Ok(Stmt::Expression(ExpressionStmt { expression }))
}

/// Consumes a type keyword.
pub fn parse_type(parser: &mut Parser<'_>, expected: &str) -> Result<PrimitiveType, Error> {
    match PrimitiveType::from_token_kind(parser.current_token_kind()) {
        Some(ty) => {
            parser.advance()?;
            Ok(ty)
        }
        None => Err(parser.unexpected(expected)),
    }
}

/// `type name` followed by either a parameter list or an initializer.
pub fn parse_declaration_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    let declared_type = parse_type(parser, "type keyword")?;
    let identifier = parser.expect(TokenKind::Identifier, "variable or function name")?.value;

    if parser.check(TokenKind::OpenParen) {
        parse_fn_decl(parser, declared_type, identifier)
    } else {
        parse_var_decl(parser, declared_type, identifier)
    }
}

fn parse_var_decl(
    parser: &mut Parser<'_>,
    declared_type: PrimitiveType,
    identifier: String,
) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Assignment, "'=' after variable name")?;
    let initializer = parse_expr(parser)?;
    parser.expect(TokenKind::Semicolon, "';' after variable declaration")?;

    debug!("parsed variable declaration: {} {}", declared_type, identifier);

    Ok(Stmt::VarDecl(VarDeclStmt {
        declared_type,
        identifier,
        initializer,
    }))
}

fn parse_fn_decl(
    parser: &mut Parser<'_>,
    return_type: PrimitiveType,
    identifier: String,
) -> Result<Stmt, Error> {
    parser.expect(TokenKind::OpenParen, "'(' after function name")?;

    let mut parameters = Vec::new();
    if !parser.check(TokenKind::CloseParen) {
        loop {
            let param_type = parse_type(parser, "parameter type")?;
            let name = parser.expect(TokenKind::Identifier, "parameter name")?.value;
            parameters.push(Param {
                param_type,
                identifier: name,
            });

            if !parser.match_kind(TokenKind::Comma)? {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseParen, "')' after parameters")?;

    let body = parse_block(parser)?;

    debug!(
        "parsed function declaration: {} {} with {} parameters",
        return_type,
        identifier,
        parameters.len()
    );

    Ok(Stmt::FnDecl(FnDeclStmt {
        return_type,
        identifier,
        parameters,
        body,
    }))
}

pub fn parse_block_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block(parser)?))
}

pub fn parse_block(parser: &mut Parser<'_>) -> Result<BlockStmt, Error> {
    parser.nested(|parser| {
        parser.expect(TokenKind::OpenCurly, "'{' before block")?;

        let mut statements = Vec::new();
        while !parser.check(TokenKind::CloseCurly) && parser.has_tokens() {
            statements.push(parse_stmt(parser)?);
        }

        parser.expect(TokenKind::CloseCurly, "'}' after block")?;

        Ok(BlockStmt { body: statements })
    })
}

pub fn parse_return_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    parser.advance()?;

    let value = if parser.check(TokenKind::Semicolon) {
        None
    } else {
        Some(parse_expr(parser)?)
    };

    parser.expect(TokenKind::Semicolon, "';' after return value")?;

    Ok(Stmt::Return(ReturnStmt { value }))
}
