//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs:
//! - Variable declarations
//! - Function declarations and parameter lists
//! - Expressions, associativity and calls
//! - Blocks and return statements
//! - Syntax errors

use crate::{
    ast::{
        ast::{Expr, Stmt, StmtType},
        expressions::{BinaryExpr, BinaryOperator, CallExpr, LiteralExpr, LiteralKind, SymbolExpr},
        statements::BlockStmt,
        types::PrimitiveType,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::{tokenize, Lexer},
        tokens::{Token, TokenKind},
    },
};

use super::parser::{parse, parse_tokens, MAX_NESTING_DEPTH};

fn parse_str(source: &str) -> Result<BlockStmt, Error> {
    parse(Lexer::new(source, Some("test.lang".to_string())))
}

fn symbol(name: &str) -> Expr {
    Expr::Symbol(SymbolExpr { value: name.to_string() })
}

fn number(value: &str) -> Expr {
    Expr::Literal(LiteralExpr {
        kind: LiteralKind::Number,
        value: value.to_string(),
    })
}

fn binary(left: Expr, operator: BinaryOperator, right: Expr) -> Expr {
    Expr::Binary(BinaryExpr {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    })
}

fn only_expression(program: &BlockStmt) -> &Expr {
    assert_eq!(program.len(), 1);
    match &program.body[0] {
        Stmt::Expression(stmt) => &stmt.expression,
        other => panic!("Expected expression statement, got {:?}", other),
    }
}

fn expect_unexpected(error: &Error) -> (&str, &str, TokenKind) {
    match error.get_internal() {
        ErrorImpl::UnexpectedToken { expected, found, kind } => (expected.as_str(), found.as_str(), *kind),
        other => panic!("Expected UnexpectedToken, got {:?}", other),
    }
}

#[test]
fn test_parse_empty_program() {
    let program = parse_str("").unwrap();
    assert!(program.is_empty());

    let program = parse_str("  // only a comment\n").unwrap();
    assert!(program.is_empty());
}

#[test]
fn test_parse_variable_declaration() {
    let program = parse_str("int x = 10;").unwrap();

    assert_eq!(program.len(), 1);
    match &program.body[0] {
        Stmt::VarDecl(decl) => {
            assert_eq!(decl.declared_type, PrimitiveType::Int);
            assert_eq!(decl.declared_type.to_string(), "int");
            assert_eq!(decl.identifier, "x");
            assert_eq!(decl.initializer, number("10"));
        }
        other => panic!("Expected variable declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_declarations_of_every_type() {
    let program = parse_str("int a = 1; float b = 2.5; str c = \"hi\";").unwrap();
    let types: Vec<PrimitiveType> = program
        .iter()
        .map(|stmt| match stmt {
            Stmt::VarDecl(decl) => decl.declared_type,
            other => panic!("Expected variable declaration, got {:?}", other),
        })
        .collect();

    assert_eq!(types, vec![PrimitiveType::Int, PrimitiveType::Float, PrimitiveType::Str]);

    match &program.body[2] {
        Stmt::VarDecl(decl) => assert_eq!(
            decl.initializer,
            Expr::Literal(LiteralExpr {
                kind: LiteralKind::String,
                value: "hi".to_string(),
            })
        ),
        other => panic!("Expected variable declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_function_declaration() {
    let program = parse_str("int add(int a, int b) { return a + b; }").unwrap();

    assert_eq!(program.len(), 1);
    let function = match &program.body[0] {
        Stmt::FnDecl(function) => function,
        other => panic!("Expected function declaration, got {:?}", other),
    };

    assert_eq!(function.return_type, PrimitiveType::Int);
    assert_eq!(function.identifier, "add");
    assert_eq!(function.parameters.len(), 2);
    assert_eq!(function.parameters[0].param_type, PrimitiveType::Int);
    assert_eq!(function.parameters[0].identifier, "a");
    assert_eq!(function.parameters[1].param_type, PrimitiveType::Int);
    assert_eq!(function.parameters[1].identifier, "b");

    assert_eq!(function.body.len(), 1);
    match &function.body.body[0] {
        Stmt::Return(stmt) => assert_eq!(
            stmt.value,
            Some(binary(symbol("a"), BinaryOperator::Add, symbol("b")))
        ),
        other => panic!("Expected return statement, got {:?}", other),
    }
}

#[test]
fn test_parse_function_without_parameters() {
    let program = parse_str("float pi() { return 3.14; }").unwrap();

    match &program.body[0] {
        Stmt::FnDecl(function) => {
            assert_eq!(function.return_type, PrimitiveType::Float);
            assert!(function.parameters.is_empty());
        }
        other => panic!("Expected function declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_mixed_parameter_types() {
    let program = parse_str("str greet(str name, float times) { }").unwrap();

    match &program.body[0] {
        Stmt::FnDecl(function) => {
            let params: Vec<(PrimitiveType, &str)> = function
                .parameters
                .iter()
                .map(|param| (param.param_type, param.identifier.as_str()))
                .collect();
            assert_eq!(params, vec![(PrimitiveType::Str, "name"), (PrimitiveType::Float, "times")]);
            assert!(function.body.is_empty());
        }
        other => panic!("Expected function declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_expression_statement() {
    let program = parse_str("a + b;").unwrap();

    assert_eq!(program.body[0].get_stmt_type(), StmtType::ExpressionStmt);
    assert_eq!(
        only_expression(&program),
        &binary(symbol("a"), BinaryOperator::Add, symbol("b"))
    );
}

#[test]
fn test_parse_left_associativity() {
    let program = parse_str("a + b - c;").unwrap();

    assert_eq!(
        only_expression(&program),
        &binary(
            binary(symbol("a"), BinaryOperator::Add, symbol("b")),
            BinaryOperator::Subtract,
            symbol("c")
        )
    );
}

#[test]
fn test_parse_flat_precedence() {
    // No operator binds tighter than another
    let program = parse_str("a + b * c / d;").unwrap();

    assert_eq!(
        only_expression(&program),
        &binary(
            binary(
                binary(symbol("a"), BinaryOperator::Add, symbol("b")),
                BinaryOperator::Multiply,
                symbol("c")
            ),
            BinaryOperator::Divide,
            symbol("d")
        )
    );
}

#[test]
fn test_parse_grouping() {
    let program = parse_str("a - (b - c);").unwrap();

    assert_eq!(
        only_expression(&program),
        &binary(
            symbol("a"),
            BinaryOperator::Subtract,
            binary(symbol("b"), BinaryOperator::Subtract, symbol("c"))
        )
    );
}

#[test]
fn test_parse_call_expression() {
    let program = parse_str("add(1, x + 2);").unwrap();

    assert_eq!(
        only_expression(&program),
        &Expr::Call(CallExpr {
            callee: "add".to_string(),
            arguments: vec![number("1"), binary(symbol("x"), BinaryOperator::Add, number("2"))],
        })
    );
}

#[test]
fn test_parse_call_without_arguments() {
    let program = parse_str("int t = now() * 2;").unwrap();

    match &program.body[0] {
        Stmt::VarDecl(decl) => assert_eq!(
            decl.initializer,
            binary(
                Expr::Call(CallExpr {
                    callee: "now".to_string(),
                    arguments: vec![],
                }),
                BinaryOperator::Multiply,
                number("2")
            )
        ),
        other => panic!("Expected variable declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_nested_blocks() {
    let program = parse_str("{ int x = 1; { x; } }").unwrap();

    let outer = match &program.body[0] {
        Stmt::Block(block) => block,
        other => panic!("Expected block, got {:?}", other),
    };
    assert_eq!(outer.len(), 2);
    assert_eq!(outer.body[0].get_stmt_type(), StmtType::VarDeclStmt);
    assert_eq!(outer.body[1].get_stmt_type(), StmtType::BlockStmt);
}

#[test]
fn test_parse_bare_return() {
    let program = parse_str("int f() { return; }").unwrap();

    match &program.body[0] {
        Stmt::FnDecl(function) => {
            assert_eq!(function.body.body[0], Stmt::Return(crate::ast::statements::ReturnStmt { value: None }))
        }
        other => panic!("Expected function declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_statement_order_is_preserved() {
    let program = parse_str("int a = 1;\nint f() { }\n{ }\nf();\n").unwrap();
    let kinds: Vec<StmtType> = program.iter().map(|stmt| stmt.get_stmt_type()).collect();

    assert_eq!(
        kinds,
        vec![
            StmtType::VarDeclStmt,
            StmtType::FnDeclStmt,
            StmtType::BlockStmt,
            StmtType::ExpressionStmt
        ]
    );
}

#[test]
fn test_parse_from_token_list() {
    let tokens = tokenize("int x = y;", None).unwrap();
    let program = parse_tokens(tokens).unwrap();

    assert_eq!(program.body[0].get_stmt_type(), StmtType::VarDeclStmt);
}

#[test]
fn test_parse_from_hand_built_tokens() {
    // No trailing EOF, the stream supplies it
    let tokens = vec![
        Token::new(TokenKind::Str, "str", 1),
        Token::new(TokenKind::Identifier, "s", 1),
        Token::new(TokenKind::Assignment, "=", 1),
        Token::new(TokenKind::String, "text", 1),
        Token::new(TokenKind::Semicolon, ";", 1),
    ];

    let program = parse_tokens(tokens).unwrap();
    assert_eq!(program.len(), 1);
}

#[test]
fn test_parse_missing_assignment() {
    let error = parse_str("int x 10;").unwrap_err();
    let (expected, found, kind) = expect_unexpected(&error);

    assert!(expected.contains("'='"));
    assert_eq!(found, "10");
    assert_eq!(kind, TokenKind::Number);
    assert_eq!(error.get_line(), 1);
}

#[test]
fn test_parse_error_reports_line() {
    let error = parse_str("int a = 1;\n\nint b 2;").unwrap_err();

    assert_eq!(error.get_line(), 3);
}

#[test]
fn test_parse_missing_semicolon() {
    let error = parse_str("int x = 1\nint y = 2;").unwrap_err();
    let (expected, found, kind) = expect_unexpected(&error);

    assert_eq!(expected, "';' after variable declaration");
    assert_eq!(found, "int");
    assert_eq!(kind, TokenKind::Int);
    assert_eq!(error.get_line(), 2);
}

#[test]
fn test_parse_uninitialized_declaration_is_rejected() {
    let error = parse_str("int x;").unwrap_err();
    let (expected, _, kind) = expect_unexpected(&error);

    assert_eq!(expected, "'=' after variable name");
    assert_eq!(kind, TokenKind::Semicolon);
}

#[test]
fn test_parse_missing_name() {
    let error = parse_str("int = 3;").unwrap_err();
    let (expected, _, kind) = expect_unexpected(&error);

    assert_eq!(expected, "variable or function name");
    assert_eq!(kind, TokenKind::Assignment);
}

#[test]
fn test_parse_bad_parameter() {
    let error = parse_str("int f(a) { }").unwrap_err();
    let (expected, found, _) = expect_unexpected(&error);

    assert_eq!(expected, "parameter type");
    assert_eq!(found, "a");

    let error = parse_str("int f(int a,) { }").unwrap_err();
    let (expected, _, kind) = expect_unexpected(&error);
    assert_eq!(expected, "parameter type");
    assert_eq!(kind, TokenKind::CloseParen);
}

#[test]
fn test_parse_function_requires_block_body() {
    let error = parse_str("int f() return 1;").unwrap_err();
    let (expected, _, kind) = expect_unexpected(&error);

    assert_eq!(expected, "'{' before block");
    assert_eq!(kind, TokenKind::Return);
}

#[test]
fn test_parse_unclosed_block() {
    let error = parse_str("{ int x = 1;").unwrap_err();
    let (expected, _, kind) = expect_unexpected(&error);

    assert_eq!(expected, "'}' after block");
    assert_eq!(kind, TokenKind::EOF);
}

#[test]
fn test_parse_unclosed_call() {
    let error = parse_str("f(1, 2;").unwrap_err();
    let (expected, found, _) = expect_unexpected(&error);

    assert_eq!(expected, "')' after arguments");
    assert_eq!(found, ";");
}

#[test]
fn test_parse_missing_operand() {
    let error = parse_str("a + ;").unwrap_err();
    let (expected, _, kind) = expect_unexpected(&error);

    assert_eq!(expected, "expression");
    assert_eq!(kind, TokenKind::Semicolon);
}

#[test]
fn test_parse_func_keyword_is_not_accepted() {
    let error = parse_str("func add() { }").unwrap_err();
    let (expected, _, kind) = expect_unexpected(&error);

    assert_eq!(expected, "expression");
    assert_eq!(kind, TokenKind::Func);
}

#[test]
fn test_parse_lexical_error() {
    let error = parse_str("int x = 1;\nint y = #;").unwrap_err();

    assert_eq!(error.get_error_name(), "LexicalError");
    assert_eq!(error.get_line(), 2);
    assert_eq!(
        error.get_internal(),
        &ErrorImpl::LexicalError {
            message: "Unexpected character.".to_string()
        }
    );
}

fn nested_source(open: &str, inner: &str, close: &str, depth: usize) -> String {
    format!("{}{}{}", open.repeat(depth), inner, close.repeat(depth))
}

#[test]
fn test_parse_grouping_at_nesting_limit() {
    let source = format!("int x = {};", nested_source("(", "1", ")", MAX_NESTING_DEPTH));
    let program = parse_str(&source).unwrap();

    match &program.body[0] {
        Stmt::VarDecl(decl) => assert_eq!(decl.initializer, number("1")),
        other => panic!("Expected variable declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_grouping_past_nesting_limit() {
    let source = format!("int x = {};", nested_source("(", "1", ")", MAX_NESTING_DEPTH + 1));
    let error = parse_str(&source).unwrap_err();

    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert_eq!(
        error.get_internal(),
        &ErrorImpl::NestingTooDeep {
            limit: MAX_NESTING_DEPTH
        }
    );
    // Points at the first `(` past the limit
    assert_eq!(error.get_position().offset as usize, "int x = ".len() + MAX_NESTING_DEPTH);
}

#[test]
fn test_parse_very_deep_grouping_fails_cleanly() {
    let source = format!("int x = {};", nested_source("(", "1", ")", 10_000));
    let error = parse_str(&source).unwrap_err();

    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert_eq!(error.get_line(), 1);
}

#[test]
fn test_parse_blocks_nesting_limit() {
    let program = parse_str(&nested_source("{", "", "}", MAX_NESTING_DEPTH)).unwrap();
    assert_eq!(program.len(), 1);

    let error = parse_str(&nested_source("{", "", "}", MAX_NESTING_DEPTH + 1)).unwrap_err();
    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert_eq!(error.get_position().offset as usize, MAX_NESTING_DEPTH);
}

#[test]
fn test_parse_nested_calls_past_limit() {
    let source = format!("{};", nested_source("f(", "1", ")", MAX_NESTING_DEPTH + 1));
    let error = parse_str(&source).unwrap_err();

    assert_eq!(error.get_error_name(), "NestingTooDeep");
}

#[test]
fn test_nesting_depth_is_shared_by_brackets() {
    // A function body block plus the groupings inside it
    let inner = nested_source("(", "a", ")", MAX_NESTING_DEPTH - 1);
    let source = format!("int f(int a) {{ return {}; }}", inner);
    assert!(parse_str(&source).is_ok());

    let inner = nested_source("(", "a", ")", MAX_NESTING_DEPTH);
    let source = format!("int f(int a) {{ return {}; }}", inner);
    assert_eq!(parse_str(&source).unwrap_err().get_error_name(), "NestingTooDeep");
}

#[test]
fn test_parse_and_drop_long_operator_chain() {
    let terms = 100_000;

    let mut tokens = vec![Token::new(TokenKind::Number, "1", 1)];
    for _ in 1..terms {
        tokens.push(Token::new(TokenKind::Plus, "+", 1));
        tokens.push(Token::new(TokenKind::Number, "1", 1));
    }
    tokens.push(Token::new(TokenKind::Semicolon, ";", 1));

    let program = parse_tokens(tokens).unwrap();

    let mut operators = 0;
    let mut expr = only_expression(&program);
    while let Expr::Binary(binary) = expr {
        assert_eq!(binary.operator, BinaryOperator::Add);
        assert_eq!(*binary.right, number("1"));
        operators += 1;
        expr = &*binary.left;
    }

    assert_eq!(operators, terms - 1);
    assert_eq!(*expr, number("1"));

    drop(program);
}
