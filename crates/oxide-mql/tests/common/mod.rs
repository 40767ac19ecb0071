#![allow(dead_code)]

use oxide_mql::ast::{Query, Select};
use oxide_mql::{ParseError, Parser, Statement};

pub fn parse(sql: &str) -> Statement {
    Parser::new(sql)
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    Parser::new(sql)
        .parse_statement()
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_query(sql: &str) -> Query {
    match parse(sql) {
        Statement::Query(q) => q,
        other => panic!("Expected query, got {other:?}"),
    }
}

pub fn parse_select(sql: &str) -> Select {
    match parse_query(sql) {
        Query::Select(s) => *s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

/// Verifies that rendering is lossless: `parse(render(t))` dumps like `t`, and
/// rendering the re-parsed tree yields the same text again.
pub fn round_trip(sql: &str) -> Statement {
    let ast1 = parse(sql);
    let rendered1 = ast1.render();
    let ast2 = parse(&rendered1);
    assert_eq!(
        ast1.dump(),
        ast2.dump(),
        "Round-trip changed the tree.\n  Input:    {sql}\n  Rendered: {rendered1}"
    );
    let rendered2 = ast2.render();
    assert_eq!(
        rendered1, rendered2,
        "Rendering is not a fixed point.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
    ast1
}

/// Asserts that two statements parse to structurally equal trees.
pub fn assert_same_tree(left: &str, right: &str) {
    assert_eq!(
        parse(left).dump(),
        parse(right).dump(),
        "Trees differ.\n  Left:  {left}\n  Right: {right}"
    );
}

/// Asserts that `sql` parses to the same tree as the hand-built `expected`.
pub fn assert_tree(sql: &str, expected: &Statement) {
    assert_eq!(parse(sql).dump(), expected.dump(), "Unexpected tree for: {sql}");
}
