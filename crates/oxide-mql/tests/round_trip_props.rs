//! Property tests: rendered SQL parses back to the same tree.

use oxide_mql::parse;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

const COLUMNS: &[&str] = &["a", "b", "col_1", "t.x", "`my col`", "@v", "@@session.s", "?"];
const BINARY_OPS: &[&str] = &[
    "+", "-", "*", "/", "%", "=", "!=", "<>", "<", "<=", ">", ">=", "AND", "OR", "||", "->",
    "LIKE", "NOT LIKE", "<->", "<=>",
];

fn leaf() -> impl Strategy<Value = String> {
    prop_oneof![
        (0_i64..100_000).prop_map(|n| n.to_string()),
        (0_u32..1000).prop_map(|n| format!("{n}.5")),
        "[a-z' ]{0,6}".prop_map(|s| format!("'{}'", s.replace('\'', "''"))),
        prop::sample::select(COLUMNS).prop_map(str::to_string),
        Just("NULL".to_string()),
        Just("TRUE".to_string()),
    ]
}

fn expr() -> impl Strategy<Value = String> {
    leaf().prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            (inner.clone(), prop::sample::select(BINARY_OPS), inner.clone())
                .prop_map(|(l, op, r)| format!("{l} {op} {r}")),
            inner.clone().prop_map(|e| format!("({e})")),
            inner.clone().prop_map(|e| format!("NOT {e}")),
            inner.clone().prop_map(|e| format!("- {e}")),
            inner.clone().prop_map(|e| format!("{e} IS NOT NULL")),
            (inner.clone(), leaf(), leaf())
                .prop_map(|(e, lo, hi)| format!("{e} BETWEEN {lo} AND {hi}")),
            (inner.clone(), leaf(), leaf()).prop_map(|(e, x, y)| format!("{e} IN ({x}, {y})")),
            inner.clone().prop_map(|e| format!("abs({e})")),
            (inner.clone(), inner).prop_map(|(c, e)| format!("CASE WHEN {c} THEN {e} END")),
        ]
    })
}

fn select() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(expr(), 1..3),
        prop::option::of(expr()),
        prop::option::of(prop::sample::select(COLUMNS)),
        prop::option::of(0_u32..50),
    )
        .prop_map(|(targets, filter, order, limit)| {
            let mut sql = format!("SELECT {} FROM int1.t", targets.join(", "));
            if let Some(filter) = filter {
                sql.push_str(&format!(" WHERE {filter}"));
            }
            if let Some(order) = order {
                sql.push_str(&format!(" ORDER BY {order} DESC"));
            }
            if let Some(limit) = limit {
                sql.push_str(&format!(" LIMIT {limit}"));
            }
            sql
        })
}

fn check_round_trip(sql: &str) -> Result<(), TestCaseError> {
    let first = parse(sql).map_err(|e| TestCaseError::fail(format!("{sql}: {e}")))?;
    let rendered = first.render();
    let second =
        parse(&rendered).map_err(|e| TestCaseError::fail(format!("{rendered}: {e}")))?;
    prop_assert_eq!(first.dump(), second.dump(), "input: {}\nrendered: {}", sql, rendered);
    prop_assert_eq!(&rendered, &second.render());
    Ok(())
}

proptest! {
    #[test]
    fn expressions_round_trip(e in expr()) {
        check_round_trip(&format!("SELECT {e}"))?;
    }

    #[test]
    fn selects_round_trip(sql in select()) {
        check_round_trip(&sql)?;
    }
}
