//! Tests for SELECT clauses, FROM sources, joins and unions.

mod common;
use common::*;

use oxide_mql::ast::{
    Expr, ExprKind, JoinType, NullOrdering, OrderDirection, ParamValue, Query, TableRef,
};
use oxide_mql::ErrorKind;

// ===================================================================
// Targets and aliases
// ===================================================================

#[test]
fn aliases_with_and_without_as() {
    let select = parse_select("SELECT a AS x, b y, c \"z\", d AS 'w' FROM t");
    let aliases: Vec<_> = select
        .targets
        .iter()
        .map(|t| t.alias.as_deref())
        .collect();
    assert_eq!(aliases, vec![Some("x"), Some("y"), Some("z"), Some("w")]);
    assert_eq!(
        parse("SELECT a AS x, b y FROM t").render(),
        "SELECT a AS x, b AS y FROM t"
    );
}

#[test]
fn alias_needing_quotes_is_backticked() {
    let stmt = round_trip("SELECT a AS `my col` FROM t");
    assert_eq!(stmt.render(), "SELECT a AS `my col` FROM t");
}

#[test]
fn distinct_and_qualified_star() {
    let select = parse_select("SELECT DISTINCT t.*, u.a FROM t JOIN u ON t.id = u.id");
    assert!(select.distinct);
    assert_eq!(select.targets[0], Expr::identifier("t.*"));
    round_trip("SELECT DISTINCT t.*, u.a FROM t JOIN u ON t.id = u.id");
}

#[test]
fn select_all_is_the_default() {
    assert_same_tree("SELECT ALL a FROM t", "SELECT a FROM t");
}

#[test]
fn numeric_path_parts_stay_bare() {
    let select = parse_select("SELECT * FROM proj.model.2");
    let Some(TableRef::Table { name, .. }) = &select.from_table else {
        panic!("Expected table");
    };
    assert_eq!(name.parts, vec!["proj", "model", "2"]);
    assert_eq!(
        parse("SELECT * FROM proj.model.2").render(),
        "SELECT * FROM proj.model.2"
    );
}

#[test]
fn select_without_from() {
    let select = parse_select("SELECT 1, 'a', NULL");
    assert!(select.from_table.is_none());
    assert_eq!(select.targets.len(), 3);
}

// ===================================================================
// Clauses
// ===================================================================

#[test]
fn full_clause_set_renders_in_canonical_order() {
    let sql = "SELECT a, count(*) FROM t WHERE b > 1 GROUP BY a HAVING count(*) > 2 \
               ORDER BY a DESC NULLS LAST LIMIT 10 OFFSET 5";
    let stmt = round_trip(sql);
    assert_eq!(
        stmt.render(),
        "SELECT a, count(*) FROM t WHERE b > 1 GROUP BY a HAVING count(*) > 2 \
         ORDER BY a DESC NULLS LAST LIMIT 10 OFFSET 5"
    );
}

#[test]
fn clauses_may_come_in_any_order() {
    assert_same_tree(
        "SELECT a FROM t LIMIT 3 WHERE a = 1",
        "SELECT a FROM t WHERE a = 1 LIMIT 3",
    );
}

#[test]
fn duplicate_clause_is_a_syntax_error() {
    let err = parse_err("SELECT a FROM t LIMIT 1 LIMIT 2");
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert!(err.message.contains("Duplicate LIMIT clause"));
}

#[test]
fn order_by_directions_and_nulls() {
    let select = parse_select("SELECT * FROM t ORDER BY a, b ASC, c DESC NULLS FIRST");
    assert_eq!(select.order_by.len(), 3);
    assert_eq!(select.order_by[0].direction, None);
    assert_eq!(select.order_by[1].direction, Some(OrderDirection::Asc));
    assert_eq!(select.order_by[2].direction, Some(OrderDirection::Desc));
    assert_eq!(select.order_by[2].nulls, Some(NullOrdering::First));
}

#[test]
fn group_by_with_rollup_marks_last_item() {
    let select = parse_select("SELECT a, b, sum(c) FROM t GROUP BY a, b WITH ROLLUP");
    assert!(!select.group_by[0].with_rollup);
    assert!(select.group_by[1].with_rollup);
    round_trip("SELECT a, b, sum(c) FROM t GROUP BY a, b WITH ROLLUP");
}

#[test]
fn limit_pair_sets_offset_first() {
    let select = parse_select("SELECT * FROM t LIMIT 4, 8");
    assert_eq!(select.offset, Some(Expr::integer(4)));
    assert_eq!(select.limit, Some(Expr::integer(8)));
    assert_eq!(
        parse("SELECT * FROM t LIMIT 4, 8").render(),
        "SELECT * FROM t LIMIT 8 OFFSET 4"
    );
}

#[test]
fn negative_limit_is_folded() {
    let select = parse_select("SELECT * FROM t LIMIT -1");
    assert_eq!(select.limit, Some(Expr::integer(-1)));
}

#[test]
fn using_options_keep_order_and_kind() {
    let stmt = round_trip(
        "SELECT * FROM mindsdb.m USING engine = 'openai', max_tokens = 100, mode = DEFAULT, \
         temperature = -0.5, options = {\"a\": [1, 2]}",
    );
    let select = stmt.as_query().and_then(Query::as_select).unwrap();
    let using = select.using.as_ref().unwrap();
    assert_eq!(
        using.keys().collect::<Vec<_>>(),
        vec!["engine", "max_tokens", "mode", "temperature", "options"]
    );
    assert_eq!(using.get("mode"), Some(&ParamValue::Bareword("DEFAULT".into())));
    assert_eq!(using.get("temperature"), Some(&ParamValue::Float(-0.5)));
}

#[test]
fn table_shorthand() {
    assert_same_tree("TABLE int1.t", "SELECT * FROM int1.t");
    let select = parse_select("TABLE t LIMIT 2");
    assert_eq!(select.limit, Some(Expr::integer(2)));
}

// ===================================================================
// FROM sources
// ===================================================================

#[test]
fn table_alias() {
    let select = parse_select("SELECT x.a FROM int1.t AS x");
    let Some(TableRef::Table { name, alias }) = &select.from_table else {
        panic!("Expected table");
    };
    assert_eq!(name.parts, vec!["int1", "t"]);
    assert_eq!(alias.as_deref(), Some("x"));
}

#[test]
fn subquery_source_with_alias() {
    let stmt = round_trip("SELECT * FROM (SELECT a FROM t) AS sub WHERE sub.a > 1");
    assert_eq!(
        stmt.render(),
        "SELECT * FROM (SELECT a FROM t) AS sub WHERE sub.a > 1"
    );
}

#[test]
fn native_query_text_is_not_tokenized() {
    let select = parse_select("SELECT * FROM pg ( select `x` from y where z = 'it''s' ) AS n");
    let Some(TableRef::Native(native)) = &select.from_table else {
        panic!("Expected native query");
    };
    assert_eq!(native.query, "select `x` from y where z = 'it''s'");
    assert_eq!(native.alias.as_deref(), Some("n"));
    round_trip("SELECT * FROM pg (select x from y) AS n");
}

#[test]
fn native_query_ending_in_line_comment() {
    let select = parse_select("SELECT * FROM int1 (select 1 -- c\n) AS n");
    let Some(TableRef::Native(native)) = &select.from_table else {
        panic!("Expected native query");
    };
    assert_eq!(native.query, "select 1 -- c\n");
    let stmt = round_trip("SELECT * FROM int1 (select 1 # c\n   )");
    assert_eq!(stmt.render(), "SELECT * FROM int1 (select 1 # c\n)");
    // `--` inside a string is not a comment
    let select = parse_select("SELECT * FROM int1 (select '-- x')");
    let Some(TableRef::Native(native)) = &select.from_table else {
        panic!("Expected native query");
    };
    assert_eq!(native.query, "select '-- x'");
}

#[test]
fn native_query_inside_join() {
    let select = parse_select(
        "SELECT * FROM int1 (SELECT * FROM t) AS ta JOIN mindsdb.pred AS tb WHERE ta.x > 1",
    );
    let Some(TableRef::Join(join)) = &select.from_table else {
        panic!("Expected join");
    };
    assert!(matches!(join.left, TableRef::Native(_)));
    assert!(select.where_clause.is_some());
}

// ===================================================================
// Joins
// ===================================================================

#[test]
fn join_types() {
    for (sql, expected) in [
        ("SELECT * FROM a JOIN b ON a.x = b.x", JoinType::Join),
        ("SELECT * FROM a INNER JOIN b ON a.x = b.x", JoinType::Inner),
        ("SELECT * FROM a LEFT JOIN b ON a.x = b.x", JoinType::Left),
        ("SELECT * FROM a RIGHT OUTER JOIN b ON a.x = b.x", JoinType::Right),
        ("SELECT * FROM a FULL OUTER JOIN b ON a.x = b.x", JoinType::Full),
        ("SELECT * FROM a CROSS JOIN b", JoinType::Cross),
    ] {
        let select = parse_select(sql);
        let Some(TableRef::Join(join)) = &select.from_table else {
            panic!("Expected join for {sql}");
        };
        assert_eq!(join.join_type, expected, "{sql}");
        round_trip(sql);
    }
}

#[test]
fn joins_chain_to_the_left() {
    let select = parse_select("SELECT * FROM a JOIN b JOIN c");
    let Some(TableRef::Join(outer)) = &select.from_table else {
        panic!("Expected join");
    };
    assert!(matches!(&outer.right, TableRef::Table { name, .. } if name.parts == ["c"]));
    assert!(matches!(&outer.left, TableRef::Join(_)));
}

#[test]
fn parenthesized_join_is_kept() {
    let select = parse_select("SELECT * FROM a JOIN (b JOIN c ON b.x = c.x) ON a.y = b.y");
    let Some(TableRef::Join(outer)) = &select.from_table else {
        panic!("Expected join");
    };
    let TableRef::Join(inner) = &outer.right else {
        panic!("Expected right side join");
    };
    assert!(inner.parentheses);
    assert!(inner.condition.is_some());
    assert!(outer.condition.is_some());
    round_trip("SELECT * FROM a JOIN (b JOIN c ON b.x = c.x) ON a.y = b.y");
}

#[test]
fn comma_separated_sources() {
    let stmt = round_trip("SELECT * FROM a, b WHERE a.id = b.id");
    assert_eq!(stmt.render(), "SELECT * FROM a, b WHERE a.id = b.id");
}

#[test]
fn join_without_join_keyword_is_an_error() {
    let err = parse_err("SELECT * FROM a LEFT b");
    assert_eq!(err.kind, ErrorKind::Syntax);
}

// ===================================================================
// Unions
// ===================================================================

#[test]
fn union_distinct_by_default() {
    let Query::Union(union) = parse_query("SELECT a FROM t UNION SELECT b FROM u") else {
        panic!("Expected union");
    };
    assert!(union.distinct);
    assert_same_tree(
        "SELECT a FROM t UNION DISTINCT SELECT b FROM u",
        "SELECT a FROM t UNION SELECT b FROM u",
    );
}

#[test]
fn union_all_renders() {
    let stmt = round_trip("SELECT 1 UNION ALL SELECT 2 UNION SELECT 3");
    assert_eq!(stmt.render(), "SELECT 1 UNION ALL SELECT 2 UNION SELECT 3");
}

#[test]
fn parenthesized_union_arm_on_the_right() {
    let query = parse_query("SELECT 1 UNION (SELECT 2 UNION ALL SELECT 3)");
    let Query::Union(union) = &query else {
        panic!("Expected union");
    };
    assert!(matches!(&union.right, Query::Union(inner) if inner.parentheses && !inner.distinct));
    round_trip("SELECT 1 UNION (SELECT 2 UNION ALL SELECT 3)");
}

#[test]
fn parenthesized_select_statement() {
    let query = parse_query("(SELECT a FROM t)");
    assert!(query.parentheses());
    assert_eq!(parse("(SELECT a FROM t)").render(), "(SELECT a FROM t)");
}

#[test]
fn subquery_in_where() {
    let select = parse_select("SELECT * FROM t WHERE a IN (SELECT b FROM u)");
    let Some(where_clause) = &select.where_clause else {
        panic!("Expected WHERE");
    };
    assert!(matches!(where_clause.kind, ExprKind::Binary { .. }));
    round_trip("SELECT * FROM t WHERE a IN (SELECT b FROM u)");
}
