//! Tests for database, view, table, knowledge base and evaluation statements.

mod common;
use common::*;

use oxide_mql::ast::{CreateTableSource, ParamValue, Query, Statement};
use oxide_mql::ErrorKind;

// ===================================================================
// Databases
// ===================================================================

#[test]
fn create_database_full_form() {
    let sql = "CREATE OR REPLACE DATABASE IF NOT EXISTS pg_db WITH ENGINE = 'postgres', \
               PARAMETERS = {\"host\": \"127.0.0.1\", \"port\": 5432, \"ssl\": false}";
    let Statement::CreateDatabase(create) = parse(sql) else {
        panic!("Expected CREATE DATABASE");
    };
    assert!(create.is_replace);
    assert!(create.if_not_exists);
    assert_eq!(create.name.parts, vec!["pg_db"]);
    assert_eq!(create.engine.as_deref(), Some("postgres"));
    let params = create.parameters.as_ref().unwrap();
    assert_eq!(params.keys().collect::<Vec<_>>(), vec!["host", "port", "ssl"]);
    assert_eq!(params.get("ssl"), Some(&ParamValue::Boolean(false)));

    let stmt = round_trip(sql);
    assert_eq!(
        stmt.render(),
        "CREATE OR REPLACE DATABASE IF NOT EXISTS pg_db WITH ENGINE = 'postgres', \
         PARAMETERS = {'host': '127.0.0.1', 'port': 5432, 'ssl': false}"
    );
}

#[test]
fn create_database_variants() {
    assert_same_tree("CREATE PROJECT proj", "CREATE DATABASE proj");
    assert_same_tree("CREATE SCHEMA proj", "CREATE DATABASE proj");
    assert_same_tree(
        "CREATE DATABASE db USING ENGINE 'mysql'",
        "CREATE DATABASE db WITH ENGINE = 'mysql'",
    );
    assert_same_tree(
        "CREATE DATABASE db ENGINE = mysql",
        "CREATE DATABASE db WITH ENGINE = 'mysql'",
    );
    assert_eq!(parse("create project proj").render(), "CREATE DATABASE proj");
}

#[test]
fn create_database_parameters_only() {
    let stmt = round_trip("CREATE DATABASE db PARAMETERS = {'nested': {'a': [1, 2.5, null]}}");
    assert_eq!(
        stmt.render(),
        "CREATE DATABASE db WITH PARAMETERS = {'nested': {'a': [1, 2.5, null]}}"
    );
}

#[test]
fn create_database_parameters_must_be_an_object() {
    let err = parse_err("CREATE DATABASE db WITH ENGINE = 'x', PARAMETERS = 'wow'");
    assert_eq!(err.kind, ErrorKind::InvalidLiteral);
    let err = parse_err("CREATE DATABASE db WITH ENGINE = 'x', PARAMETERS = {'a': 1");
    assert_eq!(err.kind, ErrorKind::Lexical);
}

#[test]
fn deeply_nested_parameters_are_rejected() {
    let depth = 10_000;
    let sql = format!(
        "CREATE DATABASE db PARAMETERS = {}1{}",
        "{\"a\": ".repeat(depth),
        "}".repeat(depth)
    );
    let err = parse_err(&sql);
    assert_eq!(err.kind, ErrorKind::Lexical);
    assert!(err.message.contains("JSON nesting"));

    let sql = format!(
        "CREATE DATABASE db PARAMETERS = {}1{}",
        "{\"a\": ".repeat(10),
        "}".repeat(10)
    );
    round_trip(&sql);
}

#[test]
fn alter_and_update_database() {
    let Statement::AlterDatabase(alter) = parse("ALTER PROJECT proj Default_LLM = 'x', Retries = 3")
    else {
        panic!("Expected ALTER DATABASE");
    };
    assert_eq!(
        alter.altered_params.keys().collect::<Vec<_>>(),
        vec!["default_llm", "retries"]
    );
    round_trip("ALTER DATABASE proj default_llm = 'x', retries = 3");

    let stmt = round_trip("UPDATE DATABASE db SET user = 'u', password = 'p'");
    assert_eq!(stmt.render(), "UPDATE DATABASE db SET user = 'u', password = 'p'");
}

#[test]
fn drop_database() {
    let stmt = round_trip("DROP DATABASE IF EXISTS db");
    assert!(matches!(stmt, Statement::DropDatabase(ref drop) if drop.if_exists));
}

// ===================================================================
// Views
// ===================================================================

#[test]
fn create_view_keeps_query_text() {
    let sql = "CREATE VIEW IF NOT EXISTS proj.v FROM int1 AS (SELECT * FROM t WHERE x -> 'a' = 1) \
               USING refresh = 'daily'";
    let Statement::CreateView(view) = parse(sql) else {
        panic!("Expected CREATE VIEW");
    };
    assert!(view.if_not_exists);
    assert_eq!(view.name.parts, vec!["proj", "v"]);
    assert_eq!(view.query_str, "SELECT * FROM t WHERE x -> 'a' = 1");
    assert!(view.using.as_ref().unwrap().contains_key("refresh"));
    round_trip(sql);
}

#[test]
fn create_view_query_may_use_foreign_syntax() {
    let Statement::CreateView(view) =
        parse("CREATE OR REPLACE VIEW v AS (SELECT a::int FROM t LIMIT 1 OFFSET 1 ROWS)")
    else {
        panic!("Expected CREATE VIEW");
    };
    assert!(view.is_replace);
    assert_eq!(view.query_str, "SELECT a::int FROM t LIMIT 1 OFFSET 1 ROWS");
}

#[test]
fn create_view_without_parentheses_takes_the_rest() {
    let Statement::CreateView(view) = parse("CREATE VIEW v AS SELECT a FROM t WHERE b = 1;") else {
        panic!("Expected CREATE VIEW");
    };
    assert_eq!(view.query_str, "SELECT a FROM t WHERE b = 1");
    assert_eq!(
        parse("CREATE VIEW v AS SELECT a FROM t").render(),
        "CREATE VIEW v AS (SELECT a FROM t)"
    );
}

#[test]
fn view_query_ending_in_line_comment() {
    let stmt = round_trip("create view v as select 1 -- note");
    assert_eq!(stmt.render(), "CREATE VIEW v AS (select 1 -- note\n)");
    let stmt = round_trip("CREATE VIEW v AS (select 1 -- note\n) USING a = 1");
    let Statement::CreateView(view) = &stmt else {
        panic!("Expected CREATE VIEW");
    };
    assert_eq!(view.query_str, "select 1 -- note\n");
    assert!(view.using.is_some());
}

#[test]
fn alter_and_drop_view() {
    let Statement::AlterView(alter) = parse("ALTER VIEW v FROM int2 (SELECT 1)") else {
        panic!("Expected ALTER VIEW");
    };
    assert_eq!(alter.from_table.unwrap().parts, vec!["int2"]);
    assert_eq!(alter.query_str, "SELECT 1");

    let Statement::DropView(drop) = parse("DROP VIEW IF EXISTS v1, proj.v2") else {
        panic!("Expected DROP VIEW");
    };
    assert!(drop.if_exists);
    assert_eq!(drop.names[1].parts, vec!["proj", "v2"]);
    round_trip("DROP VIEW IF EXISTS v1, proj.v2");
}

#[test]
fn empty_view_query_is_an_error() {
    let err = parse_err("CREATE VIEW v AS ( )");
    assert_eq!(err.kind, ErrorKind::Syntax);
}

// ===================================================================
// Tables
// ===================================================================

#[test]
fn create_table_with_columns() {
    let sql = "CREATE TABLE IF NOT EXISTS int1.t (id INT NOT NULL, name VARCHAR(255) DEFAULT 'n', \
               price DECIMAL(10, 2) NULL, PRIMARY KEY (ID))";
    let Statement::CreateTable(table) = parse(sql) else {
        panic!("Expected CREATE TABLE");
    };
    let CreateTableSource::Columns(columns) = &table.source else {
        panic!("Expected columns");
    };
    assert_eq!(columns.len(), 3);
    assert!(columns[0].is_primary_key);
    assert_eq!(columns[1].data_type.args, vec![255]);
    assert_eq!(columns[2].nullable, Some(true));

    let stmt = round_trip(sql);
    assert_eq!(
        stmt.render(),
        "CREATE TABLE IF NOT EXISTS int1.t (id INT NOT NULL PRIMARY KEY, \
         name VARCHAR(255) DEFAULT 'n', price DECIMAL(10, 2) NULL)"
    );
}

#[test]
fn create_table_from_query_forms() {
    assert_same_tree(
        "CREATE TABLE int1.t SELECT * FROM mindsdb.preds",
        "CREATE TABLE int1.t (SELECT * FROM mindsdb.preds)",
    );
    let Statement::CreateTable(table) = parse("CREATE OR REPLACE TABLE t (SELECT a FROM u)") else {
        panic!("Expected CREATE TABLE");
    };
    let CreateTableSource::Query(Query::Select(select)) = &table.source else {
        panic!("Expected query source");
    };
    assert!(!select.parentheses);
    round_trip("CREATE OR REPLACE TABLE t (SELECT a FROM u UNION SELECT b FROM v)");
}

#[test]
fn primary_key_must_name_a_column() {
    let err = parse_err("CREATE TABLE t (a INT, PRIMARY KEY (b))");
    assert_eq!(err.kind, ErrorKind::InvalidLiteral);
}

#[test]
fn type_arguments_must_be_integers() {
    let err = parse_err("CREATE TABLE t (a VARCHAR(2.5))");
    assert_eq!(err.kind, ErrorKind::InvalidLiteral);
}

#[test]
fn drop_tables() {
    let Statement::DropTables(drop) = parse("DROP TABLE IF EXISTS a, int1.b") else {
        panic!("Expected DROP TABLE");
    };
    assert!(drop.if_exists);
    assert_eq!(drop.tables.len(), 2);
    round_trip("DROP TABLE a");
}

// ===================================================================
// Knowledge bases, datasets, evaluation
// ===================================================================

#[test]
fn knowledge_base_index() {
    let stmt = round_trip("CREATE INDEX ON KNOWLEDGE_BASE proj.kb");
    assert_eq!(stmt.render(), "CREATE INDEX ON KNOWLEDGE_BASE proj.kb");
}

#[test]
fn or_replace_is_not_allowed_for_index() {
    let err = parse_err("CREATE OR REPLACE INDEX ON KNOWLEDGE_BASE kb");
    assert_eq!(err.kind, ErrorKind::Syntax);
}

#[test]
fn drop_dataset() {
    let stmt = round_trip("DROP DATASET IF EXISTS ds");
    assert!(matches!(stmt, Statement::DropDataset(ref drop) if drop.if_exists));
}

#[test]
fn evaluate_metric() {
    let sql = "EVALUATE r2_score FROM (SELECT t.y AS actual, m.y AS prediction FROM t JOIN m) \
               USING evaluate_label_col = 'actual', evaluate_prediction_col = 'prediction'";
    let Statement::Evaluate(evaluate) = parse(sql) else {
        panic!("Expected EVALUATE");
    };
    assert_eq!(evaluate.name.parts, vec!["r2_score"]);
    assert_eq!(
        evaluate.query_str,
        "SELECT t.y AS actual, m.y AS prediction FROM t JOIN m"
    );
    assert_eq!(evaluate.using.as_ref().unwrap().len(), 2);
    round_trip(sql);
}

#[test]
fn evaluate_query_ending_in_line_comment() {
    let stmt = round_trip("EVALUATE r2_score FROM (SELECT a, b FROM t -- all rows\n) USING x = 1");
    let Statement::Evaluate(evaluate) = &stmt else {
        panic!("Expected EVALUATE");
    };
    assert_eq!(evaluate.query_str, "SELECT a, b FROM t -- all rows\n");
    assert_eq!(
        stmt.render(),
        "EVALUATE r2_score FROM (SELECT a, b FROM t -- all rows\n) USING x = 1"
    );
}
