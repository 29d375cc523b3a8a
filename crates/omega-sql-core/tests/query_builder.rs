//! Literal renderings of table statements.

use omega_sql_core::builder::{Connector, DerivedTable, Direction, JoinClause, JoinKind, Query};
use omega_sql_core::{SqlValue, row};

#[test]
fn join_renders_between_from_and_where() {
    let sql = Query::table("users")
        .select(&["users.name", "posts.title"])
        .join(JoinClause::inner("posts", "id", Some("author_id")))
        .where_clause("posts.published", "=", true)
        .to_sql();
    assert_eq!(
        sql,
        "SELECT users.name, posts.title FROM users \
         INNER JOIN posts ON users.id = posts.author_id WHERE posts.published = TRUE"
    );
}

#[test]
fn joins_render_in_declaration_order() {
    let sql = Query::table("a")
        .join(JoinClause::left("b", "id", Some("a_id")))
        .join(JoinClause::cross("c"))
        .join(JoinClause::reference(JoinKind::Right, "d", "d_id", Some("id")).table("b"))
        .to_sql();
    assert_eq!(
        sql,
        "SELECT * FROM a LEFT JOIN b ON a.id = b.a_id CROSS JOIN c RIGHT JOIN d ON b.d_id = d.id"
    );
}

#[test]
fn join_against_derived_table() {
    let latest = DerivedTable::new(
        Query::table("logins")
            .select(&["user_id", "MAX(at) AS last_at"])
            .group_by(&["user_id"]),
    );
    let sql = Query::table("users")
        .select(&["users.name", "logins_derived.last_at"])
        .join(JoinClause::left(latest, "id", Some("user_id")))
        .to_sql();
    assert_eq!(
        sql,
        "SELECT users.name, logins_derived.last_at FROM users LEFT JOIN \
         (SELECT user_id, MAX(at) AS last_at FROM logins GROUP BY user_id) AS logins_derived \
         ON users.id = logins_derived.user_id"
    );
}

#[test]
fn where_connectors_render_in_order() {
    let sql = Query::table("tickets")
        .where_with("status", "=", "open", Connector::Or)
        .where_with("priority", ">=", 3, Connector::Or)
        .where_with("assignee", "=", SqlValue::Null, Connector::And)
        .to_sql();
    assert_eq!(
        sql,
        "SELECT * FROM tickets WHERE status = 'open' OR priority >= 3 AND assignee = NULL"
    );
}

#[test]
fn empty_sections_leave_no_keywords() {
    let sql = Query::table("t").select(&["a"]).to_sql();
    assert_eq!(sql, "SELECT a FROM t");
    for keyword in ["JOIN", "WHERE", "GROUP BY", "ORDER BY", "LIMIT", "OFFSET"] {
        assert!(!sql.contains(keyword), "unexpected {keyword} in {sql}");
    }
}

#[test]
fn pagination() {
    let sql = Query::table("t")
        .order_by("id", Direction::Desc)
        .limit(20)
        .offset(40)
        .to_sql();
    assert_eq!(sql, "SELECT * FROM t ORDER BY id DESC LIMIT 20 OFFSET 40");
}

#[test]
fn parameterized_and_inline_agree_on_shape() {
    let stmt = Query::table("users")
        .where_clause("age", ">", 18)
        .where_in("country", vec!["BE", "NL"]);

    let (sql, params) = stmt.build_select();
    assert_eq!(sql, "SELECT * FROM users WHERE age > ? AND country IN (?, ?)");
    assert_eq!(
        params,
        vec![
            SqlValue::Int(18),
            SqlValue::Text(String::from("BE")),
            SqlValue::Text(String::from("NL")),
        ]
    );
    assert_eq!(
        stmt.to_sql(),
        "SELECT * FROM users WHERE age > 18 AND country IN ('BE', 'NL')"
    );
}

#[test]
fn write_statements_share_predicates() {
    let stmt = Query::table("sessions").where_clause("expires", "<", 1_700_000_000_i64);
    assert_eq!(
        stmt.update_sql(&row! { "revoked" => 1 }),
        "UPDATE sessions SET revoked = 1 WHERE expires < 1700000000"
    );
    assert_eq!(
        stmt.delete_sql(),
        "DELETE FROM sessions WHERE expires < 1700000000"
    );
}
