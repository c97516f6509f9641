//! SQL-like statement extraction from decoded trigger text.
//!
//! Five independent passes, each a regex over the whole text:
//!
//! | Pass | Shape                                   | Kind            |
//! |------|-----------------------------------------|-----------------|
//! | 1    | `CURSOR c IS SELECT ... FROM ...`       | `Cursor`        |
//! | 2    | `SELECT ... INTO ... FROM t` (not in 1) | `Select`        |
//! | 3    | `:b.f := fn(...)` (not a built-in)      | `FunctionCall`  |
//! | 4    | `p_x(...)` / `sf_x(...)` (not in 3)     | `ProcedureCall` |
//! | 5    | `INSERT INTO` / `UPDATE .. SET` / `DELETE FROM` | DML     |
//!
//! Statements never span a `;`. Table and field names are textual guesses,
//! deduplicated in first-appearance order.

use regex::{Match, Regex};
use std::ops::Range;
use std::sync::LazyLock;

use super::report::{ExtractedSql, SqlKind};

/// `:block.field` bind reference.
pub(super) static BIND_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([A-Za-z_][\w$#]*)\.([A-Za-z_][\w$#]*)").unwrap());

/// `:block.field := name(` assignment from a call.
pub(super) static ASSIGN_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i):([A-Za-z_][\w$#]*)\.([A-Za-z_][\w$#]*)\s*:=\s*([A-Za-z_][\w$#]*(?:\.[A-Za-z_][\w$#]*)?)\s*\(")
        .unwrap()
});

static CURSOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\bcursor\s+([A-Za-z_][\w$#]*)\s*(?:\([^)]*\)\s*)?\bis\s+(select\b[^;]*?\bfrom\b[^;]*)")
        .unwrap()
});

static SELECT_INTO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\bselect\b([^;]*?)\binto\b([^;]*?)\bfrom\s+([\w$#.]+)([^;]*)").unwrap()
});

static PROCEDURE_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b((?:p|sf)_[\w$#]+)\s*(\(|;)").unwrap());

/// Keywords after which a bare name is a statement of its own.
const STATEMENT_STARTERS: &[&str] = &["BEGIN", "THEN", "ELSE", "LOOP"];

static INSERT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\binsert\s+into\s+([\w$#.]+)[^;]*").unwrap());

static UPDATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\bupdate\s+([\w$#.]+)\s+(?:\w+\s+)?set\b[^;]*").unwrap());

static DELETE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\bdelete\s+from\s+([\w$#.]+)[^;]*").unwrap());

static FROM_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\bfrom\s+(.*?)(?:\bwhere\b|\bgroup\s+by\b|\border\s+by\b|\bhaving\b|\bconnect\s+by\b|\bunion\b|\bfor\s+update\b|$)")
        .unwrap()
});

static SELECT_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^\s*select\s+(?:distinct\s+)?(.*?)\s+(?:into|from)\b").unwrap());

/// Built-in conversion functions and literals that do not count as
/// populating calls.
const BUILTINS: &[&str] = &[
    "NVL", "NVL2", "TRUNC", "ROUND", "TO_CHAR", "TO_DATE", "TO_NUMBER", "SUBSTR", "UPPER",
    "LOWER", "LTRIM", "RTRIM", "TRIM", "DECODE", "LENGTH", "INSTR", "REPLACE", "LPAD", "RPAD",
    "ABS", "GREATEST", "LEAST", "COALESCE", "NULL", "TRUE", "FALSE",
];

/// True for built-in functions and literals (case-insensitive).
pub fn is_builtin_function(name: &str) -> bool {
    BUILTINS.iter().any(|b| b.eq_ignore_ascii_case(name))
}

/// Run every extraction pass over decoded trigger text.
pub fn extract_sql(text: &str) -> Vec<ExtractedSql> {
    let mut out = Vec::new();

    // Pass 1: cursor declarations
    let mut cursor_spans: Vec<Range<usize>> = Vec::new();
    for caps in CURSOR.captures_iter(text) {
        let (Some(whole), Some(select)) = (caps.get(0), caps.get(2)) else {
            continue;
        };
        cursor_spans.push(whole.range());
        out.push(statement(SqlKind::Cursor, whole.as_str(), select.as_str()));
    }

    // Pass 2: SELECT ... INTO outside cursors
    for m in SELECT_INTO.find_iter(text) {
        if cursor_spans.iter().any(|span| span.contains(&m.start())) {
            continue;
        }
        out.push(statement(SqlKind::Select, m.as_str(), m.as_str()));
    }

    // Pass 3: assignments from non built-in calls
    let mut call_spans: Vec<Range<usize>> = Vec::new();
    let mut called: Vec<String> = Vec::new();
    for caps in ASSIGN_CALL.captures_iter(text) {
        let (Some(whole), Some(function)) = (caps.get(0), caps.get(3)) else {
            continue;
        };
        if is_builtin_function(function.as_str()) {
            continue;
        }
        let stmt = statement_text(text, &whole);
        call_spans.push(whole.start()..whole.start() + stmt.len());
        called.push(function.as_str().to_ascii_uppercase());
        out.push(ExtractedSql {
            kind: SqlKind::FunctionCall,
            text: stmt.trim().to_string(),
            tables: Vec::new(),
            fields: bind_refs(stmt),
        });
    }

    // Pass 4: bare p_* / sf_* calls not already captured
    for caps in PROCEDURE_CALL.captures_iter(text) {
        let (Some(name), Some(opener)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let before = &text[..name.start()];
        let preceded_by_qualifier = before
            .chars()
            .next_back()
            .is_some_and(|c| c == '.' || c == ':');
        // Without parentheses only a standalone statement is a call
        let is_read = opener.as_str() == ";" && !starts_statement(before);
        let upper = name.as_str().to_ascii_uppercase();
        if preceded_by_qualifier
            || is_read
            || called.contains(&upper)
            || call_spans.iter().any(|span| span.contains(&name.start()))
        {
            continue;
        }
        called.push(upper);
        let stmt = statement_text(text, &name);
        out.push(ExtractedSql {
            kind: SqlKind::ProcedureCall,
            text: stmt.trim().to_string(),
            tables: Vec::new(),
            fields: bind_refs(stmt),
        });
    }

    // Pass 5: DML
    for (pattern, kind) in [
        (&*INSERT, SqlKind::Insert),
        (&*UPDATE, SqlKind::Update),
        (&*DELETE, SqlKind::Delete),
    ] {
        for caps in pattern.captures_iter(text) {
            let (Some(whole), Some(table)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            out.push(ExtractedSql {
                kind,
                text: normalize_space(whole.as_str()),
                tables: vec![table.as_str().to_string()],
                fields: bind_refs(whole.as_str()),
            });
        }
    }

    out
}

/// True when `before` ends where a new statement may begin.
fn starts_statement(before: &str) -> bool {
    let trimmed = before.trim_end();
    if trimmed.is_empty() || trimmed.ends_with(';') {
        return true;
    }
    let last_word = trimmed
        .rsplit(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .next()
        .unwrap_or_default();
    STATEMENT_STARTERS
        .iter()
        .any(|keyword| keyword.eq_ignore_ascii_case(last_word))
}

/// Build a SELECT-shaped statement; `query` is the `SELECT ...` part.
fn statement(kind: SqlKind, raw: &str, query: &str) -> ExtractedSql {
    let mut fields = select_columns(query);
    for bind in bind_refs(query) {
        push_unique(&mut fields, bind);
    }
    ExtractedSql {
        kind,
        text: normalize_space(raw),
        tables: from_tables(query),
        fields,
    }
}

/// Text from a match start to the next `;` (exclusive) or end of text.
fn statement_text<'t>(text: &'t str, m: &Match<'t>) -> &'t str {
    let rest = &text[m.start()..];
    rest.find(';').map_or(rest, |end| &rest[..end])
}

/// Bind references (`block.field`) in first-appearance order.
pub fn bind_refs(text: &str) -> Vec<String> {
    let mut refs = Vec::new();
    for caps in BIND_REF.captures_iter(text) {
        if let (Some(block), Some(field)) = (caps.get(1), caps.get(2)) {
            push_unique(&mut refs, format!("{}.{}", block.as_str(), field.as_str()));
        }
    }
    refs
}

/// Table names of the first FROM clause.
pub fn from_tables(query: &str) -> Vec<String> {
    let Some(list) = FROM_CLAUSE.captures(query).and_then(|c| c.get(1)) else {
        return Vec::new();
    };
    let mut tables = Vec::new();
    for entry in split_top_level(list.as_str()) {
        let Some(name) = entry.split_whitespace().next() else {
            continue;
        };
        if name.starts_with('(') || name.starts_with(':') {
            continue;
        }
        push_unique(&mut tables, name.to_string());
    }
    tables
}

/// Plain column names of the select list; expressions and `*` are skipped.
fn select_columns(query: &str) -> Vec<String> {
    let Some(list) = SELECT_LIST.captures(query).and_then(|c| c.get(1)) else {
        return Vec::new();
    };
    let mut columns = Vec::new();
    for entry in split_top_level(list.as_str()) {
        let Some(first) = entry.split_whitespace().next() else {
            continue;
        };
        let column = first.rsplit('.').next().unwrap_or(first);
        let is_identifier = column
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && column
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '#'));
        if is_identifier {
            push_unique(&mut columns, column.to_string());
        }
    }
    columns
}

/// Split on commas outside parentheses.
fn split_top_level(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in list.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(list[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(list[start..].trim());
    parts.retain(|p| !p.is_empty());
    parts
}

pub(super) fn normalize_space(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(sql: &[ExtractedSql]) -> Vec<SqlKind> {
        sql.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_cursor_declaration() {
        let text = "DECLARE\n  CURSOR c_line IS\n    SELECT item_cd, qty\n      FROM order_line\n     WHERE order_no = :b_head.order_no;\nBEGIN\n  NULL;\nEND;";
        let sql = extract_sql(text);
        assert_eq!(kinds(&sql), vec![SqlKind::Cursor]);
        assert_eq!(sql[0].tables, vec!["order_line"]);
        assert_eq!(sql[0].fields, vec!["item_cd", "qty", "b_head.order_no"]);
    }

    #[test]
    fn test_select_into_outside_cursor() {
        let text = "cursor c is select a from t1 where x = 1;\nbegin\n  select nm into :b.nm from customer c where c.id = :b.id;\nend;";
        let sql = extract_sql(text);
        assert_eq!(kinds(&sql), vec![SqlKind::Cursor, SqlKind::Select]);
        assert_eq!(sql[1].tables, vec!["customer"]);
        assert_eq!(sql[1].fields, vec!["nm", "b.nm", "b.id"]);
    }

    #[test]
    fn test_function_assignment_skips_builtins() {
        let text = ":b.slip_no := sf_ars_0012('TP', :b.slip_date);\n:b.dt := to_char(sysdate, 'YYYY');\n:b.x := null;";
        let sql = extract_sql(text);
        assert_eq!(kinds(&sql), vec![SqlKind::FunctionCall]);
        assert_eq!(sql[0].text, ":b.slip_no := sf_ars_0012('TP', :b.slip_date)");
        assert_eq!(sql[0].fields, vec!["b.slip_no", "b.slip_date"]);
    }

    #[test]
    fn test_procedure_call_not_double_counted() {
        let text = ":b.nm := sf_get_name(:b.cd);\np_check_dup(:b.cd);\nsf_get_name(:b.cd);\npkg.p_internal(1);";
        let sql = extract_sql(text);
        assert_eq!(kinds(&sql), vec![SqlKind::FunctionCall, SqlKind::ProcedureCall]);
        assert_eq!(sql[1].text, "p_check_dup(:b.cd)");
    }

    #[test]
    fn test_bare_name_reads_are_not_calls() {
        let text = ":b.qty := p_qty;\nRETURN p_result;\nv := sf_total + 1;";
        assert!(extract_sql(text).is_empty());
    }

    #[test]
    fn test_bare_procedure_statements() {
        let text = "p_init;\nbegin\n  p_refresh;\nend;\nif :b.x is null then p_clear; else p_fill; end if;";
        let sql = extract_sql(text);
        let names: Vec<_> = sql.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(names, vec!["p_init", "p_refresh", "p_clear", "p_fill"]);
        assert!(sql.iter().all(|s| s.kind == SqlKind::ProcedureCall));
    }

    #[test]
    fn test_dml_statements() {
        let text = "insert into audit_log (id, msg) values (:b.id, 'x');\nupdate orders set status = 'C' where id = :b.id;\ndelete from order_line where order_id = :b.id;";
        let sql = extract_sql(text);
        assert_eq!(kinds(&sql), vec![SqlKind::Insert, SqlKind::Update, SqlKind::Delete]);
        assert_eq!(sql[1].tables, vec!["orders"]);
        assert_eq!(sql[2].fields, vec!["b.id"]);
    }

    #[test]
    fn test_from_tables_multiple() {
        assert_eq!(
            from_tables("select a from t1 x, t2 y where x.id = y.id"),
            vec!["t1", "t2"]
        );
    }

    #[test]
    fn test_plain_text_has_no_statements() {
        assert!(extract_sql("go_block('B_LINE'); execute_query;").is_empty());
    }
}
