//! Insert statement rendering.

use crate::core::traits::StatementBuilder;
use crate::core::value::SqlColumnMap;

/// ANSI-flavoured insert statement builder.
///
/// Columns are sorted by name so a given map always renders the same
/// statement. Identifiers are double-quoted, values single-quoted with
/// embedded quotes doubled.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiStatementBuilder;

impl AnsiStatementBuilder {
    /// Quote an identifier, doubling any embedded double quotes.
    fn quote_ident(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    /// Quote a literal value.
    ///
    /// Coerced NULLs arrive as the bare literal `NULL` and are emitted
    /// unquoted; everything else is single-quoted.
    fn quote_literal(&self, literal: &str) -> String {
        if literal == "NULL" {
            return literal.to_string();
        }
        format!("'{}'", literal.replace('\'', "''"))
    }
}

impl StatementBuilder for AnsiStatementBuilder {
    fn insert(&self, table: &str, columns: &SqlColumnMap) -> String {
        let mut names: Vec<&String> = columns.keys().collect();
        names.sort_unstable();

        let cols = names
            .iter()
            .map(|name| self.quote_ident(name))
            .collect::<Vec<_>>()
            .join(", ");
        let values = names
            .iter()
            .map(|name| self.quote_literal(&columns[*name]))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.quote_ident(table),
            cols,
            values
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> SqlColumnMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_insert_sorts_columns() {
        let builder = AnsiStatementBuilder;
        let stmt = builder.insert("users", &map(&[("name", "Ann"), ("id", "1")]));
        assert_eq!(
            stmt,
            r#"INSERT INTO "users" ("id", "name") VALUES ('1', 'Ann')"#
        );
    }

    #[test]
    fn test_insert_is_deterministic() {
        let builder = AnsiStatementBuilder;
        let columns = map(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let first = builder.insert("t", &columns);
        for _ in 0..16 {
            assert_eq!(builder.insert("t", &columns), first);
        }
    }

    #[test]
    fn test_null_literal_unquoted() {
        let builder = AnsiStatementBuilder;
        let stmt = builder.insert("t", &map(&[("deleted_at", "NULL")]));
        assert_eq!(stmt, r#"INSERT INTO "t" ("deleted_at") VALUES (NULL)"#);
    }

    #[test]
    fn test_embedded_quotes_escaped() {
        let builder = AnsiStatementBuilder;
        let stmt = builder.insert("t", &map(&[("name", "O'Brien")]));
        assert_eq!(stmt, r#"INSERT INTO "t" ("name") VALUES ('O''Brien')"#);

        let stmt = builder.insert(r#"we"ird"#, &map(&[("id", "1")]));
        assert_eq!(stmt, r#"INSERT INTO "we""ird" ("id") VALUES ('1')"#);
    }
}
