//! Single-table SELECT construction.

/// Build `SELECT {fields} FROM {table} WHERE {id_field} = ?`.
///
/// All three parts come from admin-controlled configuration and are
/// interpolated verbatim. The id itself is always bound, never interpolated.
pub fn build_query(table: &str, fields: &str, id_field: &str) -> String {
    format!("SELECT {} FROM {} WHERE {} = ?", fields, table, id_field)
}

/// Rewrite the trailing `?` placeholder to PostgreSQL's `$1`.
pub(crate) fn numbered_placeholder(query: &str) -> String {
    match query.rfind('?') {
        Some(pos) => format!("{}$1{}", &query[..pos], &query[pos + 1..]),
        None => query.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query() {
        assert_eq!(build_query("T", "a,b", "id"), "SELECT a,b FROM T WHERE id = ?");
    }

    #[test]
    fn test_build_query_is_verbatim() {
        assert_eq!(
            build_query("catalog.items", "sku, title AS name", "item_id"),
            "SELECT sku, title AS name FROM catalog.items WHERE item_id = ?"
        );
    }

    #[test]
    fn test_numbered_placeholder() {
        assert_eq!(
            numbered_placeholder("SELECT a,b FROM T WHERE id = ?"),
            "SELECT a,b FROM T WHERE id = $1"
        );
        assert_eq!(numbered_placeholder("SELECT 1"), "SELECT 1");
    }
}
