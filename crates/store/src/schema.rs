pub const SCHEMA_NAME: &str = "production_line";
pub const TABLE_NAME: &str = "order_data";

/// `"<catalog>".production_line.order_data`.
///
/// DuckDB names a file catalog after the file stem, so a database file called
/// `production_line.duckdb` makes the bare schema name ambiguous.
pub fn qualified_table(catalog: &str) -> String {
    format!("{}.{SCHEMA_NAME}.{TABLE_NAME}", quote_ident(catalog))
}

pub fn schema_sql(catalog: &str) -> String {
    let catalog = quote_ident(catalog);
    format!(
        r#"
CREATE SCHEMA IF NOT EXISTS {catalog}.{SCHEMA_NAME};

CREATE TABLE IF NOT EXISTS {catalog}.{SCHEMA_NAME}.{TABLE_NAME} (
  time TEXT NOT NULL PRIMARY KEY,
  typeA_orders INTEGER,
  typeB_orders INTEGER,
  typeC_orders INTEGER,
  typeA_defects INTEGER,
  typeB_defects INTEGER,
  typeC_defects INTEGER
);
"#
    )
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_catalog_qualified() {
        assert_eq!(
            qualified_table("production_line"),
            "\"production_line\".production_line.order_data"
        );
        assert_eq!(qualified_table("we\"ird"), "\"we\"\"ird\".production_line.order_data");
        assert!(schema_sql("memory").contains("CREATE SCHEMA IF NOT EXISTS \"memory\".production_line;"));
    }
}
