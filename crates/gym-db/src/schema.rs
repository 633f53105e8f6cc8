//! Schema setup
//!
//! SQL files under `migrations/` are embedded at compile time and applied in
//! order on startup. Every statement is idempotent, so applying them against
//! an up-to-date database changes nothing.

use sqlx::PgPool;
use tracing::info;

/// Embedded schema files, in application order
pub const SCHEMA_FILES: &[(&str, &str)] = &[
    ("0001_init", include_str!("../migrations/0001_init.sql")),
    (
        "0002_normalize_approval",
        include_str!("../migrations/0002_normalize_approval.sql"),
    ),
];

/// Apply every schema file
pub async fn apply(pool: &PgPool) -> Result<(), sqlx::Error> {
    for (name, sql) in SCHEMA_FILES {
        sqlx::raw_sql(sql).execute(pool).await?;
        info!(schema = name, "Applied schema file");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_are_ordered_and_non_empty() {
        let names: Vec<_> = SCHEMA_FILES.iter().map(|(n, _)| *n).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert!(SCHEMA_FILES.iter().all(|(_, sql)| !sql.trim().is_empty()));
    }

    #[test]
    fn test_ledger_key_enforces_one_record_per_day() {
        let (_, init) = SCHEMA_FILES[0];
        assert!(init.contains("PRIMARY KEY (member_id, date)"));
    }
}
