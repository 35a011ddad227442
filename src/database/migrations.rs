use sqlx::PgPool;
use tracing::info;

use crate::database::manager::DatabaseError;

/// Idempotent schema statements, applied in order
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id          UUID PRIMARY KEY,
        username    TEXT NOT NULL UNIQUE,
        date_joined TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS topics (
        id         BIGSERIAL PRIMARY KEY,
        text       VARCHAR(200) NOT NULL,
        date_added TIMESTAMPTZ NOT NULL DEFAULT now(),
        owner_id   UUID NOT NULL REFERENCES users (id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS topics_owner_date_idx ON topics (owner_id, date_added)",
    r#"
    CREATE TABLE IF NOT EXISTS entries (
        id         BIGSERIAL PRIMARY KEY,
        topic_id   BIGINT NOT NULL REFERENCES topics (id),
        text       TEXT NOT NULL,
        date_added TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS entries_topic_date_idx ON entries (topic_id, date_added)",
];

pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
    let mut tx = pool.begin().await?;
    for statement in SCHEMA {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    info!("Applied {} schema statements", SCHEMA.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::TOPIC_TEXT_COLUMN_LEN;

    #[test]
    fn topic_column_matches_form_cap() {
        let column = format!("text       VARCHAR({}) NOT NULL", TOPIC_TEXT_COLUMN_LEN);
        assert!(SCHEMA.iter().any(|statement| statement.contains(&column)));
    }
}
