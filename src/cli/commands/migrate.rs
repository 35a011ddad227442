use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::database::{migrations, PgStore};

pub async fn handle(store: &PgStore, output_format: OutputFormat) -> anyhow::Result<()> {
    migrations::migrate(store.pool()).await?;
    output_success(output_format, "Schema is up to date", None)
}
