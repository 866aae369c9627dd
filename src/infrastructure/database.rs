use std::time::Duration;

use mongodb::{Client, Database, options::ClientOptions};
use tracing::info;

pub async fn connect(url: &str, db_name: &str) -> Result<Database, mongodb::error::Error> {
    let mut options = ClientOptions::parse(url).await?;
    options.max_pool_size = Some(20);
    options.min_pool_size = Some(5);
    options.connect_timeout = Some(Duration::from_secs(10));
    options.server_selection_timeout = Some(Duration::from_secs(30));

    let client = Client::with_options(options)?;

    // Lightweight round trip so a bad connection string fails at startup.
    client.list_database_names().await?;

    info!("connected to MongoDB");
    Ok(client.database(db_name))
}
