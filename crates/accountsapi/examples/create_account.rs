//! Create, fetch, list and delete an account against a running accounts API.
//!
//! Set `ACCOUNTS_ADDRESS` (e.g. `http://localhost:8080`) and `ORGANISATION_ID`,
//! then run `cargo run -p accountsapi --example create_account`.

use accountsapi::{Client, Config, Resource};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "accountsapi=debug,create_account=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?.with_timeout(std::time::Duration::from_millis(500));
    let client = Client::new(config)?;

    let created = client
        .create(Resource {
            bank_id: "123456".to_string(),
            bank_id_code: "GBDSC".to_string(),
            bic: "BARCGB22XXX".to_string(),
            name: [
                "Samantha Holder".to_string(),
                String::new(),
                String::new(),
                String::new(),
            ],
            ..Resource::new("GB")
        })
        .await?;
    info!(id = %created.data.id, "Created account");

    let fetched = client.fetch(&created.data.id).await?;
    info!(
        version = fetched.data.version,
        status = %fetched.data.attributes.status,
        "Fetched account"
    );

    let page = client.list(0, 100).await?;
    info!(count = page.data.len(), "Listed accounts");

    client.delete(&fetched.data.id, fetched.data.version).await?;
    info!(id = %fetched.data.id, "Deleted account");

    Ok(())
}
