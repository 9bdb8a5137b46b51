//! Watch the system for status changes.
//!
//! Demonstrates:
//! - Querying the full system snapshot with `check()`
//! - Long-polling the updates endpoint until something changes
//!
//! The session token expires after 10 minutes; this demo re-authenticates
//! explicitly when that happens, since the client never caches credentials.
//!
//! Usage:
//!   ECONNECT_USERNAME=... ECONNECT_PASSWORD=... cargo run --example watch_status

// ============================================================================
// Imports
// ============================================================================

use std::env;

use econnect::{ElmoClient, Error, Query, Result};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "econnect=debug".into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let username = env::var("ECONNECT_USERNAME").expect("ECONNECT_USERNAME is required");
    let password = env::var("ECONNECT_PASSWORD").expect("ECONNECT_PASSWORD is required");

    let client = ElmoClient::builder().build()?;
    client.auth(&username, &password).await?;

    loop {
        let report = client.check().await?;
        println!(
            "sectors: {} armed, {} disarmed | inputs: {} alerted, {} waiting",
            report.sectors_armed.len(),
            report.sectors_disarmed.len(),
            report.inputs_alerted.len(),
            report.inputs_wait.len(),
        );

        let sectors_last = last_id(&client, Query::Sectors).await?;
        let inputs_last = last_id(&client, Query::Inputs).await?;

        // Blocks up to ~15s server-side; loop until a tracked change arrives.
        loop {
            match client.poll(sectors_last, inputs_last).await {
                Ok(update) if update.has_changes() => break,
                Ok(_) => continue,
                Err(Error::AuthenticationRequired { .. }) => {
                    client.auth(&username, &password).await?;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

async fn last_id(client: &ElmoClient, query: Query) -> Result<u64> {
    let elements = client.query(query).await?;
    Ok(elements.last().map(|element| element.id).unwrap_or(0))
}
