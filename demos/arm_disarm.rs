//! Arm and disarm the panel.
//!
//! Demonstrates:
//! - Authenticating against the default vendor
//! - Acquiring the panel lock with the guard pattern
//! - Arming ALL sectors, then disarming specific ones
//!
//! Usage:
//!   ECONNECT_USERNAME=... ECONNECT_PASSWORD=... ECONNECT_CODE=... \
//!     cargo run --example arm_disarm

// ============================================================================
// Imports
// ============================================================================

use std::env;

use econnect::{ElmoClient, Result};

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
    let code = env::var("ECONNECT_CODE").expect("ECONNECT_CODE is required");

    let client = ElmoClient::builder().build()?;
    client.auth(&username, &password).await?;
    println!("authenticated against {}", client.base_url());

    let guard = client.lock(&code).await?;
    println!("panel lock acquired");

    client.arm(&[]).await?;
    println!("all sectors armed");

    client.disarm(&[3, 4]).await?;
    println!("sectors 3 and 4 disarmed");

    guard.release().await?;
    println!("panel lock released");

    Ok(())
}
