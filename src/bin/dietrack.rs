// ABOUTME: Command-line entry point: runs the HTTP API, resolves one food or a whole plan
// ABOUTME: Configuration comes from the environment, flags only override the port
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

//! # Dietrack Binary
//!
//! ```bash
//! # Serve the nutrition lookup API
//! dietrack serve --http-port 8081
//!
//! # Resolve one food through the cascade
//! dietrack lookup "petto di pollo" 150 g
//!
//! # Parse a saved extraction answer and look up every food in it
//! dietrack plan extraction.txt
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dietrack::{
    config::ServerConfig,
    logging,
    models::FoodQuery,
    nutrition::{BulkLookup, NutritionCascade},
    plan_extraction::parse_extraction_response,
    server,
};
use dietrack_providers::http_client::initialize_shared_client;
use serde_json::json;
use tokio::fs;
use tracing::info;

#[derive(Parser)]
#[command(name = "dietrack")]
#[command(about = "Dietrack - weekly diet plan tracking with multi-source nutrition lookup")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Override HTTP port
        #[arg(long)]
        http_port: Option<u16>,
    },
    /// Resolve one food and print the result as JSON
    Lookup {
        /// Food name, e.g. "petto di pollo"
        name: String,
        /// Quantity in `unit`
        quantity: f64,
        /// Unit such as g, ml, pz, cucchiaio
        unit: String,
    },
    /// Parse a vision-model extraction answer and look up all its foods
    Plan {
        /// File holding the raw model answer
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_from_env()?;
    let mut config = ServerConfig::from_env()?;

    match cli.command {
        Command::Serve { http_port } => {
            if let Some(http_port) = http_port {
                config.http_port = http_port;
            }
            info!(port = config.http_port, "Starting dietrack API");
            server::run(config).await
        }
        Command::Lookup {
            name,
            quantity,
            unit,
        } => {
            initialize_shared_client(
                config.http_client.timeout_secs,
                config.http_client.connect_timeout_secs,
            );
            let cascade = NutritionCascade::from_config(&config.nutrition);
            let result = cascade
                .resolve(&FoodQuery::new(name, quantity, unit))
                .await;
            let json =
                serde_json::to_string_pretty(&result).context("Failed to encode lookup result")?;
            println!("{json}");
            Ok(())
        }
        Command::Plan { file } => {
            initialize_shared_client(
                config.http_client.timeout_secs,
                config.http_client.connect_timeout_secs,
            );
            let text = fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let plan = parse_extraction_response(&text)?;
            info!(
                days = plan.days.len(),
                foods = plan.food_count(),
                "Parsed diet plan"
            );

            let bulk = BulkLookup::from_config(&config.nutrition);
            let mut progress = bulk.subscribe();
            let reporter = tokio::spawn(async move {
                while progress.changed().await.is_ok() {
                    let current = progress.borrow_and_update().clone();
                    info!(percent = current.percent, status = %current.status, "Lookup progress");
                }
            });

            let lookup = bulk.lookup_bulk(&plan.food_queries()).await;
            drop(bulk);
            reporter.await.context("Progress reporter failed")?;

            let json = serde_json::to_string_pretty(&json!({ "plan": plan, "lookup": lookup }))
                .context("Failed to encode plan lookup")?;
            println!("{json}");
            Ok(())
        }
    }
}
