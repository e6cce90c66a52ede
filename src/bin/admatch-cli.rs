use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "admatch-cli")]
#[command(about = "Command-line client for the AdMatch service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Admin API key, required by status, index and reload.
    #[arg(short, long, default_value = "")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a feed file, replacing the current catalog
    Load { file: PathBuf },
    /// List platforms active at a location, e.g. /ru/svrd/revda
    Search { location: String },
    /// Check service status
    Status,
    /// Show index statistics
    Index,
    /// Reload the catalog from the server's configured feed file
    Reload,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut admin_headers = HeaderMap::new();
    admin_headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    let res = match cli.command {
        Commands::Load { file } => {
            let body = std::fs::read(&file)?;
            client
                .post(format!("{}/api/advertising/load", cli.url))
                .header(CONTENT_TYPE, "text/plain; charset=utf-8")
                .body(body)
                .send()
                .await?
        }
        Commands::Search { location } => {
            client
                .get(format!("{}/api/advertising/search", cli.url))
                .query(&[("location", location)])
                .send()
                .await?
        }
        Commands::Status => {
            client
                .get(format!("{}/admin/status", cli.url))
                .headers(admin_headers)
                .send()
                .await?
        }
        Commands::Index => {
            client
                .get(format!("{}/admin/index", cli.url))
                .headers(admin_headers)
                .send()
                .await?
        }
        Commands::Reload => {
            client
                .post(format!("{}/admin/reload", cli.url))
                .headers(admin_headers)
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
