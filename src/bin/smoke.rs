//! Manual smoke test: posts one message to a running gateway and prints the
//! reply.
//!
//! ```bash
//! cargo run --bin zakbot-smoke -- "Do you offer service plans?"
//! ```

use std::time::Duration;

use anyhow::Context;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Value, json};

const DEFAULT_URL: &str = "http://127.0.0.1:3000/api/chat";
const DEFAULT_MESSAGE: &str = "What services does Zakbot offer?";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let url = std::env::var("SMOKE_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
    let args: Vec<String> = std::env::args().skip(1).collect();
    let message = if args.is_empty() {
        DEFAULT_MESSAGE.to_string()
    } else {
        args.join(" ")
    };

    println!("{} {}", "POST".bold().cyan(), url);
    println!("{} {}", "You:".bold(), message);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    pb.set_message("waiting for Zakbot...");
    pb.enable_steady_tick(Duration::from_millis(80));

    let result = reqwest::Client::new()
        .post(&url)
        .json(&json!({ "message": message }))
        .timeout(Duration::from_secs(60))
        .send()
        .await;
    pb.finish_and_clear();

    let resp = result.with_context(|| format!("request to {url} failed"))?;
    let status = resp.status();
    let body: Value = resp.json().await.context("response is not JSON")?;

    if status.is_success() {
        let reply = body["reply"].as_str().unwrap_or_default();
        println!("{} {}", "Zakbot:".green().bold(), reply);
        Ok(())
    } else {
        println!("{} {} {}", "✗".red().bold(), status.to_string().red(), body);
        anyhow::bail!("gateway answered {status}")
    }
}
