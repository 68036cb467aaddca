//! Command implementations for faunactl.

use crate::client::DaemonClient;
use anyhow::Result;
use owo_colors::OwoColorize;

pub async fn animal(client: &DaemonClient, name: &str) -> Result<()> {
    let record = client.animal(name).await?;

    println!("{}", record.name.bold());
    println!("  {} {}", "Species:".dimmed(), record.species);
    println!("  {} {}", "Size:".dimmed(), record.size);
    println!("  {} {}", "Weight:".dimmed(), record.weight);
    println!("  {}", record.description);
    if record.image.url.starts_with("data:") {
        println!("  {} {}", "Image:".dimmed(), "(generated badge)");
    } else {
        println!("  {} {}", "Image:".dimmed(), record.image.url);
    }
    println!("  {} {}", "Source:".dimmed(), record.source);

    Ok(())
}

pub async fn ask(client: &DaemonClient, prompt: &str, model: Option<&str>) -> Result<()> {
    let answer = client.ask(prompt, model).await?;

    match answer.text {
        Some(text) => println!("{}", text),
        None => {
            println!("{}", "No text in the response; raw payload:".yellow());
            println!("{}", serde_json::to_string_pretty(&answer.raw)?);
        }
    }

    Ok(())
}

pub async fn query(client: &DaemonClient, query: &str) -> Result<()> {
    let payload = client.query(query).await?;
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

pub async fn health(client: &DaemonClient) -> Result<()> {
    let health = client.health().await?;

    let status = if health.status == "healthy" {
        health.status.green().to_string()
    } else {
        health.status.red().to_string()
    };
    println!("{} {}", "Status:".dimmed(), status);
    println!("{} v{}", "Version:".dimmed(), health.version);
    println!("{} {}s", "Uptime:".dimmed(), health.uptime_seconds);

    Ok(())
}
