//! Graph status command.

use anyhow::Result;
use colored::Colorize;

use keurex_graph::GraphClient;

pub async fn execute(client: &GraphClient) -> Result<()> {
    let counts = client.get_counts().await?;

    println!("{}", "Graph status".bold());
    println!("  Nodes:         {}", counts.nodes);
    println!("  Relationships: {}", counts.relationships);
    Ok(())
}
