//! Documentation assistant demo.
//!
//! Creates an agent with the Microsoft Learn MCP server attached, asks it
//! two documentation questions, prints the answers, and deletes the agent.
//!
//! # Running
//!
//! ```bash
//! az login
//! PROJECT_ENDPOINT=https://<resource>.services.ai.azure.com/api/projects/<project> \
//!     cargo run --bin docs-assistant
//! ```
//!
//! To see debug logs from the SDK:
//! ```bash
//! RUST_LOG=foundry_agents=debug cargo run --bin docs-assistant
//! ```

use std::sync::Arc;

use foundry_agents::{
    AgentDefinition, AgentsClient, AzureCliCredential, Config, Error, FoundryAgent,
    McpToolDefinition,
};

const AGENT_NAME: &str = "docs-assistant";

const INSTRUCTIONS: &str = "\
You are a helpful documentation assistant specializing in Microsoft Azure and \
.NET documentation, with access to Microsoft Learn through MCP tools.

Always search the documentation with the MCP tools before answering; do not \
rely on training data alone. Summarize what you find clearly and cite the \
source URLs.";

const QUERIES: [&str; 2] = [
    "Search Microsoft Learn for 'Azure Functions Python quickstart' and summarize the key steps.",
    "What is Microsoft Agent Framework? Search the docs.",
];

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    println!("Documentation assistant with MCP tools");
    println!("{}", "=".repeat(60));
    println!("MCP server: {} ({})", config.mcp_server_label, config.mcp_server_url);
    println!("Project:    {}", config.endpoint);
    println!("Model:      {}", config.model);
    println!("{}", "=".repeat(60));

    if !config.is_foundry_endpoint() {
        eprintln!(
            "PROJECT_ENDPOINT is not an AI Foundry project endpoint; expected \
             https://<resource>.services.ai.azure.com/api/projects/<project>. Nothing to do."
        );
        return;
    }

    if let Err(err) = run(&config).await {
        eprintln!("\nerror: {err}");
        if let Some(hint) = err.hint() {
            eprintln!("hint: {hint}");
        }
        std::process::exit(1);
    }
}

async fn run(config: &Config) -> Result<(), Error> {
    let client = AgentsClient::new(&config.endpoint, Arc::new(AzureCliCredential::new()));

    let agent = FoundryAgent::create(
        client,
        AgentDefinition::new(AGENT_NAME, &config.model)
            .instructions(INSTRUCTIONS)
            .tool(McpToolDefinition::new(
                &config.mcp_server_label,
                &config.mcp_server_url,
            )),
    )
    .await?;

    println!("\nCreated agent {} ({})", agent.name(), agent.id());

    for query in QUERIES {
        println!("\n{}", "=".repeat(60));
        println!("User: {query}");
        println!("{}", "-".repeat(60));

        let reply = agent.ask(query).await?;

        println!("{AGENT_NAME}:");
        println!("{}", reply.text);
        if let Some(usage) = reply.usage {
            println!(
                "\n[{} prompt + {} completion tokens]",
                usage.prompt_tokens, usage.completion_tokens
            );
        }
    }

    agent.delete().await?;
    println!("\nDone, agent deleted.");
    Ok(())
}
