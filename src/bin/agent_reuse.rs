//! Agent-reuse demo.
//!
//! Looks the documentation agent up by name and only creates it when it does
//! not exist yet, so repeated invocations converge on one remote agent. The
//! agent is left in place on exit.
//!
//! # Running
//!
//! ```bash
//! az login
//! PROJECT_ENDPOINT=https://<resource>.services.ai.azure.com/api/projects/<project> \
//!     cargo run --bin agent-reuse
//! ```

use std::sync::Arc;

use foundry_agents::{
    AgentDefinition, AgentsClient, AzureCliCredential, Config, Error, FoundryAgent,
    McpToolDefinition,
};

const AGENT_NAME: &str = "docs-assistant-persistent";

const QUERY: &str = "What is Microsoft Agent Framework? Search the docs.";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    println!("Agent reuse demo against {}", config.endpoint);

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

    let agent = FoundryAgent::create_or_reuse(
        client,
        AgentDefinition::new(AGENT_NAME, &config.model)
            .instructions(
                "You are a documentation assistant. Search Microsoft Learn through \
                 the MCP tools before answering and cite source URLs.",
            )
            .tool(McpToolDefinition::new(
                &config.mcp_server_label,
                &config.mcp_server_url,
            )),
    )
    .await?;

    println!("Using agent {} ({})", agent.name(), agent.id());

    println!("\nUser: {QUERY}");
    let reply = agent.ask(QUERY).await?;
    println!("\n{AGENT_NAME}:\n{}", reply.text);

    // Left in place so the next invocation reuses it.
    println!("\nDone, agent {} kept for reuse.", agent.id());
    Ok(())
}
