//! Direct-client demo.
//!
//! Drives the same documentation agent as `docs-assistant`, but with the raw
//! [`AgentsClient`] calls spelled out: create agent, create thread, post a
//! message, create a run, poll it to a terminal status while approving MCP
//! tool calls, then read the assistant's reply off the thread.
//!
//! # Running
//!
//! ```bash
//! az login
//! PROJECT_ENDPOINT=https://<resource>.services.ai.azure.com/api/projects/<project> \
//!     cargo run --bin run-loop-direct
//! ```

use std::sync::Arc;

use foundry_agents::{
    wait_for_run, AgentsClient, ApproveAll, AzureCliCredential, Config, CreateAgent, CreateRun,
    Error, McpToolDefinition, McpToolResource, MessageRole, PollConfig, RequireApproval,
    RunStatus, ToolResources,
};

const QUERY: &str =
    "Search Microsoft Learn for 'Azure Functions Python quickstart' and summarize the key steps.";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    println!("Direct run loop against {}", config.endpoint);

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

    let agent = client
        .create_agent(&CreateAgent {
            model: config.model.clone(),
            name: "docs-assistant-direct".to_string(),
            instructions: "You are a documentation assistant. Search Microsoft Learn \
                           through the MCP tools before answering and cite source URLs."
                .to_string(),
            tools: vec![McpToolDefinition::new(
                &config.mcp_server_label,
                &config.mcp_server_url,
            )],
        })
        .await?;
    println!("Created agent {}", agent.id);

    let thread = client.create_thread().await?;
    client
        .create_message(&thread.id, MessageRole::User, QUERY)
        .await?;
    println!("User: {QUERY}");

    let run = client
        .create_run(
            &thread.id,
            &CreateRun {
                agent_id: agent.id.clone(),
                tool_resources: Some(ToolResources::mcp(
                    McpToolResource::new(&config.mcp_server_label)
                        .require_approval(RequireApproval::Always),
                )),
            },
        )
        .await?;

    let run = wait_for_run(
        &client,
        &thread.id,
        run,
        &ApproveAll::new(),
        &PollConfig::default(),
    )
    .await?;

    if run.status != RunStatus::Completed {
        let (code, message) = run
            .last_error
            .map(|e| (Some(e.code), e.message))
            .unwrap_or((None, format!("run ended as {}", run.status)));
        return Err(Error::Run {
            status: run.status,
            code,
            message,
        });
    }

    // Messages come back newest first.
    let messages = client.list_messages(&thread.id).await?;
    for message in messages
        .data
        .iter()
        .filter(|m| m.role == MessageRole::Assistant)
    {
        println!("\nAssistant:\n{}", message.text());
    }

    client.delete_agent(&agent.id).await?;
    println!("\nDone, agent deleted.");
    Ok(())
}
