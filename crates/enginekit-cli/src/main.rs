//! EngineKit — invoke a deployed agent engine and run the SQL session demo.

use std::path::PathBuf;

use enginekit_chat::SqlRunner;
use enginekit_core::EngineKitConfig;
use enginekit_invoke::{EngineClient, LoadTest, StreamQueryRequest};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod session;

fn print_help() {
    println!("EngineKit — agent engine invocation samples");
    println!();
    println!("Usage: enginekit <command>");
    println!();
    println!("Commands:");
    println!("  invoke [--message M] [metadata-file]");
    println!("                             Send one message and print each streamed response");
    println!("  loadtest [metadata-file]   Fire concurrent stream queries under one time limit");
    println!("  sql [db-path]              Interactive SQL session (ephemeral DB by default)");
    println!("  help                       Show this help message");
}

async fn invoke(args: &[String]) -> anyhow::Result<()> {
    let mut config = EngineKitConfig::from_env();

    let mut rest = args.iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--message" | "-m" => match rest.next() {
                Some(message) => config.message = message.clone(),
                None => anyhow::bail!("--message requires a value"),
            },
            path => config.metadata_file = PathBuf::from(path),
        }
    }

    let client = EngineClient::from_deployment(&config)?;
    let request = StreamQueryRequest::new(&config.user_id, &config.message);
    for line in client.invoke(&request, config.request_timeout_ms).await? {
        println!("Agent Response: {}", line);
    }
    Ok(())
}

async fn loadtest(metadata_file: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = EngineKitConfig::from_env();
    if let Some(path) = metadata_file {
        config.metadata_file = path;
    }

    let report = LoadTest::from_config(&config)?.run().await;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn sql_session(db_path: Option<PathBuf>) -> anyhow::Result<()> {
    let runner = match db_path {
        Some(path) => SqlRunner::open(path),
        None => SqlRunner::ephemeral()?,
    };
    let stdin = std::io::stdin();
    let count = session::run(&runner, stdin.lock(), std::io::stdout())?;
    info!("Session ended after {} statements", count);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let operand = args.get(2).map(PathBuf::from);

    match args.get(1).map(String::as_str) {
        Some("invoke") => invoke(args.get(2..).unwrap_or_default()).await,
        Some("loadtest") => loadtest(operand).await,
        Some("sql") => sql_session(operand),
        Some("--help" | "-h" | "help") | None => {
            print_help();
            Ok(())
        }
        Some(other) => {
            eprintln!("Unknown command: {}. Use 'enginekit help' for usage.", other);
            std::process::exit(1);
        }
    }
}
