use financial_request_generator::{
    api::start_server,
    dispatcher::Dispatcher,
    llm::{OpenAiClient, OpenAiConfig},
    tools::create_default_registry,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = OpenAiConfig::from_env();
    if config.api_key.is_empty() {
        eprintln!("⚠️  OPENAI_API_KEY not set in .env");
        eprintln!("📌 See .env.example for setup instructions");
    }

    let api_port: u16 = std::env::var("PORT")
        .or_else(|_| std::env::var("API_PORT"))
        .unwrap_or_else(|_| "8080".to_string())
        .parse()?;

    info!("🚀 Financial Request Generator - API Server");
    info!("📍 Port: {}", api_port);

    // Create components
    let registry = Arc::new(create_default_registry());
    let model = Arc::new(OpenAiClient::new(config)?);
    let dispatcher = Arc::new(Dispatcher::new(model, registry.clone()));

    info!("✅ Dispatcher initialized ({} builders registered)", registry.list().len());
    info!("📡 Starting API server...");

    // Start API server
    start_server(dispatcher, registry, api_port).await?;

    Ok(())
}
