use financial_request_generator::{
    dispatcher::Dispatcher,
    llm::{OpenAiClient, OpenAiConfig},
    session::Session,
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

    let user_text = {
        let args: Vec<String> = std::env::args().skip(1).collect();
        if args.is_empty() {
            "Generate a Paytm balance enquiry for user token ABC, amount 500, mid M1".to_string()
        } else {
            args.join(" ")
        }
    };

    info!("Financial Request Generator starting");

    let registry = Arc::new(create_default_registry());
    let model = Arc::new(OpenAiClient::new(config)?);
    let dispatcher = Dispatcher::new(model, registry);

    let session = Session::new();
    info!(request = %user_text, "Running single dispatch turn");

    let reply = dispatcher.handle(&user_text, session.turns()).await;

    println!("\n=== GENERATOR REPLY ===");
    println!("{}", reply.commentary);
    if let Some(payload) = reply.payload {
        println!("\n--- payload ({:?}) ---", payload.format);
        println!("{}", payload.body);
    }

    Ok(())
}
