use leave_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    setup_environment()?;

    tracing::info!("leave-server starting...");

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize state (blob dir, record store, seed accounts)
    let state = ServerState::initialize(&config)?;

    // 4. Serve HTTP
    let server = Server::with_state(config, state);
    server.run().await
}
