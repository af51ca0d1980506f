use barberia_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Entorno (.env) y configuración
    dotenv::dotenv().ok();
    let config = Config::from_env();

    // 2. Log
    init_logger_with_file(None, config.log_dir.as_deref());

    tracing::info!("Barbería server iniciando...");

    // 3. Estado (base de datos + cuenta administradora)
    let state = ServerState::initialize(&config).await?;

    // 4. Servidor HTTP
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Error del servidor: {}", e);
        return Err(e);
    }

    Ok(())
}
