use taskboard::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dot_env = check_dot_env();
    init_tracing_subscriber();
    if let Some(reason) = dot_env {
        info!(".env not used: {reason}")
    }

    let config = AppConfig::from_env();
    let store = Store::connect(&config.database_url).await?;
    store.migrate().await?;

    serve(app(store.clone(), &config), &config).await?;
    // flushing pending writes
    store.close().await;
    info!("{} {} stopped", config.name, config.version);
    Ok(())
}
