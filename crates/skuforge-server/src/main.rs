mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = skuforge_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = skuforge_db::PoolConfig::from_app_config(&config);
    let pool = skuforge_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = skuforge_db::run_migrations(&pool).await?;
    if applied > 0 {
        tracing::info!(applied, "applied pending migrations");
    }

    // Warm the reference catalog so category/brand lookups work out of the
    // box. A missing or broken catalog file is not fatal; products can
    // still be created against rows seeded some other way.
    match skuforge_core::catalog::load_catalog(&config.catalog_path) {
        Ok(catalog) => {
            let summary = skuforge_db::seed_catalog(&pool, &catalog).await?;
            tracing::info!(
                categories = summary.categories,
                subcategories = summary.subcategories,
                brands = summary.brands,
                "reference catalog seeded"
            );
        }
        Err(e) => {
            tracing::warn!(
                path = %config.catalog_path.display(),
                error = %e,
                "reference catalog not seeded"
            );
        }
    }

    let media = match (&config.media_base_url, &config.media_api_key) {
        (Some(base_url), Some(api_key)) => Some(Arc::new(skuforge_media::MediaClient::new(
            base_url,
            api_key,
            config.media_request_timeout_secs,
        )?)),
        _ => {
            tracing::warn!(
                "SKUFORGE_MEDIA_BASE_URL/SKUFORGE_MEDIA_API_KEY not set; media endpoints will answer 503"
            );
            None
        }
    };

    let auth = AuthState::from_env(matches!(
        config.env,
        skuforge_core::Environment::Development
    ))?;
    let app = build_app(
        AppState {
            pool,
            max_variants_per_product: config.max_variants_per_product,
            media,
            media_upload_folder: config.media_upload_folder.clone(),
        },
        auth,
        default_rate_limit_state(),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "skuforge-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
