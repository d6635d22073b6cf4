use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use reqwest::Client;
use tracing::{error, info};

use token_vault::cache::file_store::FileStore;
use token_vault::cache::object_cache::ObjectCache;
use token_vault::cache::store::{NoopStore, ObjectStore};
use token_vault::config::loader::load_config;
use token_vault::config::settings::CacheBackend;
use token_vault::resilience::retry::RetrySettings;
use token_vault::tokens::manager::TokenManager;
use token_vault::utils::constants::{SUFFIX_OBJECT, TOKEN_STORE_PREFIX};
use token_vault::utils::logging::{self, LogLevel};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "token-vault.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Read CLI arguments and YAML config
    // -------------------------------

    let args = Args::parse();
    let service_config = load_config(&args.config)?;
    logging::run(service_config.settings.logging.as_ref(), args.log_level);

    // -------------------------------
    // 2. Construct the cache backend
    //
    // version check and namespace invalidation happen here, once
    // -------------------------------

    let cache_cfg = &service_config.settings.cache;
    let store: Arc<dyn ObjectStore> = match cache_cfg.backend {
        CacheBackend::File => {
            let location = cache_cfg
                .location
                .clone()
                .unwrap_or_else(|| std::env::temp_dir().join("token-vault"));
            Arc::new(FileStore::new(
                location,
                TOKEN_STORE_PREFIX,
                SUFFIX_OBJECT,
                cache_cfg.ttl,
            ))
        }
        CacheBackend::None => Arc::new(NoopStore),
    };

    // -------------------------------
    // 3. Create the request client
    // -------------------------------

    let client = Client::builder()
        .timeout(Duration::from_secs(
            service_config.settings.request_timeout_seconds,
        ))
        .build()?;

    // -------------------------------
    // 4. Warm every configured scope, retrying per settings
    // -------------------------------

    let manager = TokenManager::new(
        service_config.scopes.clone(),
        ObjectCache::new(store),
        client,
    );
    let retry = RetrySettings::from_config(&service_config.settings.retry);

    let mut failures = 0usize;
    for scope in service_config.scopes.keys() {
        let outcome = retry
            .run_with_retry(|| async { manager.get_token(scope).await.map_err(Into::into) })
            .await;
        match outcome {
            Ok(_) => info!("scope '{}' holds a current token", scope),
            Err(err) => {
                error!("scope '{}' warm-up failed: {err}", scope);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} scope(s) failed to warm");
    }
    Ok(())
}
