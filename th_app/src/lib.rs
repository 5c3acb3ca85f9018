use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing_subscriber::prelude::*;

/// Builds the shared application context from the loaded configuration.
pub trait ContextProvider<Config>: Sized {
    type Error: std::error::Error + Send + Sync + 'static;

    fn new(config: Config) -> impl Future<Output = Result<Self, Self::Error>>;
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] figment::Error),

    #[error("failed to initialize application context: {0}")]
    Context(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Installs the global tracing subscriber.
///
/// The log level defaults to `info` and can be overridden with the
/// `RUST_LOG` env var.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}

/// The configuration sources, in increasing order of precedence: the
/// `Default` impl of `Config`, then the raw process environment.
pub fn figment<Config>() -> Figment
where
    Config: Serialize + Default,
{
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Env::raw())
}

/// Extracts `Config` from the sources described in [`figment`].
///
/// # Errors
/// If an environment variable cannot be converted into the type of the
/// field it overrides.
pub fn load_config<Config>() -> Result<Config, figment::Error>
where
    Config: Serialize + DeserializeOwned + Default,
{
    figment::<Config>().extract()
}

/// Initialize the application context with configuration from environment
/// variables layered over the configuration defaults.
///
/// # Errors
/// If the configuration cannot be extracted or the context provider fails
/// to build the context.
pub async fn create_app_context<A, Config>() -> Result<A, StartupError>
where
    A: ContextProvider<Config>,
    Config: Serialize + DeserializeOwned + Default,
{
    let config: Config = load_config()?;

    A::new(config)
        .await
        .map_err(|e| StartupError::Context(Box::new(e)))
}
