use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Environment prefix for overrides (`PRISM__GENERATOR__CACHE_SIZE=64`).
pub const ENV_PREFIX: &str = "PRISM";

/// Custom error type for config loading.
#[prism_derive::prism_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration by layering environment overrides over an optional file.
///
/// 1. **Base file**: when `path` is given, the file must exist; its format follows the
///    extension (TOML, JSON, YAML). Without a path only defaults and the environment apply.
/// 2. **Environment overrides**: variables prefixed with `PRISM__`, nested with `__`
///    (`PRISM__FLATTEN__JOINER` maps to `flatten.joiner`).
///
/// # Example
/// ```rust
/// use prism_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     #[serde(default)]
///     verbose: bool,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/missing.toml")).unwrap_or_default();
/// assert!(!cfg.verbose);
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let mut builder = Config::builder();

    if let Some(path) = path {
        let path = path.as_ref();
        info!("Loading config from {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
