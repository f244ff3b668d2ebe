//! Startup wiring: environment, logging, config, store and client.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use gemchat_ai::{ExchangeClient, GeminiClient, GeminiConfig, RetryPolicy, SafetyThreshold};
use gemchat_common::{paths, GemchatError};
use gemchat_config::{GemchatConfig, LogLevel, SafetyLevel};
use gemchat_store::{FileKvStore, SessionStore};
use tracing::Subscriber;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, EnvFilter, Registry};

/// Load `KEY=VALUE` lines from `./.env`. Variables already present in the
/// environment are left alone.
pub fn load_dotenv() {
    load_dotenv_from(Path::new(".env"));
}

/// Returns how many variables were set from `path`.
pub fn load_dotenv_from(path: &Path) -> usize {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return 0;
    };
    let mut set = 0;
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if !key.is_empty() && std::env::var_os(key).is_none() {
                std::env::set_var(key, value);
                set += 1;
            }
        }
    }
    set
}

/// Filter directive for gemchat's own targets. A `--log-level` value wins
/// over the config level.
pub fn log_directive(cli_level: Option<&str>, config_level: LogLevel) -> String {
    let level = cli_level
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(config_level.as_directive());
    format!("gemchat={level}")
}

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// The installed log filter. Installed before the config file is read so
/// loader warnings are not lost, then narrowed to `logging.level`.
pub struct Logging {
    handle: FilterHandle,
    /// `RUST_LOG` or `--log-level` was given, so the config level is ignored.
    pinned: bool,
}

impl Logging {
    pub fn apply_config_level(&self, level: LogLevel) {
        if self.pinned {
            return;
        }
        let directive = log_directive(None, level);
        if let Err(e) = self.handle.reload(EnvFilter::new(&directive)) {
            tracing::warn!("failed to apply log level {directive}: {e}");
        }
    }
}

/// Directive fixed before the config is known: `RUST_LOG`, then `--log-level`.
pub fn pinned_directive(rust_log: Option<&str>, cli_level: Option<&str>) -> Option<String> {
    if let Some(env) = rust_log.filter(|env| !env.trim().is_empty()) {
        return Some(env.to_string());
    }
    cli_level
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| format!("gemchat={l}"))
}

fn layered<W>(
    filter: EnvFilter,
    writer: W,
) -> (impl Subscriber + Send + Sync + 'static, FilterHandle)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (filter, handle) = reload::Layer::new(filter);
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer));
    (subscriber, handle)
}

/// Install the global subscriber, writing to stderr so stdout stays clean for
/// replies.
pub fn init_logging(cli_level: Option<&str>) -> Logging {
    let rust_log = std::env::var("RUST_LOG").ok();
    let pinned = pinned_directive(rust_log.as_deref(), cli_level);
    let directive = pinned
        .clone()
        .unwrap_or_else(|| log_directive(None, LogLevel::default()));
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("invalid log filter {directive:?}: {e}; using info");
        EnvFilter::new("gemchat=info")
    });
    let (subscriber, handle) = layered(filter, std::io::stderr);
    let _ = subscriber.try_init();
    Logging {
        handle,
        pinned: pinned.is_some(),
    }
}

/// Load the config file, falling back to defaults when it cannot be read.
pub fn load_config(path: Option<&Path>) -> GemchatConfig {
    let loaded = match path {
        Some(path) => gemchat_config::toml_loader::load_or_default(path),
        None => gemchat_config::toml_loader::load_default(),
    };
    loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        GemchatConfig::default()
    })
}

fn safety_threshold(level: SafetyLevel) -> SafetyThreshold {
    match level {
        SafetyLevel::BlockNone => SafetyThreshold::BlockNone,
        SafetyLevel::BlockOnlyHigh => SafetyThreshold::BlockOnlyHigh,
        SafetyLevel::BlockMediumAndAbove => SafetyThreshold::BlockMediumAndAbove,
        SafetyLevel::BlockLowAndAbove => SafetyThreshold::BlockLowAndAbove,
    }
}

pub fn gemini_config(config: &GemchatConfig) -> GeminiConfig {
    let api = &config.api;
    GeminiConfig::new(api.resolve_api_key())
        .with_model(api.model.clone())
        .with_base_url(api.base_url.clone())
        .with_temperature(api.temperature)
        .with_top_k(api.top_k)
        .with_top_p(api.top_p)
        .with_max_output_tokens(api.max_output_tokens)
        .with_safety_threshold(safety_threshold(api.safety_threshold))
        .with_retry(RetryPolicy::new(
            config.retry.max_attempts,
            Duration::from_millis(u64::from(config.retry.base_delay_ms)),
        ))
        .with_timeouts(
            Duration::from_secs(u64::from(api.connect_timeout_secs)),
            Duration::from_secs(u64::from(api.request_timeout_secs)),
        )
}

pub fn build_client(config: &GemchatConfig) -> Result<Arc<dyn ExchangeClient>, GemchatError> {
    let gemini = gemini_config(config);
    if !gemini.has_credential() {
        tracing::warn!(
            "no API key found in api.api_key or ${}; messages will fail until one is set",
            config.api.api_key_env
        );
    }
    let client = GeminiClient::new(gemini).map_err(|e| GemchatError::Exchange(e.to_string()))?;
    Ok(Arc::new(client))
}

pub fn data_dir(config: &GemchatConfig) -> Result<PathBuf, GemchatError> {
    match &config.storage.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(paths::data_dir()?),
    }
}

pub fn open_store(config: &GemchatConfig) -> Result<SessionStore, GemchatError> {
    let dir = data_dir(config)?;
    tracing::info!(
        dir = %dir.display(),
        key = %config.storage.state_key,
        "opening session store"
    );
    Ok(SessionStore::open(
        FileKvStore::new(dir),
        config.storage.state_key.clone(),
    ))
}

/// Where exports go: the explicit `--out`, then `storage.export_dir`, then
/// the working directory.
pub fn export_dir(config: &GemchatConfig, out: Option<PathBuf>) -> PathBuf {
    out.or_else(|| config.storage.export_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    #[test]
    fn dotenv_sets_missing_vars_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::env::set_var("GEMCHAT_BOOT_TEST_PRESET", "kept");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "# comment").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "GEMCHAT_BOOT_TEST_NEW=\"quoted value\"").unwrap();
        writeln!(file, "export GEMCHAT_BOOT_TEST_EXPORTED='single'").unwrap();
        writeln!(file, "GEMCHAT_BOOT_TEST_PRESET=replaced").unwrap();
        writeln!(file, "not a pair").unwrap();
        drop(file);

        assert_eq!(load_dotenv_from(&path), 2);
        assert_eq!(std::env::var("GEMCHAT_BOOT_TEST_NEW").unwrap(), "quoted value");
        assert_eq!(std::env::var("GEMCHAT_BOOT_TEST_EXPORTED").unwrap(), "single");
        assert_eq!(std::env::var("GEMCHAT_BOOT_TEST_PRESET").unwrap(), "kept");
    }

    #[test]
    fn missing_dotenv_is_fine() {
        assert_eq!(load_dotenv_from(Path::new("/nonexistent/gemchat/.env")), 0);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn config_load_warnings_are_logged_then_level_applies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nmodel = ").unwrap();

        let captured = Captured::default();
        let (subscriber, handle) = layered(EnvFilter::new("gemchat=info"), captured.clone());
        let logging = Logging {
            handle,
            pinned: false,
        };
        tracing::subscriber::with_default(subscriber, || {
            let config = load_config(Some(path.as_path()));
            assert_eq!(config.api.model, "gemini-2.5-flash");
            logging.apply_config_level(LogLevel::Error);
            tracing::warn!("emitted after narrowing");
        });

        let out = captured.text();
        assert!(out.contains("Config load failed, using defaults"));
        assert!(!out.contains("emitted after narrowing"));
    }

    #[test]
    fn pinned_filter_ignores_config_level() {
        let captured = Captured::default();
        let (subscriber, handle) = layered(EnvFilter::new("gemchat=debug"), captured.clone());
        let logging = Logging {
            handle,
            pinned: true,
        };
        tracing::subscriber::with_default(subscriber, || {
            logging.apply_config_level(LogLevel::Error);
            tracing::debug!("still visible");
        });
        assert!(captured.text().contains("still visible"));
    }

    #[test]
    fn rust_log_pins_before_cli_level() {
        assert_eq!(
            pinned_directive(Some("gemchat_ai=trace"), Some("debug")).as_deref(),
            Some("gemchat_ai=trace")
        );
        assert_eq!(
            pinned_directive(Some("  "), Some("debug")).as_deref(),
            Some("gemchat=debug")
        );
        assert_eq!(pinned_directive(None, None), None);
        assert_eq!(pinned_directive(None, Some(" ")), None);
    }

    #[test]
    fn cli_level_overrides_config() {
        assert_eq!(log_directive(Some("debug"), LogLevel::Warn), "gemchat=debug");
        assert_eq!(log_directive(None, LogLevel::Warn), "gemchat=warn");
        assert_eq!(log_directive(Some("  "), LogLevel::Error), "gemchat=error");
    }

    #[test]
    fn gemini_config_follows_file() {
        let mut config = GemchatConfig::default();
        config.api.api_key = Some("k".into());
        config.api.model = "gemini-2.5-pro".into();
        config.api.top_k = 8;
        config.api.safety_threshold = SafetyLevel::BlockNone;
        config.retry.max_attempts = 5;
        config.retry.base_delay_ms = 250;
        config.api.request_timeout_secs = 30;

        let gemini = gemini_config(&config);
        assert_eq!(gemini.api_key, "k");
        assert_eq!(gemini.model, "gemini-2.5-pro");
        assert_eq!(gemini.top_k, 8);
        assert_eq!(gemini.safety_threshold, SafetyThreshold::BlockNone);
        assert_eq!(gemini.retry.max_attempts, 5);
        assert_eq!(gemini.retry.base_delay, Duration::from_millis(250));
        assert_eq!(gemini.request_timeout, Duration::from_secs(30));
        assert_eq!(gemini.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn export_dir_precedence() {
        let mut config = GemchatConfig::default();
        assert_eq!(export_dir(&config, None), PathBuf::from("."));
        config.storage.export_dir = Some(PathBuf::from("/srv/exports"));
        assert_eq!(export_dir(&config, None), PathBuf::from("/srv/exports"));
        assert_eq!(
            export_dir(&config, Some(PathBuf::from("/tmp/out"))),
            PathBuf::from("/tmp/out")
        );
    }

    #[test]
    fn store_opens_in_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = GemchatConfig::default();
        config.storage.data_dir = Some(dir.path().to_path_buf());
        config.storage.state_key = "testState".into();

        let mut store = open_store(&config).unwrap();
        assert_eq!(store.key(), "testState");
        store.create_session();
        assert!(dir.path().join("testState.json").exists());
    }
}
