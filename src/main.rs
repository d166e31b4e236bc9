use slo_address::{
    AutocompleteClient, Config, Console, CsvAddressSource, QueryNarrower, ResolutionSession,
    ResumableStore,
};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// 未设置或无法解析 `RUST_LOG` 时的日志级别
const DEFAULT_LOG_FILTER: &str = "warn";

fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn main() -> ExitCode {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "startup failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// 启动阶段的错误直接返回；批处理开始后无论结果如何都会保存
fn run() -> slo_address::Result<ExitCode> {
    let config = Config::from_env()?;
    let client = AutocompleteClient::new(
        config.endpoint.clone(),
        config.require_api_key()?,
        config.request_timeout,
    )?;
    let source = CsvAddressSource::open(&config.source_path, config.address_column.clone())?;
    let store = ResumableStore::new(&config.store_path);
    let previous = store.load()?.unwrap_or_default();
    info!(entries = previous.len(), store = %store.path().display(), "resuming");

    let narrower = QueryNarrower::new(config.narrow_target.clone(), &config.narrow_minimum);
    let mut session = ResolutionSession::with_narrower(client, Console::stdio(), narrower);
    let outcome = session.resolve_batch(&source, previous, config.quota);

    if let Err(err) = store.save(&outcome.map) {
        error!(error = %err, "failed to save progress");
        eprintln!("{err}");
        return Ok(ExitCode::from(2));
    }

    println!(
        "Resolved {} new rows; {} total",
        outcome.resolved.len(),
        outcome.map.len()
    );

    match outcome.error {
        Some(err) => {
            eprintln!("Stopped early: {err}");
            Ok(ExitCode::FAILURE)
        }
        None => Ok(ExitCode::SUCCESS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_log_filter_defaults_to_warn() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_log_filter_honours_rust_log() {
        assert_eq!(
            log_filter(Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            log_filter(Some("slo_address=trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }

    #[test]
    fn test_log_filter_invalid_falls_back() {
        assert_eq!(
            log_filter(Some("slo_address=loud")).max_level_hint(),
            Some(LevelFilter::WARN)
        );
    }
}
