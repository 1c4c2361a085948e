//! # トレーシング初期化
//!
//! `tracing_error::ErrorLayer` を含む subscriber を組み立てる。ErrorLayer がないと
//! `MailError` の SpanTrace は空になるため、送信処理を動かすプロセスは起動時に
//! [`init_tracing`] を 1 度呼び出す。
//!
//! | パス | 環境変数（`EnvConfig`） | 値 |
//! |------|------------------------|----|
//! | `log.format` | `LOG_FORMAT` | `pretty`（既定） / `json` |
//!
//! ログレベルは `RUST_LOG` で制御する。未設定時は [`DEFAULT_FILTER`]。

use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ConfigError, ConfigSource};

/// 出力形式の設定パス
pub const LOG_FORMAT_PATH: &str = "log.format";

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_FILTER: &str = "info,mailport=debug";

/// 設定ソースから出力形式を読み、JSON 出力かどうかを返す
///
/// # Errors
///
/// `pretty` / `json` 以外の値は [`ConfigError::Invalid`]
fn json_output(config: &dyn ConfigSource) -> Result<bool, ConfigError> {
    match config.get_string(LOG_FORMAT_PATH)?.as_deref().map(str::trim) {
        None | Some("" | "pretty") => Ok(false),
        Some("json") => Ok(true),
        Some(other) => Err(ConfigError::Invalid {
            path:  LOG_FORMAT_PATH.to_string(),
            value: other.to_string(),
        }),
    }
}

/// ErrorLayer 付きの subscriber を組み立てる
pub fn subscriber(json: bool) -> impl Subscriber + Send + Sync {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
}

/// グローバル subscriber を設定する
///
/// 既に設定済みの場合は何もしない。
///
/// # Errors
///
/// `log.format` の値が不正な場合は [`ConfigError::Invalid`]
pub fn init_tracing(config: &dyn ConfigSource) -> Result<(), ConfigError> {
    let json = json_output(config)?;
    if subscriber(json).try_init().is_ok() {
        tracing::debug!(json, "トレーシングを初期化しました");
    }
    Ok(())
}
