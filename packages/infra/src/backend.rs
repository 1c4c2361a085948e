//! # 送信バックエンドの選択
//!
//! 設定 `mail.backend` で利用するプロバイダを切り替える:
//! - `sendgrid`: SendGrid v3 API 経由で送信
//! - `noop`: 送信しない（ログ出力のみ）。未設定時の既定値

use std::sync::Arc;

use mailport_domain::{Dependencies, MailError, MailProvider};
use mailport_shared::config::ConfigError;

use crate::{noop::NoopMailProvider, sendgrid::SendGridProvider};

/// バックエンド選択の設定パス
pub const BACKEND_PATH: &str = "mail.backend";

/// 送信バックエンド
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum MailBackend {
    #[strum(serialize = "sendgrid")]
    SendGrid,
    #[default]
    Noop,
}

impl MailBackend {
    /// 設定ソースからバックエンドを読み込む
    ///
    /// # Errors
    ///
    /// 値が既知のバックエンド名でない場合は [`ConfigError::Invalid`]
    pub fn from_config(deps: &Dependencies) -> Result<Self, ConfigError> {
        let Some(value) = deps.config.get_string(BACKEND_PATH)? else {
            return Ok(Self::default());
        };
        let value = value.trim();
        if value.is_empty() {
            return Ok(Self::default());
        }
        value.parse().map_err(|_| ConfigError::Invalid {
            path:  BACKEND_PATH.to_string(),
            value: value.to_string(),
        })
    }
}

/// 設定に従ってプロバイダを構築する
///
/// # Errors
///
/// - バックエンド名が不正な場合は `Configuration`
/// - 選択したプロバイダの構築に失敗した場合はそのエラー
pub fn build_provider(deps: &Dependencies) -> Result<Arc<dyn MailProvider>, MailError> {
    let backend = MailBackend::from_config(deps)?;
    tracing::info!(%backend, "メール送信バックエンドを初期化します");

    let provider: Arc<dyn MailProvider> = match backend {
        MailBackend::SendGrid => Arc::new(SendGridProvider::new(deps.clone())?),
        MailBackend::Noop => Arc::new(NoopMailProvider::new(deps)),
    };
    Ok(provider)
}
