//! # メール送信エラー定義
//!
//! 設定不備・送信前検証・配信失敗の 3 系統を 1 つの型で表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`MailError`]: エラー種別（[`MailErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`MailErrorKind`]: エラーの具体的な種別
//!
//! `From` 実装や convenience constructor でエラーを生成すると、
//! その時点のスパン情報が自動的にキャプチャされる。
//!
//! ## 種別と発生箇所
//!
//! | 種別 | 発生箇所 |
//! |------|---------|
//! | `Configuration` | プロバイダ構築時 / 送信時の資格情報参照 |
//! | `MissingSender` / `MissingRecipients` | `send` の送信前検証 |
//! | `Delivery` | 配信サービスまたは通信層の失敗（原因をそのまま保持） |

use std::{error::Error as StdError, fmt};

use derive_more::Display;
use mailport_shared::config::ConfigError;
use thiserror::Error;
use tracing_error::SpanTrace;

/// メール送信で発生するエラー
///
/// エラー種別（[`MailErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
#[derive(Display)]
#[display("{kind}")]
pub struct MailError {
    kind:       MailErrorKind,
    span_trace: SpanTrace,
}

/// メール送信エラーの種別
#[derive(Debug, Error)]
pub enum MailErrorKind {
    /// 必須の設定値（資格情報など）が取得できない
    #[error("設定エラー: {0}")]
    Configuration(#[source] ConfigError),

    /// 送信元が設定されていない
    #[error("送信元が指定されていません")]
    MissingSender,

    /// 宛先（To / CC / BCC）が 1 件もない
    #[error("宛先が指定されていません")]
    MissingRecipients,

    /// 配信サービスまたは通信層での失敗
    ///
    /// ベンダー固有のエラーを加工せずに保持する。
    /// 具体的な型は [`MailError::delivery_source`] で取り出せる。
    #[error("配信に失敗しました: {0}")]
    Delivery(#[source] Box<dyn StdError + Send + Sync>),
}

// ===== MailError のメソッド =====

impl MailError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &MailErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// MailError を分解して MailErrorKind と SpanTrace を取り出す
    pub fn into_parts(self) -> (MailErrorKind, SpanTrace) {
        (self.kind, self.span_trace)
    }

    /// 設定エラーか
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind, MailErrorKind::Configuration(_))
    }

    /// 送信前検証のエラーか
    pub fn is_validation(&self) -> bool {
        matches!(
            self.kind,
            MailErrorKind::MissingSender | MailErrorKind::MissingRecipients
        )
    }

    /// 配信エラーか
    pub fn is_delivery(&self) -> bool {
        matches!(self.kind, MailErrorKind::Delivery(_))
    }

    /// 配信エラーの原因を具体的な型として取り出す
    ///
    /// 配信エラーでない場合、または型が一致しない場合は `None` を返す。
    pub fn delivery_source<E: StdError + 'static>(&self) -> Option<&E> {
        match &self.kind {
            MailErrorKind::Delivery(source) => source.downcast_ref::<E>(),
            _ => None,
        }
    }

    // ===== Convenience constructors =====

    /// 送信元未設定エラーを生成する
    pub fn missing_sender() -> Self {
        Self::from_kind(MailErrorKind::MissingSender)
    }

    /// 宛先未設定エラーを生成する
    pub fn missing_recipients() -> Self {
        Self::from_kind(MailErrorKind::MissingRecipients)
    }

    /// 配信エラーを生成する
    pub fn delivery(source: impl StdError + Send + Sync + 'static) -> Self {
        Self::from_kind(MailErrorKind::Delivery(Box::new(source)))
    }

    fn from_kind(kind: MailErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for MailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl StdError for MailError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.kind.source()
    }
}

impl From<ConfigError> for MailError {
    fn from(source: ConfigError) -> Self {
        Self::from_kind(MailErrorKind::Configuration(source))
    }
}
