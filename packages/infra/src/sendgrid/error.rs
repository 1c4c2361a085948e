//! SendGrid 固有のエラー
//!
//! `MailError::delivery` で包んで返すため、呼び出し側は
//! `MailError::delivery_source::<SendGridError>()` で取り出せる。

use thiserror::Error;

/// SendGrid API 呼び出しのエラー
#[derive(Debug, Error)]
pub enum SendGridError {
    /// 接続失敗・タイムアウトなど通信層のエラー
    #[error("SendGrid への通信に失敗: {0}")]
    Transport(#[source] reqwest::Error),

    /// SendGrid が 2xx 以外を返した
    #[error("SendGrid が送信を拒否 (status {status}): {body}")]
    Rejected {
        /// HTTP ステータスコード
        status: u16,
        /// レスポンスボディ（SendGrid のエラー詳細）
        body:   String,
    },
}

impl SendGridError {
    /// 拒否時の HTTP ステータスコードを返す
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Rejected { status, .. } => Some(*status),
        }
    }
}
