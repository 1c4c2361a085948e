//! # SendGrid アダプタ
//!
//! SendGrid Web API v3（`POST /v3/mail/send`）経由でメールを送信する。
//!
//! ## 設計方針
//!
//! - **資格情報は送信時に参照**: API キーはプロバイダ構築時に存在を確認（fail-fast）し、
//!   実際の値は `send` のたびに設定ソースから取り直す
//! - **追跡の無効化**: クリック・開封・配信停止・Google Analytics の追跡をすべて無効にする
//! - **相関ヘッダ**: `X-Entity-Ref-ID` に送信時の Unix 時刻を入れ、スレッド化を防ぐ
//! - **1 送信 = 1 リクエスト**: リトライもタイムアウトも付与しない（呼び出し側の責務）
//!
//! ## 設定
//!
//! | パス | 環境変数（`EnvConfig`） | 説明 |
//! |------|------------------------|------|
//! | `mail.sendgrid.key` | `MAIL_SENDGRID_KEY` | SendGrid API キー（必須） |

mod client;
mod email;
mod error;
pub mod payload;
mod provider;

pub use client::SendGridClient;
pub use email::SendGridEmail;
pub use error::SendGridError;
pub use provider::SendGridProvider;

/// API キーの設定パス
pub const API_KEY_PATH: &str = "mail.sendgrid.key";

/// SendGrid API のベース URL
pub const DEFAULT_BASE_URL: &str = "https://api.sendgrid.com";

/// メール送信エンドポイントのパス
pub const SEND_PATH: &str = "/v3/mail/send";

/// 送信時刻を入れる相関ヘッダ名
pub const ENTITY_REF_HEADER: &str = "X-Entity-Ref-ID";
