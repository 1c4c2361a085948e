//! # Mailport インフラ層
//!
//! [`MailProvider`](mailport_domain::MailProvider) の具体実装を提供する。
//!
//! ## 設計方針
//!
//! - **ベンダーごとに 1 モジュール**: 配信サービス固有の API 形式・認証・エラーは
//!   各モジュールに閉じ込め、ドメイン層には [`MailError`](mailport_domain::MailError) として返す
//! - **設定による切替**: `mail.backend` でランタイムに実装を選択する（[`backend`]）
//!
//! ## モジュール構成
//!
//! - [`sendgrid`]: SendGrid v3 API
//! - [`noop`]: 送信しない実装（ログ出力のみ）
//! - [`backend`]: 設定に応じたプロバイダの構築
//! - `mock`: テスト用の記録プロバイダ（`test-utils` feature）

pub mod backend;
#[cfg(feature = "test-utils")]
pub mod mock;
pub mod noop;
pub mod sendgrid;

pub use backend::{MailBackend, build_provider};
pub use noop::NoopMailProvider;
pub use sendgrid::SendGridProvider;
