//! # Mailport 共有ユーティリティ
//!
//! メール送信抽象（domain）とベンダーアダプタ（infra）の双方から使われる
//! 横断的な協調オブジェクトを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra）から依存される
//! - メール送信のロジックを含まない純粋なユーティリティのみを配置
//! - 協調オブジェクトはトレイトで定義し、既定実装を併せて提供する
//!
//! ## モジュール構成
//!
//! - [`config`] - 設定値の参照（環境変数 / インメモリ）
//! - [`logger`] - カテゴリ付き情報ログ
//! - [`error_handler`] - エラー記録とパニックガード
//! - `observability` - ErrorLayer 付きトレーシング初期化（`observability` feature）

pub mod config;
pub mod error_handler;
pub mod logger;
#[cfg(feature = "observability")]
pub mod observability;

pub use config::{ConfigError, ConfigSource, EnvConfig, MapConfig};
pub use error_handler::{ErrorHandler, PanicError, TracingErrorHandler, guard, spawn_guarded};
pub use logger::{Logger, TracingLogger};
