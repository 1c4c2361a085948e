//! # カテゴリ付き情報ログ
//!
//! アダプタが送信状況を記録するためのロガー。既定実装は `tracing` に委譲する。
//!
//! 可変長引数のテンプレートの代わりに [`format_args!`] を受け取る:
//!
//! ```rust
//! use mailport_shared::logger::{Logger, TracingLogger};
//!
//! let logger = TracingLogger;
//! logger.info("mail", format_args!("{} 件の宛先へ送信", 3));
//! ```

use std::fmt;

/// 情報ログの出力先
///
/// 実装は呼び出し元をブロックし続けてはならず、パニックしてはならない。
pub trait Logger: Send + Sync {
    /// カテゴリ付きで情報ログを出力する
    fn info(&self, category: &str, message: fmt::Arguments<'_>);
}

/// `tracing::info!` に委譲するロガー
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, category: &str, message: fmt::Arguments<'_>) {
        tracing::info!(category, "{message}");
    }
}
