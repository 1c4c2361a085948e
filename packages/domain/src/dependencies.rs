//! # プロバイダの依存オブジェクト
//!
//! プロバイダ構築時に渡す協調オブジェクト（設定・ロガー・エラーハンドラ）をまとめる。

use std::{fmt, sync::Arc};

use mailport_shared::{
    config::{ConfigSource, EnvConfig},
    error_handler::{ErrorHandler, TracingErrorHandler},
    logger::{Logger, TracingLogger},
};

/// プロバイダが利用する協調オブジェクト
#[derive(Clone)]
pub struct Dependencies {
    /// 設定値の参照元
    pub config:        Arc<dyn ConfigSource>,
    /// 情報ログの出力先
    pub logger:        Arc<dyn Logger>,
    /// 予期しないエラーの記録先
    pub error_handler: Arc<dyn ErrorHandler>,
}

impl Dependencies {
    pub fn new(
        config: Arc<dyn ConfigSource>,
        logger: Arc<dyn Logger>,
        error_handler: Arc<dyn ErrorHandler>,
    ) -> Self {
        Self {
            config,
            logger,
            error_handler,
        }
    }

    /// 指定した設定ソースと既定のロガー・エラーハンドラで構築する
    pub fn with_config(config: Arc<dyn ConfigSource>) -> Self {
        Self::new(config, Arc::new(TracingLogger), Arc::new(TracingErrorHandler))
    }

    /// 環境変数の設定ソースと既定のロガー・エラーハンドラで構築する
    ///
    /// カレントディレクトリに `.env` があれば先に読み込む。
    pub fn from_env() -> Self {
        EnvConfig::load_dotenv();
        Self::with_config(Arc::new(EnvConfig::new()))
    }
}

impl fmt::Debug for Dependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dependencies").finish_non_exhaustive()
    }
}
