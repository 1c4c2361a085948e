//! # 設定値の参照
//!
//! メール送信アダプタが必要とする資格情報などの設定値を、パス文字列で参照する。
//!
//! ## 設計方針
//!
//! [12-Factor App](https://12factor.net/ja/config) の原則に従い、既定の実装は
//! 環境変数から読み込む。参照は呼び出しのたびに行うため、プロバイダ構築後に
//! 値を差し替えても次の送信から反映される（ホットリロード）。
//!
//! ## パスと環境変数名
//!
//! パスはドット区切りまたはコロン区切りで指定する。[`EnvConfig`] は次の規則で
//! 環境変数名に変換する:
//!
//! | パス | 環境変数名 |
//! |------|-----------|
//! | `mail.sendgrid.key` | `MAIL_SENDGRID_KEY` |
//! | `mail:backend` | `MAIL_BACKEND` |
//! | `mail.sendgrid.key`（プレフィックス `MAILPORT`） | `MAILPORT_MAIL_SENDGRID_KEY` |
//!
//! ## 使用例
//!
//! ```rust
//! use mailport_shared::config::{ConfigSource, MapConfig};
//!
//! let config = MapConfig::new().with("mail.sendgrid.key", "SG.xxxx");
//! assert_eq!(config.get_required_string("mail.sendgrid.key").unwrap(), "SG.xxxx");
//! assert!(config.get_required_string("mail.backend").is_err());
//! ```

use std::{collections::HashMap, env, path::Path, sync::RwLock};

use thiserror::Error;

/// 設定参照で発生するエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の設定キーが存在しない
    #[error("必須の設定値がありません: {path}")]
    Missing {
        /// 参照した設定パス
        path: String,
    },

    /// 設定キーは存在するが値が空
    #[error("設定値が空です: {path}")]
    Empty {
        /// 参照した設定パス
        path: String,
    },

    /// 設定値が解釈できない
    #[error("設定値が不正です: {path}={value}")]
    Invalid {
        /// 参照した設定パス
        path:  String,
        /// 実際の値
        value: String,
    },

    /// 設定ソース自体が利用できない
    #[error("設定ソースを参照できません: {0}")]
    Unavailable(String),
}

/// 設定値の参照元
///
/// 実装は [`get_string`](ConfigSource::get_string) のみを提供すればよい。
/// 必須チェックは [`get_required_string`](ConfigSource::get_required_string) が共通で行う。
pub trait ConfigSource: Send + Sync {
    /// 設定値を取得する。未設定の場合は `Ok(None)` を返す
    fn get_string(&self, path: &str) -> Result<Option<String>, ConfigError>;

    /// 必須の設定値を取得する
    ///
    /// # Errors
    ///
    /// - 未設定の場合は [`ConfigError::Missing`]
    /// - 空白のみの場合は [`ConfigError::Empty`]
    fn get_required_string(&self, path: &str) -> Result<String, ConfigError> {
        match self.get_string(path)? {
            None => Err(ConfigError::Missing {
                path: path.to_string(),
            }),
            Some(value) if value.trim().is_empty() => Err(ConfigError::Empty {
                path: path.to_string(),
            }),
            Some(value) => Ok(value),
        }
    }
}

/// 環境変数を参照する設定ソース
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    prefix: Option<String>,
}

impl EnvConfig {
    /// プレフィックスなしの設定ソースを作成する
    pub fn new() -> Self {
        Self::default()
    }

    /// 環境変数名にプレフィックスを付ける設定ソースを作成する
    ///
    /// `with_prefix("MAILPORT")` の場合、`mail.backend` は `MAILPORT_MAIL_BACKEND` を参照する。
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// カレントディレクトリの `.env` を読み込む（開発環境向け）
    ///
    /// ファイルが存在しない場合は何もしない。既に設定済みの環境変数は上書きしない。
    pub fn load_dotenv() {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), ".env を読み込みました");
        }
    }

    /// 指定したファイルを `.env` 形式で読み込む
    ///
    /// 既に設定済みの環境変数は上書きしない。
    ///
    /// # Errors
    ///
    /// ファイルが読めない、または書式が不正な場合は [`ConfigError::Unavailable`]
    pub fn load_dotenv_from(path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        dotenvy::from_path(path)
            .map_err(|e| ConfigError::Unavailable(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), ".env を読み込みました");
        Ok(())
    }

    /// 設定パスを環境変数名に変換する
    pub fn env_var_name(&self, path: &str) -> String {
        let name: String = path
            .chars()
            .map(|c| match c {
                '.' | ':' | '-' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect();

        match &self.prefix {
            Some(prefix) => format!("{}_{name}", prefix.to_ascii_uppercase()),
            None => name,
        }
    }
}

impl ConfigSource for EnvConfig {
    fn get_string(&self, path: &str) -> Result<Option<String>, ConfigError> {
        match env::var(self.env_var_name(path)) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(raw)) => Err(ConfigError::Invalid {
                path:  path.to_string(),
                value: raw.to_string_lossy().into_owned(),
            }),
        }
    }
}

/// インメモリの設定ソース
///
/// 値は実行中に [`set`](MapConfig::set) / [`remove`](MapConfig::remove) で差し替えられる。
/// 設定をコードから注入する場合やテストで使用する。
#[derive(Debug, Default)]
pub struct MapConfig {
    values: RwLock<HashMap<String, String>>,
}

impl MapConfig {
    /// 空の設定ソースを作成する
    pub fn new() -> Self {
        Self::default()
    }

    /// 値を追加した設定ソースを返す（ビルダー形式）
    pub fn with(self, path: impl Into<String>, value: impl Into<String>) -> Self {
        if let Ok(mut values) = self.values.write() {
            values.insert(path.into(), value.into());
        }
        self
    }

    /// 値を設定する。既存の値は上書きされる
    pub fn set(&self, path: impl Into<String>, value: impl Into<String>) -> Result<(), ConfigError> {
        self.values
            .write()
            .map_err(|e| ConfigError::Unavailable(e.to_string()))?
            .insert(path.into(), value.into());
        Ok(())
    }

    /// 値を削除する
    pub fn remove(&self, path: &str) -> Result<Option<String>, ConfigError> {
        Ok(self
            .values
            .write()
            .map_err(|e| ConfigError::Unavailable(e.to_string()))?
            .remove(path))
    }
}

impl<K, V> FromIterator<(K, V)> for MapConfig
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: RwLock::new(
                iter.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl ConfigSource for MapConfig {
    fn get_string(&self, path: &str) -> Result<Option<String>, ConfigError> {
        let values = self
            .values
            .read()
            .map_err(|e| ConfigError::Unavailable(e.to_string()))?;
        Ok(values.get(path).cloned())
    }
}
