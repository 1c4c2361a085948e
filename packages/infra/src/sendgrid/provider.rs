//! SendGrid プロバイダ

use mailport_domain::{Dependencies, Email, MailError, MailProvider};

use super::{API_KEY_PATH, DEFAULT_BASE_URL, client::SendGridClient, email::SendGridEmail};

/// SendGrid の資格情報に紐づくプロバイダ
///
/// 構築後は不変。`Arc` で包んで複数タスクから共有できる。
#[derive(Debug, Clone)]
pub struct SendGridProvider {
    deps:   Dependencies,
    client: SendGridClient,
}

impl SendGridProvider {
    /// 新しいプロバイダを作成する
    ///
    /// # Errors
    ///
    /// `mail.sendgrid.key` が未設定または空の場合は `Configuration` エラーを返す。
    pub fn new(deps: Dependencies) -> Result<Self, MailError> {
        deps.config.get_required_string(API_KEY_PATH)?;

        tracing::debug!(base_url = DEFAULT_BASE_URL, "SendGrid プロバイダを構築しました");
        Ok(Self {
            deps,
            client: SendGridClient::new(DEFAULT_BASE_URL),
        })
    }

    /// 送信先のベース URL を差し替える（リージョン別エンドポイントやテスト用）
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.client = SendGridClient::new(base_url);
        self
    }

    /// 送信先のベース URL を取得する
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

impl MailProvider for SendGridProvider {
    fn new_email(&self) -> Box<dyn Email> {
        Box::new(SendGridEmail::new(self.deps.clone(), self.client.clone()))
    }

    fn provider_name(&self) -> &'static str {
        "sendgrid"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mailport_domain::MailErrorKind;
    use mailport_shared::config::{ConfigError, MapConfig};
    use pretty_assertions::assert_eq;

    use super::*;

    fn deps(config: MapConfig) -> Dependencies {
        Dependencies::with_config(Arc::new(config))
    }

    #[test]
    fn test_apiキーがあれば構築できる() {
        let provider =
            SendGridProvider::new(deps(MapConfig::new().with(API_KEY_PATH, "SG.test"))).unwrap();

        assert_eq!(provider.provider_name(), "sendgrid");
        assert_eq!(provider.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_apiキーがない場合は設定エラーを返す() {
        let err = SendGridProvider::new(deps(MapConfig::new())).unwrap_err();

        assert!(matches!(
            err.kind(),
            MailErrorKind::Configuration(ConfigError::Missing { path }) if path == API_KEY_PATH
        ));
    }

    #[test]
    fn test_apiキーが空の場合は設定エラーを返す() {
        let err = SendGridProvider::new(deps(MapConfig::new().with(API_KEY_PATH, ""))).unwrap_err();

        assert!(matches!(
            err.kind(),
            MailErrorKind::Configuration(ConfigError::Empty { .. })
        ));
    }

    #[test]
    fn test_with_base_urlで送信先を差し替えられる() {
        let provider = SendGridProvider::new(deps(MapConfig::new().with(API_KEY_PATH, "SG.test")))
            .unwrap()
            .with_base_url("http://127.0.0.1:9999");

        assert_eq!(provider.base_url(), "http://127.0.0.1:9999");
    }

    #[test]
    fn test_プロバイダはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SendGridProvider>();
    }
}
