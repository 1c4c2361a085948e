//! Noop メール送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! 開発環境やメール送信を無効化する場合に使用する。

use std::sync::Arc;

use async_trait::async_trait;
use mailport_domain::{Dependencies, Email, EmailDraft, MailError, MailProvider};
use mailport_shared::logger::Logger;

/// Noop プロバイダ（ログ出力のみ）
#[derive(Clone)]
pub struct NoopMailProvider {
    logger: Arc<dyn Logger>,
}

impl NoopMailProvider {
    pub fn new(deps: &Dependencies) -> Self {
        Self {
            logger: Arc::clone(&deps.logger),
        }
    }
}

impl MailProvider for NoopMailProvider {
    fn new_email(&self) -> Box<dyn Email> {
        Box::new(NoopEmail {
            logger: Arc::clone(&self.logger),
            draft:  EmailDraft::new(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "noop"
    }
}

/// Noop プロバイダが生成するメール
///
/// 送信前検証は他のアダプタと同じく行う。
pub struct NoopEmail {
    logger: Arc<dyn Logger>,
    draft:  EmailDraft,
}

#[async_trait]
impl Email for NoopEmail {
    mailport_domain::forward_email_mutators!(draft);

    async fn send(&mut self) -> Result<(), MailError> {
        self.draft.validate()?;
        let draft = self.draft.take();

        tracing::info!(
            recipients = draft.recipient_count(),
            subject = draft.subject.as_deref().unwrap_or_default(),
            "Noop: メール送信をスキップ"
        );
        self.logger.info(
            "mail",
            format_args!(
                "Noop: 宛先 {} 件のメール送信をスキップしました",
                draft.recipient_count()
            ),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mailport_domain::{Contact, MailErrorKind};
    use mailport_shared::config::MapConfig;

    use super::*;

    fn provider() -> NoopMailProvider {
        NoopMailProvider::new(&Dependencies::with_config(Arc::new(MapConfig::new())))
    }

    #[tokio::test]
    async fn test_送信はエラーを返さない() {
        let mut email = provider().new_email();
        email.set_from(&Contact::new("Alice", "alice@example.com"));
        email.add_to(&Contact::new("Bob", "bob@example.com"));
        email.set_subject("テスト件名");
        email.set_text_body("テスト");

        let result = email.send().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_宛先がない場合はnoopでも検証エラーを返す() {
        let mut email = provider().new_email();
        email.set_from(&Contact::new("Alice", "alice@example.com"));

        let err = email.send().await.unwrap_err();
        assert!(matches!(err.kind(), MailErrorKind::MissingRecipients));
    }

    #[test]
    fn test_プロバイダ名はnoop() {
        assert_eq!(provider().provider_name(), "noop");
    }
}
