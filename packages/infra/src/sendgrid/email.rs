//! SendGrid 向けの `Email` 実装

use async_trait::async_trait;
use chrono::Utc;
use mailport_domain::{Dependencies, Email, EmailDraft, MailError};

use super::{API_KEY_PATH, client::SendGridClient, payload::SendMailRequest};

/// SendGrid 経由で送信するメール
///
/// [`SendGridProvider::new_email`](super::SendGridProvider) で生成する。
pub struct SendGridEmail {
    deps:   Dependencies,
    client: SendGridClient,
    draft:  EmailDraft,
}

impl SendGridEmail {
    pub(super) fn new(deps: Dependencies, client: SendGridClient) -> Self {
        Self {
            deps,
            client,
            draft: EmailDraft::new(),
        }
    }
}

#[async_trait]
impl Email for SendGridEmail {
    mailport_domain::forward_email_mutators!(draft);

    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(provider = "sendgrid", recipients = tracing::field::Empty)
    )]
    async fn send(&mut self) -> Result<(), MailError> {
        let recipients = self.draft.recipient_count();
        tracing::Span::current().record("recipients", recipients);
        self.draft.validate()?;

        // API キーは構築時ではなく送信のたびに取得する
        let api_key = self.deps.config.get_required_string(API_KEY_PATH)?;

        // ここから先は配信サービスを呼び出すため、下書きを消費する
        let request = SendMailRequest::from_draft(self.draft.take(), Utc::now().timestamp())?;

        self.client
            .send(&api_key, &request)
            .await
            .map_err(MailError::delivery)?;

        self.deps.logger.info(
            "mail",
            format_args!("SendGrid でメールを送信しました（宛先 {recipients} 件）"),
        );
        Ok(())
    }
}
