//! # テスト用モックプロバイダ
//!
//! 送信した下書きをメモリに記録するプロバイダ。メール送信を伴う処理のテストで使用する。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! mailport-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use mailport_domain::{Email, EmailDraft, MailError, MailProvider};

// ===== RecordingMailProvider =====

/// 送信内容を記録するプロバイダ
///
/// 生成した `Email` は記録先を共有するため、送信後にプロバイダ側から内容を検証できる。
#[derive(Clone, Default)]
pub struct RecordingMailProvider {
    sent: Arc<Mutex<Vec<EmailDraft>>>,
}

impl RecordingMailProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// 送信に成功した下書きを送信順に取得する
    pub fn sent(&self) -> Vec<EmailDraft> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl MailProvider for RecordingMailProvider {
    fn new_email(&self) -> Box<dyn Email> {
        Box::new(RecordingEmail {
            sent:  Arc::clone(&self.sent),
            draft: EmailDraft::new(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

// ===== RecordingEmail =====

pub struct RecordingEmail {
    sent:  Arc<Mutex<Vec<EmailDraft>>>,
    draft: EmailDraft,
}

#[async_trait]
impl Email for RecordingEmail {
    mailport_domain::forward_email_mutators!(draft);

    async fn send(&mut self) -> Result<(), MailError> {
        self.draft.validate()?;
        let draft = self.draft.take();
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(draft);
        Ok(())
    }
}
