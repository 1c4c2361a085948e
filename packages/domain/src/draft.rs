//! # メール下書き
//!
//! [`Email`](crate::Email) の変更操作が積み上げる状態。すべてのアダプタが
//! この型を保持することで、上書き・追記の規則を揃える。
//!
//! | 要素 | 規則 |
//! |------|------|
//! | 送信元 / 返信先 / 件名 | 後勝ちで上書き |
//! | To / CC / BCC | 呼び出し順に追記（重複排除なし） |
//! | ヘッダ | 同一キーは値のみ上書き、位置は最初の設定時のまま |
//! | 本文パート / 添付 | 呼び出し順に追記 |

use crate::{contact::Contact, error::MailError};

/// 本文パート（MIME タイプ付き）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPart {
    /// MIME タイプ（`text/plain` など）
    pub content_type: String,
    /// 本文
    pub value:        String,
}

impl ContentPart {
    /// プレーンテキストの MIME タイプ
    pub const TEXT_PLAIN: &'static str = "text/plain";
    /// HTML の MIME タイプ
    pub const TEXT_HTML: &'static str = "text/html";

    /// プレーンテキストのパートを作成する
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            content_type: Self::TEXT_PLAIN.to_string(),
            value:        value.into(),
        }
    }

    /// HTML のパートを作成する
    pub fn html(value: impl Into<String>) -> Self {
        Self {
            content_type: Self::TEXT_HTML.to_string(),
            value:        value.into(),
        }
    }
}

/// 添付ファイル
///
/// 内容は生のバイト列で保持し、エンコードは送信時にアダプタが行う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// ファイル名
    pub filename:     String,
    /// MIME タイプ
    pub content_type: String,
    /// 内容
    pub content:      Vec<u8>,
}

/// 順序付きのカスタムヘッダ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    /// ヘッダを設定する
    ///
    /// キーの比較は文字列の完全一致。大文字小文字の扱いは配信サービスに委ねる。
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((key, value)),
        }
    }

    /// キーに対応する値を取得する
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 設定順に走査する
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 送信前のメール状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailDraft {
    pub from:        Option<Contact>,
    pub to:          Vec<Contact>,
    pub cc:          Vec<Contact>,
    pub bcc:         Vec<Contact>,
    pub reply_to:    Option<Contact>,
    pub subject:     Option<String>,
    pub headers:     Headers,
    pub contents:    Vec<ContentPart>,
    pub attachments: Vec<Attachment>,
}

impl EmailDraft {
    /// 空の下書きを作成する
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_from(&mut self, contact: &Contact) {
        self.from = Some(contact.clone());
    }

    pub fn add_to(&mut self, contact: &Contact) {
        self.to.push(contact.clone());
    }

    pub fn add_cc(&mut self, contact: &Contact) {
        self.cc.push(contact.clone());
    }

    pub fn add_bcc(&mut self, contact: &Contact) {
        self.bcc.push(contact.clone());
    }

    pub fn set_reply_to(&mut self, contact: &Contact) {
        self.reply_to = Some(contact.clone());
    }

    pub fn set_subject(&mut self, subject: &str) {
        self.subject = Some(subject.to_string());
    }

    pub fn set_header(&mut self, key: &str, value: &str) {
        self.headers.set(key, value);
    }

    /// プレーンテキストのパートを追加する（既存のパートは残る）
    pub fn set_text_body(&mut self, body: &str) {
        self.contents.push(ContentPart::text(body));
    }

    /// HTML のパートを追加する（既存のパートは残る）
    pub fn set_html_body(&mut self, body: &str) {
        self.contents.push(ContentPart::html(body));
    }

    pub fn add_attachment(&mut self, filename: &str, content_type: &str, content: Vec<u8>) {
        self.attachments.push(Attachment {
            filename:     filename.to_string(),
            content_type: content_type.to_string(),
            content,
        });
    }

    /// 宛先（To / CC / BCC）の合計件数
    pub fn recipient_count(&self) -> usize {
        self.to.len() + self.cc.len() + self.bcc.len()
    }

    /// 送信前検証を行う
    ///
    /// # Errors
    ///
    /// - 送信元がない場合は `MissingSender`（宛先より先に判定する）
    /// - 宛先が 1 件もない場合は `MissingRecipients`
    pub fn validate(&self) -> Result<(), MailError> {
        if self.from.is_none() {
            return Err(MailError::missing_sender());
        }
        if self.recipient_count() == 0 {
            return Err(MailError::missing_recipients());
        }
        Ok(())
    }

    /// 状態を取り出し、空の下書きを残す
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::MailErrorKind;

    fn alice() -> Contact {
        Contact::new("Alice", "alice@example.com")
    }

    // ===== Headers テスト =====

    #[test]
    fn test_同じキーのヘッダは後勝ちで1件になる() {
        let mut headers = Headers::default();

        headers.set("X-Test", "a");
        headers.set("X-Test", "b");

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("X-Test"), Some("b"));
    }

    #[test]
    fn test_上書きしても最初の設定位置を保つ() {
        let mut headers = Headers::default();

        headers.set("X-First", "1");
        headers.set("X-Second", "2");
        headers.set("X-First", "3");

        let entries: Vec<_> = headers.iter().collect();
        assert_eq!(entries, vec![("X-First", "3"), ("X-Second", "2")]);
    }

    #[test]
    fn test_キーの大文字小文字は区別される() {
        let mut headers = Headers::default();

        headers.set("X-Test", "a");
        headers.set("x-test", "b");

        assert_eq!(headers.len(), 2);
    }

    // ===== 変更操作テスト =====

    #[test]
    fn test_送信元と件名は後勝ちで上書きされる() {
        let mut draft = EmailDraft::new();

        draft.set_from(&alice());
        draft.set_from(&Contact::new("Carol", "carol@example.com"));
        draft.set_subject("A");
        draft.set_subject("B");

        assert_eq!(draft.from.as_ref().map(Contact::email), Some("carol@example.com"));
        assert_eq!(draft.subject.as_deref(), Some("B"));
    }

    #[test]
    fn test_宛先は種別ごとに呼び出し順で重複も保持する() {
        let bob = Contact::new("Bob", "bob@example.com");
        let carol = Contact::new("Carol", "carol@example.com");
        let mut draft = EmailDraft::new();

        draft.add_to(&bob);
        draft.add_cc(&carol);
        draft.add_to(&carol);
        draft.add_to(&bob);
        draft.add_bcc(&alice());

        assert_eq!(draft.to, vec![bob.clone(), carol.clone(), bob]);
        assert_eq!(draft.cc, vec![carol]);
        assert_eq!(draft.bcc, vec![alice()]);
        assert_eq!(draft.recipient_count(), 5);
    }

    #[test]
    fn test_本文は呼び出すたびにパートが増える() {
        let mut draft = EmailDraft::new();

        draft.set_text_body("one");
        draft.set_html_body("<p>two</p>");
        draft.set_text_body("three");

        assert_eq!(
            draft.contents,
            vec![
                ContentPart::text("one"),
                ContentPart::html("<p>two</p>"),
                ContentPart::text("three"),
            ]
        );
    }

    #[test]
    fn test_添付はバイト列のまま保持される() {
        let mut draft = EmailDraft::new();

        draft.add_attachment("f.txt", "text/plain", b"hello".to_vec());

        assert_eq!(
            draft.attachments,
            vec![Attachment {
                filename:     "f.txt".to_string(),
                content_type: "text/plain".to_string(),
                content:      b"hello".to_vec(),
            }]
        );
    }

    // ===== validate テスト =====

    #[test]
    fn test_送信元がない場合はmissing_senderを返す() {
        let draft = EmailDraft::new();

        let err = draft.validate().unwrap_err();

        assert!(matches!(err.kind(), MailErrorKind::MissingSender));
    }

    #[test]
    fn test_送信元と宛先が両方ない場合は送信元を先に判定する() {
        let mut draft = EmailDraft::new();
        draft.subject = Some("件名".to_string());

        let err = draft.validate().unwrap_err();

        assert!(matches!(err.kind(), MailErrorKind::MissingSender));
    }

    #[test]
    fn test_宛先がない場合はmissing_recipientsを返す() {
        let draft = EmailDraft {
            from: Some(alice()),
            ..EmailDraft::default()
        };

        let err = draft.validate().unwrap_err();

        assert!(matches!(err.kind(), MailErrorKind::MissingRecipients));
    }

    #[test]
    fn test_bccのみでも宛先ありとみなす() {
        let draft = EmailDraft {
            from: Some(alice()),
            bcc: vec![Contact::new("", "audit@example.com")],
            ..EmailDraft::default()
        };

        assert!(draft.validate().is_ok());
    }

    // ===== take テスト =====

    #[test]
    fn test_takeは状態を取り出して空にする() {
        let mut draft = EmailDraft {
            from: Some(alice()),
            to: vec![Contact::new("Bob", "bob@example.com")],
            ..EmailDraft::default()
        };

        let taken = draft.take();

        assert_eq!(taken.recipient_count(), 1);
        assert_eq!(draft, EmailDraft::default());
    }

    #[test]
    fn test_content_partのコンストラクタがmimeタイプを設定する() {
        assert_eq!(ContentPart::text("Hello").content_type, "text/plain");
        assert_eq!(ContentPart::html("<p>Hello</p>").content_type, "text/html");
    }
}
