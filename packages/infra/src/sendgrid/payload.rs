//! # SendGrid v3 リクエストボディ
//!
//! `POST /v3/mail/send` に送る JSON のモデル。下書き（[`EmailDraft`]）からの変換と、
//! 送信時にのみ行う処理（添付の base64 エンコード、追跡設定、相関ヘッダ）をここに集約する。
//!
//! 空のコレクションと未設定の項目は JSON に含めない。

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use mailport_domain::{Attachment, Contact, ContentPart, EmailDraft, Headers, MailError};
use serde::{Serialize, Serializer};

use super::ENTITY_REF_HEADER;

/// メール送信リクエスト
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendMailRequest {
    pub personalizations:  Vec<Personalization>,
    pub from:              Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to:          Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject:           Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content:           Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments:       Vec<AttachmentPayload>,
    #[serde(skip_serializing_if = "Headers::is_empty", serialize_with = "serialize_headers")]
    pub headers:           Headers,
    pub tracking_settings: TrackingSettings,
}

/// 宛先グループ
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Personalization {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub to:  Vec<Address>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cc:  Vec<Address>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<Address>,
}

/// メールアドレス（表示名は空なら省略）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name:  String,
}

impl From<&Contact> for Address {
    fn from(contact: &Contact) -> Self {
        Self {
            email: contact.email().to_string(),
            name:  contact.name().to_string(),
        }
    }
}

/// 本文パート
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    #[serde(rename = "type")]
    pub content_type: String,
    pub value:        String,
}

impl From<ContentPart> for Content {
    fn from(part: ContentPart) -> Self {
        Self {
            content_type: part.content_type,
            value:        part.value,
        }
    }
}

/// 添付ファイル（内容は base64 エンコード済み）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachmentPayload {
    pub content:      String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub filename:     String,
}

impl From<Attachment> for AttachmentPayload {
    fn from(attachment: Attachment) -> Self {
        Self {
            content:      BASE64.encode(&attachment.content),
            content_type: attachment.content_type,
            filename:     attachment.filename,
        }
    }
}

/// 追跡設定
///
/// クリック・開封・配信停止リンク・Google Analytics の追跡をすべて無効にして送る。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingSettings {
    pub click_tracking:        ClickTracking,
    pub open_tracking:         Toggle,
    pub subscription_tracking: Toggle,
    pub ganalytics:            Toggle,
}

impl TrackingSettings {
    /// すべての追跡を無効にした設定
    pub fn disabled() -> Self {
        Self {
            click_tracking:        ClickTracking {
                enable:      false,
                enable_text: false,
            },
            open_tracking:         Toggle { enable: false },
            subscription_tracking: Toggle { enable: false },
            ganalytics:            Toggle { enable: false },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClickTracking {
    pub enable:      bool,
    pub enable_text: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Toggle {
    pub enable: bool,
}

impl SendMailRequest {
    /// 下書きからリクエストを組み立てる
    ///
    /// `unix_timestamp` は相関ヘッダ（`X-Entity-Ref-ID`）の値として使う。
    /// 送信前検証（[`EmailDraft::validate`]）は呼び出し側で済ませておくこと。
    ///
    /// # Errors
    ///
    /// 送信元がない下書きは `MissingSender` を返す。
    pub fn from_draft(draft: EmailDraft, unix_timestamp: i64) -> Result<Self, MailError> {
        let EmailDraft {
            from,
            to,
            cc,
            bcc,
            reply_to,
            subject,
            mut headers,
            contents,
            attachments,
        } = draft;
        let Some(from) = from else {
            return Err(MailError::missing_sender());
        };

        headers.set(ENTITY_REF_HEADER, unix_timestamp.to_string());

        Ok(Self {
            personalizations: vec![Personalization {
                to:  to.iter().map(Address::from).collect(),
                cc:  cc.iter().map(Address::from).collect(),
                bcc: bcc.iter().map(Address::from).collect(),
            }],
            from: Address::from(&from),
            reply_to: reply_to.as_ref().map(Address::from),
            subject,
            content: contents.into_iter().map(Content::from).collect(),
            attachments: attachments.into_iter().map(AttachmentPayload::from).collect(),
            headers,
            tracking_settings: TrackingSettings::disabled(),
        })
    }
}

/// ヘッダを設定順の JSON オブジェクトとして出力する
fn serialize_headers<S: Serializer>(headers: &Headers, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(headers.iter())
}
