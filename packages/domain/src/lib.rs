//! # Mailport ドメイン層
//!
//! トランザクションメールの構築と送信を表す、プロバイダ非依存の抽象を定義する。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: [`Email`] が送信 1 通分の組み立てと送信を、
//!   [`MailProvider`] が資格情報に紐づいた `Email` の生成を担う
//! - **ベンダーごとに 1 実装**: 新しい配信サービスは既存コードを変更せず、
//!   トレイトを実装するだけで追加できる（具体実装は `mailport-infra`）
//! - **共通の下書き**: 追加・上書きの規則は [`EmailDraft`] に集約し、
//!   アダプタ間で挙動を揃える
//!
//! ## 依存関係
//!
//! ```text
//! infra → domain → shared
//! ```
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use mailport_domain::{Contact, MailProvider};
//!
//! async fn notify(provider: &dyn MailProvider) -> Result<(), mailport_domain::MailError> {
//!     let mut email = provider.new_email();
//!     email.set_from(&Contact::new("Alice", "alice@example.com"));
//!     email.add_to(&Contact::new("Bob", "bob@example.com"));
//!     email.set_subject("Hi");
//!     email.set_text_body("Hello");
//!     email.send().await
//! }
//! ```

#[macro_use]
mod macros;

pub mod contact;
pub mod dependencies;
pub mod draft;
pub mod email;
pub mod error;

pub use contact::Contact;
pub use dependencies::Dependencies;
pub use draft::{Attachment, ContentPart, EmailDraft, Headers};
pub use email::{Email, MailProvider};
pub use error::{MailError, MailErrorKind};
