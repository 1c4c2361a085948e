/// `Email` の変更操作を `EmailDraft` 型のフィールドへ委譲する宣言型マクロ
///
/// アダプタの `impl Email for ...` ブロック内で展開し、
/// `send` 以外の 10 メソッドを一括生成する。
///
/// # 使用例
///
/// ```rust,ignore
/// #[async_trait]
/// impl Email for SendGridEmail {
///     mailport_domain::forward_email_mutators!(draft);
///
///     async fn send(&mut self) -> Result<(), MailError> { /* ... */ }
/// }
/// ```
#[macro_export]
macro_rules! forward_email_mutators {
    ($draft:ident) => {
        fn set_from(&mut self, contact: &$crate::Contact) {
            self.$draft.set_from(contact);
        }

        fn add_to(&mut self, contact: &$crate::Contact) {
            self.$draft.add_to(contact);
        }

        fn add_cc(&mut self, contact: &$crate::Contact) {
            self.$draft.add_cc(contact);
        }

        fn add_bcc(&mut self, contact: &$crate::Contact) {
            self.$draft.add_bcc(contact);
        }

        fn set_reply_to(&mut self, contact: &$crate::Contact) {
            self.$draft.set_reply_to(contact);
        }

        fn set_subject(&mut self, subject: &str) {
            self.$draft.set_subject(subject);
        }

        fn set_header(&mut self, key: &str, value: &str) {
            self.$draft.set_header(key, value);
        }

        fn set_text_body(&mut self, body: &str) {
            self.$draft.set_text_body(body);
        }

        fn set_html_body(&mut self, body: &str) {
            self.$draft.set_html_body(body);
        }

        fn add_attachment(&mut self, filename: &str, content_type: &str, content: Vec<u8>) {
            self.$draft.add_attachment(filename, content_type, content);
        }
    };
}
