//! # 連絡先
//!
//! 表示名とメールアドレスの組。送信元・宛先・返信先のすべてに使う。

/// 連絡先（表示名 + メールアドレス）
///
/// 生成後は不変。メールアドレスの書式検証はこの層では行わない
/// （配信サービス側に委ねる）。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Contact {
    name:  String,
    email: String,
}

impl Contact {
    /// 連絡先を作成する
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name:  name.into(),
            email: email.into(),
        }
    }

    /// 表示名を取得する
    pub fn name(&self) -> &str {
        &self.name
    }

    /// メールアドレスを取得する
    pub fn email(&self) -> &str {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_newで渡した値がそのまま取得できる() {
        let contact = Contact::new("Alice", "alice@example.com");

        assert_eq!(contact.name(), "Alice");
        assert_eq!(contact.email(), "alice@example.com");
    }

    #[test]
    fn test_書式が不正なアドレスも正規化せず保持する() {
        let contact = Contact::new("", "  Not An Address ");

        assert_eq!(contact.name(), "");
        assert_eq!(contact.email(), "  Not An Address ");
    }
}
