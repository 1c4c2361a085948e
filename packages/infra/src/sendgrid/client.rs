//! SendGrid v3 API の HTTP クライアント

use reqwest::Client;

use super::{SEND_PATH, error::SendGridError, payload::SendMailRequest};

/// SendGrid API クライアント
///
/// `reqwest::Client` をラップする。クローンは内部のコネクションプールを共有する。
#[derive(Debug, Clone)]
pub struct SendGridClient {
    client:   Client,
    base_url: String,
}

impl SendGridClient {
    /// 新しいクライアントを作成する
    ///
    /// # 引数
    ///
    /// - `base_url`: API のベース URL（例: `https://api.sendgrid.com`）。末尾の `/` は無視する
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client:   Client::new(),
            base_url: base_url.into(),
        }
    }

    /// ベース URL を取得する
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}{SEND_PATH}", self.base_url.trim_end_matches('/'))
    }

    /// メール送信リクエストを 1 回だけ送る
    ///
    /// 2xx を成功とみなす。それ以外はレスポンスボディを添えて `Rejected` を返す。
    /// ボディを読み切れなかった場合は `Transport` を返す。
    pub async fn send(&self, api_key: &str, request: &SendMailRequest) -> Result<(), SendGridError> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(SendGridError::Transport)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.map_err(SendGridError::Transport)?;
        Err(SendGridError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
