//! # メール送信の抽象
//!
//! 配信サービスごとのアダプタが実装するトレイトを定義する。
//!
//! ## ライフサイクル
//!
//! ```text
//! MailProvider（起動時に 1 度構築、以後不変）
//!     │ new_email()
//!     ▼
//! Email（空の状態）── set_* / add_* ──▶ send() ──▶ 送信済み or 配信失敗（終端）
//!                          ▲                 │
//!                          └─────────────────┘ 検証エラー / 設定エラー（状態は残る）
//! ```
//!
//! `Email` は 1 通ごとの使い捨て。変更操作は `&mut self` を取るため、
//! 送信までの所有者は常に 1 つに限られる。

use async_trait::async_trait;

use crate::{contact::Contact, error::MailError};

/// 送信 1 通分のメール
///
/// 変更操作は `send` までの間、任意の順序・回数で呼び出せる。
#[async_trait]
pub trait Email: Send {
    /// 送信元を設定する（後勝ち）
    fn set_from(&mut self, contact: &Contact);

    /// To 宛先を追加する
    fn add_to(&mut self, contact: &Contact);

    /// CC 宛先を追加する
    fn add_cc(&mut self, contact: &Contact);

    /// BCC 宛先を追加する
    fn add_bcc(&mut self, contact: &Contact);

    /// 返信先を設定する（後勝ち、省略可）
    fn set_reply_to(&mut self, contact: &Contact);

    /// 件名を設定する（後勝ち）
    fn set_subject(&mut self, subject: &str);

    /// カスタムヘッダを設定する。同じキーは値を上書きする
    fn set_header(&mut self, key: &str, value: &str);

    /// プレーンテキストの本文パートを追加する
    ///
    /// 複数回呼び出すと同じ MIME タイプのパートが複数になる。
    fn set_text_body(&mut self, body: &str);

    /// HTML の本文パートを追加する
    ///
    /// 複数回呼び出すと同じ MIME タイプのパートが複数になる。
    fn set_html_body(&mut self, body: &str);

    /// 添付ファイルを追加する。エンコードは送信時に行う
    fn add_attachment(&mut self, filename: &str, content_type: &str, content: Vec<u8>);

    /// メールを送信する
    ///
    /// 送信前検証 → 資格情報の参照 → リクエスト組み立て → 配信サービスへの 1 回の呼び出し、
    /// の順に処理する。リトライは行わない。
    ///
    /// 送信前検証と資格情報の参照に失敗した場合、蓄積した状態はそのまま残る。
    /// 呼び出し側は不足分を補って再度 `send` できる。
    ///
    /// 配信サービスを呼び出した時点で状態は消費される（成否を問わない）。
    /// その後同じインスタンスで `send` すると空の状態として扱われ、`MissingSender` を返す。
    ///
    /// # Errors
    ///
    /// - 送信元がない場合は `MissingSender`（通信は発生しない）
    /// - 宛先がない場合は `MissingRecipients`（通信は発生しない）
    /// - 資格情報が取得できない場合は `Configuration`
    /// - 配信サービスが失敗を返した場合は `Delivery`
    async fn send(&mut self) -> Result<(), MailError>;
}

/// `Email` を生成するファクトリ
///
/// 1 つの配信サービスの資格情報に紐づく。構築後は不変で、
/// 複数タスクから同時に `new_email` を呼び出せる。
pub trait MailProvider: Send + Sync {
    /// 空の `Email` を生成する
    fn new_email(&self) -> Box<dyn Email>;

    /// プロバイダ名を取得する（ログ出力用）
    fn provider_name(&self) -> &'static str;
}
