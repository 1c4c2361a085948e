//! # エラー記録とパニックガード
//!
//! 予期しないエラーを記録する [`ErrorHandler`] と、並行に起動した処理単位の
//! 入口に置くガード（[`guard`] / [`spawn_guarded`]）を提供する。
//!
//! ## 設計方針
//!
//! - **最後の砦**: ガードはパニックを構造化エラー（[`PanicError`]）に変換し、
//!   `ErrorHandler` へ渡す。処理が返した `Result` には一切手を加えない
//! - **呼び出し経路の記録**: 既定実装は `tracing_error::SpanTrace` を添えて出力する
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mailport_shared::error_handler::{spawn_guarded, ErrorHandler, TracingErrorHandler};
//!
//! let handler: Arc<dyn ErrorHandler> = Arc::new(TracingErrorHandler);
//! let handle = spawn_guarded(handler, async move { email.send().await });
//! // パニック時は None、それ以外は send の Result がそのまま返る
//! let result = handle.await?;
//! ```

use std::{
    any::Any,
    error::Error,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use futures::FutureExt as _;
use tokio::task::JoinHandle;
use tracing_error::SpanTrace;

/// エラーの記録先
pub trait ErrorHandler: Send + Sync {
    /// エラーを記録する
    fn error(&self, err: &(dyn Error + 'static));
}

/// `tracing::error!` でエラーを出力するハンドラ
///
/// エラーの `source` チェーンと、記録時点の SpanTrace を併せて出力する。
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorHandler;

impl ErrorHandler for TracingErrorHandler {
    fn error(&self, err: &(dyn Error + 'static)) {
        let span_trace = SpanTrace::capture();
        tracing::error!(
            error = %err,
            chain = %error_chain(err),
            span_trace = %span_trace,
            "予期しないエラーを記録しました"
        );
    }
}

/// `source` チェーンを ": " 区切りで連結する
fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut chain = err.to_string();
    let mut current = err.source();
    while let Some(source) = current {
        chain.push_str(": ");
        chain.push_str(&source.to_string());
        current = source.source();
    }
    chain
}

/// パニックから変換されたエラー
#[derive(Debug, thiserror::Error)]
#[error("パニックが発生しました: {message}")]
pub struct PanicError {
    message: String,
}

impl PanicError {
    /// パニックペイロードからエラーを生成する
    ///
    /// `panic!` が生成する `&str` / `String` 以外のペイロードは固定メッセージになる。
    pub fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => (*message).to_string(),
                Err(_) => "不明なパニックペイロード".to_string(),
            },
        };
        Self { message }
    }

    /// パニックメッセージを取得する
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// クロージャをパニックガード下で実行する
///
/// パニックした場合は [`PanicError`] を `handler` に渡して `None` を返す。
pub fn guard<T>(handler: &dyn ErrorHandler, f: impl FnOnce() -> T) -> Option<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Some(value),
        Err(payload) => {
            handler.error(&PanicError::from_payload(payload));
            None
        }
    }
}

/// 非同期の処理単位をパニックガード付きで起動する
///
/// 処理がパニックした場合はエラーを `handler` に渡し、ハンドルは `None` で完了する。
/// 正常終了時は処理の出力を `Some` で返す。
///
/// 処理は返したハンドルのタスク内で直接実行されるため、`abort` すると処理自体も止まる。
pub fn spawn_guarded<F>(handler: Arc<dyn ErrorHandler>, future: F) -> JoinHandle<Option<F::Output>>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(async move {
        match AssertUnwindSafe(future).catch_unwind().await {
            Ok(output) => Some(output),
            Err(payload) => {
                handler.error(&PanicError::from_payload(payload));
                None
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Mutex,
            atomic::{AtomicBool, Ordering},
        },
        time::Duration,
    };

    use pretty_assertions::assert_eq;

    use super::*;

    /// 受け取ったエラーのメッセージを保持するテスト用ハンドラ
    #[derive(Default)]
    struct RecordingHandler {
        errors: Mutex<Vec<String>>,
    }

    impl ErrorHandler for RecordingHandler {
        fn error(&self, err: &(dyn Error + 'static)) {
            self.errors.lock().unwrap().push(err.to_string());
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("外側")]
    struct Outer(#[source] Inner);

    #[derive(Debug, thiserror::Error)]
    #[error("内側")]
    struct Inner;

    // ===== guard テスト =====

    #[test]
    fn test_guardは正常終了時に戻り値を返す() {
        let handler = RecordingHandler::default();

        let result = guard(&handler, || 40 + 2);

        assert_eq!(result, Some(42));
        assert!(handler.errors.lock().unwrap().is_empty());
    }

    #[test]
    fn test_guardはパニックをエラーに変換してハンドラに渡す() {
        let handler = RecordingHandler::default();

        let should_panic = true;

        let result = guard(&handler, || {
            if should_panic {
                panic!("送信処理で異常");
            }
        });

        assert_eq!(result, None);
        assert_eq!(
            *handler.errors.lock().unwrap(),
            vec!["パニックが発生しました: 送信処理で異常"]
        );
    }

    #[test]
    fn test_guardはresultのエラーを変更しない() {
        let handler = RecordingHandler::default();

        let result: Option<Result<(), String>> = guard(&handler, || Err("送信失敗".to_string()));

        assert_eq!(result, Some(Err("送信失敗".to_string())));
        assert!(handler.errors.lock().unwrap().is_empty());
    }

    // ===== PanicError テスト =====

    #[test]
    fn test_from_payloadは文字列以外のペイロードで固定メッセージになる() {
        let err = PanicError::from_payload(Box::new(42_u32));
        assert_eq!(err.message(), "不明なパニックペイロード");
    }

    #[test]
    fn test_from_payloadはstring型のペイロードを取り出す() {
        let err = PanicError::from_payload(Box::new("フォーマット済み 1".to_string()));
        assert_eq!(err.message(), "フォーマット済み 1");
    }

    // ===== spawn_guarded テスト =====

    #[tokio::test]
    async fn test_spawn_guardedは正常終了時に出力を返す() {
        let recording = Arc::new(RecordingHandler::default());
        let handler: Arc<dyn ErrorHandler> = recording.clone();

        let output = spawn_guarded(handler, async { "完了" }).await.unwrap();

        assert_eq!(output, Some("完了"));
        assert!(recording.errors.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_spawn_guardedはタスクのパニックをハンドラに渡す() {
        let recording = Arc::new(RecordingHandler::default());
        let handler: Arc<dyn ErrorHandler> = recording.clone();

        let should_panic = true;

        let output = spawn_guarded(handler, async move {
            if should_panic {
                panic!("タスク内で異常");
            }
        })
        .await
        .unwrap();

        assert_eq!(output, None);
        assert_eq!(
            *recording.errors.lock().unwrap(),
            vec!["パニックが発生しました: タスク内で異常"]
        );
    }

    #[tokio::test]
    async fn test_spawn_guardedのハンドルをabortすると処理も止まる() {
        let recording = Arc::new(RecordingHandler::default());
        let handler: Arc<dyn ErrorHandler> = recording.clone();
        let finished = Arc::new(AtomicBool::new(false));

        let handle = spawn_guarded(handler, {
            let finished = Arc::clone(&finished);
            async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                finished.store(true, Ordering::SeqCst);
            }
        });
        handle.abort();

        assert!(handle.await.unwrap_err().is_cancelled());
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!finished.load(Ordering::SeqCst));
        assert!(recording.errors.lock().unwrap().is_empty());
    }

    // ===== TracingErrorHandler テスト =====

    #[test]
    fn test_error_chainはsourceを連結する() {
        let err = Outer(Inner);
        assert_eq!(error_chain(&err), "外側: 内側");
    }

    #[test]
    fn test_tracing_error_handlerはsubscriberなしでもパニックしない() {
        TracingErrorHandler.error(&Outer(Inner));
    }
}
