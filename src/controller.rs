//! セッションコントローラー
//!
//! 唯一の `Session` を所有し、描画層からの4操作
//! （撮影・削除・解析開始・やり直し）だけを受け付ける。
//! 推論呼び出しの間はロックを離し、完了時に世代番号で照合してから反映する。

use crate::gateway::InferenceGateway;
use reizo_dad_common::{AnalysisResult, ImagePayload, Phase, Session};
use std::sync::Arc;
use tokio::sync::Mutex;

/// `start_analysis` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// 画像なし、または解析中のため何もしなかった
    Skipped,
    /// 結果を反映した（`Result` か `Error`）
    Completed(Phase),
    /// 途中でリセットされたため結果を捨てた
    Discarded,
}

/// 描画層に渡す読み取り専用のスナップショット
#[derive(Debug, Clone, Default)]
pub struct SessionView {
    pub phase: Phase,
    pub captured_images: Vec<ImagePayload>,
    pub last_result: Option<AnalysisResult>,
    pub last_error: Option<String>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            phase: session.phase(),
            captured_images: session.captured_images().to_vec(),
            last_result: session.last_result().cloned(),
            last_error: session.last_error().map(str::to_string),
        }
    }
}

#[derive(Clone)]
pub struct SessionController {
    session: Arc<Mutex<Session>>,
    gateway: Arc<dyn InferenceGateway>,
}

impl SessionController {
    pub fn new(gateway: Arc<dyn InferenceGateway>) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new())),
            gateway,
        }
    }

    pub async fn snapshot(&self) -> SessionView {
        SessionView::from(&*self.session.lock().await)
    }

    pub async fn phase(&self) -> Phase {
        self.session.lock().await.phase()
    }

    pub async fn capture_image(&self, payload: ImagePayload) -> bool {
        let added = self.session.lock().await.capture_image(payload);
        if !added {
            tracing::debug!("画像の追加を無視しました");
        }
        added
    }

    pub async fn remove_image(&self, index: usize) -> bool {
        let removed = self.session.lock().await.remove_image(index).is_some();
        if !removed {
            tracing::debug!(index, "画像の削除を無視しました");
        }
        removed
    }

    /// 解析を実行
    ///
    /// 同時に複数回呼ばれても推論リクエストは1本だけ発行される。
    pub async fn start_analysis(&self) -> AnalysisOutcome {
        let ticket = match self.session.lock().await.begin_analysis() {
            Some(ticket) => ticket,
            None => return AnalysisOutcome::Skipped,
        };

        tracing::info!(
            generation = ticket.generation,
            images = ticket.images.len(),
            "解析開始"
        );

        let outcome = self.gateway.analyze(&ticket.images).await;
        if let Err(e) = &outcome {
            tracing::error!(generation = ticket.generation, error = %e, "解析失敗");
        }

        let mut session = self.session.lock().await;
        if session.complete_analysis(ticket.generation, outcome) {
            AnalysisOutcome::Completed(session.phase())
        } else {
            tracing::warn!(generation = ticket.generation, "リセット済みのため解析結果を破棄");
            AnalysisOutcome::Discarded
        }
    }

    pub async fn reset(&self) {
        self.session.lock().await.reset();
    }
}
