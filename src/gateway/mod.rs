//! 推論ゲートウェイ
//!
//! 画像列を受け取り、構造化されたレシピ提案を返す外部サービスの境界。
//! 失敗の種類はここでは `ReizoDadError` として区別されるが、
//! セッション側では1つの失敗として扱われる。

mod gemini;

pub use gemini::GeminiGateway;

use crate::error::Result;
use async_trait::async_trait;
use reizo_dad_common::{AnalysisResult, ImagePayload};

#[async_trait]
pub trait InferenceGateway: Send + Sync {
    /// 画像を撮影順に送り、解析結果を1往復で受け取る
    async fn analyze(&self, images: &[ImagePayload]) -> Result<AnalysisResult>;
}
