//! セッション状態機械
//!
//! 画面遷移 `Idle → Analyzing → {Result, Error}` と、各状態から `Idle` への
//! リセットを管理する。I/Oも非同期処理も持たない純粋な状態遷移で、
//! 推論の呼び出しはチケット（世代番号 + 画像スナップショット）を介して
//! 呼び出し側に委ねる。
//!
//! 世代番号は解析開始とリセットのたびに進む。完了時に世代が一致しない
//! レスポンスは捨てられる。

use crate::image::ImagePayload;
use crate::prompts::ANALYSIS_ERROR_MESSAGE;
use crate::types::AnalysisResult;
use serde::Serialize;

/// 画面フェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Phase {
    #[default]
    Idle,
    Analyzing,
    Result,
    Error,
}

/// 解析1回分の依頼内容
///
/// `images` は開始時点のスナップショット。以後セッション側で画像が
/// 変わっても影響しない。
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    pub generation: u64,
    pub images: Vec<ImagePayload>,
}

/// セッション
#[derive(Debug, Clone, Default)]
pub struct Session {
    phase: Phase,
    captured_images: Vec<ImagePayload>,
    last_result: Option<AnalysisResult>,
    last_error: Option<String>,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn captured_images(&self) -> &[ImagePayload] {
        &self.captured_images
    }

    /// `Result` フェーズのときだけ Some
    pub fn last_result(&self) -> Option<&AnalysisResult> {
        match self.phase {
            Phase::Result => self.last_result.as_ref(),
            _ => None,
        }
    }

    /// `Error` フェーズのときだけ Some
    pub fn last_error(&self) -> Option<&str> {
        match self.phase {
            Phase::Error => self.last_error.as_deref(),
            _ => None,
        }
    }

    /// 画像を末尾に追加
    ///
    /// `Idle` 以外、または空のペイロードは無視して false を返す。
    pub fn capture_image(&mut self, payload: ImagePayload) -> bool {
        if self.phase != Phase::Idle || payload.is_empty() {
            return false;
        }
        self.captured_images.push(payload);
        true
    }

    /// 指定位置の画像を削除
    ///
    /// 範囲外のインデックスや `Idle` 以外では何もせず None。
    pub fn remove_image(&mut self, index: usize) -> Option<ImagePayload> {
        if self.phase != Phase::Idle || index >= self.captured_images.len() {
            return None;
        }
        Some(self.captured_images.remove(index))
    }

    /// 解析を開始
    ///
    /// `Idle` かつ画像が1枚以上あるときだけチケットを返す。
    /// それ以外（解析中の二重起動を含む）は None。
    pub fn begin_analysis(&mut self) -> Option<AnalysisTicket> {
        if self.phase != Phase::Idle || self.captured_images.is_empty() {
            return None;
        }

        self.last_error = None;
        self.phase = Phase::Analyzing;
        self.generation += 1;

        Some(AnalysisTicket {
            generation: self.generation,
            images: self.captured_images.clone(),
        })
    }

    /// 推論結果を反映
    ///
    /// `Analyzing` 中かつ世代が一致するときだけ反映して true を返す。
    /// 失敗の中身は保持せず、固定メッセージに置き換える。
    pub fn complete_analysis<E>(
        &mut self,
        generation: u64,
        outcome: std::result::Result<AnalysisResult, E>,
    ) -> bool {
        if self.phase != Phase::Analyzing || generation != self.generation {
            return false;
        }

        match outcome {
            Ok(result) => {
                self.last_result = Some(result);
                self.last_error = None;
                self.phase = Phase::Result;
            }
            Err(_) => {
                self.last_result = None;
                self.last_error = Some(ANALYSIS_ERROR_MESSAGE.to_string());
                self.phase = Phase::Error;
            }
        }
        true
    }

    /// 初期状態に戻す
    ///
    /// 世代を進めるので、解析中だったチケットの結果は以後反映されない。
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.captured_images.clear();
        self.last_result = None;
        self.last_error = None;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Difficulty, Ingredient, Recipe};

    fn img(data: &str) -> ImagePayload {
        ImagePayload::new("image/jpeg", data)
    }

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            detected_ingredients: vec!["卵".to_string(), "ねぎ".to_string()],
            recipes: vec![Recipe {
                title: "ねぎ玉".to_string(),
                description: "すぐできる".to_string(),
                cooking_time: "10分".to_string(),
                difficulty: Difficulty::Easy,
                ingredients: vec![Ingredient {
                    name: "卵".to_string(),
                    amount: "2個".to_string(),
                }],
                steps: vec!["焼く".to_string()],
                dad_tips: "強火で一気にだ".to_string(),
            }],
        }
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.captured_images().is_empty());
        assert!(session.last_result().is_none());
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_capture_preserves_order_and_duplicates() {
        let mut session = Session::new();
        assert!(session.capture_image(img("x")));
        assert!(session.capture_image(img("y")));
        assert!(session.capture_image(img("x")));
        assert_eq!(session.captured_images(), &[img("x"), img("y"), img("x")]);
    }

    #[test]
    fn test_capture_empty_payload_is_noop() {
        let mut session = Session::new();
        assert!(!session.capture_image(img("")));
        assert!(session.captured_images().is_empty());
    }

    #[test]
    fn test_remove_image() {
        let mut session = Session::new();
        session.capture_image(img("x"));
        session.capture_image(img("y"));
        assert_eq!(session.remove_image(0), Some(img("x")));
        assert_eq!(session.captured_images(), &[img("y")]);
    }

    #[test]
    fn test_remove_image_out_of_range_is_noop() {
        let mut session = Session::new();
        session.capture_image(img("x"));
        assert_eq!(session.remove_image(5), None);
        assert_eq!(session.captured_images(), &[img("x")]);
    }

    #[test]
    fn test_begin_analysis_without_images_is_noop() {
        let mut session = Session::new();
        assert!(session.begin_analysis().is_none());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_begin_analysis_twice_returns_one_ticket() {
        let mut session = Session::new();
        session.capture_image(img("x"));
        assert!(session.begin_analysis().is_some());
        assert!(session.begin_analysis().is_none());
        assert_eq!(session.phase(), Phase::Analyzing);
    }

    #[test]
    fn test_ticket_is_a_snapshot() {
        let mut session = Session::new();
        session.capture_image(img("x"));
        let ticket = session.begin_analysis().unwrap();

        // 解析中は画像を変更できない
        assert!(!session.capture_image(img("y")));
        assert!(session.remove_image(0).is_none());
        assert_eq!(ticket.images, vec![img("x")]);
    }

    #[test]
    fn test_success_transitions_to_result() {
        let mut session = Session::new();
        session.capture_image(img("x"));
        let ticket = session.begin_analysis().unwrap();

        let applied = session.complete_analysis::<()>(ticket.generation, Ok(sample_result()));
        assert!(applied);
        assert_eq!(session.phase(), Phase::Result);
        assert_eq!(session.last_result(), Some(&sample_result()));
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_failure_transitions_to_error_with_fixed_message() {
        let mut session = Session::new();
        session.capture_image(img("x"));
        let ticket = session.begin_analysis().unwrap();

        let applied = session.complete_analysis(ticket.generation, Err("HTTP 500: internal"));
        assert!(applied);
        assert_eq!(session.phase(), Phase::Error);
        let message = session.last_error().unwrap();
        assert_eq!(message, ANALYSIS_ERROR_MESSAGE);
        assert!(!message.contains("500"));
        assert!(session.last_result().is_none());
    }

    #[test]
    fn test_reset_from_result() {
        let mut session = Session::new();
        session.capture_image(img("x"));
        let ticket = session.begin_analysis().unwrap();
        session.complete_analysis::<()>(ticket.generation, Ok(sample_result()));

        session.reset();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.captured_images().is_empty());
        assert!(session.last_result().is_none());
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_stale_response_after_reset_is_discarded() {
        let mut session = Session::new();
        session.capture_image(img("x"));
        let ticket = session.begin_analysis().unwrap();

        session.reset();
        let applied = session.complete_analysis::<()>(ticket.generation, Ok(sample_result()));
        assert!(!applied);
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.last_result().is_none());
    }

    #[test]
    fn test_stale_response_does_not_clobber_newer_analysis() {
        let mut session = Session::new();
        session.capture_image(img("old"));
        let old = session.begin_analysis().unwrap();
        session.reset();

        session.capture_image(img("new"));
        let new = session.begin_analysis().unwrap();
        assert_ne!(old.generation, new.generation);

        assert!(!session.complete_analysis(old.generation, Err("late failure")));
        assert_eq!(session.phase(), Phase::Analyzing);

        assert!(session.complete_analysis::<()>(new.generation, Ok(sample_result())));
        assert_eq!(session.phase(), Phase::Result);
    }

    #[test]
    fn test_restart_after_error_clears_message() {
        let mut session = Session::new();
        session.capture_image(img("x"));
        let ticket = session.begin_analysis().unwrap();
        session.complete_analysis(ticket.generation, Err(()));
        assert_eq!(session.phase(), Phase::Error);

        session.reset();
        session.capture_image(img("y"));
        session.begin_analysis().unwrap();
        assert!(session.last_error().is_none());
        assert_eq!(session.phase(), Phase::Analyzing);
    }
}
