//! 画像取り込みテスト
//!
//! ファイル・フォルダからセッションへの追加を検証

use async_trait::async_trait;
use reizo_dad::controller::SessionController;
use reizo_dad::error::{ReizoDadError, Result};
use reizo_dad::gateway::InferenceGateway;
use reizo_dad::interactive::capture_path;
use reizo_dad_common::{AnalysisResult, ImagePayload};
use std::fs::File;
use std::io::Write;
use std::sync::Arc;
use tempfile::tempdir;

const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

struct UnusedGateway;

#[async_trait]
impl InferenceGateway for UnusedGateway {
    async fn analyze(&self, _images: &[ImagePayload]) -> Result<AnalysisResult> {
        Err(ReizoDadError::ApiCall("呼ばれないはず".into()))
    }
}

fn controller() -> SessionController {
    SessionController::new(Arc::new(UnusedGateway))
}

/// フォルダ内の画像をファイル名順に追加
#[tokio::test]
async fn test_capture_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    File::create(dir.path().join("b.png")).unwrap().write_all(PNG_HEADER).unwrap();
    File::create(dir.path().join("a.png")).unwrap().write_all(PNG_HEADER).unwrap();

    let controller = controller();
    let added = capture_path(&controller, dir.path()).await.expect("取り込み失敗");

    assert_eq!(added, 2);
    let view = controller.snapshot().await;
    assert_eq!(view.captured_images.len(), 2);
    assert!(view.captured_images.iter().all(|img| img.mime_type == "image/png"));
}

/// 1枚でも読めなければ何も追加しない
#[tokio::test]
async fn test_capture_folder_with_broken_file_adds_nothing() {
    let dir = tempdir().expect("Failed to create temp dir");
    File::create(dir.path().join("a.png")).unwrap().write_all(PNG_HEADER).unwrap();
    File::create(dir.path().join("b.jpg")).unwrap(); // 空ファイル
    File::create(dir.path().join("c.png")).unwrap().write_all(PNG_HEADER).unwrap();

    let controller = controller();
    let result = capture_path(&controller, dir.path()).await;

    assert!(matches!(result, Err(ReizoDadError::ImageLoad(_))));
    assert!(controller.snapshot().await.captured_images.is_empty());
}

/// 単一ファイルの追加
#[tokio::test]
async fn test_capture_single_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("fridge.png");
    File::create(&path).unwrap().write_all(PNG_HEADER).unwrap();

    let controller = controller();
    assert_eq!(capture_path(&controller, &path).await.unwrap(), 1);
}
