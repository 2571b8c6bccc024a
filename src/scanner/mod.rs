//! 画像取り込み
//!
//! ファイルやフォルダから冷蔵庫の写真を読み込み、ImagePayload にする。
//! サイズ・形式の検証やリサイズは行わない。

use crate::error::{ReizoDadError, Result};
use image::ImageFormat;
use reizo_dad_common::image::DEFAULT_MIME_TYPE;
use reizo_dad_common::ImagePayload;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "heic", "heif"];

/// 拡張子が対応画像形式か（大文字小文字は無視）
fn is_image_extension(ext: &str) -> bool {
    let ext = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// MIMEタイプを判定
///
/// 1. ファイル先頭のマジックバイト
/// 2. 拡張子
/// 3. image/jpeg
fn detect_mime_type(path: &Path, bytes: &[u8]) -> String {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type().to_string();
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "heic" => "image/heic".to_string(),
        "heif" => "image/heif".to_string(),
        _ => ImageFormat::from_extension(&ext)
            .map(|f| f.to_mime_type().to_string())
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
    }
}

/// 画像ファイルを読み込む
pub fn load_image(path: &Path) -> Result<ImagePayload> {
    if !path.is_file() {
        return Err(ReizoDadError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| ReizoDadError::ImageLoad(format!("{}: {}", path.display(), e)))?;

    if bytes.is_empty() {
        return Err(ReizoDadError::ImageLoad(format!("{}: 空のファイルです", path.display())));
    }

    let mime_type = detect_mime_type(path, &bytes);
    tracing::debug!(
        path = %path.display(),
        mime_type = %mime_type,
        bytes = bytes.len(),
        "画像読み込み"
    );

    Ok(ImagePayload::from_bytes(mime_type, &bytes))
}

/// フォルダ直下の画像ファイルを列挙（ファイル名順）
pub fn scan_folder(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(ReizoDadError::FolderNotFound(folder.display().to_string()));
    }

    let mut images: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .map(|ext| is_image_extension(&ext.to_string_lossy()))
                .unwrap_or(false)
        })
        .collect();

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(images)
}
