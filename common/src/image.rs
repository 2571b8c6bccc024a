//! 画像ペイロード
//!
//! 撮影・選択された画像を「MIMEタイプ + Base64文字列」として保持する。
//! リサイズや再エンコードは行わない。

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// MIMEタイプ不明時のデフォルト
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// 1枚分の画像データ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    pub mime_type: String,
    /// Base64エンコード済みのバイト列
    pub data: String,
}

impl ImagePayload {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// 生バイト列からペイロードを作成
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(mime_type, STANDARD.encode(bytes))
    }

    /// Data URLからペイロードを作成
    ///
    /// `data:image/png;base64,iVBOR...` 形式。MIMEタイプが読めない場合は
    /// image/jpeg とみなす。カンマが無い場合はNone
    pub fn from_data_url(data_url: &str) -> Option<Self> {
        let (header, data) = data_url.split_once(',')?;
        let mime_type = header
            .strip_prefix("data:")
            .and_then(|s| s.split(';').next())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_MIME_TYPE);
        Some(Self::new(mime_type, data))
    }

    /// サムネイル表示用のData URL
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// デコード後のおおよそのバイト数
    pub fn approx_byte_len(&self) -> usize {
        self.data.len() / 4 * 3
    }

    pub fn is_empty(&self) -> bool {
        self.data.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_encodes_base64() {
        let payload = ImagePayload::from_bytes("image/png", b"hello");
        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(payload.data, "aGVsbG8=");
    }

    #[test]
    fn test_from_data_url() {
        let payload = ImagePayload::from_data_url("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(payload.data, "iVBORw0KGgo=");
    }

    #[test]
    fn test_from_data_url_defaults_to_jpeg() {
        let payload = ImagePayload::from_data_url("data:;base64,/9j/4AAQ").unwrap();
        assert_eq!(payload.mime_type, "image/jpeg");

        let payload = ImagePayload::from_data_url("garbage,/9j/4AAQ").unwrap();
        assert_eq!(payload.mime_type, "image/jpeg");
    }

    #[test]
    fn test_from_data_url_without_comma() {
        assert!(ImagePayload::from_data_url("no-comma-here").is_none());
    }

    #[test]
    fn test_to_data_url() {
        let payload = ImagePayload::new("image/jpeg", "/9j/4AAQ");
        assert_eq!(payload.to_data_url(), "data:image/jpeg;base64,/9j/4AAQ");
    }

    #[test]
    fn test_is_empty() {
        assert!(ImagePayload::new("image/jpeg", "").is_empty());
        assert!(ImagePayload::new("image/jpeg", "  ").is_empty());
        assert!(!ImagePayload::new("image/jpeg", "AAAA").is_empty());
    }

    #[test]
    fn test_approx_byte_len() {
        let payload = ImagePayload::from_bytes("image/jpeg", &[0u8; 30]);
        assert_eq!(payload.approx_byte_len(), 30);
    }
}
