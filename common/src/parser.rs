//! APIレスポンスパーサー
//!
//! Gemini等のレスポンスからJSONを抽出し、AnalysisResultへ厳密にパースする。
//! 必須フィールドの欠落や dadTips が空のレシピは全体を失敗とし、
//! 部分的に埋まった結果は返さない。

use crate::error::{Error, Result};
use crate::types::AnalysisResult;

/// APIレスポンスからJSONオブジェクト部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の {...} オブジェクト
/// 3. エラー
///
/// # Examples
/// ```
/// use reizo_dad_common::extract_json;
///
/// let response = "結果だぞ: {\"recipes\": []}";
/// let json = extract_json(response).unwrap();
/// assert_eq!(json, "{\"recipes\": []}");
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    // ```json ... ``` ブロックを探す
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    // 生の {...} を探す
    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSONが見つかりません".into()))
}

/// 解析レスポンスをパース
///
/// まず本文全体をJSONとして読み、失敗したときだけ ```json ブロックや
/// 前後の文章からの切り出しを試す。
///
/// # Returns
/// * `Ok(AnalysisResult)` - すべての必須フィールドが揃っている
/// * `Err(Error::Parse)` - JSONが見つからない、または形が合わない
/// * `Err(Error::Validation)` - dadTips が空のレシピがある
pub fn parse_analysis_response(response: &str) -> Result<AnalysisResult> {
    // responseMimeType=application/json なので通常は本文全体がJSON
    let result = match serde_json::from_str::<AnalysisResult>(response.trim()) {
        Ok(result) => result,
        Err(_) => {
            let json_str = extract_json(response)?;
            serde_json::from_str(json_str.trim())
                .map_err(|e| Error::Parse(format!("解析結果 JSONパースエラー: {}", e)))?
        }
    };
    validate(&result)?;
    Ok(result)
}

/// serdeでは表現できない制約のチェック
fn validate(result: &AnalysisResult) -> Result<()> {
    for (i, recipe) in result.recipes.iter().enumerate() {
        if recipe.dad_tips.trim().is_empty() {
            return Err(Error::Validation(format!(
                "レシピ{}（{}）の dadTips が空です",
                i + 1,
                recipe.title
            )));
        }
    }
    Ok(())
}
