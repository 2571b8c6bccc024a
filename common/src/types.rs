//! 解析結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - Difficulty: 難易度（3段階の固定ラベル）
//! - Ingredient / Recipe: レシピ1件分
//! - AnalysisResult: 1回の解析で得られる最終出力
//!
//! どのフィールドにも `#[serde(default)]` は付けない。
//! 必須フィールドが欠けたレスポンスはデシリアライズ失敗として扱う。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 難易度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "簡単")]
    Easy,
    #[serde(rename = "普通")]
    Normal,
    #[serde(rename = "少し頑張る")]
    ABitOfEffort,
}

impl Difficulty {
    /// すべての難易度（スキーマのenum順）
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::ABitOfEffort,
    ];

    /// 表示・スキーマ用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "簡単",
            Difficulty::Normal => "普通",
            Difficulty::ABitOfEffort => "少し頑張る",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 材料（名前と分量）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: String,
}

/// レシピ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,              // 料理名
    pub description: String,        // 料理の魅力
    pub cooking_time: String,       // 調理時間
    pub difficulty: Difficulty,
    pub ingredients: Vec<Ingredient>,
    /// 調理手順。表示上の番号は index + 1
    pub steps: Vec<String>,
    /// パパのこだわり（必須・空文字不可）
    pub dad_tips: String,
}

/// AI解析結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 画像から見つかった食材（AIが返した順）
    pub detected_ingredients: Vec<String>,
    pub recipes: Vec<Recipe>,
}
