//! プロンプト・スキーマ定義モジュール
//!
//! CLIとWeb(WASM)で共有される推論リクエストの固定部分:
//! - SYSTEM_INSTRUCTION: パパのペルソナ定義
//! - USER_PROMPT: 画像に添えるユーザープロンプト
//! - response_schema: 構造化出力の形（responseSchema）
//! - ANALYSIS_ERROR_MESSAGE: 失敗時にユーザーへ見せる固定メッセージ

use crate::types::Difficulty;
use serde_json::{json, Value};

/// ペルソナ定義（システムインストラクション）
pub const SYSTEM_INSTRUCTION: &str = r#"あなたは「料理好きで家族思いのベテランパパ」のAIです。料理初心者に対して、冷蔵庫にあるものでパパッと作れる美味しいレシピを提案します。

役割:
1. 複数の画像から食材や調味料を特定する。
2. 特定した食材を使って、初心者が15分〜20分で作れる「旨い飯」を2〜3つ提案する。
3. 言葉遣いは、優しく頼りがいのある「パパ」のトーン（例：「お疲れ様！」「〜だぞ」「やってみよう」）。
4. 各レシピには必ず「パパのこだわり（dadTips）」として、より美味しくなる裏技や、手際よく作るコツを含めること。"#;

/// 画像と一緒に送るプロンプト
pub const USER_PROMPT: &str =
    "冷蔵庫の中を見てくれ。パパっと作れる旨い飯を一緒に考えていこう。初心者でも迷わないように頼むぞ。";

/// 解析失敗時の表示メッセージ（生のエラーは見せない）
pub const ANALYSIS_ERROR_MESSAGE: &str =
    "悪いな、ちょっと写真がうまく読み取れなかった。もう一回、明るい場所で撮ってくれるか？";

/// 構造化出力のレスポンススキーマ
///
/// Gemini の responseSchema 形式（OBJECT / ARRAY / STRING）。
/// 難易度の enum は [`Difficulty::ALL`] から生成する。
pub fn response_schema() -> Value {
    let difficulties: Vec<&str> = Difficulty::ALL.iter().map(|d| d.label()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "detectedIngredients": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "画像から見つかった食材のリスト"
            },
            "recipes": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING", "description": "料理名" },
                        "description": { "type": "STRING", "description": "料理の魅力" },
                        "cookingTime": { "type": "STRING", "description": "調理時間" },
                        "difficulty": { "type": "STRING", "enum": difficulties },
                        "ingredients": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "name": { "type": "STRING" },
                                    "amount": { "type": "STRING" }
                                },
                                "required": ["name", "amount"]
                            }
                        },
                        "steps": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" },
                            "description": "調理手順"
                        },
                        "dadTips": { "type": "STRING", "description": "パパからのこだわりアドバイス" }
                    },
                    "required": [
                        "title", "description", "cookingTime", "difficulty",
                        "ingredients", "steps", "dadTips"
                    ]
                }
            }
        },
        "required": ["detectedIngredients", "recipes"]
    })
}
