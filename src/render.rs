//! ターミナル描画
//!
//! セッションのスナップショットを画面ごとの文字列にする。
//! 読み取り専用で、セッションを変更しない。

use crate::controller::SessionView;
use reizo_dad_common::{AnalysisResult, Phase, Recipe};

pub const APP_TITLE: &str = "れいぞーパパ";

const RULE: &str = "────────────────────────────────";

pub fn render_header() -> String {
    format!("🧊 {}  Kitchen Hero\n{}", APP_TITLE, RULE)
}

/// フェーズに応じて画面を描画
pub fn render_session(view: &SessionView) -> String {
    match view.phase {
        Phase::Idle => render_idle(view.captured_images.len()),
        Phase::Analyzing => render_analyzing(),
        Phase::Result => match &view.last_result {
            Some(result) => render_result(result),
            None => render_idle(0),
        },
        Phase::Error => render_error(view.last_error.as_deref().unwrap_or_default()),
    }
}

pub fn render_idle(image_count: usize) -> String {
    let mut lines = vec![
        "🍳 お疲れ様！".to_string(),
        "冷蔵庫の中をパッと撮って見せてくれ。".to_string(),
        "パパが旨い飯の作り方を教えてやるぞ。".to_string(),
    ];
    if image_count > 0 {
        lines.push(String::new());
        lines.push(format!("チェックする写真 ({}枚)", image_count));
    }
    join_lines(&lines)
}

pub fn render_analyzing() -> String {
    "🥘 よし、何ができるか考え中だ...\n\
     冷蔵庫の中をしっかりチェックしてるぞ。最高の献立を出すから、少し待ってろよ。\n"
        .to_string()
}

pub fn render_result(result: &AnalysisResult) -> String {
    let mut out = join_lines(&[
        "パパのおすすめ献立".to_string(),
        format!("見つけた食材：{}", result.detected_ingredients.join("、")),
    ]);

    for recipe in &result.recipes {
        out.push('\n');
        out.push_str(&render_recipe(recipe));
    }
    out
}

/// レシピカード1枚分
pub fn render_recipe(recipe: &Recipe) -> String {
    let mut lines = vec![
        RULE.to_string(),
        format!("■ {} [{}]", recipe.title, recipe.difficulty),
        recipe.description.clone(),
        format!("⏱ {}", recipe.cooking_time),
        String::new(),
        "● 材料".to_string(),
    ];
    lines.extend(
        recipe
            .ingredients
            .iter()
            .map(|ing| format!("  - {} … {}", ing.name, ing.amount)),
    );

    lines.push(String::new());
    lines.push("● パパの作り方手順".to_string());
    lines.extend(
        recipe
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| format!("  {}. {}", i + 1, step)),
    );

    lines.push(String::new());
    lines.push("💡 パパのこだわり".to_string());
    lines.push(format!("  「{}」", recipe.dad_tips));
    join_lines(&lines)
}

/// 各行を改行で終端して連結
fn join_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{}\n", line)).collect()
}

pub fn render_error(message: &str) -> String {
    format!("😅 すまん、失敗だ！\n{}\n", message)
}
