//! 対話モード
//!
//! 描画層のターミナル版。メニューから4操作をセッションへ送り、
//! 毎回スナップショットを描画し直す。

use crate::controller::{AnalysisOutcome, SessionController};
use crate::error::Result;
use crate::render;
use crate::scanner;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use reizo_dad_common::Phase;
use std::path::Path;
use std::time::Duration;

/// メニュー操作
enum MenuAction {
    /// 写真を追加
    Capture,
    /// 写真を削除
    Remove,
    /// 献立を相談する
    Analyze,
    /// 撮り直す
    Reset,
    /// 終了
    Quit,
}

/// 解析中のスピナー付きで解析を実行
pub async fn analyze_with_spinner(controller: &SessionController) -> AnalysisOutcome {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("よし、何ができるか考え中だ...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let outcome = controller.start_analysis().await;

    spinner.finish_and_clear();
    outcome
}

/// パス（ファイルまたはフォルダ）の画像をセッションに追加
///
/// 全ファイルを読み込めたときだけ追加する（1枚でも失敗したら何も追加しない）。
/// 追加できた枚数を返す
pub async fn capture_path(controller: &SessionController, path: &Path) -> Result<usize> {
    let files = if path.is_dir() {
        scanner::scan_folder(path)?
    } else {
        vec![path.to_path_buf()]
    };

    let payloads = files
        .iter()
        .map(|file| scanner::load_image(file))
        .collect::<Result<Vec<_>>>()?;

    let mut added = 0;
    for payload in payloads {
        if controller.capture_image(payload).await {
            added += 1;
        }
    }
    Ok(added)
}

pub async fn run_interactive(controller: &SessionController) -> Result<()> {
    println!("{}", render::render_header());

    loop {
        let view = controller.snapshot().await;
        println!("\n{}", render::render_session(&view));

        match prompt_action(view.phase, view.captured_images.len())? {
            MenuAction::Capture => {
                let input: String = Input::new()
                    .with_prompt("写真のパス（フォルダも可）")
                    .interact_text()?;
                let path = Path::new(input.trim());
                match capture_path(controller, path).await {
                    Ok(n) => println!("✔ {}枚追加したぞ", n),
                    Err(e) => println!("⚠ {}", e),
                }
            }
            MenuAction::Remove => {
                let labels: Vec<String> = view
                    .captured_images
                    .iter()
                    .enumerate()
                    .map(|(i, img)| {
                        let kb = img.approx_byte_len() / 1024;
                        format!("写真{} ({}, 約{}KB)", i + 1, img.mime_type, kb)
                    })
                    .collect();
                let index = Select::new()
                    .with_prompt("消す写真を選んでくれ")
                    .items(&labels)
                    .default(0)
                    .interact()?;
                controller.remove_image(index).await;
            }
            MenuAction::Analyze => {
                analyze_with_spinner(controller).await;
            }
            MenuAction::Reset => controller.reset().await,
            MenuAction::Quit => break,
        }
    }

    Ok(())
}

fn prompt_action(phase: Phase, image_count: usize) -> Result<MenuAction> {
    let mut actions: Vec<(&str, MenuAction)> = Vec::new();

    match phase {
        Phase::Idle => {
            let capture_label = if image_count == 0 { "冷蔵庫を撮る" } else { "さらに撮る" };
            actions.push((capture_label, MenuAction::Capture));
            if image_count > 0 {
                actions.push(("写真を消す", MenuAction::Remove));
                actions.push(("献立を相談する", MenuAction::Analyze));
            }
        }
        Phase::Result => actions.push(("他のアイデアも見てみる", MenuAction::Reset)),
        Phase::Error => actions.push(("もう一度撮ってみる", MenuAction::Reset)),
        Phase::Analyzing => {}
    }
    actions.push(("終了", MenuAction::Quit));

    let labels: Vec<&str> = actions.iter().map(|(label, _)| *label).collect();
    let selected = Select::new()
        .with_prompt("どうする？")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(actions.swap_remove(selected).1)
}
