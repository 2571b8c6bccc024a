use clap::Parser;
use reizo_dad::{cli, config, controller, gateway, interactive, render};
use cli::{Cli, Commands};
use config::Config;
use controller::{AnalysisOutcome, SessionController};
use gateway::GeminiGateway;
use reizo_dad::error::ReizoDadError;
use reizo_dad_common::Phase;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_controller(
    config: &Config,
    model: Option<&str>,
) -> reizo_dad::error::Result<SessionController> {
    let mut config = config.clone();
    if let Some(model) = model {
        config.model = model.to_string();
    }
    let gateway = GeminiGateway::from_config(&config)?;
    Ok(SessionController::new(Arc::new(gateway)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load()?;
    let model = cli.model.as_deref();

    match cli.command {
        Commands::Cook { images, folder } => {
            println!("{}\n", render::render_header());

            let controller = build_controller(&config, model)?;

            // 1. 写真の取り込み
            let mut paths = images;
            if let Some(folder) = folder {
                paths.extend(reizo_dad::scanner::scan_folder(&folder)?);
            }
            if paths.is_empty() {
                return Err(ReizoDadError::NoImagesFound("写真が指定されていません".into()).into());
            }

            for path in &paths {
                interactive::capture_path(&controller, path).await?;
            }
            let captured = controller.snapshot().await.captured_images.len();
            println!("✔ {}枚の写真を受け取ったぞ\n", captured);

            // 2. 解析
            let outcome = interactive::analyze_with_spinner(&controller).await;
            tracing::debug!(?outcome, "解析終了");

            // 3. 結果表示
            println!("{}", render::render_session(&controller.snapshot().await));

            if outcome == AnalysisOutcome::Completed(Phase::Error) {
                anyhow::bail!("献立の提案に失敗しました");
            }
        }

        Commands::Interactive => {
            let controller = build_controller(&config, model)?;
            interactive::run_interactive(&controller).await?;
        }

        Commands::Config { set_api_key, show } => {
            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  パス: {}", Config::config_path()?.display());
                println!("  モデル: {}", config.model);
                println!("  エンドポイント: {}", config.base_url);
                println!("  タイムアウト: {}秒", config.timeout().as_secs());
                println!("  APIキー: {}", if config.has_api_key() { "設定済み" } else { "未設定" });
            }
        }

        Commands::Schema => {
            println!("# systemInstruction\n{}\n", reizo_dad_common::SYSTEM_INSTRUCTION);
            println!("# prompt\n{}\n", reizo_dad_common::USER_PROMPT);
            println!(
                "# responseSchema\n{}",
                serde_json::to_string_pretty(&reizo_dad_common::response_schema())?
            );
        }
    }

    Ok(())
}
