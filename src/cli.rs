use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reizo-dad")]
#[command(about = "冷蔵庫の写真からパパが献立を提案するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 使用するモデル（設定ファイルより優先）
    #[arg(long, global = true)]
    pub model: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真を渡して献立を相談する
    Cook {
        /// 冷蔵庫の写真（撮影順）
        images: Vec<PathBuf>,

        /// 写真フォルダ（直下の画像をファイル名順に追加）
        #[arg(short, long)]
        folder: Option<PathBuf>,
    },

    /// 対話モード（撮る・消す・相談する・撮り直す）
    Interactive,

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// 推論に渡すプロンプトとレスポンススキーマを表示
    Schema,
}
