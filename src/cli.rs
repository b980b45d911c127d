use clap::{Parser, Subcommand};
use food_vision_common::Theme;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "food-vision")]
#[command(about = "Classify food photos with a remote prediction API (top-5 results)", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 表示テーマ (dark/light)
    #[arg(long, global = true)]
    pub theme: Option<Theme>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像（またはフォルダ内の画像）を解析
    Predict {
        /// 画像ファイルまたはフォルダ
        #[arg(required = true)]
        path: PathBuf,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        /// 結果をJSONでstdoutへ出力
        #[arg(long)]
        json: bool,

        /// 結果レポートの保存先（JSON）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 予測エンドポイント（設定より優先）
        #[arg(short, long)]
        endpoint: Option<String>,

        /// タイムアウト秒数（設定より優先）
        #[arg(short, long)]
        timeout: Option<u64>,
    },

    /// 予測サーバーの稼働確認
    Health {
        /// 予測エンドポイント（設定より優先）
        #[arg(short, long)]
        endpoint: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// 予測エンドポイントを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// タイムアウト秒数を設定
        #[arg(long)]
        set_timeout: Option<u64>,

        /// テーマを設定 (dark/light)
        #[arg(long)]
        set_theme: Option<Theme>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
