//! Food Vision CLI
//!
//! 食べ物の写真を予測エンドポイントへ送り、上位5件の分類結果を表示する

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod render;
pub mod report;
pub mod runner;
pub mod scanner;
