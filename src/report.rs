//! 解析結果レポート（--json / --output）

use crate::error::Result;
use food_vision_common::{Prediction, PredictError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 1セッションの結末
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum SessionOutcome {
    Completed { predictions: Vec<Prediction> },
    Failed { error: PredictError },
    /// 画像ではないので送信しなかった
    Skipped { reason: String },
    /// Ctrl+Cで中断
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub file_name: String,
    pub file_path: String,
    /// RFC 3339
    pub analyzed_at: String,
    #[serde(flatten)]
    pub outcome: SessionOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub endpoint: String,
    pub generated_at: String,
    pub sessions: Vec<SessionReport>,
}

impl RunReport {
    pub fn new(endpoint: impl Into<String>, sessions: Vec<SessionReport>) -> Self {
        Self {
            endpoint: endpoint.into(),
            generated_at: now_rfc3339(),
            sessions,
        }
    }

    /// 実際に送信したセッション数
    pub fn attempted(&self) -> usize {
        self.sessions
            .iter()
            .filter(|s| {
                matches!(
                    s.outcome,
                    SessionOutcome::Completed { .. } | SessionOutcome::Failed { .. }
                )
            })
            .count()
    }

    pub fn completed(&self) -> usize {
        self.sessions
            .iter()
            .filter(|s| matches!(s.outcome, SessionOutcome::Completed { .. }))
            .count()
    }

    /// 送信したものがすべて失敗したか
    pub fn all_failed(&self) -> bool {
        self.attempted() > 0 && self.completed() == 0
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

pub fn now_rfc3339() -> String {
    chrono::Local::now().to_rfc3339()
}
