//! 表示用ビューモデル
//!
//! 状態から純粋に導出される。見た目（色・アニメーション）は各フロントエンドに任せる。

use crate::session::ViewState;
use crate::types::Prediction;
use serde::Serialize;

/// どの画面を描くか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// アップロード領域（処理中はローディング表示）
    Upload { processing: bool },
    /// 解析画像と結果カード
    Results,
}

impl Screen {
    pub fn of<P>(view: &ViewState<P>) -> Self {
        match view {
            ViewState::Idle => Screen::Upload { processing: false },
            ViewState::Processing { .. } => Screen::Upload { processing: true },
            ViewState::ResultsReady { .. } => Screen::Results,
        }
    }
}

/// 信頼度の段階（色分け用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    /// 80%以上
    High,
    /// 60%以上
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 80.0 {
            ConfidenceTier::High
        } else if confidence >= 60.0 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "high",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::Low => "low",
        }
    }
}

/// 結果カード1枚分
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultCard {
    /// 1始まりの順位
    pub rank: usize,
    pub label: String,
    pub confidence: f64,
    pub is_top: bool,
    pub tier: ConfidenceTier,
}

impl ResultCard {
    /// "94.23%" 形式（末尾の0は付けない）
    pub fn confidence_text(&self) -> String {
        format!("{}%", self.confidence)
    }

    /// バーの幅（0〜100）
    pub fn bar_percent(&self) -> f64 {
        self.confidence.clamp(0.0, 100.0)
    }

    /// テキストのバー（`width` 文字）
    pub fn text_bar(&self, width: usize) -> String {
        let filled = ((self.bar_percent() / 100.0) * width as f64).round() as usize;
        let filled = filled.min(width);
        format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
    }
}

/// 予測リストから結果カードを作る（サーバーの順番のまま）
pub fn result_cards(predictions: &[Prediction]) -> Vec<ResultCard> {
    predictions
        .iter()
        .enumerate()
        .map(|(i, p)| ResultCard {
            rank: i + 1,
            label: p.label.clone(),
            confidence: p.confidence,
            is_top: i == 0,
            tier: ConfidenceTier::from_confidence(p.confidence),
        })
        .collect()
}

/// 共有用のテキストサマリ
pub fn summary_text(predictions: &[Prediction]) -> String {
    let mut text = String::from("Food Vision AI results:\n");
    for card in result_cards(predictions) {
        text.push_str(&format!("{}. {} ({})\n", card.rank, card.label, card.confidence_text()));
    }
    text
}
