//! ターミナル表示
//!
//! 状態遷移ごとに呼ばれ、処理中はスピナー、結果はランキングとバーを出す。

use console::Style;
use food_vision_common::presentation::{result_cards, ConfidenceTier, ResultCard};
use food_vision_common::session::NotificationKind;
use food_vision_common::{Prediction, Theme, Transition, UiState};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

const BAR_WIDTH: usize = 24;

/// 状態遷移を表示に反映するもの
pub trait Presenter {
    fn present(&mut self, transition: Transition, state: &UiState<PathBuf>);
}

/// 何も表示しない（--json 出力時）
pub struct QuietPresenter;

impl Presenter for QuietPresenter {
    fn present(&mut self, _transition: Transition, _state: &UiState<PathBuf>) {}
}

/// スピナーと結果カードをstdout/stderrに出す
#[derive(Default)]
pub struct TerminalPresenter {
    spinner: Option<ProgressBar>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.magenta} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Presenter for TerminalPresenter {
    fn present(&mut self, transition: Transition, state: &UiState<PathBuf>) {
        match transition {
            Transition::Started(_) => {
                let message = state
                    .notification()
                    .map(|n| n.message.as_str())
                    .unwrap_or_default();
                let file = state.preview().map(|p| display_name(p)).unwrap_or_default();
                self.start_spinner(&format!("{} {}", message, file));
            }
            Transition::Completed(_) => {
                self.stop_spinner();
                if let (Some(preview), Some(predictions)) = (state.preview(), state.predictions()) {
                    println!("{}", render_results(preview, predictions, state.theme()));
                }
            }
            Transition::Failed(_) => {
                self.stop_spinner();
                if let Some(n) = state.notification().filter(|n| n.kind == NotificationKind::Error) {
                    eprintln!("{}", error_style(state.theme()).apply_to(format!("✘ {}", n.message)));
                }
            }
            Transition::Reset { .. } => self.stop_spinner(),
            Transition::Busy | Transition::Stale(_) | Transition::Unchanged => {}
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn error_style(theme: Theme) -> Style {
    if theme.is_dark() {
        Style::new().for_stderr().red().bright()
    } else {
        Style::new().for_stderr().red()
    }
}

fn tier_style(tier: ConfidenceTier, theme: Theme) -> Style {
    let style = match tier {
        ConfidenceTier::High => Style::new().green(),
        ConfidenceTier::Medium => Style::new().cyan(),
        ConfidenceTier::Low => Style::new().yellow(),
    };
    if theme.is_dark() {
        style.bright()
    } else {
        style
    }
}

fn render_card(card: &ResultCard, theme: Theme) -> String {
    let marker = if card.is_top { "★" } else { " " };
    let label = if card.is_top {
        Style::new().bold().apply_to(card.label.as_str()).to_string()
    } else {
        card.label.clone()
    };
    format!(
        "{} #{} {:<28} {} {:>7}",
        marker,
        card.rank,
        label,
        tier_style(card.tier, theme).apply_to(card.text_bar(BAR_WIDTH)),
        card.confidence_text(),
    )
}

/// 解析結果をテキストにする
pub fn render_results(image: &Path, predictions: &[Prediction], theme: Theme) -> String {
    let mut lines = vec![format!("🍽  {}", display_name(image))];
    lines.extend(result_cards(predictions).iter().map(|card| render_card(card, theme)));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predictions() -> Vec<Prediction> {
        vec![
            Prediction { label: "Pizza".into(), confidence: 94.23 },
            Prediction { label: "Garlic Bread".into(), confidence: 3.5 },
        ]
    }

    #[test]
    fn test_render_results_lists_ranked_cards() {
        console::set_colors_enabled(false);
        let text = render_results(Path::new("/tmp/lunch.jpg"), &predictions(), Theme::Dark);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("lunch.jpg"));
        assert!(lines[1].starts_with("★ #1 Pizza"));
        assert!(lines[1].ends_with("94.23%"));
        assert!(lines[2].starts_with("  #2 Garlic Bread"));
        assert!(lines[2].ends_with("3.5%"));
    }

    #[test]
    fn test_render_results_bar_width() {
        console::set_colors_enabled(false);
        let text = render_results(Path::new("a.jpg"), &predictions(), Theme::Light);
        let line = text.lines().nth(1).unwrap();
        let bar: String = line.chars().filter(|c| *c == '█' || *c == '░').collect();
        assert_eq!(bar.chars().count(), BAR_WIDTH);
    }
}
