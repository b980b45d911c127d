//! アップロードセッションの状態管理
//!
//! UI状態（セッション・テーマ・ドラッグ中表示・通知）を1つの値で持ち、
//! `UiState::update` だけで遷移させる。
//!
//! ```text
//! Idle --(FileAccepted)--> Processing
//! Processing --(PredictionSucceeded)--> ResultsReady
//! Processing --(PredictionFailed)--> Idle
//! ResultsReady --(Reset)--> Idle
//! ```
//!
//! プレビュー `P` はセッションが排他的に所有する。Idleに戻る・
//! 新しいセッションに置き換わる時点でdropされ、解放される
//! （WASMではObjectUrlのdropでrevokeされる）。

use crate::api::INVALID_RESPONSE_MESSAGE;
use crate::error::PredictError;
use crate::types::Prediction;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const ANALYZING_MESSAGE: &str = "Analyzing your food image...";
pub const COMPLETE_MESSAGE: &str = "Analysis complete! Check out the results below.";
pub const FAILED_PREFIX: &str = "Analysis failed: ";

/// 受け入れたファイルごとに振られる連番
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(u64);

impl SessionId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 表示テーマ（データフローには影響しない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dark" | "d" => Ok(Theme::Dark),
            "light" | "l" => Ok(Theme::Light),
            _ => Err(format!("Unknown theme: {}. Use dark or light", s)),
        }
    }
}

/// 通知の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Loading,
    Success,
    Error,
}

/// 一時的な通知（トースト）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn loading(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Loading, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Error, message: message.into() }
    }
}

/// 表示モード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ViewState<P> {
    Idle,
    Processing {
        session: SessionId,
        preview: P,
    },
    ResultsReady {
        session: SessionId,
        preview: P,
        predictions: Vec<Prediction>,
    },
}

impl<P> Default for ViewState<P> {
    fn default() -> Self {
        ViewState::Idle
    }
}

/// 状態を変える唯一の入力
#[derive(Debug)]
pub enum Action<P> {
    /// 画像ファイルを受け入れた（プレビューの所有権ごと渡す）
    FileAccepted(P),
    PredictionSucceeded {
        session: SessionId,
        predictions: Vec<Prediction>,
    },
    PredictionFailed {
        session: SessionId,
        error: PredictError,
    },
    Reset,
    ToggleTheme,
    SetTheme(Theme),
    DragHover(bool),
    /// 表示モードと無関係な通知（共有完了など）
    Notify(Notification),
    DismissNotification,
}

/// `update` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Processingに入った
    Started(SessionId),
    /// 処理中のため新しいファイルを拒否した（状態は変わらない）
    Busy,
    Completed(SessionId),
    Failed(SessionId),
    /// 現在のセッションではない完了通知を捨てた
    Stale(SessionId),
    /// Idleに戻った。`released` はプレビューを解放したか
    Reset { released: bool },
    /// 見た目だけの変更、または何も起きなかった
    Unchanged,
}

/// UI全体の状態
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState<P> {
    view: ViewState<P>,
    next_session: u64,
    theme: Theme,
    drag_hover: bool,
    notification: Option<Notification>,
}

impl<P> Default for UiState<P> {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl<P> UiState<P> {
    pub fn new(theme: Theme) -> Self {
        Self {
            view: ViewState::Idle,
            next_session: 0,
            theme,
            drag_hover: false,
            notification: None,
        }
    }

    /// アクションを適用する
    pub fn update(&mut self, action: Action<P>) -> Transition {
        match action {
            Action::FileAccepted(preview) => self.start(preview),
            Action::PredictionSucceeded { session, predictions } => {
                self.complete(session, predictions)
            }
            Action::PredictionFailed { session, error } => self.fail(session, error),
            Action::Reset => self.reset(),
            Action::ToggleTheme => {
                self.theme = self.theme.toggled();
                Transition::Unchanged
            }
            Action::SetTheme(theme) => {
                self.theme = theme;
                Transition::Unchanged
            }
            Action::DragHover(hover) => {
                // 処理中はアップロードを受け付けないので強調しない
                self.drag_hover = hover && !self.is_processing();
                Transition::Unchanged
            }
            Action::Notify(notification) => {
                self.notification = Some(notification);
                Transition::Unchanged
            }
            Action::DismissNotification => {
                self.notification = None;
                Transition::Unchanged
            }
        }
    }

    fn start(&mut self, preview: P) -> Transition {
        if self.is_processing() {
            return Transition::Busy;
        }

        self.next_session += 1;
        let session = SessionId(self.next_session);
        self.view = ViewState::Processing { session, preview };
        self.drag_hover = false;
        self.notification = Some(Notification::loading(ANALYZING_MESSAGE));
        Transition::Started(session)
    }

    fn complete(&mut self, session: SessionId, predictions: Vec<Prediction>) -> Transition {
        if predictions.is_empty() {
            let error = PredictError::InvalidResponse(INVALID_RESPONSE_MESSAGE.into());
            return self.fail(session, error);
        }

        match std::mem::take(&mut self.view) {
            ViewState::Processing { session: current, preview } if current == session => {
                self.view = ViewState::ResultsReady { session, preview, predictions };
                self.notification = Some(Notification::success(COMPLETE_MESSAGE));
                Transition::Completed(session)
            }
            other => {
                self.view = other;
                Transition::Stale(session)
            }
        }
    }

    fn fail(&mut self, session: SessionId, error: PredictError) -> Transition {
        if self.current_session() != Some(session) || !self.is_processing() {
            return Transition::Stale(session);
        }

        self.view = ViewState::Idle;
        self.notification = Some(Notification::error(format!("{}{}", FAILED_PREFIX, error)));
        Transition::Failed(session)
    }

    fn reset(&mut self) -> Transition {
        self.drag_hover = false;
        if self.is_idle() {
            return Transition::Unchanged;
        }

        self.view = ViewState::Idle;
        self.notification = None;
        Transition::Reset { released: true }
    }

    pub fn view(&self) -> &ViewState<P> {
        &self.view
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn drag_hover(&self) -> bool {
        self.drag_hover
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.view, ViewState::Idle)
    }

    pub fn is_processing(&self) -> bool {
        matches!(self.view, ViewState::Processing { .. })
    }

    pub fn is_results_ready(&self) -> bool {
        matches!(self.view, ViewState::ResultsReady { .. })
    }

    pub fn current_session(&self) -> Option<SessionId> {
        match &self.view {
            ViewState::Idle => None,
            ViewState::Processing { session, .. } | ViewState::ResultsReady { session, .. } => {
                Some(*session)
            }
        }
    }

    pub fn preview(&self) -> Option<&P> {
        match &self.view {
            ViewState::Idle => None,
            ViewState::Processing { preview, .. } | ViewState::ResultsReady { preview, .. } => {
                Some(preview)
            }
        }
    }

    pub fn predictions(&self) -> Option<&[Prediction]> {
        match &self.view {
            ViewState::ResultsReady { predictions, .. } => Some(predictions),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// dropされた回数を数えるプレビュー
    #[derive(Debug)]
    struct TrackedPreview {
        released: Rc<Cell<usize>>,
    }

    impl Drop for TrackedPreview {
        fn drop(&mut self) {
            self.released.set(self.released.get() + 1);
        }
    }

    fn tracked() -> (TrackedPreview, Rc<Cell<usize>>) {
        let released = Rc::new(Cell::new(0));
        (TrackedPreview { released: released.clone() }, released)
    }

    fn five() -> Vec<Prediction> {
        ["Pizza", "Lasagna", "Ravioli", "Garlic Bread", "Gnocchi"]
            .iter()
            .enumerate()
            .map(|(i, label)| Prediction {
                label: label.to_string(),
                confidence: 90.0 - i as f64 * 10.0,
            })
            .collect()
    }

    fn started<P>(state: &mut UiState<P>, preview: P) -> SessionId {
        match state.update(Action::FileAccepted(preview)) {
            Transition::Started(session) => session,
            other => panic!("expected Started, got {:?}", other),
        }
    }

    #[test]
    fn test_initial_state_idle() {
        let state: UiState<String> = UiState::default();
        assert!(state.is_idle());
        assert!(state.preview().is_none());
        assert!(state.predictions().is_none());
        assert_eq!(state.theme(), Theme::Dark);
        assert!(state.notification().is_none());
    }

    #[test]
    fn test_success_flow() {
        let mut state = UiState::default();
        let session = started(&mut state, "blob:1".to_string());
        assert!(state.is_processing());
        assert_eq!(state.preview().map(String::as_str), Some("blob:1"));
        assert_eq!(state.notification().unwrap().kind, NotificationKind::Loading);

        let transition = state.update(Action::PredictionSucceeded { session, predictions: five() });
        assert_eq!(transition, Transition::Completed(session));
        assert!(state.is_results_ready());

        let predictions = state.predictions().unwrap();
        assert_eq!(predictions.len(), 5);
        assert_eq!(predictions[0].label, "Pizza");
        assert_eq!(predictions[4].label, "Gnocchi");
        assert_eq!(state.notification().unwrap().message, COMPLETE_MESSAGE);
    }

    #[test]
    fn test_failure_returns_to_idle() {
        let (preview, released) = tracked();
        let mut state = UiState::default();
        let session = started(&mut state, preview);

        let error = PredictError::InvalidResponse(INVALID_RESPONSE_MESSAGE.into());
        let transition = state.update(Action::PredictionFailed { session, error });
        assert_eq!(transition, Transition::Failed(session));
        assert!(state.is_idle());
        assert!(state.predictions().is_none());
        assert_eq!(released.get(), 1);

        let notification = state.notification().unwrap();
        assert_eq!(notification.kind, NotificationKind::Error);
        assert_eq!(notification.message, "Analysis failed: Invalid response from server");
    }

    #[test]
    fn test_empty_predictions_is_failure() {
        let mut state = UiState::default();
        let session = started(&mut state, "blob:1".to_string());
        let transition = state.update(Action::PredictionSucceeded { session, predictions: vec![] });
        assert_eq!(transition, Transition::Failed(session));
        assert!(state.is_idle());
    }

    #[test]
    fn test_reset_releases_preview() {
        let (preview, released) = tracked();
        let mut state = UiState::default();
        let session = started(&mut state, preview);
        state.update(Action::PredictionSucceeded { session, predictions: five() });
        assert_eq!(released.get(), 0);

        let transition = state.update(Action::Reset);
        assert_eq!(transition, Transition::Reset { released: true });
        assert!(state.is_idle());
        assert!(state.preview().is_none());
        assert!(state.predictions().is_none());
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_resubmit_after_reset_is_fresh_session() {
        let mut state = UiState::default();
        let first = started(&mut state, "food.jpg".to_string());
        state.update(Action::PredictionSucceeded { session: first, predictions: five() });
        state.update(Action::Reset);

        let second = started(&mut state, "food.jpg".to_string());
        assert_ne!(first, second);
        assert!(state.is_processing());
        assert!(state.predictions().is_none());
    }

    #[test]
    fn test_busy_while_processing() {
        let (first, first_released) = tracked();
        let (second, second_released) = tracked();
        let mut state = UiState::default();
        let session = started(&mut state, first);

        assert_eq!(state.update(Action::FileAccepted(second)), Transition::Busy);
        assert_eq!(state.current_session(), Some(session));
        assert_eq!(first_released.get(), 0);
        // 拒否されたプレビューは即座に解放される
        assert_eq!(second_released.get(), 1);
    }

    #[test]
    fn test_new_file_replaces_results() {
        let (first, first_released) = tracked();
        let (second, _) = tracked();
        let mut state = UiState::default();
        let session = started(&mut state, first);
        state.update(Action::PredictionSucceeded { session, predictions: five() });

        let next = started(&mut state, second);
        assert_ne!(next, session);
        assert!(state.is_processing());
        assert_eq!(first_released.get(), 1);
    }

    #[test]
    fn test_stale_completion_ignored_after_reset() {
        let mut state = UiState::default();
        let session = started(&mut state, "blob:1".to_string());
        state.update(Action::Reset);

        let transition = state.update(Action::PredictionSucceeded { session, predictions: five() });
        assert_eq!(transition, Transition::Stale(session));
        assert!(state.is_idle());

        let error = PredictError::NetworkFailure("aborted".into());
        assert_eq!(
            state.update(Action::PredictionFailed { session, error }),
            Transition::Stale(session)
        );
        assert!(state.notification().is_none());
    }

    #[test]
    fn test_stale_completion_does_not_touch_new_session() {
        let mut state = UiState::default();
        let old = started(&mut state, "blob:1".to_string());
        state.update(Action::Reset);
        let current = started(&mut state, "blob:2".to_string());

        assert_eq!(
            state.update(Action::PredictionSucceeded { session: old, predictions: five() }),
            Transition::Stale(old)
        );
        assert_eq!(state.current_session(), Some(current));
        assert!(state.is_processing());
    }

    #[test]
    fn test_reset_in_idle_is_noop() {
        let mut state: UiState<String> = UiState::default();
        assert_eq!(state.update(Action::Reset), Transition::Unchanged);
        assert!(state.is_idle());
    }

    #[test]
    fn test_theme_and_drag_hover() {
        let mut state: UiState<String> = UiState::new(Theme::Light);
        state.update(Action::ToggleTheme);
        assert_eq!(state.theme(), Theme::Dark);

        state.update(Action::DragHover(true));
        assert!(state.drag_hover());
        started(&mut state, "blob:1".to_string());
        assert!(!state.drag_hover());

        state.update(Action::DragHover(true));
        assert!(!state.drag_hover());
    }

    #[test]
    fn test_notify_keeps_view() {
        let mut state = UiState::default();
        let session = started(&mut state, "blob:1".to_string());
        state.update(Action::PredictionSucceeded { session, predictions: five() });

        let transition = state.update(Action::Notify(Notification::success("copied")));
        assert_eq!(transition, Transition::Unchanged);
        assert!(state.is_results_ready());
        assert_eq!(state.notification().unwrap().message, "copied");

        state.update(Action::DismissNotification);
        assert!(state.notification().is_none());
    }

    #[test]
    fn test_theme_from_str() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert!("blue".parse::<Theme>().is_err());
    }

    #[test]
    fn test_state_serializes() {
        let mut state = UiState::default();
        let session = started(&mut state, "blob:1".to_string());
        state.update(Action::PredictionSucceeded { session, predictions: five() });

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["view"]["state"], "resultsReady");
        assert_eq!(json["view"]["preview"], "blob:1");
        assert_eq!(json["theme"], "dark");

        let restored: UiState<String> = serde_json::from_value(json).unwrap();
        assert_eq!(restored, state);
    }
}
