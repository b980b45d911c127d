//! Food Vision Common Library
//!
//! CLIとWeb(WASM)で共有される型・レスポンス解釈・セッション状態

pub mod api;
pub mod acquire;
pub mod error;
pub mod parser;
pub mod presentation;
pub mod session;
pub mod types;

pub use types::{HealthStatus, Prediction, PredictResponse, RawPrediction};
pub use error::{PredictError, Result};
pub use parser::{format_label, interpret_health, interpret_response, to_percentage};
pub use acquire::{accept_first, is_image_mime};
pub use session::{Action, Notification, NotificationKind, SessionId, Theme, Transition, UiState, ViewState};
pub use presentation::{ConfidenceTier, ResultCard, Screen, result_cards, summary_text};
