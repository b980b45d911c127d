//! アップロードセッションの実行
//!
//! ファイル受け入れ → Processing → 予測API → ResultsReady/Idle の流れを
//! `UiState` の遷移として進め、遷移ごとに表示側へ通知する。
//! 同時に走るセッションは常に1つ。

use crate::client::Predictor;
use crate::error::Result;
use crate::render::Presenter;
use crate::report::{now_rfc3339, SessionOutcome, SessionReport};
use crate::scanner::{self, ImageUpload};
use food_vision_common::api::INVALID_RESPONSE_MESSAGE;
use food_vision_common::{Action, Prediction, PredictError, SessionId, Transition, UiState};
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 1ファイル分のセッションを実行
///
/// `cancel` が先に完了した場合は進行中のリクエストを放棄し、Idleへ戻す。
pub async fn run_session<P, R, C>(
    state: &mut UiState<PathBuf>,
    predictor: &P,
    presenter: &mut R,
    path: &Path,
    cancel: C,
) -> Result<SessionOutcome>
where
    P: Predictor,
    R: Presenter,
    C: Future<Output = ()>,
{
    let upload = match scanner::load_image(path) {
        Ok(Some(upload)) => upload,
        Ok(None) => {
            info!(path = %path.display(), "not an image, ignored");
            return Ok(SessionOutcome::Skipped { reason: "not an image".into() });
        }
        // 読めないファイルはバッチ全体を止めずに飛ばす
        Err(error) => {
            warn!(path = %path.display(), %error, "could not read file, skipped");
            return Ok(SessionOutcome::Skipped { reason: error.to_string() });
        }
    };

    let session = match dispatch(state, presenter, Action::FileAccepted(upload.path.clone())) {
        Transition::Started(session) => session,
        other => {
            warn!(?other, "upload rejected while another session is in flight");
            return Ok(SessionOutcome::Skipped { reason: "busy".into() });
        }
    };
    info!(%session, file = %upload.file_name, mime = %upload.mime, "session started");

    let result = tokio::select! {
        result = predictor.predict(&upload) => result,
        _ = cancel => {
            info!(%session, "cancelled, abandoning in-flight request");
            dispatch(state, presenter, Action::Reset);
            return Ok(SessionOutcome::Cancelled);
        }
    };

    Ok(complete(state, presenter, session, &upload, result))
}

fn complete<R: Presenter>(
    state: &mut UiState<PathBuf>,
    presenter: &mut R,
    session: SessionId,
    upload: &ImageUpload,
    result: std::result::Result<Vec<Prediction>, PredictError>,
) -> SessionOutcome {
    let error = match result {
        Ok(predictions) => {
            match dispatch(state, presenter, Action::PredictionSucceeded { session, predictions }) {
                Transition::Completed(_) => {
                    let predictions = state.predictions().unwrap_or_default().to_vec();
                    info!(%session, count = predictions.len(), "results ready");
                    return SessionOutcome::Completed { predictions };
                }
                _ => PredictError::InvalidResponse(INVALID_RESPONSE_MESSAGE.into()),
            }
        }
        Err(error) => {
            dispatch(state, presenter, Action::PredictionFailed { session, error: error.clone() });
            error
        }
    };

    warn!(%session, file = %upload.file_name, kind = error.kind(), "prediction failed: {}", error);
    SessionOutcome::Failed { error }
}

fn dispatch<R: Presenter>(
    state: &mut UiState<PathBuf>,
    presenter: &mut R,
    action: Action<PathBuf>,
) -> Transition {
    let transition = state.update(action);
    presenter.present(transition, state);
    transition
}

/// 複数ファイルを順番に処理する
///
/// 各セッションの後はResetしてプレビューを解放する。
/// キャンセルされたらそこで打ち切る。
pub async fn run_batch<P, R, F, C>(
    state: &mut UiState<PathBuf>,
    predictor: &P,
    presenter: &mut R,
    paths: &[PathBuf],
    cancel: F,
) -> Result<Vec<SessionReport>>
where
    P: Predictor,
    R: Presenter,
    F: Fn() -> C,
    C: Future<Output = ()>,
{
    let mut reports = Vec::with_capacity(paths.len());

    for path in paths {
        let outcome = run_session(state, predictor, presenter, path, cancel()).await?;
        let cancelled = outcome == SessionOutcome::Cancelled;

        reports.push(SessionReport {
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            file_path: path.display().to_string(),
            analyzed_at: now_rfc3339(),
            outcome,
        });

        dispatch(state, presenter, Action::Reset);

        if cancelled {
            break;
        }
    }

    Ok(reports)
}
