//! 画像ファイルの取得
//!
//! パス引数（ファイルまたはフォルダ）からアップロード候補を集め、
//! MIMEタイプが画像のものだけを受け入れる。

use crate::error::{FoodVisionError, Result};
use food_vision_common::is_image_mime;
use image::ImageFormat;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 予測APIへ送る1ファイル
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// サーバー側で受け付ける拡張子
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// パスからアップロード候補を集める
///
/// ファイルならそれ1つ、フォルダなら画像拡張子のファイルをファイル名順で返す
pub fn collect_candidates(path: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(FoodVisionError::FileNotFound(path.display().to_string()));
    }

    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut candidates: Vec<PathBuf> = WalkDir::new(path)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| has_image_extension(p))
        .collect();

    candidates.sort_by(|a, b| a.file_name().cmp(&b.file_name()).then_with(|| a.cmp(b)));

    Ok(candidates)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// ファイルのMIMEタイプを判定
///
/// 拡張子から判定し、分からなければ中身から推定する
pub fn detect_mime(path: &Path, bytes: &[u8]) -> Option<String> {
    ImageFormat::from_path(path)
        .or_else(|_| image::guess_format(bytes))
        .ok()
        .map(|format| format.to_mime_type().to_string())
}

/// 画像を読み込む
///
/// # Returns
/// * `Ok(Some(ImageUpload))` - 画像として受け入れた
/// * `Ok(None)` - 画像ではないので無視
pub fn load_image(path: &Path) -> Result<Option<ImageUpload>> {
    if !path.is_file() {
        return Err(FoodVisionError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let mime = match detect_mime(path, &bytes) {
        Some(mime) if is_image_mime(&mime) => mime,
        _ => return Ok(None),
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(Some(ImageUpload {
        path: path.to_path_buf(),
        file_name,
        mime,
        bytes,
    }))
}
