//! ファイル受け入れルール
//!
//! ドロップ/ファイル選択のどちらでも、先頭の1ファイルだけを見て
//! MIMEタイプが `image/` で始まる場合にのみ受け入れる。

const IMAGE_MIME_PREFIX: &str = "image/";

/// MIMEタイプが画像か（大文字小文字を区別しない）
pub fn is_image_mime(mime: &str) -> bool {
    mime.get(..IMAGE_MIME_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(IMAGE_MIME_PREFIX))
}

/// 候補の先頭1件を受け入れ判定する
///
/// 複数ドロップされた場合も先頭のみを対象にし、
/// それが画像でなければ何も受け入れない（後続は探さない）。
///
/// # Arguments
/// * `files` - ドロップ/選択されたファイル
/// * `mime_of` - ファイルからMIMEタイプを取り出す関数
pub fn accept_first<T, I, F>(files: I, mime_of: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> String,
{
    let first = files.into_iter().next()?;
    if is_image_mime(&mime_of(&first)) {
        Some(first)
    } else {
        None
    }
}
