// 領収書ファイルの検証

use crate::shared::errors::{AppError, AppResult};
use std::path::Path;

/// 受け付ける拡張子（小文字）
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// ファイル名から拡張子を小文字で取得する
pub fn file_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
}

/// 領収書のファイル形式を検証する
///
/// 判定はファイル名の拡張子のみで行い、申告されたMIMEタイプは見ない。
pub fn validate_receipt_file_name(file_name: &str) -> AppResult<()> {
    let extension = file_extension(file_name)
        .ok_or_else(|| AppError::validation("ファイル拡張子が取得できません"))?;

    if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::Validation(format!(
            "サポートされていないファイル形式です（JPG、JPEG、PNGのみ対応）: {file_name}"
        )));
    }

    Ok(())
}

/// ファイル名からContent-Typeを推定する
pub fn content_type_for(file_name: &str) -> &'static str {
    match file_extension(file_name).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}
