use crate::shared::config::environment::{get_environment, Environment};
use crate::shared::errors::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};

/// アプリケーションのデータディレクトリ名
const APP_DIR_NAME: &str = "billed";

/// セッションファイル名
const SESSION_FILE_NAME: &str = "session.json";

/// アプリケーションデータディレクトリを取得・作成する
///
/// 開発環境では `billed-dev` を使い、本番のセッションを汚さない。
pub fn ensure_app_data_directory() -> AppResult<PathBuf> {
    let base = dirs::data_dir()
        .ok_or_else(|| AppError::configuration("データディレクトリを特定できません"))?;
    let dir_name = match get_environment() {
        Environment::Development => format!("{APP_DIR_NAME}-dev"),
        Environment::Production => APP_DIR_NAME.to_string(),
    };

    let app_data_dir = base.join(dir_name);
    create_dir_if_missing(&app_data_dir)?;
    Ok(app_data_dir)
}

/// セッションファイルのパスを解決する
///
/// # 解決順序
/// 1. 環境変数 BILLED_SESSION_FILE
/// 2. アプリケーションデータディレクトリ配下の session.json
pub fn resolve_session_file_path() -> AppResult<PathBuf> {
    if let Ok(path) = crate::get_env_var!("BILLED_SESSION_FILE") {
        log::debug!("セッションファイルを環境変数から取得しました: {path}");
        return Ok(PathBuf::from(path));
    }

    Ok(ensure_app_data_directory()?.join(SESSION_FILE_NAME))
}

fn create_dir_if_missing(dir: &Path) -> AppResult<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        log::info!("データディレクトリを作成しました: {}", dir.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dir_if_missing() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("a").join("b");

        create_dir_if_missing(&nested).unwrap();
        assert!(nested.is_dir());

        // 既存ディレクトリでも成功する
        create_dir_if_missing(&nested).unwrap();
    }
}
