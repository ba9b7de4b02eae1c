use super::models::CurrentUser;
use crate::shared::errors::{AppError, AppResult};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// ログイン中ユーザーを保存するキー
pub const USER_KEY: &str = "user";

/// APIトークンを保存するキー
pub const TOKEN_KEY: &str = "jwt";

/// セッション情報を保持するキーバリューストア
pub trait SessionStore: Send + Sync {
    /// 値を取得する（存在しない場合はNone）
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// 値を保存する
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// 値を削除する
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// メモリ上のセッションストア
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|e| AppError::session(format!("セッションのロック取得に失敗: {e}")))
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// JSONファイルに保存するセッションストア
///
/// ファイル全体が1つのJSONオブジェクト（キー → 文字列値）になっている。
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    // 読み書きを直列化する
    guard: Mutex<()>,
}

impl FileSessionStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    /// ファイルのパス
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_entries(&self) -> AppResult<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_entries(&self, entries: &HashMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }

    fn with_lock<T>(&self, f: impl FnOnce() -> AppResult<T>) -> AppResult<T> {
        let _guard = self
            .guard
            .lock()
            .map_err(|e| AppError::session(format!("セッションのロック取得に失敗: {e}")))?;
        f()
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.with_lock(|| Ok(self.read_entries()?.get(key).cloned()))
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.with_lock(|| {
            let mut entries = self.read_entries()?;
            entries.insert(key.to_string(), value.to_string());
            self.write_entries(&entries)
        })
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.with_lock(|| {
            let mut entries = self.read_entries()?;
            if entries.remove(key).is_some() {
                self.write_entries(&entries)?;
            }
            Ok(())
        })
    }
}

/// ログイン中のユーザーを読み出す
///
/// # 戻り値
/// ユーザーが保存されていない場合は`Ok(None)`、JSONが壊れている場合はセッションエラー
pub fn load_current_user(store: &dyn SessionStore) -> AppResult<Option<CurrentUser>> {
    match store.get(USER_KEY)? {
        Some(raw) => {
            let user = serde_json::from_str::<CurrentUser>(&raw)
                .map_err(|e| AppError::session(format!("ユーザー情報の解析に失敗: {e}")))?;
            log::debug!("セッションからユーザーを読み込みました: email={}", user.email);
            Ok(Some(user))
        }
        None => Ok(None),
    }
}

/// ログイン中のユーザーを保存する
pub fn save_current_user(store: &dyn SessionStore, user: &CurrentUser) -> AppResult<()> {
    store.set(USER_KEY, &serde_json::to_string(user)?)
}

/// APIトークンを読み出す
pub fn load_token(store: &dyn SessionStore) -> AppResult<Option<String>> {
    store.get(TOKEN_KEY)
}
