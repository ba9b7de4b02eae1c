/// セッション機能モジュール
///
/// ログイン中のユーザー情報（`user` キー）とAPIトークン（`jwt` キー）を
/// キーバリューストアから読み出す。コントローラーへは読み出した
/// `CurrentUser` を構築時に渡す。
pub mod models;
pub mod store;

pub use models::{CurrentUser, UserType};
pub use store::{
    load_current_user, load_token, save_current_user, FileSessionStore, MemorySessionStore,
    SessionStore, TOKEN_KEY, USER_KEY,
};
