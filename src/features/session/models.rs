use serde::{Deserialize, Serialize};

/// ユーザー種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Employee,
    Admin,
}

/// ログイン中のユーザー
///
/// セッションストアには `{"type":"Employee","email":"a@a"}` の形で保存される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[serde(default)]
    pub email: String,
}

impl CurrentUser {
    /// 従業員ユーザーを作成
    pub fn employee<S: Into<String>>(email: S) -> Self {
        Self {
            user_type: UserType::Employee,
            email: email.into(),
        }
    }

    /// 従業員かどうか
    pub fn is_employee(&self) -> bool {
        self.user_type == UserType::Employee
    }
}
