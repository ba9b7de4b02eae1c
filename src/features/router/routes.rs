use crate::shared::ui::layout::NavIcon;

/// 画面のルート
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// ログイン画面（既定）
    #[default]
    Login,
    /// 経費一覧
    Bills,
    /// 経費作成
    NewBill,
}

impl Route {
    /// ルートのパス（ハッシュ）
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Bills => "#employee/bills",
            Route::NewBill => "#employee/bill/new",
        }
    }

    /// パスからルートを解決する（不明なパスはログイン画面）
    pub fn from_path(path: &str) -> Self {
        match path.trim() {
            "#employee/bills" => Route::Bills,
            "#employee/bill/new" => Route::NewBill,
            "" | "/" => Route::Login,
            other => {
                log::debug!("不明なパスのためログイン画面を表示します: {other}");
                Route::Login
            }
        }
    }

    /// 縦型ナビゲーションで強調するアイコン
    pub fn active_icon(&self) -> Option<NavIcon> {
        match self {
            Route::Login => None,
            Route::Bills => Some(NavIcon::Window),
            Route::NewBill => Some(NavIcon::Mail),
        }
    }

    /// 従業員のログインが必要か
    pub fn requires_employee(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_paths() {
        for route in [Route::Login, Route::Bills, Route::NewBill] {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }

    #[test]
    fn test_unknown_path_falls_back_to_login() {
        assert_eq!(Route::from_path("#admin/dashboard"), Route::Login);
        assert_eq!(Route::from_path(""), Route::Login);
    }

    #[test]
    fn test_active_icons() {
        assert_eq!(Route::Bills.active_icon(), Some(NavIcon::Window));
        assert_eq!(Route::NewBill.active_icon(), Some(NavIcon::Mail));
        assert_eq!(Route::Login.active_icon(), None);
    }
}
