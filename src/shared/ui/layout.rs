/// 縦型ナビゲーションのアイコン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIcon {
    /// 経費一覧（ウィンドウアイコン）
    Window,
    /// 経費作成（メールアイコン）
    Mail,
}

/// アクティブなアイコンに付与するCSSクラス
pub const ACTIVE_ICON_CLASS: &str = "active-icon";

impl NavIcon {
    /// テスト用の識別子（`data-testid`）
    pub fn test_id(&self) -> &'static str {
        match self {
            NavIcon::Window => "icon-window",
            NavIcon::Mail => "icon-mail",
        }
    }

    fn element_id(&self) -> &'static str {
        match self {
            NavIcon::Window => "layout-icon1",
            NavIcon::Mail => "layout-icon2",
        }
    }
}

fn render_icon(icon: NavIcon, active: Option<NavIcon>) -> String {
    let class = if active == Some(icon) {
        format!(" class=\"{ACTIVE_ICON_CLASS}\"")
    } else {
        String::new()
    };
    format!(
        "<div id=\"{}\" data-testid=\"{}\"{class}></div>",
        icon.element_id(),
        icon.test_id()
    )
}

/// 縦型ナビゲーションバーを描画する
///
/// # 引数
/// * `height` - バーの高さ（vh）
/// * `active` - 強調表示するアイコン
pub fn vertical_layout(height: u32, active: Option<NavIcon>) -> String {
    format!(
        "<div class=\"vertical-navbar\" style=\"height: {height}vh;\">\
<div class=\"layout-title\"><span>Billed</span></div>\
{}{}\
<div id=\"layout-disconnect\"></div>\
</div>",
        render_icon(NavIcon::Window, active),
        render_icon(NavIcon::Mail, active),
    )
}
