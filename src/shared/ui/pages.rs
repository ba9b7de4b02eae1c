use super::escape_html;
use super::layout::{vertical_layout, NavIcon};

/// エラーページ
///
/// 上流のエラーメッセージはエスケープのみ行い、文言は変えない。
pub fn error_page(message: &str, active: Option<NavIcon>) -> String {
    format!(
        "<div class=\"layout\">{}<div class=\"content\">\
<div class=\"content-header\"><div class=\"content-title\"> Erreur </div></div>\
<div data-testid=\"error-message\">{}</div>\
</div></div>",
        vertical_layout(120, active),
        escape_html(message)
    )
}

/// ログインページ（セッションがない場合やルート不明時の既定ページ）
pub fn login_page() -> String {
    "<div class=\"login-page\">\
<h2>Employé</h2>\
<form data-testid=\"form-employee\">\
<input type=\"email\" data-testid=\"employee-email-input\" required>\
<input type=\"password\" data-testid=\"employee-password-input\" required>\
<button type=\"submit\" data-testid=\"employee-login-button\">Se connecter</button>\
</form>\
</div>"
        .to_string()
}
