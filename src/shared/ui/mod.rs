//! 画面描画の共通部品
//!
//! ビューはHTML文字列として描画する。テストやブラウザ側のディスパッチャは
//! `data-testid` 属性で要素を特定する。

pub mod effects;
pub mod layout;
pub mod pages;

pub use effects::UiEffect;

/// HTMLの特殊文字をエスケープする
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Hôtel & logement"), "Hôtel &amp; logement");
        assert_eq!(
            escape_html(r#"<img src="x" onerror='y'>"#),
            "&lt;img src=&quot;x&quot; onerror=&#39;y&#39;&gt;"
        );
        assert_eq!(escape_html("2004-04-04"), "2004-04-04");
    }
}
