use crate::features::router::Route;

/// コントローラーがイベント処理の結果として返す画面操作
///
/// コントローラー自身は画面を直接操作しない。呼び出し側（ルーターや
/// ブラウザ側のディスパッチャ）がこの値を解釈して反映する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// 指定したルートへ遷移する
    Navigate(Route),
    /// モーダルに本文を差し込んで表示する
    ShowModal { modal_id: String, body_html: String },
}
