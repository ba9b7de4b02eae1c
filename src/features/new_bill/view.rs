// 経費作成画面の描画

use super::models::{FileInputState, EXPENSE_TYPES};
use super::validation::ACCEPTED_EXTENSIONS;
use crate::shared::ui::escape_html;
use crate::shared::ui::layout::{vertical_layout, NavIcon};

fn render_expense_type_options() -> String {
    EXPENSE_TYPES
        .iter()
        .map(|t| format!("<option>{}</option>", escape_html(t)))
        .collect()
}

fn render_file_input(input: &FileInputState) -> String {
    let class = if input.invalid {
        "form-control blue-border invalid"
    } else {
        "form-control blue-border"
    };
    let accept: Vec<String> = ACCEPTED_EXTENSIONS.iter().map(|e| format!(".{e}")).collect();
    let value = input
        .value
        .as_deref()
        .map(|v| format!(" value=\"{}\"", escape_html(v)))
        .unwrap_or_default();

    format!(
        "<input required type=\"file\" class=\"{class}\" data-testid=\"file\" accept=\"{}\"{value} />",
        accept.join(",")
    )
}

/// 経費作成画面を描画する
pub fn render_new_bill_page(input: &FileInputState) -> String {
    format!(
        "<div class=\"layout\">{}\
<div class=\"content\">\
<div class=\"content-header\"><div class=\"content-title\"> Envoyer une note de frais </div></div>\
<div class=\"form-newbill-container content-inner\">\
<form data-testid=\"form-new-bill\">\
<div class=\"row\"><div class=\"col-md-6\">\
<div class=\"col-half\"><label for=\"expense-type\" class=\"bold-label\">Type de dépense</label>\
<select required class=\"form-control blue-border\" data-testid=\"expense-type\">{}</select></div>\
<div class=\"col-half\"><label for=\"expense-name\" class=\"bold-label\">Nom de la dépense</label>\
<input type=\"text\" class=\"form-control blue-border\" data-testid=\"expense-name\" placeholder=\"Vol Paris Londres\" /></div>\
<div class=\"col-half\"><label for=\"datepicker\" class=\"bold-label\">Date</label>\
<input required type=\"date\" class=\"form-control blue-border\" data-testid=\"datepicker\" /></div>\
<div class=\"col-half\"><label for=\"amount\" class=\"bold-label\">Montant TTC </label>\
<input required type=\"number\" class=\"form-control blue-border input-icon input-icon-right\" data-testid=\"amount\" placeholder=\"348\" /></div>\
<div class=\"col-half-row\">\
<div class=\"flex-col\"><label for=\"vat\" class=\"bold-label\">TVA</label>\
<input type=\"number\" class=\"form-control blue-border\" data-testid=\"vat\" placeholder=\"70\" /></div>\
<div class=\"flex-col\">\
<input required type=\"number\" class=\"form-control blue-border\" data-testid=\"pct\" placeholder=\"20\" /></div>\
</div>\
</div>\
<div class=\"col-md-6\">\
<div class=\"col-half\"><label for=\"commentary\" class=\"bold-label\">Commentaire</label>\
<textarea class=\"form-control blue-border\" data-testid=\"commentary\" rows=\"3\"></textarea></div>\
<div class=\"col-half\"><label for=\"file\" class=\"bold-label\">Justificatif</label>{}</div>\
</div></div>\
<div class=\"row\"><div class=\"col-md-6\"><div class=\"col-half\">\
<button type=\"submit\" id=\"btn-send-bill\" class=\"btn btn-primary\">Envoyer</button>\
</div></div></div>\
</form>\
</div></div></div>",
        vertical_layout(120, Some(NavIcon::Mail)),
        render_expense_type_options(),
        render_file_input(input),
    )
}
