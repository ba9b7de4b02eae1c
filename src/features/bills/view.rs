// 経費一覧画面の描画

use super::controller::PROOF_MODAL_ID;
use super::models::BillRow;
use crate::shared::ui::escape_html;
use crate::shared::ui::layout::{vertical_layout, NavIcon};

/// 領収書モーダルの本文
pub fn render_proof_modal_body(bill_url: &str, image_width: u32) -> String {
    format!(
        "<div style=\"text-align: center;\" class=\"bill-proof-container\">\
<img width=\"{image_width}\" src=\"{}\" alt=\"Bill\" /></div>",
        escape_html(bill_url)
    )
}

fn render_row(row: &BillRow) -> String {
    let bill_url = row.file_url.as_deref().unwrap_or_default();
    format!(
        "<tr>\
<td>{}</td><td>{}</td><td>{}</td><td>{} €</td><td>{}</td>\
<td><div class=\"icon-actions\">\
<div id=\"eye\" data-testid=\"icon-eye\" data-bill-url=\"{}\"></div>\
</div></td>\
</tr>",
        escape_html(&row.bill_type),
        escape_html(&row.name),
        escape_html(&row.date),
        row.amount,
        escape_html(&row.status_label),
        escape_html(bill_url),
    )
}

/// 領収書モーダル（本文はクリック時に差し込まれる）
fn render_modal(body_html: Option<&str>) -> String {
    format!(
        "<div class=\"modal fade\" id=\"{PROOF_MODAL_ID}\" data-testid=\"{PROOF_MODAL_ID}\" \
tabindex=\"-1\" role=\"dialog\" aria-hidden=\"true\">\
<div class=\"modal-dialog modal-dialog-centered modal-lg\" role=\"document\">\
<div class=\"modal-content\">\
<div class=\"modal-header\"><h5 class=\"modal-title\">Justificatif</h5></div>\
<div class=\"modal-body\">{}</div>\
</div></div></div>",
        body_html.unwrap_or_default()
    )
}

/// 経費一覧画面を描画する
///
/// # 引数
/// * `rows` - 表示順に並んだ行（並べ替えはコントローラー側で済ませる）
/// * `modal_body` - 表示中の領収書モーダルの本文
pub fn render_bills_page(rows: &[BillRow], modal_body: Option<&str>) -> String {
    let body: String = rows.iter().map(render_row).collect();

    format!(
        "<div class=\"layout\">{}\
<div class=\"content\">\
<div class=\"content-header\">\
<div class=\"content-title\"> Mes notes de frais </div>\
<button type=\"button\" data-testid=\"btn-new-bill\" class=\"btn btn-primary\">Nouvelle note de frais</button>\
</div>\
<div id=\"data-table\"><table id=\"bills-table\" class=\"table table-striped\" style=\"width:100%\">\
<thead><tr><th>Type</th><th>Nom</th><th>Date</th><th>Montant</th><th>Statut</th><th>Actions</th></tr></thead>\
<tbody data-testid=\"tbody\">{body}</tbody>\
</table></div>\
</div>{}</div>",
        vertical_layout(120, Some(NavIcon::Window)),
        render_modal(modal_body)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::bills::formatting::to_sorted_rows;
    use crate::features::bills::memory_store::sample_bills;

    #[test]
    fn test_rows_rendered_in_given_order() {
        let rows = to_sorted_rows(sample_bills());
        let html = render_bills_page(&rows, None);

        let positions: Vec<usize> = ["4 Avr. 04", "3 Mar. 03", "2 Fév. 02", "1 Jan. 01"]
            .iter()
            .map(|date| html.find(date).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_page_structure() {
        let rows = to_sorted_rows(sample_bills());
        let html = render_bills_page(&rows, None);

        assert!(html.contains("Mes notes de frais"));
        assert!(html.contains(r#"data-testid="btn-new-bill""#));
        assert!(html.contains(r#"data-testid="modaleFile""#));
        assert!(html.contains(r#"data-testid="icon-window" class="active-icon""#));
        assert_eq!(html.matches(r#"data-testid="icon-eye""#).count(), 4);
        assert_eq!(html.matches(">Refused<").count(), 2);
        assert!(html.contains("400 €"));
    }

    #[test]
    fn test_modal_body_is_embedded() {
        let body = render_proof_modal_body("https://test.storage.tld/a.png", 400);
        let html = render_bills_page(&[], Some(&body));
        assert!(html.contains(r#"<img width="400" src="https://test.storage.tld/a.png""#));
    }
}
