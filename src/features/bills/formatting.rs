// 一覧表示用の整形処理

use super::models::{Bill, BillRow, BillStatus};
use crate::shared::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

/// フランス語の月略称（先頭3文字を大文字始まりにしたもの）
const MONTHS_FR: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// YYYY-MM-DD形式の日付を表示用に整形する
///
/// "2004-04-04" → "4 Avr. 04"
pub fn format_date(raw: &str) -> AppResult<String> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| AppError::Validation(format!("日付の形式が不正です: {raw} ({e})")))?;

    let month = MONTHS_FR[date.month0() as usize];
    let year = date.year().rem_euclid(100);
    Ok(format!("{} {month}. {year:02}", date.day()))
}

/// ステータスの表示ラベル
pub fn format_status(status: BillStatus) -> &'static str {
    status.label()
}

/// 日付の新しい順に並べ替える
///
/// 文字列比較で並べるため、YYYY-MM-DD形式でなければ順序は保証されない。
pub fn sort_by_date_desc(bills: &mut [Bill]) {
    bills.sort_by(|a, b| b.date.cmp(&a.date));
}

/// 経費を一覧表示用の行に変換する
///
/// 日付が整形できない場合は元の値のまま表示する（行は落とさない）。
pub fn to_row(bill: Bill) -> BillRow {
    let date = match format_date(&bill.date) {
        Ok(formatted) => formatted,
        Err(e) => {
            log::warn!("日付を整形できませんでした: bill_id={}, error={e}", bill.id);
            bill.date.clone()
        }
    };

    BillRow {
        status_label: format_status(bill.status).to_string(),
        id: bill.id,
        bill_type: bill.bill_type,
        name: bill.name,
        date,
        raw_date: bill.date,
        amount: bill.amount,
        status: bill.status,
        file_url: bill.file_url,
    }
}

/// 並べ替えてから行に変換する
pub fn to_sorted_rows(mut bills: Vec<Bill>) -> Vec<BillRow> {
    sort_by_date_desc(&mut bills);
    bills.into_iter().map(to_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn bill_on(date: &str) -> Bill {
        let mut bill = Bill::draft(format!("id-{date}"), "a@a".to_string(), None, None);
        bill.date = date.to_string();
        bill
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2004-04-04").unwrap(), "4 Avr. 04");
        assert_eq!(format_date("2001-01-01").unwrap(), "1 Jan. 01");
        assert_eq!(format_date("2022-12-25").unwrap(), "25 Déc. 22");
        assert_eq!(format_date("1999-08-15").unwrap(), "15 Aoû. 99");
    }

    #[test]
    fn test_format_date_rejects_other_formats() {
        assert!(format_date("04/04/2004").is_err());
        assert!(format_date("").is_err());
        assert!(format_date("2004-13-01").is_err());
    }

    #[test]
    fn test_to_row_keeps_raw_date_when_unparsable() {
        let row = to_row(bill_on("hier"));
        assert_eq!(row.date, "hier");
        assert_eq!(row.raw_date, "hier");
        assert_eq!(row.status_label, "En attente");
    }

    #[test]
    fn test_sorted_rows_most_recent_first() {
        let rows = to_sorted_rows(vec![
            bill_on("2001-01-01"),
            bill_on("2004-04-04"),
            bill_on("2003-03-03"),
            bill_on("2002-02-02"),
        ]);
        let dates: Vec<&str> = rows.iter().map(|r| r.raw_date.as_str()).collect();
        assert_eq!(dates, vec!["2004-04-04", "2003-03-03", "2002-02-02", "2001-01-01"]);
        assert_eq!(rows[0].date, "4 Avr. 04");
    }

    #[quickcheck]
    fn prop_sorted_dates_are_non_increasing(days: Vec<u16>) -> bool {
        let base = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let mut bills: Vec<Bill> = days
            .iter()
            .map(|d| {
                let date = base + chrono::Duration::days(i64::from(*d) * 7);
                bill_on(&date.format("%Y-%m-%d").to_string())
            })
            .collect();

        sort_by_date_desc(&mut bills);
        bills.windows(2).all(|pair| pair[0].date >= pair[1].date)
    }
}
