use serde::{Deserialize, Deserializer, Serialize};

/// 経費の承認ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    /// 画面表示用のラベル
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Pending => "En attente",
            BillStatus::Accepted => "Accepté",
            BillStatus::Refused => "Refused",
        }
    }
}

/// 既定のVAT率（%）
pub const DEFAULT_PCT: u32 = 20;

/// 経費データモデル（ノート・ド・フレ）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// ストアが採番するID（下書き作成前は空）
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub email: String,
    /// 経費カテゴリ（"Transports"、"Hôtel et logement" など）
    #[serde(rename = "type", default)]
    pub bill_type: String,
    #[serde(default, deserialize_with = "de_nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "de_nullable_string")]
    pub commentary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_admin: Option<String>,
    /// YYYY-MM-DD形式
    #[serde(default, deserialize_with = "de_nullable_string")]
    pub date: String,
    #[serde(default, deserialize_with = "de_amount")]
    pub amount: f64,
    #[serde(default, deserialize_with = "de_optional_number")]
    pub vat: Option<f64>,
    #[serde(default = "default_pct", deserialize_with = "de_pct")]
    pub pct: u32,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub status: BillStatus,
}

impl Bill {
    /// ストアに登録された直後の下書き
    pub fn draft(
        id: String,
        email: String,
        file_url: Option<String>,
        file_name: Option<String>,
    ) -> Self {
        Self {
            id,
            email,
            bill_type: String::new(),
            name: String::new(),
            commentary: String::new(),
            comment_admin: None,
            date: String::new(),
            amount: 0.0,
            vat: None,
            pct: DEFAULT_PCT,
            file_url,
            file_name,
            status: BillStatus::Pending,
        }
    }
}

/// 領収書ファイル（フォームで選択されたファイル）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptFile {
    /// ファイル名（拡張子の判定に使う）
    pub name: String,
    /// 申告されたMIMEタイプ（判定には使わない）
    pub content_type: String,
    pub data: Vec<u8>,
}

impl ReceiptFile {
    pub fn new<N: Into<String>, C: Into<String>>(name: N, content_type: C, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data,
        }
    }
}

/// 経費の下書き作成リクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBillDraft {
    pub email: String,
    pub file: Option<ReceiptFile>,
}

/// 一覧表示用の行
#[derive(Debug, Clone, PartialEq)]
pub struct BillRow {
    pub id: String,
    pub bill_type: String,
    pub name: String,
    /// 表示用に整形した日付（整形できない場合は元の値）
    pub date: String,
    /// 並び替えに使った元の日付
    pub raw_date: String,
    pub amount: f64,
    pub status: BillStatus,
    pub status_label: String,
    pub file_url: Option<String>,
}

fn default_pct() -> u32 {
    DEFAULT_PCT
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn lenient_number(value: Option<NumberOrText>) -> Option<f64> {
    match value {
        Some(NumberOrText::Number(n)) => Some(n),
        Some(NumberOrText::Text(text)) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite()),
        None => None,
    }
}

// 数値・数値文字列・空文字・nullのいずれも受け付ける
fn de_optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(Option::<NumberOrText>::deserialize(deserializer)?))
}

fn de_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_optional_number(deserializer)?.unwrap_or(0.0))
}

fn de_pct<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = de_optional_number(deserializer)? else {
        return Ok(DEFAULT_PCT);
    };

    if raw >= 0.0 && raw.fract() == 0.0 && raw <= f64::from(u32::MAX) {
        Ok(raw as u32)
    } else {
        log::warn!("VAT率が不正なため既定値{DEFAULT_PCT}を使用します: {raw}");
        Ok(DEFAULT_PCT)
    }
}

fn de_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BILL_JSON: &str = r#"{
        "id": "47qAXb6fIm2zOKkLzMro",
        "vat": "80",
        "fileUrl": "https://test.storage.tld/preview-facture-free-201801-pdf-1.jpg",
        "status": "pending",
        "type": "Hôtel et logement",
        "commentary": "séminaire billed",
        "name": "encore",
        "fileName": "preview-facture-free-201801-pdf-1.jpg",
        "date": "2004-04-04",
        "amount": 400,
        "commentAdmin": "ok",
        "email": "a@a",
        "pct": 20
    }"#;

    #[test]
    fn test_bill_deserialization() {
        let bill: Bill = serde_json::from_str(BILL_JSON).unwrap();
        assert_eq!(bill.id, "47qAXb6fIm2zOKkLzMro");
        assert_eq!(bill.bill_type, "Hôtel et logement");
        assert_eq!(bill.vat, Some(80.0));
        assert_eq!(bill.amount, 400.0);
        assert_eq!(bill.pct, 20);
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.comment_admin.as_deref(), Some("ok"));
    }

    #[test]
    fn test_bill_serialization_uses_wire_names() {
        let bill: Bill = serde_json::from_str(BILL_JSON).unwrap();
        let json = serde_json::to_string(&bill).unwrap();
        assert!(json.contains("\"type\":\"Hôtel et logement\""));
        assert!(json.contains("\"fileUrl\":"));
        assert!(json.contains("\"commentAdmin\":\"ok\""));
        assert!(json.contains("\"status\":\"pending\""));
    }

    #[test]
    fn test_lenient_numeric_fields() {
        let bill: Bill = serde_json::from_str(
            r#"{"date":"2001-01-01","amount":"100","vat":"","pct":null,"status":"refused"}"#,
        )
        .unwrap();
        assert_eq!(bill.amount, 100.0);
        assert_eq!(bill.vat, None);
        assert_eq!(bill.pct, DEFAULT_PCT);
        assert_eq!(bill.status, BillStatus::Refused);
        assert_eq!(bill.id, "");
    }

    #[test]
    fn test_invalid_pct_falls_back_to_default() {
        for pct in ["20.5", "-1", "1e12", "\"NaN\""] {
            let bill: Bill =
                serde_json::from_str(&format!(r#"{{"date":"2001-01-01","pct":{pct}}}"#)).unwrap();
            assert_eq!(bill.pct, DEFAULT_PCT, "pct={pct}");
        }

        let bill: Bill = serde_json::from_str(r#"{"date":"2001-01-01","pct":"10"}"#).unwrap();
        assert_eq!(bill.pct, 10);
    }

    #[test]
    fn test_null_text_fields() {
        let bill: Bill =
            serde_json::from_str(r#"{"date":null,"name":null,"commentary":null}"#).unwrap();
        assert_eq!(bill.date, "");
        assert_eq!(bill.name, "");
        assert_eq!(bill.commentary, "");
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(BillStatus::Pending.label(), "En attente");
        assert_eq!(BillStatus::Accepted.label(), "Accepté");
        assert_eq!(BillStatus::Refused.label(), "Refused");
    }

    #[test]
    fn test_draft_has_no_id_in_json() {
        let draft = Bill::draft(String::new(), "a@a".to_string(), None, None);
        let json = serde_json::to_string(&draft).unwrap();
        assert!(!json.contains("\"id\""));
        assert_eq!(draft.pct, DEFAULT_PCT);
    }
}
