use crate::features::bills::models::{ReceiptFile, DEFAULT_PCT};

/// 経費カテゴリの選択肢
pub const EXPENSE_TYPES: [&str; 7] = [
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

/// 経費作成フォームの入力値（すべて入力欄の文字列のまま）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBillForm {
    /// `expense-type`
    pub expense_type: String,
    /// `expense-name`
    pub expense_name: String,
    /// `datepicker`（YYYY-MM-DD）
    pub date: String,
    pub amount: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

impl Default for NewBillForm {
    fn default() -> Self {
        Self {
            expense_type: EXPENSE_TYPES[0].to_string(),
            expense_name: String::new(),
            date: String::new(),
            amount: String::new(),
            vat: String::new(),
            pct: String::new(),
            commentary: String::new(),
        }
    }
}

impl NewBillForm {
    /// 金額（空・不正な値は0）
    pub fn amount_value(&self) -> f64 {
        match parse_finite(&self.amount) {
            Some(amount) => amount,
            None => {
                if !self.amount.trim().is_empty() {
                    log::warn!("金額を数値に変換できません: {}", self.amount);
                }
                0.0
            }
        }
    }

    /// VAT（空・不正な値はNone）
    pub fn vat_value(&self) -> Option<f64> {
        let vat = parse_finite(&self.vat);
        if vat.is_none() && !self.vat.trim().is_empty() {
            log::warn!("VATを数値に変換できません: {}", self.vat);
        }
        vat
    }

    /// VAT率（空・不正な値は既定値20）
    pub fn pct_value(&self) -> u32 {
        self.pct.trim().parse().unwrap_or(DEFAULT_PCT)
    }
}

// NaN・無限大は不正な値として扱う
fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// ファイル選択欄の表示状態
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileInputState {
    /// `invalid` クラスが付いているか
    pub invalid: bool,
    /// 選択中のファイル名（空ならNone）
    pub value: Option<String>,
}

/// 経費作成画面の状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewBillState {
    /// ファイル未選択
    NoFile,
    /// 有効なファイルを選択済み
    FileSelected(ReceiptFile),
    /// 送信完了
    Submitted,
}
