use serde_json::{Map, Value};
use tracing::debug;

use super::resolve::{first_array, first_int, first_money, first_object, first_text, scalar_int, unwrap_envelope};
use super::tables::*;
use crate::model::{DueSummary, Ledger, LedgerEntry, MonthRecord};

/// Member ledger for one year, with its embedded due summary when the backend sends one.
pub fn ledger(raw: &Value) -> Ledger {
    let Some(root) = unwrap_envelope(raw).as_object() else {
        return Ledger::default();
    };
    Ledger {
        year: first_year(root, LEDGER_YEAR_KEYS),
        available_years: years(root),
        months: months(first_array(root, LEDGER_MONTHS_KEYS)),
        year_total: first_money(root, YEAR_TOTAL_KEYS),
        lifetime_total: first_money(root, LIFETIME_TOTAL_KEYS),
        due: first_object(root, EMBEDDED_DUE_KEYS).map(due_summary_in),
    }
}

/// Due summary. The `summary` object may be missing, in which case the root carries it.
pub fn due_summary(raw: &Value) -> DueSummary {
    match unwrap_envelope(raw).as_object() {
        Some(root) => due_summary_in(root),
        None => DueSummary::default(),
    }
}

fn due_summary_in(root: &Map<String, Value>) -> DueSummary {
    let summary = first_object(root, DUE_SUMMARY_KEYS).unwrap_or(root);
    DueSummary {
        year: first_year(root, DUE_YEAR_KEYS),
        available_years: years(root),
        total: first_money(summary, DUE_TOTAL_KEYS),
        months: months(first_array(summary, DUE_MONTHS_KEYS)),
    }
}

pub(crate) fn months(list: Option<&Vec<Value>>) -> Vec<MonthRecord> {
    let mut out: Vec<MonthRecord> = list
        .map(|items| items.iter().filter_map(Value::as_object).filter_map(month_record).collect())
        .unwrap_or_default();
    // stable: equal (year, month) keep backend order
    out.sort_by_key(|m| (m.year.unwrap_or(i32::MIN), m.month));
    out
}

fn month_record(obj: &Map<String, Value>) -> Option<MonthRecord> {
    let mut year = first_year(obj, MONTH_YEAR_KEYS);
    let month = match first_int(obj, MONTH_KEYS) {
        Some(m) => Some(m),
        // "2025-03" style period strings
        None => first_text(obj, MONTH_KEYS).and_then(|s| {
            let (y, m) = s.split_once('-')?;
            let m: i64 = m.parse().ok()?;
            if year.is_none() {
                year = y.parse().ok();
            }
            Some(m)
        }),
    };
    let month = match month.filter(|m| (1..=12).contains(m)) {
        Some(m) => m as u32,
        None => {
            debug!(target: "society::normalize", keys = ?obj.keys().collect::<Vec<_>>(), "dropping month record without a usable month");
            return None;
        }
    };
    Some(MonthRecord {
        year,
        month,
        label: first_text(obj, MONTH_LABEL_KEYS),
        base_amount: first_money(obj, BASE_AMOUNT_KEYS),
        total_amount: first_money(obj, TOTAL_AMOUNT_KEYS),
        entries: first_array(obj, ENTRIES_KEYS)
            .map(|items| items.iter().filter_map(Value::as_object).map(ledger_entry).collect())
            .unwrap_or_default(),
    })
}

pub(crate) fn ledger_entry(obj: &Map<String, Value>) -> LedgerEntry {
    LedgerEntry {
        id: first_int(obj, ENTRY_ID_KEYS),
        base_amount: first_money(obj, BASE_AMOUNT_KEYS),
        total_amount: first_money(obj, TOTAL_AMOUNT_KEYS),
        kind: first_text(obj, ENTRY_KIND_KEYS),
        deposited_at: first_text(obj, ENTRY_AT_KEYS),
        notes: first_text(obj, ENTRY_NOTES_KEYS),
    }
}

fn first_year(obj: &Map<String, Value>, keys: &[&str]) -> Option<i32> {
    first_int(obj, keys).and_then(|y| i32::try_from(y).ok())
}

/// Backend order, duplicates and unparseable values dropped.
fn years(root: &Map<String, Value>) -> Vec<i32> {
    let mut out: Vec<i32> = Vec::new();
    if let Some(list) = first_array(root, AVAILABLE_YEARS_KEYS) {
        for y in list.iter().filter_map(scalar_int).filter_map(|y| i32::try_from(y).ok()) {
            if !out.contains(&y) {
                out.push(y);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Money;
    use serde_json::json;

    fn sample_ledger() -> Value {
        json!({
            "year": 2025,
            "available_years": [2025, "2024", 2024, "n/a", 2023],
            "monthly_data": [
                {"month": 3, "label": "March", "total": 1000,
                 "entries": [{"id": 11, "base_amount": 500, "total_amount": "500.00", "type": "deposit",
                              "deposited_at_local": "2025-03-02 10:00", "notes": " first "}]},
                {"month": 1, "total": "750.5", "entries": []},
                {"month": 13, "total": 1},
                {"label": "no month"}
            ],
            "year_total": 1750.5,
            "lifetime_total": "12,000",
            "due_summary": {"total": 500, "months": [{"year": 2025, "month": 2, "base_amount": 500, "amount": 500}]}
        })
    }

    #[test]
    fn ledger_shape() {
        let l = ledger(&sample_ledger());
        assert_eq!(l.year, Some(2025));
        assert_eq!(l.available_years, vec![2025, 2024, 2023]);
        assert_eq!(l.months.iter().map(|m| m.month).collect::<Vec<_>>(), vec![1, 3]);
        let march = &l.months[1];
        assert_eq!(march.label.as_deref(), Some("March"));
        assert_eq!(march.total_amount, Some(Money::from_cents(100_000)));
        assert_eq!(march.entries[0].id, Some(11));
        assert_eq!(march.entries[0].kind.as_deref(), Some("deposit"));
        assert_eq!(march.entries[0].notes.as_deref(), Some("first"));
        assert_eq!(l.months[0].label, None);
        assert_eq!(l.year_total, Some(Money::from_cents(175_050)));
        assert_eq!(l.lifetime_total, Some(Money::from_cents(1_200_000)));
        let due = l.due.as_ref().unwrap();
        assert_eq!(due.total, Some(Money::from_cents(50_000)));
        assert_eq!(due.months[0].total_amount, Some(Money::from_cents(50_000)));
        assert_eq!(due.months[0].base_amount, Some(Money::from_cents(50_000)));
    }

    #[test]
    fn ledger_idempotent() {
        let l = ledger(&sample_ledger());
        assert_eq!(ledger(&l.to_raw()), l);
    }

    #[test]
    fn due_summary_nested_and_flat_agree() {
        let nested = json!({"selected_year": 2025, "available_years": [2025], "summary": {"total": "900", "months": [
            {"year": 2025, "month": 5, "base_amount": 450, "amount": 450},
            {"year": 2024, "month": 12, "base_amount": 450, "amount": 450}
        ]}});
        let flat = json!({"data": {"year": "2025", "availableYears": [2025], "total_due": 900, "due_months": [
            {"year": 2025, "month_no": "5", "baseAmount": "450", "totalAmount": "450"},
            {"month": "2024-12", "base": 450, "total": 450}
        ]}});
        let a = due_summary(&nested);
        assert_eq!(a, due_summary(&flat));
        assert_eq!(a.months.iter().map(|m| (m.year, m.month)).collect::<Vec<_>>(), vec![(Some(2024), 12), (Some(2025), 5)]);
        assert_eq!(due_summary(&a.to_raw()), a);
    }

    #[test]
    fn unexpected_shapes_are_empty() {
        assert_eq!(ledger(&json!([1, 2])), Ledger::default());
        assert_eq!(due_summary(&Value::Null), DueSummary::default());
        let l = ledger(&json!({"monthly_data": "oops", "year": "twenty"}));
        assert!(l.months.is_empty());
        assert_eq!(l.year, None);
    }

    #[test]
    fn months_under_data_array() {
        let l = ledger(&json!({"year": 2024, "data": [{"month": 2, "total": 10}]}));
        assert_eq!(l.months.len(), 1);
        assert_eq!(l.months[0].month, 2);
    }
}
