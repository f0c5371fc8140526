use serde_json::{Map, Value};

use super::entities::member_from;
use super::ledger::{ledger_entry, months};
use super::resolve::{first_array, first_int, first_money, first_object, resolve_entity_in, unwrap_envelope};
use super::tables::*;
use crate::model::{DepositRecord, MemberDue, Member, Page};

pub fn member_page(raw: &Value) -> Page<Member> {
    page(raw, |item| member_from(resolve_entity_in(item, &MEMBER)))
}

pub fn deposit_page(raw: &Value) -> Page<DepositRecord> {
    page(raw, |item| DepositRecord {
        member: member_from(resolve_entity_in(item, &MEMBER)),
        entry: ledger_entry(item),
    })
}

pub fn member_due_page(raw: &Value) -> Page<MemberDue> {
    page(raw, |item| MemberDue {
        member: member_from(resolve_entity_in(item, &MEMBER)),
        total_due: first_money(item, MEMBER_DUE_TOTAL_KEYS),
        months: months(first_array(item, DUE_MONTHS_KEYS)),
    })
}

/// Items from a bare array root or the first items key; non-object rows are skipped.
fn page<T>(raw: &Value, item: impl Fn(&Map<String, Value>) -> T) -> Page<T> {
    let root = unwrap_envelope(raw);
    let (rows, obj) = match root {
        Value::Array(list) => (Some(list), None),
        Value::Object(o) => (first_array(o, PAGE_ITEMS_KEYS), Some(o)),
        _ => (None, None),
    };
    let items = rows
        .map(|list| list.iter().filter_map(Value::as_object).map(&item).collect())
        .unwrap_or_default();
    let meta = |keys: &[&str]| -> Option<i64> {
        let o = obj?;
        first_int(o, keys).or_else(|| first_object(o, PAGE_META_KEYS).and_then(|m| first_int(m, keys)))
    };
    Page {
        items,
        current_page: meta(CURRENT_PAGE_KEYS).and_then(|v| u32::try_from(v).ok()),
        last_page: meta(LAST_PAGE_KEYS).and_then(|v| u32::try_from(v).ok()),
        per_page: meta(PER_PAGE_KEYS).and_then(|v| u32::try_from(v).ok()),
        total: meta(TOTAL_ITEMS_KEYS).and_then(|v| u64::try_from(v).ok()),
    }
}
