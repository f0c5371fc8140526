//! Canonical records returned to collaborators.
//!
//! Every field the backend did not supply is `None`; nothing here substitutes empty strings
//! or zeroes. `to_raw()` re-expresses a record in the backend's primary nested shape, so
//! feeding it back through the normalizer reproduces the record.

mod money;

pub use money::Money;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Member {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub national_id: Option<String>,
    pub photo_url: Option<String>,
}

impl Member {
    pub fn is_absent(&self) -> bool { *self == Member::default() }

    pub fn to_raw(&self) -> Value {
        let mut m = Map::new();
        put_text(&mut m, "name", &self.display_name);
        put_text(&mut m, "email", &self.email);
        put_text(&mut m, "phone", &self.phone);
        put_text(&mut m, "nid", &self.national_id);
        put_text(&mut m, "profile_photo_url", &self.photo_url);
        Value::Object(m)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Share {
    pub share_number: Option<String>,
    pub share_amount: Option<String>,
    pub total_deposit: Option<String>,
    /// ISO-8601 text exactly as the backend sent it.
    pub created_at: Option<String>,
}

impl Share {
    pub fn is_absent(&self) -> bool { *self == Share::default() }

    /// Calendar date of `created_at`, accepting RFC 3339, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD`.
    pub fn created_date(&self) -> Option<NaiveDate> {
        let raw = self.created_at.as_deref()?.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.date_naive());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
            return Some(dt.date());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(dt.date());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    pub fn to_raw(&self) -> Value {
        let mut m = Map::new();
        put_text(&mut m, "share_no", &self.share_number);
        put_text(&mut m, "share_amount", &self.share_amount);
        put_text(&mut m, "total_deposit", &self.total_deposit);
        put_text(&mut m, "created_at", &self.created_at);
        Value::Object(m)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Nominee {
    pub name: Option<String>,
    pub national_id: Option<String>,
    pub photo_url: Option<String>,
}

impl Nominee {
    pub fn is_absent(&self) -> bool { *self == Nominee::default() }

    pub fn to_raw(&self) -> Value {
        let mut m = Map::new();
        put_text(&mut m, "name", &self.name);
        put_text(&mut m, "nid", &self.national_id);
        put_text(&mut m, "profile_photo_url", &self.photo_url);
        Value::Object(m)
    }
}

/// Member, share and nominee resolved from one share-details payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareDetails {
    pub member: Member,
    pub share: Share,
    pub nominee: Nominee,
}

impl ShareDetails {
    pub fn to_raw(&self) -> Value {
        let mut m = Map::new();
        m.insert("member".into(), self.member.to_raw());
        m.insert("share".into(), self.share.to_raw());
        m.insert("nominee".into(), self.nominee.to_raw());
        Value::Object(m)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberProfile {
    pub member: Member,
    pub share: Share,
    pub nominee: Nominee,
    pub total_deposited: Option<Money>,
    pub total_due: Option<Money>,
}

impl MemberProfile {
    pub fn to_raw(&self) -> Value {
        let mut m = Map::new();
        m.insert("member".into(), self.member.to_raw());
        m.insert("share".into(), self.share.to_raw());
        m.insert("nominee".into(), self.nominee.to_raw());
        put_money(&mut m, "total_deposited", &self.total_deposited);
        put_money(&mut m, "total_due", &self.total_due);
        Value::Object(m)
    }
}

/// The authenticated account as reported by login / me.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl UserRecord {
    pub fn to_raw(&self) -> Value {
        let mut u = Map::new();
        if let Some(id) = self.id { u.insert("id".into(), Value::from(id)); }
        put_text(&mut u, "name", &self.name);
        put_text(&mut u, "email", &self.email);
        put_text(&mut u, "role", &self.role);
        let mut m = Map::new();
        m.insert("user".into(), Value::Object(u));
        Value::Object(m)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageRecord {
    pub message: Option<String>,
}

impl MessageRecord {
    pub fn to_raw(&self) -> Value {
        let mut m = Map::new();
        put_text(&mut m, "message", &self.message);
        Value::Object(m)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerEntry {
    pub id: Option<i64>,
    pub base_amount: Option<Money>,
    pub total_amount: Option<Money>,
    pub kind: Option<String>,
    pub deposited_at: Option<String>,
    pub notes: Option<String>,
}

impl LedgerEntry {
    fn write_raw(&self, m: &mut Map<String, Value>) {
        if let Some(id) = self.id { m.insert("id".into(), Value::from(id)); }
        put_money(m, "base_amount", &self.base_amount);
        put_money(m, "total_amount", &self.total_amount);
        put_text(m, "type", &self.kind);
        put_text(m, "deposited_at_local", &self.deposited_at);
        put_text(m, "notes", &self.notes);
    }

    pub fn to_raw(&self) -> Value {
        let mut m = Map::new();
        self.write_raw(&mut m);
        Value::Object(m)
    }
}

/// One month of a ledger or due summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthRecord {
    pub year: Option<i32>,
    /// 1..=12
    pub month: u32,
    pub label: Option<String>,
    pub base_amount: Option<Money>,
    pub total_amount: Option<Money>,
    pub entries: Vec<LedgerEntry>,
}

impl MonthRecord {
    pub fn to_raw(&self) -> Value {
        let mut m = Map::new();
        if let Some(y) = self.year { m.insert("year".into(), Value::from(y)); }
        m.insert("month".into(), Value::from(self.month));
        put_text(&mut m, "label", &self.label);
        put_money(&mut m, "base_amount", &self.base_amount);
        put_money(&mut m, "total_amount", &self.total_amount);
        m.insert("entries".into(), Value::Array(self.entries.iter().map(LedgerEntry::to_raw).collect()));
        Value::Object(m)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DueSummary {
    pub year: Option<i32>,
    pub available_years: Vec<i32>,
    pub total: Option<Money>,
    pub months: Vec<MonthRecord>,
}

impl DueSummary {
    pub fn to_raw(&self) -> Value {
        let mut summary = Map::new();
        put_money(&mut summary, "total", &self.total);
        summary.insert("months".into(), months_raw(&self.months));
        let mut m = Map::new();
        if let Some(y) = self.year { m.insert("selected_year".into(), Value::from(y)); }
        m.insert("available_years".into(), years_raw(&self.available_years));
        m.insert("summary".into(), Value::Object(summary));
        Value::Object(m)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    pub year: Option<i32>,
    pub available_years: Vec<i32>,
    pub months: Vec<MonthRecord>,
    pub year_total: Option<Money>,
    pub lifetime_total: Option<Money>,
    pub due: Option<DueSummary>,
}

impl Ledger {
    pub fn to_raw(&self) -> Value {
        let mut m = Map::new();
        if let Some(y) = self.year { m.insert("year".into(), Value::from(y)); }
        m.insert("available_years".into(), years_raw(&self.available_years));
        m.insert("monthly_data".into(), months_raw(&self.months));
        put_money(&mut m, "year_total", &self.year_total);
        put_money(&mut m, "lifetime_total", &self.lifetime_total);
        if let Some(due) = &self.due { m.insert("due_summary".into(), due.to_raw()); }
        Value::Object(m)
    }
}

/// One deposit row of the admin listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepositRecord {
    pub member: Member,
    pub entry: LedgerEntry,
}

impl DepositRecord {
    pub fn to_raw(&self) -> Value {
        let mut m = Map::new();
        m.insert("member".into(), self.member.to_raw());
        self.entry.write_raw(&mut m);
        Value::Object(m)
    }
}

/// One member row of the admin due summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberDue {
    pub member: Member,
    pub total_due: Option<Money>,
    pub months: Vec<MonthRecord>,
}

impl MemberDue {
    pub fn to_raw(&self) -> Value {
        let mut m = Map::new();
        m.insert("member".into(), self.member.to_raw());
        put_money(&mut m, "total_due", &self.total_due);
        m.insert("months".into(), months_raw(&self.months));
        Value::Object(m)
    }
}

/// A page of an admin listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: Option<u32>,
    pub last_page: Option<u32>,
    pub per_page: Option<u32>,
    pub total: Option<u64>,
}

impl<T> Default for Page<T> {
    fn default() -> Self { Self { items: Vec::new(), current_page: None, last_page: None, per_page: None, total: None } }
}

impl<T> Page<T> {
    pub fn has_more(&self) -> bool {
        matches!((self.current_page, self.last_page), (Some(c), Some(l)) if c < l)
    }

    pub fn to_raw_with(&self, item_raw: impl Fn(&T) -> Value) -> Value {
        let mut m = Map::new();
        m.insert("data".into(), Value::Array(self.items.iter().map(item_raw).collect()));
        if let Some(v) = self.current_page { m.insert("current_page".into(), Value::from(v)); }
        if let Some(v) = self.last_page { m.insert("last_page".into(), Value::from(v)); }
        if let Some(v) = self.per_page { m.insert("per_page".into(), Value::from(v)); }
        if let Some(v) = self.total { m.insert("total".into(), Value::from(v)); }
        Value::Object(m)
    }
}

fn put_text(m: &mut Map<String, Value>, key: &str, v: &Option<String>) {
    if let Some(s) = v { m.insert(key.to_string(), Value::String(s.clone())); }
}

fn put_money(m: &mut Map<String, Value>, key: &str, v: &Option<Money>) {
    if let Some(x) = v { m.insert(key.to_string(), Value::String(x.to_string())); }
}

fn months_raw(months: &[MonthRecord]) -> Value { Value::Array(months.iter().map(MonthRecord::to_raw).collect()) }

fn years_raw(years: &[i32]) -> Value { Value::Array(years.iter().map(|y| Value::from(*y)).collect()) }
