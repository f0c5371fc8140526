//! Terminal rendering of canonical records for the `society` binary.
//! Absent values show as `-` here and nowhere else.

pub mod args;

use crate::credentials::Session;
use crate::model::{
    DepositRecord, DueSummary, Ledger, Member, MemberDue, MemberProfile, MessageRecord, MonthRecord, Page, ShareDetails,
    UserRecord,
};

const MAX_COL_WIDTH: usize = 60;
const ABSENT: &str = "-";

fn cell<T: ToString>(v: &Option<T>) -> String {
    v.as_ref().map(|x| x.to_string()).unwrap_or_else(|| ABSENT.to_string())
}

/// ASCII table with `+---+` separators; numeric-looking cells are right-aligned.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| display_len(h).min(MAX_COL_WIDTH)).collect();
    for r in rows {
        for (i, c) in r.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(display_len(c).min(MAX_COL_WIDTH));
        }
    }
    let sep = build_separator(&widths);
    let head: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut out = Vec::with_capacity(rows.len() + 4);
    out.push(sep.clone());
    out.push(build_row(&head, &widths));
    out.push(sep.clone());
    for r in rows {
        out.push(build_row(r, &widths));
    }
    out.push(sep);
    out.join("\n")
}

/// Two-column `field | value` table for a single record.
pub fn render_fields(pairs: Vec<(&str, String)>) -> String {
    let rows: Vec<Vec<String>> = pairs.into_iter().map(|(k, v)| vec![k.to_string(), v]).collect();
    render_table(&["field", "value"], &rows)
}

pub fn render_user(u: &UserRecord) -> String {
    render_fields(vec![("id", cell(&u.id)), ("name", cell(&u.name)), ("email", cell(&u.email)), ("role", cell(&u.role))])
}

pub fn render_session(s: &Session) -> String {
    let token = s.token.as_ref().map(|t| mask_token(t));
    render_fields(vec![
        ("authenticated", s.is_authenticated().to_string()),
        ("role", cell(&s.role)),
        ("token", cell(&token)),
    ])
}

pub fn render_message(m: &MessageRecord) -> String { cell(&m.message) }

fn member_fields(m: &Member) -> Vec<(&'static str, String)> {
    vec![
        ("name", cell(&m.display_name)),
        ("email", cell(&m.email)),
        ("phone", cell(&m.phone)),
        ("nid", cell(&m.national_id)),
        ("photo", cell(&m.photo_url)),
    ]
}

pub fn render_share_details(d: &ShareDetails) -> String {
    let mut f = member_fields(&d.member);
    f.extend([
        ("share no", cell(&d.share.share_number)),
        ("share amount", cell(&d.share.share_amount)),
        ("total deposit", cell(&d.share.total_deposit)),
        ("created", cell(&d.share.created_date().map(|dt| dt.to_string()).or_else(|| d.share.created_at.clone()))),
        ("nominee", cell(&d.nominee.name)),
        ("nominee nid", cell(&d.nominee.national_id)),
        ("nominee photo", cell(&d.nominee.photo_url)),
    ]);
    render_fields(f)
}

pub fn render_profile(p: &MemberProfile) -> String {
    let mut f = member_fields(&p.member);
    f.extend([
        ("share no", cell(&p.share.share_number)),
        ("member since", cell(&p.share.created_at)),
        ("nominee", cell(&p.nominee.name)),
        ("total deposited", cell(&p.total_deposited)),
        ("total due", cell(&p.total_due)),
    ]);
    render_fields(f)
}

fn month_rows(months: &[MonthRecord]) -> Vec<Vec<String>> {
    months
        .iter()
        .map(|m| {
            vec![
                cell(&m.year),
                m.month.to_string(),
                cell(&m.label),
                cell(&m.base_amount),
                cell(&m.total_amount),
                m.entries.len().to_string(),
            ]
        })
        .collect()
}

const MONTH_HEADERS: &[&str] = &["year", "month", "label", "base", "total", "entries"];

pub fn render_ledger(l: &Ledger) -> String {
    let mut out = render_table(MONTH_HEADERS, &month_rows(&l.months));
    out.push_str(&format!(
        "\nyear: {}, year total: {}, lifetime total: {}",
        cell(&l.year),
        cell(&l.year_total),
        cell(&l.lifetime_total)
    ));
    if let Some(due) = &l.due {
        out.push_str(&format!(", due: {}", cell(&due.total)));
    }
    out
}

pub fn render_due_summary(d: &DueSummary) -> String {
    let mut out = render_table(MONTH_HEADERS, &month_rows(&d.months));
    out.push_str(&format!("\nyear: {}, total due: {}", cell(&d.year), cell(&d.total)));
    if !d.available_years.is_empty() {
        let years: Vec<String> = d.available_years.iter().map(|y| y.to_string()).collect();
        out.push_str(&format!(", available: {}", years.join(" ")));
    }
    out
}

fn page_footer<T>(p: &Page<T>) -> String {
    format!(
        "rows: {}, page: {}/{}, total: {}",
        p.items.len(),
        cell(&p.current_page),
        cell(&p.last_page),
        cell(&p.total)
    )
}

pub fn render_members(p: &Page<Member>) -> String {
    let rows: Vec<Vec<String>> = p
        .items
        .iter()
        .map(|m| vec![cell(&m.display_name), cell(&m.email), cell(&m.phone), cell(&m.national_id)])
        .collect();
    format!("{}\n{}", render_table(&["name", "email", "phone", "nid"], &rows), page_footer(p))
}

pub fn render_deposits(p: &Page<DepositRecord>) -> String {
    let rows: Vec<Vec<String>> = p
        .items
        .iter()
        .map(|d| {
            vec![
                cell(&d.entry.id),
                cell(&d.member.display_name),
                cell(&d.entry.total_amount),
                cell(&d.entry.kind),
                cell(&d.entry.deposited_at),
                cell(&d.entry.notes),
            ]
        })
        .collect();
    format!("{}\n{}", render_table(&["id", "member", "amount", "type", "deposited", "notes"], &rows), page_footer(p))
}

pub fn render_member_dues(p: &Page<MemberDue>) -> String {
    let rows: Vec<Vec<String>> = p
        .items
        .iter()
        .map(|d| vec![cell(&d.member.display_name), cell(&d.member.phone), cell(&d.total_due), d.months.len().to_string()])
        .collect();
    format!("{}\n{}", render_table(&["member", "phone", "total due", "months"], &rows), page_footer(p))
}

/// Token contents are never printed, only their length.
fn mask_token(t: &str) -> String { format!("<hidden, {} chars>", t.chars().count()) }

fn display_len(s: &str) -> usize { s.chars().count() }

fn build_separator(widths: &[usize]) -> String {
    let mut s = String::from("+");
    for w in widths {
        s.push_str(&"-".repeat(*w + 2));
        s.push('+');
    }
    s
}

fn build_row(cells: &[String], widths: &[usize]) -> String {
    let mut s = String::from("|");
    for (i, w) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or(ABSENT);
        let text = truncate(cell, *w);
        let pad = " ".repeat(w.saturating_sub(display_len(&text)));
        s.push(' ');
        if is_numeric_like(cell) {
            s.push_str(&pad);
            s.push_str(&text);
        } else {
            s.push_str(&text);
            s.push_str(&pad);
        }
        s.push_str(" |");
    }
    s
}

fn truncate(s: &str, max: usize) -> String {
    if display_len(s) <= max {
        return s.to_string();
    }
    if max <= 1 {
        return "…".to_string();
    }
    s.chars().take(max - 1).collect::<String>() + "…"
}

fn is_numeric_like(s: &str) -> bool {
    let st = s.trim();
    let mut has_digit = false;
    for ch in st.chars() {
        if ch.is_ascii_digit() {
            has_digit = true;
        } else if !".-+,".contains(ch) {
            return false;
        }
    }
    has_digit
}
