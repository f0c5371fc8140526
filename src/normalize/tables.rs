//! Priority tables for every entity and field the backend has ever renamed.
//! Earlier keys always win; there is no runtime heuristic.

use super::resolve::{EntityTable, FieldTable};

const PHOTO_KEYS: &[&str] = &["profile_photo_url", "profile_photo", "avatar", "image", "photo", "profilePhotoUrl", "profilePhoto"];

// ---- member ----
pub(crate) static MEMBER_NAME: FieldTable = FieldTable { nested: &["name", "full_name", "fullName"], flat: &["name", "full_name", "fullName", "member_name"] };
pub(crate) static MEMBER_EMAIL: FieldTable = FieldTable { nested: &["email", "email_address"], flat: &["email", "email_address"] };
pub(crate) static MEMBER_PHONE: FieldTable = FieldTable {
    nested: &["phone", "mobile_number", "mobile", "phone_number", "mobileNumber"],
    flat: &["phone", "mobile_number", "mobile", "phone_number", "mobileNumber"],
};
pub(crate) static MEMBER_NID: FieldTable = FieldTable { nested: &["nid", "national_id", "nationalId"], flat: &["nid", "national_id", "nationalId"] };
pub(crate) static MEMBER_PHOTO: FieldTable = FieldTable { nested: PHOTO_KEYS, flat: PHOTO_KEYS };

pub(crate) static MEMBER: EntityTable = EntityTable {
    name: "member",
    nested: &["member", "member_info", "member_details", "memberInfo", "memberDetails"],
    fields: &[&MEMBER_NAME, &MEMBER_EMAIL, &MEMBER_PHONE, &MEMBER_NID, &MEMBER_PHOTO],
};

// ---- share ----
const SHARE_NUMBER_NESTED: &[&str] = &["share_no", "share_number", "shareNo", "shareNumber"];
const SHARE_CANDIDATES: &[&str] = &["share", "share_info", "share_details", "share_information", "shareInfo", "shareDetails", "shareInformation"];

pub(crate) static SHARE_NUMBER: FieldTable = FieldTable { nested: SHARE_NUMBER_NESTED, flat: &["share_no", "shareNo"] };
pub(crate) static SHARE_AMOUNT: FieldTable = FieldTable { nested: &["share_amount", "shareAmount", "amount"], flat: &["share_amount", "shareAmount"] };
pub(crate) static SHARE_TOTAL_DEPOSIT: FieldTable = FieldTable { nested: &["total_deposit", "totalDeposit", "total_deposited"], flat: &["total_deposit", "totalDeposit"] };
pub(crate) static SHARE_CREATED_AT: FieldTable = FieldTable { nested: &["created_at", "createdAt"], flat: &["created_at", "createdAt"] };

pub(crate) static SHARE: EntityTable = EntityTable {
    name: "share",
    nested: SHARE_CANDIDATES,
    fields: &[&SHARE_NUMBER, &SHARE_AMOUNT, &SHARE_TOTAL_DEPOSIT, &SHARE_CREATED_AT],
};

/// Inside a profile's member object a bare `share` scalar is the share number.
pub(crate) static EMBEDDED_SHARE_NUMBER: FieldTable = FieldTable { nested: SHARE_NUMBER_NESTED, flat: &["share_no", "shareNo", "share"] };

pub(crate) static EMBEDDED_SHARE: EntityTable = EntityTable {
    name: "share(in member)",
    nested: SHARE_CANDIDATES,
    fields: &[&EMBEDDED_SHARE_NUMBER, &SHARE_AMOUNT, &SHARE_TOTAL_DEPOSIT, &SHARE_CREATED_AT],
};

// ---- nominee ----
pub(crate) static NOMINEE_NAME: FieldTable = FieldTable { nested: &["name", "full_name", "nominee_name"], flat: &["nominee_name", "nomineeName"] };
pub(crate) static NOMINEE_NID: FieldTable = FieldTable {
    nested: &["nid", "national_id", "nominee_nid"],
    flat: &["nominee_nid", "nominee_national_id", "nomineeNid"],
};
pub(crate) static NOMINEE_PHOTO: FieldTable = FieldTable { nested: PHOTO_KEYS, flat: &["nominee_photo_url", "nominee_photo", "nominee_image"] };

pub(crate) static NOMINEE: EntityTable = EntityTable {
    name: "nominee",
    nested: &["nominee", "nominee_info", "nominee_details", "nomineeInfo", "nomineeDetails"],
    fields: &[&NOMINEE_NAME, &NOMINEE_NID, &NOMINEE_PHOTO],
};

// ---- user (login / me) ----
pub(crate) static USER_NAME: FieldTable = FieldTable { nested: &["name", "full_name", "fullName"], flat: &["name", "full_name"] };
pub(crate) static USER_EMAIL: FieldTable = FieldTable { nested: &["email"], flat: &["email"] };
pub(crate) static USER_ROLE: FieldTable = FieldTable { nested: &["role", "user_type", "type"], flat: &["role", "user_role", "user_type"] };
pub(crate) static USER_ID: FieldTable = FieldTable { nested: &["id", "user_id"], flat: &["user_id", "id"] };

pub(crate) static USER: EntityTable = EntityTable {
    name: "user",
    nested: &["user", "account", "member"],
    fields: &[&USER_NAME, &USER_EMAIL, &USER_ROLE],
};

pub(crate) const TOKEN_KEYS: &[&str] = &["token", "access_token", "accessToken", "plain_text_token"];
pub(crate) const ROOT_ROLE_KEYS: &[&str] = &["role"];
pub(crate) const MESSAGE_KEYS: &[&str] = &["message", "status", "detail"];

// ---- profile totals ----
pub(crate) const TOTAL_DEPOSITED_KEYS: &[&str] = &["total_deposited", "totalDeposited", "total_deposit"];
pub(crate) const TOTAL_DUE_KEYS: &[&str] = &["total_due", "totalDue", "due_total", "dueTotal", "due"];

// ---- ledger / due summary ----
pub(crate) const LEDGER_YEAR_KEYS: &[&str] = &["year", "selected_year", "selectedYear"];
pub(crate) const DUE_YEAR_KEYS: &[&str] = &["selected_year", "year", "selectedYear"];
pub(crate) const AVAILABLE_YEARS_KEYS: &[&str] = &["available_years", "availableYears", "years"];
pub(crate) const LEDGER_MONTHS_KEYS: &[&str] = &["monthly_data", "months", "monthlyData", "data"];
pub(crate) const YEAR_TOTAL_KEYS: &[&str] = &["year_total", "yearTotal", "total"];
pub(crate) const LIFETIME_TOTAL_KEYS: &[&str] = &["lifetime_total", "lifetimeTotal"];
pub(crate) const EMBEDDED_DUE_KEYS: &[&str] = &["due_summary", "dueSummary"];
pub(crate) const DUE_SUMMARY_KEYS: &[&str] = &["summary", "due_summary", "dueSummary"];
pub(crate) const DUE_TOTAL_KEYS: &[&str] = &["total", "total_due", "totalDue"];
pub(crate) const DUE_MONTHS_KEYS: &[&str] = &["months", "due_months", "dueMonths"];

pub(crate) const MONTH_KEYS: &[&str] = &["month", "month_no", "month_number"];
pub(crate) const MONTH_YEAR_KEYS: &[&str] = &["year"];
pub(crate) const MONTH_LABEL_KEYS: &[&str] = &["label", "month_label", "month_name"];
pub(crate) const BASE_AMOUNT_KEYS: &[&str] = &["base_amount", "baseAmount", "base"];
pub(crate) const TOTAL_AMOUNT_KEYS: &[&str] = &["total_amount", "totalAmount", "total", "amount"];
pub(crate) const ENTRIES_KEYS: &[&str] = &["entries", "deposits", "items"];

pub(crate) const ENTRY_ID_KEYS: &[&str] = &["id", "deposit_id"];
pub(crate) const ENTRY_KIND_KEYS: &[&str] = &["type", "kind"];
pub(crate) const ENTRY_AT_KEYS: &[&str] = &["deposited_at_local", "deposited_at", "depositedAt", "created_at"];
pub(crate) const ENTRY_NOTES_KEYS: &[&str] = &["notes", "note", "remarks"];

// ---- admin listings ----
pub(crate) const PAGE_ITEMS_KEYS: &[&str] = &["data", "items", "results", "rows", "members", "deposits", "dues"];
pub(crate) const PAGE_META_KEYS: &[&str] = &["meta", "pagination"];
pub(crate) const CURRENT_PAGE_KEYS: &[&str] = &["current_page", "currentPage", "page"];
pub(crate) const LAST_PAGE_KEYS: &[&str] = &["last_page", "lastPage", "total_pages"];
pub(crate) const PER_PAGE_KEYS: &[&str] = &["per_page", "perPage"];
pub(crate) const TOTAL_ITEMS_KEYS: &[&str] = &["total", "total_items"];
pub(crate) const MEMBER_DUE_TOTAL_KEYS: &[&str] = &["total_due", "totalDue", "due", "total", "amount"];
