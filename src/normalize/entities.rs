use serde_json::{Map, Value};

use super::resolve::{first_money, resolve_entity, resolve_entity_in, unwrap_envelope, FieldTable, Resolved};
use super::tables::*;
use crate::model::{Member, MemberProfile, Money, Nominee, Share, ShareDetails};

pub(crate) fn member_from(r: Resolved<'_>) -> Member {
    Member {
        display_name: r.text(&MEMBER_NAME),
        email: r.text(&MEMBER_EMAIL),
        phone: r.text(&MEMBER_PHONE),
        national_id: r.text(&MEMBER_NID),
        photo_url: r.text(&MEMBER_PHOTO),
    }
}

fn share_from(r: Resolved<'_>, number: &FieldTable) -> Share {
    Share {
        share_number: r.text(number),
        share_amount: r.text(&SHARE_AMOUNT),
        total_deposit: r.text(&SHARE_TOTAL_DEPOSIT),
        created_at: r.text(&SHARE_CREATED_AT),
    }
}

fn nominee_from(r: Resolved<'_>) -> Nominee {
    Nominee {
        name: r.text(&NOMINEE_NAME),
        national_id: r.text(&NOMINEE_NID),
        photo_url: r.text(&NOMINEE_PHOTO),
    }
}

/// Member, share and nominee from one share-details payload.
pub fn share_details(raw: &Value) -> ShareDetails {
    let root = unwrap_envelope(raw);
    ShareDetails {
        member: member_from(resolve_entity(root, &MEMBER)),
        share: share_from(resolve_entity(root, &SHARE), &SHARE_NUMBER),
        nominee: nominee_from(resolve_entity(root, &NOMINEE)),
    }
}

/// Profile payload. Share and nominee missing at the root are looked for inside the
/// member object, where older responses embedded them as flat keys.
pub fn profile(raw: &Value) -> MemberProfile {
    let root = unwrap_envelope(raw);
    let member_view = resolve_entity(root, &MEMBER);
    let member_obj = member_view.nested_object();

    let share_view = resolve_entity(root, &SHARE);
    let share = if share_view.is_absent() {
        member_obj
            .map(|m| share_from(resolve_entity_in(m, &EMBEDDED_SHARE), &EMBEDDED_SHARE_NUMBER))
            .unwrap_or_default()
    } else {
        share_from(share_view, &SHARE_NUMBER)
    };
    let nominee_view = resolve_entity(root, &NOMINEE);
    let nominee = if nominee_view.is_absent() {
        member_obj.map(|m| nominee_from(resolve_entity_in(m, &NOMINEE))).unwrap_or_default()
    } else {
        nominee_from(nominee_view)
    };

    MemberProfile {
        member: member_from(member_view),
        share,
        nominee,
        total_deposited: money_at(root, member_obj, TOTAL_DEPOSITED_KEYS),
        total_due: money_at(root, member_obj, TOTAL_DUE_KEYS),
    }
}

fn money_at(root: &Value, member: Option<&Map<String, Value>>, keys: &[&str]) -> Option<Money> {
    root.as_object()
        .and_then(|r| first_money(r, keys))
        .or_else(|| member.and_then(|m| first_money(m, keys)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn share(no: Option<&str>, amount: Option<&str>, total: Option<&str>, at: Option<&str>) -> Share {
        Share {
            share_number: no.map(String::from),
            share_amount: amount.map(String::from),
            total_deposit: total.map(String::from),
            created_at: at.map(String::from),
        }
    }

    #[test]
    fn envelope_scenario() {
        let raw = json!({"data": {"share": {"share_no": "12", "share_amount": "500"}}});
        assert_eq!(share_details(&raw).share, share(Some("12"), Some("500"), None, None));
    }

    #[test]
    fn flat_fallback_scenario() {
        let raw = json!({"share_no": "7", "created_at": "2025-10-19"});
        let d = share_details(&raw);
        assert_eq!(d.share, share(Some("7"), None, None, Some("2025-10-19")));
        assert!(d.member.is_absent());
        assert!(d.nominee.is_absent());
    }

    #[test]
    fn member_synonym_priority() {
        let raw = json!({"member": {"full_name": "A", "name": "B"}});
        assert_eq!(share_details(&raw).member.display_name.as_deref(), Some("B"));
    }

    #[test]
    fn photo_priority_and_nid_fallback() {
        let raw = json!({"member": {
            "photo": "p.jpg", "avatar": "a.jpg", "profile_photo": "pp.jpg",
            "national_id": "NID-2", "nid": "  "
        }});
        let m = share_details(&raw).member;
        assert_eq!(m.photo_url.as_deref(), Some("pp.jpg"));
        assert_eq!(m.national_id.as_deref(), Some("NID-2"));
    }

    #[test]
    fn all_shape_variants_agree() {
        let variants = [
            json!({
                "member": {"name": "Karim", "email": "k@x.org", "phone": "017", "nid": "99", "photo": "m.png"},
                "share": {"share_no": 12, "share_amount": "500", "total_deposit": "1500", "created_at": "2025-10-19"},
                "nominee": {"name": "Rina", "nid": "55", "image": "n.png"}
            }),
            json!({
                "memberInfo": {"fullName": "Karim", "email": "k@x.org", "mobileNumber": "017", "nationalId": "99", "profilePhoto": "m.png"},
                "shareInformation": {"shareNo": 12, "shareAmount": "500", "totalDeposit": "1500", "createdAt": "2025-10-19"},
                "nomineeInfo": {"full_name": "Rina", "national_id": "55", "avatar": "n.png"}
            }),
            json!({
                "name": "Karim", "email": "k@x.org", "mobile_number": "017", "nid": "99", "photo": "m.png",
                "share_no": "12", "share_amount": "500", "total_deposit": "1500", "created_at": "2025-10-19",
                "nominee_name": "Rina", "nominee_nid": "55", "nominee_photo": "n.png"
            }),
            json!({"data": {
                "member_details": {"name": "Karim", "email": "k@x.org", "phone": "017", "nid": "99", "profile_photo_url": "m.png"},
                "share_details": {"share_number": "12", "share_amount": "500", "total_deposited": "1500", "created_at": "2025-10-19"},
                "nominee": {"nominee_name": "Rina", "nominee_nid": "55", "photo": "n.png"}
            }}),
        ];
        let first = share_details(&variants[0]);
        assert_eq!(first.member.display_name.as_deref(), Some("Karim"));
        assert_eq!(first.share.share_number.as_deref(), Some("12"));
        for v in &variants[1..] {
            assert_eq!(share_details(v), first, "variant {}", v);
        }
    }

    #[test]
    fn missing_entity_is_fully_absent() {
        let raw = json!({"member": {"name": "Only member"}, "unrelated": {"share_no": "1"}});
        let d = share_details(&raw);
        assert_eq!(d.share, Share::default());
        assert_eq!(d.nominee, Nominee::default());
    }

    #[test]
    fn non_object_payloads_are_all_absent() {
        for raw in [Value::Null, json!([]), json!("<html>"), json!(42)] {
            assert_eq!(share_details(&raw), ShareDetails::default());
            assert_eq!(profile(&raw), MemberProfile::default());
        }
    }

    #[test]
    fn idempotent_over_canonical_form() {
        let raw = json!({"data": {"shareInfo": {"shareNo": 3, "amount": 250.5}, "nominee_name": "N", "full_name": "M"}});
        let once = share_details(&raw);
        assert_eq!(share_details(&once.to_raw()), once);
    }

    #[test]
    fn profile_reads_embedded_share_and_nominee() {
        let raw = json!({
            "member": {
                "full_name": "Salma", "mobile_number": "018", "nid": "77", "email": "s@x.org",
                "share": 3, "created_at": "2024-02-01",
                "nominee_name": "Rafi", "nominee_nid": "11",
                "due_total": 300, "total_deposited": "1,200.5"
            },
            "total_due": 250
        });
        let p = profile(&raw);
        assert_eq!(p.member.display_name.as_deref(), Some("Salma"));
        assert_eq!(p.member.phone.as_deref(), Some("018"));
        assert_eq!(p.share, share(Some("3"), None, None, Some("2024-02-01")));
        assert_eq!(p.nominee.name.as_deref(), Some("Rafi"));
        assert_eq!(p.nominee.national_id.as_deref(), Some("11"));
        // root wins over the member object
        assert_eq!(p.total_due, Some(Money::from_cents(25_000)));
        assert_eq!(p.total_deposited, Some(Money::from_cents(120_050)));
        assert_eq!(profile(&p.to_raw()), p);
    }

    #[test]
    fn profile_prefers_root_share() {
        let raw = json!({"member": {"name": "X", "share": 9}, "share": {"share_no": "21"}});
        assert_eq!(profile(&raw).share.share_number.as_deref(), Some("21"));
    }
}
