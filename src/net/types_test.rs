use super::*;

#[test]
fn auth_response_parses_offices_when_present() {
    let resp: AuthResponse = serde_json::from_value(serde_json::json!({
        "avatar": "https://cdn.example/a.png",
        "name": "Maria Santos",
        "permissions": [
            { "name": "apps:manage", "offices": [{ "id": 1 }, { "id": 2 }] },
            { "name": "wfps:eval_l1" }
        ]
    }))
    .expect("auth response");

    assert_eq!(resp.name, "Maria Santos");
    assert_eq!(resp.permissions.len(), 2);
    assert_eq!(
        resp.permissions[0].offices,
        Some(vec![AuthOffice { id: 1 }, AuthOffice { id: 2 }])
    );
    assert_eq!(resp.permissions[1].offices, None);
}

#[test]
fn auth_response_ignores_unknown_fields_and_missing_permissions() {
    let resp: AuthResponse = serde_json::from_value(serde_json::json!({
        "avatar": "",
        "name": "x",
        "email": "x@example.gov"
    }))
    .expect("auth response");
    assert!(resp.permissions.is_empty());
}

#[test]
fn auth_response_treats_null_avatar_and_name_as_empty() {
    let resp: AuthResponse = serde_json::from_value(serde_json::json!({
        "avatar": null,
        "name": null,
        "permissions": [{ "name": "apps:manage" }]
    }))
    .expect("auth response");
    assert_eq!(resp.avatar, "");
    assert_eq!(resp.name, "");
    assert_eq!(resp.permissions.len(), 1);
}

#[test]
fn auth_response_defaults_missing_avatar() {
    let resp: AuthResponse =
        serde_json::from_value(serde_json::json!({ "name": "Ana" })).expect("auth response");
    assert_eq!(UserSnapshot::from(&resp), UserSnapshot { avatar: String::new(), name: "Ana".to_owned() });
}

#[test]
fn auth_office_ignores_extra_office_fields() {
    let office: AuthOffice =
        serde_json::from_value(serde_json::json!({ "id": 7, "name": "Budget Office" })).expect("office");
    assert_eq!(office.id, 7);
}

#[test]
fn permission_record_uses_compact_field_names() {
    let record = PermissionRecord::new("apps:manage", vec![1, 2]);
    assert_eq!(
        serde_json::to_value(&record).expect("encode"),
        serde_json::json!({ "n": "apps:manage", "o": [1, 2] })
    );
}

#[test]
fn permission_record_defaults_missing_offices_to_empty() {
    let record: PermissionRecord = serde_json::from_str(r#"{"n":"apps:manage"}"#).expect("decode");
    assert!(record.offices.is_empty());
}

#[test]
fn user_snapshot_from_auth_response_keeps_display_fields() {
    let resp = AuthResponse { avatar: "a.png".to_owned(), name: "Jo".to_owned(), permissions: Vec::new() };
    assert_eq!(UserSnapshot::from(&resp), UserSnapshot { avatar: "a.png".to_owned(), name: "Jo".to_owned() });
}
