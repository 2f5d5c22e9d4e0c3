use serde_json::json;

use super::*;
use crate::net::types::PermissionRecord;

fn gate() -> Gate {
    Gate::from_records(vec![
        PermissionRecord::new("apps:manage", vec![1, 2]),
        PermissionRecord::new("apps:eval_l2", vec![2, 3]),
        PermissionRecord::new("wfps:eval_l1", vec![]),
    ])
}

#[test]
fn module_access_reflects_held_permissions() {
    let access = module_access(&gate(), route_for(ViewKind::Apps), None);
    assert_eq!(
        access,
        ModuleAccess { can_manage: true, can_evaluate_l1: false, can_evaluate_l2: true, offices: vec![1, 2, 3] }
    );
    assert!(access.any());
}

#[test]
fn module_access_without_offices_is_unscoped() {
    let access = module_access(&gate(), route_for(ViewKind::Wfps), None);
    assert!(access.can_evaluate_l1);
    assert!(!access.can_manage);
    assert!(access.offices.is_empty());
}

#[test]
fn module_access_is_empty_for_unheld_module() {
    let access = module_access(&gate(), route_for(ViewKind::FundSources), None);
    assert!(!access.any());
}

#[test]
fn module_access_limited_to_office_filter() {
    let access = module_access(&gate(), route_for(ViewKind::Apps), Some(3));
    assert!(!access.can_manage);
    assert!(access.can_evaluate_l2);

    let access = module_access(&gate(), route_for(ViewKind::Apps), Some(9));
    assert!(!access.any());
    assert_eq!(access.offices, vec![1, 2, 3]);
}

#[test]
fn module_access_zero_office_is_unfiltered() {
    assert_eq!(
        module_access(&gate(), route_for(ViewKind::Apps), Some(0)),
        module_access(&gate(), route_for(ViewKind::Apps), None)
    );
}

#[test]
fn office_filter_reads_integer_prefix_from_query() {
    assert_eq!(office_filter(Some("2")), Some(2));
    assert_eq!(office_filter(Some("12abc")), Some(12));
    assert_eq!(office_filter(Some("all")), None);
    assert_eq!(office_filter(None), None);
}

#[test]
fn module_resource_strips_leading_slash() {
    assert_eq!(module_resource(route_for(ViewKind::FundSources)), "fund_sources");
}

#[test]
fn module_titles_name_each_module() {
    assert_eq!(module_title(ViewKind::Ppmps), "Project Procurement Management Plans");
    assert_eq!(module_title(ViewKind::Apps), "Annual Procurement Plans");
}

#[test]
fn parse_module_records_accepts_array_and_paginated_bodies() {
    let item = json!({ "id": 1, "title": "GAA 2024", "amount": 1500.0 });
    assert_eq!(parse_module_records(&json!([item.clone()])).len(), 1);
    assert_eq!(parse_module_records(&json!({ "data": [item], "total": 1 })).len(), 1);
    assert!(parse_module_records(&json!({ "message": "ok" })).is_empty());
    assert!(parse_module_records(&json!(null)).is_empty());
}

#[test]
fn parse_module_records_skips_undecodable_entries() {
    let body = json!([{ "id": 1, "name": "Trust Fund" }, { "title": "missing id" }]);
    let records = parse_module_records(&body);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Trust Fund");
}

#[test]
fn record_cells_format_amount_and_date() {
    let record = ModuleRecord {
        id: 4,
        title: "Supplies".to_owned(),
        amount: Some(12_500.5),
        updated_at: Some("2024-03-08 10:15:00".to_owned()),
    };
    assert_eq!(
        record_cells(&record),
        ("Supplies".to_owned(), "₱12,500.50".to_owned(), "Mar 8, 2024".to_owned())
    );
}

#[test]
fn record_cells_fall_back_to_raw_unparseable_dates() {
    let record = ModuleRecord { id: 5, title: "X".to_owned(), amount: None, updated_at: Some("soon".to_owned()) };
    assert_eq!(record_cells(&record), ("X".to_owned(), String::new(), "soon".to_owned()));
}
