use super::*;

#[test]
fn reads_only_id_first_name_and_email_from_list_page() {
    let raw = r#"{
        "page": 2,
        "per_page": 6,
        "total": 12,
        "total_pages": 2,
        "data": [
            {"id": 7, "email": "michael.lawson@reqres.in", "first_name": "Michael", "last_name": "Lawson", "avatar": "https://reqres.in/img/faces/7-image.jpg"},
            {"id": 8, "email": "lindsay.ferguson@reqres.in", "first_name": "Lindsay"}
        ],
        "support": {"url": "https://reqres.in/#support-heading"}
    }"#;

    let page: UserPage = serde_json::from_str(raw).expect("decode page");
    let users: Vec<UserRecord> = page.data.into_iter().map(UserRecord::from).collect();

    assert_eq!(page.page, 2);
    assert_eq!(
        users,
        vec![
            UserRecord::new(UserId(7), "Michael", "michael.lawson@reqres.in"),
            UserRecord::new(UserId(8), "Lindsay", "lindsay.ferguson@reqres.in"),
        ]
    );
}

#[test]
fn create_response_accepts_string_id_and_ignores_echoed_fields() {
    let raw = r#"{"name": "someone else", "email": "x@y.z", "id": "99", "createdAt": "2024-01-01T00:00:00.000Z"}"#;
    let created: CreatedUserResponse = serde_json::from_str(raw).expect("decode");
    assert_eq!(created.id, UserId(99));

    let created: CreatedUserResponse = serde_json::from_str(r#"{"id": 100}"#).expect("decode");
    assert_eq!(created.id, UserId(100));
}

#[test]
fn create_response_rejects_non_numeric_id() {
    let err = serde_json::from_str::<CreatedUserResponse>(r#"{"id": "abc"}"#)
        .expect_err("must fail");
    assert!(err.to_string().contains("not numeric"), "unexpected error: {err}");

    assert!(serde_json::from_str::<CreatedUserResponse>(r#"{"name": "Bob"}"#).is_err());
}

#[test]
fn upsert_body_uses_name_and_email_keys() {
    let body = UserUpsertRequest {
        name: "Bob".to_string(),
        email: "b@x.com".to_string(),
    };
    assert_eq!(
        serde_json::to_value(&body).expect("encode"),
        serde_json::json!({"name": "Bob", "email": "b@x.com"})
    );
}
