use resume_core::{Bullet, Item, ItemCatalog, ItemKind, SubSection, SubSectionDraft};

#[test]
fn bullet_serializes_with_kind_tag() {
    let item = Item::from(Bullet::with_id("b1", "Shipped the editor"));

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["kind"], "BULLET");
    assert_eq!(json["id"], "b1");
    assert_eq!(json["text"], "Shipped the editor");

    let decoded: Item = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, item);
}

#[test]
fn sub_section_serializes_camel_case_fields() {
    let mut sub_section = SubSection::with_id(
        "job",
        SubSectionDraft::new("Acme", "Backend Engineer", "2021 - 2023"),
    );
    sub_section.children.push("b1".to_string());

    let json = serde_json::to_value(Item::from(sub_section)).unwrap();
    assert_eq!(json["kind"], "SUBSECTION");
    assert_eq!(json["timeRange"], "2021 - 2023");
    assert_eq!(json["children"][0], "b1");
}

#[test]
fn unknown_kind_tag_is_rejected() {
    let value = serde_json::json!({ "kind": "PARAGRAPH", "id": "p", "text": "x" });
    assert!(serde_json::from_value::<Item>(value).is_err());
}

#[test]
fn catalog_remove_is_pure_deletion() {
    let mut catalog = ItemCatalog::new();
    catalog.put(Item::from(Bullet::with_id("b1", "x")));

    let removed = catalog.remove("b1").unwrap();
    assert_eq!(removed.kind(), ItemKind::Bullet);
    assert!(catalog.get("b1").is_err());
    assert!(catalog.remove("b1").is_none());
}
