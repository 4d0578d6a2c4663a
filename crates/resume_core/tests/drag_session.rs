use resume_core::{
    Bullet, DragController, DragKind, DragOrigin, DragOutcome, DragSource, DragState, DropEvent,
    EditorConfig, EditorError, EditorService, EditorState, HoverEvent, Item, OrderingStore,
    PickUpEvent, Placement, Section, TargetMetadata, TargetRole,
};

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// menu = [m1, m2, z], sectionA = [x, y], sectionB = [w], sectionC = []
fn setup() -> (EditorService, DragController) {
    let mut state = EditorState::new();
    for id in ["m1", "m2", "z", "x", "y", "w"] {
        state.item_map.put(Item::from(Bullet::with_id(id, id)));
    }
    let mut section_a = Section::new("sectionA", "A");
    section_a.items = ids(&["x", "y"]);
    let mut section_b = Section::new("sectionB", "B");
    section_b.items = ids(&["w"]);
    state.ordering = OrderingStore::from_parts(
        ids(&["m1", "m2", "z"]),
        vec![section_a, section_b, Section::new("sectionC", "C")],
    );

    let config = EditorConfig::default();
    let controller = DragController::new(&config);
    (EditorService::in_memory(state, config), controller)
}

fn pick_up(source_id: &str, role: DragKind) -> PickUpEvent {
    PickUpEvent {
        source_id: source_id.to_string(),
        role,
    }
}

fn drop_on(source_id: &str, target: Option<TargetMetadata>) -> DropEvent {
    DropEvent {
        source_id: source_id.to_string(),
        target,
    }
}

fn items_of(editor: &EditorService, section_id: &str) -> Vec<String> {
    editor.snapshot().section(section_id).unwrap().items.clone()
}

#[test]
fn menu_entry_dropped_over_item_inserts_before_it() {
    let (mut editor, mut drag) = setup();

    let started = drag.on_pick_up(&editor, pick_up("menu-z", DragKind::MenuEntry));
    assert_eq!(
        started,
        DragOutcome::Started(DragSource {
            origin: DragOrigin::Menu,
            id: "z".to_string(),
        })
    );

    let target = TargetMetadata::new("x", TargetRole::Item).with_parent("sectionA", 0);
    let outcome = drag.on_drop(&mut editor, drop_on("menu-z", Some(target)));

    assert_eq!(
        outcome,
        DragOutcome::Placed(Placement::Section {
            section_id: "sectionA".to_string(),
            index: 0,
        })
    );
    assert_eq!(items_of(&editor, "sectionA"), ids(&["z", "x", "y"]));
    assert_eq!(editor.snapshot().menu(), ids(&["m1", "m2"]).as_slice());
    assert_eq!(*drag.state(), DragState::Idle);
}

#[test]
fn item_dropped_over_section_body_goes_to_head() {
    let (mut editor, mut drag) = setup();

    drag.on_pick_up(&editor, pick_up("y", DragKind::Item));
    let outcome = drag.on_drop(
        &mut editor,
        drop_on("y", Some(TargetMetadata::new("sectionB", TargetRole::Section))),
    );

    assert!(matches!(outcome, DragOutcome::Placed(_)));
    assert_eq!(items_of(&editor, "sectionA"), ids(&["x"]));
    assert_eq!(items_of(&editor, "sectionB"), ids(&["y", "w"]));
}

#[test]
fn item_dropped_over_menu_entry_returns_to_menu() {
    let (mut editor, mut drag) = setup();

    drag.on_pick_up(&editor, pick_up("x", DragKind::Item));
    let outcome = drag.on_drop(
        &mut editor,
        drop_on("x", Some(TargetMetadata::new("menu-m2", TargetRole::MenuEntry))),
    );

    assert_eq!(outcome, DragOutcome::Placed(Placement::Menu { index: 1 }));
    assert_eq!(
        editor.snapshot().menu(),
        ids(&["m1", "x", "m2", "z"]).as_slice()
    );
    assert_eq!(items_of(&editor, "sectionA"), ids(&["y"]));
}

#[test]
fn menu_entry_dropped_on_menu_reorders_menu() {
    let (mut editor, mut drag) = setup();

    drag.on_pick_up(&editor, pick_up("menu-m1", DragKind::MenuEntry));
    drag.on_drop(
        &mut editor,
        drop_on("menu-m1", Some(TargetMetadata::new("menu-z", TargetRole::MenuEntry))),
    );
    assert_eq!(
        editor.snapshot().menu(),
        ids(&["m2", "z", "m1"]).as_slice()
    );

    drag.on_pick_up(&editor, pick_up("menu-z", DragKind::MenuEntry));
    let outcome = drag.on_drop(
        &mut editor,
        drop_on("menu-z", Some(TargetMetadata::new("menu", TargetRole::Menu))),
    );
    assert_eq!(outcome, DragOutcome::Placed(Placement::Menu { index: 2 }));
    assert_eq!(
        editor.snapshot().menu(),
        ids(&["m2", "m1", "z"]).as_slice()
    );
}

#[test]
fn section_dropped_over_section_reorders_sections() {
    let (mut editor, mut drag) = setup();
    let before = editor.snapshot();

    drag.on_pick_up(&editor, pick_up("sectionA", DragKind::Section));
    let outcome = drag.on_drop(
        &mut editor,
        drop_on("sectionA", Some(TargetMetadata::new("sectionC", TargetRole::Section))),
    );

    assert_eq!(
        outcome,
        DragOutcome::SectionMoved {
            section_id: "sectionA".to_string(),
            index: 2,
        }
    );
    let after = editor.snapshot();
    let order: Vec<&str> = after.sections().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(order, vec!["sectionB", "sectionC", "sectionA"]);
    for section in before.sections() {
        assert_eq!(after.section(&section.id).unwrap().items, section.items);
    }
}

#[test]
fn section_dropped_over_item_is_noop() {
    let (mut editor, mut drag) = setup();
    let before = editor.snapshot();

    drag.on_pick_up(&editor, pick_up("sectionA", DragKind::Section));
    let outcome = drag.on_drop(
        &mut editor,
        drop_on("sectionA", Some(TargetMetadata::new("w", TargetRole::Item))),
    );

    assert_eq!(outcome, DragOutcome::NoOp);
    assert_eq!(*editor.snapshot(), *before);
    assert!(!drag.is_dragging());
}

#[test]
fn drop_outside_any_zone_cancels_without_mutation() {
    let (mut editor, mut drag) = setup();
    let before = editor.snapshot();

    drag.on_pick_up(&editor, pick_up("x", DragKind::Item));
    assert_eq!(
        drag.on_drop(&mut editor, drop_on("x", None)),
        DragOutcome::Cancelled
    );
    assert_eq!(*editor.snapshot(), *before);

    drag.on_pick_up(&editor, pick_up("x", DragKind::Item));
    assert_eq!(
        drag.on_drop(
            &mut editor,
            drop_on("x", Some(TargetMetadata::new("ghost", TargetRole::Section)))
        ),
        DragOutcome::Cancelled
    );
    assert_eq!(*editor.snapshot(), *before);
}

#[test]
fn explicit_cancel_returns_to_idle() {
    let (editor, mut drag) = setup();

    drag.on_pick_up(&editor, pick_up("x", DragKind::Item));
    assert!(drag.is_dragging());
    assert_eq!(drag.on_cancel(), DragOutcome::Cancelled);
    assert_eq!(drag.on_cancel(), DragOutcome::Ignored);
    assert!(!drag.is_dragging());
}

#[test]
fn second_pick_up_is_rejected_while_dragging() {
    let (editor, mut drag) = setup();

    drag.on_pick_up(&editor, pick_up("x", DragKind::Item));
    assert_eq!(
        drag.on_pick_up(&editor, pick_up("y", DragKind::Item)),
        DragOutcome::Ignored
    );
    assert_eq!(drag.active().unwrap().source.id, "x");
}

#[test]
fn hover_records_target_without_mutation() {
    let (editor, mut drag) = setup();
    let before = editor.snapshot();

    assert_eq!(
        drag.on_hover(
            &editor,
            HoverEvent {
                source_id: "x".to_string(),
                hovered: TargetMetadata::new("sectionB", TargetRole::Section),
            }
        ),
        DragOutcome::Ignored
    );

    drag.on_pick_up(&editor, pick_up("x", DragKind::Item));
    let outcome = drag.on_hover(
        &editor,
        HoverEvent {
            source_id: "x".to_string(),
            hovered: TargetMetadata::new("w", TargetRole::Item),
        },
    );

    assert!(matches!(outcome, DragOutcome::Hovered(Some(_))));
    assert!(drag.active().unwrap().hovered.is_some());
    assert_eq!(*editor.snapshot(), *before);
}

#[test]
fn pick_up_of_unknown_item_is_rejected() {
    let (editor, mut drag) = setup();

    let outcome = drag.on_pick_up(&editor, pick_up("menu-ghost", DragKind::MenuEntry));

    assert_eq!(
        outcome,
        DragOutcome::Rejected(EditorError::ItemNotFound("ghost".to_string()))
    );
    assert!(!drag.is_dragging());
}

#[test]
fn drop_with_mismatched_source_cancels() {
    let (mut editor, mut drag) = setup();
    let before = editor.snapshot();

    drag.on_pick_up(&editor, pick_up("x", DragKind::Item));
    let outcome = drag.on_drop(
        &mut editor,
        drop_on("y", Some(TargetMetadata::new("sectionB", TargetRole::Section))),
    );

    assert_eq!(outcome, DragOutcome::Cancelled);
    assert_eq!(*editor.snapshot(), *before);
}

#[test]
fn drop_without_active_drag_is_ignored() {
    let (mut editor, mut drag) = setup();
    let outcome = drag.on_drop(
        &mut editor,
        drop_on("x", Some(TargetMetadata::new("sectionB", TargetRole::Section))),
    );
    assert_eq!(outcome, DragOutcome::Ignored);
}

#[test]
fn item_dropped_onto_itself_is_noop() {
    let (mut editor, mut drag) = setup();
    let before = editor.snapshot();

    drag.on_pick_up(&editor, pick_up("x", DragKind::Item));
    let outcome = drag.on_drop(
        &mut editor,
        drop_on("x", Some(TargetMetadata::new("x", TargetRole::Item))),
    );

    assert_eq!(outcome, DragOutcome::NoOp);
    assert_eq!(*editor.snapshot(), *before);
}

#[test]
fn stale_session_surfaces_engine_rejection() {
    let (mut editor, mut drag) = setup();

    drag.on_pick_up(&editor, pick_up("x", DragKind::Item));
    editor.delete_item("x").unwrap();
    let outcome = drag.on_drop(
        &mut editor,
        drop_on("x", Some(TargetMetadata::new("sectionB", TargetRole::Section))),
    );

    assert_eq!(
        outcome,
        DragOutcome::Rejected(EditorError::ItemNotFound("x".to_string()))
    );
    assert!(!drag.is_dragging());
}
