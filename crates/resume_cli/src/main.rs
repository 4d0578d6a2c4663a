//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `resume_core` linkage.
//! - Replay one scripted drag session over the sample state and print the
//!   export projection as JSON.

use std::error::Error;

use log::info;
use resume_core::{
    DragController, DragKind, DropEvent, EditorConfig, EditorService, EditorState, PickUpEvent,
    TargetMetadata, TargetRole,
};

fn main() -> Result<(), Box<dyn Error>> {
    println!("resume_core version={}", resume_core::core_version());

    let config = EditorConfig::default();
    let log_dir = std::env::temp_dir().join("resume_editor_logs");
    if let Err(err) = resume_core::init_logging_from_config(&config, &log_dir) {
        eprintln!("logging disabled: {err}");
    }

    let mut editor = EditorService::in_memory(EditorState::sample(), config.clone());
    let mut drag = DragController::new(&config);

    // Drag the menu's "skill" entry over the first bullet of the default section.
    drag.on_pick_up(
        &editor,
        PickUpEvent {
            source_id: format!("{}skill", config.menu_drag_prefix),
            role: DragKind::MenuEntry,
        },
    );
    let outcome = drag.on_drop(
        &mut editor,
        DropEvent {
            source_id: format!("{}skill", config.menu_drag_prefix),
            target: Some(TargetMetadata::new("test2", TargetRole::Item)),
        },
    );
    info!("event=cli_demo module=cli status=ok outcome={outcome:?}");
    println!("drop outcome={outcome:?}");

    let document = editor.export();
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
