use namecard_core::event_bus::{
    ContextMenuEvent, EditorEvent, EventBus, EventCategory, EventFilter, TemplateEvent,
};
use std::sync::{Arc, Mutex};

#[test]
fn test_context_menu_events_reach_filtered_subscriber() {
    let bus = EventBus::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = seen.clone();
    bus.subscribe(
        EventFilter::Categories(vec![EventCategory::ContextMenu]),
        move |event| sink.lock().unwrap().push(event),
    );

    bus.publish(EditorEvent::Template(TemplateEvent::ProfileBound { updated: 3 }));
    bus.publish(EditorEvent::ContextMenu(ContextMenuEvent::Opened {
        target: Some(2),
        x: 10.0,
        y: 20.0,
        suppress_native: true,
    }));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].category(), EventCategory::ContextMenu);
}

#[test]
fn test_event_descriptions() {
    let event = EditorEvent::Template(TemplateEvent::ImportFinished {
        generation: 2,
        warnings: 1,
    });
    assert_eq!(event.description(), "Import 2 finished with 1 warnings");
}
