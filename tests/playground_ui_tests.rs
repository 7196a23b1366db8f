//! Playground UI Tests
//!
//! Renders the chat editor and playground headlessly with `egui_kittest` and
//! drives them through their buttons, the way a user would.

use egui::{Event, Modifiers, PointerButton, Pos2};
use egui_kittest::kittest::Queryable;
use egui_kittest::Harness;
use promptlab::app::chat::{DragState, MessageId, MessageStore, Role};
use promptlab::app::config::PlaygroundConfig;
use promptlab::app::dashui::chat_box::{ChatBox, ADD_MESSAGE_LABEL, ADD_PLACEHOLDER_LABEL};
use promptlab::app::dashui::new_experiment_window::{ExperimentRequest, ModelSettings};
use promptlab::app::dashui::playground::Playground;
use promptlab::app::notifications::NotificationManager;
use promptlab::PlaygroundApp;

fn roles(store: &MessageStore) -> Vec<Role> {
    store.messages().iter().map(|m| m.role).collect()
}

#[test]
fn test_chat_box_add_buttons() {
    let mut harness = Harness::new_ui_state(
        |ui, state: &mut (ChatBox, MessageStore)| {
            let (chat_box, store) = state;
            chat_box.show(ui, store);
        },
        (ChatBox::new("test"), MessageStore::new()),
    );

    harness.get_by_label(ADD_MESSAGE_LABEL).click();
    harness.run();
    harness.get_by_label(ADD_PLACEHOLDER_LABEL).click();
    harness.run();
    harness.get_by_label(ADD_MESSAGE_LABEL).click();
    harness.run();

    assert_eq!(
        roles(&harness.state().1),
        vec![
            Role::System,
            Role::User,
            Role::Assistant,
            Role::Placeholder,
            Role::User
        ]
    );
    assert!(!harness.state().0.drag_controller().is_dragging());
}

#[test]
fn test_chat_box_renders_add_buttons() {
    let harness = Harness::new_ui_state(
        |ui, state: &mut (ChatBox, MessageStore)| {
            let (chat_box, store) = state;
            chat_box.show(ui, store);
        },
        (ChatBox::new("test"), MessageStore::new()),
    );

    assert!(harness.query_by_label(ADD_MESSAGE_LABEL).is_some());
    assert!(harness.query_by_label(ADD_PLACEHOLDER_LABEL).is_some());
}

type ChatState = (ChatBox, MessageStore);

fn chat_harness(store: MessageStore) -> Harness<'static, ChatState> {
    Harness::builder().with_size(egui::vec2(800.0, 600.0)).build_ui_state(
        |ui, state: &mut ChatState| {
            // Keep the list narrow so there is empty space beside it
            ui.horizontal_top(|ui| {
                ui.allocate_ui(egui::vec2(320.0, 500.0), |ui| {
                    let (chat_box, store) = state;
                    chat_box.show(ui, store);
                });
            });
        },
        (ChatBox::new("rows"), store),
    )
}

fn three_messages() -> MessageStore {
    MessageStore::from_drafts([
        (Role::System, "be brief"),
        (Role::User, "draft"),
        (Role::Assistant, "reply"),
    ])
}

fn ids(store: &MessageStore) -> Vec<u64> {
    store.ids().into_iter().map(|id| id.0).collect()
}

fn handle_centers(harness: &Harness<'_, ChatState>) -> Vec<Pos2> {
    harness
        .get_all_by_label("⠿")
        .map(|node| node.rect().center())
        .collect()
}

/// Queue one pointer event and render a single frame
fn pointer_event(harness: &mut Harness<'_, ChatState>, event: Event) {
    harness.input_mut().events.push(event);
    harness.step();
}

fn press(harness: &mut Harness<'_, ChatState>, pos: Pos2, pressed: bool) {
    pointer_event(harness, Event::PointerMoved(pos));
    pointer_event(
        harness,
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        },
    );
    harness.step();
}

/// Move the pointer in small vertical steps so every row it passes is hovered
fn sweep(harness: &mut Harness<'_, ChatState>, x: f32, from_y: f32, to_y: f32) {
    let mut y = from_y;
    while y < to_y {
        y = (y + 3.0).min(to_y);
        pointer_event(harness, Event::PointerMoved(Pos2::new(x, y)));
    }
}

#[test]
fn test_remove_button_drops_its_row() {
    let mut harness = chat_harness(three_messages());

    harness
        .get_all_by_label("✕")
        .next()
        .expect("every row has a remove button")
        .click();
    harness.run();

    assert_eq!(ids(&harness.state().1), vec![2, 3]);
}

#[test]
fn test_typing_edits_only_that_message() {
    let mut harness = chat_harness(three_messages());

    harness.get_by_value("draft").click();
    harness.run();
    harness.get_by_value("draft").type_text("X");
    harness.run();

    let store = &harness.state().1;
    let edited = store.get(MessageId(2)).map(|m| m.content.clone()).unwrap_or_default();
    assert!(edited.contains('X'), "content was {:?}", edited);
    assert_eq!(store.get(MessageId(1)).map(|m| m.content.as_str()), Some("be brief"));
    assert_eq!(store.get(MessageId(3)).map(|m| m.content.as_str()), Some("reply"));
}

#[test]
fn test_dragging_handle_moves_row_once_then_idles() {
    let mut harness = chat_harness(three_messages());
    let handles = handle_centers(&harness);
    assert_eq!(handles.len(), 3);

    press(&mut harness, handles[0], true);
    assert!(harness.state().0.drag_controller().is_dragging());

    // Just past the middle of the second row
    sweep(&mut harness, handles[0].x, handles[0].y, handles[1].y + 4.0);
    assert_eq!(ids(&harness.state().1), vec![2, 1, 3]);

    // Wiggling inside the same row commits nothing more
    sweep(&mut harness, handles[0].x, handles[1].y + 4.0, handles[1].y + 6.0);
    assert_eq!(ids(&harness.state().1), vec![2, 1, 3]);

    press(&mut harness, Pos2::new(handles[0].x, handles[1].y + 6.0), false);
    harness.run();
    assert_eq!(harness.state().0.drag_controller().state(), DragState::Idle);
    assert_eq!(ids(&harness.state().1), vec![2, 1, 3]);
}

#[test]
fn test_pointer_beside_the_list_does_not_reorder() {
    let mut harness = chat_harness(three_messages());
    let handles = handle_centers(&harness);

    press(&mut harness, handles[0], true);
    // Far to the right of the rows, level with the other rows
    let outside_x = 700.0;
    pointer_event(&mut harness, Event::PointerMoved(Pos2::new(outside_x, handles[0].y)));
    sweep(&mut harness, outside_x, handles[0].y, handles[2].y + 4.0);

    assert_eq!(ids(&harness.state().1), vec![1, 2, 3]);
    assert!(harness.state().0.drag_controller().is_dragging());

    // Coming back over a row does reorder
    pointer_event(
        &mut harness,
        Event::PointerMoved(Pos2::new(handles[0].x, handles[1].y + 4.0)),
    );
    assert_eq!(ids(&harness.state().1), vec![2, 1, 3]);

    press(&mut harness, Pos2::new(handles[0].x, handles[1].y + 4.0), false);
    harness.run();
    assert_eq!(harness.state().0.drag_controller().state(), DragState::Idle);
}

struct PlaygroundState {
    playground: Playground,
    config: PlaygroundConfig,
    notifications: NotificationManager,
}

fn playground_harness(config: PlaygroundConfig) -> Harness<'static, PlaygroundState> {
    // Tall enough that the Submit row is on screen
    Harness::builder().with_size(egui::vec2(1280.0, 1600.0)).build_ui_state(
        |ui, state: &mut PlaygroundState| {
            state
                .playground
                .show(ui, &state.config, &mut state.notifications);
        },
        PlaygroundState {
            playground: Playground::default(),
            config,
            notifications: NotificationManager::new(),
        },
    )
}

#[test]
fn test_add_panel_updates_window_count() {
    let mut harness = playground_harness(PlaygroundConfig::default());
    assert!(harness.query_by_label("1 windows").is_some());

    harness.get_by_label("+ Add Panel").click();
    harness.run();

    assert_eq!(harness.state().playground.panel_count(), 2);
    assert!(harness.query_by_label("2 windows").is_some());
}

#[test]
fn test_submit_without_project_reports_error() {
    let mut harness = playground_harness(PlaygroundConfig::default());

    harness.get_by_label("Submit").click();
    harness.run();

    let state = harness.state();
    assert_eq!(state.notifications.get_error_count(), 1);
    assert!(!state.playground.panels()[0].is_pending());
}

#[test]
fn test_experiment_toast_says_configured() {
    let mut app = PlaygroundApp::with_config(
        PlaygroundConfig::default(),
        std::env::temp_dir().join("promptlab-unused.toml"),
    );
    let request = ExperimentRequest {
        experiment_name: "nightly".to_string(),
        description: String::new(),
        prompt: Some("summarize".to_string()),
        version: Some(2),
        provider_id: None,
        model: None,
        dataset: Some("support-tickets".to_string()),
        model_parameters: ModelSettings::default(),
    };

    app.report_experiment(&request);

    let notifications = app.notification_manager.get_active_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Dataset run configured");
    assert_eq!(
        notifications[0].message,
        "Run 'nightly' for summarize on support-tickets"
    );
}
