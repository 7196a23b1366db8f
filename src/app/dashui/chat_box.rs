//! Editable, drag-reorderable chat message list.
//!
//! [`ChatBox`] renders a [`MessageStore`] as one row per message and routes
//! every user edit back through the store's operations. Rows are collected
//! into a list of [`RowAction`]s while drawing and applied once the frame's
//! rows are laid out, so the store is never mutated while it is being
//! iterated.

use crate::app::chat::{
    DragReorderController, Message, MessageField, MessageId, MessageStore, Role, RowBounds,
};
use egui::{Color32, CursorIcon, Rect, RichText, Sense, Ui};
use tracing::debug;

const DRAG_HANDLE: &str = "⠿";
const DRAGGED_ROW_OPACITY: f32 = 0.5;

pub const ADD_MESSAGE_LABEL: &str = "+ Message";
pub const ADD_PLACEHOLDER_LABEL: &str = "+ Placeholder";

/// Where a row was drawn this frame
#[derive(Debug, Clone, Copy)]
struct RowHitBox {
    /// Part of the row that is actually on screen
    visible: Rect,
    bounds: RowBounds,
}

#[derive(Debug, Clone, PartialEq)]
enum RowAction {
    Edit(MessageId, MessageField),
    Remove(MessageId),
}

/// Per-panel chat editor state. The messages themselves stay in the
/// caller's [`MessageStore`].
#[derive(Debug, Clone)]
pub struct ChatBox {
    id: egui::Id,
    drag: DragReorderController,
}

impl ChatBox {
    pub fn new(id_salt: impl std::hash::Hash) -> Self {
        Self {
            id: egui::Id::new("chat_box").with(id_salt),
            drag: DragReorderController::new(),
        }
    }

    pub fn drag_controller(&self) -> &DragReorderController {
        &self.drag
    }

    /// Draw the editor. Returns `true` when the store changed this frame.
    pub fn show(&mut self, ui: &mut Ui, store: &mut MessageStore) -> bool {
        let mut actions = Vec::new();
        let mut row_hits = Vec::with_capacity(store.len());
        let rows: Vec<Message> = store.messages().to_vec();
        let dragged = self.drag.dragged_index();

        ui.vertical(|ui| {
            for (index, message) in rows.iter().enumerate() {
                let response = ui
                    .scope(|ui| {
                        if dragged == Some(index) {
                            ui.multiply_opacity(DRAGGED_ROW_OPACITY);
                        }
                        self.show_row(ui, index, message, &mut actions);
                    })
                    .response;
                row_hits.push(RowHitBox {
                    visible: response.rect.intersect(ui.clip_rect()),
                    bounds: RowBounds::new(response.rect.top(), response.rect.bottom()),
                });
            }

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button(ADD_MESSAGE_LABEL).clicked() {
                    let id = store.add_message();
                    debug!("Added message {} to {:?}", id, self.id);
                }
                if ui.button(ADD_PLACEHOLDER_LABEL).clicked() {
                    let id = store.add_placeholder();
                    debug!("Added placeholder {} to {:?}", id, self.id);
                }
            });
        });

        let mut changed = store.len() != rows.len();
        changed |= !actions.is_empty();
        for action in actions {
            match action {
                RowAction::Edit(id, field) => store.update_field(id, field),
                RowAction::Remove(id) => store.remove_by_id(id),
            }
        }

        changed |= self.track_drag(ui, store, &row_hits);
        changed
    }

    fn show_row(
        &mut self,
        ui: &mut Ui,
        index: usize,
        message: &Message,
        actions: &mut Vec<RowAction>,
    ) {
        ui.horizontal(|ui| {
            let handle = ui
                .add(
                    egui::Label::new(RichText::new(DRAG_HANDLE).weak())
                        .selectable(false)
                        .sense(Sense::drag()),
                )
                .on_hover_cursor(CursorIcon::Grab);
            if handle.drag_started() {
                self.drag.begin(index);
            }

            if message.role.is_placeholder() {
                ui.label(RichText::new(Role::Placeholder.display_name()).italics());
                let mut name = message.content.clone();
                let edit = ui.add(
                    egui::TextEdit::singleline(&mut name)
                        .hint_text(Role::Placeholder.content_hint())
                        .desired_width(ui.available_width() - 28.0),
                );
                if edit.changed() {
                    actions.push(RowAction::Edit(message.id, MessageField::Content(name)));
                }
            } else {
                let mut role = message.role;
                egui::ComboBox::from_id_salt(self.id.with(("role", message.id)))
                    .width(96.0)
                    .selected_text(role.display_name())
                    .show_ui(ui, |ui| {
                        for option in Role::SELECTABLE {
                            ui.selectable_value(&mut role, option, option.display_name());
                        }
                    });
                if role != message.role {
                    actions.push(RowAction::Edit(message.id, MessageField::Role(role)));
                }

                let mut content = message.content.clone();
                let edit = ui.add(
                    egui::TextEdit::multiline(&mut content)
                        .hint_text(message.role.content_hint())
                        .desired_rows(1)
                        .desired_width(ui.available_width() - 28.0),
                );
                if edit.changed() {
                    actions.push(RowAction::Edit(message.id, MessageField::Content(content)));
                }
            }

            if ui
                .add(egui::Button::new(RichText::new("✕").color(Color32::GRAY)).frame(false))
                .on_hover_text("Remove message")
                .clicked()
            {
                actions.push(RowAction::Remove(message.id));
            }
        });
    }

    /// Feed the pointer position to the drag controller and apply any
    /// committed move. Only a pointer inside the visible part of a row
    /// counts as hovering it.
    fn track_drag(&mut self, ui: &Ui, store: &mut MessageStore, rows: &[RowHitBox]) -> bool {
        if !self.drag.is_dragging() {
            return false;
        }

        let (released, pointer) =
            ui.input(|i| (!i.pointer.primary_down(), i.pointer.interact_pos()));
        if released {
            self.drag.end();
            return false;
        }

        // A row removed mid-drag invalidates the tracked index
        if self.drag.dragged_index().map_or(true, |i| i >= store.len()) {
            self.drag.end();
            return false;
        }

        ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        ui.ctx().request_repaint();

        let Some(pointer) = pointer else {
            return false;
        };
        let Some((hover_index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.visible.contains(pointer))
        else {
            return false;
        };

        match self.drag.hover(hover_index, row.bounds, pointer.y) {
            Some(reorder) => {
                store.move_to(reorder.from, reorder.to);
                true
            }
            None => false,
        }
    }
}
