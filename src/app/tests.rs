use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::editor::{Direction, EditorOptions, Gutter, TextArea};
use crate::form::{Control, Field, Form};
use crate::signal::{self, Inbound, Outbound};

use super::event_loop::ResizeDebouncer;
use super::{App, Focus, Message, Model, ToastLevel, update};

fn quiet_options() -> EditorOptions {
    // Tests leave the process-wide save chord alone unless they hold the
    // registry gate.
    EditorOptions {
        auto_fit_height: true,
        save_shortcut: false,
    }
}

fn demo_form() -> Form {
    Form::new(vec![
        Field::text("Title", "untitled"),
        Field::checkbox("Autosave", false),
    ])
}

fn test_model(text: &str) -> (Model, Receiver<Outbound>) {
    let (port, rx) = signal::channel();
    let model = Model::new(
        PathBuf::from("test.rs"),
        TextArea::from_text(text),
        Some(Gutter::new()),
        demo_form(),
        quiet_options(),
        port,
        (80, 24),
    );
    (model, rx)
}

fn fixed_model(text: &str, rows: usize) -> (Model, Receiver<Outbound>) {
    let (port, rx) = signal::channel();
    let mut editor = TextArea::from_text(text);
    editor.set_height(rows);
    let model = Model::new(
        PathBuf::from("test.rs"),
        editor,
        Some(Gutter::new()),
        demo_form(),
        EditorOptions {
            auto_fit_height: false,
            save_shortcut: false,
        },
        port,
        (80, 24),
    );
    (model, rx)
}

fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

fn field_text(model: &Model, idx: usize) -> &str {
    match &model.form.fields()[idx].control {
        Control::Text { value, .. } => value,
        Control::Checkbox { .. } => panic!("field {idx} is not a text field"),
    }
}

fn field_checked(model: &Model, idx: usize) -> bool {
    match &model.form.fields()[idx].control {
        Control::Checkbox { checked, .. } => *checked,
        Control::Text { .. } => panic!("field {idx} is not a checkbox"),
    }
}

// --- Update: editor ---

#[test]
fn test_editor_insert_updates_value() {
    let (model, _rx) = test_model("abc");
    let model = update(model, Message::EditorInsert('x'));
    assert_eq!(model.editor.value(), "xabc");
}

#[test]
fn test_editor_newline_grows_pane() {
    let (model, _rx) = test_model("a");
    assert_eq!(model.editor.height(), 1);
    let model = update(model, Message::EditorNewline);
    let model = update(model, Message::EditorNewline);
    assert_eq!(model.editor.height(), 3);
}

#[test]
fn test_editor_tab_indents_two_spaces() {
    let (model, _rx) = test_model("ab");
    let model = update(model, Message::EditorTab);
    assert_eq!(model.editor.value(), "  ab");
    assert_eq!(model.editor.caret(), 2);
}

#[test]
fn test_editor_click_focuses_and_places_caret() {
    let (mut model, _rx) = test_model("ab\ncd");
    model.focus = Focus::Field(0);
    let model = update(model, Message::EditorClickAt(1, 1));
    assert_eq!(model.focus, Focus::Editor);
    assert_eq!(model.editor.caret_line_col(), (1, 1));
}

#[test]
fn test_editor_scroll_moves_pane_and_gutter_together() {
    let (model, _rx) = fixed_model("a\nb\nc\nd\ne\nf", 2);
    let model = update(model, Message::EditorScrollDown(2));
    assert_eq!(model.editor.scroll_top(), 2);
    assert_eq!(
        model.gutter.as_ref().map(Gutter::scroll_top),
        Some(2),
        "gutter must mirror the pane scroll"
    );
}

// --- Update: focus and form ---

#[test]
fn test_cycle_focus_walks_fields_then_editor() {
    let (model, _rx) = test_model("a");
    let model = update(model, Message::CycleFocus);
    assert_eq!(model.focus, Focus::Field(0));
    let model = update(model, Message::CycleFocus);
    assert_eq!(model.focus, Focus::Field(1));
    let model = update(model, Message::CycleFocus);
    assert_eq!(model.focus, Focus::Editor);
}

#[test]
fn test_cycle_focus_with_empty_form_keeps_editor() {
    let (port, _rx) = signal::channel();
    let model = Model::new(
        PathBuf::from("test.rs"),
        TextArea::new(),
        None,
        Form::default(),
        quiet_options(),
        port,
        (80, 24),
    );
    let model = update(model, Message::CycleFocus);
    assert_eq!(model.focus, Focus::Editor);
}

#[test]
fn test_form_insert_appends_to_text_field() {
    let (model, _rx) = test_model("a");
    let model = update(model, Message::FocusField(0));
    let model = update(model, Message::FormInsert('!'));
    assert_eq!(field_text(&model, 0), "untitled!");
    assert!(model.form.is_dirty());
}

#[test]
fn test_form_backspace_shortens_text_field() {
    let (model, _rx) = test_model("a");
    let model = update(model, Message::FocusField(0));
    let model = update(model, Message::FormBackspace);
    assert_eq!(field_text(&model, 0), "untitle");
}

#[test]
fn test_form_toggle_flips_checkbox() {
    let (model, _rx) = test_model("a");
    let model = update(model, Message::FocusField(1));
    let model = update(model, Message::FormToggle);
    assert!(field_checked(&model, 1));
}

#[test]
fn test_field_click_focuses_and_flips_checkbox() {
    let (model, _rx) = test_model("a");
    let model = update(model, Message::FieldClick(1));
    assert_eq!(model.focus, Focus::Field(1));
    assert!(field_checked(&model, 1));
}

#[test]
fn test_field_click_on_text_field_only_focuses() {
    let (model, _rx) = test_model("a");
    let model = update(model, Message::FieldClick(0));
    assert_eq!(model.focus, Focus::Field(0));
    assert_eq!(field_text(&model, 0), "untitled");
}

#[test]
fn test_focus_field_out_of_range_is_ignored() {
    let (model, _rx) = test_model("a");
    let model = update(model, Message::FocusField(9));
    assert_eq!(model.focus, Focus::Editor);
}

// --- Update: host signals ---

#[test]
fn test_host_reset_restores_defaults_and_toasts() {
    let (model, _rx) = test_model("a");
    let model = update(model, Message::FocusField(0));
    let model = update(model, Message::FormInsert('!'));
    let model = update(model, Message::FocusField(1));
    let model = update(model, Message::FormToggle);
    assert!(model.form.is_dirty());

    let model = update(model, Message::HostSignal(Inbound::ResetForm));
    assert!(!model.form.is_dirty());
    assert_eq!(field_text(&model, 0), "untitled");
    assert!(!field_checked(&model, 1));
    assert_eq!(
        model.active_toast(),
        Some(("Form reset by host", ToastLevel::Info))
    );
}

#[test]
fn test_host_reset_covers_untouched_fields() {
    // Only the text field is dirtied; the reset still walks every control.
    let (model, _rx) = test_model("a");
    let model = update(model, Message::FocusField(0));
    let model = update(model, Message::FormInsert('!'));
    let model = update(model, Message::HostSignal(Inbound::ResetForm));
    assert_eq!(field_text(&model, 0), "untitled");
    assert!(!field_checked(&model, 1));
}

// --- Update: page and window ---

#[test]
fn test_resize_updates_viewport() {
    let (model, _rx) = test_model("a");
    let model = update(model, Message::Resize(100, 30));
    // Bottom row is reserved for the status bar.
    assert_eq!(model.page.height(), 29);
}

#[test]
fn test_page_scroll_clamps_when_content_fits() {
    let (model, _rx) = test_model("a");
    let model = update(model, Message::PageScrollDown(3));
    assert_eq!(model.page.offset(), 0);
}

#[test]
fn test_quit_sets_should_quit() {
    let (model, _rx) = test_model("a");
    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_toggle_help() {
    let (model, _rx) = test_model("a");
    let model = update(model, Message::ToggleHelp);
    assert!(model.help_visible);
    let model = update(model, Message::HideHelp);
    assert!(!model.help_visible);
}

// --- Toasts ---

#[test]
fn test_toast_lifecycle() {
    let (mut model, _rx) = test_model("a");
    model.show_toast(ToastLevel::Warning, "something");
    assert_eq!(
        model.active_toast(),
        Some(("something", ToastLevel::Warning))
    );

    assert!(!model.expire_toast(Instant::now()));
    assert!(model.expire_toast(Instant::now() + Duration::from_secs(5)));
    assert_eq!(model.active_toast(), None);
}

// --- Key handling ---

#[test]
fn test_char_key_inserts_into_editor() {
    let (model, _rx) = test_model("a");
    assert_eq!(
        App::handle_key(&key(KeyCode::Char('x'), KeyModifiers::NONE), &model),
        Some(Message::EditorInsert('x'))
    );
}

#[test]
fn test_shifted_char_still_inserts() {
    let (model, _rx) = test_model("a");
    assert_eq!(
        App::handle_key(&key(KeyCode::Char('X'), KeyModifiers::SHIFT), &model),
        Some(Message::EditorInsert('X'))
    );
}

#[test]
fn test_ctrl_char_is_not_text() {
    let (model, _rx) = test_model("a");
    assert_eq!(
        App::handle_key(&key(KeyCode::Char('b'), KeyModifiers::CONTROL), &model),
        None
    );
}

#[test]
fn test_tab_key_indents_in_editor() {
    let (model, _rx) = test_model("a");
    assert_eq!(
        App::handle_key(&key(KeyCode::Tab, KeyModifiers::NONE), &model),
        Some(Message::EditorTab)
    );
}

#[test]
fn test_tab_key_cycles_focus_in_form() {
    let (mut model, _rx) = test_model("a");
    model.focus = Focus::Field(0);
    assert_eq!(
        App::handle_key(&key(KeyCode::Tab, KeyModifiers::NONE), &model),
        Some(Message::CycleFocus)
    );
}

#[test]
fn test_space_types_in_text_field_but_toggles_checkbox() {
    let (mut model, _rx) = test_model("a");
    model.focus = Focus::Field(0);
    assert_eq!(
        App::handle_key(&key(KeyCode::Char(' '), KeyModifiers::NONE), &model),
        Some(Message::FormInsert(' '))
    );
    model.focus = Focus::Field(1);
    assert_eq!(
        App::handle_key(&key(KeyCode::Char(' '), KeyModifiers::NONE), &model),
        Some(Message::FormToggle)
    );
}

#[test]
fn test_esc_switches_between_editor_and_form() {
    let (mut model, _rx) = test_model("a");
    assert_eq!(
        App::handle_key(&key(KeyCode::Esc, KeyModifiers::NONE), &model),
        Some(Message::CycleFocus)
    );
    model.focus = Focus::Field(1);
    assert_eq!(
        App::handle_key(&key(KeyCode::Esc, KeyModifiers::NONE), &model),
        Some(Message::FocusEditor)
    );
}

#[test]
fn test_arrow_with_shift_extends_selection() {
    let (model, _rx) = test_model("a");
    assert_eq!(
        App::handle_key(&key(KeyCode::Right, KeyModifiers::SHIFT), &model),
        Some(Message::EditorMove(Direction::Right, true))
    );
}

#[test]
fn test_ctrl_q_quits_from_any_focus() {
    let (mut model, _rx) = test_model("a");
    assert_eq!(
        App::handle_key(&key(KeyCode::Char('q'), KeyModifiers::CONTROL), &model),
        Some(Message::Quit)
    );
    model.focus = Focus::Field(0);
    assert_eq!(
        App::handle_key(&key(KeyCode::Char('q'), KeyModifiers::CONTROL), &model),
        Some(Message::Quit)
    );
}

#[test]
fn test_help_swallows_every_key() {
    let (mut model, _rx) = test_model("a");
    assert_eq!(
        App::handle_key(&key(KeyCode::F(1), KeyModifiers::NONE), &model),
        Some(Message::ToggleHelp)
    );
    model.help_visible = true;
    assert_eq!(
        App::handle_key(&key(KeyCode::Char('x'), KeyModifiers::NONE), &model),
        Some(Message::HideHelp)
    );
}

// --- Mouse handling ---

fn click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn wheel_down(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

#[test]
fn test_click_in_editor_maps_row_and_col() {
    let (model, _rx) = test_model("ab\ncd");
    // First text row, one cell right of the gutter.
    let col = crate::ui::editor_text_col(&model) + 1;
    assert_eq!(
        App::handle_mouse(click(col, 1), &model),
        Some(Message::EditorClickAt(0, 1))
    );
}

#[test]
fn test_click_on_gutter_lands_at_line_start() {
    let (model, _rx) = test_model("ab\ncd");
    assert_eq!(
        App::handle_mouse(click(0, 2), &model),
        Some(Message::EditorClickAt(1, 0))
    );
}

#[test]
fn test_click_on_field_focuses_it() {
    let (model, _rx) = test_model("ab");
    let row = u16::try_from(crate::ui::field_page_row(&model, 0)).unwrap();
    assert_eq!(
        App::handle_mouse(click(2, row), &model),
        Some(Message::FieldClick(0))
    );
}

#[test]
fn test_click_on_status_bar_is_ignored() {
    let (model, _rx) = test_model("ab");
    // Terminal is 24 rows; the page gets 23, so row 23 is the status bar.
    assert_eq!(App::handle_mouse(click(0, 23), &model), None);
}

#[test]
fn test_wheel_scrolls_page_when_content_overflows() {
    let text = "line\n".repeat(30);
    let (model, _rx) = test_model(&text);
    assert_eq!(
        App::handle_mouse(wheel_down(0, 5), &model),
        Some(Message::PageScrollDown(3))
    );
}

#[test]
fn test_wheel_over_fixed_editor_scrolls_the_pane() {
    let (model, _rx) = fixed_model("a\nb\nc\nd\ne\nf", 3);
    assert_eq!(
        App::handle_mouse(wheel_down(2, 2), &model),
        Some(Message::EditorScrollDown(3))
    );
}

#[test]
fn test_wheel_outside_fixed_editor_with_short_page_is_ignored() {
    let (model, _rx) = fixed_model("a\nb\nc\nd\ne\nf", 3);
    let row = u16::try_from(crate::ui::field_page_row(&model, 0)).unwrap();
    assert_eq!(App::handle_mouse(wheel_down(0, row), &model), None);
}

// --- Paste and resize events ---

#[test]
fn test_paste_event_targets_editor_only() {
    let (mut model, _rx) = test_model("a");
    let mut debouncer = ResizeDebouncer::new(100);
    assert_eq!(
        App::handle_event(
            Event::Paste("two\nlines".to_string()),
            &model,
            0,
            &mut debouncer
        ),
        Some(Message::EditorPaste("two\nlines".to_string()))
    );
    model.focus = Focus::Field(0);
    assert_eq!(
        App::handle_event(
            Event::Paste("two\nlines".to_string()),
            &model,
            0,
            &mut debouncer
        ),
        None
    );
}

#[test]
fn test_resize_event_queues_into_debouncer() {
    let (model, _rx) = test_model("a");
    let mut debouncer = ResizeDebouncer::new(100);
    assert_eq!(
        App::handle_event(Event::Resize(120, 40), &model, 0, &mut debouncer),
        None
    );
    assert!(debouncer.is_pending());
}

// --- Step: shortcut dispatch and side effects ---

#[test]
fn test_step_save_chord_bypasses_focused_field() {
    let _gate = crate::shortcut::registry_test_guard();
    let (port, rx) = signal::channel();
    let model = Model::new(
        PathBuf::from("test.rs"),
        TextArea::from_text("code"),
        None,
        demo_form(),
        EditorOptions {
            auto_fit_height: true,
            save_shortcut: true,
        },
        port,
        (80, 24),
    );
    let mut model = update(model, Message::FocusField(0));
    let mut debouncer = ResizeDebouncer::new(100);

    let handled = App::step(
        Event::Key(key(KeyCode::Char('s'), KeyModifiers::CONTROL)),
        &mut model,
        0,
        &mut debouncer,
    );

    assert!(handled);
    assert_eq!(rx.try_recv(), Ok(Outbound::SaveChanges));
    // The chord consumed the event; the field never saw the 's'.
    assert_eq!(field_text(&model, 0), "untitled");
    assert_eq!(model.port.pushed_saves(), 1);
}

#[test]
fn test_step_routes_unclaimed_keys_by_focus() {
    let (model, rx) = test_model("ab");
    let mut model = model;
    let mut debouncer = ResizeDebouncer::new(100);

    let handled = App::step(
        Event::Key(key(KeyCode::Char('x'), KeyModifiers::NONE)),
        &mut model,
        0,
        &mut debouncer,
    );

    assert!(handled);
    assert_eq!(model.editor.value(), "xab");
    assert_eq!(
        rx.try_recv(),
        Ok(Outbound::CodeChange {
            value: "xab".to_string()
        })
    );
}

#[test]
fn test_step_ignores_unmapped_keys() {
    let (mut model, rx) = test_model("ab");
    let mut debouncer = ResizeDebouncer::new(100);

    let handled = App::step(
        Event::Key(key(KeyCode::F(5), KeyModifiers::NONE)),
        &mut model,
        0,
        &mut debouncer,
    );

    assert!(!handled);
    assert!(rx.try_recv().is_err());
}

// --- Resize debouncer ---

#[test]
fn test_resize_debouncer_waits_for_quiet_period() {
    let mut debouncer = ResizeDebouncer::new(100);
    debouncer.queue(100, 40, 1000);

    assert_eq!(debouncer.take_ready(1050), None);
    assert!(debouncer.is_pending());
    assert_eq!(debouncer.take_ready(1100), Some((100, 40)));
    assert!(!debouncer.is_pending());
}

#[test]
fn test_resize_debouncer_uses_latest_size() {
    let mut debouncer = ResizeDebouncer::new(100);
    debouncer.queue(100, 40, 1000);
    debouncer.queue(90, 35, 1050);
    debouncer.queue(80, 30, 1060);

    assert_eq!(debouncer.take_ready(1100), None);
    assert_eq!(debouncer.take_ready(1160), Some((80, 30)));
}
