use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::app::{Focus, Model, ToastLevel};
use crate::form::Control;

/// Render the whole frame: the scrolled page, then the fixed footer rows
/// and any overlay.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    if area.height == 0 || area.width < 4 {
        return;
    }

    let toast_active = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(toast_active);
    let content_area = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let toast_area = Rect {
        y: area.y + area.height.saturating_sub(2),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    let lines = build_page_lines(model, area.width);
    let start = model.page.offset().min(lines.len());
    let end = (start + content_area.height as usize).min(lines.len());
    let visible: Vec<Line> = lines[start..end].to_vec();
    frame.render_widget(Paragraph::new(visible), content_area);

    if toast_active {
        render_toast_bar(model, frame, toast_area);
    }
    render_status_bar(model, frame, status_area);

    if model.help_visible {
        render_help(frame, area);
    }
}

/// Build every page row as a line; the caller slices out the visible ones.
fn build_page_lines(model: &Model, width: u16) -> Vec<Line<'static>> {
    let border = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::with_capacity(crate::ui::page_rows(model));

    let filename = model
        .file_path
        .file_name()
        .map_or_else(|| "untitled".to_string(), |s| s.to_string_lossy().to_string());
    lines.push(top_rule(&filename, width, border));
    for row in 0..model.editor.height() {
        lines.push(editor_row_line(model, row, width, border));
    }
    lines.push(bottom_rule(width, border));

    if !model.form.is_empty() {
        for _ in 0..crate::ui::BLOCK_SPACING {
            lines.push(Line::default());
        }
        let title = if model.form.is_dirty() {
            "Settings*"
        } else {
            "Settings"
        };
        lines.push(top_rule(title, width, border));
        for idx in 0..model.form.len() {
            lines.push(field_line(model, idx, width, border));
        }
        lines.push(bottom_rule(width, border));
    }

    lines
}

/// One editor pane row: left border, gutter cell, text with selection and
/// caret, padding, right border.
fn editor_row_line(model: &Model, row: usize, width: u16, border: Style) -> Line<'static> {
    let mut spans = vec![Span::styled("│", border)];

    if let Some(gutter) = &model.gutter {
        // Numbers come from the gutter's own offset. When nothing keeps it
        // in sync with the editor they visibly drift.
        let gw = crate::ui::gutter_width(model) as usize;
        let shown = gutter.scroll_top() + row;
        if shown < model.editor.line_count() {
            spans.push(Span::styled(
                format!("{:>w$} ", shown + 1, w = gw.saturating_sub(1)),
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            spans.push(Span::raw(" ".repeat(gw)));
        }
    } else {
        spans.push(Span::raw(" "));
    }

    let line_idx = model.editor.scroll_top() + row;
    if line_idx < model.editor.line_count() {
        spans.extend(editor_line_spans(model, line_idx));
    }

    boxed_line(spans, width, border)
}

/// Text spans of one editor line, split at selection edges and the caret.
fn editor_line_spans(model: &Model, line_idx: usize) -> Vec<Span<'static>> {
    let caret_style = Style::default().bg(Color::White).fg(Color::Black);
    let selection_style = Style::default().bg(Color::DarkGray).fg(Color::White);

    let text = model.editor.line_text(line_idx);
    let line_start = model.editor.line_col_to_char(line_idx, 0);
    let (sel_start, sel_end) = model.editor.selection();
    let caret = model.editor.caret();
    let focused = model.editor_focused();
    let (caret_line, _) = model.editor.caret_line_col();

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style: Option<Style> = None;

    let mut flush = |run: &mut String, style: Option<Style>, spans: &mut Vec<Span<'static>>| {
        if run.is_empty() {
            return;
        }
        let text = std::mem::take(run);
        match style {
            Some(style) => spans.push(Span::styled(text, style)),
            None => spans.push(Span::raw(text)),
        }
    };

    for (i, ch) in text.chars().enumerate() {
        let gi = line_start + i;
        let style = if focused && gi == caret {
            Some(caret_style)
        } else if sel_start != sel_end && gi >= sel_start && gi < sel_end {
            Some(selection_style)
        } else {
            None
        };
        if style != run_style {
            flush(&mut run, run_style, &mut spans);
            run_style = style;
        }
        run.push(ch);
    }
    flush(&mut run, run_style, &mut spans);

    // Caret sitting past the last char of its line renders as a block.
    if focused && caret_line == line_idx && caret == line_start + text.chars().count() {
        spans.push(Span::styled(" ", caret_style));
    }

    spans
}

/// One form row: label and control, with the focused field highlighted.
fn field_line(model: &Model, idx: usize, width: u16, border: Style) -> Line<'static> {
    let caret_style = Style::default().bg(Color::White).fg(Color::Black);
    let focused = model.focused_field() == Some(idx);
    let label_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let mut spans = vec![Span::styled("│", border), Span::raw(" ")];
    let field = &model.form.fields()[idx];
    match &field.control {
        Control::Text { value, .. } => {
            spans.push(Span::styled(format!("{}: ", field.name), label_style));
            spans.push(Span::raw(value.clone()));
            if focused {
                spans.push(Span::styled(" ", caret_style));
            }
        }
        Control::Checkbox { checked, .. } => {
            let mark = if *checked { "[x] " } else { "[ ] " };
            spans.push(Span::styled(mark, label_style));
            spans.push(Span::styled(field.name.clone(), label_style));
        }
    }

    boxed_line(spans, width, border)
}

/// Pad `spans` (which already start with the left border) to the frame
/// width and close with the right border.
fn boxed_line(mut spans: Vec<Span<'static>>, width: u16, border: Style) -> Line<'static> {
    let used: usize = spans.iter().map(|s| s.content.width()).sum();
    let pad = (width as usize).saturating_sub(used + 1);
    if pad > 0 {
        spans.push(Span::raw(" ".repeat(pad)));
    }
    spans.push(Span::styled("│", border));
    Line::from(spans)
}

fn top_rule(title: &str, width: u16, style: Style) -> Line<'static> {
    let inner = width.saturating_sub(2) as usize;
    let mut label = format!("─ {title} ");
    while label.width() > inner {
        label.pop();
    }
    let fill = "─".repeat(inner - label.width());
    Line::from(Span::styled(format!("┌{label}{fill}┐"), style))
}

fn bottom_rule(width: u16, style: Style) -> Line<'static> {
    let inner = width.saturating_sub(2) as usize;
    Line::from(Span::styled(format!("└{}┘", "─".repeat(inner)), style))
}

fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let filename = model
        .file_path
        .file_name()
        .map_or_else(|| "untitled".to_string(), |s| s.to_string_lossy().to_string());

    let (line, col) = model.editor.caret_line_col();
    let focus = match model.focus {
        Focus::Editor => "[editor]".to_string(),
        Focus::Field(idx) => model
            .form
            .fields()
            .get(idx)
            .map_or_else(|| "[form]".to_string(), |f| format!("[form: {}]", f.name)),
    };

    let status = format!(
        " {}  Ln {}, Col {}  changes:{} saves:{}  {}  F1:help",
        filename,
        line + 1,
        col + 1,
        model.port.pushed_changes(),
        model.port.pushed_saves(),
        focus,
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let width = 44.min(area.width);
    let height = 16.min(area.height);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let lines: Vec<Line> = [
        "",
        "  Editing",
        "    Tab            indent two spaces",
        "    Shift+arrows   select",
        "    Ctrl+A         select all",
        "    Ctrl+S/Cmd+S   save (works anywhere)",
        "",
        "  Focus",
        "    Esc            switch editor/form",
        "    Tab (in form)  next field",
        "    Space          toggle checkbox",
        "",
        "  Ctrl+Q quit   F1 close help",
    ]
    .iter()
    .map(|s| Line::from(*s))
    .collect();

    let block = ratatui::widgets::Block::bordered().title(" Help ");
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{EditorOptions, Gutter, TextArea};
    use crate::form::{Field, Form};
    use crate::signal;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::path::PathBuf;

    fn test_model(text: &str) -> Model {
        let (port, _rx) = signal::channel();
        Model::new(
            PathBuf::from("demo.rs"),
            TextArea::from_text(text),
            Some(Gutter::new()),
            Form::new(vec![
                Field::text("Title", "untitled"),
                Field::checkbox("Autosave", false),
            ]),
            EditorOptions {
                auto_fit_height: true,
                save_shortcut: false,
            },
            port,
            (40, 16),
        )
    }

    fn draw(model: &Model, width: u16, height: u16) -> Vec<String> {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(model, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer.cell((x, y)).unwrap().symbol().to_string())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_renders_gutter_numbers_and_text() {
        let model = test_model("alpha\nbeta");
        let rows = draw(&model, 40, 16);
        assert!(rows[1].contains("1 alpha"));
        assert!(rows[2].contains("2 beta"));
    }

    #[test]
    fn test_renders_form_fields() {
        let model = test_model("x");
        let rows = draw(&model, 40, 16);
        let page = rows.join("\n");
        assert!(page.contains("Settings"));
        assert!(page.contains("Title: untitled"));
        assert!(page.contains("[ ] Autosave"));
    }

    #[test]
    fn test_status_bar_shows_caret_and_counters() {
        let model = test_model("abc");
        let rows = draw(&model, 40, 16);
        let status = rows.last().unwrap();
        assert!(status.contains("demo.rs"));
        assert!(status.contains("Ln 1, Col 1"));
        assert!(status.contains("changes:0 saves:0"));
    }

    #[test]
    fn test_drifted_gutter_shows_wrong_numbers() {
        let mut model = test_model("a\nb\nc\nd\ne\nf\ng\nh");
        if let Some(gutter) = model.gutter.as_mut() {
            gutter.set_scroll_top(3);
        }
        let rows = draw(&model, 40, 16);
        // First content row is line 1, but the gutter starts counting at 4.
        assert!(rows[1].contains("4 a"));
    }

    #[test]
    fn test_focused_field_shows_highlight() {
        let mut model = test_model("x");
        model.focus = Focus::Field(1);
        let rows = draw(&model, 40, 16);
        let page = rows.join("\n");
        assert!(page.contains("[ ] Autosave"));
    }

    #[test]
    fn test_help_overlay_renders() {
        let mut model = test_model("x");
        model.help_visible = true;
        let rows = draw(&model, 60, 20);
        let page = rows.join("\n");
        assert!(page.contains("Help"));
        assert!(page.contains("indent two spaces"));
    }
}
