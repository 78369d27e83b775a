use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, ui_helpers};

impl App {
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let now = self.snapshot.now;

        match key.code {
            KeyCode::Char('c') if ctrl => return true,
            KeyCode::Char('q') if self.dashboard.raw_input().is_empty() => return true,
            KeyCode::Tab => self.set_view(self.dashboard.view().next(now)),
            KeyCode::BackTab => self.set_view(self.dashboard.view().prev(now)),
            KeyCode::Left => self.set_view(self.dashboard.view().with_prev_month()),
            KeyCode::Right => self.set_view(self.dashboard.view().with_next_month()),
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-10),
            KeyCode::PageDown => self.scroll_by(10),
            KeyCode::Home => self.scroll_by(i32::MIN),
            KeyCode::Backspace => self.edit_input(|raw| {
                raw.pop();
            }),
            KeyCode::Esc => self.edit_input(String::clear),
            KeyCode::Char(c) if ui_helpers::is_input_char(c) => {
                self.edit_input(|raw| {
                    if raw.chars().count() < ui_helpers::MAX_INPUT_CHARS {
                        raw.push(c);
                    }
                });
            }
            _ => {}
        }

        false
    }

    fn scroll_by(&mut self, delta: i32) {
        self.scroll = ui_helpers::scroll_offset(self.scroll, delta);
        self.render_needed = true;
    }
}
