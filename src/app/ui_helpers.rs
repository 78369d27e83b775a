pub const MAX_INPUT_CHARS: usize = 19;

pub fn is_input_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-' | ':' | 'T')
}

pub fn scroll_offset(current: u16, delta: i32) -> u16 {
    (current as i32).saturating_add(delta).clamp(0, u16::MAX as i32) as u16
}

pub fn clamp_scroll(scroll: u16, total_rows: usize, visible_rows: usize) -> u16 {
    let max = total_rows.saturating_sub(visible_rows).min(u16::MAX as usize) as u16;
    scroll.min(max)
}

pub fn truncate_label(value: &str, max_chars: usize) -> String {
    let count = value.chars().count();
    if count <= max_chars {
        return value.to_string();
    }

    if max_chars <= 3 {
        return value.chars().take(max_chars).collect();
    }

    let prefix: String = value.chars().take(max_chars - 3).collect();
    format!("{}...", prefix)
}
