use std::error::Error;
use std::mem;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::paging::LineDecoration;

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for the loading and "no song" screens.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant message from an error and its sources.
pub(crate) fn surface_error(err: &dyn Error) -> String {
    let mut cause = err;
    while let Some(source) = cause.source() {
        cause = source;
    }
    cause.to_string()
}

/// Greedy word wrap measured in terminal columns. Words wider than `width`
/// (CJK lines without spaces, for one) are split between glyphs.
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    for word in text.split_whitespace() {
        let word_width = word.width();
        let needed = if current.is_empty() {
            word_width
        } else {
            current_width + 1 + word_width
        };
        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
            continue;
        }

        if !current.is_empty() {
            rows.push(mem::take(&mut current));
            current_width = 0;
        }
        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }
        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if !current.is_empty() && current_width + ch_width > width {
                rows.push(mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }
    }
    if !current.is_empty() || rows.is_empty() {
        rows.push(current);
    }
    rows
}

/// The rule drawn under a lyric line, if any.
pub(crate) fn decoration_rule(decoration: &LineDecoration, width: usize) -> Option<Line<'static>> {
    let (glyph, style) = if decoration.show_end_of_song {
        ("━", Style::default().fg(Color::Red))
    } else if decoration.show_yellow_line {
        ("━", Style::default().fg(Color::Yellow))
    } else if decoration.show_verse_end_line {
        ("─", Style::default().fg(Color::Gray))
    } else if decoration.show_language_divider {
        ("┈", Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM))
    } else {
        return None;
    };
    Some(Line::from(Span::styled(glyph.repeat(width), style)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            wrap_text("Amazing grace how sweet the sound", 14),
            vec!["Amazing grace", "how sweet the", "sound"]
        );
    }

    #[test]
    fn splits_words_longer_than_the_row() {
        assert_eq!(wrap_text("abcdefgh ij", 3), vec!["abc", "def", "gh", "ij"]);
    }

    #[test]
    fn wide_glyphs_wrap_by_column() {
        let rows = wrap_text("奇异恩典何等甘甜", 10);
        assert_eq!(rows, vec!["奇异恩典何", "等甘甜"]);
        assert!(rows.iter().all(|row| row.width() <= 10));
    }

    #[test]
    fn glyph_wider_than_the_row_gets_its_own_row() {
        assert_eq!(wrap_text("恩典", 1), vec!["恩", "典"]);
    }

    #[test]
    fn mixed_scripts_measure_columns() {
        assert_eq!(wrap_text("grace 恩典 sound", 10), vec!["grace 恩典", "sound"]);
    }

    #[test]
    fn blank_line_keeps_one_row() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
        assert_eq!(wrap_text("   ", 10), vec![String::new()]);
    }

    #[test]
    fn only_one_rule_per_line() {
        let end = LineDecoration {
            show_end_of_song: true,
            ..LineDecoration::default()
        };
        let rule = decoration_rule(&end, 4).unwrap();
        assert_eq!(rule.spans[0].style.fg, Some(Color::Red));
        assert!(decoration_rule(&LineDecoration::default(), 4).is_none());
    }

    #[test]
    fn surfaces_innermost_cause() {
        let err = crate::config::ConfigError::Io(std::io::Error::other("disk gone"));
        assert_eq!(surface_error(&err), "disk gone");
    }
}
