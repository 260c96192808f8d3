use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::models::Song;
use crate::paging::{line_decoration, EffectiveLyricsView, LineContext, LYRICS_FONT_SIZE_STEPS};

use super::helpers::{decoration_rule, wrap_text};

/// A terminal cannot change its glyph size, so each lyrics font step trades
/// horizontal margin for air between lines instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FontScale {
    /// Blank rows after every lyric line.
    pub line_gap: u16,
    /// Columns kept empty on each side of the lyrics.
    pub margin: u16,
    pub bold: bool,
}

const FONT_SCALE: [FontScale; LYRICS_FONT_SIZE_STEPS] = [
    FontScale { line_gap: 0, margin: 2, bold: false },
    FontScale { line_gap: 0, margin: 4, bold: true },
    FontScale { line_gap: 1, margin: 6, bold: false },
    FontScale { line_gap: 1, margin: 8, bold: true },
    FontScale { line_gap: 2, margin: 10, bold: false },
    FontScale { line_gap: 2, margin: 12, bold: true },
];

impl FontScale {
    pub(crate) fn for_index(index: usize) -> Self {
        FONT_SCALE[index.min(FONT_SCALE.len() - 1)]
    }

    /// Inset `area` by the horizontal margin, keeping at least one column.
    pub(crate) fn inset(&self, area: Rect) -> Rect {
        let margin = self.margin.min(area.width.saturating_sub(1) / 2);
        Rect {
            x: area.x + margin,
            width: area.width - margin * 2,
            ..area
        }
    }
}

/// The lyrics of one view laid out into terminal rows.
pub(crate) struct LyricsRows {
    pub lines: Vec<Line<'static>>,
    /// Row of the first chorus line, when the page shows one.
    pub chorus_row: Option<usize>,
}

/// Lay out the visible lines with their separators.
pub(crate) fn lyrics_rows(
    view: &EffectiveLyricsView,
    song: &Song,
    font: FontScale,
    width: u16,
) -> LyricsRows {
    let width = width as usize;
    let page = view.effective_current_page;
    // The chorus-only view is a single stanza: decorate it as one page.
    let (page_index, total_pages) = if view.is_chorus_only_view {
        (0, 1)
    } else {
        (page, view.effective_total_pages)
    };
    let chorus_start = view
        .effective_chorus_start_line_index_by_page
        .get(page)
        .copied()
        .flatten();
    let next_page_chorus_start = if view.is_chorus_only_view {
        None
    } else {
        view.effective_chorus_start_line_index_by_page
            .get(page + 1)
            .copied()
            .flatten()
    };
    let text_style = if font.bold {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut rows = Vec::new();
    let mut chorus_row = None;
    for (line_index, content) in view.lines.iter().enumerate() {
        if chorus_start == Some(line_index) {
            chorus_row = Some(rows.len());
        }
        for row in wrap_text(content, width) {
            rows.push(Line::from(Span::styled(row, text_style)));
        }
        for _ in 0..font.line_gap {
            rows.push(Line::default());
        }

        let ctx = LineContext {
            chorus_start_line_index: chorus_start,
            suppress_end_of_song: view.is_chorus_only_view,
            next_page_chorus_start_index: next_page_chorus_start,
            ..LineContext::new(
                page_index,
                total_pages,
                &view.effective_stanza_index_by_page,
                &song.is_chorus,
                song.language_count(),
                line_index,
                view.lines.len(),
            )
        };
        if let Some(rule) = decoration_rule(&line_decoration(&ctx), width) {
            rows.push(rule);
        }
    }

    LyricsRows {
        lines: rows,
        chorus_row,
    }
}

/// `v / total` with a `C` marker for songs that have a chorus.
pub(crate) fn verse_indicator(
    view: &EffectiveLyricsView,
    total_verses: usize,
    has_chorus: bool,
) -> Paragraph<'static> {
    let mut spans = vec![Span::styled(
        format!("{} / {}", view.display_verse_for_indicator, total_verses),
        Style::default().fg(Color::Gray),
    )];
    if has_chorus {
        let chorus_style = if view.is_chorus_for_indicator {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled("C", chorus_style));
    }
    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::RIGHT))
}

pub(crate) fn header(title: String) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM))
}

/// Shown before the first song arrives, or when opening the database failed.
pub(crate) fn initial_load(error: Option<&str>) -> Paragraph<'static> {
    let mut lines = vec![Line::from(Span::styled(
        "Loading…",
        Style::default().fg(Color::Gray),
    ))];
    if let Some(error) = error {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
}

pub(crate) fn no_song_found(sequence_number: u32) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::from(Span::styled(
            "No song found for this number.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            format!("#{sequence_number}"),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::paging::{build_display_pages, effective_lyrics_view, LyricsViewInput};

    fn song(stanzas: Vec<Vec<&str>>, is_chorus: Vec<bool>) -> Song {
        Song {
            sequence_number: 7,
            titles: BTreeMap::new(),
            stanzas: stanzas
                .into_iter()
                .map(|lines| lines.into_iter().map(String::from).collect())
                .collect(),
            is_chorus,
            languages: vec![1],
            ..Song::default()
        }
    }

    fn view_of(song: &Song, chorus_only: Option<usize>) -> EffectiveLyricsView {
        let pagination = build_display_pages(&song.stanzas, 1, &song.is_chorus);
        effective_lyrics_view(&LyricsViewInput {
            chorus_only_for_verse: chorus_only,
            chorus_only_page: 0,
            current_page: 0,
            current_verse: 1,
            pagination: &pagination,
            stanzas: &song.stanzas,
            is_chorus: &song.is_chorus,
            language_count: 1,
        })
    }

    fn rule_colors(rows: &LyricsRows) -> Vec<Option<Color>> {
        rows.lines
            .iter()
            .filter(|line| line.spans.first().is_some_and(|span| span.content.starts_with(['━', '─', '┈'])))
            .map(|line| line.spans[0].style.fg)
            .collect()
    }

    #[test]
    fn font_scale_is_clamped() {
        assert_eq!(FontScale::for_index(99), FontScale::for_index(LYRICS_FONT_SIZE_STEPS - 1));
        assert_eq!(FontScale::for_index(0).line_gap, 0);
    }

    #[test]
    fn single_verse_ends_with_red_rule() {
        let song = song(vec![vec!["a", "b"]], vec![false]);
        let rows = lyrics_rows(&view_of(&song, None), &song, FontScale::for_index(0), 20);
        assert_eq!(rows.lines.len(), 4);
        assert_eq!(
            rule_colors(&rows),
            vec![Some(Color::DarkGray), Some(Color::Red)]
        );
        assert_eq!(rows.chorus_row, None);
    }

    #[test]
    fn merged_chorus_is_marked_in_yellow() {
        let song = song(vec![vec!["v1", "v2"], vec!["c1", "c2"]], vec![false, true]);
        let rows = lyrics_rows(&view_of(&song, None), &song, FontScale::for_index(0), 20);
        assert_eq!(
            rule_colors(&rows),
            vec![
                Some(Color::DarkGray),
                Some(Color::Yellow),
                Some(Color::DarkGray),
                Some(Color::Red)
            ]
        );
        assert_eq!(rows.chorus_row, Some(4));
    }

    #[test]
    fn chorus_only_view_never_ends_the_song() {
        let song = song(vec![vec!["v1"], vec!["c1"]], vec![false, true]);
        let rows = lyrics_rows(&view_of(&song, Some(1)), &song, FontScale::for_index(0), 20);
        assert_eq!(rows.lines.len(), 1);
        assert!(rule_colors(&rows).is_empty());
    }

    #[test]
    fn wide_glyph_lyrics_all_reach_the_screen() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let song = song(vec![vec!["奇异恩典何等甘甜"]], vec![false]);
        let rows = lyrics_rows(&view_of(&song, None), &song, FontScale::for_index(0), 10);
        assert_eq!(rows.lines.len(), 3);

        let mut terminal = Terminal::new(TestBackend::new(10, 4)).unwrap();
        terminal
            .draw(|frame| frame.render_widget(Paragraph::new(rows.lines), frame.area()))
            .unwrap();
        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        for glyph in "奇异恩典何等甘甜".chars() {
            assert!(rendered.contains(glyph), "{glyph} missing from {rendered:?}");
        }
    }

    #[test]
    fn line_gap_adds_blank_rows() {
        let song = song(vec![vec!["a", "b"]], vec![false]);
        let rows = lyrics_rows(&view_of(&song, None), &song, FontScale::for_index(2), 20);
        assert_eq!(rows.lines.len(), 6);
    }
}
