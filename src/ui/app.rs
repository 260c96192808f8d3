use log::{debug, error, info, warn};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::config::Config;
use crate::db::SongRepository;
use crate::input::{
    ChorusOnlyPosition, Effect, Key, KeyInput, KeyPhase, KeySnapshot, KeyboardMachine,
    ScrollSurface, LEGACY_SONG_NUMBER_KEY,
};
use crate::models::{Song, APP_TITLE};
use crate::paging::{
    build_display_pages, clamp_font_size_index, clamp_page, current_verse_for_page,
    effective_lyrics_view, total_verses, EffectiveLyricsView, LyricsViewInput, Pagination,
};

use super::helpers::{centered_rect, surface_error};
use super::screens::{self, FontScale};

/// Header rows, including its bottom border.
const HEADER_HEIGHT: u16 = 2;
/// Footer space reserved for the status line and key help.
const FOOTER_HEIGHT: u16 = 3;
/// Width of the verse indicator column.
const INDICATOR_WIDTH: u16 = 9;

/// Where the current song request stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Loaded,
    NotFound(u32),
    Failed(String),
}

/// Vertical offset of the lyrics area, clamped to the rows last rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LyricsScroll {
    offset: i64,
    max_offset: i64,
}

impl LyricsScroll {
    pub fn offset(&self) -> u16 {
        u16::try_from(self.offset).unwrap_or(u16::MAX)
    }

    fn reset(&mut self) {
        self.offset = 0;
    }

    fn set_extent(&mut self, content_rows: usize, viewport_rows: u16) {
        let rows = i64::try_from(content_rows).unwrap_or(i64::MAX);
        self.max_offset = (rows - i64::from(viewport_rows)).max(0);
        self.offset = self.offset.clamp(0, self.max_offset);
    }
}

impl ScrollSurface for LyricsScroll {
    fn scroll_offset(&self) -> i64 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: i64) {
        self.offset = offset.clamp(0, self.max_offset);
    }
}

/// Position in the current song. Only effects from the keyboard machine and
/// song loads change it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Position {
    current_page: usize,
    chorus_only_for_verse: Option<usize>,
    chorus_only_page: usize,
}

/// Central application state: the loaded song, where the projector is in it,
/// and the keyboard machine driving both.
pub struct App {
    songs: Box<dyn SongRepository>,
    source_id: i64,
    song: Song,
    pagination: Pagination,
    status: LoadStatus,
    position: Position,
    font_size_index: usize,
    keyboard: KeyboardMachine,
    scroll: LyricsScroll,
    scroll_to_chorus: bool,
    /// Keyboard without release reporting: `Esc` may be a mangled Ctrl+3.
    legacy_keyboard: bool,
}

impl App {
    pub fn new(songs: Box<dyn SongRepository>, config: &Config) -> Self {
        let song = Song::default();
        let pagination = build_display_pages(&song.stanzas, song.language_count(), &song.is_chorus);
        Self {
            songs,
            source_id: config.source_id,
            song,
            pagination,
            status: LoadStatus::Loading,
            position: Position::default(),
            font_size_index: clamp_font_size_index(config.font_size_index as isize),
            keyboard: KeyboardMachine::with_scroll_step(config.scroll_step),
            scroll: LyricsScroll::default(),
            scroll_to_chorus: false,
            legacy_keyboard: false,
        }
    }

    /// App shown when the database could not be opened: it stays on the
    /// loading screen with the error underneath.
    pub fn failed(songs: Box<dyn SongRepository>, config: &Config, message: String) -> Self {
        let mut app = Self::new(songs, config);
        app.status = LoadStatus::Failed(message);
        app
    }

    /// Switch to the legacy key layout: `Esc` no longer quits and the
    /// footer advertises `#` song entry.
    pub fn set_legacy_keyboard(&mut self, legacy: bool) {
        self.legacy_keyboard = legacy;
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn song(&self) -> &Song {
        &self.song
    }

    pub fn current_page(&self) -> usize {
        self.position.current_page
    }

    pub fn chorus_only_for_verse(&self) -> Option<usize> {
        self.position.chorus_only_for_verse
    }

    pub fn font_size_index(&self) -> usize {
        self.font_size_index
    }

    pub fn scroll(&self) -> LyricsScroll {
        self.scroll
    }

    pub fn digit_buffer(&self) -> &str {
        self.keyboard.digit_buffer()
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages()
    }

    pub fn total_verses(&self) -> usize {
        total_verses(&self.song.is_chorus)
    }

    pub fn current_verse(&self) -> usize {
        current_verse_for_page(
            self.position.current_page,
            &self.pagination.stanza_index_by_page,
            &self.song.is_chorus,
        )
    }

    /// Replace the current song. Every load starts on page 0 with the
    /// chorus-only view closed, including a reload of the same number.
    pub fn load_song(&mut self, sequence_number: u32) {
        info!("loading song {sequence_number} from source {}", self.source_id);
        self.status = LoadStatus::Loading;
        let loaded = match self.songs.load_song(self.source_id, sequence_number) {
            Ok(Some(song)) => {
                self.status = LoadStatus::Loaded;
                song
            }
            Ok(None) => {
                warn!("song {sequence_number} not found");
                self.status = LoadStatus::NotFound(sequence_number);
                Song {
                    source_id: self.source_id,
                    sequence_number,
                    ..Song::default()
                }
            }
            Err(err) => {
                error!("failed to load song {sequence_number}: {err}");
                self.status = LoadStatus::Failed(surface_error(&err));
                Song {
                    source_id: self.source_id,
                    sequence_number,
                    ..Song::default()
                }
            }
        };
        self.pagination =
            build_display_pages(&loaded.stanzas, loaded.language_count(), &loaded.is_chorus);
        self.song = loaded;
        self.position = Position::default();
        self.scroll.reset();
        self.scroll_to_chorus = false;
    }

    /// What the lyrics area shows right now.
    pub fn lyrics_view(&self) -> EffectiveLyricsView {
        lyrics_view(&self.song, &self.pagination, self.position, self.current_verse())
    }

    /// Feed one key event through the keyboard machine and apply its
    /// effects. Returns `true` when the user asked to quit.
    pub fn handle_input(&mut self, input: KeyInput) -> bool {
        let quits = match input.key {
            Key::Char('q') => true,
            Key::Escape => !self.legacy_keyboard,
            _ => false,
        };
        if quits && input.phase == KeyPhase::Down && !input.ctrl {
            return true;
        }

        let current_verse = self.current_verse();
        let view = lyrics_view(&self.song, &self.pagination, self.position, current_verse);
        let snapshot = KeySnapshot {
            total_pages: self.pagination.total_pages(),
            current_page: self.position.current_page,
            stanza_index_by_page: &self.pagination.stanza_index_by_page,
            first_stanza_index_by_page: &self.pagination.first_stanza_index_by_page,
            chorus_start_line_index_by_page: &self.pagination.chorus_start_line_index_by_page,
            is_chorus: &self.song.is_chorus,
            chorus_only: view.is_chorus_only_view.then(|| ChorusOnlyPosition {
                verse: view.display_verse_for_indicator,
                sub_page_count: view.effective_total_pages,
                sub_page: view.effective_current_page,
            }),
            total_verses: total_verses(&self.song.is_chorus),
            current_verse,
        };
        let transition = self.keyboard.handle(input, &snapshot, Some(&mut self.scroll));

        for effect in transition.effects {
            self.apply(effect);
        }
        false
    }

    fn apply(&mut self, effect: Effect) {
        debug!("applying {effect:?}");
        match effect {
            Effect::Navigate(page) => {
                let page = clamp_page(page as isize, self.pagination.total_pages());
                if page != self.position.current_page {
                    self.scroll.reset();
                }
                self.position = Position {
                    current_page: page,
                    ..Position::default()
                };
            }
            Effect::FontSizeDelta(delta) => {
                self.font_size_index =
                    clamp_font_size_index(self.font_size_index as isize + isize::from(delta));
            }
            Effect::LoadSong(number) => self.load_song(number),
            Effect::ChorusOnlyChange(verse) => {
                self.position.chorus_only_for_verse = verse;
                self.position.chorus_only_page = 0;
                self.scroll.reset();
            }
            Effect::ChorusOnlyPageNavigate(page) => {
                self.position.chorus_only_page = page;
                self.scroll.reset();
            }
            Effect::ScrollToChorus => self.scroll_to_chorus = true,
        }
    }

    pub(crate) fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        let title = match self.status {
            LoadStatus::Loading => "Loading…".to_string(),
            LoadStatus::Failed(_) if self.song.sequence_number == 0 => APP_TITLE.to_string(),
            _ => self.song.heading(),
        };
        frame.render_widget(screens::header(title), chunks[0]);

        match self.status.clone() {
            LoadStatus::Loading => {
                frame.render_widget(screens::initial_load(None), centered_rect(60, 40, chunks[1]));
            }
            LoadStatus::Failed(message) => {
                frame.render_widget(
                    screens::initial_load(Some(&message)),
                    centered_rect(80, 50, chunks[1]),
                );
            }
            LoadStatus::NotFound(number) => {
                frame.render_widget(screens::no_song_found(number), centered_rect(60, 40, chunks[1]));
            }
            LoadStatus::Loaded if self.song.stanzas.is_empty() => {
                frame.render_widget(
                    screens::no_song_found(self.song.sequence_number),
                    centered_rect(60, 40, chunks[1]),
                );
            }
            LoadStatus::Loaded => self.draw_song(frame, chunks[1]),
        }

        self.draw_footer(frame, chunks[2]);
    }

    fn draw_song(&mut self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(INDICATOR_WIDTH), Constraint::Min(1)])
            .split(area);

        let view = self.lyrics_view();
        frame.render_widget(
            screens::verse_indicator(&view, self.total_verses(), self.song.has_chorus()),
            columns[0],
        );

        let font = FontScale::for_index(self.font_size_index);
        let lyrics_area = font.inset(columns[1]);
        let rows = screens::lyrics_rows(&view, &self.song, font, lyrics_area.width);
        self.scroll.set_extent(rows.lines.len(), lyrics_area.height);
        if std::mem::take(&mut self.scroll_to_chorus) {
            let target = rows.chorus_row.unwrap_or(0);
            self.scroll
                .set_scroll_offset(i64::try_from(target).unwrap_or(i64::MAX));
        }

        let paragraph = Paragraph::new(rows.lines).scroll((self.scroll.offset(), 0));
        frame.render_widget(paragraph, lyrics_area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if !self.keyboard.digit_buffer().is_empty() {
            Line::from(vec![
                Span::raw("Song "),
                Span::styled(
                    format!("{}_", self.keyboard.digit_buffer()),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        } else if self.status == LoadStatus::Loaded {
            let view = self.lyrics_view();
            let mut spans = vec![Span::styled(
                format!(
                    "Page {} / {}",
                    view.effective_current_page + 1,
                    view.effective_total_pages
                ),
                Style::default().fg(Color::Green),
            )];
            if view.is_chorus_only_view {
                spans.push(Span::styled(
                    "  chorus only",
                    Style::default().fg(Color::Yellow),
                ));
            }
            Line::from(spans)
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, footer_instructions(self.legacy_keyboard)])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}

fn lyrics_view(
    song: &Song,
    pagination: &Pagination,
    position: Position,
    current_verse: usize,
) -> EffectiveLyricsView {
    effective_lyrics_view(&LyricsViewInput {
        chorus_only_for_verse: position.chorus_only_for_verse,
        chorus_only_page: position.chorus_only_page,
        current_page: position.current_page,
        current_verse,
        pagination,
        stanzas: &song.stanzas,
        is_chorus: &song.is_chorus,
        language_count: song.language_count(),
    })
}

fn footer_instructions(legacy_keyboard: bool) -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let song_keys = if legacy_keyboard {
        format!("[{LEGACY_SONG_NUMBER_KEY} digits Enter]")
    } else {
        "[Ctrl+digits]".to_string()
    };
    Line::from(vec![
        Span::styled(song_keys, key_style),
        Span::raw(" song  "),
        Span::styled("[←→]", key_style),
        Span::raw(" page  "),
        Span::styled("[1-9]", key_style),
        Span::raw(" verse  "),
        Span::styled("[0]", key_style),
        Span::raw(" chorus  "),
        Span::styled("[+/-]", key_style),
        Span::raw(" size  "),
        Span::styled("[q]", key_style),
        Span::raw(" quit"),
    ])
}
