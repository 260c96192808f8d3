//! Pure pagination engine for the projector. Everything in here is a total
//! function over already-loaded stanza data: the host recomputes it on every
//! render, so nothing keeps state between calls.

mod chorus_view;
mod decorator;
mod indexer;
mod paginator;

pub use chorus_view::{effective_lyrics_view, EffectiveLyricsView, LyricsViewInput};
pub use decorator::{line_decoration, LineContext, LineDecoration};
pub use indexer::{
    chorus_stanza_index_after_verse, current_verse_for_page, nth_chorus_stanza_index,
    should_enter_chorus_only_on_zero, stanza_index_for_verse, total_verses,
};
pub use paginator::{build_display_pages, Pagination};

/// Maximum sentences per language on one page (4 per language, so 8 rows for
/// a bilingual song).
pub const SENTENCES_PER_LANGUAGE: usize = 4;
/// Single-language songs have no alternating rows and fit a full 8 lines.
pub const LINES_PER_PAGE_SINGLE_LANGUAGE: usize = 8;
/// Number of steps on the lyrics size scale. `=`/`+` moves up, `-` down.
pub const LYRICS_FONT_SIZE_STEPS: usize = 6;
/// Size step used when a song opens.
pub const DEFAULT_LYRICS_FONT_SIZE_INDEX: usize = 0;

/// Page capacity for a song with `language_count` interleaved languages.
pub fn lines_per_page(language_count: usize) -> usize {
    if language_count <= 1 {
        LINES_PER_PAGE_SINGLE_LANGUAGE
    } else {
        SENTENCES_PER_LANGUAGE * language_count
    }
}

/// Clamp a signed page request into `[0, total - 1]`. An empty range always
/// answers `0` so callers never have to special-case songs without pages.
pub fn clamp_page(page: isize, total: usize) -> usize {
    if total == 0 || page <= 0 {
        return 0;
    }
    (page as usize).min(total - 1)
}

pub fn clamp_font_size_index(index: isize) -> usize {
    clamp_page(index, LYRICS_FONT_SIZE_STEPS)
}
