/// Which separator to draw after a rendered line. At most one flag is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineDecoration {
    /// Transition from a verse into its chorus.
    pub show_yellow_line: bool,
    /// Lighter rule closing a verse that is not followed by a chorus.
    pub show_verse_end_line: bool,
    /// Boundary between language groups inside an interleaved block.
    pub show_language_divider: bool,
    pub show_end_of_song: bool,
}

/// Position of one rendered line within the current view.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    pub page_index: usize,
    pub total_pages: usize,
    pub stanza_index_by_page: &'a [usize],
    pub is_chorus: &'a [bool],
    pub language_count: usize,
    pub line_index: usize,
    pub page_line_count: usize,
    /// Where merged chorus text begins on this page.
    pub chorus_start_line_index: Option<usize>,
    /// Set by the chorus-only view, which never ends the song.
    pub suppress_end_of_song: bool,
    /// Merged chorus start on the following page. When present the yellow
    /// rule is drawn there instead of at the bottom of this page.
    pub next_page_chorus_start_index: Option<usize>,
}

impl<'a> LineContext<'a> {
    /// Context for `line_index` on a plain page; the optional fields start
    /// out empty.
    pub fn new(
        page_index: usize,
        total_pages: usize,
        stanza_index_by_page: &'a [usize],
        is_chorus: &'a [bool],
        language_count: usize,
        line_index: usize,
        page_line_count: usize,
    ) -> Self {
        Self {
            page_index,
            total_pages,
            stanza_index_by_page,
            is_chorus,
            language_count,
            line_index,
            page_line_count,
            chorus_start_line_index: None,
            suppress_end_of_song: false,
            next_page_chorus_start_index: None,
        }
    }
}

/// Decide the separator after a line.
///
/// The end-of-song rule wins over every other marker; after that the chorus
/// transition, then the verse end, then the language divider.
pub fn line_decoration(ctx: &LineContext<'_>) -> LineDecoration {
    let stanza = ctx
        .stanza_index_by_page
        .get(ctx.page_index)
        .copied()
        .unwrap_or(0);
    let is_verse = !ctx.is_chorus.get(stanza).copied().unwrap_or(false);
    let next_stanza_is_chorus = ctx.is_chorus.get(stanza + 1).copied().unwrap_or(false);
    let is_last_line = ctx.line_index + 1 == ctx.page_line_count;
    let is_last_page_of_stanza = ctx.page_index + 1 >= ctx.total_pages
        || ctx.stanza_index_by_page.get(ctx.page_index + 1) != Some(&stanza);

    let is_end_of_song =
        !ctx.suppress_end_of_song && ctx.page_index + 1 == ctx.total_pages && is_last_line;
    if is_end_of_song {
        return LineDecoration {
            show_end_of_song: true,
            ..LineDecoration::default()
        };
    }

    let merged_boundary = ctx
        .chorus_start_line_index
        .is_some_and(|start| start > 0 && ctx.line_index == start - 1);
    let chorus_follows = is_verse
        && next_stanza_is_chorus
        && is_last_line
        && is_last_page_of_stanza
        && ctx.next_page_chorus_start_index.is_none();
    let show_yellow_line = merged_boundary || chorus_follows;

    let show_verse_end_line =
        !show_yellow_line && is_verse && is_last_line && is_last_page_of_stanza;

    let language_count = ctx.language_count.max(1);
    let show_language_divider = !show_yellow_line
        && !show_verse_end_line
        && !is_last_line
        && (ctx.line_index + 1) % language_count == 0;

    LineDecoration {
        show_yellow_line,
        show_verse_end_line,
        show_language_divider,
        show_end_of_song: false,
    }
}
