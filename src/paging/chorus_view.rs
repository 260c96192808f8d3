use super::{clamp_page, lines_per_page, nth_chorus_stanza_index, Pagination};

/// Everything the resolver needs from the host for one render.
#[derive(Debug, Clone, Copy)]
pub struct LyricsViewInput<'a> {
    pub chorus_only_for_verse: Option<usize>,
    /// Sub-page of the isolated chorus; clamped before use.
    pub chorus_only_page: usize,
    pub current_page: usize,
    pub current_verse: usize,
    pub pagination: &'a Pagination,
    pub stanzas: &'a [Vec<String>],
    pub is_chorus: &'a [bool],
    pub language_count: usize,
}

/// What the lyrics area and the verse indicator show for this render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveLyricsView {
    pub lines: Vec<String>,
    pub effective_current_page: usize,
    pub effective_total_pages: usize,
    pub effective_stanza_index_by_page: Vec<usize>,
    pub effective_chorus_start_line_index_by_page: Vec<Option<usize>>,
    pub is_chorus_only_view: bool,
    pub display_verse_for_indicator: usize,
    pub is_chorus_for_indicator: bool,
}

/// Overlay the chorus-only view on top of the normal pages.
///
/// An unset verse, a verse without a chorus or a chorus without lines all
/// fall back to the normal paginated view.
pub fn effective_lyrics_view(input: &LyricsViewInput<'_>) -> EffectiveLyricsView {
    let chorus = input.chorus_only_for_verse.and_then(|verse| {
        let stanza = nth_chorus_stanza_index(verse, input.is_chorus)?;
        let lines = input.stanzas.get(stanza).filter(|lines| !lines.is_empty())?;
        Some((verse, stanza, lines))
    });

    match chorus {
        Some((verse, stanza, lines)) => {
            let capacity = lines_per_page(input.language_count);
            let sub_pages: Vec<&[String]> = lines.chunks(capacity).collect();
            let page = clamp_page(input.chorus_only_page as isize, sub_pages.len());
            EffectiveLyricsView {
                lines: sub_pages[page].to_vec(),
                effective_current_page: page,
                effective_total_pages: sub_pages.len(),
                effective_stanza_index_by_page: vec![stanza],
                effective_chorus_start_line_index_by_page: vec![None],
                is_chorus_only_view: true,
                display_verse_for_indicator: verse,
                is_chorus_for_indicator: true,
            }
        }
        None => {
            let pagination = input.pagination;
            let shows_chorus = pagination
                .stanza_index_by_page
                .get(input.current_page)
                .and_then(|&stanza| input.is_chorus.get(stanza))
                .copied()
                .unwrap_or(false);
            EffectiveLyricsView {
                lines: pagination.page(input.current_page).to_vec(),
                effective_current_page: input.current_page,
                effective_total_pages: pagination.total_pages(),
                effective_stanza_index_by_page: pagination.stanza_index_by_page.clone(),
                effective_chorus_start_line_index_by_page: pagination
                    .chorus_start_line_index_by_page
                    .clone(),
                is_chorus_only_view: false,
                display_verse_for_indicator: input.current_verse,
                is_chorus_for_indicator: shows_chorus,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paging::build_display_pages;

    fn lines(prefix: &str, count: usize) -> Vec<String> {
        (0..count).map(|i| format!("{prefix}{i}")).collect()
    }

    struct Fixture {
        stanzas: Vec<Vec<String>>,
        is_chorus: Vec<bool>,
        pagination: Pagination,
    }

    impl Fixture {
        fn new(stanzas: Vec<Vec<String>>, is_chorus: Vec<bool>) -> Self {
            let pagination = build_display_pages(&stanzas, 1, &is_chorus);
            Self {
                stanzas,
                is_chorus,
                pagination,
            }
        }

        fn view(&self, verse: Option<usize>, sub_page: usize, page: usize) -> EffectiveLyricsView {
            effective_lyrics_view(&LyricsViewInput {
                chorus_only_for_verse: verse,
                chorus_only_page: sub_page,
                current_page: page,
                current_verse: 1,
                pagination: &self.pagination,
                stanzas: &self.stanzas,
                is_chorus: &self.is_chorus,
                language_count: 1,
            })
        }
    }

    #[test]
    fn normal_view_without_chorus_only_verse() {
        let fixture = Fixture::new(vec![lines("v", 3), lines("c", 2)], vec![false, true]);
        let view = fixture.view(None, 0, 0);
        assert!(!view.is_chorus_only_view);
        assert_eq!(view.lines, fixture.pagination.pages[0]);
        assert_eq!(view.effective_total_pages, fixture.pagination.total_pages());
        // the verse page carries the merged chorus tail
        assert!(view.is_chorus_for_indicator);
    }

    #[test]
    fn isolates_the_chorus_for_a_verse() {
        let fixture = Fixture::new(
            vec![lines("v", 8), lines("c", 3), lines("w", 8)],
            vec![false, true, false],
        );
        let view = fixture.view(Some(2), 0, 2);
        assert!(view.is_chorus_only_view);
        assert_eq!(view.lines, lines("c", 3));
        assert_eq!(view.effective_stanza_index_by_page, vec![1]);
        assert_eq!(view.effective_chorus_start_line_index_by_page, vec![None]);
        assert_eq!(view.display_verse_for_indicator, 2);
        assert!(view.is_chorus_for_indicator);
    }

    #[test]
    fn long_chorus_is_paginated_and_clamped() {
        let fixture = Fixture::new(vec![lines("v", 8), lines("c", 10)], vec![false, true]);
        let first = fixture.view(Some(1), 0, 0);
        assert_eq!(first.effective_total_pages, 2);
        assert_eq!(first.lines.len(), 8);

        let clamped = fixture.view(Some(1), 9, 0);
        assert_eq!(clamped.effective_current_page, 1);
        assert_eq!(clamped.lines, vec!["c8".to_string(), "c9".to_string()]);
    }

    #[test]
    fn falls_back_when_chorus_is_missing_or_empty() {
        let no_chorus = Fixture::new(vec![lines("v", 3)], vec![false]);
        assert!(!no_chorus.view(Some(1), 0, 0).is_chorus_only_view);

        let empty_chorus = Fixture::new(vec![lines("v", 3), Vec::new()], vec![false, true]);
        let view = empty_chorus.view(Some(1), 0, 0);
        assert!(!view.is_chorus_only_view);
        assert_eq!(view.display_verse_for_indicator, 1);
    }
}
