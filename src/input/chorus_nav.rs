use crate::paging::{clamp_page, stanza_index_for_verse};

use super::Key;

/// Where the user is inside the isolated chorus view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChorusOnlyPosition {
    pub verse: usize,
    pub sub_page_count: usize,
    pub sub_page: usize,
}

/// Outcome of a navigation key pressed inside the chorus-only view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChorusOnlyNavigation {
    /// Leave the chorus and show the first page of a neighbouring verse.
    /// `None` means there is no such verse: the key is consumed and the view
    /// stays where it is.
    ExitToVerse { target_page: Option<usize> },
    /// Move to another sub-page of the chorus.
    ChorusPage { page: usize },
}

/// Decide what an Arrow/Page key does while the chorus-only view is open.
///
/// Returns `None` when the key is not a navigation key or the view has no
/// sub-pages, in which case normal page navigation applies.
pub fn chorus_only_navigation(
    key: Key,
    position: ChorusOnlyPosition,
    total_verses: usize,
    first_stanza_index_by_page: &[usize],
    is_chorus: &[bool],
) -> Option<ChorusOnlyNavigation> {
    if position.sub_page_count == 0 {
        return None;
    }
    let at_first = position.sub_page == 0;
    let at_last = position.sub_page + 1 >= position.sub_page_count;

    let exit_towards = |verse: Option<usize>| ChorusOnlyNavigation::ExitToVerse {
        target_page: verse.and_then(|verse| {
            first_page_of_verse(verse, total_verses, first_stanza_index_by_page, is_chorus)
        }),
    };

    match key {
        Key::ArrowRight if at_last => Some(exit_towards(position.verse.checked_add(1))),
        Key::ArrowLeft if at_first => Some(exit_towards(position.verse.checked_sub(1))),
        Key::ArrowRight | Key::PageDown => Some(ChorusOnlyNavigation::ChorusPage {
            page: clamp_page(position.sub_page as isize + 1, position.sub_page_count),
        }),
        Key::ArrowLeft | Key::PageUp => Some(ChorusOnlyNavigation::ChorusPage {
            page: clamp_page(position.sub_page as isize - 1, position.sub_page_count),
        }),
        _ => None,
    }
}

fn first_page_of_verse(
    verse: usize,
    total_verses: usize,
    first_stanza_index_by_page: &[usize],
    is_chorus: &[bool],
) -> Option<usize> {
    if verse < 1 || verse > total_verses {
        return None;
    }
    let stanza = stanza_index_for_verse(verse, is_chorus)?;
    first_stanza_index_by_page.iter().position(|&s| s == stanza)
}

#[cfg(test)]
mod tests {
    use super::*;

    // verse 1 (stanza 0), chorus (stanza 1), verse 2 (stanza 2)
    const V1_C_V2: [bool; 3] = [false, true, false];
    const V1_C_V2_PAGES: [usize; 3] = [0, 1, 2];
    // V1 (0), C (1), V2 (2), C (3), V3 (4)
    const THREE_VERSES: [bool; 5] = [false, true, false, true, false];
    const THREE_VERSES_PAGES: [usize; 5] = [0, 1, 2, 3, 4];

    fn at(verse: usize, sub_page_count: usize, sub_page: usize) -> ChorusOnlyPosition {
        ChorusOnlyPosition {
            verse,
            sub_page_count,
            sub_page,
        }
    }

    fn two_verses(key: Key, position: ChorusOnlyPosition) -> Option<ChorusOnlyNavigation> {
        chorus_only_navigation(key, position, 2, &V1_C_V2_PAGES, &V1_C_V2)
    }

    #[test]
    fn no_sub_pages_falls_back_to_normal_navigation() {
        assert_eq!(two_verses(Key::ArrowRight, at(1, 0, 0)), None);
    }

    #[test]
    fn non_navigation_keys_are_ignored() {
        assert_eq!(two_verses(Key::Char('='), at(1, 1, 0)), None);
    }

    #[test]
    fn single_page_right_exits_to_next_verse() {
        assert_eq!(
            two_verses(Key::ArrowRight, at(1, 1, 0)),
            Some(ChorusOnlyNavigation::ExitToVerse {
                target_page: Some(2)
            })
        );
    }

    #[test]
    fn single_page_left_on_first_verse_stays() {
        assert_eq!(
            two_verses(Key::ArrowLeft, at(1, 1, 0)),
            Some(ChorusOnlyNavigation::ExitToVerse { target_page: None })
        );
    }

    #[test]
    fn multi_page_moves_within_chorus_before_exiting() {
        assert_eq!(
            two_verses(Key::ArrowRight, at(1, 2, 0)),
            Some(ChorusOnlyNavigation::ChorusPage { page: 1 })
        );
        assert_eq!(
            two_verses(Key::ArrowRight, at(1, 2, 1)),
            Some(ChorusOnlyNavigation::ExitToVerse {
                target_page: Some(2)
            })
        );
        assert_eq!(
            two_verses(Key::ArrowLeft, at(1, 2, 1)),
            Some(ChorusOnlyNavigation::ChorusPage { page: 0 })
        );
        assert_eq!(
            two_verses(Key::ArrowLeft, at(1, 2, 0)),
            Some(ChorusOnlyNavigation::ExitToVerse { target_page: None })
        );
    }

    #[test]
    fn page_keys_never_exit() {
        assert_eq!(
            two_verses(Key::PageDown, at(1, 2, 0)),
            Some(ChorusOnlyNavigation::ChorusPage { page: 1 })
        );
        assert_eq!(
            two_verses(Key::PageUp, at(1, 2, 1)),
            Some(ChorusOnlyNavigation::ChorusPage { page: 0 })
        );
        assert_eq!(
            two_verses(Key::PageDown, at(2, 1, 0)),
            Some(ChorusOnlyNavigation::ChorusPage { page: 0 })
        );
    }

    #[test]
    fn left_from_second_verse_chorus_returns_to_first_verse() {
        assert_eq!(
            chorus_only_navigation(
                Key::ArrowLeft,
                at(2, 1, 0),
                3,
                &THREE_VERSES_PAGES,
                &THREE_VERSES
            ),
            Some(ChorusOnlyNavigation::ExitToVerse {
                target_page: Some(0)
            })
        );
    }

    #[test]
    fn last_verse_chorus_consumes_right_arrow() {
        assert_eq!(
            two_verses(Key::ArrowRight, at(2, 1, 0)),
            Some(ChorusOnlyNavigation::ExitToVerse { target_page: None })
        );
        assert_eq!(
            two_verses(Key::ArrowRight, at(2, 2, 1)),
            Some(ChorusOnlyNavigation::ExitToVerse { target_page: None })
        );
    }
}
