//! Lookups between stanza indices, verse numbers and chorus occurrences.
//!
//! Verses are the non-chorus stanzas, numbered from 1 in song order. A chorus
//! does not advance the verse count, so `[V, C, V]` has two verses.

/// Number of verses in the song, never less than 1.
pub fn total_verses(is_chorus: &[bool]) -> usize {
    is_chorus.iter().filter(|&&chorus| !chorus).count().max(1)
}

/// Stanza index of the `verse`-th verse (1-based).
pub fn stanza_index_for_verse(verse: usize, is_chorus: &[bool]) -> Option<usize> {
    if verse == 0 {
        return None;
    }
    is_chorus
        .iter()
        .enumerate()
        .filter(|&(_, &chorus)| !chorus)
        .nth(verse - 1)
        .map(|(index, _)| index)
}

/// First chorus stanza after the given verse's stanza.
pub fn chorus_stanza_index_after_verse(verse: usize, is_chorus: &[bool]) -> Option<usize> {
    let verse_stanza = stanza_index_for_verse(verse, is_chorus)?;
    is_chorus
        .iter()
        .enumerate()
        .skip(verse_stanza + 1)
        .find(|&(_, &chorus)| chorus)
        .map(|(index, _)| index)
}

/// Stanza index of the `n`-th chorus (1-based).
///
/// "Show the chorus for verse N" maps verse 1 to the first chorus, verse 2 to
/// the second and so on. Songs that repeat one chorus for every verse have
/// fewer choruses than verses, so a request past the end answers the last
/// chorus instead of nothing.
pub fn nth_chorus_stanza_index(n: usize, is_chorus: &[bool]) -> Option<usize> {
    if n == 0 {
        return None;
    }
    let choruses: Vec<usize> = is_chorus
        .iter()
        .enumerate()
        .filter(|&(_, &chorus)| chorus)
        .map(|(index, _)| index)
        .collect();
    let last = choruses.len().checked_sub(1)?;
    choruses.get((n - 1).min(last)).copied()
}

/// Verse number shown on `page`: verses up to and including the stanza at the
/// end of that page. A page holding a merged chorus reports the verse it
/// belongs to.
pub fn current_verse_for_page(
    page: usize,
    stanza_index_by_page: &[usize],
    is_chorus: &[bool],
) -> usize {
    let Some(&stanza) = stanza_index_by_page.get(page) else {
        return 1;
    };
    is_chorus
        .iter()
        .take(stanza + 1)
        .filter(|&&chorus| !chorus)
        .count()
}

/// Whether pressing `0` should open the chorus-only view for `current_verse`.
pub fn should_enter_chorus_only_on_zero(
    chorus_only_for_verse: Option<usize>,
    current_verse: usize,
    first_stanza_index_by_page: &[usize],
    is_chorus: &[bool],
) -> bool {
    chorus_only_for_verse.is_none()
        && current_verse >= 1
        && !first_stanza_index_by_page.is_empty()
        && nth_chorus_stanza_index(current_verse, is_chorus).is_some()
}
