use std::collections::{BTreeMap, BTreeSet, HashSet};

use log::{debug, warn};
use rusqlite::{params, Connection};

use super::LoadError;
use crate::models::{Section, Song};

const TITLE_SQL: &str = "
    SELECT Song.TitleName, Song.LanguageSkid
    FROM Song
    INNER JOIN SourceSong ON (
        SourceSong.SongSkid = Song.SongSkid
        AND SourceSong.LanguageSkid = Song.LanguageSkid
    )
    INNER JOIN Source ON (
        Source.SourceSkid = SourceSong.SourceSkid
        AND Source.LanguageSkid = SourceSong.LanguageSkid
    )
    WHERE Source.SourceSkid = ?1 AND SourceSong.SourceSequenceNbr = ?2
    ORDER BY Song.LanguageSkid";

const STANZAS_SQL: &str = "
    SELECT Stanza.StanzaSequenceNbr, Sentence.Content,
        StanzaSentence.SentenceSequenceNbr, Stanza.LanguageSkid
    FROM Sentence
    INNER JOIN StanzaSentence ON (
        StanzaSentence.SentenceSkid = Sentence.SentenceSkid
    )
    INNER JOIN Stanza ON (
        Stanza.SongSkid = StanzaSentence.SongSkid
        AND Stanza.LanguageSkid = StanzaSentence.LanguageSkid
        AND Stanza.StanzaSequenceNbr = StanzaSentence.StanzaSequenceNbr
    )
    INNER JOIN SourceSong ON (
        SourceSong.SongSkid = Stanza.SongSkid
        AND SourceSong.LanguageSkid = Stanza.LanguageSkid
    )
    INNER JOIN Source ON (
        Source.SourceSkid = SourceSong.SourceSkid
        AND Source.LanguageSkid = SourceSong.LanguageSkid
    )
    WHERE Source.SourceSkid = ?1 AND SourceSong.SourceSequenceNbr = ?2
    ORDER BY Stanza.StanzaSequenceNbr, StanzaSentence.SentenceSequenceNbr, Stanza.LanguageSkid";

const CHORUS_SENTENCES_SQL: &str = "
    SELECT Stanza.StanzaSequenceNbr, Sentence.Content,
        ChorusSentence.SentenceSequenceNbr, ChorusSentence.LanguageSkid
    FROM Sentence
    INNER JOIN ChorusSentence ON (
        ChorusSentence.SentenceSkid = Sentence.SentenceSkid
    )
    INNER JOIN Chorus ON (
        Chorus.ChorusSkid = ChorusSentence.ChorusSkid
        AND Chorus.LanguageSkid = ChorusSentence.LanguageSkid
    )
    INNER JOIN Stanza ON (
        Stanza.ChorusSkid = Chorus.ChorusSkid
        AND Stanza.LanguageSkid = ChorusSentence.LanguageSkid
    )
    INNER JOIN SourceSong ON (
        SourceSong.SongSkid = Stanza.SongSkid
        AND SourceSong.LanguageSkid = Stanza.LanguageSkid
    )
    INNER JOIN Source ON (
        Source.SourceSkid = SourceSong.SourceSkid
        AND Source.LanguageSkid = SourceSong.LanguageSkid
    )
    WHERE Source.SourceSkid = ?1 AND SourceSong.SourceSequenceNbr = ?2
    ORDER BY Stanza.StanzaSequenceNbr, ChorusSentence.SentenceSequenceNbr, ChorusSentence.LanguageSkid";

/// One sentence of one stanza in one language, as returned by the queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LineItem {
    pub stanza: i64,
    pub sentence: i64,
    pub language: i64,
    pub content: String,
}

/// Load a song by its number within a source hymnal.
///
/// Returns `Ok(None)` when the number has neither titles nor stanzas. Chorus
/// text lives in separate tables that older databases lack; if that query
/// fails the song is still returned, verse-only.
pub fn fetch_song(
    conn: &Connection,
    source_id: i64,
    sequence_number: u32,
) -> Result<Option<Song>, LoadError> {
    let titles = fetch_titles(conn, source_id, sequence_number)?;
    let verse_items = fetch_line_items(conn, STANZAS_SQL, source_id, sequence_number)?;
    let chorus_items = match fetch_line_items(conn, CHORUS_SENTENCES_SQL, source_id, sequence_number) {
        Ok(items) => items,
        Err(err) => {
            warn!("chorus query failed, showing song {sequence_number} verse-only: {err}");
            Vec::new()
        }
    };

    if titles.is_empty() && verse_items.is_empty() && chorus_items.is_empty() {
        debug!("song {sequence_number} not found in source {source_id}");
        return Ok(None);
    }

    let (sections, is_chorus, languages) = assemble_sections(&verse_items, &chorus_items);
    debug!(
        "loaded song {sequence_number}: {} stanzas, {} languages",
        sections.len(),
        languages.len()
    );
    Ok(Some(Song::from_sections(
        source_id,
        sequence_number,
        titles,
        sections,
        is_chorus,
        languages,
    )))
}

fn fetch_titles(
    conn: &Connection,
    source_id: i64,
    sequence_number: u32,
) -> Result<BTreeMap<i64, String>, LoadError> {
    let mut stmt = conn.prepare(TITLE_SQL)?;
    let mut rows = stmt.query(params![source_id, sequence_number])?;

    let mut titles = BTreeMap::new();
    while let Some(row) = rows.next()? {
        let title: Option<String> = row.get(0)?;
        let language: i64 = row.get(1)?;
        if let Some(title) = title.filter(|title| !title.is_empty()) {
            titles.insert(language, title);
        }
    }
    Ok(titles)
}

fn fetch_line_items(
    conn: &Connection,
    sql: &str,
    source_id: i64,
    sequence_number: u32,
) -> Result<Vec<LineItem>, LoadError> {
    let mut stmt = conn.prepare(sql)?;
    let items = stmt
        .query_map(params![source_id, sequence_number], |row| {
            Ok(LineItem {
                stanza: row.get(0)?,
                content: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                sentence: row.get::<_, Option<i64>>(2)?.unwrap_or(0),
                language: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}

/// Merge verse and chorus rows into ordered sections.
///
/// Stanza numbers from both queries are walked in ascending order; for a
/// number that has both, the verse comes before the chorus. The language
/// order is fixed by the first section built.
pub(crate) fn assemble_sections(
    verse_items: &[LineItem],
    chorus_items: &[LineItem],
) -> (Vec<Section>, Vec<bool>, Vec<i64>) {
    let verses = group_by_stanza(verse_items);
    let choruses = group_by_stanza(chorus_items);
    let stanza_numbers: Vec<i64> = verses
        .keys()
        .chain(choruses.keys())
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut sections = Vec::new();
    let mut is_chorus = Vec::new();
    let mut languages: Vec<i64> = Vec::new();
    for number in stanza_numbers {
        for (group, chorus) in [(&verses, false), (&choruses, true)] {
            let Some(items) = group.get(&number).filter(|items| !items.is_empty()) else {
                continue;
            };
            if languages.is_empty() {
                languages = language_order(items);
            }
            sections.push(build_section(items, &languages));
            is_chorus.push(chorus);
        }
    }
    (sections, is_chorus, languages)
}

fn group_by_stanza(items: &[LineItem]) -> BTreeMap<i64, Vec<&LineItem>> {
    let mut grouped: BTreeMap<i64, Vec<&LineItem>> = BTreeMap::new();
    for item in items {
        grouped.entry(item.stanza).or_default().push(item);
    }
    grouped
}

/// Distinct languages in order of first appearance, scanning by sentence
/// then language.
fn language_order(items: &[&LineItem]) -> Vec<i64> {
    let mut sorted: Vec<&LineItem> = items.to_vec();
    sorted.sort_by_key(|item| (item.sentence, item.language));
    let mut seen = HashSet::new();
    sorted
        .into_iter()
        .filter(|item| seen.insert(item.language))
        .map(|item| item.language)
        .collect()
}

/// `section[sentence][language]`; a language missing from a sentence
/// leaves an empty line so the interleaving stays aligned.
fn build_section(items: &[&LineItem], languages: &[i64]) -> Section {
    let mut by_sentence: BTreeMap<i64, Vec<&LineItem>> = BTreeMap::new();
    for item in items {
        by_sentence.entry(item.sentence).or_default().push(item);
    }
    by_sentence
        .into_values()
        .map(|line_items| {
            languages
                .iter()
                .map(|language| {
                    line_items
                        .iter()
                        .find(|item| item.language == *language)
                        .map(|item| item.content.clone())
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect()
}
