//! Domain models handed from the song loader to the projector. Songs are
//! replaced wholesale on every load, so these stay plain immutable data
//! holders; the pagination engine derives everything else from them.

use std::collections::BTreeMap;
use std::fmt;

/// Shown in the header when nothing better is known.
pub const APP_TITLE: &str = "Projectionist";

/// One stanza as stored: `section[sentence][language]` holds the text of a
/// sentence in each language of the song.
pub type Section = Vec<Vec<String>>;

/// A loaded song, ready for pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Song {
    /// Hymnal source the number belongs to.
    pub source_id: i64,
    /// Number typed by the operator to pick the song.
    pub sequence_number: u32,
    /// Title text keyed by language id.
    pub titles: BTreeMap<i64, String>,
    /// Stanza lines with languages interleaved sentence by sentence.
    pub stanzas: Vec<Vec<String>>,
    /// Parallel to `stanzas`; `true` marks a chorus.
    pub is_chorus: Vec<bool>,
    /// Language ids in display order.
    pub languages: Vec<i64>,
}

impl Song {
    /// Build a song from sentence × language sections.
    ///
    /// A chorus flag list that does not line up with the sections is not
    /// trusted: every stanza is then treated as a verse.
    pub fn from_sections(
        source_id: i64,
        sequence_number: u32,
        titles: BTreeMap<i64, String>,
        sections: Vec<Section>,
        is_chorus: Vec<bool>,
        languages: Vec<i64>,
    ) -> Self {
        let stanzas: Vec<Vec<String>> = sections
            .into_iter()
            .map(|section| section.into_iter().flatten().collect())
            .collect();
        let is_chorus = if is_chorus.len() == stanzas.len() {
            is_chorus
        } else {
            vec![false; stanzas.len()]
        };
        Self {
            source_id,
            sequence_number,
            titles,
            stanzas,
            is_chorus,
            languages,
        }
    }

    /// How many languages are interleaved per sentence, at least one.
    pub fn language_count(&self) -> usize {
        self.languages.len().max(1)
    }

    /// Title in `language`, falling back to the first language.
    pub fn title(&self, language: i64) -> &str {
        self.titles
            .get(&language)
            .or_else(|| {
                self.languages
                    .first()
                    .and_then(|first| self.titles.get(first))
            })
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn display_title(&self) -> &str {
        self.languages
            .first()
            .map(|&first| self.title(first))
            .unwrap_or("")
    }

    /// Every title in language order, joined for a bilingual header.
    pub fn title_line(&self) -> String {
        self.languages
            .iter()
            .filter_map(|language| self.titles.get(language))
            .filter(|title| !title.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" / ")
    }

    /// Header text: `294: Title / Titre`, or the application name while the
    /// song has no titles.
    pub fn heading(&self) -> String {
        if self.title_line().is_empty() {
            APP_TITLE.to_string()
        } else {
            self.to_string()
        }
    }

    pub fn has_chorus(&self) -> bool {
        self.is_chorus.iter().any(|&chorus| chorus)
    }

    pub fn is_empty(&self) -> bool {
        self.stanzas.iter().all(Vec::is_empty)
    }
}

impl fmt::Display for Song {
    /// `294: Title / Titre`, or just the number while titles are missing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let titles = self.title_line();
        if titles.is_empty() {
            write!(f, "{}", self.sequence_number)
        } else {
            write!(f, "{}: {}", self.sequence_number, titles)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bilingual() -> Song {
        let titles = BTreeMap::from([(1, "Amazing Grace".to_string()), (2, "Grâce infinie".to_string())]);
        let sections = vec![
            vec![
                vec!["Amazing grace".to_string(), "Grâce infinie".to_string()],
                vec!["how sweet".to_string(), "si douce".to_string()],
            ],
            vec![vec!["Chorus".to_string(), "Refrain".to_string()]],
        ];
        Song::from_sections(1, 294, titles, sections, vec![false, true], vec![1, 2])
    }

    #[test]
    fn sections_flatten_sentence_by_sentence() {
        let song = bilingual();
        assert_eq!(
            song.stanzas[0],
            vec!["Amazing grace", "Grâce infinie", "how sweet", "si douce"]
        );
        assert_eq!(song.language_count(), 2);
        assert!(song.has_chorus());
    }

    #[test]
    fn mismatched_chorus_flags_become_verses() {
        let song = Song::from_sections(
            1,
            5,
            BTreeMap::new(),
            vec![vec![vec!["a".to_string()]], vec![vec!["b".to_string()]]],
            vec![true],
            vec![1],
        );
        assert_eq!(song.is_chorus, vec![false, false]);
    }

    #[test]
    fn titles_fall_back_to_first_language() {
        let song = bilingual();
        assert_eq!(song.title(2), "Grâce infinie");
        assert_eq!(song.title(9), "Amazing Grace");
        assert_eq!(song.display_title(), "Amazing Grace");
        assert_eq!(song.to_string(), "294: Amazing Grace / Grâce infinie");
        assert_eq!(song.heading(), song.to_string());
    }

    #[test]
    fn untitled_song_shows_its_number() {
        let song = Song {
            sequence_number: 12,
            ..Song::default()
        };
        assert_eq!(song.to_string(), "12");
        assert_eq!(song.heading(), APP_TITLE);
        assert_eq!(song.language_count(), 1);
        assert!(song.is_empty());
    }
}
