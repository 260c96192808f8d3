use super::lines_per_page;

/// Display pages plus the per-page lookup tables the renderer and the keyboard
/// handler need. The four vectors always have the same length and are never
/// empty: a song without lines still produces one blank page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Lines shown on each page, at most `lines_per_page` of them.
    pub pages: Vec<Vec<String>>,
    /// Stanza shown at the *end* of each page. When a chorus is merged onto a
    /// verse page this points at the chorus.
    pub stanza_index_by_page: Vec<usize>,
    /// Stanza shown at the *start* of each page. Verse jumps search this one.
    pub first_stanza_index_by_page: Vec<usize>,
    /// Line where merged chorus text begins, `None` on homogeneous pages.
    pub chorus_start_line_index_by_page: Vec<Option<usize>>,
}

impl Pagination {
    fn empty() -> Self {
        Self {
            pages: Vec::new(),
            stanza_index_by_page: Vec::new(),
            first_stanza_index_by_page: Vec::new(),
            chorus_start_line_index_by_page: Vec::new(),
        }
    }

    fn push_page(&mut self, lines: &[String], stanza: usize) {
        self.pages.push(lines.to_vec());
        self.stanza_index_by_page.push(stanza);
        self.first_stanza_index_by_page.push(stanza);
        self.chorus_start_line_index_by_page.push(None);
    }

    fn push_chunks(&mut self, lines: &[String], stanza: usize, capacity: usize) {
        for chunk in lines.chunks(capacity) {
            self.push_page(chunk, stanza);
        }
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> &[String] {
        self.pages.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Merged chorus start for `index`, `None` when out of range.
    pub fn chorus_start(&self, index: usize) -> Option<usize> {
        self.chorus_start_line_index_by_page
            .get(index)
            .copied()
            .flatten()
    }

    /// First page that starts with `stanza`.
    pub fn first_page_of_stanza(&self, stanza: usize) -> Option<usize> {
        self.first_stanza_index_by_page
            .iter()
            .position(|&s| s == stanza)
    }
}

/// Chunk stanzas into display pages.
///
/// Each page holds lines of a single stanza, except that a chorus is appended
/// onto the tail of the previous page when that page still has room. Whatever
/// does not fit flows onto fresh pages of its own.
pub fn build_display_pages(
    stanzas: &[Vec<String>],
    language_count: usize,
    is_chorus: &[bool],
) -> Pagination {
    let capacity = lines_per_page(language_count);
    let mut pagination = Pagination::empty();

    for (index, stanza) in stanzas.iter().enumerate() {
        let chorus = is_chorus.get(index).copied().unwrap_or(false);
        let free_on_last_page = pagination
            .pages
            .last()
            .map(|page| capacity.saturating_sub(page.len()))
            .unwrap_or(0);

        if chorus && free_on_last_page > 0 {
            let last = pagination.pages.len() - 1;
            let take = stanza.len().min(free_on_last_page);
            pagination.chorus_start_line_index_by_page[last] = Some(pagination.pages[last].len());
            pagination.pages[last].extend_from_slice(&stanza[..take]);
            pagination.stanza_index_by_page[last] = index;
            pagination.push_chunks(&stanza[take..], index, capacity);
            continue;
        }

        pagination.push_chunks(stanza, index, capacity);
    }

    if pagination.pages.is_empty() {
        pagination.push_page(&[], 0);
    }

    pagination
}
