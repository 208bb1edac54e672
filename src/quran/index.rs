//! Page index derived from the surah table
//!
//! The index is computed once from static data and never mutated. Lookups
//! by page number or surah id are direct table indexing.

use crate::constants::{FIRST_PAGE, LAST_PAGE, PAGE_COUNT};
use crate::quran::assets::page_image_name;
use crate::quran::surahs::SURAHS;
use crate::types::{QuranPage, Surah};
use lazy_static::lazy_static;

lazy_static! {
    static ref GLOBAL_INDEX: SectionIndex = SectionIndex::build(&SURAHS);
}

pub struct SectionIndex {
    surahs: Vec<Surah>,
    pages: Vec<QuranPage>,
}

impl SectionIndex {
    /// Build the page table for pages 2-604 from a surah table
    ///
    /// Each surah marks its contiguous range; pages outside 2-604 are ignored
    /// and a surah without a start page contributes nothing.
    pub fn build(surahs: &[Surah]) -> Self {
        let mut page_to_surahs: Vec<Vec<u16>> = vec![Vec::new(); PAGE_COUNT];

        for surah in surahs {
            if surah.start_page == 0 {
                continue;
            }
            for offset in 0..surah.pages {
                let page = surah.start_page.saturating_add(offset);
                if let Some(position) = Self::position_of(page) {
                    let ids = &mut page_to_surahs[position];
                    if !ids.contains(&surah.id) {
                        ids.push(surah.id);
                    }
                }
            }
        }

        let pages: Vec<QuranPage> = page_to_surahs
            .into_iter()
            .enumerate()
            .map(|(position, mut ids)| {
                ids.sort_unstable();
                let number = FIRST_PAGE + position as u16;
                QuranPage {
                    number,
                    image: page_image_name(number),
                    surahs: ids,
                }
            })
            .collect();

        tracing::debug!(
            "Section index built: {} surahs, {} pages",
            surahs.len(),
            pages.len()
        );

        SectionIndex {
            surahs: surahs.to_vec(),
            pages,
        }
    }

    /// The index over the compiled surah table
    pub fn global() -> &'static SectionIndex {
        &GLOBAL_INDEX
    }

    /// Position of a page in the canonical sequence
    pub fn position_of(page: u16) -> Option<usize> {
        if (FIRST_PAGE..=LAST_PAGE).contains(&page) {
            Some((page - FIRST_PAGE) as usize)
        } else {
            None
        }
    }

    /// Page number at a canonical position
    pub fn page_at(position: usize) -> Option<u16> {
        if position < PAGE_COUNT {
            Some(FIRST_PAGE + position as u16)
        } else {
            None
        }
    }

    pub fn pages(&self) -> &[QuranPage] {
        &self.pages
    }

    pub fn surahs(&self) -> &[Surah] {
        &self.surahs
    }

    pub fn page(&self, number: u16) -> Option<&QuranPage> {
        Self::position_of(number).and_then(|position| self.pages.get(position))
    }

    pub fn surah(&self, id: u16) -> Option<&Surah> {
        self.surahs.iter().find(|s| s.id == id)
    }

    /// Recorded start page of a surah, whether or not it is a readable page
    pub fn start_page(&self, surah_id: u16) -> Option<u16> {
        self.surah(surah_id)
            .map(|s| s.start_page)
            .filter(|&page| page != 0)
    }

    pub fn surahs_on_page(&self, number: u16) -> &[u16] {
        self.page(number)
            .map(|p| p.surahs.as_slice())
            .unwrap_or(&[])
    }

    /// The surah a reader is "in" on a given page
    ///
    /// With several surahs on the page, the highest id wins since it started
    /// most recently. A page with no marked surah falls back to the last
    /// surah whose range ends on or just before it; this is approximate.
    pub fn current_surah(&self, page: u16) -> Option<&Surah> {
        if let Some(&id) = self.surahs_on_page(page).iter().max() {
            return self.surah(id);
        }

        let mut fallback = None;
        for surah in &self.surahs {
            if surah.start_page == 0 || surah.start_page > page {
                continue;
            }
            if page <= surah.start_page.saturating_add(surah.pages) {
                fallback = Some(surah);
            }
        }
        fallback
    }
}
