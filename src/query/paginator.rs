use super::*;

pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    /// Never less than one, so an empty view still has a (blank) first page.
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// Slices out `page` (1-based, 0 is read as 1). A page past the end is
    /// returned empty rather than clamped; callers keep page numbers in
    /// range. Ranks are positions in `view`, not in the canonical dataset.
    pub fn page(&self, view: &[&Contributor], page: usize) -> PageResult {
        let page = page.max(1);
        let start = (page - 1).saturating_mul(self.page_size);

        let items = view
            .iter()
            .enumerate()
            .skip(start)
            .take(self.page_size)
            .map(|(index, contributor)| RankedContributor {
                rank: index + 1,
                league: contributor.league(),
                contributor: (*contributor).clone(),
            })
            .collect();

        PageResult {
            items,
            current_page: page,
            total_pages: self.total_pages(view.len()),
            total_matches: view.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::engine::tests::contributor;

    fn people(count: u64) -> Vec<Contributor> {
        (0..count)
            .map(|i| contributor(&format!("p{}", i), 1000 - i, i))
            .collect()
    }

    #[test]
    fn total_pages_is_ceiling_with_a_floor_of_one() {
        let paginator = Paginator::new(12);
        let cases = [(0, 1), (1, 1), (11, 1), (12, 1), (13, 2), (24, 2), (25, 3), (100, 9)];
        for (len, pages) in cases {
            assert_eq!(paginator.total_pages(len), pages, "len {}", len);
        }
    }

    #[test]
    fn last_page_is_partial() {
        let data = people(25);
        let view: Vec<&Contributor> = data.iter().collect();

        let page = Paginator::new(12).page(&view, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].contributor.login, "p24");
        assert_eq!(page.current_page, 3);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn ranks_follow_the_filtered_order() {
        let data = people(30);
        let view: Vec<&Contributor> = data.iter().rev().collect();

        let page = Paginator::new(12).page(&view, 2);
        assert_eq!(page.items[0].rank, 13);
        assert_eq!(page.items[0].contributor.login, "p17");
        assert_eq!(page.items[11].rank, 24);
    }

    #[test]
    fn out_of_range_page_is_empty_not_an_error() {
        let data = people(5);
        let view: Vec<&Contributor> = data.iter().collect();

        let page = Paginator::new(12).page(&view, 7);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn page_zero_reads_as_first_page() {
        let data = people(5);
        let view: Vec<&Contributor> = data.iter().collect();

        let page = Paginator::new(12).page(&view, 0);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].rank, 1);
    }

    #[test]
    fn leagues_are_attached_per_item() {
        let data = vec![contributor("gold", 150, 1), contributor("none", 2, 1)];
        let view: Vec<&Contributor> = data.iter().collect();

        let page = Paginator::new(12).page(&view, 1);
        assert_eq!(page.items[0].league, League::Gold);
        assert_eq!(page.items[1].league, League::Unranked);
    }
}
