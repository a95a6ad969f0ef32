/// Links past this page count are never offered.
pub const MAX_PAGES: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLinks {
    pub pages: u32,
    pub prev: Option<u32>,
    pub next: Option<u32>,
}

pub fn paginate(total: u64, current: u32, page_size: u32, force_next: bool) -> Option<PageLinks> {
    if total == 0 {
        return None;
    }

    let page_size = u64::from(page_size.max(1));
    let pages = total.div_ceil(page_size).min(u64::from(MAX_PAGES)) as u32;
    if pages == 1 && !force_next {
        return None;
    }

    let prev = (current > 0).then(|| current - 1);
    let next = (force_next || current.saturating_add(1) < pages).then(|| current.saturating_add(1));
    Some(PageLinks { pages, prev, next })
}
