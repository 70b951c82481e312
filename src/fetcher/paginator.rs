use std::collections::HashSet;
use std::future::Future;

use crate::app::{GramError, Result};
use crate::domain::{Page, RawItem};

/// Drains a cursor-paginated endpoint into one ordered list.
///
/// The loop ends when a page carries no next cursor. Two guards make
/// termination explicit: a cursor seen earlier in the same drain is an
/// error, and so is exceeding `max_pages` when one is configured. Any error
/// drops the items gathered so far; a drain either completes or fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Paginator {
    max_pages: Option<usize>,
}

impl Paginator {
    /// A limit of zero could never fetch anything, so it means no limit.
    pub fn new(max_pages: Option<usize>) -> Self {
        Self {
            max_pages: max_pages.filter(|&max| max > 0),
        }
    }

    pub fn unbounded() -> Self {
        Self { max_pages: None }
    }

    pub async fn drain<F, Fut>(&self, endpoint: &str, mut fetch: F) -> Result<Vec<RawItem>>
    where
        F: FnMut(Option<String>) -> Fut,
        Fut: Future<Output = Result<Page>>,
    {
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;
        let mut seen = HashSet::new();
        let mut pages = 0usize;

        loop {
            if let Some(max) = self.max_pages {
                if pages >= max {
                    return Err(GramError::PaginationLimit(max));
                }
            }

            let page = fetch(cursor.take()).await?;
            pages += 1;

            tracing::debug!(
                endpoint,
                page = pages,
                items = page.items.len(),
                next = page.next_cursor.as_deref().unwrap_or("-"),
                "Fetched page"
            );

            items.extend(page.items);

            match page.next_cursor {
                None => break,
                Some(next) => {
                    if !seen.insert(next.clone()) {
                        return Err(GramError::CursorCycle(next));
                    }
                    cursor = Some(next);
                }
            }
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    fn chain(pages: Vec<Page>) -> (RefCell<Vec<Option<String>>>, RefCell<std::vec::IntoIter<Page>>) {
        (RefCell::new(Vec::new()), RefCell::new(pages.into_iter()))
    }

    #[tokio::test]
    async fn test_drains_all_pages_in_order() {
        let (calls, pages) = chain(vec![
            Page::new(vec![json!(1), json!(2)], Some("c2".into())),
            Page::new(vec![json!(3)], Some("c3".into())),
            Page::last(vec![json!(4), json!(5)]),
        ]);

        let items = Paginator::unbounded()
            .drain("feed", |cursor| {
                calls.borrow_mut().push(cursor);
                let page = pages.borrow_mut().next();
                async move { page.ok_or_else(|| GramError::Config("exhausted".into())) }
            })
            .await
            .unwrap();

        assert_eq!(items, vec![json!(1), json!(2), json!(3), json!(4), json!(5)]);
        assert_eq!(
            *calls.borrow(),
            vec![None, Some("c2".to_string()), Some("c3".to_string())]
        );
    }

    #[tokio::test]
    async fn test_duplicates_across_pages_are_kept() {
        let (_, pages) = chain(vec![
            Page::new(vec![json!({"pk": 1})], Some("c2".into())),
            Page::last(vec![json!({"pk": 1})]),
        ]);

        let items = Paginator::unbounded()
            .drain("followers", |_| {
                let page = pages.borrow_mut().next();
                async move { page.ok_or_else(|| GramError::Config("exhausted".into())) }
            })
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_failure_discards_partial_result() {
        let calls = RefCell::new(0);
        let result = Paginator::unbounded()
            .drain("feed", |_| {
                *calls.borrow_mut() += 1;
                let n = *calls.borrow();
                async move {
                    if n == 1 {
                        Ok(Page::new(vec![json!(1)], Some("c2".into())))
                    } else {
                        Err(GramError::Api {
                            status: 429,
                            message: "rate limited".into(),
                        })
                    }
                }
            })
            .await;

        assert!(matches!(result, Err(GramError::Api { status: 429, .. })));
        assert_eq!(*calls.borrow(), 2);
    }

    #[tokio::test]
    async fn test_repeated_cursor_is_rejected() {
        let result = Paginator::unbounded()
            .drain("feed", |_| async {
                Ok(Page::new(vec![json!(1)], Some("same".into())))
            })
            .await;

        assert!(matches!(result, Err(GramError::CursorCycle(c)) if c == "same"));
    }

    #[tokio::test]
    async fn test_page_limit() {
        let counter = RefCell::new(0u32);
        let result = Paginator::new(Some(3))
            .drain("feed", |_| {
                *counter.borrow_mut() += 1;
                let n = *counter.borrow();
                async move { Ok(Page::new(vec![json!(n)], Some(format!("c{}", n)))) }
            })
            .await;

        assert!(matches!(result, Err(GramError::PaginationLimit(3))));
        assert_eq!(*counter.borrow(), 3);
    }

    #[tokio::test]
    async fn test_limit_not_hit_when_last_page_arrives_in_time() {
        let (_, pages) = chain(vec![
            Page::new(vec![json!(1)], Some("c2".into())),
            Page::last(vec![json!(2)]),
        ]);

        let items = Paginator::new(Some(2))
            .drain("feed", |_| {
                let page = pages.borrow_mut().next();
                async move { page.ok_or_else(|| GramError::Config("exhausted".into())) }
            })
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_zero_limit_is_unbounded() {
        let (_, pages) = chain(vec![
            Page::new(vec![json!(1)], Some("c2".into())),
            Page::last(vec![json!(2)]),
        ]);

        let items = Paginator::new(Some(0))
            .drain("feed", |_| {
                let page = pages.borrow_mut().next();
                async move { page.ok_or_else(|| GramError::Config("exhausted".into())) }
            })
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
    }
}
