//! Paginated list fetcher.
//!
//! Walks `page = 1, 2, ...` until the API hands back an empty page and
//! folds everything into a [`FollowSet`].

use tracing::{debug, info};

use crate::api::GraphApi;
use crate::error::Result;
use crate::types::{FollowSet, ListKind};

/// Default page size; GitHub caps `per_page` at 100.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Fetch the complete followers or following list of the acting account.
///
/// ## Algorithm
/// 1. Request page 1 with `page_size` entries
/// 2. Stop on the first empty page
/// 3. Otherwise add every login to the set and ask for the next page
///
/// There is no page cap. Any error from the API aborts the walk; a partial
/// list would make the set difference act on wrong data.
pub async fn fetch_all<A>(api: &A, kind: ListKind, page_size: u32) -> Result<FollowSet>
where
    A: GraphApi + ?Sized,
{
    let mut users = FollowSet::new();
    let mut page = 1;

    loop {
        let batch = api.list_page(kind, page, page_size).await?;
        if batch.is_empty() {
            break;
        }
        debug!("Page {} of {}: {} users", page, kind, batch.len());
        users.extend(batch);
        page += 1;
    }

    info!("Fetched {} {} across {} pages", users.len(), kind, page - 1);
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::types::{FollowAction, MutationStatus, Username};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Serves `users` in pages and records every page request.
    struct PagedList {
        users: Vec<Username>,
        fail_on_page: Option<u32>,
        requests: Mutex<Vec<(ListKind, u32, u32)>>,
    }

    impl PagedList {
        fn new(count: usize) -> Self {
            Self {
                users: (0..count).map(|i| format!("user{:03}", i)).collect(),
                fail_on_page: None,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GraphApi for PagedList {
        async fn list_page(
            &self,
            kind: ListKind,
            page: u32,
            per_page: u32,
        ) -> Result<Vec<Username>> {
            self.requests.lock().unwrap().push((kind, page, per_page));
            if self.fail_on_page == Some(page) {
                return Err(GraphError::Status {
                    status: 500,
                    url: "mock".into(),
                });
            }
            let start = ((page - 1) * per_page) as usize;
            Ok(self
                .users
                .iter()
                .skip(start)
                .take(per_page as usize)
                .cloned()
                .collect())
        }

        async fn send_mutation(&self, _: &str, _: FollowAction) -> Result<MutationStatus> {
            unreachable!("fetcher never mutates")
        }
    }

    #[tokio::test]
    async fn test_fetch_all_walks_until_empty_page() {
        let api = PagedList::new(25);
        let users = fetch_all(&api, ListKind::Followers, 10).await.unwrap();

        assert_eq!(users.len(), 25);
        let requests = api.requests.lock().unwrap();
        // 10 + 10 + 5, then the empty page 4
        let pages: Vec<u32> = requests.iter().map(|r| r.1).collect();
        assert_eq!(pages, vec![1, 2, 3, 4]);
        assert!(requests.iter().all(|r| r.0 == ListKind::Followers && r.2 == 10));
    }

    #[tokio::test]
    async fn test_fetch_all_empty_list() {
        let api = PagedList::new(0);
        let users = fetch_all(&api, ListKind::Following, DEFAULT_PAGE_SIZE).await.unwrap();

        assert!(users.is_empty());
        assert_eq!(api.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_all_exact_multiple_of_page_size() {
        let api = PagedList::new(20);
        let users = fetch_all(&api, ListKind::Following, 10).await.unwrap();

        assert_eq!(users.len(), 20);
        assert_eq!(api.requests.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_all_error_is_fatal() {
        let mut api = PagedList::new(30);
        api.fail_on_page = Some(2);

        let result = fetch_all(&api, ListKind::Followers, 10).await;
        assert!(matches!(result, Err(GraphError::Status { status: 500, .. })));
        // No further pages after the failure
        assert_eq!(api.requests.lock().unwrap().len(), 2);
    }
}
