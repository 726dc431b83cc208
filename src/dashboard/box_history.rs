//! Paginated box history.
//!
//! [`BoxHistoryPager`] accumulates boxes page by page. The page counter starts
//! at 1 and only advances after a page has been fetched successfully, so a
//! failed fetch can be repeated. Pagination ends when the accumulated count
//! reaches the server-reported total or the server returns an empty page.

use serde_json::json;

use crate::clients::{ClientError, GraphqlClient, GraphqlOperation};
use crate::dashboard::models::{BoxHistoryPage, BoxRecord};

/// The box history operation document.
pub const BOX_HISTORY_QUERY: &str = r"
    query BoxHistory($payload: BoxHistoryDto!) {
      getBoxHistory(payload: $payload) {
        box_count
        boxes {
          box_id
          date
          wines {
            wine_id
            wine_name
            image
            pair_with
            philosophy
            about
            rating
            is_reviewed
            score
            area
            store
          }
        }
      }
    }
";

const BOX_HISTORY_FIELD: &str = "getBoxHistory";

/// Builds the operation fetching page `page` (1-based) of `limit` boxes.
#[must_use]
pub fn box_history_operation(page: u32, limit: u32) -> GraphqlOperation {
    GraphqlOperation::new(BOX_HISTORY_QUERY).with_variables(json!({
        "payload": { "page": page, "limit": limit }
    }))
}

/// Fetches a single page of box history.
///
/// # Errors
///
/// Returns [`ClientError`] if the call fails or `getBoxHistory` cannot be
/// decoded.
pub async fn fetch_box_history_page(
    client: &GraphqlClient,
    page: u32,
    limit: u32,
) -> Result<BoxHistoryPage, ClientError> {
    client
        .execute_as(&box_history_operation(page, limit), BOX_HISTORY_FIELD)
        .await
}

/// Accumulating cursor over the box history.
///
/// # Example
///
/// ```rust,ignore
/// use vineo_client::dashboard::BoxHistoryPager;
///
/// let mut pager = BoxHistoryPager::new(4);
/// pager.fetch_next(&client).await?;
/// while pager.has_more() {
///     pager.on_last_item_visible(&client).await?;
/// }
/// println!("{} boxes", pager.boxes().len());
/// ```
#[derive(Clone, Debug)]
pub struct BoxHistoryPager {
    next_page: u32,
    limit: u32,
    boxes: Vec<BoxRecord>,
    total: Option<u32>,
    has_more: bool,
}

impl BoxHistoryPager {
    /// Creates a pager requesting `limit` boxes per page.
    #[must_use]
    pub const fn new(limit: u32) -> Self {
        Self {
            next_page: 1,
            limit,
            boxes: Vec::new(),
            total: None,
            has_more: true,
        }
    }

    /// Creates a pager using the page size configured on `client`.
    #[must_use]
    pub const fn for_client(client: &GraphqlClient) -> Self {
        Self::new(client.config().page_size())
    }

    /// Returns all boxes fetched so far, in server order.
    #[must_use]
    pub fn boxes(&self) -> &[BoxRecord] {
        &self.boxes
    }

    /// Returns `true` while another page may exist.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Returns the page number the next fetch will request.
    #[must_use]
    pub const fn next_page(&self) -> u32 {
        self.next_page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the total reported by the last successful fetch.
    #[must_use]
    pub const fn total(&self) -> Option<u32> {
        self.total
    }

    /// Fetches the next page and appends its boxes.
    ///
    /// Returns the number of boxes appended. Once [`has_more`](Self::has_more)
    /// is `false` this returns `Ok(0)` without a request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the page could not be fetched. The pager is
    /// left unchanged.
    pub async fn fetch_next(&mut self, client: &GraphqlClient) -> Result<usize, ClientError> {
        if !self.has_more {
            return Ok(0);
        }

        let page = fetch_box_history_page(client, self.next_page, self.limit).await?;
        Ok(self.apply(page))
    }

    /// Handles the last listed box becoming visible.
    ///
    /// Fetches the next page if there is one, otherwise does nothing.
    ///
    /// # Errors
    ///
    /// As for [`fetch_next`](Self::fetch_next).
    pub async fn on_last_item_visible(
        &mut self,
        client: &GraphqlClient,
    ) -> Result<usize, ClientError> {
        if !self.has_more {
            tracing::debug!("Box history exhausted, ignoring scroll");
            return Ok(0);
        }
        self.fetch_next(client).await
    }

    /// Drops all fetched boxes and starts again from page 1.
    pub fn reset(&mut self) {
        *self = Self::new(self.limit);
    }

    fn apply(&mut self, page: BoxHistoryPage) -> usize {
        let received = page.boxes.len();

        self.boxes.extend(page.boxes);
        self.total = Some(page.box_count);
        self.next_page += 1;

        let accumulated = u32::try_from(self.boxes.len()).unwrap_or(u32::MAX);
        self.has_more = received > 0 && accumulated < page.box_count;

        tracing::debug!(
            "Box history page {} gave {} boxes ({} of {})",
            self.next_page - 1,
            received,
            accumulated,
            page.box_count
        );
        received
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(box_count: u32, ids: &[&str]) -> BoxHistoryPage {
        BoxHistoryPage {
            box_count,
            boxes: ids
                .iter()
                .map(|id| BoxRecord {
                    box_id: (*id).to_string(),
                    date: "2024-03-01".to_string(),
                    wines: Vec::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_new_pager_starts_at_page_one() {
        let pager = BoxHistoryPager::new(4);

        assert_eq!(pager.next_page(), 1);
        assert!(pager.has_more());
        assert!(pager.boxes().is_empty());
        assert_eq!(pager.total(), None);
    }

    #[test]
    fn test_apply_stops_at_reported_total() {
        let mut pager = BoxHistoryPager::new(4);

        assert_eq!(pager.apply(page(7, &["1", "2", "3", "4"])), 4);
        assert!(pager.has_more());
        assert_eq!(pager.next_page(), 2);

        assert_eq!(pager.apply(page(7, &["5", "6", "7"])), 3);
        assert!(!pager.has_more());
        assert_eq!(pager.boxes().len(), 7);
        assert_eq!(pager.total(), Some(7));
    }

    #[test]
    fn test_empty_page_ends_pagination() {
        let mut pager = BoxHistoryPager::new(4);

        assert_eq!(pager.apply(page(10, &[])), 0);
        assert!(!pager.has_more());
    }

    #[test]
    fn test_boxes_keep_server_order() {
        let mut pager = BoxHistoryPager::new(2);
        pager.apply(page(4, &["b", "a"]));
        pager.apply(page(4, &["d", "c"]));

        let ids: Vec<&str> = pager.boxes().iter().map(|b| b.box_id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "d", "c"]);
    }

    #[test]
    fn test_reset_keeps_limit() {
        let mut pager = BoxHistoryPager::new(3);
        pager.apply(page(3, &["1", "2", "3"]));

        pager.reset();

        assert_eq!(pager.limit(), 3);
        assert_eq!(pager.next_page(), 1);
        assert!(pager.has_more());
        assert!(pager.boxes().is_empty());
    }

    #[test]
    fn test_operation_variables() {
        let op = box_history_operation(2, 4);

        assert_eq!(op.operation_name(), Some("BoxHistory"));
        assert_eq!(op.variables["payload"]["page"], 2);
        assert_eq!(op.variables["payload"]["limit"], 4);
    }
}
