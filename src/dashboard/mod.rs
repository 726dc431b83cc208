//! The signed-in dashboard: box history and subscription status.
//!
//! # Overview
//!
//! - [`BoxHistoryPager`]: accumulating, page-by-page box history
//! - [`fetch_subscription_status`]: the user's subscription status
//! - [`Dashboard::load`]: guards the route, then loads the first box page
//!   and the subscription status concurrently
//!
//! # Example
//!
//! ```rust,ignore
//! use vineo_client::dashboard::{Dashboard, DashboardView};
//!
//! match Dashboard::load(&client).await {
//!     DashboardView::Redirect(route) => navigate(route),
//!     DashboardView::Ready(mut dashboard) => {
//!         render(dashboard.pager().boxes());
//!         dashboard.load_more(&client).await;
//!     }
//! }
//! ```

mod box_history;
mod models;
mod subscription;

pub use box_history::{
    box_history_operation, fetch_box_history_page, BoxHistoryPager, BOX_HISTORY_QUERY,
};
pub use models::{BoxHistoryPage, BoxRecord, Wine, MAX_STARS};
pub use subscription::{fetch_subscription_status, SubscriptionStatus, SUBSCRIPTION_STATUS_QUERY};

use crate::clients::{ClientError, GraphqlClient};
use crate::routes::{guard, Route};

/// Outcome of opening the dashboard.
#[derive(Debug)]
pub enum DashboardView {
    /// The dashboard cannot be shown; navigate to this route instead.
    Redirect(Route),
    /// The dashboard was loaded.
    Ready(Dashboard),
}

/// A loaded dashboard.
///
/// Each half loads independently: a failed box history fetch leaves the
/// subscription status usable and the other way around.
#[derive(Debug)]
pub struct Dashboard {
    pager: BoxHistoryPager,
    box_history_error: Option<ClientError>,
    subscription: Result<SubscriptionStatus, ClientError>,
}

impl Dashboard {
    /// Opens the dashboard.
    ///
    /// Without stored credentials this redirects to [`Route::SignIn`] and no
    /// request is made. Otherwise the first box history page and the
    /// subscription status are fetched concurrently. If either ends in
    /// [`ClientError::Unauthenticated`] the store has been cleared and this
    /// also redirects to the sign-in page.
    pub async fn load(client: &GraphqlClient) -> DashboardView {
        let route = guard(Route::Dashboard, client.session_store().as_ref());
        if route != Route::Dashboard {
            return DashboardView::Redirect(route);
        }

        let mut pager = BoxHistoryPager::for_client(client);
        let (boxes, subscription) = tokio::join!(
            pager.fetch_next(client),
            fetch_subscription_status(client)
        );

        if matches!(boxes, Err(ClientError::Unauthenticated))
            || matches!(subscription, Err(ClientError::Unauthenticated))
        {
            tracing::debug!("Dashboard load lost authentication, redirecting");
            return DashboardView::Redirect(Route::SignIn);
        }

        let box_history_error = boxes.err();
        if let Some(e) = &box_history_error {
            tracing::warn!("Error loading box history: {}", e);
        }
        if let Err(e) = &subscription {
            tracing::warn!("Error loading subscription status: {}", e);
        }

        DashboardView::Ready(Self {
            pager,
            box_history_error,
            subscription,
        })
    }

    /// Returns the box history loaded so far.
    #[must_use]
    pub const fn pager(&self) -> &BoxHistoryPager {
        &self.pager
    }

    /// Returns the error of the most recent box history fetch, if it failed.
    #[must_use]
    pub const fn box_history_error(&self) -> Option<&ClientError> {
        self.box_history_error.as_ref()
    }

    /// Returns the subscription status or the error loading it.
    ///
    /// # Errors
    ///
    /// Returns the [`ClientError`] the status fetch failed with.
    pub const fn subscription(&self) -> Result<&SubscriptionStatus, &ClientError> {
        self.subscription.as_ref()
    }

    /// Loads the next box history page, if any, when the last box is shown.
    ///
    /// Returns the number of boxes appended. A failed fetch appends nothing
    /// and is reported by [`box_history_error`](Self::box_history_error)
    /// until a later fetch succeeds.
    pub async fn load_more(&mut self, client: &GraphqlClient) -> usize {
        match self.pager.on_last_item_visible(client).await {
            Ok(appended) => {
                self.box_history_error = None;
                appended
            }
            Err(e) => {
                tracing::warn!("Error loading box history: {}", e);
                self.box_history_error = Some(e);
                0
            }
        }
    }
}
