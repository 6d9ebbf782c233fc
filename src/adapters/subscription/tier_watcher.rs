//! TierWatcher - Background service that keeps a user's subscription fresh.
//!
//! Polls the `TierSource` and publishes [`SubscriptionSnapshot`]s on a
//! `tokio::sync::watch` channel. Consumers derive rights from whichever
//! snapshot is current; the last published snapshot always wins.
//!
//! ## Refresh Triggers
//!
//! - On start
//! - Whenever the signed-in user changes
//! - Every `poll_interval` while a user is signed in
//!
//! ## Failure Handling
//!
//! A failed billing check keeps the last snapshot when it belongs to the same
//! user, so a flaky network never locks out a paying customer. A snapshot is
//! never carried over to a different user: after a switch or sign-out the
//! new user starts unsubscribed until a check succeeds.
//!
//! While `run` is active the watcher follows one user. Results for anyone
//! else are never published, whether they come from a stale fetch or from a
//! direct `refresh` call.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `poll_interval` | 30s | How often to re-check billing status |

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};

use crate::domain::entitlements::{RightsRecord, SubscriptionSnapshot, SubscriptionStatus};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::TierSource;

/// Configuration for the TierWatcher service.
#[derive(Debug, Clone)]
pub struct TierWatcherConfig {
    /// How often to re-check billing status.
    pub poll_interval: Duration,
}

impl Default for TierWatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
        }
    }
}

impl TierWatcherConfig {
    /// Create config with custom poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

/// Publishes subscription snapshots for the signed-in user.
pub struct TierWatcher {
    source: Arc<dyn TierSource>,
    config: TierWatcherConfig,
    snapshots: watch::Sender<SubscriptionSnapshot>,
    /// User channel of the active `run` loop, if any.
    following: Mutex<Option<watch::Receiver<Option<UserId>>>>,
}

/// Marks a `run` loop as active for as long as it is alive, cancellation included.
struct Following<'a> {
    watcher: &'a TierWatcher,
}

impl<'a> Following<'a> {
    fn start(watcher: &'a TierWatcher, users: watch::Receiver<Option<UserId>>) -> Self {
        *watcher.following() = Some(users);
        Self { watcher }
    }
}

impl Drop for Following<'_> {
    fn drop(&mut self) {
        *self.watcher.following() = None;
    }
}

impl TierWatcher {
    /// Create a new TierWatcher with default configuration.
    pub fn new(source: Arc<dyn TierSource>) -> Self {
        Self::with_config(source, TierWatcherConfig::default())
    }

    /// Create a new TierWatcher with custom configuration.
    pub fn with_config(source: Arc<dyn TierSource>, config: TierWatcherConfig) -> Self {
        let (snapshots, _) = watch::channel(SubscriptionSnapshot::unsubscribed(None));
        Self {
            source,
            config,
            snapshots,
            following: Mutex::new(None),
        }
    }

    /// Receive every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SubscriptionSnapshot> {
        self.snapshots.subscribe()
    }

    /// The latest snapshot.
    pub fn current(&self) -> SubscriptionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Rights derived from the latest snapshot.
    pub fn rights(&self) -> RightsRecord {
        self.snapshots.borrow().rights()
    }

    /// Run the watch loop until shutdown is signalled or the user channel closes.
    ///
    /// # Arguments
    ///
    /// * `users` - The signed-in user, `None` when signed out
    /// * `shutdown` - Watch channel that signals when to stop
    pub async fn run(
        &self,
        mut users: watch::Receiver<Option<UserId>>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let _following = Following::start(self, users.clone());

        users.borrow_and_update();
        self.refresh_followed(&users).await;

        let mut interval = time::interval(self.config.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the start refresh already ran.
        interval.tick().await;

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    let stop = changed.is_err() || *shutdown.borrow();
                    if stop {
                        tracing::debug!("Tier watcher shutting down");
                        return;
                    }
                }

                changed = users.changed() => {
                    if changed.is_err() {
                        tracing::debug!("User channel closed, tier watcher stopping");
                        return;
                    }
                    users.borrow_and_update();
                    self.refresh_followed(&users).await;
                    interval.reset();
                }

                _ = interval.tick() => {
                    let signed_in = users.borrow().is_some();
                    if signed_in {
                        self.refresh_followed(&users).await;
                    }
                }
            }
        }
    }

    /// Check billing for `user` and publish the outcome.
    ///
    /// While [`run`](Self::run) is active only the user it follows can be
    /// refreshed. A call for any other user, or a fetch whose user was
    /// replaced before it returned, leaves the current snapshot untouched.
    ///
    /// Returns the snapshot that is current afterwards.
    pub async fn refresh(&self, user: Option<&UserId>) -> SubscriptionSnapshot {
        if !self.is_followed(user) {
            tracing::warn!(user_id = ?user, "Ignoring refresh for a user the watcher is not following");
            return self.current();
        }

        let result = self.fetch(user).await;

        // The pending user change triggers its own refresh.
        if !self.is_followed(user) {
            tracing::debug!("Discarding billing status for a superseded user");
            return self.current();
        }
        self.apply(user.cloned(), result)
    }

    async fn refresh_followed(&self, users: &watch::Receiver<Option<UserId>>) {
        let user = users.borrow().clone();
        self.refresh(user.as_ref()).await;
    }

    fn following(&self) -> MutexGuard<'_, Option<watch::Receiver<Option<UserId>>>> {
        self.following.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn is_followed(&self, user: Option<&UserId>) -> bool {
        match self.following().as_ref() {
            Some(users) => users.borrow().as_ref() == user,
            None => true,
        }
    }

    async fn fetch(&self, user: Option<&UserId>) -> Option<Result<SubscriptionStatus, DomainError>> {
        match user {
            Some(user_id) => {
                tracing::debug!(user_id = %user_id, "Refreshing subscription status");
                Some(self.source.fetch_status(user_id).await)
            }
            None => None,
        }
    }

    fn apply(
        &self,
        user: Option<UserId>,
        result: Option<Result<SubscriptionStatus, DomainError>>,
    ) -> SubscriptionSnapshot {
        let next = match (user, result) {
            (None, _) | (_, None) => SubscriptionSnapshot::unsubscribed(None),
            (Some(user_id), Some(Ok(status))) => SubscriptionSnapshot::new(Some(user_id), status),
            (Some(user_id), Some(Err(e))) => {
                let current = self.current();
                if current.belongs_to(Some(&user_id)) {
                    tracing::warn!(
                        user_id = %user_id,
                        error = %e,
                        "Billing check failed, keeping last known subscription"
                    );
                    return current;
                }
                tracing::warn!(
                    user_id = %user_id,
                    error = %e,
                    "Billing check failed with no prior status for user, treating as unsubscribed"
                );
                SubscriptionSnapshot::unsubscribed(Some(user_id))
            }
        };

        let published = next.clone();
        self.snapshots.send_if_modified(|current| {
            let changed = !current.same_status(&next);
            if changed {
                tracing::info!(
                    user_id = ?next.user_id,
                    subscribed = next.subscribed,
                    tier = %next.effective_tier(),
                    "Subscription changed"
                );
            }
            *current = next;
            changed
        });
        published
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::billing::StubTierSource;
    use crate::domain::entitlements::{LimitKey, SubscriptionTier};
    use async_trait::async_trait;
    use tokio::sync::{Notify, Semaphore};

    fn owner() -> UserId {
        UserId::new("owner-1").unwrap()
    }

    fn stylist() -> UserId {
        UserId::new("stylist-2").unwrap()
    }

    fn premium_source() -> Arc<StubTierSource> {
        Arc::new(StubTierSource::new().with_status(owner(), SubscriptionStatus::subscribed("Premium")))
    }

    async fn wait_for_tier(
        rx: &mut watch::Receiver<SubscriptionSnapshot>,
        tier: SubscriptionTier,
    ) -> SubscriptionSnapshot {
        time::timeout(Duration::from_secs(5), async {
            loop {
                let snapshot = rx.borrow_and_update().clone();
                if snapshot.effective_tier() == tier {
                    return snapshot;
                }
                rx.changed().await.unwrap();
            }
        })
        .await
        .expect("timed out waiting for tier")
    }

    /// Tier source that holds each answer until the test releases it.
    struct GatedTierSource {
        statuses: Vec<(UserId, SubscriptionStatus)>,
        started: Notify,
        release: Semaphore,
    }

    impl GatedTierSource {
        fn new(statuses: Vec<(UserId, SubscriptionStatus)>) -> Self {
            Self {
                statuses,
                started: Notify::new(),
                release: Semaphore::new(0),
            }
        }
    }

    #[async_trait]
    impl TierSource for GatedTierSource {
        async fn fetch_status(&self, user_id: &UserId) -> Result<SubscriptionStatus, DomainError> {
            self.started.notify_one();
            self.release.acquire().await.unwrap().forget();
            Ok(self
                .statuses
                .iter()
                .find(|(id, _)| id == user_id)
                .map(|(_, status)| status.clone())
                .unwrap_or_else(SubscriptionStatus::unsubscribed))
        }
    }

    #[test]
    fn default_poll_interval_is_thirty_seconds() {
        assert_eq!(TierWatcherConfig::default().poll_interval, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn starts_unsubscribed() {
        let watcher = TierWatcher::new(premium_source());
        assert_eq!(watcher.rights(), RightsRecord::none());
        assert!(watcher.current().user_id.is_none());
    }

    #[tokio::test]
    async fn refresh_publishes_new_tier() {
        let watcher = TierWatcher::new(premium_source());
        let mut rx = watcher.subscribe();

        let snapshot = watcher.refresh(Some(&owner())).await;

        assert_eq!(snapshot.effective_tier(), SubscriptionTier::Premium);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().effective_tier(), SubscriptionTier::Premium);
        assert!(watcher.rights().limit(LimitKey::MaxBarbers).admits(4));
    }

    #[tokio::test]
    async fn identical_refresh_does_not_notify() {
        let watcher = TierWatcher::new(premium_source());
        let mut rx = watcher.subscribe();

        watcher.refresh(Some(&owner())).await;
        rx.borrow_and_update();
        watcher.refresh(Some(&owner())).await;

        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn failure_keeps_last_known_status_for_same_user() {
        let source = premium_source();
        let watcher = TierWatcher::new(source.clone());
        watcher.refresh(Some(&owner())).await;

        source.set_failing(true);
        let snapshot = watcher.refresh(Some(&owner())).await;

        assert_eq!(snapshot.effective_tier(), SubscriptionTier::Premium);
        assert_eq!(watcher.current().effective_tier(), SubscriptionTier::Premium);
    }

    #[tokio::test]
    async fn failure_after_user_switch_does_not_leak_rights() {
        let source = premium_source();
        let watcher = TierWatcher::new(source.clone());
        watcher.refresh(Some(&owner())).await;

        source.set_failing(true);
        let snapshot = watcher.refresh(Some(&stylist())).await;

        assert_eq!(snapshot.user_id, Some(stylist()));
        assert_eq!(snapshot.rights(), RightsRecord::none());
    }

    #[tokio::test]
    async fn sign_out_publishes_unsubscribed() {
        let source = premium_source();
        let watcher = TierWatcher::new(source.clone());
        watcher.refresh(Some(&owner())).await;

        let snapshot = watcher.refresh(None).await;

        assert!(snapshot.user_id.is_none());
        assert_eq!(watcher.rights(), RightsRecord::none());
    }

    #[tokio::test]
    async fn signed_out_refresh_does_not_call_billing() {
        let source = premium_source();
        let watcher = TierWatcher::new(source.clone());
        watcher.refresh(None).await;
        assert_eq!(source.fetch_count(), 0);
    }

    #[tokio::test]
    async fn cancellation_downgrades_on_next_refresh() {
        let source = premium_source();
        let watcher = TierWatcher::new(source.clone());
        watcher.refresh(Some(&owner())).await;

        source.set_status(
            owner(),
            SubscriptionStatus {
                subscribed: false,
                tier: Some("premium".into()),
            },
        );
        let snapshot = watcher.refresh(Some(&owner())).await;

        assert_eq!(snapshot.rights(), RightsRecord::none());
    }

    #[tokio::test]
    async fn run_follows_polling_user_changes_and_shutdown() {
        let source = premium_source();
        let config = TierWatcherConfig::default().with_poll_interval(Duration::from_millis(20));
        let watcher = Arc::new(TierWatcher::with_config(source.clone(), config));
        let mut rx = watcher.subscribe();

        let (user_tx, user_rx) = watch::channel(Some(owner()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let runner = watcher.clone();
        let handle = tokio::spawn(async move { runner.run(user_rx, shutdown_rx).await });

        // Initial refresh on start
        wait_for_tier(&mut rx, SubscriptionTier::Premium).await;

        // Billing change picked up by polling
        source.set_status(owner(), SubscriptionStatus::subscribed("enterprise"));
        wait_for_tier(&mut rx, SubscriptionTier::Enterprise).await;

        // User switch refreshes for the new user
        source.set_status(stylist(), SubscriptionStatus::subscribed("basic"));
        user_tx.send(Some(stylist())).unwrap();
        let snapshot = wait_for_tier(&mut rx, SubscriptionTier::Basic).await;
        assert_eq!(snapshot.user_id, Some(stylist()));

        // Sign out
        user_tx.send(None).unwrap();
        let snapshot = wait_for_tier(&mut rx, SubscriptionTier::None).await;
        assert!(snapshot.user_id.is_none());

        shutdown_tx.send(true).unwrap();
        time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("watcher did not stop")
            .unwrap();
    }

    #[tokio::test]
    async fn refresh_for_another_user_is_ignored_while_running() {
        let source = Arc::new(
            StubTierSource::new()
                .with_status(owner(), SubscriptionStatus::subscribed("Premium"))
                .with_status(stylist(), SubscriptionStatus::subscribed("Enterprise")),
        );
        let watcher = Arc::new(TierWatcher::new(source.clone()));
        let mut rx = watcher.subscribe();

        let (_user_tx, user_rx) = watch::channel(Some(owner()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let runner = watcher.clone();
        let handle = tokio::spawn(async move { runner.run(user_rx, shutdown_rx).await });
        wait_for_tier(&mut rx, SubscriptionTier::Premium).await;
        let fetches = source.fetch_count();

        let snapshot = watcher.refresh(Some(&stylist())).await;

        assert_eq!(snapshot.user_id, Some(owner()));
        assert_eq!(watcher.current().effective_tier(), SubscriptionTier::Premium);
        assert_eq!(source.fetch_count(), fetches);

        // Sign-out is a user change too and must come through the channel.
        watcher.refresh(None).await;
        assert_eq!(watcher.current().effective_tier(), SubscriptionTier::Premium);

        shutdown_tx.send(true).unwrap();
        time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("watcher did not stop")
            .unwrap();

        // With no loop running, refresh is free to pick the user again.
        let snapshot = watcher.refresh(Some(&stylist())).await;
        assert_eq!(snapshot.effective_tier(), SubscriptionTier::Enterprise);
    }

    #[tokio::test]
    async fn user_switch_mid_fetch_discards_stale_status() {
        let source = Arc::new(GatedTierSource::new(vec![
            (owner(), SubscriptionStatus::subscribed("Enterprise")),
            (stylist(), SubscriptionStatus::subscribed("Basic")),
        ]));
        let watcher = Arc::new(TierWatcher::new(source.clone()));
        let mut rx = watcher.subscribe();

        let (user_tx, user_rx) = watch::channel(Some(owner()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let runner = watcher.clone();
        let handle = tokio::spawn(async move { runner.run(user_rx, shutdown_rx).await });

        // Owner's check is in flight when the stylist signs in.
        source.started.notified().await;
        user_tx.send(Some(stylist())).unwrap();
        source.release.add_permits(1);

        // The stylist's check only starts once the owner's answer was handled.
        source.started.notified().await;
        assert!(!rx.has_changed().unwrap());
        let current = watcher.current();
        assert!(current.user_id.is_none());
        assert_eq!(current.effective_tier(), SubscriptionTier::None);

        source.release.add_permits(1);
        let snapshot = wait_for_tier(&mut rx, SubscriptionTier::Basic).await;
        assert_eq!(snapshot.user_id, Some(stylist()));

        shutdown_tx.send(true).unwrap();
        time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("watcher did not stop")
            .unwrap();
    }

    #[tokio::test]
    async fn run_stops_when_user_channel_closes() {
        let watcher = Arc::new(TierWatcher::new(premium_source()));
        let (user_tx, user_rx) = watch::channel(None);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let runner = watcher.clone();
        let handle = tokio::spawn(async move { runner.run(user_rx, shutdown_rx).await });
        drop(user_tx);

        time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("watcher did not stop")
            .unwrap();
    }
}
