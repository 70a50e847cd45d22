//! In-process [`NotificationStore`] backed by a locked `Vec`.

use std::cmp::Reverse;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::{NotificationFilter, NotificationSlice, NotificationStore, StoreError};
use crate::notification::{NewNotification, Notification};
use crate::types::{DbId, Timestamp};

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<Notification>,
    last_id: DbId,
}

#[derive(Debug, Default)]
pub struct InMemoryNotificationStore {
    inner: RwLock<Inner>,
}

impl InMemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a notification stamped with the current time.
    pub fn insert(&self, new: NewNotification) -> Result<Notification, StoreError> {
        self.insert_at(new, Utc::now())
    }

    /// Insert a notification with an explicit creation time.
    pub fn insert_at(
        &self,
        new: NewNotification,
        created_at: Timestamp,
    ) -> Result<Notification, StoreError> {
        let mut inner = self.write()?;
        inner.last_id += 1;
        let notification = Notification {
            id: inner.last_id,
            user_id: new.user_id,
            event_id: new.event_id,
            title: new.title,
            body: new.body,
            is_read: false,
            read_at: None,
            created_at,
        };
        inner.rows.push(notification.clone());
        Ok(notification)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("notification store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("notification store lock poisoned".into()))
    }
}

#[async_trait]
impl NotificationStore for InMemoryNotificationStore {
    async fn query_notifications(
        &self,
        filter: NotificationFilter,
        offset: i64,
        limit: i64,
    ) -> Result<NotificationSlice, StoreError> {
        let inner = self.read()?;
        let mut matching: Vec<&Notification> =
            inner.rows.iter().filter(|n| filter.matches(n)).collect();
        matching.sort_by_key(|n| Reverse((n.created_at, n.id)));

        let total_count = matching.len() as i64;
        let skip = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let take = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(skip)
            .take(take)
            .cloned()
            .collect();

        Ok(NotificationSlice { items, total_count })
    }

    async fn unread_count(&self, user_id: DbId) -> Result<i64, StoreError> {
        let inner = self.read()?;
        Ok(inner
            .rows
            .iter()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count() as i64)
    }

    async fn mark_read(&self, user_id: DbId, notification_id: DbId) -> Result<bool, StoreError> {
        let mut inner = self.write()?;
        let Some(row) = inner
            .rows
            .iter_mut()
            .find(|n| n.id == notification_id && n.user_id == user_id && !n.is_read)
        else {
            return Ok(false);
        };
        row.is_read = true;
        row.read_at = Some(Utc::now());
        Ok(true)
    }

    async fn mark_all_read(&self, user_id: DbId) -> Result<u64, StoreError> {
        let mut inner = self.write()?;
        let now = Utc::now();
        let mut marked = 0;
        for row in inner
            .rows
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.is_read)
        {
            row.is_read = true;
            row.read_at = Some(now);
            marked += 1;
        }
        Ok(marked)
    }
}
