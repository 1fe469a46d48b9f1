//! In-memory booking repository.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageRequest;

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{
    Booking, BookingId, BookingStatus, BookingWindow, ItemId, TemporalFilter, UserId,
};

use super::memory::MemoryStore;

/// [`BookingRepository`] over the shared [`MemoryStore`].
///
/// Owner-scoped queries join through the item table, so a booking's owner is
/// always whoever owns the item right now.
pub struct MemoryBookingRepository {
    store: Arc<MemoryStore>,
}

impl MemoryBookingRepository {
    /// Attach the repository to a store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

/// Start descending, id descending on equal starts, so pagination never
/// straddles ties differently between calls.
fn sort_start_descending(bookings: &mut [Booking]) {
    bookings.sort_by_key(|booking| Reverse((booking.window().start(), booking.id())));
}

fn sort_id_descending(bookings: &mut [Booking]) {
    bookings.sort_by_key(|booking| Reverse(booking.id()));
}

fn page_start_descending(mut bookings: Vec<Booking>, page: PageRequest) -> Vec<Booking> {
    sort_start_descending(&mut bookings);
    page.apply(bookings)
}

#[async_trait]
impl BookingRepository for MemoryBookingRepository {
    async fn save(&self, booking: &Booking) -> Result<Booking, BookingRepositoryError> {
        let mut tables = self.store.write();
        let stored = if booking.id().value() == 0 {
            let id = tables.next_booking_id();
            booking.clone().with_id(id)
        } else {
            booking.clone()
        };
        tables.bookings.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, BookingRepositoryError> {
        Ok(self.store.read().bookings.get(&id).cloned())
    }

    async fn find_approved_overlap(
        &self,
        item_id: ItemId,
        window: BookingWindow,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        Ok(self
            .store
            .read()
            .bookings
            .values()
            .find(|booking| {
                booking.item_id() == item_id
                    && booking.status() == BookingStatus::Approved
                    && booking.window().overlaps(&window)
            })
            .cloned())
    }

    async fn find_by_booker(
        &self,
        booker_id: UserId,
        filter: TemporalFilter,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        let matching: Vec<Booking> = self
            .store
            .read()
            .bookings
            .values()
            .filter(|booking| booking.booker_id() == booker_id && filter.matches(booking, now))
            .cloned()
            .collect();
        Ok(page_start_descending(matching, page))
    }

    async fn find_by_item_owner(
        &self,
        owner_id: UserId,
        filter: TemporalFilter,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        let tables = self.store.read();
        let mut matching: Vec<Booking> = tables
            .bookings
            .values()
            .filter(|booking| {
                tables
                    .items
                    .get(&booking.item_id())
                    .is_some_and(|item| item.owner_id == owner_id)
                    && filter.matches(booking, now)
            })
            .cloned()
            .collect();
        drop(tables);
        // Owner-scope Current keeps its historical id-descending order; the
        // booker scope stays start-descending like every other listing. See
        // the port docs.
        if filter == TemporalFilter::Current {
            sort_id_descending(&mut matching);
            return Ok(page.apply(matching));
        }
        Ok(page_start_descending(matching, page))
    }

    async fn find_last_for_items(
        &self,
        item_ids: &[ItemId],
        now: DateTime<Utc>,
    ) -> Result<HashMap<ItemId, Booking>, BookingRepositoryError> {
        let tables = self.store.read();
        let mut last: HashMap<ItemId, Booking> = HashMap::new();
        for booking in tables.bookings.values() {
            if booking.status() != BookingStatus::Approved
                || booking.window().starts_after(now)
                || !item_ids.contains(&booking.item_id())
            {
                continue;
            }
            let replace = last.get(&booking.item_id()).is_none_or(|held| {
                (booking.window().start(), booking.id()) > (held.window().start(), held.id())
            });
            if replace {
                last.insert(booking.item_id(), booking.clone());
            }
        }
        Ok(last)
    }

    async fn find_next_for_items(
        &self,
        item_ids: &[ItemId],
        now: DateTime<Utc>,
    ) -> Result<HashMap<ItemId, Booking>, BookingRepositoryError> {
        let tables = self.store.read();
        let mut next: HashMap<ItemId, Booking> = HashMap::new();
        for booking in tables.bookings.values() {
            if booking.status() != BookingStatus::Approved
                || !booking.window().starts_after(now)
                || !item_ids.contains(&booking.item_id())
            {
                continue;
            }
            let replace = next.get(&booking.item_id()).is_none_or(|held| {
                (booking.window().start(), booking.id()) < (held.window().start(), held.id())
            });
            if replace {
                next.insert(booking.item_id(), booking.clone());
            }
        }
        Ok(next)
    }

    async fn find_finished(
        &self,
        item_id: ItemId,
        booker_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        // Any booking that ended counts, whatever its status.
        Ok(self
            .store
            .read()
            .bookings
            .values()
            .find(|booking| {
                booking.item_id() == item_id
                    && booking.booker_id() == booker_id
                    && booking.window().ended_before(now)
            })
            .cloned())
    }

    async fn exists_for_participant(
        &self,
        user_id: UserId,
    ) -> Result<bool, BookingRepositoryError> {
        let tables = self.store.read();
        Ok(tables.bookings.values().any(|booking| {
            booking.booker_id() == user_id
                || tables
                    .items
                    .get(&booking.item_id())
                    .is_some_and(|item| item.owner_id == user_id)
        }))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use crate::domain::Item;

    use super::*;

    const OWNER: UserId = UserId::new(1);
    const BOOKER: UserId = UserId::new(2);

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, hour, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    fn window(start_hour: u32, end_hour: u32) -> BookingWindow {
        BookingWindow::try_new(at(start_hour), at(end_hour)).expect("valid window")
    }

    fn store_with_item() -> (Arc<MemoryStore>, ItemId) {
        let store = Arc::new(MemoryStore::new());
        let item = {
            let mut tables = store.write();
            let id = tables.next_item_id();
            let mut item = Item::new("drill", "cordless drill", true, OWNER, None);
            item.id = id;
            tables.items.insert(id, item);
            id
        };
        (store, item)
    }

    async fn saved(
        repo: &MemoryBookingRepository,
        item: ItemId,
        start_hour: u32,
        end_hour: u32,
        approve: Option<bool>,
    ) -> Booking {
        let mut booking = repo
            .save(&Booking::new(window(start_hour, end_hour), item, BOOKER))
            .await
            .expect("insert booking");
        if let Some(approve) = approve {
            booking.decide(approve).expect("waiting booking decidable");
            booking = repo.save(&booking).await.expect("update booking");
        }
        booking
    }

    #[tokio::test]
    async fn overlap_lookup_ignores_waiting_and_rejected_bookings() {
        let (store, item) = store_with_item();
        let repo = MemoryBookingRepository::new(store);

        saved(&repo, item, 10, 12, None).await;
        saved(&repo, item, 10, 12, Some(false)).await;

        let probe = window(11, 13);
        assert!(repo
            .find_approved_overlap(item, probe)
            .await
            .expect("lookup")
            .is_none());

        let approved = saved(&repo, item, 10, 12, Some(true)).await;
        let hit = repo
            .find_approved_overlap(item, probe)
            .await
            .expect("lookup")
            .expect("approved overlap found");
        assert_eq!(hit.id(), approved.id());
    }

    #[tokio::test]
    async fn booker_listing_is_start_descending() {
        let (store, item) = store_with_item();
        let repo = MemoryBookingRepository::new(store);

        let early = saved(&repo, item, 8, 9, None).await;
        let late = saved(&repo, item, 14, 15, None).await;
        let middle = saved(&repo, item, 10, 12, None).await;

        let page = PageRequest::try_new(0, 10).expect("valid page");
        let rows = repo
            .find_by_booker(BOOKER, TemporalFilter::All, at(11), page)
            .await
            .expect("listing");
        let ids: Vec<BookingId> = rows.iter().map(Booking::id).collect();
        assert_eq!(ids, [late.id(), middle.id(), early.id()]);
    }

    #[tokio::test]
    async fn booker_current_listing_stays_start_descending() {
        let (store, item) = store_with_item();
        let repo = MemoryBookingRepository::new(store);

        // Both current at 11:00; the later-starting booking has the lower id,
        // so start order and id order disagree.
        let later_start = saved(&repo, item, 9, 13, None).await;
        let earlier_start = saved(&repo, item, 8, 14, None).await;

        let page = PageRequest::try_new(0, 10).expect("valid page");
        let rows = repo
            .find_by_booker(BOOKER, TemporalFilter::Current, at(11), page)
            .await
            .expect("listing");
        let ids: Vec<BookingId> = rows.iter().map(Booking::id).collect();
        assert_eq!(ids, [later_start.id(), earlier_start.id()]);
    }

    #[tokio::test]
    async fn owner_current_listing_keeps_id_descending_order() {
        let (store, item) = store_with_item();
        let repo = MemoryBookingRepository::new(store);

        // Both current at 11:00; the one with the later start has the lower id.
        let first = saved(&repo, item, 9, 13, None).await;
        let second = saved(&repo, item, 8, 14, None).await;

        let page = PageRequest::try_new(0, 10).expect("valid page");
        let rows = repo
            .find_by_item_owner(OWNER, TemporalFilter::Current, at(11), page)
            .await
            .expect("listing");
        let ids: Vec<BookingId> = rows.iter().map(Booking::id).collect();
        assert_eq!(ids, [second.id(), first.id()]);
    }

    #[tokio::test]
    async fn last_and_next_projections_split_around_now() {
        let (store, item) = store_with_item();
        let repo = MemoryBookingRepository::new(store);

        let past = saved(&repo, item, 7, 8, Some(true)).await;
        let running = saved(&repo, item, 10, 12, Some(true)).await;
        let soon = saved(&repo, item, 13, 14, Some(true)).await;
        saved(&repo, item, 15, 16, Some(true)).await;
        saved(&repo, item, 17, 18, None).await; // waiting, never projected

        let last = repo
            .find_last_for_items(&[item], at(11))
            .await
            .expect("last lookup");
        // The running booking started later than the finished one.
        assert_eq!(last.get(&item).map(Booking::id), Some(running.id()));
        assert_ne!(last.get(&item).map(Booking::id), Some(past.id()));

        let next = repo
            .find_next_for_items(&[item], at(11))
            .await
            .expect("next lookup");
        assert_eq!(next.get(&item).map(Booking::id), Some(soon.id()));
    }

    #[tokio::test]
    async fn finished_lookup_counts_any_status_but_only_ended_windows() {
        let (store, item) = store_with_item();
        let repo = MemoryBookingRepository::new(store);

        saved(&repo, item, 10, 12, Some(true)).await;
        assert!(repo
            .find_finished(item, BOOKER, at(11))
            .await
            .expect("lookup")
            .is_none());
        assert!(repo
            .find_finished(item, BOOKER, at(13))
            .await
            .expect("lookup")
            .is_some());

        let (store, item) = store_with_item();
        let repo = MemoryBookingRepository::new(store);
        saved(&repo, item, 8, 9, Some(false)).await;
        // A rejected booking that ended still counts.
        assert!(repo
            .find_finished(item, BOOKER, at(10))
            .await
            .expect("lookup")
            .is_some());
    }

    #[tokio::test]
    async fn participants_are_found_on_both_sides_of_a_booking() {
        let (store, item) = store_with_item();
        let repo = MemoryBookingRepository::new(store);
        saved(&repo, item, 10, 12, None).await;

        assert!(repo.exists_for_participant(BOOKER).await.expect("booker side"));
        assert!(repo.exists_for_participant(OWNER).await.expect("owner side"));
        assert!(!repo
            .exists_for_participant(UserId::new(9))
            .await
            .expect("stranger"));
    }
}
