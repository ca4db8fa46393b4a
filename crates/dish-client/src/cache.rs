//! In-memory mirror of the dish collection.
//!
//! A [`DishCache`] is filled by a full fetch ([`DishCache::load`]) and kept
//! fresh by pushed events ([`DishCache::apply`]). Records are held newest
//! first. Pushes replace in place and never re-sort.
//!
//! Each record carries a server-side `revision`. A push or a fetched copy
//! that is older than what the cache already holds is ignored, which closes
//! the window where a slow initial fetch would overwrite a newer push.

use std::collections::HashMap;

use dish_types::{Dish, DishEvent, DishStats};
use tracing::trace;
use uuid::Uuid;

/// What [`DishCache::apply`] did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The cached record was replaced with the pushed one.
    Replaced,
    /// The push carried an older revision than the cache holds; ignored.
    Stale,
    /// The pushed id is not in the cache; ignored.
    Unknown,
}

#[derive(Debug, Default, Clone)]
pub struct DishCache {
    dishes: Vec<Dish>,
    positions: HashMap<Uuid, usize>,
    stats: DishStats,
}

impl DishCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection with `fetched`, sorted newest first.
    ///
    /// Ids absent from `fetched` are dropped. For ids already cached with a
    /// strictly newer revision the cached copy wins.
    pub fn load(&mut self, fetched: Vec<Dish>) {
        let mut cached: HashMap<Uuid, Dish> =
            self.dishes.drain(..).map(|d| (d.id, d)).collect();

        let mut dishes: Vec<Dish> = fetched
            .into_iter()
            .map(|fresh| match cached.remove(&fresh.id) {
                Some(held) if held.revision > fresh.revision => {
                    trace!(id = %fresh.id, held = held.revision, fetched = fresh.revision, "keeping newer cached copy");
                    held
                }
                _ => fresh,
            })
            .collect();
        dishes.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        self.dishes = dishes;
        self.positions = self
            .dishes
            .iter()
            .enumerate()
            .map(|(i, d)| (d.id, i))
            .collect();
        self.recompute_stats();
    }

    /// Apply one pushed event.
    pub fn apply(&mut self, event: &DishEvent) -> ApplyOutcome {
        let incoming = event.dish();
        let Some(&index) = self.positions.get(&incoming.id) else {
            return ApplyOutcome::Unknown;
        };
        let slot = &mut self.dishes[index];
        if incoming.revision < slot.revision {
            return ApplyOutcome::Stale;
        }
        *slot = incoming.clone();
        self.recompute_stats();
        ApplyOutcome::Replaced
    }

    /// Records in display order.
    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn get(&self, id: Uuid) -> Option<&Dish> {
        self.positions.get(&id).map(|&i| &self.dishes[i])
    }

    pub fn stats(&self) -> DishStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    fn recompute_stats(&mut self) {
        self.stats = DishStats::from_dishes(&self.dishes);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, Utc};

    fn dish(dish_id: &str, is_published: bool, age_secs: i64) -> Dish {
        Dish {
            id: Uuid::new_v4(),
            dish_id: dish_id.to_owned(),
            dish_name: format!("{dish_id} name"),
            image_url: format!("https://example.invalid/{dish_id}.jpg"),
            is_published,
            revision: 0,
            created_at: Utc::now() - Duration::seconds(age_secs),
        }
    }

    fn toggled(d: &Dish) -> Dish {
        Dish {
            is_published: !d.is_published,
            revision: d.revision + 1,
            ..d.clone()
        }
    }

    fn assert_stats_consistent(cache: &DishCache) {
        let s = cache.stats();
        assert_eq!(s.published + s.unpublished, s.total);
        assert_eq!(s.total, cache.len());
    }

    #[test]
    fn load_sorts_newest_first_and_counts() {
        let mut cache = DishCache::new();
        cache.load(vec![
            dish("old", true, 30),
            dish("newest", false, 1),
            dish("middle", false, 10),
        ]);
        let order: Vec<_> = cache.dishes().iter().map(|d| d.dish_id.as_str()).collect();
        assert_eq!(order, ["newest", "middle", "old"]);
        assert_eq!(
            cache.stats(),
            DishStats {
                total: 3,
                published: 1,
                unpublished: 2
            }
        );
    }

    #[test]
    fn push_replaces_in_place_without_resorting() {
        let a = dish("a", false, 1);
        let b = dish("b", false, 2);
        let mut cache = DishCache::new();
        cache.load(vec![a.clone(), b.clone()]);

        let mut newer_b = toggled(&b);
        // even a pushed createdAt that would sort first keeps its slot
        newer_b.created_at = Utc::now() + Duration::hours(1);
        let outcome = cache.apply(&DishEvent::DishUpdated(newer_b.clone()));

        assert_eq!(outcome, ApplyOutcome::Replaced);
        assert_eq!(cache.dishes()[0].id, a.id);
        assert_eq!(cache.dishes()[1], newer_b);
        assert_eq!(cache.stats().published, 1);
        assert_stats_consistent(&cache);
    }

    #[test]
    fn push_for_unknown_id_is_ignored() {
        let mut cache = DishCache::new();
        cache.load(vec![dish("a", true, 1)]);
        let before = cache.dishes().to_vec();

        let outcome = cache.apply(&DishEvent::DishUpdated(dish("stranger", true, 0)));
        assert_eq!(outcome, ApplyOutcome::Unknown);
        assert_eq!(cache.dishes(), before.as_slice());
    }

    #[test]
    fn stale_push_does_not_overwrite_newer_state() {
        let original = dish("a", false, 1);
        let first = toggled(&original);
        let second = toggled(&first);
        let mut cache = DishCache::new();
        cache.load(vec![original]);

        assert_eq!(cache.apply(&DishEvent::DishUpdated(second.clone())), ApplyOutcome::Replaced);
        assert_eq!(cache.apply(&DishEvent::DishUpdated(first)), ApplyOutcome::Stale);
        assert_eq!(cache.get(second.id), Some(&second));
        assert!(!cache.get(second.id).unwrap().is_published);
    }

    #[test]
    fn slow_fetch_keeps_newer_pushed_copy() {
        let original = dish("a", false, 1);
        let other = dish("b", true, 2);
        let mut cache = DishCache::new();
        cache.load(vec![original.clone(), other.clone()]);

        let pushed = toggled(&original);
        cache.apply(&DishEvent::DishUpdated(pushed.clone()));

        // a fetch issued before the toggle lands afterwards
        cache.load(vec![original.clone(), other.clone()]);
        assert_eq!(cache.get(original.id), Some(&pushed));
        assert_eq!(cache.stats().published, 2);
        assert_stats_consistent(&cache);
    }

    #[test]
    fn load_drops_ids_missing_from_fetch() {
        let keep = dish("keep", false, 1);
        let gone = dish("gone", true, 2);
        let mut cache = DishCache::new();
        cache.load(vec![keep.clone(), gone.clone()]);
        cache.load(vec![keep.clone()]);

        assert_eq!(cache.len(), 1);
        assert!(cache.get(gone.id).is_none());
        assert_eq!(cache.stats().published, 0);
    }

    #[test]
    fn stats_stay_consistent_across_many_toggles() {
        let dishes: Vec<_> = (0..12)
            .map(|i| dish(&format!("dish{i}"), i % 3 == 0, i))
            .collect();
        let mut cache = DishCache::new();
        cache.load(dishes.clone());
        assert_stats_consistent(&cache);

        let mut current = dishes;
        for round in 0..3 {
            for d in current.iter_mut().skip(round).step_by(2) {
                *d = toggled(d);
                cache.apply(&DishEvent::DishUpdated(d.clone()));
                assert_stats_consistent(&cache);
            }
        }
        let expected = current.iter().filter(|d| d.is_published).count();
        assert_eq!(cache.stats().published, expected);
    }
}
