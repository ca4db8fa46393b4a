//! The fixed sample collection used to reset the store.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::entities::DishRecord;

/// One entry of the seed set.
#[derive(Debug, Clone, Copy)]
pub struct SeedDish {
    pub dish_id: &'static str,
    pub dish_name: &'static str,
    pub image_url: &'static str,
    pub is_published: bool,
}

pub const SEED_DISHES: &[SeedDish] = &[
    SeedDish {
        dish_id: "dish1",
        dish_name: "Margherita Pizza",
        image_url: "https://images.unsplash.com/photo-1604068549290-dea0e4a305ca?w=400&h=300&fit=crop",
        is_published: true,
    },
    SeedDish {
        dish_id: "dish2",
        dish_name: "Caesar Salad",
        image_url: "https://images.unsplash.com/photo-1546793665-c74683f339c1?w=400&h=300&fit=crop",
        is_published: false,
    },
    SeedDish {
        dish_id: "dish3",
        dish_name: "Chocolate Cake",
        image_url: "https://images.unsplash.com/photo-1578985545062-69928b1d9587?w=400&h=300&fit=crop",
        is_published: true,
    },
    SeedDish {
        dish_id: "dish4",
        dish_name: "Grilled Salmon",
        image_url: "https://images.unsplash.com/photo-1467003909585-2f8a72700288?w=400&h=300&fit=crop",
        is_published: false,
    },
    SeedDish {
        dish_id: "dish5",
        dish_name: "Beef Burger",
        image_url: "https://images.unsplash.com/photo-1568901346375-23c9450c58cd?w=400&h=300&fit=crop",
        is_published: false,
    },
    SeedDish {
        dish_id: "dish7",
        dish_name: "Sushi Platter",
        image_url: "https://images.unsplash.com/photo-1579584425555-c3ce17fd4351?w=400&h=300&fit=crop",
        is_published: true,
    },
    SeedDish {
        dish_id: "dish8",
        dish_name: "Tacos Al Pastor",
        image_url: "https://images.unsplash.com/photo-1551504734-5ee1c4a1479b?w=400&h=300&fit=crop",
        is_published: false,
    },
    SeedDish {
        dish_id: "dish9",
        dish_name: "Beef Ramen",
        image_url: "https://images.unsplash.com/photo-1569718212165-3a8278d5f624?w=400&h=300&fit=crop",
        is_published: false,
    },
    SeedDish {
        dish_id: "dish10",
        dish_name: "Mushroom Risotto",
        image_url: "https://images.unsplash.com/photo-1476124369491-e7addf5db371?w=400&h=300&fit=crop",
        is_published: false,
    },
    SeedDish {
        dish_id: "dish11",
        dish_name: "Ice Cream Sundae",
        image_url: "https://images.unsplash.com/photo-1563805042-7684c019e1cb?w=400&h=300&fit=crop",
        is_published: true,
    },
    SeedDish {
        dish_id: "dish12",
        dish_name: "Chicken Biryani",
        image_url: "https://images.unsplash.com/photo-1631452180519-c014fe946bc7?w=400&h=300&fit=crop",
        is_published: false,
    },
    SeedDish {
        dish_id: "dish13",
        dish_name: "Avocado Toast",
        image_url: "https://images.unsplash.com/photo-1541519227354-08fa5d50c44d?w=400&h=300&fit=crop",
        is_published: true,
    },
];

/// Materialize the seed set with fresh ids.
///
/// `created_at` advances by one millisecond per entry starting at `base`, so
/// insertion order and creation order agree.
pub fn seed_records(base: DateTime<Utc>) -> Vec<DishRecord> {
    SEED_DISHES
        .iter()
        .zip(0i64..)
        .map(|(seed, offset)| DishRecord {
            id: Uuid::new_v4(),
            dish_id: seed.dish_id.to_owned(),
            dish_name: seed.dish_name.to_owned(),
            image_url: seed.image_url.to_owned(),
            is_published: seed.is_published,
            revision: 0,
            created_at: base + Duration::milliseconds(offset),
        })
        .collect()
}
