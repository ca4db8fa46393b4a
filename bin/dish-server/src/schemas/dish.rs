use dish_types::Dish;

use crate::entities::DishRecord;

impl DishRecord {
    pub fn into_dish(self) -> Dish {
        Dish {
            id: self.id,
            dish_id: self.dish_id,
            dish_name: self.dish_name,
            image_url: self.image_url,
            is_published: self.is_published,
            revision: self.revision,
            created_at: self.created_at,
        }
    }
}
