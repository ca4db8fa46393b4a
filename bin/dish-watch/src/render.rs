//! Plain-text rendering of the board.

use std::fmt::Write;

use dish_types::{Dish, DishStats};

const NAME_WIDTH: usize = 24;

/// Header counters followed by one line per dish, in the order given.
pub fn board(dishes: &[Dish], stats: DishStats) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Total: {}  Published: {}  Unpublished: {}",
        stats.total, stats.published, stats.unpublished
    );
    if dishes.is_empty() {
        out.push_str("(no dishes; run `dish-watch reseed`)\n");
        return out;
    }
    let _ = writeln!(
        out,
        "{:<36}  {:<8}  {:<NAME_WIDTH$}  {}",
        "ID", "DISH", "NAME", "STATUS"
    );
    for dish in dishes {
        out.push_str(&row(dish));
        out.push('\n');
    }
    out
}

pub fn row(dish: &Dish) -> String {
    format!(
        "{:<36}  {:<8}  {:<NAME_WIDTH$}  {}",
        dish.id,
        dish.dish_id,
        truncate(&dish.dish_name, NAME_WIDTH),
        status(dish)
    )
}

fn status(dish: &Dish) -> &'static str {
    if dish.is_published {
        "published"
    } else {
        "draft"
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_owned();
    }
    let mut cut: String = s.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn dish(name: &str, is_published: bool) -> Dish {
        Dish {
            id: Uuid::nil(),
            dish_id: "dish7".into(),
            dish_name: name.into(),
            image_url: String::new(),
            is_published,
            revision: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn header_shows_counters() {
        let dishes = [dish("Caesar Salad", true), dish("Fish Tacos", false)];
        let text = board(&dishes, DishStats::from_dishes(&dishes));
        let first = text.lines().next().unwrap();
        assert_eq!(first, "Total: 2  Published: 1  Unpublished: 1");
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("published"));
        assert!(text.contains("draft"));
    }

    #[test]
    fn empty_board_hints_at_reseed() {
        let text = board(&[], DishStats::default());
        assert!(text.contains("Total: 0"));
        assert!(text.contains("reseed"));
    }

    #[test]
    fn long_names_are_cut_to_column_width() {
        let line = row(&dish("Slow-Roasted Heirloom Tomato Bruschetta", false));
        assert!(line.contains('…'));
        assert!(!line.contains("Bruschetta"));
    }
}
