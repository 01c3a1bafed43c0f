//! pure index-returning queries over the live collections, no mutation.
//! callers look the winner up (or remove it) themselves.

use crate::food::Food;
use crate::ship::Ship;

/// highest-value active food inside the ship's detection radius, or
/// `None` when nothing qualifies (the caller falls back to wandering).
/// ties keep the first one in pool order, so the result only depends
/// on the pool itself.
pub fn best_food(ship: &Ship, foods: &[Food]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (index, food) in foods.iter().enumerate() {
        if !food.active || !ship.is_in_range(food.pos) {
            continue;
        }
        match best {
            // only a strictly better value displaces the current pick
            Some(b) if foods[b].points >= food.points => {}
            _ => best = Some(index),
        }
    }
    best
}

/// lowest score, first one wins ties. `None` on an empty collection.
pub fn weakest(ships: &[Ship]) -> Option<usize> {
    ships
        .iter()
        .enumerate()
        .min_by_key(|(_, s)| s.points)
        .map(|(i, _)| i)
}

/// highest score, for the scoreboard.
pub fn leader(ships: &[Ship]) -> Option<usize> {
    ships
        .iter()
        .enumerate()
        .max_by_key(|(_, s)| s.points)
        .map(|(i, _)| i)
}

#[cfg(test)]
fn food_at(pos: [f64; 2], points: u32, active: bool) -> Food {
    use crate::config;
    Food {
        pos,
        points,
        color: config::FOOD_COLOR,
        radius: config::FOOD_RADIUS,
        active,
    }
}

#[test]
fn best_food_takes_first_of_tied_maxima() {
    let ship = Ship::new([0., 0.], [230, 41, 55]);
    let foods = [
        food_at([50., 0.], 30, true),
        food_at([0., 50.], 80, true),
        food_at([-50., 0.], 80, true),
    ];
    let pick = best_food(&ship, &foods).unwrap();
    assert_eq!(pick, 1);
    assert_eq!(foods[pick].points, 80);
}

#[test]
fn best_food_skips_inactive_and_out_of_range() {
    let ship = Ship::new([0., 0.], [230, 41, 55]);
    let foods = [
        food_at([50., 0.], 90, false),
        // detection radius is 150
        food_at([400., 0.], 100, true),
        food_at([50., 50.], 10, true),
    ];
    assert_eq!(best_food(&ship, &foods), Some(2));
    // nothing eligible at all
    let dead = [food_at([50., 0.], 90, false)];
    assert_eq!(best_food(&ship, &dead), None);
}

#[test]
fn weakest_takes_first_of_tied_minima() {
    let mut ships = vec![
        Ship::new([0., 0.], [230, 41, 55]),
        Ship::new([100., 0.], [0, 121, 241]),
        Ship::new([200., 0.], [230, 41, 55]),
    ];
    ships[0].points = 5;
    ships[1].points = 2;
    ships[2].points = 2;
    assert_eq!(weakest(&ships), Some(1));
    assert_eq!(leader(&ships), Some(0));
    assert_eq!(weakest(&[]), None);
}
