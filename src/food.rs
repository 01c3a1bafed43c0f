use crate::config;
use crate::config::Rgb;
use crate::vecmath::Vector;

use rand::Rng;
use serde_derive::{Deserialize, Serialize};

/// one consumable target. eating it flips `active`, the struct itself
/// stays in the pool until the round rolls over and revives it.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Food {
    pub pos: Vector,
    pub points: u32,
    pub color: Rgb,
    pub radius: f64,
    pub active: bool,
}

impl Food {
    fn new<R: Rng>(mut rng: R, bounds: Vector) -> Self {
        Self {
            pos: random_pos(&mut rng, bounds),
            points: rng.random_range(1..=100),
            color: config::FOOD_COLOR,
            radius: config::FOOD_RADIUS,
            active: true,
        }
    }
}

fn random_pos<R: Rng>(mut rng: R, bounds: Vector) -> Vector {
    [
        rng.random_range(0.0..bounds[0]),
        rng.random_range(0.0..bounds[1]),
    ]
}

/// rolls the pool once at startup. the size is random but never changes
/// afterwards, rounds only reposition and reactivate.
pub fn generate<R: Rng>(mut rng: R, bounds: Vector) -> Vec<Food> {
    let count = rng.random_range(config::FOOD_COUNT_MIN..config::FOOD_COUNT_MAX);
    (0..count).map(|_| Food::new(&mut rng, bounds)).collect()
}

/// round rollover: everything comes back, somewhere else.
pub fn reset<R: Rng>(foods: &mut [Food], mut rng: R, bounds: Vector) {
    for food in foods {
        food.active = true;
        food.pos = random_pos(&mut rng, bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn generate_rolls_a_valid_pool() {
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        let bounds = [config::SIM_WIDTH, config::SIM_HEIGHT];
        let foods = generate(&mut rng, bounds);
        assert!(foods.len() >= config::FOOD_COUNT_MIN);
        assert!(foods.len() < config::FOOD_COUNT_MAX);
        for food in &foods {
            assert!(food.active);
            assert!((1..=100).contains(&food.points));
            assert!(food.pos[0] >= 0. && food.pos[0] < bounds[0]);
            assert!(food.pos[1] >= 0. && food.pos[1] < bounds[1]);
        }
    }

    #[test]
    fn reset_revives_and_moves_everything() {
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        let bounds = [config::SIM_WIDTH, config::SIM_HEIGHT];
        let mut foods = generate(&mut rng, bounds);
        let old_len = foods.len();
        for food in &mut foods {
            food.active = false;
        }
        reset(&mut foods, &mut rng, bounds);
        assert_eq!(foods.len(), old_len);
        for food in &foods {
            assert!(food.active);
            assert!(food.pos[0] >= 0. && food.pos[0] < bounds[0]);
            assert!(food.pos[1] >= 0. && food.pos[1] < bounds[1]);
        }
    }
}
