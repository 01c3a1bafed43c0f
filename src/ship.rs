use crate::config;
use crate::config::Rgb;
use crate::food::Food;
use crate::select;
use crate::vecmath;
use crate::vecmath::Vector;

use rand::Rng;
use serde_derive::{Deserialize, Serialize};

/// an autonomous ship. every frame it either chases the most valuable
/// food it can see or drifts around waiting for some to show up.
///
/// `speed` is a live cap, not a constant: `arrive` rewrites it every
/// call (ramping down inside the slow radius) and `apply_force` clamps
/// the velocity against whatever it currently is.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vector,
    pub vel: Vector,
    pub speed: f64,
    pub max_force: f64,
    /// facing in degrees, derived from velocity
    pub rotation: f64,
    pub detection_radius: f64,
    /// phase of the wander drift, unbounded, cos/sin wrap it implicitly
    pub wander_angle: f64,
    pub points: u32,
    pub size_multiplier: f64,
    pub color: Rgb,
}

impl Ship {
    pub fn new(pos: Vector, color: Rgb) -> Self {
        Self {
            pos,
            vel: [0., 0.],
            speed: config::CRUISE_SPEED,
            max_force: config::MAX_FORCE,
            rotation: 0.,
            detection_radius: config::DETECTION_RADIUS,
            wander_angle: 0.,
            points: 0,
            size_multiplier: 1.,
            color,
        }
    }

    /// adds the force to the velocity, then caps the velocity at the
    /// current speed.
    pub fn apply_force(&mut self, force: Vector) {
        self.vel = vecmath::add(self.vel, force);
        let mag = vecmath::len(self.vel);
        if mag > self.speed {
            self.vel = vecmath::scale(self.vel, self.speed / mag);
        }
    }

    /// steers toward the target, slowing down inside the slow radius,
    /// then takes one euler step and refreshes the facing.
    pub fn arrive(&mut self, target: Vector) {
        let desired = vecmath::sub(target, self.pos);
        let distance = vecmath::len(desired);
        let dir = if distance > 0. {
            self.speed = if distance < config::SLOW_RADIUS {
                distance / config::SLOW_RADIUS * config::CRUISE_SPEED
            } else {
                config::CRUISE_SPEED
            };
            vecmath::norm(desired)
        } else {
            // sitting exactly on the target, no direction to want
            [0., 0.]
        };
        let desired_vel = vecmath::scale(dir, self.speed);
        let steer = vecmath::sub(desired_vel, self.vel);
        self.apply_force(vecmath::clamp_len(steer, self.max_force));
        self.integrate();
    }

    /// self-correlated random drift for when nothing is in range.
    /// the phase angle takes a small random walk and the ship gets
    /// pushed along (cos, sin) of it, which comes out as smooth
    /// meandering rather than jitter. takes the same euler step as
    /// `arrive` so targetless ships keep moving instead of banking
    /// velocity in place.
    pub fn wander<R: Rng>(&mut self, mut rng: R) {
        self.wander_angle += rng.random_range(-1.0..1.0);
        self.apply_force([
            self.wander_angle.cos() * config::WANDER_FORCE,
            self.wander_angle.sin() * config::WANDER_FORCE,
        ]);
        self.integrate();
    }

    fn integrate(&mut self) {
        self.pos = vecmath::add(self.pos, self.vel);
        // a stopped ship keeps its last facing
        if self.vel != [0., 0.] {
            self.rotation = vecmath::atan2(self.vel).to_degrees();
        }
    }

    pub fn is_in_range(&self, point: Vector) -> bool {
        vecmath::dist(self.pos, point) <= self.detection_radius
    }

    pub fn grow(&mut self, amount: f64) {
        self.size_multiplier += amount;
    }

    /// absorbs another ship: points add up, half its bulk comes along,
    /// velocities average out, colors meet in the middle and the
    /// survivor sees a little further.
    pub fn merge(&mut self, other: &Ship) {
        self.points += other.points;
        self.size_multiplier += other.size_multiplier * 0.5;
        self.vel = vecmath::scale(vecmath::add(self.vel, other.vel), 0.5);
        for (c, o) in self.color.iter_mut().zip(&other.color) {
            *c = ((*c as u16 + *o as u16) / 2) as u8;
        }
        self.detection_radius += config::DETECTION_BONUS;
    }

    /// one frame of life: chase the best food in sight and eat it if
    /// close enough, or wander if nothing is in range.
    pub fn update<R: Rng>(&mut self, foods: &mut [Food], rng: R) {
        match select::best_food(self, foods) {
            Some(index) => {
                debug_assert!(index < foods.len());
                let target = foods[index].pos;
                self.arrive(target);
                if vecmath::dist(self.pos, target) < foods[index].radius {
                    foods[index].active = false;
                    self.points += foods[index].points;
                    self.grow(config::GROWTH_PER_FOOD);
                }
            }
            None => self.wander(rng),
        }
    }
}

#[test]
fn apply_force_never_exceeds_speed() {
    let mut ship = Ship::new([0., 0.], config::SHIP_COLORS[0]);
    ship.apply_force([1000., -370.]);
    assert!(vecmath::len(ship.vel) <= ship.speed + 1e-9);
    // small pushes pass through unclamped
    let mut slow = Ship::new([0., 0.], config::SHIP_COLORS[0]);
    slow.apply_force([0.3, 0.4]);
    assert!((vecmath::len(slow.vel) - 0.5).abs() < 1e-12);
}

#[test]
fn arrive_closes_in_and_ramps_down() {
    let mut ship = Ship::new([0., 0.], config::SHIP_COLORS[0]);
    let target = [500., 0.];
    let mut entered_ramp = false;
    for _ in 0..500 {
        let before = vecmath::dist(ship.pos, target);
        ship.arrive(target);
        let after = vecmath::dist(ship.pos, target);
        assert!(after <= before + 1e-9, "distance went up: {} -> {}", before, after);
        // the speed ramp is set from the distance at the start of the call
        if before > 0. && before < config::SLOW_RADIUS {
            entered_ramp = true;
            let want = before / config::SLOW_RADIUS * config::CRUISE_SPEED;
            assert!((ship.speed - want).abs() < 1e-9);
        }
    }
    assert!(entered_ramp);
    // converged right on top of the target
    assert!(vecmath::dist(ship.pos, target) < 1.);
}

#[test]
fn arrive_on_top_of_target_is_calm() {
    let mut ship = Ship::new([100., 100.], config::SHIP_COLORS[0]);
    ship.arrive([100., 100.]);
    assert!(!ship.pos[0].is_nan() && !ship.pos[1].is_nan());
    assert!(!ship.vel[0].is_nan() && !ship.vel[1].is_nan());
    // no direction to want, started at rest, so it stays put
    assert_eq!(ship.pos, [100., 100.]);
}

#[test]
fn wander_moves_within_the_speed_cap() {
    use rand::SeedableRng;
    let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(99);
    let mut ship = Ship::new([400., 300.], config::SHIP_COLORS[1]);
    for _ in 0..100 {
        ship.wander(&mut rng);
        assert!(vecmath::len(ship.vel) <= ship.speed + 1e-9);
    }
    assert_ne!(ship.pos, [400., 300.]);
}

#[test]
fn merge_combines_both_ships() {
    let mut a = Ship::new([0., 0.], [230, 41, 55]);
    a.points = 13;
    a.vel = [4., 0.];
    let mut b = Ship::new([10., 0.], [0, 121, 241]);
    b.points = 29;
    b.vel = [0., 2.];
    b.size_multiplier = 1.5;

    a.merge(&b);
    assert_eq!(a.points, 42);
    assert!((a.size_multiplier - 1.75).abs() < 1e-12);
    assert_eq!(a.vel, [2., 1.]);
    assert_eq!(a.color, [115, 81, 148]);
    assert!((a.detection_radius - (config::DETECTION_RADIUS + config::DETECTION_BONUS)).abs() < 1e-12);
}
