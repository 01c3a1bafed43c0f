use crate::config;
use crate::food;
use crate::food::Food;
use crate::select;
use crate::ship::Ship;
use crate::vecmath;
use crate::vecmath::Vector;

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg as DetRng;
use serde_derive::{Deserialize, Serialize};

/// the whole simulation in one value: ships, the food pool, the round
/// timer and the one rng everything draws from. hosts thread it through
/// `update` once per frame, there is no global state anywhere.
#[derive(Debug, Serialize, Deserialize)]
pub struct App {
    ships: Vec<Ship>,
    foods: Vec<Food>,
    /// world size, fixed at construction, used for random placement
    bounds: Vector,
    /// seconds into the current round
    round_timer: f64,
    round: u32,
    /// update steps taken since the start
    time: u64,
    rng: DetRng,
    #[serde(skip)]
    report_file: Option<std::fs::File>,
}

impl App {
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }
    pub fn foods(&self) -> &[Food] {
        &self.foods
    }
    pub fn round(&self) -> u32 {
        self.round
    }
    pub fn round_timer(&self) -> f64 {
        self.round_timer
    }

    pub fn new(seed: u64, bounds: Vector, report_path: Option<&str>) -> Self {
        let mut rng = DetRng::seed_from_u64(seed);
        let foods = food::generate(&mut rng, bounds);
        let ships = (0..config::INITIAL_SHIPS)
            .map(|i| {
                let slot = i as f64 - (config::INITIAL_SHIPS / 2) as f64;
                Ship::new(
                    [bounds[0] / 2. + config::SHIP_SPACING * slot, bounds[1] / 2.],
                    config::SHIP_COLORS[i % config::SHIP_COLORS.len()],
                )
            })
            .collect();
        let report_file = report_path.map(std::fs::File::create).map(Result::unwrap);
        App {
            ships,
            foods,
            bounds,
            round_timer: 0.,
            round: 1,
            time: 0,
            rng,
            report_file,
        }
    }

    pub fn new_from<R: std::io::Read>(
        mut r: R,
        report_path: Option<&str>,
    ) -> Result<Self, bincode::error::DecodeError> {
        let mut app: App =
            bincode::serde::decode_from_std_read(&mut r, bincode::config::standard())?;
        app.report_file = report_path.map(std::fs::File::create).map(Result::unwrap);
        Ok(app)
    }

    pub fn write_into<W: std::io::Write>(
        &self,
        mut w: W,
    ) -> Result<usize, bincode::error::EncodeError> {
        bincode::serde::encode_into_std_write(self, &mut w, bincode::config::standard())
    }

    /// one frame: collisions merge first, then every surviving ship
    /// acts on the world as it is now, then the round timer advances.
    /// `dt` only feeds the timer, steering and motion are per-step.
    pub fn update(&mut self, dt: f64) {
        self.time += 1;

        resolve_merges(&mut self.ships);

        let App {
            ships, foods, rng, ..
        } = self;
        for ship in ships.iter_mut() {
            ship.update(foods, &mut *rng);
            assert!(!ship.pos[0].is_nan());
            assert!(!ship.pos[1].is_nan());
        }

        self.round_timer += dt;
        if self.round_timer >= config::ROUND_LENGTH {
            self.end_round();
        }
    }

    /// round rollover: the food comes back everywhere, the weakest
    /// ship does not. culling stops once a single ship is left, the
    /// simulation itself never ends.
    fn end_round(&mut self) {
        food::reset(&mut self.foods, &mut self.rng, self.bounds);
        if self.ships.len() > 1 {
            if let Some(weakest) = select::weakest(&self.ships) {
                self.ships.remove(weakest);
            }
        }
        self.round_timer = 0.;
        self.round += 1;
        self.report();
        self.write_report();
    }
}

/// scans ship pairs in index order and resolves proximity collisions.
/// on a hit the lower index absorbs the higher one and the scan moves
/// straight on to the next outer index, so each outer index merges at
/// most once per frame. further pairs that are also in range get their
/// turn on a later index or a later frame. not an exhaustive
/// settlement, and kept that way on purpose: resolving all pairs at
/// once would change which of several close ships survives.
fn resolve_merges(ships: &mut Vec<Ship>) {
    let mut i = 0;
    while i < ships.len() {
        let mut j = i + 1;
        while j < ships.len() {
            if vecmath::dist(ships[i].pos, ships[j].pos) < config::MERGE_RADIUS {
                let other = ships.remove(j);
                ships[i].merge(&other);
                break;
            }
            j += 1;
        }
        i += 1;
    }
}

#[derive(Debug, PartialEq)]
pub struct Report {
    round: u32,
    time: u64,
    ships: usize,
    leader_points: u32,
    total_points: u32,
    active_food: usize,
}

impl App {
    fn gen_report(&self) -> Option<Report> {
        let leader = select::leader(&self.ships)?;
        Report {
            round: self.round,
            time: self.time,
            ships: self.ships.len(),
            leader_points: self.ships[leader].points,
            total_points: self.ships.iter().map(|s| s.points).sum(),
            active_food: self.foods.iter().filter(|f| f.active).count(),
        }
        .into()
    }

    pub fn report(&self) {
        if let Some(r) = self.gen_report() {
            println!("round              : {}", r.round);
            println!("steps              : {}", r.time);
            println!("ships remaining    : {}", r.ships);
            println!("leader points      : {}", r.leader_points);
            println!("total points       : {}", r.total_points);
            println!("active food        : {}", r.active_food);
            for (i, ship) in self.ships.iter().enumerate() {
                println!("  ship {} points   : {}", i + 1, ship.points);
            }
            println!();
        } else {
            println!("no ships at all");
        }
    }

    // takes &mut for the file write, kinda pointless since files are global state anyway
    pub fn write_report(&mut self) {
        if self.report_file.is_none() {
            return;
        }
        let r = if let Some(r) = self.gen_report() {
            r
        } else {
            return;
        };
        if let Some(file) = self.report_file.as_mut() {
            let reportline = format!(
                "{}, {}, {}, {}, {}, {}\n",
                r.round, r.time, r.ships, r.leader_points, r.total_points, r.active_food
            );
            std::io::Write::write_all(file, reportline.as_bytes()).unwrap();
        }
    }
}

impl PartialEq for App {
    fn eq(&self, other: &Self) -> bool {
        self.ships == other.ships
            && self.foods == other.foods
            && self.bounds == other.bounds
            && self.round_timer == other.round_timer
            && self.round == other.round
            && self.time == other.time
    }
}

#[cfg(test)]
fn test_app(seed: u64) -> App {
    App::new(seed, [config::SIM_WIDTH, config::SIM_HEIGHT], None)
}

#[test]
fn determinism() {
    let mut app1 = test_app(1234);
    let mut app2 = test_app(1234);

    for _ in 0..5_000 {
        app1.update(config::STEP_SIZE);
        app2.update(config::STEP_SIZE);
        assert_eq!(app1, app2);
    }
}

#[test]
fn ser_de_determinism() {
    let mut app1 = test_app(1234);
    let mut app2 = test_app(1234);

    for i in 0..3_000 {
        app1.update(config::STEP_SIZE);
        app2.update(config::STEP_SIZE);
        assert_eq!(app1, app2);
        if i % 500 == 0 {
            let bytes =
                bincode::serde::encode_to_vec(&app2, bincode::config::standard()).unwrap();
            let (restored, _len): (App, usize) =
                bincode::serde::decode_from_slice(&bytes, bincode::config::standard()).unwrap();
            app2 = restored;
        }
    }
}

#[test]
fn step_consumes_adjacent_food() {
    let mut app = test_app(1);
    let ship = Ship::new([400., 300.], config::SHIP_COLORS[0]);
    app.ships = vec![ship];
    app.foods = vec![Food {
        pos: [400., 300.],
        points: 37,
        color: config::FOOD_COLOR,
        radius: config::FOOD_RADIUS,
        active: true,
    }];

    app.update(config::STEP_SIZE);

    assert!(!app.foods[0].active);
    assert_eq!(app.ships[0].points, 37);
    assert!((app.ships[0].size_multiplier - 1.02).abs() < 1e-12);
}

#[test]
fn merge_pass_resolves_one_pair() {
    let mut a = Ship::new([100., 100.], config::SHIP_COLORS[0]);
    a.points = 3;
    let mut b = Ship::new([110., 100.], config::SHIP_COLORS[1]);
    b.points = 4;
    let mut ships = vec![a, b];

    resolve_merges(&mut ships);

    assert_eq!(ships.len(), 1);
    assert_eq!(ships[0].points, 7);
}

#[test]
fn merge_pass_is_one_merge_per_outer_index() {
    // three ships all mutually in range: the first absorbs the second
    // and moves on, the third survives the frame untouched.
    let mut ships = vec![
        Ship::new([100., 100.], config::SHIP_COLORS[0]),
        Ship::new([110., 100.], config::SHIP_COLORS[1]),
        Ship::new([105., 110.], config::SHIP_COLORS[0]),
    ];
    ships[0].points = 1;
    ships[1].points = 2;
    ships[2].points = 4;

    resolve_merges(&mut ships);

    assert_eq!(ships.len(), 2);
    assert_eq!(ships[0].points, 3);
    assert_eq!(ships[1].points, 4);
}

#[test]
fn merge_pass_leaves_distant_ships_alone() {
    let mut ships = vec![
        Ship::new([100., 100.], config::SHIP_COLORS[0]),
        Ship::new([100. + config::MERGE_RADIUS, 100.], config::SHIP_COLORS[1]),
    ];
    // exactly at the threshold is not a collision
    resolve_merges(&mut ships);
    assert_eq!(ships.len(), 2);
}

#[test]
fn rollover_revives_food_and_culls_the_weakest() {
    let mut app = test_app(2);
    app.ships = vec![
        Ship::new([100., 100.], config::SHIP_COLORS[0]),
        Ship::new([400., 300.], config::SHIP_COLORS[1]),
        Ship::new([700., 500.], config::SHIP_COLORS[0]),
    ];
    app.ships[0].points = 5;
    app.ships[1].points = 1;
    app.ships[2].points = 9;
    for food in &mut app.foods {
        food.active = false;
    }
    app.round_timer = config::ROUND_LENGTH;

    let round_before = app.round;
    app.end_round();

    assert_eq!(app.round_timer, 0.);
    assert_eq!(app.round, round_before + 1);
    assert!(app.foods.iter().all(|f| f.active));
    let points: Vec<u32> = app.ships.iter().map(|s| s.points).collect();
    assert_eq!(points, vec![5, 9]);
}

#[test]
fn rollover_spares_the_last_ship() {
    let mut app = test_app(3);
    app.ships = vec![Ship::new([100., 100.], config::SHIP_COLORS[0])];
    app.end_round();
    assert_eq!(app.ships.len(), 1);
}

#[test]
fn update_triggers_rollover_at_the_threshold() {
    let mut app = test_app(4);
    app.round_timer = config::ROUND_LENGTH - config::STEP_SIZE / 2.;
    let round_before = app.round;
    app.update(config::STEP_SIZE);
    assert_eq!(app.round, round_before + 1);
    assert_eq!(app.round_timer, 0.);
}

#[test]
fn total_points_never_decrease_within_a_round() {
    // consumption adds points and merges preserve their sum, nothing
    // subtracts. 600 steps stay well inside the first round.
    let mut app = test_app(5);
    let mut last: u32 = 0;
    for _ in 0..600 {
        app.update(config::STEP_SIZE);
        let total: u32 = app.ships.iter().map(|s| s.points).sum();
        assert!(total >= last);
        last = total;
    }
}
