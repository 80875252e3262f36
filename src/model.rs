//! Round controller for the guessing game.
//! `GameState` is the single owner of round, score and timer state; the UI
//! drives it through `GameAction`s via Yew's reducer.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

pub const TOTAL_ROUNDS: u32 = 5;
pub const MAX_ROUND_SCORE: u32 = 5000;
/// Guesses this close (game units) earn full credit.
pub const FULL_CREDIT_DISTANCE: f64 = 10.0;
/// Larger = gentler decay.
pub const DECAY_DISTANCE: f64 = 400.0;
pub const NO_GUESS_NOTICE: &str = "Click on the map to make a guess!";

/// In-game coordinates as recorded with each photo (`z` is the map's vertical axis).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameCoords {
    pub x: f64,
    pub z: f64,
}

impl GameCoords {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    pub fn distance_to(&self, other: &GameCoords) -> f64 {
        (self.x - other.x).hypot(self.z - other.z)
    }
}

fn unknown_biome() -> String {
    "Unknown".to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub image: String,
    pub coords: GameCoords,
    #[serde(default = "unknown_biome")]
    pub biome: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundResult {
    pub distance: f64,
    pub score: u32,
    pub accuracy_percent: f64,
}

impl RoundResult {
    pub fn score_guess(guess: GameCoords, actual: GameCoords) -> Self {
        let distance = guess.distance_to(&actual);
        let score = score_for_distance(distance);
        Self {
            distance,
            score,
            accuracy_percent: score as f64 / MAX_ROUND_SCORE as f64 * 100.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoundState {
    /// 1-based.
    pub number: u32,
    pub location: Location,
    pub guess: Option<GameCoords>,
    pub result: Option<RoundResult>,
    pub elapsed_secs: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Loading,
    LoadFailed(String),
    Guessing,
    Revealed,
    GameOver,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub locations: Vec<Location>,
    pub total_rounds: u32,
    pub round: Option<RoundState>,
    pub total_score: u32,
    pub total_elapsed_secs: u64,
    pub phase: Phase,
    /// Transient message for the player (e.g. submitting without a guess).
    pub notice: Option<String>,
    /// Bumped on every accepted action.
    pub version: u64,
    /// Bumped whenever a new round starts; views use it to reset markers.
    pub round_id: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(TOTAL_ROUNDS)
    }
}

impl GameState {
    pub fn new(total_rounds: u32) -> Self {
        Self {
            locations: Vec::new(),
            total_rounds: total_rounds.max(1),
            round: None,
            total_score: 0,
            total_elapsed_secs: 0,
            phase: Phase::Loading,
            notice: None,
            version: 0,
            round_id: 0,
        }
    }

    pub fn round_number(&self) -> u32 {
        self.round.as_ref().map(|r| r.number).unwrap_or(0)
    }

    pub fn max_total_score(&self) -> u32 {
        self.total_rounds * MAX_ROUND_SCORE
    }

    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Guessing
    }

    pub fn can_advance(&self) -> bool {
        self.phase == Phase::Revealed
    }

    /// True location of the current round, once the guess has been scored.
    pub fn revealed_location(&self) -> Option<GameCoords> {
        match (&self.phase, &self.round) {
            (Phase::Revealed, Some(r)) => Some(r.location.coords),
            _ => None,
        }
    }

    pub fn last_biome(&self) -> Option<&str> {
        self.round.as_ref().map(|r| r.location.biome.as_str())
    }

    fn start_round(&mut self, pick: usize) {
        let number = self.round_number() + 1;
        if number > self.total_rounds {
            self.phase = Phase::GameOver;
            log::info!(
                "game over: {} / {} in {}s",
                self.total_score,
                self.max_total_score(),
                self.total_elapsed_secs
            );
            return;
        }
        let location = self.locations[pick % self.locations.len()].clone();
        log::debug!("round {} at {}", number, location.image);
        self.round = Some(RoundState {
            number,
            location,
            guess: None,
            result: None,
            elapsed_secs: 0,
        });
        self.phase = Phase::Guessing;
        self.notice = None;
        self.round_id += 1;
    }
}

#[derive(Clone, Debug)]
pub enum GameAction {
    LocationsLoaded(Vec<Location>),
    LocationsFailed(String),
    /// `pick` indexes into the loaded locations (wrapped), chosen by the caller.
    NextRound { pick: usize },
    PlaceGuess(GameCoords),
    Submit,
    TickSecond,
    Restart { pick: usize },
}

impl Reducible for GameState {
    type Action = GameAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use GameAction::*;
        let mut new = (*self).clone();
        match action {
            LocationsLoaded(locations) => {
                if locations.is_empty() {
                    new.phase = Phase::LoadFailed("no locations available".into());
                } else {
                    log::info!("loaded {} locations", locations.len());
                    new.locations = locations;
                }
            }
            LocationsFailed(reason) => {
                new.phase = Phase::LoadFailed(reason);
            }
            NextRound { pick } => {
                let ready = matches!(new.phase, Phase::Loading | Phase::Revealed);
                if !ready || new.locations.is_empty() {
                    return self;
                }
                new.start_round(pick);
            }
            PlaceGuess(point) => {
                if new.phase != Phase::Guessing {
                    return self;
                }
                if let Some(r) = new.round.as_mut() {
                    r.guess = Some(point);
                }
                new.notice = None;
            }
            Submit => {
                if new.phase != Phase::Guessing {
                    return self;
                }
                let Some(round) = new.round.as_mut() else {
                    return self;
                };
                let Some(guess) = round.guess else {
                    new.notice = Some(NO_GUESS_NOTICE.to_string());
                    new.version += 1;
                    return Rc::new(new);
                };
                let result = RoundResult::score_guess(guess, round.location.coords);
                round.result = Some(result);
                new.total_score = new.total_score.saturating_add(result.score);
                new.phase = Phase::Revealed;
            }
            TickSecond => match new.phase {
                Phase::Guessing => {
                    if let Some(r) = new.round.as_mut() {
                        r.elapsed_secs = r.elapsed_secs.saturating_add(1);
                    }
                    new.total_elapsed_secs = new.total_elapsed_secs.saturating_add(1);
                }
                Phase::Revealed => {
                    new.total_elapsed_secs = new.total_elapsed_secs.saturating_add(1);
                }
                _ => return self,
            },
            Restart { pick } => {
                if new.locations.is_empty() {
                    return self;
                }
                new.round = None;
                new.total_score = 0;
                new.total_elapsed_secs = 0;
                new.start_round(pick);
            }
        }
        new.version += 1;
        Rc::new(new)
    }
}

/// Full credit within `FULL_CREDIT_DISTANCE`, exponential decay beyond it.
pub fn score_for_distance(distance: f64) -> u32 {
    if !distance.is_finite() {
        return 0;
    }
    if distance <= FULL_CREDIT_DISTANCE {
        return MAX_ROUND_SCORE;
    }
    let adjusted = distance - FULL_CREDIT_DISTANCE;
    (MAX_ROUND_SCORE as f64 * (-adjusted / DECAY_DISTANCE).exp()).round() as u32
}

pub fn pick_location(rng: &mut impl Rng, count: usize) -> usize {
    if count == 0 { 0 } else { rng.gen_range(0..count) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn loc(i: u32) -> Location {
        Location {
            image: format!("images/{}.jpg", i),
            coords: GameCoords {
                x: 100.0 * i as f64,
                z: -50.0 * i as f64,
            },
            biome: format!("Biome {}", i),
        }
    }

    fn loaded() -> Rc<GameState> {
        Rc::new(GameState::default())
            .reduce(GameAction::LocationsLoaded((0..3).map(loc).collect()))
            .reduce(GameAction::NextRound { pick: 1 })
    }

    #[test]
    fn score_example_round() {
        let r = RoundResult::score_guess(GameCoords::new(100.0, 200.0), GameCoords::new(110.0, 205.0));
        assert!((r.distance - 11.180339887).abs() < 1e-6);
        assert_eq!(r.score, 4985);
        assert!((r.accuracy_percent - 99.7).abs() < 1e-9);
    }

    #[test]
    fn score_is_full_then_decreasing() {
        assert_eq!(score_for_distance(0.0), 5000);
        assert_eq!(score_for_distance(10.0), 5000);
        assert_eq!(score_for_distance(410.0), 1839);
        assert_eq!(score_for_distance(10_000.0), 0);
        assert_eq!(score_for_distance(f64::NAN), 0);
        let mut last = MAX_ROUND_SCORE;
        for d in (11..3000).step_by(37) {
            let s = score_for_distance(d as f64);
            assert!(s <= last);
            last = s;
        }
    }

    #[test]
    fn locations_json_shape() {
        let raw = r#"[{"image":"a.jpg","coords":{"x":-12.5,"z":300},"biome":"Kelp"},
                      {"image":"b.jpg","coords":{"x":0,"z":0}}]"#;
        let locs: Vec<Location> = serde_json::from_str(raw).unwrap();
        assert_eq!(locs[0].coords, GameCoords::new(-12.5, 300.0));
        assert_eq!(locs[1].biome, "Unknown");
    }

    #[test]
    fn round_flow_submit_and_reveal() {
        let s = loaded();
        assert_eq!(s.phase, Phase::Guessing);
        assert_eq!(s.round_number(), 1);
        assert_eq!(s.round_id, 1);
        assert_eq!(s.round.as_ref().unwrap().location, loc(1));

        let s = s.reduce(GameAction::Submit);
        assert_eq!(s.phase, Phase::Guessing);
        assert_eq!(s.notice.as_deref(), Some(NO_GUESS_NOTICE));

        let s = s
            .reduce(GameAction::PlaceGuess(GameCoords::new(100.0, -50.0)))
            .reduce(GameAction::Submit);
        assert_eq!(s.phase, Phase::Revealed);
        assert_eq!(s.total_score, 5000);
        assert_eq!(s.revealed_location(), Some(GameCoords::new(100.0, -50.0)));
        assert!(s.notice.is_none());

        // Guessing again after the reveal is ignored.
        let v = s.version;
        let s = s.reduce(GameAction::PlaceGuess(GameCoords::new(0.0, 0.0)));
        assert_eq!(s.version, v);
    }

    #[test]
    fn next_round_only_after_reveal() {
        let s = loaded();
        let s = s.reduce(GameAction::NextRound { pick: 2 });
        assert_eq!(s.round_number(), 1);
        let s = s
            .reduce(GameAction::PlaceGuess(GameCoords::new(0.0, 0.0)))
            .reduce(GameAction::Submit)
            .reduce(GameAction::NextRound { pick: 5 });
        assert_eq!(s.round_number(), 2);
        assert_eq!(s.round.as_ref().unwrap().location, loc(2));
        assert!(s.round.as_ref().unwrap().guess.is_none());
        assert_eq!(s.round_id, 2);
    }

    #[test]
    fn game_over_after_last_round_and_restart() {
        let mut s = loaded();
        for _ in 0..TOTAL_ROUNDS {
            s = s
                .reduce(GameAction::PlaceGuess(GameCoords::new(100.0, -50.0)))
                .reduce(GameAction::Submit)
                .reduce(GameAction::NextRound { pick: 1 });
        }
        assert_eq!(s.phase, Phase::GameOver);
        assert_eq!(s.total_score, 5 * 5000);
        assert_eq!(s.total_score, s.max_total_score());

        let v = s.version;
        let s = s.reduce(GameAction::TickSecond);
        assert_eq!(s.version, v);

        let s = s.reduce(GameAction::Restart { pick: 0 });
        assert_eq!(s.phase, Phase::Guessing);
        assert_eq!(s.round_number(), 1);
        assert_eq!(s.total_score, 0);
        assert_eq!(s.total_elapsed_secs, 0);
    }

    #[test]
    fn timers_tick_by_phase() {
        let s = Rc::new(GameState::default()).reduce(GameAction::TickSecond);
        assert_eq!(s.total_elapsed_secs, 0);

        let s = loaded()
            .reduce(GameAction::TickSecond)
            .reduce(GameAction::TickSecond);
        assert_eq!(s.round.as_ref().unwrap().elapsed_secs, 2);
        assert_eq!(s.total_elapsed_secs, 2);

        let s = s
            .reduce(GameAction::PlaceGuess(GameCoords::new(0.0, 0.0)))
            .reduce(GameAction::Submit)
            .reduce(GameAction::TickSecond);
        assert_eq!(s.round.as_ref().unwrap().elapsed_secs, 2);
        assert_eq!(s.total_elapsed_secs, 3);
    }

    #[test]
    fn empty_location_list_fails_loading() {
        let s = Rc::new(GameState::default()).reduce(GameAction::LocationsLoaded(Vec::new()));
        assert!(matches!(s.phase, Phase::LoadFailed(_)));
        let s = s.reduce(GameAction::NextRound { pick: 0 });
        assert!(s.round.is_none());
    }

    #[test]
    fn seeded_picks_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(pick_location(&mut rng, 3) < 3);
        }
        assert_eq!(pick_location(&mut rng, 0), 0);
    }
}
