use crate::{
    ControlChannel, ControlVector, Course, KillBreakdown, OracleError, RunSummary,
    SimulationOracle, Tile, playback::DEFAULT_ACTION,
};

/// Hit points at the start of a walk. Mushrooms raise health up to
/// [`MAX_HEALTH`]; an enemy contact on the ground costs one point.
const START_HEALTH: u32 = 1;
const MAX_HEALTH: u32 = 2;

/// A deterministic stand-in simulator.
///
/// The synthetic oracle walks a [`Course`] strip cell by cell under the given
/// input sequence. It is a purely arithmetic model — no physics, no timing
/// windows — built so the search core, the CLI and the test suite have a
/// cheap, fully reproducible oracle. The real game engine remains an external
/// collaborator behind the same [`SimulationOracle`] trait.
///
/// # Walk rules
///
/// - `Right` moves one cell forward per tick, two with `Speed`; `Left` moves
///   one cell back. Opposite directions cancel.
/// - The player is airborne on any tick where `Jump` is held.
/// - Standing on (or walking into) a gap while not airborne loses the run.
/// - Enemies are stomped when entered airborne, killed at range when the
///   player holds `Speed` after collecting a fire flower, and otherwise cost
///   one hit point. Health zero loses the run.
/// - Coins, mushrooms and fire flowers are collected on pass-through and
///   consumed.
/// - Reaching the end of the strip within the tick budget wins; otherwise the
///   run times out.
///
/// Ticks past the end of the input sequence are played with
/// [`DEFAULT_ACTION`], matching the playback fallback.
#[derive(Debug, Clone)]
pub struct SyntheticOracle {
    tick_budget: usize,
}

impl SyntheticOracle {
    /// Creates an oracle with the given per-run tick budget.
    #[must_use]
    pub const fn new(tick_budget: usize) -> Self {
        Self { tick_budget }
    }

    /// The per-run tick budget.
    #[must_use]
    pub const fn tick_budget(&self) -> usize {
        self.tick_budget
    }
}

impl SimulationOracle for SyntheticOracle {
    fn run(&self, course: &Course, inputs: &[ControlVector]) -> Result<RunSummary, OracleError> {
        if self.tick_budget == 0 {
            return Err(OracleError::Failed {
                reason: "tick budget is zero".to_owned(),
            });
        }
        if course.is_empty() {
            return Err(OracleError::CourseRejected {
                reason: "course contains no tiles".to_owned(),
            });
        }
        Ok(CourseWalk::new(course).run(inputs, self.tick_budget))
    }
}

/// Mutable state of one walk through a course.
#[derive(Debug)]
struct CourseWalk<'a> {
    course: &'a Course,
    /// Tiles already consumed (coins, items, defeated enemies).
    consumed: Vec<bool>,
    position: usize,
    max_position: usize,
    health: u32,
    fiery: bool,
    kills: KillBreakdown,
    hits_taken: u32,
    coins: u32,
    mushrooms: u32,
    fire_flowers: u32,
}

/// Outcome of a single tick, when the walk ends on it.
enum TickOutcome {
    Fell,
    Died,
    Won,
}

impl<'a> CourseWalk<'a> {
    fn new(course: &'a Course) -> Self {
        Self {
            course,
            consumed: vec![false; course.len()],
            position: 0,
            max_position: 0,
            health: START_HEALTH,
            fiery: false,
            kills: KillBreakdown::default(),
            hits_taken: 0,
            coins: 0,
            mushrooms: 0,
            fire_flowers: 0,
        }
    }

    fn run(mut self, inputs: &[ControlVector], tick_budget: usize) -> RunSummary {
        for tick in 0..tick_budget {
            let input = inputs.get(tick).copied().unwrap_or(DEFAULT_ACTION);
            match self.advance(input) {
                None => {}
                Some(TickOutcome::Won) => {
                    return self.finish(crate::TerminalStatus::Win, tick_budget - (tick + 1));
                }
                Some(TickOutcome::Fell | TickOutcome::Died) => {
                    return self.finish(crate::TerminalStatus::Lose, tick_budget - (tick + 1));
                }
            }
        }
        self.finish(crate::TerminalStatus::TimeOut, 0)
    }

    /// Plays one tick; returns `Some` when the walk ends on it.
    fn advance(&mut self, input: ControlVector) -> Option<TickOutcome> {
        let airborne = input.get(ControlChannel::Jump);
        let left = input.get(ControlChannel::Left);
        let right = input.get(ControlChannel::Right);

        let steps = if right && !left {
            if input.get(ControlChannel::Speed) { 2 } else { 1 }
        } else {
            0
        };
        if left && !right {
            self.position = self.position.saturating_sub(1);
        }

        for _ in 0..steps {
            self.position += 1;
            if self.position >= self.course.len() {
                return Some(TickOutcome::Won);
            }
            if let Some(outcome) = self.enter_cell(input, airborne) {
                return Some(outcome);
            }
        }
        self.max_position = self.max_position.max(self.position);

        // Standing still over a gap is a fall as well.
        if !airborne && self.course.tile(self.position) == Some(Tile::Gap) {
            return Some(TickOutcome::Fell);
        }
        None
    }

    fn enter_cell(&mut self, input: ControlVector, airborne: bool) -> Option<TickOutcome> {
        self.max_position = self.max_position.max(self.position);
        if self.consumed[self.position] {
            return None;
        }
        match self.course.tile(self.position)? {
            Tile::Ground => {}
            Tile::Gap => {
                if !airborne {
                    return Some(TickOutcome::Fell);
                }
            }
            Tile::Coin => {
                self.coins += 1;
                self.consumed[self.position] = true;
            }
            Tile::Mushroom => {
                self.mushrooms += 1;
                self.health = (self.health + 1).min(MAX_HEALTH);
                self.consumed[self.position] = true;
            }
            Tile::FireFlower => {
                self.fire_flowers += 1;
                self.fiery = true;
                self.consumed[self.position] = true;
            }
            Tile::Enemy => {
                self.consumed[self.position] = true;
                if self.fiery && input.get(ControlChannel::Speed) {
                    self.kills.fire += 1;
                } else if airborne {
                    self.kills.stomp += 1;
                } else {
                    self.hits_taken += 1;
                    self.health -= 1;
                    if self.health == 0 {
                        return Some(TickOutcome::Died);
                    }
                }
            }
        }
        None
    }

    #[expect(clippy::cast_precision_loss)]
    fn finish(self, status: crate::TerminalStatus, remaining_ticks: usize) -> RunSummary {
        let completion = if status.is_win() {
            1.0
        } else {
            self.max_position as f32 / self.course.len() as f32
        };
        RunSummary::new(
            status,
            completion,
            remaining_ticks,
            self.kills,
            self.hits_taken,
            self.coins,
            self.mushrooms,
            self.fire_flowers,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TerminalStatus;

    fn forward() -> ControlVector {
        ControlVector::EMPTY.with(ControlChannel::Right)
    }

    fn forward_jump() -> ControlVector {
        forward().with(ControlChannel::Jump)
    }

    #[test]
    fn test_straight_course_is_won_by_walking_forward() {
        let course = Course::parse("flat", "----------").unwrap();
        let oracle = SyntheticOracle::new(20);
        let inputs = vec![forward(); 20];
        let summary = oracle.run(&course, &inputs).unwrap();
        assert_eq!(summary.status(), TerminalStatus::Win);
        assert_eq!(summary.completion(), 1.0);
        assert_eq!(summary.remaining_ticks(), 10);
    }

    #[test]
    fn test_speed_halves_the_walk_time() {
        let course = Course::parse("flat", "----------").unwrap();
        let oracle = SyntheticOracle::new(20);
        let inputs = vec![forward().with(ControlChannel::Speed); 20];
        let summary = oracle.run(&course, &inputs).unwrap();
        assert_eq!(summary.status(), TerminalStatus::Win);
        assert_eq!(summary.remaining_ticks(), 15);
    }

    #[test]
    fn test_gap_without_jump_loses_with_partial_completion() {
        let course = Course::parse("gap", "----G-----").unwrap();
        let oracle = SyntheticOracle::new(20);
        let inputs = vec![forward(); 20];
        let summary = oracle.run(&course, &inputs).unwrap();
        assert_eq!(summary.status(), TerminalStatus::Lose);
        assert!(summary.completion() < 1.0);
        assert!(summary.completion() >= 0.3);
    }

    #[test]
    fn test_jump_clears_the_gap() {
        let course = Course::parse("gap", "----G-----").unwrap();
        let oracle = SyntheticOracle::new(20);
        let inputs = vec![forward_jump(); 20];
        let summary = oracle.run(&course, &inputs).unwrap();
        assert_eq!(summary.status(), TerminalStatus::Win);
    }

    #[test]
    fn test_coins_are_collected_once() {
        let course = Course::parse("coins", "-o-o------").unwrap();
        let oracle = SyntheticOracle::new(20);
        let summary = oracle.run(&course, &vec![forward(); 20]).unwrap();
        assert_eq!(summary.coins(), 2);
    }

    #[test]
    fn test_enemy_is_stomped_when_airborne() {
        let course = Course::parse("enemy", "---E------").unwrap();
        let oracle = SyntheticOracle::new(20);
        let summary = oracle.run(&course, &vec![forward_jump(); 20]).unwrap();
        assert_eq!(summary.status(), TerminalStatus::Win);
        assert_eq!(summary.kills().stomp, 1);
        assert_eq!(summary.hits_taken(), 0);
    }

    #[test]
    fn test_grounded_enemy_contact_kills_small_player() {
        let course = Course::parse("enemy", "---E------").unwrap();
        let oracle = SyntheticOracle::new(20);
        let summary = oracle.run(&course, &vec![forward(); 20]).unwrap();
        assert_eq!(summary.status(), TerminalStatus::Lose);
        assert_eq!(summary.hits_taken(), 1);
    }

    #[test]
    fn test_mushroom_absorbs_one_hit() {
        let course = Course::parse("mushroom", "-M-E------").unwrap();
        let oracle = SyntheticOracle::new(20);
        let summary = oracle.run(&course, &vec![forward(); 20]).unwrap();
        assert_eq!(summary.status(), TerminalStatus::Win);
        assert_eq!(summary.mushrooms(), 1);
        assert_eq!(summary.hits_taken(), 1);
    }

    #[test]
    fn test_fire_flower_enables_ranged_kill() {
        let course = Course::parse("flower", "-F-E------").unwrap();
        let oracle = SyntheticOracle::new(20);
        let inputs = vec![forward().with(ControlChannel::Speed); 20];
        let summary = oracle.run(&course, &inputs).unwrap();
        assert_eq!(summary.status(), TerminalStatus::Win);
        assert_eq!(summary.fire_flowers(), 1);
        assert_eq!(summary.kills().fire, 1);
        assert_eq!(summary.hits_taken(), 0);
    }

    #[test]
    fn test_short_budget_times_out() {
        let course = Course::parse("flat", "--------------------").unwrap();
        let oracle = SyntheticOracle::new(5);
        let summary = oracle.run(&course, &vec![forward(); 5]).unwrap();
        assert_eq!(summary.status(), TerminalStatus::TimeOut);
        assert_eq!(summary.remaining_ticks(), 0);
        assert_eq!(summary.completion(), 0.25);
    }

    #[test]
    fn test_empty_inputs_fall_back_to_default_forward_action() {
        let course = Course::parse("flat", "----------").unwrap();
        let oracle = SyntheticOracle::new(20);
        let summary = oracle.run(&course, &[]).unwrap();
        assert_eq!(summary.status(), TerminalStatus::Win);
    }

    #[test]
    fn test_runs_are_deterministic() {
        let course = Course::parse("mixed", "--o-G-E-M-o---G---").unwrap();
        let oracle = SyntheticOracle::new(40);
        let inputs: Vec<_> = (0..40)
            .map(|tick| {
                if tick % 3 == 0 {
                    forward_jump()
                } else {
                    forward()
                }
            })
            .collect();
        let first = oracle.run(&course, &inputs).unwrap();
        let second = oracle.run(&course, &inputs).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_tick_budget_is_an_error() {
        let course = Course::parse("flat", "----").unwrap();
        let oracle = SyntheticOracle::new(0);
        assert!(matches!(
            oracle.run(&course, &[]),
            Err(OracleError::Failed { .. })
        ));
    }
}
