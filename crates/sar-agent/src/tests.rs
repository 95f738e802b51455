//! Unit and scenario tests for sar-agent.

use std::collections::{BTreeMap, BTreeSet};

use sar_core::{AgentId, AgentProfile, AgentState, ClusterId, Direction, NeighborPolicy, Position, VictimId};
use sar_cluster::ClusterAssignment;
use sar_map::{CellStatus, UnifiedMap, VictimInfo};
use sar_world::{AidOutcome, Environment, GridWorld, Probe, VitalsOutcome, WalkOutcome};

use crate::{ExplorationAgent, NeighborChooser, RescueAgent, StepOutcome, SteppingAgent};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn p(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

const STEP_CAP: usize = 100_000;

/// Step `agent` until it halts; returns the budget observed before every step
/// and after the last one.
fn run(agent: &mut dyn SteppingAgent, env: &mut dyn Environment) -> Vec<f64> {
    let mut budget = vec![env.remaining_time(agent.id())];
    for _ in 0..STEP_CAP {
        let outcome = agent.step(env);
        budget.push(env.remaining_time(agent.id()));
        if outcome == StepOutcome::Halt {
            return budget;
        }
    }
    panic!("agent did not halt within {STEP_CAP} steps");
}

fn spawn_explorer(world: &mut GridWorld, time: f64, policy: NeighborPolicy, seed: u64) -> ExplorationAgent {
    let profile = AgentProfile::new("explorer", time);
    let id = world.spawn(&profile);
    ExplorationAgent::new(id, &profile, NeighborChooser::for_explorer(policy, 0, seed, id))
}

fn five_by_five(victim_walls: bool) -> GridWorld {
    let mut b = GridWorld::builder(5, 5, p(2, 2)).victim(VictimId(1), p(0, 0), vec![1.0, 2.0, 3.0]);
    if victim_walls {
        b = b.walls([p(1, 0), p(0, 1), p(1, 1)]);
    }
    b.build().unwrap()
}

/// Every cell of a `w x h` rectangle marked visited.
fn fully_known(w: i32, h: i32, base: Position) -> UnifiedMap {
    let visited = (0..w).flat_map(|x| (0..h).map(move |y| p(x, y))).collect();
    UnifiedMap::from_parts(base, visited, BTreeSet::new(), BTreeMap::new())
}

fn cluster(victims: Vec<VictimInfo>) -> ClusterAssignment {
    ClusterAssignment { cluster_id: ClusterId(1), victims }
}

/// Single-agent environment with scriptable, possibly stale, obstacles.
///
/// `walls` show up in probes; `hidden` cells probe clear but bump.  Every
/// charged action costs 1.
struct ScriptedEnv {
    width:     i32,
    height:    i32,
    base:      Position,
    pos:       Position,
    remaining: f64,
    walls:     BTreeSet<Position>,
    hidden:    BTreeSet<Position>,
    victims:   BTreeMap<Position, VictimId>,
    state:     AgentState,
}

impl ScriptedEnv {
    fn new(width: i32, height: i32, base: Position, remaining: f64) -> Self {
        Self {
            width,
            height,
            base,
            pos: base,
            remaining,
            walls: BTreeSet::new(),
            hidden: BTreeSet::new(),
            victims: BTreeMap::new(),
            state: AgentState::Active,
        }
    }

    fn inside(&self, q: Position) -> bool {
        q.x >= 0 && q.y >= 0 && q.x < self.width && q.y < self.height
    }
}

impl Environment for ScriptedEnv {
    fn base(&self) -> Position {
        self.base
    }

    fn remaining_time(&self, _: AgentId) -> f64 {
        self.remaining
    }

    fn walk(&mut self, _: AgentId, dx: i32, dy: i32) -> WalkOutcome {
        self.remaining -= 1.0;
        if self.remaining < 0.0 {
            return WalkOutcome::TimeExceeded;
        }
        let t = self.pos.offset(dx, dy);
        if !self.inside(t) || self.walls.contains(&t) || self.hidden.contains(&t) {
            return WalkOutcome::Bumped;
        }
        self.pos = t;
        WalkOutcome::Executed
    }

    fn probe_neighbors(&self, _: AgentId) -> [Probe; 8] {
        Direction::ALL.map(|d| {
            let q = self.pos.step(d);
            if !self.inside(q) {
                Probe::OutOfBounds
            } else if self.walls.contains(&q) {
                Probe::Wall
            } else {
                Probe::Clear
            }
        })
    }

    fn sense_victim(&self, _: AgentId) -> Option<VictimId> {
        self.victims.get(&self.pos).copied()
    }

    fn read_vital_signs(&mut self, _: AgentId) -> VitalsOutcome {
        self.remaining -= 1.0;
        if self.remaining < 0.0 {
            return VitalsOutcome::TimeExceeded;
        }
        VitalsOutcome::Read(vec![0.0])
    }

    fn administer_aid(&mut self, _: AgentId) -> AidOutcome {
        self.remaining -= 1.0;
        if self.remaining < 0.0 {
            return AidOutcome::TimeExceeded;
        }
        if self.victims.contains_key(&self.pos) { AidOutcome::Aided } else { AidOutcome::NoVictim }
    }

    fn set_state(&mut self, _: AgentId, state: AgentState) {
        self.state = state;
    }
}

// ── Chooser ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod chooser_tests {
    use super::*;

    #[test]
    fn preference_picks_first_candidate_in_rotated_order() {
        let mut c = NeighborChooser::for_explorer(NeighborPolicy::RotatedPreference, 1, 0, AgentId(1));
        // slot 1 starts at East.
        let picked = c.choose(&[Direction::North, Direction::South, Direction::East]);
        assert_eq!(picked, Some(Direction::East));
        assert_eq!(c.choose(&[Direction::North]), Some(Direction::North));
        assert_eq!(c.choose(&[]), None);
    }

    #[test]
    fn random_is_reproducible() {
        let all = Direction::ALL;
        let mut a = NeighborChooser::for_explorer(NeighborPolicy::Random, 0, 5, AgentId(3));
        let mut b = NeighborChooser::for_explorer(NeighborPolicy::Random, 0, 5, AgentId(3));
        let xs: Vec<_> = (0..20).map(|_| a.choose(&all)).collect();
        let ys: Vec<_> = (0..20).map(|_| b.choose(&all)).collect();
        assert_eq!(xs, ys);
    }
}

// ── Explorer scenarios ────────────────────────────────────────────────────────

#[cfg(test)]
mod explorer_tests {
    use super::*;

    #[test]
    fn open_grid_is_fully_explored_and_explorer_ends_at_base() {
        for seed in [1, 2, 3] {
            let mut world = five_by_five(false);
            let mut e = spawn_explorer(&mut world, 1_000.0, NeighborPolicy::Random, seed);
            run(&mut e, &mut world);

            assert_eq!(e.visited().len(), 25, "seed {seed}");
            assert_eq!(e.state(), AgentState::Ended);
            assert_eq!(e.position(), p(2, 2));
            assert_eq!(world.state(e.id()), AgentState::Ended);
            assert!(world.remaining_time(e.id()) >= 0.0);

            let report = e.into_report(&world);
            assert_eq!(report.victim_ids(), vec![VictimId(1)]);
            let cell = report.map.get(p(0, 0)).unwrap();
            assert!(cell.vitals_read);
            assert_eq!(cell.vitals, vec![1.0, 2.0, 3.0]);
        }
    }

    #[test]
    fn enclosed_victim_is_never_found() {
        let mut world = five_by_five(true);
        let mut e = spawn_explorer(&mut world, 1_000.0, NeighborPolicy::Random, 7);
        run(&mut e, &mut world);

        assert_eq!(e.state(), AgentState::Ended);
        assert!(!e.visited().contains(&p(0, 0)));
        assert_eq!(e.visited().len(), 21);
        for w in [p(1, 0), p(0, 1), p(1, 1)] {
            assert!(e.obstacles().contains(&w));
            assert_eq!(e.map().status(w), CellStatus::Wall);
        }
        assert!(e.into_report(&world).victim_ids().is_empty());
    }

    #[test]
    fn budget_never_increases_and_death_matches_negative_budget() {
        for time in [0.0, 1.5, 3.0, 4.0, 7.5, 12.0, 20.0, 35.0] {
            let mut world = GridWorld::builder(5, 5, p(2, 2))
                .difficulty(p(1, 1), 3.0)
                .difficulty(p(3, 2), 2.5)
                .victim(VictimId(1), p(0, 0), vec![1.0])
                .victim(VictimId(2), p(2, 3), vec![2.0])
                .build()
                .unwrap();
            let mut e = spawn_explorer(&mut world, time, NeighborPolicy::Random, 11);
            let budget = run(&mut e, &mut world);

            for w in budget.windows(2) {
                assert!(w[1] <= w[0], "budget rose from {} to {} (time {time})", w[0], w[1]);
            }
            let last = *budget.last().unwrap();
            assert_eq!(e.state() == AgentState::Dead, last < 0.0, "time {time}");
            assert!(e.state().is_terminal());
        }
    }

    #[test]
    fn vital_read_can_be_fatal() {
        let mut world = GridWorld::builder(3, 3, p(1, 1))
            .victim(VictimId(4), p(1, 1), vec![1.0])
            .build()
            .unwrap();
        let mut e = spawn_explorer(&mut world, 1.0, NeighborPolicy::Random, 0);
        assert_eq!(e.step(&mut world), StepOutcome::Halt);
        assert_eq!(e.state(), AgentState::Dead);
        assert!(world.remaining_time(e.id()) < 0.0);
        let cell = e.map().get(p(1, 1)).unwrap();
        assert!(cell.victim_present && !cell.vitals_read);
    }

    #[test]
    fn zero_budget_ends_at_base() {
        let mut world = five_by_five(false);
        let mut e = spawn_explorer(&mut world, 0.0, NeighborPolicy::Random, 0);
        run(&mut e, &mut world);
        assert_eq!(e.state(), AgentState::Ended);
        assert_eq!(e.visited().len(), 1);
    }

    #[test]
    fn tight_budget_returns_before_exhaustion() {
        // 9x1 corridor, base in the middle: the reservation must bring the
        // explorer home with a non-negative budget.
        let mut world = GridWorld::builder(9, 1, p(4, 0)).build().unwrap();
        let mut e = spawn_explorer(&mut world, 5.0, NeighborPolicy::RotatedPreference, 0);
        run(&mut e, &mut world);
        assert_eq!(e.state(), AgentState::Ended);
        assert!(world.remaining_time(e.id()) >= 0.0);
        assert!(e.visited().len() > 1);
        assert!(e.visited().len() < 9);
    }

    #[test]
    fn rotated_preference_takes_the_preferred_direction_first() {
        let mut world = five_by_five(false);
        let mut e = spawn_explorer(&mut world, 100.0, NeighborPolicy::RotatedPreference, 0);
        e.step(&mut world);
        assert_eq!(e.position(), p(2, 1));
        assert_eq!(world.position(e.id()), p(2, 1));
    }

    #[test]
    fn measured_difficulty_is_recorded() {
        let mut world = GridWorld::builder(3, 1, p(0, 0)).difficulty(p(1, 0), 4.0).build().unwrap();
        let mut e = spawn_explorer(&mut world, 100.0, NeighborPolicy::RotatedPreference, 0);
        e.step(&mut world);
        assert_eq!(e.position(), p(1, 0));
        assert_eq!(e.map().get(p(1, 0)).unwrap().difficulty, Some(4.0));
    }

    #[test]
    fn path_tree_costs_are_recorded() {
        let mut world = GridWorld::builder(3, 1, p(0, 0)).difficulty(p(1, 0), 4.0).build().unwrap();
        let mut e = spawn_explorer(&mut world, 100.0, NeighborPolicy::RotatedPreference, 0);
        run(&mut e, &mut world);

        let plan = |q| {
            let cell = e.map().get(q).unwrap();
            (cell.g_cost, cell.parent)
        };
        assert_eq!(plan(p(0, 0)), (Some(0.0), None));
        assert_eq!(plan(p(1, 0)), (Some(4.0), Some(p(0, 0))));
        assert_eq!(plan(p(2, 0)), (Some(5.0), Some(p(1, 0))));
    }

    #[test]
    fn every_explored_cell_hangs_off_the_base() {
        let mut world = five_by_five(false);
        let mut e = spawn_explorer(&mut world, 1_000.0, NeighborPolicy::Random, 5);
        run(&mut e, &mut world);

        for &q in e.visited() {
            let mut at = q;
            let mut hops = 0;
            while let Some(parent) = e.map().get(at).unwrap().parent {
                let (dx, dy) = parent.delta_to(at);
                assert!(dx.abs() <= 1 && dy.abs() <= 1, "{parent} -> {at} is not one step");
                assert!(e.map().get(parent).unwrap().g_cost < e.map().get(at).unwrap().g_cost);
                at = parent;
                hops += 1;
                assert!(hops <= 25, "cycle through {q}");
            }
            assert_eq!(at, p(2, 2));
        }
    }

    #[test]
    fn same_seed_same_exploration() {
        let run_once = || {
            let mut world = five_by_five(false);
            let mut e = spawn_explorer(&mut world, 40.0, NeighborPolicy::Random, 99);
            run(&mut e, &mut world);
            (e.visited().clone(), world.remaining_time(e.id()))
        };
        assert_eq!(run_once(), run_once());
    }

    #[test]
    fn bump_records_obstacle_without_moving() {
        let mut env = ScriptedEnv::new(2, 1, p(0, 0), 10.0);
        env.hidden.insert(p(1, 0));
        let profile = AgentProfile::new("e", 10.0);
        let mut e = ExplorationAgent::new(
            AgentId(0),
            &profile,
            NeighborChooser::for_explorer(NeighborPolicy::RotatedPreference, 0, 0, AgentId(0)),
        );
        assert_eq!(e.step(&mut env), StepOutcome::Continue);
        assert_eq!(e.position(), p(0, 0));
        assert!(e.obstacles().contains(&p(1, 0)));
        assert_eq!(e.map().status(p(1, 0)), CellStatus::Wall);

        run(&mut e, &mut env);
        assert_eq!(e.state(), AgentState::Ended);
        assert_eq!(env.state, AgentState::Ended);
    }

    #[test]
    fn halted_explorer_ignores_further_steps() {
        let mut world = five_by_five(false);
        let mut e = spawn_explorer(&mut world, 0.0, NeighborPolicy::Random, 0);
        run(&mut e, &mut world);
        let before = world.remaining_time(e.id());
        assert_eq!(e.step(&mut world), StepOutcome::Halt);
        assert_eq!(world.remaining_time(e.id()), before);
    }
}

// ── Rescuer scenarios ─────────────────────────────────────────────────────────

#[cfg(test)]
mod rescuer_tests {
    use super::*;

    fn spawn_rescuer(world: &mut GridWorld, time: f64, map: UnifiedMap) -> RescueAgent {
        let profile = AgentProfile::new("rescuer", time);
        let id = world.spawn(&profile);
        RescueAgent::new(id, &profile, map)
    }

    #[test]
    fn aids_assigned_victims_in_order_and_returns() {
        let mut world = GridWorld::builder(5, 5, p(0, 0))
            .victim(VictimId(1), p(4, 0), vec![])
            .victim(VictimId(2), p(4, 4), vec![])
            .build()
            .unwrap();
        let map = fully_known(5, 5, p(0, 0));
        let mut r = spawn_rescuer(&mut world, 100.0, map);
        r.assign(&cluster(vec![
            VictimInfo::new(VictimId(1), p(4, 0)),
            VictimInfo::new(VictimId(2), p(4, 4)),
        ]));
        run(&mut r, &mut world);

        let report = r.report(&world);
        assert_eq!(report.state, AgentState::Ended);
        assert_eq!(report.completed, vec![VictimId(1), VictimId(2)]);
        assert!(report.unreachable.is_empty());
        assert!(report.returned_to_base);
        assert_eq!(report.clusters, vec![ClusterId(1)]);
        assert!(world.is_aided(VictimId(1)) && world.is_aided(VictimId(2)));
    }

    #[test]
    fn unreachable_victim_is_skipped() {
        let mut world = GridWorld::builder(5, 5, p(0, 0))
            .victim(VictimId(1), p(1, 1), vec![])
            .build()
            .unwrap();
        // The map only knows the base and (1, 1).
        let visited = BTreeSet::from([p(1, 1)]);
        let map = UnifiedMap::from_parts(p(0, 0), visited, BTreeSet::new(), BTreeMap::new());
        let mut r = spawn_rescuer(&mut world, 100.0, map);
        r.assign(&cluster(vec![
            VictimInfo::new(VictimId(9), p(4, 4)),
            VictimInfo::new(VictimId(1), p(1, 1)),
        ]));
        run(&mut r, &mut world);

        let report = r.report(&world);
        assert_eq!(report.unreachable, vec![VictimId(9)]);
        assert_eq!(report.completed, vec![VictimId(1)]);
        assert_eq!(report.state, AgentState::Ended);
    }

    #[test]
    fn stale_map_triggers_one_replan_around_the_wall() {
        let mut world = GridWorld::builder(5, 2, p(0, 0))
            .wall(p(2, 0))
            .victim(VictimId(1), p(4, 0), vec![])
            .build()
            .unwrap();
        let shared = fully_known(5, 2, p(0, 0));
        let mut r = spawn_rescuer(&mut world, 100.0, shared.clone());
        r.assign(&cluster(vec![VictimInfo::new(VictimId(1), p(4, 0))]));
        run(&mut r, &mut world);

        let report = r.report(&world);
        assert_eq!(report.completed, vec![VictimId(1)]);
        assert_eq!(report.state, AgentState::Ended);
        assert_eq!(r.replans(), 1);
        assert!(r.map().obstacles().contains(&p(2, 0)));
        // The shared map is untouched.
        assert!(shared.obstacles().is_empty());
    }

    #[test]
    fn no_assignment_ends_immediately() {
        let mut world = GridWorld::builder(3, 3, p(1, 1)).build().unwrap();
        let mut r = spawn_rescuer(&mut world, 10.0, fully_known(3, 3, p(1, 1)));
        assert_eq!(r.step(&mut world), StepOutcome::Halt);
        assert_eq!(r.state(), AgentState::Ended);
        assert_eq!(world.remaining_time(r.id()), 10.0);
    }

    #[test]
    fn aid_past_budget_is_fatal() {
        let mut world = GridWorld::builder(3, 1, p(0, 0))
            .victim(VictimId(1), p(1, 0), vec![])
            .build()
            .unwrap();
        let mut r = spawn_rescuer(&mut world, 1.5, fully_known(3, 1, p(0, 0)));
        r.assign(&cluster(vec![VictimInfo::new(VictimId(1), p(1, 0))]));
        run(&mut r, &mut world);
        assert_eq!(r.state(), AgentState::Dead);
        assert_eq!(world.state(r.id()), AgentState::Dead);
        assert!(world.remaining_time(r.id()) < 0.0);
    }

    #[test]
    fn cut_off_from_base_goes_idle() {
        let mut env = ScriptedEnv::new(3, 1, p(0, 0), 100.0);
        env.victims.insert(p(2, 0), VictimId(1));
        let profile = AgentProfile::new("r", 100.0);
        let mut r = RescueAgent::new(AgentId(0), &profile, fully_known(3, 1, p(0, 0)));
        r.assign(&cluster(vec![VictimInfo::new(VictimId(1), p(2, 0))]));

        // Walk out and aid.
        for _ in 0..3 {
            assert_eq!(r.step(&mut env), StepOutcome::Continue);
        }
        assert_eq!(r.position(), p(2, 0));
        // The corridor collapses behind the rescuer.
        env.hidden.insert(p(1, 0));
        run(&mut r, &mut env);

        let report = r.report(&env);
        assert_eq!(report.completed, vec![VictimId(1)]);
        assert_eq!(report.state, AgentState::Idle);
        assert!(!report.returned_to_base);
        assert_eq!(env.state, AgentState::Idle);
    }
}
