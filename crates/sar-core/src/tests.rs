//! Unit tests for sar-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, VictimId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "agent#7");
        assert_eq!(VictimId(3).to_string(), "victim#3");
    }
}

#[cfg(test)]
mod time {
    use crate::Tick;

    #[test]
    fn ticks_advance_by_one() {
        assert_eq!(Tick::ZERO.next().next(), Tick(2));
        assert!(Tick(3) < Tick(3).next());
        assert_eq!(Tick(9).to_string(), "T9");
    }
}

#[cfg(test)]
mod geo {
    use crate::{Direction, Position};

    #[test]
    fn compass_is_clockwise_from_north() {
        let deltas: Vec<_> = Direction::ALL.iter().map(|d| d.delta()).collect();
        assert_eq!(
            deltas,
            [(0, -1), (1, -1), (1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (-1, -1)]
        );
    }

    #[test]
    fn from_delta_inverts_delta() {
        for d in Direction::ALL {
            let (dx, dy) = d.delta();
            assert_eq!(Direction::from_delta(dx, dy), Some(d));
        }
        assert_eq!(Direction::from_delta(0, 0), None);
        assert_eq!(Direction::from_delta(2, 0), None);
    }

    #[test]
    fn step_toward_is_diagonal_first() {
        let p = Position::new(4, 4);
        assert_eq!(p.step_toward(Position::new(0, 0)), Position::new(3, 3));
        assert_eq!(p.step_toward(Position::new(4, 9)), Position::new(4, 5));
        assert_eq!(p.step_toward(p), p);
    }

    #[test]
    fn distances() {
        let a = Position::new(0, 0);
        let b = Position::new(3, -2);
        assert_eq!(a.manhattan(b), 5);
        assert_eq!(a.chebyshev(b), 3);
        assert!(a.is_adjacent8(Position::new(1, 1)));
        assert!(!a.is_adjacent8(a));
        assert!(!a.is_adjacent8(Position::new(2, 0)));
    }

    #[test]
    fn rotation_wraps() {
        let r = Direction::West.rotation_from();
        assert_eq!(r[0], Direction::West);
        assert_eq!(r[1], Direction::NorthWest);
        assert_eq!(r[2], Direction::North);
        assert_eq!(r[7], Direction::SouthWest);
    }
}

#[cfg(test)]
mod state {
    use crate::AgentState;

    #[test]
    fn terminal_states() {
        assert!(!AgentState::Active.is_terminal());
        assert!(AgentState::Idle.is_terminal());
        assert!(AgentState::Ended.is_terminal());
        assert!(AgentState::Dead.is_terminal());
        assert!(!AgentState::Dead.survived());
        assert!(AgentState::Idle.survived());
    }
}

#[cfg(test)]
mod triage {
    use crate::TriageClass;

    #[test]
    fn ordered_by_severity() {
        assert!(TriageClass::Green < TriageClass::Yellow);
        assert!(TriageClass::Red < TriageClass::Black);
        assert_eq!(TriageClass::from_index(2).unwrap(), TriageClass::Red);
        assert!(TriageClass::from_index(4).is_err());
    }
}

#[cfg(test)]
mod config {
    use crate::{AgentProfile, CostModel, Direction, MissionConfig, NeighborPolicy};

    #[test]
    fn move_cost_picks_diagonal() {
        let c = CostModel::default();
        assert_eq!(c.move_cost(1, 0), c.line);
        assert_eq!(c.move_cost(-1, 1), c.diag);
    }

    #[test]
    fn invalid_profiles_rejected() {
        assert!(AgentProfile::new("E1", 100.0).validate().is_ok());
        assert!(AgentProfile::new("E1", -1.0).validate().is_err());
        assert!(AgentProfile::new("E1", f64::NAN).validate().is_err());
        let zero_line = CostModel { line: 0.0, ..CostModel::default() };
        assert!(AgentProfile::new("E1", 10.0).with_costs(zero_line).validate().is_err());
    }

    #[test]
    fn mission_config_validation() {
        assert!(MissionConfig::default().validate().is_ok());
        let cfg = MissionConfig { clusters: 0, ..MissionConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rotated_preferences_differ_per_slot() {
        assert_eq!(NeighborPolicy::preference_for(0)[0], Direction::North);
        assert_eq!(NeighborPolicy::preference_for(1)[0], Direction::East);
        assert_eq!(NeighborPolicy::preference_for(3)[0], Direction::West);
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        let pool: Vec<u32> = (0..1000).collect();
        for _ in 0..100 {
            assert_eq!(r1.choose(&pool), r2.choose(&pool));
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        let pool: Vec<u32> = (0..1000).collect();
        let a: Vec<u32> = (0..8).map(|_| *r0.choose(&pool).unwrap()).collect();
        let b: Vec<u32> = (0..8).map(|_| *r1.choose(&pool).unwrap()).collect();
        assert_ne!(a, b, "streams for adjacent agents should diverge");
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = AgentRng::new(0, AgentId(0));
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.choose(&[9]), Some(&9));
    }

    #[test]
    fn shuffle_is_seeded() {
        let mut a: Vec<u32> = (0..20).collect();
        let mut b = a.clone();
        SimRng::new(7).shuffle(&mut a);
        SimRng::new(7).shuffle(&mut b);
        assert_eq!(a, b);
        let mut sorted = a.clone();
        sorted.sort();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }
}
