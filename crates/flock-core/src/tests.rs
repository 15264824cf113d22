//! Unit tests for flock-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, PREDATOR_ID_BASE};

    #[test]
    fn prey_and_predator_ranges_are_disjoint() {
        assert!(AgentId::prey(0).is_prey());
        assert!(!AgentId::prey(0).is_predator());
        assert!(AgentId::predator(0).is_predator());
        assert!(!AgentId::predator(0).is_prey());
        assert_ne!(AgentId::prey(5), AgentId::predator(5));
        assert_eq!(AgentId::predator(3).0, PREDATOR_ID_BASE + 3);
    }

    #[test]
    fn invalid_sentinel_is_neither() {
        assert_eq!(AgentId::default(), AgentId::INVALID);
        assert!(!AgentId::INVALID.is_prey());
        assert!(!AgentId::INVALID.is_predator());
    }

    #[test]
    fn display() {
        assert_eq!(AgentId::prey(7).to_string(), "Prey(7)");
        assert_eq!(AgentId::predator(2).to_string(), "Predator(2)");
    }
}

#[cfg(test)]
mod geo {
    use std::f64::consts::FRAC_PI_2;

    use crate::geo::{DVec2, heading_deg, perp, rotate_deg, signed_angle_between};
    use crate::{SimRng, Torus};

    const EPS: f64 = 1e-9;

    #[test]
    fn perp_rotates_counter_clockwise() {
        assert_eq!(perp(DVec2::new(1.0, 0.0)), DVec2::new(0.0, 1.0));
        assert_eq!(perp(DVec2::new(2.0, 3.0)), DVec2::new(-3.0, 2.0));
    }

    #[test]
    fn signed_angle_sign_follows_side() {
        let x = DVec2::X;
        assert!((signed_angle_between(x, DVec2::Y) - FRAC_PI_2).abs() < EPS);
        assert!((signed_angle_between(x, -DVec2::Y) + FRAC_PI_2).abs() < EPS);
        assert!(signed_angle_between(x, x).abs() < EPS);
    }

    #[test]
    fn rotate_and_heading_agree() {
        let v = rotate_deg(DVec2::X, 30.0);
        assert!((heading_deg(v) - 30.0).abs() < EPS);
        assert!((v.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn offset_without_wrap_is_plain_difference() {
        let t = Torus::new(100.0, 100.0, false);
        let a = DVec2::new(5.0, 5.0);
        let b = DVec2::new(95.0, 90.0);
        assert_eq!(t.offset(a, b), b - a);
    }

    #[test]
    fn offset_crosses_boundary_when_shorter() {
        let t = Torus::new(100.0, 100.0, true);
        let o = t.offset(DVec2::new(5.0, 50.0), DVec2::new(95.0, 50.0));
        assert!((o.x + 10.0).abs() < EPS, "got {o}");
        assert!(o.y.abs() < EPS);
    }

    #[test]
    fn offset_is_antisymmetric_and_never_longer() {
        let t = Torus::new(640.0, 480.0, true);
        let mut rng = SimRng::new(7);
        for _ in 0..1_000 {
            let a = DVec2::new(rng.gen_range(0.0..640.0), rng.gen_range(0.0..480.0));
            let b = DVec2::new(rng.gen_range(0.0..640.0), rng.gen_range(0.0..480.0));
            let ab = t.offset(a, b);
            let ba = t.offset(b, a);
            assert!((ab + ba).length() < EPS, "{ab} vs {ba}");
            assert!(ab.length() <= (b - a).length() + EPS);
        }
    }

    #[test]
    fn wrap_point_lands_inside() {
        let t = Torus::new(100.0, 50.0, true);
        for p in [
            DVec2::new(-1.0, -1.0),
            DVec2::new(100.0, 50.0),
            DVec2::new(250.5, -75.25),
            DVec2::new(-1e-18, 3.0),
        ] {
            let w = t.wrap_point(p);
            assert!(t.contains(w), "{p} wrapped to {w}");
        }
        let off = Torus::new(100.0, 50.0, false);
        assert_eq!(off.wrap_point(DVec2::new(-5.0, 80.0)), DVec2::new(-5.0, 80.0));
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Step};

    #[test]
    fn clock_accumulates_variable_dt() {
        let mut clock = SimClock::new();
        clock.advance(0.5);
        clock.advance(0.25);
        assert_eq!(clock.current_step, Step(2));
        assert!((clock.elapsed_secs - 0.75).abs() < 1e-12);
        clock.reset();
        assert_eq!(clock, SimClock::default());
    }

    #[test]
    fn step_display() {
        assert_eq!(Step(12).to_string(), "S12");
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId::predator(0));
        let mut r2 = AgentRng::new(12345, AgentId::predator(0));
        for _ in 0..100 {
            assert_eq!(r1.unit(), r2.unit());
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, AgentId::predator(0));
        let mut r1 = AgentRng::new(1, AgentId::predator(1));
        assert_ne!(r0.unit(), r1.unit(), "seeds for adjacent agents should diverge");
    }

    #[test]
    fn choose_index_bounds() {
        let mut rng = AgentRng::new(0, AgentId::predator(0));
        assert_eq!(rng.choose_index(0), None);
        for _ in 0..200 {
            let i = rng.choose_index(3).unwrap();
            assert!(i < 3);
        }
    }
}

#[cfg(test)]
mod config {
    use crate::{FlockError, SimConfig, WorldConfig};

    #[test]
    fn defaults_validate() {
        SimConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_width_rejected() {
        let cfg = WorldConfig { width: 0.0, ..WorldConfig::default() };
        assert!(matches!(cfg.validate(), Err(FlockError::NotPositive { name: "world.width", .. })));
    }

    #[test]
    fn occlusion_angle_range_checked() {
        let cfg = WorldConfig { occlusion_angle_deg: 200.0, ..WorldConfig::default() };
        assert!(matches!(cfg.validate(), Err(FlockError::OutOfRange { .. })));
    }

    #[test]
    fn torus_follows_config() {
        let t = WorldConfig::default().torus();
        assert!(t.wrap);
        assert_eq!(t.width, 1_000.0);
    }
}
