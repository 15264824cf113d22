//! Unit tests for flock-behavior.

use flock_agent::{Boid, BoidParams, HuntingState, Predator};
use flock_core::{AgentId, DVec2, Torus};

use crate::{Behavior, StepContext};

const EPS: f64 = 1e-9;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn ctx() -> StepContext {
    StepContext {
        torus:               Torus::new(1_000.0, 1_000.0, false),
        occlusion_angle_deg: 0.0,
        dt:                  0.02,
    }
}

fn prey(n: u32, pos: (f64, f64), vel: (f64, f64)) -> Boid {
    Boid::new(AgentId::prey(n), BoidParams::prey(), DVec2::new(pos.0, pos.1), DVec2::new(vel.0, vel.1))
}

fn predator(n: u32, pos: (f64, f64), vel: (f64, f64)) -> Predator {
    let boid = Boid::new(
        AgentId::predator(n),
        BoidParams::predator(),
        DVec2::new(pos.0, pos.1),
        DVec2::new(vel.0, vel.1),
    );
    Predator::new(boid, 42)
}

/// Three prey below a predator heading +y at (5, -40).
fn triangle() -> Vec<Boid> {
    vec![
        prey(0, (0.0, 0.0), (60.0, 0.0)),
        prey(1, (10.0, 0.0), (60.0, 0.0)),
        prey(2, (5.0, 10.0), (60.0, 0.0)),
    ]
}

// ── Perception ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod perception_tests {
    use crate::{FieldOfView, perceive};

    use super::*;

    const FOV: FieldOfView = FieldOfView { radius: 100.0, angle_deg: 135.0 };

    #[test]
    fn radius_is_strict_and_fov_inclusive() {
        let me = prey(0, (0.0, 0.0), (60.0, 0.0));
        let others = vec![
            prey(1, (50.0, 0.0), (60.0, 0.0)),
            prey(2, (100.0, 0.0), (60.0, 0.0)),
            prey(3, (-50.0, 0.0), (60.0, 0.0)),
            prey(4, (0.0, 50.0), (60.0, 0.0)),
        ];
        let seen = perceive(&me, &others, None, FOV, &ctx());
        let ids: Vec<AgentId> = seen.iter().map(|s| s.boid.id()).collect();
        assert_eq!(ids, vec![AgentId::prey(1), AgentId::prey(4)]);
        assert_eq!(seen[0].offset, DVec2::new(50.0, 0.0));
        assert!((seen[1].dist_sq - 2_500.0).abs() < EPS);
    }

    #[test]
    fn skip_excludes_observer() {
        let flock = vec![prey(0, (0.0, 0.0), (60.0, 0.0)), prey(1, (20.0, 0.0), (60.0, 0.0))];
        let seen = perceive(&flock[0], &flock, Some(0), FOV, &ctx());
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].boid.id(), AgentId::prey(1));
    }

    #[test]
    fn occlusion_keeps_nearest_on_bearing() {
        let me = prey(0, (0.0, 0.0), (60.0, 0.0));
        let mut c = ctx();
        c.occlusion_angle_deg = 5.0;

        // Far first: the near one replaces it.
        let far_first = vec![prey(1, (30.0, 1.0), (60.0, 0.0)), prey(2, (10.0, 0.0), (60.0, 0.0))];
        let seen = perceive(&me, &far_first, None, FOV, &c);
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].boid.id(), AgentId::prey(2));

        // Near first: the far one is hidden.
        let near_first = vec![prey(1, (10.0, 0.0), (60.0, 0.0)), prey(2, (30.0, 1.0), (60.0, 0.0))];
        let seen = perceive(&me, &near_first, None, FOV, &c);
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].boid.id(), AgentId::prey(1));

        // Disabled: both visible.
        assert_eq!(perceive(&me, &near_first, None, FOV, &ctx()).len(), 2);
    }

    #[test]
    fn sees_across_the_seam() {
        let mut c = ctx();
        c.torus = Torus::new(1_000.0, 1_000.0, true);
        let me = prey(0, (995.0, 500.0), (60.0, 0.0));
        let other = [prey(1, (5.0, 500.0), (60.0, 0.0))];
        let seen = perceive(&me, &other, None, FOV, &c);
        assert_eq!(seen.len(), 1);
        assert!((seen[0].offset - DVec2::new(10.0, 0.0)).length() < EPS);
    }
}

// ── Prey ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod prey_tests {
    use crate::{PreyConfig, WeightedPreyBehavior};

    use super::*;

    fn only(f: impl FnOnce(&mut PreyConfig)) -> WeightedPreyBehavior {
        let mut cfg = PreyConfig {
            separation_coef: 0.0,
            cohesion_coef:   0.0,
            alignment_coef:  0.0,
            wiggle_coef:     0.0,
            dodge_coef:      0.0,
            repel_coef:      0.0,
            ..PreyConfig::default()
        };
        f(&mut cfg);
        WeightedPreyBehavior::new(cfg).unwrap()
    }

    #[test]
    fn out_of_range_coefficient_rejected() {
        let cfg = PreyConfig { cohesion_coef: 1.5, ..PreyConfig::default() };
        assert!(WeightedPreyBehavior::new(cfg).is_err());
        let cfg = PreyConfig { fov_deg: 200.0, ..PreyConfig::default() };
        assert!(cfg.validate().is_err());
        PreyConfig::default().validate().unwrap();
    }

    #[test]
    fn lone_prey_without_threats() {
        let b = WeightedPreyBehavior::new(PreyConfig::default()).unwrap();
        let flock = vec![prey(0, (0.0, 0.0), (60.0, 0.0))];
        let s = b.steer(0, &flock, &[], &ctx());
        // alignment = -v (0.5), wiggle = v (0.2)
        assert!((s.desired - DVec2::new(-18.0, 0.0)).length() < EPS, "got {}", s.desired);
        assert!(!s.predation);
        assert_eq!(s.wiggle_phase, 0.0);
    }

    #[test]
    fn separation_pushes_away() {
        let b = only(|c| c.separation_coef = 1.0);
        let flock = vec![prey(0, (0.0, 0.0), (60.0, 0.0)), prey(1, (10.0, 0.0), (60.0, 0.0))];
        let s = b.steer(0, &flock, &[], &ctx());
        assert!((s.desired - DVec2::new(-10.0, 0.0)).length() < EPS);
    }

    #[test]
    fn cohesion_is_mean_unit_direction() {
        let b = only(|c| c.cohesion_coef = 1.0);
        let flock = vec![
            prey(0, (0.0, 0.0), (60.0, 0.0)),
            prey(1, (50.0, 0.0), (60.0, 0.0)),
            prey(2, (0.0, 80.0), (60.0, 0.0)),
        ];
        let s = b.steer(0, &flock, &[], &ctx());
        assert!((s.desired - DVec2::new(0.5, 0.5)).length() < EPS);
    }

    #[test]
    fn alignment_matches_neighbour_velocity() {
        let b = only(|c| c.alignment_coef = 1.0);
        let flock = vec![prey(0, (0.0, 0.0), (60.0, 0.0)), prey(1, (30.0, 0.0), (0.0, 60.0))];
        let s = b.steer(0, &flock, &[], &ctx());
        assert!((s.desired - DVec2::new(-60.0, 60.0)).length() < EPS);
    }

    #[test]
    fn predator_in_view_raises_predation_and_advances_wiggle() {
        let b = WeightedPreyBehavior::new(PreyConfig::default()).unwrap();
        let flock = vec![prey(0, (0.0, 0.0), (60.0, 0.0))];
        let hunters = vec![predator(0, (80.0, 0.0), (-80.0, 0.0))];
        let s = b.steer(0, &flock, &hunters, &ctx());
        assert!(s.predation);
        assert!((s.wiggle_phase - 14.0 * 0.02).abs() < EPS);
    }

    #[test]
    fn wiggle_phase_resets_when_threat_leaves() {
        let b = WeightedPreyBehavior::new(PreyConfig::default()).unwrap();
        let mut flock = vec![prey(0, (0.0, 0.0), (60.0, 0.0))];
        flock[0].set_wiggle_phase(3.0);
        let s = b.steer(0, &flock, &[], &ctx());
        assert_eq!(s.wiggle_phase, 0.0);
    }

    #[test]
    fn dodge_is_broadside_and_flips_with_predator_heading() {
        let b = only(|c| c.dodge_coef = 0.4);
        let flock = vec![prey(0, (0.0, 0.0), (60.0, 0.0))];

        let up = vec![predator(0, (50.0, 0.0), (0.0, 80.0))];
        let down = vec![predator(0, (50.0, 0.0), (0.0, -80.0))];
        let a = b.steer(0, &flock, &up, &ctx()).desired;
        let z = b.steer(0, &flock, &down, &ctx()).desired;

        assert!(a.x.abs() < EPS && z.x.abs() < EPS);
        assert!((a.y.abs() - 24.0).abs() < EPS);
        assert!((a.y + z.y).abs() < EPS);
    }

    #[test]
    fn repel_only_from_predators_in_view() {
        let b = only(|c| c.repel_coef = 0.8);
        let flock = vec![prey(0, (500.0, 500.0), (60.0, 0.0))];

        let behind = vec![predator(0, (470.0, 500.0), (80.0, 0.0))];
        let s = b.steer(0, &flock, &behind, &ctx());
        assert!(!s.predation);
        assert_eq!(s.desired, DVec2::ZERO);

        let ahead = vec![predator(0, (530.0, 500.0), (-80.0, 0.0))];
        let s = b.steer(0, &flock, &ahead, &ctx());
        assert!(s.predation);
        assert!((s.desired - DVec2::new(-24.0, 0.0)).length() < EPS);

        // In view but beyond the repel distance.
        let far = vec![predator(0, (580.0, 500.0), (-80.0, 0.0))];
        assert_eq!(b.steer(0, &flock, &far, &ctx()).desired, DVec2::ZERO);
    }

    #[test]
    fn update_applies_with_threat_magnitude() {
        let b = WeightedPreyBehavior::new(PreyConfig::default()).unwrap();
        let mut flock = vec![prey(0, (0.0, 0.0), (60.0, 0.0)), prey(1, (500.0, 500.0), (60.0, 0.0))];
        let hunters = vec![predator(0, (80.0, 0.0), (-80.0, 0.0))];
        b.update(&mut flock, &hunters, &ctx());

        assert!(flock[0].predation());
        let acc = flock[0].pending_acceleration().length();
        assert!((acc - BoidParams::prey().max_acceleration).abs() < 1e-6);

        assert!(!flock[1].predation());
        let acc = flock[1].pending_acceleration().length();
        assert!((acc - BoidParams::prey().base_acceleration).abs() < 1e-6);
    }
}

// ── Hunting ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod hunt_tests {
    use crate::{
        HuntBehavior, HuntCentroid, HuntConfig, HuntNearest, HuntPeripheral, HuntRandom,
        CentroidSelector, NearestSelector, PeripheralSelector, RandomSelector,
    };

    use super::*;

    fn hunter() -> Vec<Predator> {
        vec![predator(0, (5.0, -40.0), (0.0, 80.0))]
    }

    #[test]
    fn peripheral_picks_farthest_from_centroid() {
        // Centroid (5, 3.33): (5, 10) is 44.4 away squared, the others 36.1.
        let b: HuntPeripheral = HuntBehavior::new(HuntConfig::default(), PeripheralSelector).unwrap();
        let mut preds = hunter();
        b.update(&mut preds, &triangle(), &ctx());
        assert_eq!(preds[0].selected_prey(), Some(AgentId::prey(2)));
        assert_eq!(preds[0].state(), HuntingState::Attack);
        assert!(preds[0].boid().predation());
    }

    #[test]
    fn nearest_picks_closest() {
        let b: HuntNearest = HuntBehavior::new(HuntConfig::default(), NearestSelector).unwrap();
        let mut preds = hunter();
        let flock = vec![
            prey(0, (0.0, 0.0), (60.0, 0.0)),
            prey(1, (5.0, -10.0), (60.0, 0.0)),
            prey(2, (5.0, 10.0), (60.0, 0.0)),
        ];
        b.update(&mut preds, &flock, &ctx());
        assert_eq!(preds[0].selected_prey(), Some(AgentId::prey(1)));
    }

    #[test]
    fn centroid_picks_closest_to_centre_and_records_target() {
        let b: HuntCentroid = HuntBehavior::new(HuntConfig::default(), CentroidSelector).unwrap();
        let mut preds = hunter();
        let flock = vec![
            prey(0, (0.0, 0.0), (60.0, 0.0)),
            prey(1, (10.0, 0.0), (60.0, 0.0)),
            prey(2, (5.0, 4.0), (60.0, 0.0)),
            prey(3, (5.0, 10.0), (60.0, 0.0)),
        ];
        b.update(&mut preds, &flock, &ctx());
        assert_eq!(preds[0].selected_prey(), Some(AgentId::prey(2)));
        let target = preds[0].target().unwrap();
        assert!((target - DVec2::new(5.0, 3.5)).length() < EPS);
    }

    #[test]
    fn random_pick_is_seeded() {
        let b: HuntRandom = HuntBehavior::new(HuntConfig::default(), RandomSelector).unwrap();
        let mut a = hunter();
        let mut z = hunter();
        b.update(&mut a, &triangle(), &ctx());
        b.update(&mut z, &triangle(), &ctx());
        let picked = a[0].selected_prey().unwrap();
        assert_eq!(Some(picked), z[0].selected_prey());
        assert!(triangle().iter().any(|p| p.id() == picked));
    }

    #[test]
    fn first_lunge_uses_base_magnitude() {
        let b = HuntBehavior::new(HuntConfig::default(), NearestSelector).unwrap();
        let mut preds = hunter();
        b.update(&mut preds, &triangle(), &ctx());
        let acc = preds[0].boid().pending_acceleration().length();
        assert!((acc - BoidParams::predator().base_acceleration).abs() < 1e-6);
    }

    #[test]
    fn scout_without_prey_changes_nothing() {
        let b = HuntBehavior::new(HuntConfig::default(), NearestSelector).unwrap();
        let mut preds = hunter();
        // Behind the predator: outside its field of view.
        let flock = vec![prey(0, (5.0, -100.0), (60.0, 0.0))];
        b.update(&mut preds, &flock, &ctx());
        assert_eq!(preds[0].state(), HuntingState::Scout);
        assert_eq!(preds[0].selected_prey(), None);
        assert_eq!(preds[0].boid().pending_acceleration(), DVec2::ZERO);
        assert!(!preds[0].boid().predation());
    }

    #[test]
    fn confusion_counts_perceived_prey_in_radius() {
        let b = HuntBehavior::new(HuntConfig::default(), NearestSelector).unwrap();
        let mut preds = hunter();
        let flock = vec![
            prey(0, (5.0, -10.0), (60.0, 0.0)),
            prey(1, (10.0, -20.0), (60.0, 0.0)),
            prey(2, (5.0, 60.0), (60.0, 0.0)),
        ];
        b.update(&mut preds, &flock, &ctx());
        assert_eq!(preds[0].prey_in_confusion(), 2);
    }

    #[test]
    fn attack_reaims_at_selected_prey() {
        let b = HuntBehavior::new(HuntConfig::default(), NearestSelector).unwrap();
        let mut preds = hunter();
        preds[0].begin_attack(AgentId::prey(1));
        preds[0].boid_mut().set_predation(true);
        b.update(&mut preds, &triangle(), &ctx());

        assert_eq!(preds[0].state(), HuntingState::Attack);
        let acc = preds[0].boid().pending_acceleration();
        let aim = DVec2::new(5.0, 40.0).normalize();
        assert!((acc.normalize() - aim).length() < 1e-9);
        assert!((acc.length() - BoidParams::predator().max_acceleration).abs() < 1e-6);
    }

    #[test]
    fn stale_handle_falls_back_to_scout() {
        let b = HuntBehavior::new(HuntConfig::default(), NearestSelector).unwrap();
        let mut preds = hunter();
        preds[0].begin_attack(AgentId::prey(99));
        b.update(&mut preds, &triangle(), &ctx());
        assert_eq!(preds[0].state(), HuntingState::Scout);
        assert_eq!(preds[0].selected_prey(), None);
    }

    #[test]
    fn rest_lapses_after_duration() {
        let b = HuntBehavior::new(HuntConfig::default(), NearestSelector).unwrap();
        let mut preds = vec![predator(0, (5.0, -40.0), (0.0, 80.0)).with_rest_duration(0.05)];
        preds[0].enter_rest();
        let c = ctx();
        b.update(&mut preds, &triangle(), &c);
        b.update(&mut preds, &triangle(), &c);
        assert_eq!(preds[0].state(), HuntingState::Rest);
        b.update(&mut preds, &triangle(), &c);
        assert_eq!(preds[0].state(), HuntingState::Scout);
        // Resting steps do not steer.
        assert_eq!(preds[0].boid().pending_acceleration(), DVec2::ZERO);
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = HuntConfig { perception_radius: 0.0, ..HuntConfig::default() };
        assert!(HuntBehavior::new(cfg, NearestSelector).is_err());
    }
}

// ── Strategy selection ────────────────────────────────────────────────────────

#[cfg(test)]
mod strategy_tests {
    use crate::{BehaviorError, HuntConfig, NoopBehavior, PredatorStrategy};

    use super::*;

    #[test]
    fn parses_names() {
        for s in PredatorStrategy::ALL {
            assert_eq!(s.as_str().parse::<PredatorStrategy>().unwrap(), s);
        }
        assert_eq!("  Peripheral ".parse::<PredatorStrategy>().unwrap(), PredatorStrategy::Peripheral);
    }

    #[test]
    fn unknown_name_rejected() {
        let err = "zigzag".parse::<PredatorStrategy>().unwrap_err();
        assert!(matches!(err, BehaviorError::UnknownStrategy(ref s) if s == "zigzag"));
    }

    #[test]
    fn build_names_behaviors() {
        let names: Vec<&str> = PredatorStrategy::ALL
            .into_iter()
            .map(|s| s.build(HuntConfig::default()).unwrap().name())
            .collect();
        assert_eq!(names, vec!["HuntNearest", "HuntCentroid", "HuntRandom", "HuntMostPeripheral"]);
    }

    #[test]
    fn boxed_behavior_steers() {
        let b = PredatorStrategy::Peripheral.build(HuntConfig::default()).unwrap();
        let mut preds = vec![predator(0, (5.0, -40.0), (0.0, 80.0))];
        b.update(&mut preds, &triangle(), &ctx());
        assert_eq!(preds[0].selected_prey(), Some(AgentId::prey(2)));
    }

    #[test]
    fn noop_leaves_agents_alone() {
        let b = NoopBehavior::<Boid, Predator>::new();
        let mut flock = triangle();
        b.update(&mut flock, &[], &ctx());
        assert!(flock.iter().all(|p| p.pending_acceleration() == DVec2::ZERO));
    }
}
