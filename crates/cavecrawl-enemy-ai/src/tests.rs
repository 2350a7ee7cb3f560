#[cfg(test)]
mod tests {
    use cavecrawl_core::components::Hitpoints;
    use cavecrawl_core::enums::EnemyState;
    use cavecrawl_core::rules::EnemyRules;
    use cavecrawl_core::types::{Position, TileCoord, Velocity};

    use crate::actions;
    use crate::fsm::{evaluate, EnemyContext};

    const DT: f64 = 1.0 / 60.0;

    fn make_context(rules: &EnemyRules, state: EnemyState) -> EnemyContext<'_> {
        EnemyContext {
            state,
            position: Position::new(100.0, 200.0),
            velocity: Velocity::new(0.0, 30.0),
            grounded: false,
            attack_cooldown: rules.attack_cooldown,
            grab_target: None,
            dt: DT,
            jump_rise: 100.0,
            party_bounce: 40.0,
            rules,
        }
    }

    // ---- Falling / Landed ----

    #[test]
    fn test_falling_drifts_until_grounded() {
        let rules = EnemyRules::default();
        let ctx = make_context(&rules, EnemyState::Falling);
        let update = evaluate(&ctx);
        assert_eq!(update.state, EnemyState::Falling);
        assert!(!update.state_changed);
        assert_eq!(update.velocity.x, rules.fall_drift);
        assert_eq!(update.velocity.y, 30.0, "vertical motion belongs to physics");
    }

    #[test]
    fn test_falling_to_landed_when_grounded() {
        let rules = EnemyRules::default();
        let ctx = EnemyContext {
            grounded: true,
            ..make_context(&rules, EnemyState::Falling)
        };
        let update = evaluate(&ctx);
        assert!(update.state_changed);
        assert_eq!(update.state, EnemyState::Landed);
    }

    #[test]
    fn test_landed_starts_running_forward() {
        let rules = EnemyRules::default();
        let update = evaluate(&make_context(&rules, EnemyState::Landed));
        assert_eq!(update.state, EnemyState::Running);
        assert!(update.velocity.x > 0.0, "runs toward the crawler");
        assert_eq!(update.velocity.x, rules.run_speed);
    }

    // ---- Running / Jumping ----

    #[test]
    fn test_running_counts_down_cooldown() {
        let rules = EnemyRules::default();
        let ctx = EnemyContext {
            attack_cooldown: 0.5,
            ..make_context(&rules, EnemyState::Running)
        };
        let update = evaluate(&ctx);
        assert_eq!(update.state, EnemyState::Running);
        assert!((update.attack_cooldown - (0.5 - DT)).abs() < 1e-12);
    }

    #[test]
    fn test_running_jumps_when_cooldown_expires() {
        let rules = EnemyRules::default();
        let ctx = EnemyContext {
            attack_cooldown: DT / 2.0,
            ..make_context(&rules, EnemyState::Running)
        };
        let update = evaluate(&ctx);
        assert_eq!(update.state, EnemyState::Jumping);
        assert_eq!(
            update.attack_cooldown, rules.attack_cooldown,
            "cooldown resets to max on attack"
        );
    }

    #[test]
    fn test_running_reaches_jump_after_one_second() {
        let rules = EnemyRules::default();
        let mut state = EnemyState::Running;
        let mut cooldown = rules.attack_cooldown;
        let mut ticks = 0;
        while state == EnemyState::Running {
            let ctx = EnemyContext {
                attack_cooldown: cooldown,
                ..make_context(&rules, state)
            };
            let update = evaluate(&ctx);
            state = update.state;
            cooldown = update.attack_cooldown;
            ticks += 1;
            assert!(ticks <= 61, "should jump within about one second");
        }
        assert!(ticks >= 59);
    }

    #[test]
    fn test_jumping_arcs_forward_and_up() {
        let rules = EnemyRules::default();
        let update = evaluate(&make_context(&rules, EnemyState::Jumping));
        assert_eq!(update.state, EnemyState::Attacking);
        assert!(update.velocity.x > 0.0, "jump goes forward");
        assert!(update.velocity.y < 0.0, "jump goes up (y grows downward)");
        assert!((update.velocity.speed() - rules.jump_speed).abs() < 1e-9);
        // Reach 100 and rise 100 gives a 45 degree launch.
        assert!((update.velocity.x + update.velocity.y).abs() < 1e-9);
    }

    // ---- Attacking / Grabbing ----

    #[test]
    fn test_attacking_is_passive() {
        let rules = EnemyRules::default();
        let ctx = EnemyContext {
            velocity: Velocity::new(200.0, -100.0),
            grounded: true,
            ..make_context(&rules, EnemyState::Attacking)
        };
        let update = evaluate(&ctx);
        assert_eq!(update.state, EnemyState::Attacking);
        assert!(!update.state_changed);
        assert_eq!(update.velocity, Velocity::new(200.0, -100.0));
    }

    #[test]
    fn test_grabbing_is_a_one_tick_pulse() {
        let rules = EnemyRules::default();
        let tile = TileCoord::new(5, 5);
        let ctx = EnemyContext {
            velocity: Velocity::new(200.0, -100.0),
            grab_target: Some(tile),
            ..make_context(&rules, EnemyState::Grabbing)
        };
        let update = evaluate(&ctx);
        assert_eq!(update.state, EnemyState::Falling);
        assert_eq!(update.velocity, Velocity::zero(), "grab stops all motion");
        assert_eq!(update.grabbed_tile, Some(tile));
        assert!(update.sparks);
    }

    // ---- Partying ----

    #[test]
    fn test_partying_decays_and_bounces() {
        let rules = EnemyRules::default();
        let airborne = EnemyContext {
            velocity: Velocity::new(12.0, 5.0),
            ..make_context(&rules, EnemyState::Partying)
        };
        let update = evaluate(&airborne);
        assert_eq!(update.state, EnemyState::Partying);
        assert!((update.velocity.x - 10.0).abs() < 1e-12);
        assert_eq!(update.velocity.y, 5.0);

        let grounded = EnemyContext {
            grounded: true,
            ..airborne
        };
        let update = evaluate(&grounded);
        assert_eq!(update.velocity.y, -40.0, "hops upward when grounded");
        assert_eq!(update.state, EnemyState::Partying);
    }

    // ---- Actions ----

    #[test]
    fn test_grab_only_while_attacking() {
        let tile = TileCoord::new(1, 2);
        let mut brain = actions::new_brain(1.0);
        assert!(!actions::grab(&mut brain, tile), "falling enemies cannot grab");
        assert_eq!(brain.state, EnemyState::Falling);
        assert!(brain.grab_target.is_none());

        brain.state = EnemyState::Attacking;
        assert!(actions::is_attacking(&brain));
        assert!(actions::grab(&mut brain, tile));
        assert_eq!(brain.state, EnemyState::Grabbing);
        assert_eq!(brain.grab_target, Some(tile));

        // A second wall contact in the same tick is rejected.
        assert!(!actions::grab(&mut brain, TileCoord::new(9, 9)));
        assert_eq!(brain.grab_target, Some(tile));
    }

    #[test]
    fn test_grabbed_tile_accessors() {
        let mut brain = actions::new_brain(1.0);
        assert_eq!(actions::grabbed_tile(&brain), None);
        brain.grabbed_tile = Some(TileCoord::new(3, 3));
        assert_eq!(actions::grabbed_tile(&brain), Some(TileCoord::new(3, 3)));
        actions::clear_grabbed_tile(&mut brain);
        assert_eq!(actions::grabbed_tile(&brain), None);
    }

    #[test]
    fn test_get_hit_reduces_hitpoints() {
        let mut hp = Hitpoints(4);
        assert_eq!(actions::get_hit(&mut hp, 1), 3);
        assert!(!actions::is_dead(&hp));
        assert_eq!(actions::get_hit(&mut hp, 5), -2);
        assert!(actions::is_dead(&hp));
    }

    #[test]
    fn test_start_partying_overrides_any_state() {
        let mut brain = actions::new_brain(1.0);
        brain.state = EnemyState::Grabbing;
        brain.grab_target = Some(TileCoord::new(0, 0));
        actions::start_partying(&mut brain);
        assert_eq!(brain.state, EnemyState::Partying);
        assert!(brain.grab_target.is_none());
        assert!(!actions::grab(&mut brain, TileCoord::new(0, 0)));
    }
}
