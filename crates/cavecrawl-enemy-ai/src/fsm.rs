//! Enemy behavior finite state machine.
//!
//! Pure functions that compute state transitions and velocity changes for a
//! single enemy. No ECS dependency and no randomness: random rolls (jump
//! rise, party bounce) are taken by the caller and passed in the context.

use cavecrawl_core::enums::EnemyState;
use cavecrawl_core::rules::EnemyRules;
use cavecrawl_core::types::{Position, TileCoord, Velocity};

/// Input to the FSM for a single enemy.
pub struct EnemyContext<'a> {
    pub state: EnemyState,
    pub position: Position,
    pub velocity: Velocity,
    /// The physics collaborator reported ground contact this tick.
    pub grounded: bool,
    pub attack_cooldown: f64,
    /// Tile supplied by the accepted `grab`, if any.
    pub grab_target: Option<TileCoord>,
    pub dt: f64,
    /// Pre-rolled vertical rise for a jump issued this tick.
    pub jump_rise: f64,
    /// Pre-rolled bounce impulse for a party hop issued this tick.
    pub party_bounce: f64,
    pub rules: &'a EnemyRules,
}

/// Output from the FSM.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyUpdate {
    pub state: EnemyState,
    pub velocity: Velocity,
    pub attack_cooldown: f64,
    /// Tile latched by a `Grabbing` pulse, to be reported to the terrain.
    pub grabbed_tile: Option<TileCoord>,
    /// A spark effect should be emitted at the enemy.
    pub sparks: bool,
    pub state_changed: bool,
}

/// Evaluate the FSM for one enemy.
pub fn evaluate(ctx: &EnemyContext) -> EnemyUpdate {
    match ctx.state {
        EnemyState::Falling => evaluate_falling(ctx),
        EnemyState::Landed => evaluate_landed(ctx),
        EnemyState::Running => evaluate_running(ctx),
        EnemyState::Jumping => evaluate_jumping(ctx),
        EnemyState::Attacking => unchanged(ctx),
        EnemyState::Grabbing => evaluate_grabbing(ctx),
        EnemyState::Partying => evaluate_partying(ctx),
    }
}

fn unchanged(ctx: &EnemyContext) -> EnemyUpdate {
    EnemyUpdate {
        state: ctx.state,
        velocity: ctx.velocity,
        attack_cooldown: ctx.attack_cooldown,
        grabbed_tile: None,
        sparks: false,
        state_changed: false,
    }
}

fn transition(ctx: &EnemyContext, state: EnemyState, velocity: Velocity) -> EnemyUpdate {
    EnemyUpdate {
        state,
        velocity,
        attack_cooldown: ctx.attack_cooldown,
        grabbed_tile: None,
        sparks: false,
        state_changed: state != ctx.state,
    }
}

fn evaluate_falling(ctx: &EnemyContext) -> EnemyUpdate {
    let velocity = Velocity::new(ctx.rules.fall_drift, ctx.velocity.y);
    if ctx.grounded {
        transition(ctx, EnemyState::Landed, velocity)
    } else {
        transition(ctx, EnemyState::Falling, velocity)
    }
}

fn evaluate_landed(ctx: &EnemyContext) -> EnemyUpdate {
    let velocity = Velocity::new(ctx.rules.run_speed, ctx.velocity.y);
    transition(ctx, EnemyState::Running, velocity)
}

fn evaluate_running(ctx: &EnemyContext) -> EnemyUpdate {
    let remaining = ctx.attack_cooldown - ctx.dt;
    if remaining > 0.0 {
        return EnemyUpdate {
            attack_cooldown: remaining,
            ..unchanged(ctx)
        };
    }
    EnemyUpdate {
        attack_cooldown: ctx.rules.attack_cooldown,
        ..transition(ctx, EnemyState::Jumping, ctx.velocity)
    }
}

fn evaluate_jumping(ctx: &EnemyContext) -> EnemyUpdate {
    let apex = ctx.position.offset(ctx.rules.jump_reach, -ctx.jump_rise);
    let velocity = Velocity::toward(&ctx.position, &apex, ctx.rules.jump_speed);
    transition(ctx, EnemyState::Attacking, velocity)
}

fn evaluate_grabbing(ctx: &EnemyContext) -> EnemyUpdate {
    EnemyUpdate {
        grabbed_tile: ctx.grab_target,
        sparks: true,
        ..transition(ctx, EnemyState::Falling, Velocity::zero())
    }
}

fn evaluate_partying(ctx: &EnemyContext) -> EnemyUpdate {
    let vx = ctx.velocity.x / ctx.rules.party_decay;
    let vy = if ctx.grounded {
        -ctx.party_bounce
    } else {
        ctx.velocity.y
    };
    EnemyUpdate {
        velocity: Velocity::new(vx, vy),
        ..unchanged(ctx)
    }
}
