//! The battle loop.
//!
//! `tick` advances one frame in a fixed order and reports the outcome;
//! `draw` hands the resulting visuals to a sink.  The state is mutated in
//! place and owned by the caller.

use tracing::{info, trace};

use crate::behavior::boss::{BossBehavior, BossContext, BossPhase, ATTACK_POSE_SECONDS};
use crate::behavior::player::{PlayerBehavior, PlayerContext, PlayerPhase};
use crate::behavior::StateMachine;
use crate::collision::collides;
use crate::config::{ArenaConfig, Tunables};
use crate::entities::{
    BattleState, Direction, Entity, Health, Outcome, Owner, Sprite, Visual,
};
use crate::geometry::{Rect, Vector2};
use crate::input::{Action, InputSource};
use crate::pool::ProjectilePool;
use crate::render::VisualSink;
use crate::timer::Timer;

/// How long a hurt flash lasts.
pub const PAIN_FLASH_SECONDS: f64 = 0.15;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fresh battle: player a quarter of the way down, boss in the middle,
/// projectile slots pre-allocated.
pub fn init_state(arena: &ArenaConfig, tunables: &Tunables) -> BattleState {
    let player = Entity::new(Visual::new(Sprite::PlayerWalk(0)))
        .with_position(Vector2::new(arena.width / 2.0, arena.height / 4.0))
        .activated();
    let boss = Entity::new(Visual::new(Sprite::BossIdle))
        .with_position(arena.center())
        .activated();
    let hitbox = Entity::new(Visual::new(Sprite::Hitbox)).with_position(player.position);

    BattleState {
        arena: *arena,
        tunables: tunables.clone(),
        player,
        boss,
        player_health: Health::new(tunables.player_max_health),
        boss_health: Health::new(tunables.boss_max_health),
        facing: Direction::Up,
        hitbox,
        projectiles: ProjectilePool::new(tunables.projectile_capacity),
        boss_machine: StateMachine::new(BossPhase::Explosion),
        boss_brain: BossBehavior::default(),
        player_machine: StateMachine::new(PlayerPhase::Move),
        player_brain: PlayerBehavior::default(),
        boss_pose: Timer::expired(ATTACK_POSE_SECONDS),
        player_pain: Timer::expired(PAIN_FLASH_SECONDS),
        boss_pain: Timer::expired(PAIN_FLASH_SECONDS),
        outcome: Outcome::Ongoing,
        frame: 0,
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the battle by `dt` seconds.
///
/// Once the outcome is terminal the state is frozen and the same outcome is
/// returned on every later call.
pub fn tick(state: &mut BattleState, input: &dyn InputSource, dt: f64) -> Outcome {
    if state.outcome.is_terminal() {
        return state.outcome;
    }
    state.frame += 1;
    trace!(frame = state.frame, dt, "battle tick");

    drive_behaviors(state, input, dt);

    // ── 1. Keep the player inside the walls ──────────────────────────────────
    let clamped = state.arena.clamp_to_interior(state.player.position);
    state.player.place_at(clamped);

    // ── 2. Touching the boss hurts ───────────────────────────────────────────
    if collides(&mut state.player, &state.boss) {
        state.player_pain = Timer::new(PAIN_FLASH_SECONDS);
        state.player_health.damage(1);
        state.hitbox.active = false;
    }

    // ── 3. Hitbox follows the player's facing ────────────────────────────────
    let reach = state.player.position + state.facing.hitbox_offset();
    state.hitbox.place_at(reach);

    // ── 4. Sword hit: at most one per swing ──────────────────────────────────
    if state.hitbox.active && collides(&mut state.boss, &state.hitbox) {
        state.boss_pain = Timer::new(PAIN_FLASH_SECONDS);
        state.boss_health.damage(1);
        state.hitbox.active = false;
    }

    // ── 5. Boss pose ─────────────────────────────────────────────────────────
    let pose = if state.boss_pose.tick(dt) {
        Sprite::BossIdle
    } else {
        Sprite::BossAttack
    };
    state.boss.set_visual(pose);

    // ── 6. Boss projectiles ↔ player ─────────────────────────────────────────
    let mut spent = Vec::new();
    for (index, projectile) in state.projectiles.active_mut() {
        if projectile.owner == Owner::Boss && collides(&mut projectile.body, &state.player) {
            spent.push(index);
        }
    }
    for index in spent {
        state.player_health.damage(1);
        state.projectiles.deactivate(index);
    }

    // ── 7. Integrate motion ──────────────────────────────────────────────────
    state.player.integrate(dt);
    state.boss.integrate(dt);
    let bounds = state.arena.bounds();
    state.projectiles.integrate(dt, &bounds);
    state.player_pain.tick(dt);
    state.boss_pain.tick(dt);

    // ── 8. Outcome ───────────────────────────────────────────────────────────
    state.outcome = evaluate_outcome(state, input);
    if state.outcome.is_terminal() {
        info!(
            outcome = ?state.outcome,
            frame = state.frame,
            player_health = state.player_health.current(),
            boss_health = state.boss_health.current(),
            "battle finished"
        );
    }
    state.outcome
}

fn drive_behaviors(state: &mut BattleState, input: &dyn InputSource, dt: f64) {
    let mut player_ctx = PlayerContext {
        player: &mut state.player,
        hitbox: &mut state.hitbox,
        facing: &mut state.facing,
        input,
        speed: state.tunables.player_speed,
    };
    state
        .player_machine
        .drive(&mut state.player_brain, &mut player_ctx, dt);

    let mut boss_ctx = BossContext {
        boss: &mut state.boss,
        projectiles: &mut state.projectiles,
        pose: &mut state.boss_pose,
        rotation_speed: state.tunables.boss_rotation_speed,
    };
    state.boss_machine.drive(&mut state.boss_brain, &mut boss_ctx, dt);
}

fn evaluate_outcome(state: &BattleState, input: &dyn InputSource) -> Outcome {
    if input.was_pressed(Action::Quit) {
        Outcome::QuitRequested
    } else if state.boss_health.is_depleted() {
        Outcome::PlayerWon
    } else if state.player_health.is_depleted() {
        Outcome::PlayerLost
    } else {
        Outcome::Ongoing
    }
}

// ── Draw pass ────────────────────────────────────────────────────────────────

/// Hand every visible entity and the health bars to `sink`.
pub fn draw(state: &BattleState, sink: &mut dyn VisualSink) {
    for (_, projectile) in state.projectiles.active() {
        sink.draw(&projectile.body.visual, &projectile.body.transform());
    }

    if !blinked_out(&state.player_pain) {
        sink.draw(&state.player.visual, &state.player.transform());
    }
    if state.hitbox.active {
        sink.draw(&state.hitbox.visual, &state.hitbox.transform());
    }
    if !blinked_out(&state.boss_pain) {
        sink.draw(&state.boss.visual, &state.boss.transform());
    }

    sink.draw_label("Player: ", Vector2::new(0.0, 30.0));
    let health = &state.player_health;
    sink.draw_bar(Rect::new(70.0, 30.0, 100.0, 20.0), health.fraction(), health.band());

    let boss_box = state.boss.bounding_box();
    let health = &state.boss_health;
    sink.draw_bar(
        Rect::new(boss_box.left, boss_box.top, boss_box.width, 20.0),
        health.fraction(),
        health.band(),
    );
}

/// Hurt flash: while the pain timer runs the entity blinks at 20 Hz.
fn blinked_out(pain: &Timer) -> bool {
    !pain.is_expired() && (pain.elapsed() * 20.0) as u32 % 2 == 1
}
