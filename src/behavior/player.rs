//! Player cycle: walk around, swing, walk again.

use crate::entities::{Direction, Entity, Sprite};
use crate::input::{Action, InputSource};
use crate::timer::Timer;

use super::Behavior;

pub const WALK_FRAME_SECONDS: f64 = 0.1;
pub const ATTACK_SECONDS: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PlayerPhase {
    Move = 0,
    Attack = 1,
}

impl PlayerPhase {
    pub fn index(&self) -> u8 {
        *self as u8
    }
}

pub struct PlayerContext<'a> {
    pub player: &'a mut Entity,
    pub hitbox: &'a mut Entity,
    pub facing: &'a mut Direction,
    pub input: &'a dyn InputSource,
    pub speed: f64,
}

#[derive(Clone, Debug)]
pub struct PlayerBehavior {
    walk: Timer,
    /// 0 or 1 within the two-frame walk cycle.
    walk_index: u8,
    /// First sheet frame of the current facing.
    offset: u8,
    attack: Timer,
}

impl Default for PlayerBehavior {
    fn default() -> Self {
        Self {
            walk: Timer::new(WALK_FRAME_SECONDS),
            walk_index: 0,
            offset: 0,
            attack: Timer::new(ATTACK_SECONDS),
        }
    }
}

impl PlayerBehavior {
    pub fn walk_index(&self) -> u8 {
        self.walk_index
    }

    pub fn attack_timer(&self) -> &Timer {
        &self.attack
    }

    fn face(&mut self, ctx: &mut PlayerContext<'_>, direction: Direction) {
        *ctx.facing = direction;
        self.offset = direction.sheet_offset();
    }

    fn walk(&mut self, ctx: &mut PlayerContext<'_>, dt: f64) -> Option<PlayerPhase> {
        let input = ctx.input;
        let step = ctx.speed * dt;

        // Up beats down and left beats right; the horizontal facing wins over
        // the vertical one when both axes are held.
        if input.is_held(Action::Up) {
            ctx.player.translate(0.0, -step);
            self.face(ctx, Direction::Up);
        } else if input.is_held(Action::Down) {
            ctx.player.translate(0.0, step);
            self.face(ctx, Direction::Down);
        }

        if input.is_held(Action::Left) {
            ctx.player.translate(-step, 0.0);
            self.face(ctx, Direction::Left);
        } else if input.is_held(Action::Right) {
            ctx.player.translate(step, 0.0);
            self.face(ctx, Direction::Right);
        }

        let moving = [Action::Up, Action::Down, Action::Left, Action::Right]
            .iter()
            .any(|&a| input.is_held(a));

        if moving {
            if self.walk.tick(dt) {
                self.walk_index = (self.walk_index + 1) % 2;
                self.walk = Timer::new(WALK_FRAME_SECONDS);
            }
        } else {
            self.walk = Timer::new(WALK_FRAME_SECONDS);
        }

        ctx.player.set_visual(Sprite::PlayerWalk(self.walk_index + self.offset));

        if input.was_pressed(Action::Attack) {
            Some(PlayerPhase::Attack)
        } else {
            None
        }
    }

    fn swing(&mut self, ctx: &mut PlayerContext<'_>, dt: f64) -> Option<PlayerPhase> {
        let mut next = None;
        if self.attack.tick(dt) {
            ctx.hitbox.active = false;
            next = Some(PlayerPhase::Move);
        }

        let elapsed = self.attack.elapsed();
        let duration = self.attack.duration();
        let pose = if elapsed > duration * 2.0 / 3.0 {
            Some(3)
        } else if elapsed > duration / 3.0 {
            Some(2)
        } else if elapsed > 0.0 {
            Some(1)
        } else {
            None
        };
        if let Some(pose) = pose {
            ctx.player.set_visual(Sprite::PlayerAttack(pose));
        }

        next
    }
}

impl<'a> Behavior<PlayerContext<'a>> for PlayerBehavior {
    type State = PlayerPhase;

    fn enter(&mut self, state: PlayerPhase, _previous: Option<PlayerPhase>, ctx: &mut PlayerContext<'a>, _dt: f64) {
        match state {
            PlayerPhase::Move => {
                self.walk = Timer::new(WALK_FRAME_SECONDS);
                self.walk_index = 0;
                self.offset = 0;
            }
            PlayerPhase::Attack => {
                self.attack = Timer::new(ATTACK_SECONDS);
                ctx.hitbox.active = true;
            }
        }
    }

    fn update(&mut self, state: PlayerPhase, ctx: &mut PlayerContext<'a>, dt: f64) -> Option<PlayerPhase> {
        match state {
            PlayerPhase::Move => self.walk(ctx, dt),
            PlayerPhase::Attack => self.swing(ctx, dt),
        }
    }
}
