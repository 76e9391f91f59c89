//! Scenes and the manager that switches between them.
//!
//! The battle loop only reports an `Outcome`; deciding what happens next (show
//! the result, restart, quit) is the scenes' job.

use tracing::debug;

use crate::compute::{self, init_state};
use crate::config::{ArenaConfig, Tunables};
use crate::entities::{BattleState, Outcome};
use crate::geometry::Vector2;
use crate::input::{Action, InputSource};
use crate::render::VisualSink;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneId {
    Battle,
    GameOver,
}

/// What a scene wants after its update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Switch(SceneId),
    Quit,
}

/// Data shared between scenes.
#[derive(Clone, Debug)]
pub struct SceneContext {
    pub arena: ArenaConfig,
    pub tunables: Tunables,
    /// How the last battle ended.
    pub outcome: Outcome,
}

impl SceneContext {
    pub fn new(arena: ArenaConfig, tunables: Tunables) -> Self {
        Self { arena, tunables, outcome: Outcome::Ongoing }
    }
}

pub trait Scene {
    fn initialize(&mut self, ctx: &SceneContext);
    fn update(&mut self, ctx: &mut SceneContext, input: &dyn InputSource, dt: f64) -> Transition;
    fn draw(&self, ctx: &SceneContext, sink: &mut dyn VisualSink);
    fn cleanup(&mut self);
}

// ── Battle ────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct BattleScene {
    state: Option<BattleState>,
}

impl BattleScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<&BattleState> {
        self.state.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut BattleState> {
        self.state.as_mut()
    }
}

impl Scene for BattleScene {
    fn initialize(&mut self, ctx: &SceneContext) {
        self.state = Some(init_state(&ctx.arena, &ctx.tunables));
    }

    fn update(&mut self, ctx: &mut SceneContext, input: &dyn InputSource, dt: f64) -> Transition {
        let Some(state) = self.state.as_mut() else {
            return Transition::Stay;
        };
        match compute::tick(state, input, dt) {
            Outcome::Ongoing => Transition::Stay,
            Outcome::QuitRequested => Transition::Quit,
            outcome => {
                ctx.outcome = outcome;
                Transition::Switch(SceneId::GameOver)
            }
        }
    }

    fn draw(&self, _ctx: &SceneContext, sink: &mut dyn VisualSink) {
        if let Some(state) = &self.state {
            compute::draw(state, sink);
        }
    }

    fn cleanup(&mut self) {
        self.state = None;
    }
}

// ── Game over ─────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct GameOverScene {
    headline: &'static str,
}

impl GameOverScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headline(&self) -> &'static str {
        self.headline
    }
}

impl Scene for GameOverScene {
    fn initialize(&mut self, ctx: &SceneContext) {
        self.headline = match ctx.outcome {
            Outcome::PlayerWon => "YOU WIN",
            _ => "YOU LOSE",
        };
    }

    fn update(&mut self, _ctx: &mut SceneContext, input: &dyn InputSource, _dt: f64) -> Transition {
        if input.was_pressed(Action::Quit) {
            Transition::Quit
        } else if input.was_pressed(Action::Restart) {
            Transition::Switch(SceneId::Battle)
        } else {
            Transition::Stay
        }
    }

    fn draw(&self, ctx: &SceneContext, sink: &mut dyn VisualSink) {
        let center = ctx.arena.center();
        sink.draw_label(self.headline, Vector2::new(center.x - 40.0, center.y - 20.0));
        sink.draw_label("R - Play Again  Q - Quit", Vector2::new(center.x - 120.0, center.y + 20.0));
    }

    fn cleanup(&mut self) {
        self.headline = "";
    }
}

// ── Manager ───────────────────────────────────────────────────────────────────

/// Runs one registered scene at a time.  A switch cleans up the outgoing scene
/// and initializes the incoming one before its first update.
pub struct SceneManager {
    scenes: Vec<(SceneId, Box<dyn Scene>)>,
    current: SceneId,
    previous: Option<SceneId>,
    ctx: SceneContext,
}

impl SceneManager {
    pub fn new(ctx: SceneContext, first: SceneId) -> Self {
        Self { scenes: Vec::new(), current: first, previous: None, ctx }
    }

    /// Manager with the battle and game-over scenes, starting in battle.
    pub fn standard(arena: ArenaConfig, tunables: Tunables) -> Self {
        let mut manager = Self::new(SceneContext::new(arena, tunables), SceneId::Battle);
        manager.register(SceneId::Battle, Box::new(BattleScene::new()));
        manager.register(SceneId::GameOver, Box::new(GameOverScene::new()));
        manager
    }

    pub fn register(&mut self, id: SceneId, scene: Box<dyn Scene>) {
        self.scenes.retain(|(existing, _)| *existing != id);
        self.scenes.push((id, scene));
    }

    #[inline]
    pub fn current(&self) -> SceneId {
        self.current
    }

    pub fn context(&self) -> &SceneContext {
        &self.ctx
    }

    fn position(&self, id: SceneId) -> Option<usize> {
        self.scenes.iter().position(|(sid, _)| *sid == id)
    }

    /// Run one frame.  Returns `false` once a scene asked to quit.
    pub fn update(&mut self, input: &dyn InputSource, dt: f64) -> bool {
        if self.previous != Some(self.current) {
            debug!(from = ?self.previous, to = ?self.current, "switching scene");
            if let Some(old) = self.previous.and_then(|id| self.position(id)) {
                self.scenes[old].1.cleanup();
            }
            if let Some(new) = self.position(self.current) {
                self.scenes[new].1.initialize(&self.ctx);
            }
            self.previous = Some(self.current);
        }

        let Some(index) = self.position(self.current) else {
            return true;
        };
        let transition = self.scenes[index].1.update(&mut self.ctx, input, dt);
        match transition {
            Transition::Stay => true,
            Transition::Switch(next) => {
                self.current = next;
                true
            }
            Transition::Quit => false,
        }
    }

    /// Draw the scene that last ran; a pending switch shows up after the next update.
    pub fn draw(&self, sink: &mut dyn VisualSink) {
        if let Some(index) = self.position(self.previous.unwrap_or(self.current)) {
            self.scenes[index].1.draw(&self.ctx, sink);
        }
    }
}
