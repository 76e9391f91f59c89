use boss_battle::behavior::boss::*;
use boss_battle::behavior::player::*;
use boss_battle::behavior::*;
use boss_battle::entities::*;
use boss_battle::geometry::*;
use boss_battle::input::*;
use boss_battle::pool::ProjectilePool;
use boss_battle::timer::Timer;

struct BossRig {
    boss: Entity,
    projectiles: ProjectilePool,
    pose: Timer,
    brain: BossBehavior,
    machine: StateMachine<BossPhase>,
}

impl BossRig {
    fn new(machine: StateMachine<BossPhase>) -> Self {
        Self {
            boss: Entity::new(Visual::new(Sprite::BossIdle))
                .with_position(Vector2::new(400.0, 304.0))
                .activated(),
            projectiles: ProjectilePool::new(100),
            pose: Timer::expired(ATTACK_POSE_SECONDS),
            brain: BossBehavior::default(),
            machine,
        }
    }

    fn drive(&mut self, dt: f64) {
        let mut ctx = BossContext {
            boss: &mut self.boss,
            projectiles: &mut self.projectiles,
            pose: &mut self.pose,
            rotation_speed: 180.0,
        };
        self.machine.drive(&mut self.brain, &mut ctx, dt);
    }
}

struct PlayerRig {
    player: Entity,
    hitbox: Entity,
    facing: Direction,
    brain: PlayerBehavior,
    machine: StateMachine<PlayerPhase>,
}

impl PlayerRig {
    fn new() -> Self {
        Self {
            player: Entity::new(Visual::new(Sprite::PlayerWalk(0)))
                .with_position(Vector2::new(400.0, 152.0))
                .activated(),
            hitbox: Entity::new(Visual::new(Sprite::Hitbox)),
            facing: Direction::Up,
            brain: PlayerBehavior::default(),
            machine: StateMachine::new(PlayerPhase::Move),
        }
    }

    fn drive(&mut self, input: &FrameInput, dt: f64) {
        let mut ctx = PlayerContext {
            player: &mut self.player,
            hitbox: &mut self.hitbox,
            facing: &mut self.facing,
            input,
            speed: 200.0,
        };
        self.machine.drive(&mut self.brain, &mut ctx, dt);
    }
}

// ── StateMachine ─────────────────────────────────────────────────────────────

/// Counts hook calls so enter/update ordering can be checked.
#[derive(Default)]
struct Counter {
    enters: Vec<(u8, Option<u8>)>,
    updates: u32,
    next: Option<u8>,
}

impl Behavior<()> for Counter {
    type State = u8;

    fn enter(&mut self, state: u8, previous: Option<u8>, _ctx: &mut (), _dt: f64) {
        self.enters.push((state, previous));
    }

    fn update(&mut self, _state: u8, _ctx: &mut (), _dt: f64) -> Option<u8> {
        self.updates += 1;
        self.next.take()
    }
}

#[test]
fn enter_runs_once_per_state_change() {
    let mut machine = StateMachine::new(0u8);
    let mut counter = Counter::default();
    assert_eq!(machine.previous(), None);

    machine.drive(&mut counter, &mut (), 0.1);
    machine.drive(&mut counter, &mut (), 0.1);
    assert_eq!(counter.enters, vec![(0, None)]);
    assert_eq!(counter.updates, 2);

    counter.next = Some(1);
    machine.drive(&mut counter, &mut (), 0.1);
    assert_eq!(machine.current(), 1);
    assert_eq!(machine.previous(), Some(0));
    assert_eq!(counter.enters.len(), 1); // enter deferred to next drive

    machine.drive(&mut counter, &mut (), 0.1);
    assert_eq!(counter.enters, vec![(0, None), (1, Some(0))]);
    assert_eq!(machine.previous(), Some(0));
}

// ── Boss ─────────────────────────────────────────────────────────────────────

#[test]
fn explosion_fires_ring_and_waits() {
    let mut rig = BossRig::new(StateMachine::new(BossPhase::Explosion));
    rig.drive(1.0 / 60.0);

    assert_eq!(rig.projectiles.active_count(), EXPLOSION_COUNT as usize);
    assert_eq!(rig.machine.current(), BossPhase::Wait);
    assert!(!rig.pose.is_expired());

    for (i, projectile) in rig.projectiles.active() {
        let mut expected = Entity::new(Visual::new(Sprite::Projectile));
        expected.set_velocity(24.0 * i as f64, EXPLOSION_SPEED);
        assert!((projectile.body.velocity.x - expected.velocity.x).abs() < 1e-4);
        assert!((projectile.body.velocity.y - expected.velocity.y).abs() < 1e-4);
        assert_eq!(projectile.body.position, Vector2::new(400.0, 304.0));
        assert_eq!(projectile.owner, Owner::Boss);
    }
}

#[test]
fn explosion_into_full_pool_drops_extra_shots() {
    let mut rig = BossRig::new(StateMachine::new(BossPhase::Explosion));
    for _ in 0..95 {
        rig.projectiles.fire(Owner::Boss, 0.0, 0.0, Vector2::ZERO);
    }
    rig.drive(0.016);
    assert_eq!(rig.projectiles.active_count(), 100);
    assert_eq!(rig.machine.current(), BossPhase::Wait);
}

#[test]
fn wait_after_laser_goes_to_explosion() {
    let mut rig = BossRig::new(StateMachine::transitioning(BossPhase::Laser, BossPhase::Wait));
    for _ in 0..5 {
        rig.drive(0.5);
        assert_eq!(rig.machine.current(), BossPhase::Wait);
    }
    rig.drive(0.5); // 3.0 s
    assert_eq!(rig.machine.current(), BossPhase::Explosion);
    assert_eq!(rig.brain.waited_after(), BossPhase::Laser);
}

#[test]
fn wait_after_explosion_goes_to_laser() {
    let mut rig = BossRig::new(StateMachine::new(BossPhase::Explosion));
    rig.drive(0.5);
    assert_eq!(rig.machine.current(), BossPhase::Wait);
    for _ in 0..5 {
        rig.drive(0.5);
    }
    assert_eq!(rig.machine.current(), BossPhase::Wait);
    rig.drive(0.5);
    assert_eq!(rig.brain.waited_after(), BossPhase::Explosion);
    assert_eq!(rig.machine.current(), BossPhase::Laser);
}

#[test]
fn laser_sweeps_then_waits() {
    let mut rig = BossRig::new(StateMachine::transitioning(BossPhase::Wait, BossPhase::Laser));
    // 180°/s × 0.5 s = 90° per drive
    for expected in [90.0, 180.0, 270.0] {
        rig.drive(0.5);
        assert_eq!(rig.boss.rotation(), expected);
        assert_eq!(rig.machine.current(), BossPhase::Laser);
    }
    rig.drive(0.5);
    assert_eq!(rig.machine.current(), BossPhase::Wait);
    assert_eq!(rig.boss.rotation(), 0.0);
    assert_eq!(rig.brain.sweep(), 0.0);
    assert_eq!(rig.projectiles.active_count(), 4); // one per laser frame
}

#[test]
fn laser_fires_along_facing() {
    let mut rig = BossRig::new(StateMachine::transitioning(BossPhase::Wait, BossPhase::Laser));
    rig.drive(0.5); // rotation 90° → heading left
    let (_, shot) = rig.projectiles.active().next().unwrap();
    assert!((shot.body.velocity.x + LASER_SPEED).abs() < 1e-3);
    assert!(shot.body.velocity.y.abs() < 1e-3);
}

#[test]
fn laser_completes_even_when_rotation_wraps() {
    let mut rig = BossRig::new(StateMachine::transitioning(BossPhase::Wait, BossPhase::Laser));
    rig.drive(2.0); // 360° in one step; wrapped rotation is 0
    assert_eq!(rig.machine.current(), BossPhase::Wait);
}

// ── Player ───────────────────────────────────────────────────────────────────

#[test]
fn walk_moves_and_faces() {
    let mut rig = PlayerRig::new();
    rig.drive(&FrameInput::new().hold(Action::Right), 0.05);
    assert_eq!(rig.player.position, Vector2::new(410.0, 152.0));
    assert_eq!(rig.facing, Direction::Right);
    assert_eq!(rig.player.visual.sprite, Sprite::PlayerWalk(2));
}

#[test]
fn walk_cycle_flips_every_frame_time() {
    let mut rig = PlayerRig::new();
    let input = FrameInput::new().hold(Action::Down);
    rig.drive(&input, 0.05);
    assert_eq!(rig.brain.walk_index(), 0);
    rig.drive(&input, 0.05); // 0.1 s
    assert_eq!(rig.brain.walk_index(), 1);
    assert_eq!(rig.player.visual.sprite, Sprite::PlayerWalk(7));
    rig.drive(&input, 0.05);
    rig.drive(&input, 0.05);
    assert_eq!(rig.brain.walk_index(), 0);
}

#[test]
fn idle_resets_walk_timer() {
    let mut rig = PlayerRig::new();
    let walk = FrameInput::new().hold(Action::Up);
    rig.drive(&walk, 0.05);
    rig.drive(&FrameInput::new(), 0.05);
    rig.drive(&walk, 0.05);
    assert_eq!(rig.brain.walk_index(), 0);
}

#[test]
fn opposite_keys_prefer_up_and_left() {
    let mut rig = PlayerRig::new();
    let input = FrameInput::new()
        .hold(Action::Up)
        .hold(Action::Down)
        .hold(Action::Left)
        .hold(Action::Right);
    rig.drive(&input, 0.1);
    assert_eq!(rig.player.position, Vector2::new(380.0, 132.0));
    assert_eq!(rig.facing, Direction::Left); // horizontal wins
}

#[test]
fn attack_swings_then_returns_to_move() {
    let mut rig = PlayerRig::new();
    rig.drive(&FrameInput::new().press(Action::Attack), 0.1);
    assert_eq!(rig.machine.current(), PlayerPhase::Attack);
    assert!(!rig.hitbox.active); // activated on enter

    let idle = FrameInput::new();
    rig.drive(&idle, 0.1);
    assert!(rig.hitbox.active);
    assert_eq!(rig.player.visual.sprite, Sprite::PlayerAttack(2));

    rig.drive(&idle, 0.1); // 0.2 s
    assert!(!rig.hitbox.active);
    assert_eq!(rig.machine.current(), PlayerPhase::Move);
    assert_eq!(rig.player.visual.sprite, Sprite::PlayerAttack(3));
}

#[test]
fn attack_ignores_movement() {
    let mut rig = PlayerRig::new();
    rig.drive(&FrameInput::new().press(Action::Attack), 0.0);
    let before = rig.player.position;
    rig.drive(&FrameInput::new().hold(Action::Right), 0.1);
    assert_eq!(rig.player.position, before);
}

#[test]
fn phase_indices() {
    assert_eq!(BossPhase::Explosion.index(), 0);
    assert_eq!(BossPhase::Laser.index(), 1);
    assert_eq!(BossPhase::Wait.index(), 2);
    assert_eq!(PlayerPhase::Move.index(), 0);
    assert_eq!(PlayerPhase::Attack.index(), 1);
}
