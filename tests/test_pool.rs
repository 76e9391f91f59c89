use boss_battle::entities::*;
use boss_battle::geometry::*;
use boss_battle::pool::*;

fn arena() -> Rect {
    Rect::new(0.0, 0.0, 800.0, 608.0)
}

#[test]
fn new_pool_is_idle() {
    let pool = ProjectilePool::new(100);
    assert_eq!(pool.capacity(), 100);
    assert_eq!(pool.active_count(), 0);
    assert_eq!(pool.active().count(), 0);
}

#[test]
fn fire_uses_first_free_slot() {
    let mut pool = ProjectilePool::new(4);
    let origin = Vector2::new(50.0, 60.0);
    assert_eq!(pool.fire(Owner::Boss, 0.0, 15.0, origin), Some(0));
    assert_eq!(pool.fire(Owner::Player, 90.0, 15.0, origin), Some(1));
    let p = pool.get(1).unwrap();
    assert!(p.body.active);
    assert_eq!(p.owner, Owner::Player);
    assert_eq!(p.body.position, origin);
}

#[test]
fn saturated_pool_drops_shots() {
    let mut pool = ProjectilePool::new(100);
    for _ in 0..100 {
        assert!(pool.fire(Owner::Boss, 0.0, 15.0, Vector2::ZERO).is_some());
    }
    assert_eq!(pool.fire(Owner::Boss, 0.0, 15.0, Vector2::ZERO), None);
    assert_eq!(pool.active_count(), 100);
    assert_eq!(pool.capacity(), 100); // never grows
}

#[test]
fn deactivated_slot_is_reused() {
    let mut pool = ProjectilePool::new(10);
    for _ in 0..10 {
        pool.fire(Owner::Boss, 0.0, 15.0, Vector2::ZERO);
    }
    pool.deactivate(5);
    assert_eq!(pool.active_count(), 9);
    assert_eq!(pool.fire(Owner::Boss, 0.0, 15.0, Vector2::ZERO), Some(5));
}

#[test]
fn integrate_moves_active_projectiles() {
    let mut pool = ProjectilePool::new(2);
    pool.fire(Owner::Boss, 180.0, 100.0, Vector2::new(400.0, 300.0)); // straight down
    pool.integrate(0.5, &arena());
    let p = pool.get(0).unwrap();
    assert!((p.body.position.y - 350.0).abs() < 1e-3);
    assert!(p.body.active);
    // idle slot untouched
    assert_eq!(pool.get(1).unwrap().body.position, Vector2::ZERO);
}

#[test]
fn projectile_leaving_arena_is_recycled() {
    let mut pool = ProjectilePool::new(2);
    pool.fire(Owner::Boss, 270.0, 100.0, Vector2::new(790.0, 300.0)); // heading right
    pool.integrate(0.2, &arena());
    assert_eq!(pool.active_count(), 0);
    assert_eq!(pool.fire(Owner::Boss, 0.0, 1.0, Vector2::ZERO), Some(0));
}
