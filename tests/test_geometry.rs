use boss_battle::collision::*;
use boss_battle::entities::*;
use boss_battle::geometry::*;

fn dot_at(x: f64, y: f64) -> Entity {
    // Projectile sprite: 16×16 box
    Entity::new(Visual::new(Sprite::Projectile)).with_position(Vector2::new(x, y))
}

// ── Vector2 ───────────────────────────────────────────────────────────────────

#[test]
fn normalize_zero_stays_zero() {
    assert_eq!(Vector2::ZERO.normalize(), Vector2::ZERO);
}

#[test]
fn normalize_has_unit_length() {
    let v = Vector2::new(3.0, 4.0).normalize();
    assert!((v.length() - 1.0).abs() < 1e-6);
    assert!((v.x - 0.6).abs() < 1e-6);
}

#[test]
fn vector_ops() {
    let a = Vector2::new(1.0, 2.0);
    let b = Vector2::new(3.0, -1.0);
    assert_eq!(a + b, Vector2::new(4.0, 1.0));
    assert_eq!(b - a, Vector2::new(2.0, -3.0));
    assert_eq!(a * 2.0, Vector2::new(2.0, 4.0));
    assert_eq!(a.distance_squared(b), 13.0);
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_from_center() {
    let r = Rect::from_center(Vector2::new(10.0, 10.0), 4.0, 6.0);
    assert_eq!(r.left, 8.0);
    assert_eq!(r.top, 7.0);
    assert_eq!(r.right(), 12.0);
    assert_eq!(r.bottom(), 13.0);
    assert_eq!(r.center(), Vector2::new(10.0, 10.0));
}

#[test]
fn rect_overlap_is_strict() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
    assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0))); // shared edge
    assert!(!a.overlaps(&Rect::new(20.0, 20.0, 1.0, 1.0)));
}

#[test]
fn rect_contains_is_half_open() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(r.contains(Vector2::new(0.0, 0.0)));
    assert!(r.contains(Vector2::new(9.9, 9.9)));
    assert!(!r.contains(Vector2::new(10.0, 5.0)));
    assert!(!r.contains(Vector2::new(5.0, 10.0)));
}

// ── collides ──────────────────────────────────────────────────────────────────

#[test]
fn broad_phase_rejects_far_centers() {
    let mut a = dot_at(0.0, 0.0);
    a.contact.up = true; // stale flag from an earlier test
    let b = dot_at(65.0, 0.0);
    assert!(!collides(&mut a, &b));
    assert!(!a.contact.any());
}

#[test]
fn narrow_phase_rejects_touching_edges() {
    let mut a = dot_at(0.0, 0.0);
    a.contact.left = true;
    let b = dot_at(16.0, 0.0);
    assert!(!collides(&mut a, &b));
    assert!(!a.contact.any());
}

fn flags(up: bool, down: bool, left: bool, right: bool) -> ContactFlags {
    ContactFlags { up, down, left, right }
}

/// Collide a dot at the origin with one offset by (dx, dy) and return its flags.
fn contact_against(dx: f64, dy: f64) -> ContactFlags {
    let mut a = dot_at(0.0, 0.0);
    assert!(collides(&mut a, &dot_at(dx, dy)));
    a.contact
}

#[test]
fn other_box_below_sets_down_only() {
    assert_eq!(contact_against(0.0, 13.0), flags(false, true, false, false));
}

#[test]
fn other_box_above_sets_up_only() {
    assert_eq!(contact_against(0.0, -13.0), flags(true, false, false, false));
}

#[test]
fn other_box_right_sets_right_only() {
    assert_eq!(contact_against(13.0, 0.0), flags(false, false, false, true));
}

#[test]
fn other_box_left_sets_left_only() {
    assert_eq!(contact_against(-13.0, 0.0), flags(false, false, true, false));
}

#[test]
fn corner_overlap_sets_two_sides() {
    // Box spans [2, 18) on both axes: the (+4, +8) and (+8, +4) samples land inside.
    assert_eq!(contact_against(10.0, 10.0), flags(false, true, false, true));
}

#[test]
fn upper_sample_on_shared_row_counts() {
    // (+4, -8) sits on the other box's top edge, which is inside (half-open).
    assert_eq!(contact_against(10.0, 0.0), flags(true, false, false, true));
}

#[test]
fn collision_only_writes_first_entity() {
    let mut a = dot_at(0.0, 0.0);
    let mut b = dot_at(10.0, 0.0);
    b.contact.down = true;
    collides(&mut a, &b);
    assert!(b.contact.down);
    assert!(!b.contact.up);
}

#[test]
fn collision_ignores_active_flag() {
    let mut a = dot_at(0.0, 0.0);
    let b = dot_at(4.0, 4.0);
    assert!(!a.active && !b.active);
    assert!(collides(&mut a, &b));
}
