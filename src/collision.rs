//! Two-stage overlap test with cheap side classification.
//!
//! Side detection samples two points on each edge of the first box and checks
//! them against the second box.  Good enough for axis-aligned hitboxes in a
//! small arena; it is not a physics solver.

use crate::entities::Entity;
use crate::geometry::{Rect, Vector2};

/// Centers farther apart than this (squared, i.e. 64 units) never collide.
pub const BROAD_PHASE_LIMIT_SQ: f64 = 4096.0;

/// Test `a` against `b`, recording on `a` which of its sides touched `b`.
///
/// Contact flags are cleared on every call, so a miss in either phase leaves
/// all four flags false.  Neither entity's `active` flag is consulted.
pub fn collides(a: &mut Entity, b: &Entity) -> bool {
    a.contact.clear();

    if a.position.distance_squared(b.position) > BROAD_PHASE_LIMIT_SQ {
        return false;
    }

    let ra = a.bounding_box();
    let rb = b.bounding_box();
    if !ra.overlaps(&rb) {
        return false;
    }

    let c = ra.center();
    let (hw, hh) = (ra.width / 2.0, ra.height / 2.0);
    let (qw, qh) = (ra.width / 4.0, ra.height / 4.0);

    a.contact.down = either_inside(&rb, Vector2::new(c.x - qw, c.y + hh), Vector2::new(c.x + qw, c.y + hh));
    a.contact.up = either_inside(&rb, Vector2::new(c.x - qw, c.y - hh), Vector2::new(c.x + qw, c.y - hh));
    a.contact.left = either_inside(&rb, Vector2::new(c.x - hw, c.y + qh), Vector2::new(c.x - hw, c.y - qh));
    a.contact.right = either_inside(&rb, Vector2::new(c.x + hw, c.y + qh), Vector2::new(c.x + hw, c.y - qh));

    true
}

#[inline]
fn either_inside(rect: &Rect, p: Vector2, q: Vector2) -> bool {
    rect.contains(p) || rect.contains(q)
}
