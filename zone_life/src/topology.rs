// topology.rs - Per-zone neighbor wrapping
//
// Each zone is its own torus. The header strip and the two inner boxes
// wrap onto themselves. The body wraps across the whole canvas below the
// header, and treats the inner boxes as portals: a body neighbor that
// would fall inside a box comes out on the far side of it instead.

use crate::cells::Pos;
use crate::geometry::{Geometry, Rect, Zone};

/// The eight Moore-neighborhood offsets, column by column.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

// Two boxes can chain at most a couple of tunnels before the body wrap
// settles; more than this only happens with boxes spanning a whole axis.
const MAX_PORTAL_HOPS: usize = 3;

/// Wrapped neighbor of `pos` in direction `(dx, dy)`, using the rule of
/// `zone`, which must be the zone of `pos` itself.
pub fn neighbor_coord(pos: Pos, dx: i32, dy: i32, zone: Zone, geometry: &Geometry) -> Pos {
    debug_assert!((dx, dy) != (0, 0) && dx.abs() <= 1 && dy.abs() <= 1);
    let naive = pos.offset(dx, dy);
    match zone {
        Zone::Header => wrap_within(naive, &geometry.header),
        Zone::InnerT => wrap_within(naive, &geometry.inner_t),
        Zone::InnerB => wrap_within(naive, &geometry.inner_b),
        Zone::Body => body_neighbor(naive, dx, dy, geometry),
    }
}

/// All eight wrapped neighbors of `pos`, in `NEIGHBOR_OFFSETS` order.
pub fn neighbors(pos: Pos, geometry: &Geometry) -> [Pos; 8] {
    let zone = geometry.zone_of(pos);
    NEIGHBOR_OFFSETS.map(|(dx, dy)| neighbor_coord(pos, dx, dy, zone, geometry))
}

fn body_neighbor(naive: Pos, dx: i32, dy: i32, geometry: &Geometry) -> Pos {
    let body = Rect::new(0, geometry.body_top(), geometry.grid_width, geometry.body_height());
    let mut next = wrap_within(naive, &body);

    for _ in 0..MAX_PORTAL_HOPS {
        let hit = [geometry.inner_t, geometry.inner_b]
            .into_iter()
            .find(|inner| inner.contains(next));
        let Some(inner) = hit else { break };
        next = wrap_within(tunnel(next, dx, dy, &inner), &body);
    }
    next
}

// Vertical motion decides first, so diagonals exit through the top or bottom.
fn tunnel(pos: Pos, dx: i32, dy: i32, inner: &Rect) -> Pos {
    if dy > 0 {
        Pos::new(pos.x, inner.bottom())
    } else if dy < 0 {
        Pos::new(pos.x, inner.y - 1)
    } else if dx > 0 {
        Pos::new(inner.right(), pos.y)
    } else {
        Pos::new(inner.x - 1, pos.y)
    }
}

fn wrap_within(pos: Pos, region: &Rect) -> Pos {
    Pos::new(
        wrap_axis(pos.x, region.x, region.width),
        wrap_axis(pos.y, region.y, region.height),
    )
}

fn wrap_axis(value: i32, start: i32, len: i32) -> i32 {
    if len <= 0 {
        return value;
    }
    start + (value - start).rem_euclid(len)
}
