//! Ear-clipping polygon triangulation.
//!
//! [`earcut`] takes a flat coordinate array (outer ring followed by hole
//! rings, identified by start indices) and returns triangle vertex
//! indices. Holes are merged into the outer ring through bridge edges
//! before clipping, and rings beyond ~80 vertices get a z-order curve
//! index so ear tests only visit spatially nearby vertices. The ring is
//! held as a circular doubly-linked list stored in an arena of nodes
//! addressed by index; the arena lives only for the duration of one call.
//!
//! [`triangulate_polygon`] is the 3D entry point: it detects the polygon
//! plane, rotates it onto the XY plane and runs [`earcut`] with stride 3.

use nalgebra::Rotation3;

use crate::error::GeometryError;
use crate::{Point3, Vector3, G_PRECISION};

/// Null link in the node arena.
const NIL: usize = usize::MAX;

/// Ring vertex. `i` is the offset of the vertex in the flat coordinate
/// array; `z` is the z-order curve value, -1 until assigned.
struct Node {
    i: usize,
    x: f64,
    y: f64,
    prev: usize,
    next: usize,
    z: i32,
    prev_z: usize,
    next_z: usize,
    steiner: bool,
}

struct Triangulator<'a> {
    data: &'a [f64],
    dim: usize,
    nodes: Vec<Node>,
    triangles: Vec<usize>,
    min_x: f64,
    min_y: f64,
    inv_size: f64,
}

/// Triangulates a polygon given as a flat coordinate array.
///
/// `hole_indices` holds the vertex index at which each hole ring starts;
/// everything before the first hole (or the whole array without holes) is
/// the outer ring. Only the first two components of each vertex
/// participate; `dim` is the coordinate stride (2 or 3, higher permitted).
/// Returns triangle vertex indices, three per triangle. Degenerate input
/// yields an empty list; malformed hole indices are an error.
pub fn earcut(
    data: &[f64],
    hole_indices: &[usize],
    dim: usize,
) -> Result<Vec<usize>, GeometryError> {
    if dim < 2 {
        return Err(GeometryError::InvalidStride(dim));
    }
    let mut previous = 0;
    for (k, &h) in hole_indices.iter().enumerate() {
        if h <= previous {
            return Err(GeometryError::MalformedHoles(format!(
                "hole {} starts at vertex {}, expected a strictly increasing positive sequence",
                k, h
            )));
        }
        if h * dim >= data.len() {
            return Err(GeometryError::MalformedHoles(format!(
                "hole {} starts at vertex {}, past the end of the data",
                k, h
            )));
        }
        previous = h;
    }

    let has_holes = !hole_indices.is_empty();
    let outer_len = if has_holes {
        hole_indices[0] * dim
    } else {
        data.len()
    };

    let mut ctx = Triangulator {
        data,
        dim,
        nodes: Vec::with_capacity(data.len() / dim + hole_indices.len() * 2),
        triangles: Vec::new(),
        min_x: 0.0,
        min_y: 0.0,
        inv_size: 0.0,
    };

    let mut outer_node = ctx.linked_list(0, outer_len, true);
    if outer_node == NIL || ctx.nodes[outer_node].next == ctx.nodes[outer_node].prev {
        return Ok(ctx.triangles);
    }

    if has_holes {
        outer_node = ctx.eliminate_holes(hole_indices, outer_node);
    }

    // Z-order hashing only pays off past a size threshold.
    if data.len() > 80 * dim {
        let (mut min_x, mut min_y) = (data[0], data[1]);
        let (mut max_x, mut max_y) = (min_x, min_y);
        let mut i = dim;
        while i < outer_len {
            let (x, y) = (data[i], data[i + 1]);
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
            i += dim;
        }
        let size = (max_x - min_x).max(max_y - min_y);
        ctx.min_x = min_x;
        ctx.min_y = min_y;
        ctx.inv_size = if size != 0.0 { 1.0 / size } else { 0.0 };
    }

    ctx.earcut_linked(outer_node, 0);
    Ok(ctx.triangles)
}

/// Relative difference between the polygon area (outer minus holes) and
/// the total area of the produced triangles; 0 for an exact tessellation.
pub fn deviation(data: &[f64], hole_indices: &[usize], dim: usize, triangles: &[usize]) -> f64 {
    let has_holes = !hole_indices.is_empty();
    let outer_len = if has_holes {
        hole_indices[0] * dim
    } else {
        data.len()
    };

    let mut polygon_area = signed_area(data, 0, outer_len, dim).abs();
    if has_holes {
        for (k, &h) in hole_indices.iter().enumerate() {
            let start = h * dim;
            let end = if k < hole_indices.len() - 1 {
                hole_indices[k + 1] * dim
            } else {
                data.len()
            };
            polygon_area -= signed_area(data, start, end, dim).abs();
        }
    }

    let mut triangles_area = 0.0;
    for tri in triangles.chunks_exact(3) {
        let a = tri[0] * dim;
        let b = tri[1] * dim;
        let c = tri[2] * dim;
        triangles_area += ((data[a] - data[c]) * (data[b + 1] - data[a + 1])
            - (data[a] - data[b]) * (data[c + 1] - data[a + 1]))
            .abs();
    }

    if polygon_area == 0.0 && triangles_area == 0.0 {
        0.0
    } else {
        ((triangles_area - polygon_area) / polygon_area).abs()
    }
}

/// Normal of a planar polygon, taken at its sharpest corner so that
/// near-collinear runs of vertices cannot produce a junk cross product.
pub fn polygon_normal(points: &[Point3]) -> Vector3 {
    let len = points.len();
    if len < 3 {
        return Vector3::z();
    }

    let mut min_dot = f64::INFINITY;
    let mut corner = 1;
    for i in 0..len + 2 {
        let p0 = points[i % len];
        let p1 = points[(i + 1) % len];
        let p2 = points[(i + 2) % len];
        let (d0, d1) = match ((p1 - p0).try_normalize(0.0), (p2 - p1).try_normalize(0.0)) {
            (Some(d0), Some(d1)) => (d0, d1),
            _ => continue,
        };
        let dot = d0.dot(&d1).abs();
        if dot < min_dot {
            min_dot = dot;
            corner = i + 1;
        }
    }

    let p0 = points[(corner - 1) % len];
    let p1 = points[corner % len];
    let p2 = points[(corner + 1) % len];
    (p1 - p0)
        .cross(&(p2 - p1))
        .try_normalize(0.0)
        .unwrap_or_else(Vector3::z)
}

/// Rotation taking `normal` (assumed unit) onto +Z; a half turn about X
/// when the vectors are exactly opposite.
pub(crate) fn rotation_to_z(normal: &Vector3) -> Rotation3<f64> {
    Rotation3::rotation_between(normal, &Vector3::z()).unwrap_or_else(|| {
        Rotation3::from_axis_angle(&nalgebra::Vector3::x_axis(), std::f64::consts::PI)
    })
}

/// Triangulates a planar polygon in 3D space with optional holes.
///
/// The polygon plane is detected with [`polygon_normal`] and rotated onto
/// the XY plane before ear clipping. Returned indices address the
/// concatenation of `boundary` and the holes in order.
pub fn triangulate_polygon(
    boundary: &[Point3],
    holes: &[Vec<Point3>],
) -> Result<Vec<usize>, GeometryError> {
    if boundary.len() < 3 {
        return Err(GeometryError::InsufficientPoints(boundary.len()));
    }

    let normal = polygon_normal(boundary);
    let rotation = if normal.dot(&Vector3::z()) < 1.0 - G_PRECISION {
        Some(rotation_to_z(&normal))
    } else {
        None
    };
    let flatten = |p: &Point3| match &rotation {
        Some(r) => r * p,
        None => *p,
    };

    let total = boundary.len() + holes.iter().map(Vec::len).sum::<usize>();
    let mut data = Vec::with_capacity(total * 3);
    for p in boundary {
        let q = flatten(p);
        data.extend_from_slice(&[q.x, q.y, q.z]);
    }

    let mut hole_indices = Vec::with_capacity(holes.len());
    let mut base = boundary.len();
    for hole in holes.iter().filter(|h| !h.is_empty()) {
        hole_indices.push(base);
        base += hole.len();
        for p in hole {
            let q = flatten(p);
            data.extend_from_slice(&[q.x, q.y, q.z]);
        }
    }

    earcut(&data, &hole_indices, 3)
}

impl Triangulator<'_> {
    fn new_node(&mut self, i: usize, x: f64, y: f64) -> usize {
        self.nodes.push(Node {
            i,
            x,
            y,
            prev: NIL,
            next: NIL,
            z: -1,
            prev_z: NIL,
            next_z: NIL,
            steiner: false,
        });
        self.nodes.len() - 1
    }

    /// Creates a node and links it after `last` in the circular list.
    fn insert_node(&mut self, i: usize, x: f64, y: f64, last: usize) -> usize {
        let p = self.new_node(i, x, y);
        if last == NIL {
            self.nodes[p].prev = p;
            self.nodes[p].next = p;
        } else {
            let next = self.nodes[last].next;
            self.nodes[p].next = next;
            self.nodes[p].prev = last;
            self.nodes[next].prev = p;
            self.nodes[last].next = p;
        }
        p
    }

    /// Unlinks `p` from both the ring and the z-order chain. The node's
    /// own links are left in place so callers can still step off of it.
    fn remove_node(&mut self, p: usize) {
        let Node {
            prev,
            next,
            prev_z,
            next_z,
            ..
        } = self.nodes[p];
        self.nodes[next].prev = prev;
        self.nodes[prev].next = next;
        if prev_z != NIL {
            self.nodes[prev_z].next_z = next_z;
        }
        if next_z != NIL {
            self.nodes[next_z].prev_z = prev_z;
        }
    }

    /// Builds a circular list for one ring, in the requested winding
    /// order regardless of the input's.
    fn linked_list(&mut self, start: usize, end: usize, clockwise: bool) -> usize {
        let mut last = NIL;

        if clockwise == (signed_area(self.data, start, end, self.dim) > 0.0) {
            let mut i = start;
            while i < end {
                last = self.insert_node(i, self.data[i], self.data[i + 1], last);
                i += self.dim;
            }
        } else {
            let mut i = end as isize - self.dim as isize;
            while i >= start as isize {
                let idx = i as usize;
                last = self.insert_node(idx, self.data[idx], self.data[idx + 1], last);
                i -= self.dim as isize;
            }
        }

        if last != NIL && self.equals(last, self.nodes[last].next) {
            self.remove_node(last);
            last = self.nodes[last].next;
        }

        last
    }

    /// Removes collinear and duplicate vertices; returns a surviving node
    /// of the ring.
    fn filter_points(&mut self, start: usize, end: usize) -> usize {
        if start == NIL {
            return start;
        }
        let mut end = if end == NIL { start } else { end };

        let mut p = start;
        loop {
            let mut again = false;
            let (prev, next) = (self.nodes[p].prev, self.nodes[p].next);

            if !self.nodes[p].steiner && (self.equals(p, next) || self.area(prev, p, next) == 0.0) {
                self.remove_node(p);
                p = prev;
                end = prev;
                if p == self.nodes[p].next {
                    break;
                }
                again = true;
            } else {
                p = next;
            }

            if !again && p == end {
                break;
            }
        }

        end
    }

    /// Main ear slicing loop. `pass` 0 is the normal run; 1 retries after
    /// filtering, 2 after curing local self-intersections, and the last
    /// resort splits the remaining polygon in two.
    fn earcut_linked(&mut self, mut ear: usize, pass: u8) {
        if ear == NIL {
            return;
        }

        if pass == 0 && self.inv_size != 0.0 {
            self.index_curve(ear);
        }

        let mut stop = ear;
        while self.nodes[ear].prev != self.nodes[ear].next {
            let prev = self.nodes[ear].prev;
            let next = self.nodes[ear].next;

            let is_ear = if self.inv_size != 0.0 {
                self.is_ear_hashed(ear)
            } else {
                self.is_ear(ear)
            };

            if is_ear {
                self.triangles.push(self.nodes[prev].i / self.dim);
                self.triangles.push(self.nodes[ear].i / self.dim);
                self.triangles.push(self.nodes[next].i / self.dim);

                self.remove_node(ear);

                // Skipping one vertex produces fewer sliver triangles.
                ear = self.nodes[next].next;
                stop = ear;
                continue;
            }

            ear = next;

            if ear == stop {
                match pass {
                    0 => {
                        let filtered = self.filter_points(ear, NIL);
                        self.earcut_linked(filtered, 1);
                    }
                    1 => {
                        let filtered = self.filter_points(ear, NIL);
                        let cured = self.cure_local_intersections(filtered);
                        self.earcut_linked(cured, 2);
                    }
                    _ => self.split_earcut(ear),
                }
                break;
            }
        }
    }

    /// Whether the triangle (prev, ear, next) is convex and empty of
    /// other ring vertices.
    fn is_ear(&self, ear: usize) -> bool {
        let a = self.nodes[ear].prev;
        let b = ear;
        let c = self.nodes[ear].next;

        if self.area(a, b, c) >= 0.0 {
            return false; // reflex
        }

        let (ax, ay) = (self.nodes[a].x, self.nodes[a].y);
        let (bx, by) = (self.nodes[b].x, self.nodes[b].y);
        let (cx, cy) = (self.nodes[c].x, self.nodes[c].y);

        let mut p = self.nodes[c].next;
        while p != a {
            if point_in_triangle(ax, ay, bx, by, cx, cy, self.nodes[p].x, self.nodes[p].y)
                && self.area(self.nodes[p].prev, p, self.nodes[p].next) >= 0.0
            {
                return false;
            }
            p = self.nodes[p].next;
        }

        true
    }

    /// Ear test restricted to z-order neighbors of the triangle's bbox.
    fn is_ear_hashed(&self, ear: usize) -> bool {
        let a = self.nodes[ear].prev;
        let b = ear;
        let c = self.nodes[ear].next;

        if self.area(a, b, c) >= 0.0 {
            return false; // reflex
        }

        let (ax, ay) = (self.nodes[a].x, self.nodes[a].y);
        let (bx, by) = (self.nodes[b].x, self.nodes[b].y);
        let (cx, cy) = (self.nodes[c].x, self.nodes[c].y);

        let min_z = z_order(
            ax.min(bx).min(cx),
            ay.min(by).min(cy),
            self.min_x,
            self.min_y,
            self.inv_size,
        );
        let max_z = z_order(
            ax.max(bx).max(cx),
            ay.max(by).max(cy),
            self.min_x,
            self.min_y,
            self.inv_size,
        );

        let blocks = |this: &Self, p: usize| {
            p != a
                && p != c
                && point_in_triangle(ax, ay, bx, by, cx, cy, this.nodes[p].x, this.nodes[p].y)
                && this.area(this.nodes[p].prev, p, this.nodes[p].next) >= 0.0
        };

        let mut p = self.nodes[ear].prev_z;
        let mut n = self.nodes[ear].next_z;

        // Walk outward in both z directions while still inside the range.
        while p != NIL && self.nodes[p].z >= min_z && n != NIL && self.nodes[n].z <= max_z {
            if blocks(self, p) {
                return false;
            }
            p = self.nodes[p].prev_z;

            if blocks(self, n) {
                return false;
            }
            n = self.nodes[n].next_z;
        }

        while p != NIL && self.nodes[p].z >= min_z {
            if blocks(self, p) {
                return false;
            }
            p = self.nodes[p].prev_z;
        }

        while n != NIL && self.nodes[n].z <= max_z {
            if blocks(self, n) {
                return false;
            }
            n = self.nodes[n].next_z;
        }

        true
    }

    /// Clips away pairs of edges that cross each other locally.
    fn cure_local_intersections(&mut self, start: usize) -> usize {
        let mut start = start;
        let mut p = start;
        loop {
            let a = self.nodes[p].prev;
            let p_next = self.nodes[p].next;
            let b = self.nodes[p_next].next;

            if !self.equals(a, b)
                && self.intersects(a, p, p_next, b)
                && self.locally_inside(a, b)
                && self.locally_inside(b, a)
            {
                self.triangles.push(self.nodes[a].i / self.dim);
                self.triangles.push(self.nodes[p].i / self.dim);
                self.triangles.push(self.nodes[b].i / self.dim);

                self.remove_node(p);
                self.remove_node(p_next);

                p = b;
                start = b;
            }
            p = self.nodes[p].next;
            if p == start {
                break;
            }
        }

        self.filter_points(p, NIL)
    }

    /// Last resort: finds a valid diagonal, splits the polygon along it
    /// and triangulates both halves independently.
    fn split_earcut(&mut self, start: usize) {
        let mut a = start;
        loop {
            let mut b = self.nodes[self.nodes[a].next].next;
            while b != self.nodes[a].prev {
                if self.nodes[a].i != self.nodes[b].i && self.is_valid_diagonal(a, b) {
                    let mut c = self.split_polygon(a, b);

                    let a_next = self.nodes[a].next;
                    let a = self.filter_points(a, a_next);
                    let c_next = self.nodes[c].next;
                    c = self.filter_points(c, c_next);

                    self.earcut_linked(a, 0);
                    self.earcut_linked(c, 0);
                    return;
                }
                b = self.nodes[b].next;
            }
            a = self.nodes[a].next;
            if a == start {
                break;
            }
        }
    }

    /// Links every hole into the outer ring, leftmost holes first, so the
    /// result is a single ring without holes.
    fn eliminate_holes(&mut self, hole_indices: &[usize], mut outer_node: usize) -> usize {
        let mut queue = Vec::with_capacity(hole_indices.len());
        for (k, &h) in hole_indices.iter().enumerate() {
            let start = h * self.dim;
            let end = if k < hole_indices.len() - 1 {
                hole_indices[k + 1] * self.dim
            } else {
                self.data.len()
            };
            let list = self.linked_list(start, end, false);
            if list == NIL {
                continue;
            }
            if list == self.nodes[list].next {
                self.nodes[list].steiner = true;
            }
            queue.push(self.get_leftmost(list));
        }

        queue.sort_by(|&a, &b| {
            self.nodes[a]
                .x
                .partial_cmp(&self.nodes[b].x)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for hole in queue {
            self.eliminate_hole(hole, outer_node);
            let next = self.nodes[outer_node].next;
            outer_node = self.filter_points(outer_node, next);
        }

        outer_node
    }

    fn eliminate_hole(&mut self, hole: usize, outer_node: usize) {
        let bridge = self.find_hole_bridge(hole, outer_node);
        if bridge != NIL {
            let b = self.split_polygon(bridge, hole);
            let b_next = self.nodes[b].next;
            self.filter_points(b, b_next);
        }
    }

    /// Finds an outer-ring vertex visible from the hole's leftmost vertex
    /// (Eberly's bridge construction): cast a ray towards -X, take the
    /// edge it hits, then resolve ties by the minimum-angle rule.
    fn find_hole_bridge(&self, hole: usize, outer_node: usize) -> usize {
        let hx = self.nodes[hole].x;
        let hy = self.nodes[hole].y;
        let mut qx = f64::NEG_INFINITY;
        let mut m = NIL;

        let mut p = outer_node;
        loop {
            let next = self.nodes[p].next;
            let (px, py) = (self.nodes[p].x, self.nodes[p].y);
            let (nx, ny) = (self.nodes[next].x, self.nodes[next].y);

            if hy <= py && hy >= ny && ny != py {
                let x = px + (hy - py) * (nx - px) / (ny - py);
                if x <= hx && x > qx {
                    qx = x;
                    if x == hx {
                        if hy == py {
                            return p;
                        }
                        if hy == ny {
                            return next;
                        }
                    }
                    m = if px < nx { p } else { next };
                }
            }
            p = next;
            if p == outer_node {
                break;
            }
        }

        if m == NIL {
            return NIL;
        }
        if hx == qx {
            return m; // hole touches the outer segment; use that vertex
        }

        // Vertices inside the triangle (hole point, ray hit, endpoint)
        // would be crossed by the bridge; among them pick the one with the
        // minimum angle to the ray.
        let stop = m;
        let mx = self.nodes[m].x;
        let my = self.nodes[m].y;
        let mut tan_min = f64::INFINITY;

        p = m;
        loop {
            let (px, py) = (self.nodes[p].x, self.nodes[p].y);
            if hx >= px
                && px >= mx
                && hx != px
                && point_in_triangle(
                    if hy < my { hx } else { qx },
                    hy,
                    mx,
                    my,
                    if hy < my { qx } else { hx },
                    hy,
                    px,
                    py,
                )
            {
                let tan = (hy - py).abs() / (hx - px);

                if self.locally_inside(p, hole)
                    && (tan < tan_min
                        || (tan == tan_min
                            && (px > self.nodes[m].x
                                || (px == self.nodes[m].x && self.sector_contains_sector(m, p)))))
                {
                    m = p;
                    tan_min = tan;
                }
            }

            p = self.nodes[p].next;
            if p == stop {
                break;
            }
        }

        m
    }

    /// Whether the angular sector at `m` contains the sector at `p`, with
    /// both vertices at the same coordinates.
    fn sector_contains_sector(&self, m: usize, p: usize) -> bool {
        self.area(self.nodes[m].prev, m, self.nodes[p].prev) < 0.0
            && self.area(self.nodes[p].next, m, self.nodes[m].next) < 0.0
    }

    /// Assigns z-order values and sorts the secondary chain by them.
    fn index_curve(&mut self, start: usize) {
        let mut p = start;
        loop {
            if self.nodes[p].z == -1 {
                self.nodes[p].z = z_order(
                    self.nodes[p].x,
                    self.nodes[p].y,
                    self.min_x,
                    self.min_y,
                    self.inv_size,
                );
            }
            self.nodes[p].prev_z = self.nodes[p].prev;
            self.nodes[p].next_z = self.nodes[p].next;
            p = self.nodes[p].next;
            if p == start {
                break;
            }
        }

        let last = self.nodes[p].prev_z;
        self.nodes[last].next_z = NIL;
        self.nodes[p].prev_z = NIL;

        self.sort_linked(p);
    }

    /// Bottom-up merge sort of the z chain (Simon Tatham's linked-list
    /// variant), in place.
    fn sort_linked(&mut self, mut list: usize) {
        let mut in_size = 1;

        loop {
            let mut p = list;
            list = NIL;
            let mut tail = NIL;
            let mut num_merges = 0;

            while p != NIL {
                num_merges += 1;
                let mut q = p;
                let mut p_size = 0;
                for _ in 0..in_size {
                    p_size += 1;
                    q = self.nodes[q].next_z;
                    if q == NIL {
                        break;
                    }
                }
                let mut q_size = in_size;

                while p_size > 0 || (q_size > 0 && q != NIL) {
                    let e;
                    if p_size != 0 && (q_size == 0 || q == NIL || self.nodes[p].z <= self.nodes[q].z)
                    {
                        e = p;
                        p = self.nodes[p].next_z;
                        p_size -= 1;
                    } else {
                        e = q;
                        q = self.nodes[q].next_z;
                        q_size -= 1;
                    }

                    if tail != NIL {
                        self.nodes[tail].next_z = e;
                    } else {
                        list = e;
                    }
                    self.nodes[e].prev_z = tail;
                    tail = e;
                }

                p = q;
            }

            self.nodes[tail].next_z = NIL;
            if num_merges <= 1 {
                break;
            }
            in_size *= 2;
        }
    }

    fn get_leftmost(&self, start: usize) -> usize {
        let mut p = start;
        let mut leftmost = start;
        loop {
            let (px, py) = (self.nodes[p].x, self.nodes[p].y);
            let (lx, ly) = (self.nodes[leftmost].x, self.nodes[leftmost].y);
            if px < lx || (px == lx && py < ly) {
                leftmost = p;
            }
            p = self.nodes[p].next;
            if p == start {
                break;
            }
        }
        leftmost
    }

    /// Whether a diagonal from `a` to `b` lies in the polygon interior.
    fn is_valid_diagonal(&self, a: usize, b: usize) -> bool {
        let (an, ap) = (self.nodes[a].next, self.nodes[a].prev);
        let (bn, bp) = (self.nodes[b].next, self.nodes[b].prev);

        self.nodes[an].i != self.nodes[b].i
            && self.nodes[ap].i != self.nodes[b].i
            && !self.intersects_polygon(a, b)
            && ((self.locally_inside(a, b)
                && self.locally_inside(b, a)
                && self.middle_inside(a, b)
                // must not create opposite-facing sectors
                && (self.area(ap, a, bp) != 0.0 || self.area(a, bp, b) != 0.0))
                || (self.equals(a, b)
                    && self.area(ap, a, an) > 0.0
                    && self.area(bp, b, bn) > 0.0))
    }

    /// Doubled signed area of the triangle (p, q, r).
    fn area(&self, p: usize, q: usize, r: usize) -> f64 {
        let (p, q, r) = (&self.nodes[p], &self.nodes[q], &self.nodes[r]);
        (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y)
    }

    fn equals(&self, a: usize, b: usize) -> bool {
        self.nodes[a].x == self.nodes[b].x && self.nodes[a].y == self.nodes[b].y
    }

    /// Whether segments (p1, q1) and (p2, q2) intersect, collinear
    /// overlaps included.
    fn intersects(&self, p1: usize, q1: usize, p2: usize, q2: usize) -> bool {
        let o1 = sign(self.area(p1, q1, p2));
        let o2 = sign(self.area(p1, q1, q2));
        let o3 = sign(self.area(p2, q2, p1));
        let o4 = sign(self.area(p2, q2, q1));

        if o1 != o2 && o3 != o4 {
            return true;
        }

        (o1 == 0 && self.on_segment(p1, p2, q1))
            || (o2 == 0 && self.on_segment(p1, q2, q1))
            || (o3 == 0 && self.on_segment(p2, p1, q2))
            || (o4 == 0 && self.on_segment(p2, q1, q2))
    }

    /// For collinear p, q, r: whether q lies within the bbox of (p, r).
    fn on_segment(&self, p: usize, q: usize, r: usize) -> bool {
        let (p, q, r) = (&self.nodes[p], &self.nodes[q], &self.nodes[r]);
        q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
    }

    /// Whether the diagonal (a, b) crosses any polygon edge.
    fn intersects_polygon(&self, a: usize, b: usize) -> bool {
        let (ai, bi) = (self.nodes[a].i, self.nodes[b].i);
        let mut p = a;
        loop {
            let next = self.nodes[p].next;
            if self.nodes[p].i != ai
                && self.nodes[next].i != ai
                && self.nodes[p].i != bi
                && self.nodes[next].i != bi
                && self.intersects(p, next, a, b)
            {
                return true;
            }
            p = next;
            if p == a {
                break;
            }
        }
        false
    }

    /// Whether the diagonal (a, b) leaves `a` towards the polygon
    /// interior.
    fn locally_inside(&self, a: usize, b: usize) -> bool {
        let (ap, an) = (self.nodes[a].prev, self.nodes[a].next);
        if self.area(ap, a, an) < 0.0 {
            self.area(a, b, an) >= 0.0 && self.area(a, ap, b) >= 0.0
        } else {
            self.area(a, b, ap) < 0.0 || self.area(a, an, b) < 0.0
        }
    }

    /// Whether the midpoint of the diagonal (a, b) is inside the polygon.
    fn middle_inside(&self, a: usize, b: usize) -> bool {
        let px = (self.nodes[a].x + self.nodes[b].x) / 2.0;
        let py = (self.nodes[a].y + self.nodes[b].y) / 2.0;

        let mut inside = false;
        let mut p = a;
        loop {
            let next = self.nodes[p].next;
            let (x0, y0) = (self.nodes[p].x, self.nodes[p].y);
            let (x1, y1) = (self.nodes[next].x, self.nodes[next].y);
            if ((y0 > py) != (y1 > py)) && y1 != y0 && (px < (x1 - x0) * (py - y0) / (y1 - y0) + x0)
            {
                inside = !inside;
            }
            p = next;
            if p == a {
                break;
            }
        }

        inside
    }

    /// Bridges `a` and `b` with a pair of duplicate nodes. Splits one
    /// ring into two, or merges a hole ring into the outer ring.
    fn split_polygon(&mut self, a: usize, b: usize) -> usize {
        let (ai, ax, ay) = {
            let n = &self.nodes[a];
            (n.i, n.x, n.y)
        };
        let (bi, bx, by) = {
            let n = &self.nodes[b];
            (n.i, n.x, n.y)
        };
        let a2 = self.new_node(ai, ax, ay);
        let b2 = self.new_node(bi, bx, by);
        let an = self.nodes[a].next;
        let bp = self.nodes[b].prev;

        self.nodes[a].next = b;
        self.nodes[b].prev = a;

        self.nodes[a2].next = an;
        self.nodes[an].prev = a2;

        self.nodes[b2].next = a2;
        self.nodes[a2].prev = b2;

        self.nodes[bp].next = b2;
        self.nodes[b2].prev = bp;

        b2
    }
}

fn sign(value: f64) -> i32 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

fn point_in_triangle(
    ax: f64,
    ay: f64,
    bx: f64,
    by: f64,
    cx: f64,
    cy: f64,
    px: f64,
    py: f64,
) -> bool {
    (cx - px) * (ay - py) - (ax - px) * (cy - py) >= 0.0
        && (ax - px) * (by - py) - (bx - px) * (ay - py) >= 0.0
        && (bx - px) * (cy - py) - (cx - px) * (by - py) >= 0.0
}

/// Z-order curve value of a point quantized to a 15-bit grid over the
/// polygon bbox (bits of x and y interleaved).
fn z_order(x: f64, y: f64, min_x: f64, min_y: f64, inv_size: f64) -> i32 {
    let mut x = (32767.0 * (x - min_x) * inv_size) as i32;
    let mut y = (32767.0 * (y - min_y) * inv_size) as i32;

    x = (x | (x << 8)) & 0x00FF00FF;
    x = (x | (x << 4)) & 0x0F0F0F0F;
    x = (x | (x << 2)) & 0x33333333;
    x = (x | (x << 1)) & 0x55555555;

    y = (y | (y << 8)) & 0x00FF00FF;
    y = (y | (y << 4)) & 0x0F0F0F0F;
    y = (y | (y << 2)) & 0x33333333;
    y = (y | (y << 1)) & 0x55555555;

    x | (y << 1)
}

fn signed_area(data: &[f64], start: usize, end: usize, dim: usize) -> f64 {
    if end <= start {
        return 0.0;
    }
    let mut sum = 0.0;
    let mut j = end - dim;
    let mut i = start;
    while i < end {
        sum += (data[j] - data[i]) * (data[i + 1] + data[j + 1]);
        j = i;
        i += dim;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_without_holes() {
        let data = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
        let tris = earcut(&data, &[], 2).unwrap();
        assert_eq!(tris.len(), 6);
        assert!(deviation(&data, &[], 2, &tris) < 1e-12);
    }

    #[test]
    fn square_with_square_hole() {
        #[rustfmt::skip]
        let data = [
            0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0,
            3.0, 3.0, 7.0, 3.0, 7.0, 7.0, 3.0, 7.0,
        ];
        let tris = earcut(&data, &[4], 2).unwrap();
        assert_eq!(tris.len() / 3, 8);
        assert!(tris.iter().all(|&i| i < 8));
        assert!(deviation(&data, &[4], 2, &tris) < 1e-6);
    }

    #[test]
    fn concave_polygon() {
        let data = [0.0, 0.0, 4.0, 0.0, 4.0, 2.0, 2.0, 2.0, 2.0, 4.0, 0.0, 4.0];
        let tris = earcut(&data, &[], 2).unwrap();
        assert_eq!(tris.len() / 3, 4);
        assert!(deviation(&data, &[], 2, &tris) < 1e-12);
    }

    #[test]
    fn winding_direction_is_normalized() {
        let ccw = [0.0, 0.0, 4.0, 0.0, 4.0, 4.0, 0.0, 4.0];
        let cw = [0.0, 0.0, 0.0, 4.0, 4.0, 4.0, 4.0, 0.0];
        assert_eq!(earcut(&ccw, &[], 2).unwrap().len(), 6);
        assert_eq!(earcut(&cw, &[], 2).unwrap().len(), 6);
    }

    #[test]
    fn degenerate_input_yields_no_triangles() {
        assert!(earcut(&[], &[], 2).unwrap().is_empty());
        let collinear = [0.0, 0.0, 1.0, 0.0, 2.0, 0.0];
        assert!(earcut(&collinear, &[], 2).unwrap().is_empty());
    }

    #[test]
    fn malformed_holes_are_rejected() {
        use crate::GeometryError;
        let data = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
        assert!(matches!(
            earcut(&data, &[0], 2),
            Err(GeometryError::MalformedHoles(_))
        ));
        assert!(matches!(
            earcut(&data, &[3, 2], 2),
            Err(GeometryError::MalformedHoles(_))
        ));
        assert!(matches!(
            earcut(&data, &[9], 2),
            Err(GeometryError::MalformedHoles(_))
        ));
        assert!(matches!(
            earcut(&data, &[], 1),
            Err(GeometryError::InvalidStride(1))
        ));
    }

    #[test]
    fn large_ring_uses_zorder_hashing() {
        let n = 200;
        let mut data = Vec::with_capacity(n * 2);
        for k in 0..n {
            let angle = 2.0 * std::f64::consts::PI * k as f64 / n as f64;
            data.push(angle.cos());
            data.push(angle.sin());
        }
        let tris = earcut(&data, &[], 2).unwrap();
        assert_eq!(tris.len() / 3, n - 2);
        assert!(deviation(&data, &[], 2, &tris) < 1e-9);
    }

    #[test]
    fn stride_three_ignores_z() {
        #[rustfmt::skip]
        let data = [
            0.0, 0.0, 7.0,
            2.0, 0.0, 7.0,
            2.0, 2.0, 7.0,
            0.0, 2.0, 7.0,
        ];
        let tris = earcut(&data, &[], 3).unwrap();
        assert_eq!(tris.len(), 6);
        assert!(tris.iter().all(|&i| i < 4));
    }

    #[test]
    fn planar_polygon_in_space() {
        // Square standing in the x = 2 plane.
        let boundary = vec![
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(2.0, 1.0, 1.0),
            Point3::new(2.0, 0.0, 1.0),
        ];
        let tris = triangulate_polygon(&boundary, &[]).unwrap();
        assert_eq!(tris.len(), 6);
    }

    #[test]
    fn spatial_polygon_with_hole() {
        let boundary = vec![
            Point3::new(0.0, 0.0, 3.0),
            Point3::new(10.0, 0.0, 3.0),
            Point3::new(10.0, 10.0, 3.0),
            Point3::new(0.0, 10.0, 3.0),
        ];
        let hole = vec![
            Point3::new(3.0, 3.0, 3.0),
            Point3::new(7.0, 3.0, 3.0),
            Point3::new(7.0, 7.0, 3.0),
            Point3::new(3.0, 7.0, 3.0),
        ];
        let tris = triangulate_polygon(&boundary, &[hole]).unwrap();
        assert_eq!(tris.len() / 3, 8);
        assert!(tris.iter().all(|&i| i < 8));
    }

    #[test]
    fn too_small_boundary_is_an_error() {
        use crate::GeometryError;
        let boundary = vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        assert!(matches!(
            triangulate_polygon(&boundary, &[]),
            Err(GeometryError::InsufficientPoints(2))
        ));
    }

    #[test]
    fn polygon_normal_of_ccw_ring_points_up() {
        let ring = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let n = polygon_normal(&ring);
        assert!((n - Vector3::z()).norm() < 1e-9);
    }

    #[test]
    fn polygon_normal_skips_collinear_runs() {
        // Extra vertex in the middle of the bottom edge.
        let ring = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.5, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let n = polygon_normal(&ring);
        assert!((n - Vector3::z()).norm() < 1e-9);
    }
}
