use super::vertex::Vertex;

/// Builds the four-vertex strip for an axis-aligned rectangle.
///
/// Winding is fixed: bottom-left, top-left, bottom-right, top-right, with
/// the fourth vertex terminating the strip — two triangles sharing the
/// bottom-left/top-right diagonal. Callers draw thousands of these per
/// frame; any change to this order flips the facing of half the screen.
#[inline]
pub fn rect_strip(x: f32, y: f32, w: f32, h: f32, z: f32, argb: u32) -> [Vertex; 4] {
    [
        Vertex::strip(x, y + h, z, argb),
        Vertex::strip(x, y, z, argb),
        Vertex::strip(x + w, y + h, z, argb),
        Vertex::strip_end(x + w, y, z, argb),
    ]
}

/// Builds a four-vertex strip from explicit corners, terminated at the
/// fourth. Corner order is the caller's: strips interpret the four points
/// as two triangles `123` and `234`.
#[inline]
pub fn quad_strip(
    p1: (f32, f32),
    p2: (f32, f32),
    p3: (f32, f32),
    p4: (f32, f32),
    z: f32,
    argb: u32,
) -> [Vertex; 4] {
    [
        Vertex::strip(p1.0, p1.1, z, argb),
        Vertex::strip(p2.0, p2.1, z, argb),
        Vertex::strip(p3.0, p3.1, z, argb),
        Vertex::strip_end(p4.0, p4.1, z, argb),
    ]
}

/// Builds a single-triangle strip, terminated at the third vertex.
#[inline]
pub fn triangle_strip(
    p1: (f32, f32),
    p2: (f32, f32),
    p3: (f32, f32),
    z: f32,
    argb: u32,
) -> [Vertex; 3] {
    [
        Vertex::strip(p1.0, p1.1, z, argb),
        Vertex::strip(p2.0, p2.1, z, argb),
        Vertex::strip_end(p3.0, p3.1, z, argb),
    ]
}

/// True when `verts` is a well-formed strip: non-empty, terminated by its
/// final vertex, with no interior terminator.
pub(crate) fn is_well_formed(verts: &[Vertex]) -> bool {
    match verts.split_last() {
        None => false,
        Some((last, body)) => last.ends_strip() && !body.iter().any(Vertex::ends_strip),
    }
}
