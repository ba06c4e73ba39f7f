use crate::device::DeviceSink;
use crate::error::SubmitError;
use crate::wire::{quad_strip, rect_strip, triangle_strip};

use super::renderer::Renderer;

impl<D: DeviceSink> Renderer<D> {
    /// Submits an axis-aligned rectangle into the open list as one
    /// two-triangle strip.
    pub fn rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        z: f32,
        argb: u32,
    ) -> Result<(), SubmitError> {
        for v in rect_strip(x, y, w, h, z, argb) {
            self.submit_vertex(&v)?;
        }
        Ok(())
    }

    /// Submits a single triangle into the open list.
    pub fn triangle(
        &mut self,
        p1: (f32, f32),
        p2: (f32, f32),
        p3: (f32, f32),
        z: f32,
        argb: u32,
    ) -> Result<(), SubmitError> {
        for v in triangle_strip(p1, p2, p3, z, argb) {
            self.submit_vertex(&v)?;
        }
        Ok(())
    }

    /// Submits a quad with caller-ordered corners into the open list.
    #[allow(clippy::too_many_arguments)]
    pub fn quad(
        &mut self,
        p1: (f32, f32),
        p2: (f32, f32),
        p3: (f32, f32),
        p4: (f32, f32),
        z: f32,
        argb: u32,
    ) -> Result<(), SubmitError> {
        for v in quad_strip(p1, p2, p3, p4, z, argb) {
            self.submit_vertex(&v)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::device::SoftSink;
    use crate::error::SubmitError;
    use crate::scene::{ListKind, Renderer};
    use crate::wire::Vertex;

    #[test]
    fn rect_submits_four_vertices_into_the_open_list() {
        let mut r = Renderer::with_defaults(SoftSink::new());
        r.begin_scene().unwrap();
        r.begin_list(ListKind::OpaquePoly).unwrap();
        r.rect(0.0, 0.0, 10.0, 20.0, 5.0, 0xFFFF_FFFF).unwrap();
        r.end_list().unwrap();
        r.finish_scene().unwrap();

        let bursts = r.device().frame_bursts(0);
        assert_eq!(bursts.len(), 4);
        let first: &Vertex = bytemuck::cast_ref(&bursts[0]);
        assert_eq!((first.x, first.y), (0.0, 20.0));
        let last: &Vertex = bytemuck::cast_ref(&bursts[3]);
        assert!(last.ends_strip());
    }

    #[test]
    fn rect_outside_a_list_fails() {
        let mut r = Renderer::with_defaults(SoftSink::new());
        r.begin_scene().unwrap();
        assert_eq!(
            r.rect(0.0, 0.0, 1.0, 1.0, 1.0, 0),
            Err(SubmitError::NotInList)
        );
    }

    #[test]
    fn helpers_leave_no_strip_open() {
        let mut r = Renderer::with_defaults(SoftSink::new());
        r.begin_scene().unwrap();
        r.begin_list(ListKind::TransPoly).unwrap();
        r.triangle((0.0, 0.0), (1.0, 0.0), (0.0, 1.0), 1.0, 0).unwrap();
        // A terminated strip lets the list close immediately.
        r.end_list().unwrap();
    }
}
