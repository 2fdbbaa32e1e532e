use crate::error::RenderError;
use crate::grid::Grid;

/// Floating-point RGBA pixel, channels in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::gray(0.0);

    pub const fn gray(c: f32) -> Self {
        Self {
            r: c,
            g: c,
            b: c,
            a: 1.0,
        }
    }

    /// 8-bit channels for the terminal.
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        (q(self.r), q(self.g), q(self.b))
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Fixed-size pixel buffer the renderer paints into.
pub struct Surface {
    w: usize,
    h: usize,
    px: Vec<Rgba>,
}

impl Surface {
    pub fn new(width: usize, height: usize) -> Result<Self, RenderError> {
        let n = width
            .checked_mul(height)
            .filter(|n| n.checked_mul(std::mem::size_of::<Rgba>()).is_some())
            .ok_or(RenderError::TooLarge { width, height })?;
        Ok(Self {
            w: width,
            h: height,
            px: vec![Rgba::BLACK; n],
        })
    }

    /// One pixel per grid cell. A grid's size has already been checked.
    pub fn for_grid(grid: &Grid) -> Self {
        Self {
            w: grid.width(),
            h: grid.height(),
            px: vec![Rgba::BLACK; grid.len()],
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgba> {
        if x < self.w && y < self.h {
            Some(self.px[self.idx(x, y)])
        } else {
            None
        }
    }

    /// Out-of-range writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, p: Rgba) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.px[i] = p;
        }
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.px
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.px
    }

    pub fn clear(&mut self, p: Rgba) {
        self.px.fill(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_opaque_black() {
        let s = Surface::new(3, 2).unwrap();
        assert!(s.pixels().iter().all(|&p| p == Rgba::BLACK));
        assert_eq!(Rgba::BLACK.a, 1.0);
    }

    #[test]
    fn set_and_get_respect_bounds() {
        let mut s = Surface::new(3, 2).unwrap();
        s.set(2, 1, Rgba::gray(0.5));
        s.set(3, 0, Rgba::gray(1.0));
        assert_eq!(s.get(2, 1), Some(Rgba::gray(0.5)));
        assert_eq!(s.get(3, 0), None);
        assert_eq!(s.pixels().iter().filter(|p| p.r > 0.0).count(), 1);
    }

    #[test]
    fn rejects_overflowing_dimensions() {
        assert_eq!(
            Surface::new(usize::MAX, 2).err(),
            Some(RenderError::TooLarge {
                width: usize::MAX,
                height: 2
            })
        );
        assert!(Surface::new(usize::MAX / 8, 1).is_err());
        assert_eq!(Surface::new(0, 5).unwrap().pixels().len(), 0);
    }

    #[test]
    fn sized_from_grid() {
        let g = Grid::new(4, 3).unwrap();
        let s = Surface::for_grid(&g);
        assert_eq!((s.width(), s.height(), s.pixels().len()), (4, 3, 12));
    }

    #[test]
    fn quantizes_to_bytes() {
        assert_eq!(Rgba::gray(1.0).to_rgb8(), (255, 255, 255));
        assert_eq!(Rgba::gray(0.5).to_rgb8(), (128, 128, 128));
        assert_eq!(Rgba::gray(-2.0).to_rgb8(), (0, 0, 0));
    }
}
