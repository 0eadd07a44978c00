use glam::{Vec2, Vec3};

/// Linear RGB image produced by the CPU renderer and consumed by the CPU post
/// filters. Row 0 is the top of the image.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<Vec3>,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Vec3::ZERO)
    }

    pub fn filled(width: u32, height: u32, color: Vec3) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![color; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Vec3] {
        &self.pixels
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Vec3 {
        self.pixels[(y * self.width + x) as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Vec3) {
        let i = (y * self.width + x) as usize;
        self.pixels[i] = color;
    }

    /// Pixel lookup with edge clamping.
    #[inline]
    pub fn get_clamped(&self, x: i64, y: i64) -> Vec3 {
        let x = x.clamp(0, self.width as i64 - 1) as u32;
        let y = y.clamp(0, self.height as i64 - 1) as u32;
        self.get(x, y)
    }

    /// Bilinear sample at a `[0, 1]` uv with y up, clamped to the edges.
    pub fn sample(&self, uv: Vec2) -> Vec3 {
        let fx = uv.x * self.width as f32 - 0.5;
        let fy = (1.0 - uv.y) * self.height as f32 - 0.5;
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = fx - x0;
        let ty = fy - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);
        let top = self.get_clamped(x0, y0).lerp(self.get_clamped(x0 + 1, y0), tx);
        let bottom = self
            .get_clamped(x0, y0 + 1)
            .lerp(self.get_clamped(x0 + 1, y0 + 1), tx);
        top.lerp(bottom, ty)
    }

    /// uv of the centre of pixel `(x, y)`, y up.
    #[inline]
    pub fn uv_of(&self, x: u32, y: u32) -> Vec2 {
        Vec2::new(
            (x as f32 + 0.5) / self.width as f32,
            1.0 - (y as f32 + 0.5) / self.height as f32,
        )
    }

    /// Build a frame by evaluating `f` at every pixel centre.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(Vec2) -> Vec3) -> Self {
        let mut frame = Self::new(width, height);
        for y in 0..frame.height {
            for x in 0..frame.width {
                let uv = frame.uv_of(x, y);
                frame.set(x, y, f(uv));
            }
        }
        frame
    }

    /// Map every pixel through `f`.
    pub fn map(&self, mut f: impl FnMut(Vec2, Vec3) -> Vec3) -> Self {
        let mut out = self.clone();
        for y in 0..self.height {
            for x in 0..self.width {
                let uv = self.uv_of(x, y);
                out.set(x, y, f(uv, self.get(x, y)));
            }
        }
        out
    }

    /// Binary PPM (P6) with each channel clamped to \[0, 1\].
    pub fn to_ppm(&self) -> Vec<u8> {
        let mut out = format!("P6\n{} {}\n255\n", self.width, self.height).into_bytes();
        out.reserve(self.pixels.len() * 3);
        for p in &self.pixels {
            let c = p.clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
            out.extend_from_slice(&[c.x.round() as u8, c.y.round() as u8, c.z.round() as u8]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_a_flat_frame_returns_its_colour() {
        let f = Frame::filled(8, 4, Vec3::new(0.2, 0.4, 0.6));
        let s = f.sample(Vec2::new(0.13, 0.87));
        assert!((s - Vec3::new(0.2, 0.4, 0.6)).length() < 1e-6);
    }

    #[test]
    fn uv_of_is_y_up() {
        let f = Frame::new(2, 2);
        assert!(f.uv_of(0, 0).y > 0.5);
        assert!(f.uv_of(0, 1).y < 0.5);
    }

    #[test]
    fn ppm_header_and_size() {
        let f = Frame::filled(3, 2, Vec3::ONE);
        let ppm = f.to_ppm();
        assert!(ppm.starts_with(b"P6\n3 2\n255\n"));
        assert_eq!(ppm.len(), b"P6\n3 2\n255\n".len() + 3 * 2 * 3);
    }
}
