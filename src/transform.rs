/// A 2D affine transformation.
///
/// Stored as the first two rows of a 3x3 matrix:
///
/// ```text
/// | a  b  tx |
/// | c  d  ty |
/// | 0  0  1  |
/// ```
///
/// Transforms compose parent→child while flattening the render tree and are
/// handed to the rasterizer as-is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Transform {
    /// Identity matrix (no transformation)
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            tx: x,
            ty: y,
            ..Self::IDENTITY
        }
    }

    /// Uniform scale around the origin
    pub fn scale(s: f32) -> Self {
        Self::scale_xy(s, s)
    }

    pub fn scale_xy(sx: f32, sy: f32) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        }
    }

    /// Uniform scale around an arbitrary pivot point.
    ///
    /// Equivalent to `translate(px, py) * scale(s) * translate(-px, -py)`.
    pub fn scale_about(s: f32, px: f32, py: f32) -> Self {
        Self {
            a: s,
            d: s,
            tx: px - s * px,
            ty: py - s * py,
            ..Self::IDENTITY
        }
    }

    /// Compose this transform with another: self * other
    /// Applies `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Transform {
        Transform {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            tx: self.a * other.tx + self.b * other.ty + self.tx,
            ty: self.c * other.tx + self.d * other.ty + self.ty,
        }
    }

    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.b * y + self.tx,
            self.c * x + self.d * y + self.ty,
        )
    }

    /// Translation component
    pub fn translation(&self) -> (f32, f32) {
        (self.tx, self.ty)
    }

    /// Scale factor along x, assuming no rotation or skew.
    pub fn uniform_scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Convert to the rasterizer's matrix type.
    pub fn to_skia(&self) -> resvg::tiny_skia::Transform {
        resvg::tiny_skia::Transform::from_row(self.a, self.c, self.b, self.d, self.tx, self.ty)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
