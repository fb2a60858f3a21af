//! Index triangle into the shared vertex sequence.

/// Three vertex indices. Winding is inherited from the base icosahedron and
/// preserved by every subdivision step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl Triangle {
    #[inline]
    #[must_use]
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    /// The indices in winding order.
    #[inline]
    #[must_use]
    pub const fn indices(&self) -> [u32; 3] {
        [self.a, self.b, self.c]
    }
}
