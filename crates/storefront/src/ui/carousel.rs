//! Circular step carousel.
//!
//! Drives the preorder "how it works" steps: a current index over a fixed
//! number of slides with wraparound prev/next and direct dot navigation.

/// A circular index over a fixed number of slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    current: usize,
}

impl Carousel {
    /// Create a carousel positioned on a slide.
    ///
    /// Out-of-range positions clamp to slide 0; an empty carousel stays
    /// permanently on 0.
    #[must_use]
    pub const fn new(len: usize, current: usize) -> Self {
        let current = if current < len { current } else { 0 };
        Self { len, current }
    }

    /// The active slide index.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Number of slides.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The index after the current one, wrapping past the last slide.
    #[must_use]
    pub const fn next(&self) -> usize {
        if self.len == 0 {
            return 0;
        }
        (self.current + 1) % self.len
    }

    /// The index before the current one, wrapping below slide 0.
    #[must_use]
    pub const fn prev(&self) -> usize {
        if self.len == 0 {
            return 0;
        }
        (self.current + self.len - 1) % self.len
    }

    /// Whether a dot index is the active one.
    #[must_use]
    pub const fn is_active(&self, index: usize) -> bool {
        index == self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraparound() {
        let first = Carousel::new(4, 0);
        assert_eq!(first.prev(), 3);
        assert_eq!(first.next(), 1);

        let last = Carousel::new(4, 3);
        assert_eq!(last.next(), 0);
        assert_eq!(last.prev(), 2);
    }

    #[test]
    fn test_out_of_range_position_clamps() {
        let carousel = Carousel::new(4, 9);
        assert_eq!(carousel.current(), 0);
    }

    #[test]
    fn test_empty_carousel() {
        let carousel = Carousel::new(0, 0);
        assert!(carousel.is_empty());
        assert_eq!(carousel.next(), 0);
        assert_eq!(carousel.prev(), 0);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let mut carousel = Carousel::new(5, 2);
        for _ in 0..5 {
            carousel = Carousel::new(5, carousel.next());
        }
        assert_eq!(carousel.current(), 2);
    }
}
