/// Vertical write position shared by every drawing routine
///
/// `y` is the top of the next block, measured from the top edge of `page`
/// (1-indexed, as in `pdf-core`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub y: f64,
    pub page: usize,
}

impl Cursor {
    pub fn new(top: f64) -> Self {
        Self { y: top, page: 1 }
    }

    pub fn advance(&mut self, dy: f64) {
        self.y += dy;
    }

    /// Whether `height` more points fit above `bottom`
    pub fn fits(&self, height: f64, bottom: f64) -> bool {
        self.y + height <= bottom
    }

    /// Move to the top of `page`
    pub fn reset_to(&mut self, page: usize, top: f64) {
        self.page = page;
        self.y = top;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_and_advance() {
        let mut cursor = Cursor::new(50.0);
        assert!(cursor.fits(100.0, 150.0));
        cursor.advance(60.0);
        assert!(!cursor.fits(50.0, 150.0));
        cursor.reset_to(2, 50.0);
        assert_eq!(cursor, Cursor { y: 50.0, page: 2 });
    }
}
