//! Cursor and position types for template fields.

/// A display position (line and column, both 0-indexed).
///
/// Editing works on char offsets; positions only exist for presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub const fn zero() -> Self {
        Self { line: 0, column: 0 }
    }
}

/// The insertion point, as a char offset into the template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
    pub offset: usize,
}

impl Cursor {
    pub const fn new(offset: usize) -> Self {
        Self { offset }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        let a = Position::new(0, 5);
        let b = Position::new(1, 0);
        let c = Position::new(1, 3);

        assert!(a < b);
        assert!(b < c);
        assert!(a < c);
    }
}
