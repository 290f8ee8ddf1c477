pub const SEGMENTS_PER_DIGIT: usize = 8;
pub const POINT_INDEX: usize = 3;
pub const POINT_MASK: u8 = 1 << POINT_INDEX;
pub const POINT: char = '.';

// bit n drives segment index n, the point sits on bit 3
//
//    index 76543210
pub const GLYPHS: [(char, u8); 16] = [
    (' ', 0b00000000),
    ('0', 0b01110111),
    ('1', 0b00010001),
    ('2', 0b10110110),
    ('3', 0b10110011),
    ('4', 0b11010001),
    ('5', 0b11100011),
    ('6', 0b11100111),
    ('7', 0b00110001),
    ('8', 0b11110111),
    ('9', 0b11110011),
    ('.', 0b00001000),
    ('P', 0b11110100),
    ('A', 0b11110101),
    ('B', 0b11110111),
    ('C', 0b01100110),
];

/// Segment pattern for one digit slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph(pub u8);

impl Glyph {
    pub const BLANK: Glyph = Glyph(0);

    /// Resolves a character against [`GLYPHS`].
    pub fn lookup(c: char) -> Result<Self, UnsupportedChar> {
        GLYPHS
            .iter()
            .find(|(key, _)| *key == c)
            .map(|(_, bits)| Glyph(*bits))
            .ok_or(UnsupportedChar(c))
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Copy of this glyph with the decimal point lit. The table entry is untouched.
    pub const fn with_point(self) -> Self {
        Glyph(self.0 | POINT_MASK)
    }

    pub const fn has_point(self) -> bool {
        self.0 & POINT_MASK != 0
    }

    pub const fn segment(self, index: usize) -> bool {
        index < SEGMENTS_PER_DIGIT && (self.0 >> index) & 1 != 0
    }

    pub fn segments(self) -> [bool; SEGMENTS_PER_DIGIT] {
        let mut segments = [false; SEGMENTS_PER_DIGIT];
        for (i, s) in segments.iter_mut().enumerate() {
            *s = self.segment(i);
        }
        segments
    }

    pub fn from_segments(segments: [bool; SEGMENTS_PER_DIGIT]) -> Self {
        let bits = segments
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, on)| if *on { acc | 1 << i } else { acc });
        Glyph(bits)
    }
}

/// A character with no entry in the glyph table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnsupportedChar(pub char);
