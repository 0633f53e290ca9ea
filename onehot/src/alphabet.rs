//! The six symbol classes and the byte classifier.

use std::fmt;

/// Number of symbol classes, i.e. the width of a one-hot row.
pub const NUM_CLASSES: usize = 6;

/// Column order of the one-hot encoding, `*` standing for any other symbol.
pub const CLASS_ORDER: &str = "ATGCN*";

/// A symbol class. The discriminant is the column of the class in a one-hot row.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum Base {
    A = 0,
    T = 1,
    G = 2,
    C = 3,
    N = 4,
    Other = 5,
}

impl Base {
    pub const ALL: [Base; NUM_CLASSES] = [Self::A, Self::T, Self::G, Self::C, Self::N, Self::Other];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline(always)]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < NUM_CLASSES {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    #[inline(always)]
    pub const fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::T => 'T',
            Self::G => 'G',
            Self::C => 'C',
            Self::N => 'N',
            Self::Other => '*',
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

const fn build_lut() -> [Base; 256] {
    let mut lut = [Base::Other; 256];
    let symbols = *b"ATGCN";
    let mut i = 0;
    while i < symbols.len() {
        let class = Base::ALL[i];
        lut[symbols[i] as usize] = class;
        lut[symbols[i].to_ascii_lowercase() as usize] = class;
        i += 1;
    }
    lut
}

static CLASS_LUT: [Base; 256] = build_lut();

/// Classify a single byte. Total: every byte outside `ATGCNatgcn` is [`Base::Other`].
#[inline(always)]
pub fn classify(symbol: u8) -> Base {
    CLASS_LUT[symbol as usize]
}

/// Per-class symbol counts, indexed like the columns of a one-hot row.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct ClassCounts(pub [usize; NUM_CLASSES]);

impl ClassCounts {
    #[inline(always)]
    pub const fn new() -> Self {
        Self([0; NUM_CLASSES])
    }

    pub fn from_sequence(seq: &[u8]) -> Self {
        let mut counts = Self::new();
        for &x in seq {
            counts.0[classify(x).index()] += 1;
        }
        counts
    }

    #[inline(always)]
    pub fn get(&self, class: Base) -> usize {
        self.0[class.index()]
    }

    #[inline(always)]
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    #[inline(always)]
    pub fn clear(&mut self) {
        self.0 = [0; NUM_CLASSES];
    }
}

impl fmt::Display for ClassCounts {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, class) in Base::ALL.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}={}", class, self.0[i])?;
        }
        Ok(())
    }
}
