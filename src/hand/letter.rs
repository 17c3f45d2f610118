use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// The 24 letters of the manual alphabet that hold a static hand shape.
/// J and Z are signed with motion and cannot be recognized from a single
/// frame, so they are not part of the enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[rustfmt::skip]
pub enum Letter {
    A, B, C, D, E, F, G, H, I, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y,
}

#[rustfmt::skip]
const CHARS: [char; 24] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'K', 'L', 'M',
    'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y',
];

impl Letter {
    #[rustfmt::skip]
    pub const ALL: [Letter; 24] = [
        Letter::A, Letter::B, Letter::C, Letter::D, Letter::E, Letter::F,
        Letter::G, Letter::H, Letter::I, Letter::K, Letter::L, Letter::M,
        Letter::N, Letter::O, Letter::P, Letter::Q, Letter::R, Letter::S,
        Letter::T, Letter::U, Letter::V, Letter::W, Letter::X, Letter::Y,
    ];

    /// Pick a uniformly random letter.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Letter {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn as_char(self) -> char {
        CHARS[self as usize]
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Error returned when a string does not name a recognizable letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownLetter;

impl FromStr for Letter {
    type Err = UnknownLetter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let c = chars.next().ok_or(UnknownLetter)?;
        if chars.next().is_some() {
            return Err(UnknownLetter);
        }
        let c = c.to_ascii_uppercase();
        CHARS
            .iter()
            .position(|&known| known == c)
            .map(|i| Letter::ALL[i])
            .ok_or(UnknownLetter)
    }
}
