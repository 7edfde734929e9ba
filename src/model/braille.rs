//! ASCII braille cells and six-key chord entry
//!
//! Documents store North American ASCII braille: one printable ASCII
//! character per six-dot cell. Dot `n` is bit `n - 1` of a cell's dot mask,
//! which is also the offset of the cell in the Unicode braille block.

/// ASCII braille character for every six-dot mask, indexed by the mask
const ASCII_BRAILLE: &[u8; 64] =
    b" A1B'K2L@CIF/MSP\"E3H9O6R^DJG>NTQ,*5<-U8V.%[$+X!&;:4\\0Z7(_?W]#Y)=";

/// First code point of the Unicode braille patterns block
const BRAILLE_BLOCK: u32 = 0x2800;

/// ASCII braille character for a six-dot mask
pub fn dots_to_ascii(dots: u8) -> char {
    ASCII_BRAILLE[(dots & 0x3f) as usize] as char
}

/// Six-dot mask of an ASCII braille character.
///
/// Lowercase letters and the 0x60..0x7e range share cells with their
/// uppercase counterparts.
pub fn ascii_to_dots(ch: char) -> Option<u8> {
    let ch = match ch {
        '\u{60}'..='\u{7e}' => char::from(ch as u8 - 0x20),
        _ => ch,
    };
    ASCII_BRAILLE
        .iter()
        .position(|&c| c as char == ch)
        .map(|index| index as u8)
}

/// Unicode braille cell for an ASCII braille character, other characters
/// pass through unchanged
pub fn ascii_to_unicode(ch: char) -> char {
    ascii_to_dots(ch)
        .and_then(|dots| char::from_u32(BRAILLE_BLOCK + dots as u32))
        .unwrap_or(ch)
}

/// ASCII braille character for a six-dot Unicode braille cell, other
/// characters pass through unchanged
pub fn unicode_to_ascii(ch: char) -> char {
    match (ch as u32).checked_sub(BRAILLE_BLOCK) {
        Some(dots) if dots < 64 => dots_to_ascii(dots as u8),
        _ => ch,
    }
}

/// Dot contributed by each key of a Perkins-style keyboard layout
fn key_dot(key: char) -> Option<u8> {
    match key {
        'f' => Some(0x01),
        'd' => Some(0x02),
        's' => Some(0x04),
        'j' => Some(0x08),
        'k' => Some(0x10),
        'l' => Some(0x20),
        _ => None,
    }
}

/// Chord state of six-key braille entry.
///
/// Keys pressed together form one cell; the cell is emitted once every key
/// has been released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChordEntry {
    held: u8,
    dots: u8,
}

impl ChordEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` takes part in chord entry
    pub fn is_chord_key(key: char) -> bool {
        key_dot(key).is_some()
    }

    /// A key went down. Returns whether the key was consumed.
    pub fn press(&mut self, key: char) -> bool {
        let Some(dot) = key_dot(key) else {
            return false;
        };
        self.held |= dot;
        self.dots |= dot;
        true
    }

    /// A key came up. Returns the finished cell once no keys are held.
    pub fn release(&mut self, key: char) -> Option<char> {
        if let Some(dot) = key_dot(key) {
            self.held &= !dot;
        }
        self.finish()
    }

    /// Treat every key as released, for platforms that do not report each
    /// release reliably
    pub fn release_all(&mut self) -> Option<char> {
        self.held = 0;
        self.finish()
    }

    fn finish(&mut self) -> Option<char> {
        if self.held != 0 || self.dots == 0 {
            return None;
        }
        let ch = dots_to_ascii(self.dots);
        self.dots = 0;
        Some(ch)
    }
}
