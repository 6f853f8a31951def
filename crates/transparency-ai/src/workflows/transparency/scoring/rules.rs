/// Points awarded once a non-blank value is strictly longer than `longer_than`
/// characters. Tables are ordered from the longest threshold down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthTier {
    pub longer_than: usize,
    pub points: u32,
}

const fn tier(longer_than: usize, points: u32) -> LengthTier {
    LengthTier {
        longer_than,
        points,
    }
}

/// Slot size for each of the seven scored base fields.
pub const BASE_FIELD_WEIGHT: u32 = 10;

pub const BASE_FIELD_TIERS: &[LengthTier] =
    &[tier(100, 10), tier(50, 8), tier(20, 6), tier(0, 3)];

/// Certifications earn a flat bonus out of a slot that always counts.
pub const CERTIFICATION_WEIGHT: u32 = 15;
pub const CERTIFICATION_MIN_LENGTH: usize = 50;

/// Slot size for each answered dynamic question.
pub const DYNAMIC_ANSWER_WEIGHT: u32 = 5;

pub const DYNAMIC_ANSWER_TIERS: &[LengthTier] = &[tier(50, 5), tier(20, 3), tier(0, 1)];

/// Character count of a non-blank value, surrounding whitespace included.
/// Whitespace-only values measure zero.
pub fn substantive_length(value: &str) -> usize {
    if value.trim().is_empty() {
        0
    } else {
        value.chars().count()
    }
}

pub fn tier_points(value: &str, tiers: &[LengthTier]) -> u32 {
    let length = substantive_length(value);
    tiers
        .iter()
        .find(|tier| length > tier.longer_than)
        .map(|tier| tier.points)
        .unwrap_or(0)
}

pub fn certification_points(value: &str) -> u32 {
    if substantive_length(value) > CERTIFICATION_MIN_LENGTH {
        CERTIFICATION_WEIGHT
    } else {
        0
    }
}

/// `round(100 * raw / max)` with halves rounded up, clamped to 0..=100.
/// A zero ceiling scores zero.
pub fn percentage(raw_points: u32, max_points: u32) -> u8 {
    if max_points == 0 {
        return 0;
    }
    let raw = u64::from(raw_points);
    let max = u64::from(max_points);
    let rounded = (200 * raw + max) / (2 * max);
    rounded.min(100) as u8
}
