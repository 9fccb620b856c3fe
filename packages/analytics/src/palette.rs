//! Deterministic colors for causes and death-rate bands.

/// Categorical palette for causes.
pub const CAUSE_PALETTE: [&str; 20] = [
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
    "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
    "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

/// Upper bounds (exclusive) of the rate bands below the last one.
pub const RATE_THRESHOLDS: [f64; 6] = [0.001, 0.002, 0.005, 0.01, 0.02, 0.05];

/// Grey ramp, one color per rate band.
pub const RATE_RAMP: [&str; 7] = [
    "#f7f7f7", "#d9d9d9", "#bdbdbd", "#969696", "#737373", "#525252", "#252525",
];

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(s: &str) -> u64 {
    s.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Color for a cause label. The same label always gets the same color.
#[must_use]
pub fn cause_color(cause: &str) -> &'static str {
    #[allow(clippy::cast_possible_truncation)]
    let idx = (fnv1a(cause) % CAUSE_PALETTE.len() as u64) as usize;
    CAUSE_PALETTE[idx]
}

/// Band index for a death rate: the first threshold above `rate`, or 6.
#[must_use]
pub fn rate_band(rate: f64) -> u8 {
    let band = RATE_THRESHOLDS
        .iter()
        .position(|threshold| rate < *threshold)
        .unwrap_or(RATE_THRESHOLDS.len());
    u8::try_from(band).unwrap_or(u8::MAX)
}

/// Color of a rate band; out-of-range bands get the darkest step.
#[must_use]
pub fn rate_color(band: u8) -> &'static str {
    RATE_RAMP
        .get(usize::from(band))
        .copied()
        .unwrap_or(RATE_RAMP[RATE_RAMP.len() - 1])
}
