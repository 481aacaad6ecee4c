//! Common test fixtures for crossover tests.

use crate::generators::RawTrack;

/// Dataset IDs from distinct platforms.
pub mod ids {
    pub const RONALD_BROWN: &str = "33RO20030604";
    pub const PELICAN: &str = "49P120030601";
    pub const ATLANTIS: &str = "06AQ20030601";
    /// Same platform as [`RONALD_BROWN`].
    pub const RONALD_BROWN_LATER: &str = "33RO20040101";

    pub const PLATFORM_A: &str = "AAAA20100101";
    pub const PLATFORM_B: &str = "BBBB20100101";
    pub const SAME_PREFIX_1: &str = "ABCD20100101";
    pub const SAME_PREFIX_2: &str = "ABCD20100615";
}

/// Single usable row at (-70.0, 40.0).
pub fn single_row_a() -> RawTrack {
    RawTrack::new().row(-70.0, 40.0, 1000.0, 15.0, 380.0)
}

/// Single usable row about 1.4 km and 5 seconds from [`single_row_a`].
pub fn single_row_b() -> RawTrack {
    RawTrack::new().row(-70.01, 40.01, 1005.0, 15.05, 380.2)
}

/// [`single_row_b`] with an fCO2 50 uatm higher.
pub fn single_row_b_high_fco2() -> RawTrack {
    RawTrack::new().row(-70.01, 40.01, 1005.0, 15.05, 430.2)
}
