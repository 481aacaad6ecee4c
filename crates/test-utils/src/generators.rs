//! Generators for synthetic cruise tracks.
//!
//! Tracks are produced as raw columns, the way they come out of a data file,
//! with [`MISSING`] marking absent values. Tests convert them with
//! `Track::from_raw`.

/// Sentinel written to data files for a missing value.
pub const MISSING: f64 = -1.0e34;

/// Seconds in one day.
pub const DAY: f64 = 86_400.0;

/// Which column of a row to blank out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Lon,
    Lat,
    Time,
    Sst,
    Fco2,
}

impl Field {
    pub const ALL: [Field; 5] = [Field::Lon, Field::Lat, Field::Time, Field::Sst, Field::Fco2];
}

/// The five raw columns of a cruise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTrack {
    pub lons: Vec<f64>,
    pub lats: Vec<f64>,
    pub times: Vec<f64>,
    pub ssts: Vec<f64>,
    pub fco2s: Vec<f64>,
}

impl RawTrack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lons.is_empty()
    }

    pub fn push(&mut self, lon: f64, lat: f64, time: f64, sst: f64, fco2: f64) {
        self.lons.push(lon);
        self.lats.push(lat);
        self.times.push(time);
        self.ssts.push(sst);
        self.fco2s.push(fco2);
    }

    /// Builder-style [`RawTrack::push`].
    pub fn row(mut self, lon: f64, lat: f64, time: f64, sst: f64, fco2: f64) -> Self {
        self.push(lon, lat, time, sst, fco2);
        self
    }

    /// Replace one value with [`MISSING`].
    pub fn with_missing(mut self, row: usize, field: Field) -> Self {
        let column = match field {
            Field::Lon => &mut self.lons,
            Field::Lat => &mut self.lats,
            Field::Time => &mut self.times,
            Field::Sst => &mut self.ssts,
            Field::Fco2 => &mut self.fco2s,
        };
        column[row] = MISSING;
        self
    }

    /// The same rows in reverse order.
    pub fn reversed(&self) -> Self {
        let rev = |v: &Vec<f64>| v.iter().rev().copied().collect();
        Self {
            lons: rev(&self.lons),
            lats: rev(&self.lats),
            times: rev(&self.times),
            ssts: rev(&self.ssts),
            fco2s: rev(&self.fco2s),
        }
    }
}

/// A cruise steaming in a straight line (in degrees) between two positions.
///
/// Samples are `step_secs` apart starting at `start_time`; SST and fCO2 vary
/// linearly between the given start and end values.
pub fn straight_track(
    start: (f64, f64),
    end: (f64, f64),
    start_time: f64,
    step_secs: f64,
    num_rows: usize,
    sst: (f64, f64),
    fco2: (f64, f64),
) -> RawTrack {
    let mut track = RawTrack::new();
    let denom = (num_rows.max(2) - 1) as f64;
    for i in 0..num_rows {
        let f = i as f64 / denom;
        track.push(
            start.0 + (end.0 - start.0) * f,
            start.1 + (end.1 - start.1) * f,
            start_time + step_secs * i as f64,
            sst.0 + (sst.1 - sst.0) * f,
            fco2.0 + (fco2.1 - fco2.0) * f,
        );
    }
    track
}

/// Two cruises crossing near (-70.0, 40.0) about half a day apart.
///
/// The first steams east along 40N, the second north along 70W, with
/// matching SST and fCO2 near the crossing point.
pub fn crossing_pair(num_rows: usize) -> (RawTrack, RawTrack) {
    let eastward = straight_track(
        (-71.0, 40.0),
        (-69.0, 40.0),
        0.0,
        2.0 * DAY / num_rows as f64,
        num_rows,
        (15.0, 15.2),
        (380.0, 382.0),
    );
    let northward = straight_track(
        (-70.0, 39.0),
        (-70.0, 41.0),
        0.5 * DAY,
        2.0 * DAY / num_rows as f64,
        num_rows,
        (15.0, 15.2),
        (380.0, 382.0),
    );
    (eastward, northward)
}

/// Deterministic pseudo-random generator (64-bit LCG).
#[derive(Debug, Clone)]
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(6364136223846793005).wrapping_add(1))
    }

    /// Next value uniformly in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Next value uniformly in [lo, hi).
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// A wandering cruise in a small box with chronological, irregular times.
///
/// Values are kept close enough together that many row pairs between two
/// such tracks pass every crossover threshold. About one row in ten has a
/// missing value somewhere.
pub fn random_walk_track(seed: u64, num_rows: usize) -> RawTrack {
    let mut rng = Lcg::new(seed);
    let mut track = RawTrack::new();
    let mut time = rng.range(0.0, DAY);
    for _ in 0..num_rows {
        time += rng.range(60.0, 4.0 * 3600.0);
        let lon = rng.range(-70.5, -69.5);
        let lat = rng.range(39.5, 40.5);
        let sst = rng.range(15.0, 15.4);
        let fco2 = rng.range(378.0, 386.0);
        track.push(lon, lat, time, sst, fco2);
    }
    let mut rows_to_blank = Vec::new();
    for row in 0..num_rows {
        if rng.next_f64() < 0.1 {
            let field = Field::ALL[(rng.next_f64() * 5.0) as usize % 5];
            rows_to_blank.push((row, field));
        }
    }
    for (row, field) in rows_to_blank {
        track = track.with_missing(row, field);
    }
    track
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_track_endpoints() {
        let track = straight_track((0.0, 0.0), (1.0, 2.0), 100.0, 60.0, 3, (10.0, 12.0), (300.0, 300.0));
        assert_eq!(track.len(), 3);
        assert_eq!(track.lons, vec![0.0, 0.5, 1.0]);
        assert_eq!(track.lats, vec![0.0, 1.0, 2.0]);
        assert_eq!(track.times, vec![100.0, 160.0, 220.0]);
        assert_eq!(track.ssts[1], 11.0);
    }

    #[test]
    fn test_random_walk_is_deterministic_and_chronological() {
        let a = random_walk_track(7, 200);
        let b = random_walk_track(7, 200);
        assert_eq!(a, b);
        let times: Vec<f64> = a.times.iter().copied().filter(|t| *t != MISSING).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_with_missing() {
        let track = RawTrack::new().row(1.0, 2.0, 3.0, 4.0, 5.0).with_missing(0, Field::Sst);
        assert_eq!(track.ssts[0], MISSING);
        assert_eq!(track.fco2s[0], 5.0);
    }

    #[test]
    fn test_reversed() {
        let track = RawTrack::new().row(1.0, 0.0, 0.0, 0.0, 0.0).row(2.0, 0.0, 1.0, 0.0, 0.0);
        assert_eq!(track.reversed().lons, vec![2.0, 1.0]);
    }
}
