//! Speed-distribution statistics for comparing a running gas against
//! [`ParticleSystem::theory`](crate::core::ParticleSystem::theory).

use crate::error::{Error, Result};
use ndarray::Array1;

/// `num` evenly spaced samples over `[start, stop]`, both ends included.
///
/// Built on [`Array1::linspace`]; the last sample is pinned to `stop` exactly, since
/// `start + step * (num - 1)` can round past it. `num == 1` yields `[start]`; `num == 0`
/// yields an empty vector.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let mut xs = Array1::linspace(start, stop, num).to_vec();
            xs[num - 1] = stop;
            xs
        }
    }
}

fn check_edges(edges: &[f64]) -> Result<()> {
    if edges.len() < 2 {
        return Err(Error::InvalidParam(
            "histogram needs at least two edges".into(),
        ));
    }
    if !edges.iter().all(|e| e.is_finite()) {
        return Err(Error::InvalidParam("histogram edges must be finite".into()));
    }
    if edges.windows(2).any(|w| w[1] <= w[0]) {
        return Err(Error::InvalidParam(
            "histogram edges must be strictly increasing".into(),
        ));
    }
    Ok(())
}

/// Density-normalized histogram of `speeds` over `edges`.
///
/// Bins are `[e_k, e_{k+1})` except the last, which also includes its right edge.
/// Samples outside `[e_0, e_last]` (and NaNs) are dropped. Each count is divided by
/// `in_range_total * bin_width`, so the result integrates to 1 whenever any sample
/// lands in range; otherwise every bin is 0.
///
/// Errors: `Error::InvalidParam` if `edges` has fewer than two entries, is not
/// strictly increasing, or contains non-finite values.
pub fn speed_histogram<I>(speeds: I, edges: &[f64]) -> Result<Vec<f64>>
where
    I: IntoIterator<Item = f64>,
{
    check_edges(edges)?;
    let bins = edges.len() - 1;
    let (lo, hi) = (edges[0], edges[bins]);
    let mut counts = vec![0usize; bins];
    let mut total = 0usize;

    for s in speeds {
        if !(lo..=hi).contains(&s) {
            continue;
        }
        // First edge strictly greater than s, minus one.
        let k = edges.partition_point(|&e| e <= s).saturating_sub(1).min(bins - 1);
        counts[k] += 1;
        total += 1;
    }

    if total == 0 {
        return Ok(vec![0.0; bins]);
    }
    Ok(counts
        .iter()
        .zip(edges.windows(2))
        .map(|(&c, w)| c as f64 / (total as f64 * (w[1] - w[0])))
        .collect())
}

/// Frame-averaged speed density over fixed bins.
///
/// Each [`record`](SpeedDistribution::record) adds one frame's density histogram; the
/// average converges to the equilibrium speed distribution once the gas has thermalized.
#[derive(Debug, Clone)]
pub struct SpeedDistribution {
    edges: Vec<f64>,
    cumulative: Vec<f64>,
    frames: usize,
}

impl SpeedDistribution {
    /// Empty accumulator over `edges` (validated as in [`speed_histogram`]).
    pub fn new(edges: Vec<f64>) -> Result<Self> {
        check_edges(&edges)?;
        let bins = edges.len() - 1;
        Ok(Self {
            edges,
            cumulative: vec![0.0; bins],
            frames: 0,
        })
    }

    /// `bins` equal-width bins over `[lo, hi]`.
    pub fn uniform(lo: f64, hi: f64, bins: usize) -> Result<Self> {
        if bins == 0 {
            return Err(Error::InvalidParam("bins must be > 0".into()));
        }
        Self::new(linspace(lo, hi, bins + 1))
    }

    /// Add one frame of speeds.
    pub fn record<I>(&mut self, speeds: I) -> Result<()>
    where
        I: IntoIterator<Item = f64>,
    {
        let h = speed_histogram(speeds, &self.edges)?;
        for (acc, x) in self.cumulative.iter_mut().zip(h) {
            *acc += x;
        }
        self.frames += 1;
        Ok(())
    }

    /// Mean density per bin over all recorded frames; zeros before the first frame.
    pub fn average(&self) -> Vec<f64> {
        if self.frames == 0 {
            return vec![0.0; self.cumulative.len()];
        }
        let n = self.frames as f64;
        self.cumulative.iter().map(|c| c / n).collect()
    }

    /// Bin midpoints.
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn frames(&self) -> usize {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_endpoints() {
        let xs = linspace(0.0, 10.0, 100);
        assert_eq!(xs.len(), 100);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[99], 10.0);
        assert!((xs[1] - 10.0 / 99.0).abs() < 1e-15);
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert!(linspace(2.0, 3.0, 0).is_empty());
    }

    #[test]
    fn linspace_last_sample_is_exact() {
        for num in [2usize, 3, 7, 26, 99, 100, 1001] {
            let xs = linspace(0.1, 0.7, num);
            assert_eq!(xs.len(), num);
            assert_eq!(xs[0], 0.1);
            assert_eq!(xs[num - 1], 0.7);
            assert!(xs.windows(2).all(|w| w[1] > w[0]));
        }
    }

    #[test]
    fn histogram_integrates_to_one() -> Result<()> {
        let edges = linspace(0.0, 5.0, 32);
        let speeds = (0..1000).map(|k| (k as f64) * 0.004);
        let h = speed_histogram(speeds, &edges)?;
        assert_eq!(h.len(), 31);
        let integral: f64 = h
            .iter()
            .zip(edges.windows(2))
            .map(|(d, w)| d * (w[1] - w[0]))
            .sum();
        assert!((integral - 1.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn histogram_bin_boundaries() -> Result<()> {
        let edges = [0.0, 1.0, 2.0];
        // 1.0 goes right, 2.0 lands in the closed last bin, 2.5 and NaN are dropped.
        let h = speed_histogram([0.5, 1.0, 2.0, 2.5, f64::NAN], &edges)?;
        assert_eq!(h, vec![1.0 / 3.0, 2.0 / 3.0]);
        Ok(())
    }

    #[test]
    fn histogram_all_out_of_range_is_zero() -> Result<()> {
        let h = speed_histogram([7.0, 8.0], &[0.0, 1.0, 2.0])?;
        assert_eq!(h, vec![0.0, 0.0]);
        Ok(())
    }

    #[test]
    fn histogram_rejects_bad_edges() {
        assert!(speed_histogram([1.0], &[0.0]).is_err());
        assert!(speed_histogram([1.0], &[0.0, 0.0]).is_err());
        assert!(speed_histogram([1.0], &[0.0, f64::INFINITY]).is_err());
    }

    #[test]
    fn distribution_averages_frames() -> Result<()> {
        let mut dist = SpeedDistribution::uniform(0.0, 2.0, 2)?;
        assert_eq!(dist.average(), vec![0.0, 0.0]);
        dist.record([0.5, 0.5])?;
        dist.record([1.5, 1.5])?;
        assert_eq!(dist.frames(), 2);
        assert_eq!(dist.average(), vec![0.5, 0.5]);
        assert_eq!(dist.centers(), vec![0.5, 1.5]);
        assert_eq!(dist.edges(), &[0.0, 1.0, 2.0]);
        Ok(())
    }
}
