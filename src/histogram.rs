use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Uniform binning of an interval with underflow and overflow bins
#[derive(Deserialize, Serialize, Copy, Clone, Debug, PartialEq)]
pub struct Axis {
    pub nbins: usize,
    pub min: f64,
    pub max: f64,
}

impl Axis {
    pub const fn new(nbins: usize, min: f64, max: f64) -> Self {
        Self { nbins, min, max }
    }

    /// Bin index, with `0` the underflow and `nbins + 1` the overflow bin
    ///
    /// NaN ends up in the underflow.
    pub fn bin(&self, x: f64) -> usize {
        if !(x >= self.min) {
            return 0;
        }
        if x >= self.max {
            return self.nbins + 1;
        }
        let width = (self.max - self.min) / self.nbins as f64;
        let idx = ((x - self.min) / width) as usize;
        // guard against rounding at the upper edge
        1 + idx.min(self.nbins - 1)
    }

    /// Number of bins including underflow and overflow
    fn len(&self) -> usize {
        self.nbins + 2
    }
}

/// One-dimensional histogram of event counts
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Hist1D {
    pub axis: Axis,
    pub counts: Vec<u64>,
}

impl Hist1D {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            counts: vec![0; axis.len()],
        }
    }

    pub fn fill(&mut self, x: f64) {
        self.counts[self.axis.bin(x)] += 1;
    }

    /// Count in bin `idx`, see [Axis::bin]
    pub fn count(&self, idx: usize) -> u64 {
        self.counts[idx]
    }

    /// Total number of entries including underflow and overflow
    pub fn entries(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Three-dimensional histogram of counts
///
/// Only filled bins are stored.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Hist3D {
    pub axes: [Axis; 3],
    #[serde(with = "sparse")]
    counts: BTreeMap<[usize; 3], u64>,
}

impl Hist3D {
    pub fn new(axes: [Axis; 3]) -> Self {
        Self {
            axes,
            counts: BTreeMap::new(),
        }
    }

    fn bins(&self, x: f64, y: f64, z: f64) -> [usize; 3] {
        [self.axes[0].bin(x), self.axes[1].bin(y), self.axes[2].bin(z)]
    }

    pub fn fill(&mut self, x: f64, y: f64, z: f64) {
        let bins = self.bins(x, y, z);
        *self.counts.entry(bins).or_default() += 1;
    }

    /// Count in the bin with the given indices, see [Axis::bin]
    pub fn count(&self, bins: [usize; 3]) -> u64 {
        self.counts.get(&bins).copied().unwrap_or_default()
    }

    pub fn entries(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Content of the bin containing `(x, y, z)`
    pub fn count_at(&self, x: f64, y: f64, z: f64) -> u64 {
        self.count(self.bins(x, y, z))
    }
}

mod sparse {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize, Serialize)]
    struct Bin {
        bin: [usize; 3],
        count: u64,
    }

    pub(super) fn serialize<S: Serializer>(
        counts: &BTreeMap<[usize; 3], u64>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        s.collect_seq(counts.iter().map(|(bin, count)| Bin {
            bin: *bin,
            count: *count,
        }))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<BTreeMap<[usize; 3], u64>, D::Error> {
        let bins = Vec::<Bin>::deserialize(d)?;
        Ok(bins.into_iter().map(|b| (b.bin, b.count)).collect())
    }
}
