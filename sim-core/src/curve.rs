use crate::driver::{Trace, TraceRecord};

/// Averages decay traces across repeated runs.
///
/// For each quencher index, this curve stores:
///
/// - The sum of the quenched fractions reported at that index.
/// - The sum of the active counts reported at that index.
/// - The number of runs that reached that index.
///
/// Runs start from independently drawn lattices, so their baselines differ;
/// averaging the fraction keeps runs comparable.
///
/// Internally, entry `i` corresponds to quencher `i + 1`.
#[derive(Debug, Default, Clone)]
pub struct DecayCurve {
    /// Accumulated quenched fractions per quencher index.
    fraction: Vec<f64>,
    /// Accumulated active counts per quencher index.
    active: Vec<u64>,
    /// Number of contributions per quencher index.
    pub count: Vec<u32>,
}

impl DecayCurve {
    /// Creates a new [`DecayCurve`] with room for `len` quenchers.
    ///
    /// ### Parameters
    /// - `len` - Number of quencher indices this curve can store.
    pub fn with_len(len: usize) -> Self {
        Self {
            fraction: vec![0.0; len],
            active: vec![0; len],
            count: vec![0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.count.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count.is_empty()
    }

    /// Adds one record, growing the curve if the record lies past its end.
    pub fn add(&mut self, record: &TraceRecord) {
        let Some(i) = (record.quencher as usize).checked_sub(1) else {
            return;
        };
        if i >= self.len() {
            self.fraction.resize(i + 1, 0.0);
            self.active.resize(i + 1, 0);
            self.count.resize(i + 1, 0);
        }
        self.fraction[i] += record.quenched_fraction;
        self.active[i] += record.active;
        self.count[i] += 1;
    }

    /// Adds every record of a finished run.
    pub fn add_trace(&mut self, trace: &Trace) {
        for r in &trace.records {
            self.add(r);
        }
    }

    /// Mean quenched fraction after quencher `quencher` (1-based), or `None`
    /// if no run reached it.
    pub fn mean_fraction(&self, quencher: u64) -> Option<f64> {
        let i = (quencher as usize).checked_sub(1)?;
        match self.count.get(i) {
            Some(&c) if c > 0 => Some(self.fraction[i] / f64::from(c)),
            _ => None,
        }
    }

    /// Mean active count after quencher `quencher` (1-based).
    pub fn mean_active(&self, quencher: u64) -> Option<f64> {
        let i = (quencher as usize).checked_sub(1)?;
        match self.count.get(i) {
            Some(&c) if c > 0 => Some(self.active[i] as f64 / f64::from(c)),
            _ => None,
        }
    }

    /// Iterates `(quencher, mean active, mean fraction)` over every index
    /// reached by at least one run.
    pub fn points(&self) -> impl Iterator<Item = (u64, f64, f64)> + '_ {
        (1..=self.len() as u64)
            .filter_map(|q| Some((q, self.mean_active(q)?, self.mean_fraction(q)?)))
    }
}
