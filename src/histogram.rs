use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;

use crate::util;

// Order-of-magnitude breakdown of the divergences seen in a sweep: special
// counts for exact, infinite, and indeterminate results, plus one bucket per
// decimal exponent for everything in between. Display folds the exponent
// buckets down to a handful so the spread reads as a single line.
// All recorded values must be non-negative, which ulp distances are.
#[derive(Debug, Clone, Serialize)]
pub struct UlpHistogram {
    // Samples that agreed exactly (divergence zero).
    pub(crate) num_exact: usize,
    // Samples whose divergence was infinite.
    pub(crate) num_infinite: usize,
    // Samples whose divergence was nan (one side nan, the other not).
    pub(crate) num_indeterminate: usize,

    // Cap on exponent buckets shown by Display, not counting the special
    // counts above. Must be at least 3; smaller caps would need extra
    // special cases in the folding loop.
    #[serde(skip)]
    pub(crate) display_cap: usize,

    // Divergence counts keyed by decimal exponent.
    pub(crate) buckets: BTreeMap<i32, usize>,
}

impl UlpHistogram {
    pub(crate) fn new(display_cap: usize) -> Self {
        assert!(display_cap > 2);
        UlpHistogram {
            num_exact: 0,
            num_infinite: 0,
            num_indeterminate: 0,
            display_cap,
            buckets: BTreeMap::new(),
        }
    }

    // Record one observed divergence.
    pub(crate) fn record(&mut self, d: f64) {
        assert!(d.is_sign_positive());
        if d.is_nan() {
            self.num_indeterminate += 1;
        } else if d.is_infinite() {
            self.num_infinite += 1;
        } else if d == 0.0 {
            self.num_exact += 1;
        } else {
            *self.buckets.entry(d.log10() as i32).or_insert(0) += 1;
        }
    }

    // Fold another histogram into this one, bucket by bucket.
    pub(crate) fn merge(&mut self, other: &UlpHistogram) {
        self.num_exact += other.num_exact;
        self.num_infinite += other.num_infinite;
        self.num_indeterminate += other.num_indeterminate;
        for (&exp, &count) in &other.buckets {
            *self.buckets.entry(exp).or_insert(0) += count;
        }
    }

    fn total(&self) -> usize {
        self.num_exact
            + self.num_infinite
            + self.num_indeterminate
            + self.buckets.values().sum::<usize>()
    }

    // Fold the least populated bucket into its less populated neighbor until
    // at most display_cap buckets remain. Keys keep the surviving bucket's
    // original exponent; values carry the folded exponent span and combined
    // count. Favoring the less populated neighbor keeps the final buckets
    // somewhat even in population.
    fn reduced(&self) -> BTreeMap<i32, (i32, i32, usize)> {
        let mut reduced: BTreeMap<i32, (i32, i32, usize)> = self
            .buckets
            .iter()
            .map(|(&exp, &count)| (exp, (exp, exp, count)))
            .collect();
        while reduced.len() > self.display_cap {
            let keys: Vec<i32> = reduced.keys().copied().collect();
            let pos = keys
                .iter()
                .enumerate()
                .min_by_key(|&(_, k)| reduced[k].2)
                .map(|(i, _)| i)
                .unwrap();
            // The cap floor of 3 means at least 4 buckets remain here, so
            // every candidate has a neighbor on at least one side.
            let to = if pos == 0 {
                keys[pos + 1]
            } else if pos == keys.len() - 1 {
                keys[pos - 1]
            } else if reduced[&keys[pos + 1]].2 < reduced[&keys[pos - 1]].2 {
                keys[pos + 1]
            } else {
                keys[pos - 1]
            };
            let folded = reduced.remove(&keys[pos]).unwrap();
            let target = reduced.get_mut(&to).unwrap();
            target.0 = target.0.min(folded.0);
            target.1 = target.1.max(folded.1);
            target.2 += folded.2;
        }
        reduced
    }
}

impl Display for UlpHistogram {
    // Render the spread reduced to a manageable number of buckets.
    // The bucket folding makes this comparatively expensive.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reduced = self.reduced();
        let num_total = self.total();
        let mut first = true;
        let mut pad_maybe = || {
            if first {
                first = false;
                ""
            } else {
                ", "
            }
        };
        if self.num_exact > 0 {
            write!(
                f,
                "{}exact {}%",
                pad_maybe(),
                util::to_percent(self.num_exact, num_total)
            )?;
        }
        for (_, (exp_min, exp_max, count)) in &reduced {
            let percent = util::to_percent(*count, num_total);
            if exp_min == exp_max {
                write!(f, "{}e{} {}%", pad_maybe(), exp_min, percent)?;
            } else {
                write!(f, "{}e{} to e{} {}%", pad_maybe(), exp_min, exp_max, percent)?;
            }
        }
        if self.num_infinite > 0 {
            write!(
                f,
                "{}inf {}%",
                pad_maybe(),
                util::to_percent(self.num_infinite, num_total)
            )?;
        }
        if self.num_indeterminate > 0 {
            write!(
                f,
                "{}nan {}%",
                pad_maybe(),
                util::to_percent(self.num_indeterminate, num_total)
            )?;
        }
        Ok(())
    }
}
