// SPDX-License-Identifier: MIT OR Apache-2.0
//! Time codes and time-sampled values.
//!
//! Sampling policy:
//! - [`TimeCode::Default`] reads the earliest authored sample
//! - times outside the authored range clamp to the first/last sample
//! - floating point values interpolate linearly between samples, everything
//!   else holds the previous sample
//! - a blocked sample (`None`) produces no value

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Time coordinate at which an attribute is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum TimeCode {
    /// The non-animated sentinel
    #[default]
    Default,
    /// A concrete time
    Time(f64),
}

impl TimeCode {
    /// Whether this is the default sentinel
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

impl From<f64> for TimeCode {
    fn from(t: f64) -> Self {
        Self::Time(t)
    }
}

/// A single authored sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSample {
    /// Sample time
    pub time: f64,
    /// Sample value, `None` when blocked
    pub value: Option<Value>,
}

/// Time-ordered set of samples for one attribute
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "SampleList")]
pub struct TimeSamples {
    samples: Vec<TimeSample>,
}

/// Samples as loaded, in any order and possibly with repeated times
#[derive(Deserialize)]
#[serde(rename = "TimeSamples")]
struct SampleList {
    #[serde(default)]
    samples: Vec<TimeSample>,
}

impl From<SampleList> for TimeSamples {
    fn from(list: SampleList) -> Self {
        let mut samples = Self::new();
        // Later entries replace earlier ones at the same time
        for sample in list.samples {
            samples.insert_sample(sample);
        }
        samples
    }
}

impl TimeSamples {
    /// Create an empty sample set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sample, replacing any sample authored at the same time
    pub fn insert(&mut self, time: f64, value: impl Into<Value>) {
        self.insert_sample(TimeSample {
            time,
            value: Some(value.into()),
        });
    }

    /// Add a blocked sample at `time`
    pub fn block(&mut self, time: f64) {
        self.insert_sample(TimeSample { time, value: None });
    }

    /// Builder form of [`TimeSamples::insert`]
    pub fn with(mut self, time: f64, value: impl Into<Value>) -> Self {
        self.insert(time, value);
        self
    }

    fn insert_sample(&mut self, sample: TimeSample) {
        match self
            .samples
            .binary_search_by(|s| s.time.total_cmp(&sample.time))
        {
            Ok(index) => self.samples[index] = sample,
            Err(index) => self.samples.insert(index, sample),
        }
    }

    /// Number of authored samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples are authored
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Authored samples in time order
    pub fn samples(&self) -> &[TimeSample] {
        &self.samples
    }

    /// Authored sample times in order
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.time)
    }

    /// Evaluate at `time`. Returns `None` when no value can be produced.
    pub fn sample(&self, time: TimeCode) -> Option<Value> {
        let first = self.samples.first()?;
        let t = match time {
            TimeCode::Default => return first.value.clone(),
            TimeCode::Time(t) => t,
        };

        // Index of the first sample strictly after `t`
        let upper = self.samples.partition_point(|s| s.time <= t);
        if upper == 0 {
            return first.value.clone();
        }
        let lower = &self.samples[upper - 1];
        if lower.time == t || upper == self.samples.len() {
            return lower.value.clone();
        }
        let next = &self.samples[upper];

        let (Some(a), Some(b)) = (&lower.value, &next.value) else {
            // Held across blocks
            return lower.value.clone();
        };
        if !a.value_type().is_interpolatable() {
            return Some(a.clone());
        }
        let alpha = (t - lower.time) / (next.time - lower.time);
        a.lerp(b, alpha).or_else(|| Some(a.clone()))
    }
}

impl<V: Into<Value>> FromIterator<(f64, V)> for TimeSamples {
    fn from_iter<I: IntoIterator<Item = (f64, V)>>(iter: I) -> Self {
        let mut samples = Self::new();
        for (time, value) in iter {
            samples.insert(time, value);
        }
        samples
    }
}
