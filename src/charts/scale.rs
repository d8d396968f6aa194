//! Linear Scale Module
//! Maps metric values to pixel coordinates and picks round tick values.

use crate::charts::ChartDimensions;
use crate::data::{AxisSelection, DataPoint, Metric};
use statrs::statistics::Statistics;

/// Domain padding (lower, upper) applied to the X metric extent.
pub const X_DOMAIN_PADDING: (f64, f64) = (0.9, 1.05);
/// Domain padding (lower, upper) applied to the Y metric extent.
pub const Y_DOMAIN_PADDING: (f64, f64) = (0.8, 1.05);

// Tick step thresholds: sqrt(50), sqrt(10), sqrt(2)
const E10: f64 = 7.0710678118654755;
const E5: f64 = 3.1622776601683795;
const E2: f64 = 1.4142135623730951;

/// A linear function from a value domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// Map a value into the range.
    /// A zero-width domain maps everything to the middle of the range.
    pub fn apply(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        let span = d1 - d0;
        let t = if span.is_nan() {
            f64::NAN
        } else if span != 0.0 {
            (value - d0) / span
        } else {
            0.5
        };
        r0 + t * (r1 - r0)
    }

    /// Scale whose positions sit `t` of the way from `from` to `to`.
    ///
    /// Keeps the domain of `to` so tick values follow the destination scale.
    pub fn blend(from: &LinearScale, to: &LinearScale, t: f64) -> LinearScale {
        let [d0, d1] = to.domain;
        LinearScale::new(
            to.domain,
            [
                lerp(from.apply(d0), to.apply(d0), t),
                lerp(from.apply(d1), to.apply(d1), t),
            ],
        )
    }

    /// Round values spanning the domain, about `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain[0], self.domain[1], count as f64)
    }

    /// Format a tick value with thousands separators and the precision of the tick step.
    pub fn tick_format(&self, count: usize, value: f64) -> String {
        let step = tick_step(self.domain[0], self.domain[1], count as f64);
        format_grouped(value, precision_fixed(step))
    }
}

/// X and Y scales for one selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scales {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl Scales {
    pub fn for_selection(
        data: &[DataPoint],
        selection: AxisSelection,
        dimensions: &ChartDimensions,
    ) -> Self {
        Self {
            x: x_scale(data, selection.x(), dimensions.width),
            y: y_scale(data, selection.y(), dimensions.height),
        }
    }

    pub fn blend(from: &Scales, to: &Scales, t: f64) -> Scales {
        Scales {
            x: LinearScale::blend(&from.x, &to.x, t),
            y: LinearScale::blend(&from.y, &to.y, t),
        }
    }
}

/// Minimum and maximum of a metric over the dataset.
///
/// NaN values are not skipped; a single NaN poisons the extent.
pub fn metric_extent(data: &[DataPoint], metric: Metric) -> (f64, f64) {
    let values: Vec<f64> = data.iter().map(|d| d.value(metric)).collect();
    (Statistics::min(&values), Statistics::max(&values))
}

pub fn padded_domain(data: &[DataPoint], metric: Metric, padding: (f64, f64)) -> [f64; 2] {
    let (min, max) = metric_extent(data, metric);
    [min * padding.0, max * padding.1]
}

/// Horizontal scale: padded metric extent onto `[0, width]`.
pub fn x_scale(data: &[DataPoint], metric: Metric, width: f64) -> LinearScale {
    LinearScale::new(padded_domain(data, metric, X_DOMAIN_PADDING), [0.0, width])
}

/// Vertical scale: padded metric extent onto `[height, 0]` so larger values sit higher.
pub fn y_scale(data: &[DataPoint], metric: Metric, height: f64) -> LinearScale {
    LinearScale::new(padded_domain(data, metric, Y_DOMAIN_PADDING), [height, 0.0])
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

// Rounds half toward positive infinity.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Returns (i1, i2, inc). A negative `inc` means the step is `1 / -inc`.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let scale = 10f64.powf(-power) / factor;
        i1 = round_half_up(start * scale);
        i2 = round_half_up(stop * scale);
        if i1 / scale < start {
            i1 += 1.0;
        }
        if i2 / scale > stop {
            i2 -= 1.0;
        }
        inc = -scale;
    } else {
        let scale = 10f64.powf(power) * factor;
        i1 = round_half_up(start / scale);
        i2 = round_half_up(stop / scale);
        if i1 * scale < start {
            i1 += 1.0;
        }
        if i2 * scale > stop {
            i2 -= 1.0;
        }
        inc = scale;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

pub fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    if !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(lo, hi, count);
    if !(i2 >= i1) {
        return Vec::new();
    }

    let n = (i2 - i1 + 1.0) as usize;
    let mut values: Vec<f64> = (0..n)
        .map(|i| {
            let k = i1 + i as f64;
            if inc < 0.0 {
                k / -inc
            } else {
                k * inc
            }
        })
        .collect();
    if reverse {
        values.reverse();
    }
    values
}

/// Signed distance between adjacent ticks.
pub fn tick_step(start: f64, stop: f64, count: f64) -> f64 {
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (_, _, inc) = tick_spec(lo, hi, count);
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse {
        -step
    } else {
        step
    }
}

fn precision_fixed(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 {
        return 0;
    }
    let exponent = step.log10().floor();
    if exponent < 0.0 {
        (-exponent) as usize
    } else {
        0
    }
}

/// Fixed-precision number with a comma every three integer digits.
pub fn format_grouped(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
