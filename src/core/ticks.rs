//! Tick generation for numeric domains.
//!
//! Increments are always 1, 2 or 5 times a power of ten.

const E10: f64 = 7.071_067_811_865_475_5; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Default number of ticks requested per axis.
pub const DEFAULT_TICK_COUNT: usize = 10;

/// `(first index, last index, increment)`; a negative increment means "divide".
#[derive(Debug, Clone, Copy, PartialEq)]
struct TickSpec {
    i1: f64,
    i2: f64,
    inc: f64,
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn tick_spec(start: f64, stop: f64, count: f64) -> TickSpec {
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
        let divisor = 10f64.powf(-power) / factor;
        i1 = round_half_up(start * divisor);
        i2 = round_half_up(stop * divisor);
        if i1 / divisor < start {
            i1 += 1.0;
        }
        if i2 / divisor > stop {
            i2 -= 1.0;
        }
        inc = -divisor;
    } else {
        let multiplier = 10f64.powf(power) * factor;
        i1 = round_half_up(start / multiplier);
        i2 = round_half_up(stop / multiplier);
        if i1 * multiplier < start {
            i1 += 1.0;
        }
        if i2 * multiplier > stop {
            i2 -= 1.0;
        }
        inc = multiplier;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    TickSpec { i1, i2, inc }
}

/// Evenly spaced "nice" values covering `[start, stop]`, roughly `count` of them.
#[must_use]
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let spec = if reverse {
        tick_spec(stop, start, count as f64)
    } else {
        tick_spec(start, stop, count as f64)
    };
    if !(spec.i2 >= spec.i1) || !spec.inc.is_finite() {
        return Vec::new();
    }

    let n = (spec.i2 - spec.i1) as usize + 1;
    let value_at = |index: f64| {
        if spec.inc < 0.0 {
            index / -spec.inc
        } else {
            index * spec.inc
        }
    };
    let mut ticks: Vec<f64> = (0..n).map(|i| value_at(spec.i1 + i as f64)).collect();
    if reverse {
        ticks.reverse();
    }
    ticks
}

/// Signed increment of [`linear_ticks`] in its internal encoding.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).inc
}

/// Distance between two adjacent ticks of [`linear_ticks`].
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let reverse = stop < start;
    let inc = if reverse {
        tick_increment(stop, start, count)
    } else {
        tick_increment(start, stop, count)
    };
    let magnitude = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse { -magnitude } else { magnitude }
}

/// Decimal places needed to tell ticks `step` apart.
#[must_use]
pub fn precision_fixed(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 {
        return 0;
    }
    let exponent = step.log10().floor();
    if exponent >= 0.0 { 0 } else { (-exponent) as usize }
}

/// Formats a tick with thousands separators and the precision implied by `step`.
///
/// Negative values use U+2212.
#[must_use]
pub fn format_linear_tick(value: f64, step: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let precision = precision_fixed(step);
    let body = format!("{:.*}", precision, value.abs());
    let (integer, fraction) = match body.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (body.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3 + 1);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    let rounds_to_zero = body.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !rounds_to_zero {
        format!("\u{2212}{grouped}")
    } else {
        grouped
    }
}
