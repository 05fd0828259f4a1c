// File: crates/responsive-chart/src/ticks.rs
// Summary: Tick generation and "nice" domain rounding for continuous scales (1/2/5 x 10^n steps).

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

fn step_factor(error: f64) -> f64 {
    if error >= E10 { 10.0 } else if error >= E5 { 5.0 } else if error >= E2 { 2.0 } else { 1.0 }
}

/// Signed tick increment for roughly `count` ticks over [start, stop].
/// Positive values are the step itself; negative values are `-1/step` (exact for steps < 1).
pub fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = step_factor(error);
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

/// Extend [start, stop] outward to multiples of a round tick step.
/// Degenerate or non-finite domains are returned unchanged.
pub fn nice_domain(start: f64, stop: f64, count: f64) -> (f64, f64) {
    if !(start.is_finite() && stop.is_finite()) || start == stop {
        return (start, stop);
    }
    let reversed = stop < start;
    let (mut lo, mut hi) = if reversed { (stop, start) } else { (start, stop) };
    let mut prestep = f64::NAN;
    for _ in 0..10 {
        let step = tick_increment(lo, hi, count);
        if step == prestep {
            break;
        } else if step > 0.0 {
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
        } else if step < 0.0 {
            lo = (lo * step).ceil() / step;
            hi = (hi * step).floor() / step;
        } else {
            break;
        }
        prestep = step;
    }
    if reversed { (hi, lo) } else { (lo, hi) }
}

/// Round tick values inside [start, stop], about `count` of them. `count` may be fractional.
pub fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if count.is_nan() || count <= 0.0 || !(start.is_finite() && stop.is_finite()) {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reversed = stop < start;
    let (lo, hi) = if reversed { (stop, start) } else { (start, stop) };
    let mut out = tick_spec(lo, hi, count)
        .map(|(i1, i2, inc)| {
            (i1..=i2)
                .map(|i| if inc < 0.0 { i as f64 / -inc } else { i as f64 * inc })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    if reversed {
        out.reverse();
    }
    out
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = step_factor(error);
    let (i1, i2, inc) = if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        let mut i1 = (start * inc).round();
        let mut i2 = (stop * inc).round();
        if i1 / inc < start { i1 += 1.0; }
        if i2 / inc > stop { i2 -= 1.0; }
        (i1, i2, -inc)
    } else {
        let inc = 10f64.powf(power) * factor;
        let mut i1 = (start / inc).round();
        let mut i2 = (stop / inc).round();
        if i1 * inc < start { i1 += 1.0; }
        if i2 * inc > stop { i2 -= 1.0; }
        (i1, i2, inc)
    };
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    if i2 < i1 {
        return None;
    }
    Some((i1 as i64, i2 as i64, inc))
}

/// Requested tick count for an axis of `length_px` with one tick every `spacing_px`.
/// Left fractional; the step search rounds it.
pub fn tick_count_for(length_px: f64, spacing_px: f64) -> f64 {
    if spacing_px <= 0.0 || !length_px.is_finite() || length_px <= 0.0 {
        return 0.0;
    }
    length_px / spacing_px
}
