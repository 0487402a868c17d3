// ---------------------------------------------------------------------------
// "Nice" linear domains
// ---------------------------------------------------------------------------

/// Tick count the vertical axis is rounded for.
pub const DEFAULT_TICKS: usize = 10;

/// Tick step for `[start, stop]` split into roughly `count` intervals.
///
/// Steps are 1, 2 or 5 times a power of ten. A negative result `-k` stands
/// for a step of `1/k`, which keeps sub-unit steps exact in floating point.
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();

    let step = (stop - start) / count.max(1) as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -(10f64.powf(-power)) / factor
    }
}

/// Extend `[start, stop]` outward so both ends land on a round tick.
///
/// Returns the input unchanged when it is empty, inverted or not finite.
pub fn nice(start: f64, stop: f64, count: usize) -> (f64, f64) {
    if !(start.is_finite() && stop.is_finite()) || stop <= start {
        return (start, stop);
    }

    let (mut start, mut stop) = (start, stop);
    let mut previous = None;
    // Rounding can change the step; ten passes always settle.
    for _ in 0..10 {
        let step = tick_increment(start, stop, count);
        if previous == Some(step) {
            break;
        }
        if step > 0.0 {
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
        } else if step < 0.0 {
            start = (start * step).ceil() / step;
            stop = (stop * step).floor() / step;
        } else {
            break;
        }
        previous = Some(step);
    }
    (start, stop)
}

/// Vertical domain for a set of percentages: `[0, nice(max)]`.
///
/// A maximum of zero (every visible count is zero) would collapse the axis,
/// so it falls back to the full `[0, 1]` range.
pub fn percentage_domain(max: f64) -> (f64, f64) {
    if !(max.is_finite() && max > 0.0) {
        return (0.0, 1.0);
    }
    let (_, upper) = nice(0.0, max, DEFAULT_TICKS);
    (0.0, upper)
}
