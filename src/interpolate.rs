//! Piecewise-linear value mapping.
//!
//! Maps an input through ascending breakpoints (`domain`) onto output values
//! (`range`). Inputs outside the domain are clamped to the first/last output.
//!
//! ```ignore
//! use flashdeck::interpolate::interpolate;
//!
//! // Full opacity in the middle, fading out past +/-100
//! let opacity = interpolate(150.0, &[-200.0, -100.0, 0.0, 100.0, 200.0], &[0.0, 1.0, 1.0, 1.0, 0.0]);
//! assert_eq!(opacity, 0.5);
//! ```

use crate::types::Rgba;

/// Locate the segment containing `input`.
///
/// Returns `(segment_index, t)` where `t` is the 0..=1 progress inside the
/// segment, or `None` when the domain has fewer than two breakpoints.
fn locate(input: f32, domain: &[f32]) -> Option<(usize, f32)> {
    if domain.len() < 2 {
        return None;
    }

    let last = domain.len() - 1;
    if input <= domain[0] {
        return Some((0, 0.0));
    }
    if input >= domain[last] {
        return Some((last - 1, 1.0));
    }

    let segment = domain
        .windows(2)
        .position(|pair| input <= pair[1])
        .unwrap_or(last - 1);

    let (from, to) = (domain[segment], domain[segment + 1]);
    let span = to - from;
    let t = if span.abs() <= f32::EPSILON { 1.0 } else { (input - from) / span };
    Some((segment, t.clamp(0.0, 1.0)))
}

/// Map `input` through `domain` onto `range`.
///
/// Extra breakpoints on either side are ignored. An empty mapping yields 0.
pub fn interpolate(input: f32, domain: &[f32], range: &[f32]) -> f32 {
    let len = domain.len().min(range.len());
    match len {
        0 => 0.0,
        1 => range[0],
        _ => match locate(input, &domain[..len]) {
            Some((i, t)) => range[i] + (range[i + 1] - range[i]) * t,
            None => range[0],
        },
    }
}

/// Map `input` through `domain` onto a list of colors.
pub fn interpolate_color(input: f32, domain: &[f32], colors: &[Rgba]) -> Rgba {
    let len = domain.len().min(colors.len());
    match len {
        0 => Rgba::default(),
        1 => colors[0],
        _ => match locate(input, &domain[..len]) {
            Some((i, t)) => Rgba::lerp(colors[i], colors[i + 1], t),
            None => colors[0],
        },
    }
}
