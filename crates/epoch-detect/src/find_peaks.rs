//! Local-maxima detection with base spans
//!
//! A candidate peak is an interior sample (or the midpoint of a flat
//! plateau) strictly higher than both neighbors. Its base span runs from
//! the lowest sample between the peak and the nearest strictly-higher
//! sample on each side, which is what a zero-prominence threshold leaves
//! after prominence evaluation.

/// A local maximum and its base-to-base span, in sample indices
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Peak {
    pub index: usize,
    pub left_base: usize,
    pub right_base: usize,
    pub height: f64,
}

/// Indices of interior local maxima; plateaus report their midpoint
pub(crate) fn local_maxima(signal: &[f64]) -> Vec<usize> {
    let mut maxima = Vec::new();
    if signal.len() < 3 {
        return maxima;
    }
    let last = signal.len() - 1;
    let mut i = 1;
    while i < last {
        if signal[i - 1] < signal[i] {
            let mut ahead = i + 1;
            while ahead < last && signal[ahead] == signal[i] {
                ahead += 1;
            }
            if signal[ahead] < signal[i] {
                let plateau_end = ahead - 1;
                maxima.push(i + (plateau_end - i) / 2);
                i = ahead;
            }
        }
        i += 1;
    }
    maxima
}

/// Base span of a peak: on each side, walk until a strictly higher sample
/// (or the signal edge) and take the position of the minimum seen
pub(crate) fn peak_bases(signal: &[f64], peak: usize) -> (usize, usize) {
    let height = signal[peak];

    let mut left_base = peak;
    let mut left_min = height;
    let mut i = peak;
    loop {
        if signal[i] < left_min {
            left_min = signal[i];
            left_base = i;
        }
        if i == 0 || signal[i - 1] > height {
            break;
        }
        i -= 1;
    }

    let mut right_base = peak;
    let mut right_min = height;
    let mut i = peak;
    loop {
        if signal[i] < right_min {
            right_min = signal[i];
            right_base = i;
        }
        if i + 1 == signal.len() || signal[i + 1] > height {
            break;
        }
        i += 1;
    }

    (left_base, right_base)
}

/// All interior local maxima whose height clears the given bounds, with
/// their base spans
pub(crate) fn find_peaks(signal: &[f64], height_min: f64, height_max: Option<f64>) -> Vec<Peak> {
    local_maxima(signal)
        .into_iter()
        .filter_map(|index| {
            let height = signal[index];
            if height < height_min || height_max.map_or(false, |max| height > max) {
                return None;
            }
            let (left_base, right_base) = peak_bases(signal, index);
            Some(Peak {
                index,
                left_base,
                right_base,
                height,
            })
        })
        .collect()
}
