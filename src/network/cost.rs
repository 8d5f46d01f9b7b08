//! Bookkeeping used to report training progress

/// Sum of squared differences between prediction and target
pub fn squared_error(prediction: &[f64], target: &[f64]) -> f64 {
    prediction.iter()
        .zip(target)
        .map(|(p, t)| (p - t) * (p - t))
        .sum()
}

/// Gradient of `squared_error` with respect to each prediction
pub fn squared_error_prime(prediction: &[f64], target: &[f64]) -> Vec<f64> {
    prediction.iter()
        .zip(target)
        .map(|(p, t)| 2.0 * (p - t))
        .collect()
}

/// Index of the largest value, ties going to the lowest index
///
/// NaN entries are never chosen; `None` when every value is NaN.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in values.iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if value <= current => {},
            _ => best = Some((index, value)),
        }
    }

    //Return
    best.map(|(index, _)| index)
}

/// A prediction is correct when it ranks the label's top class first
pub fn is_correct(prediction: &[f64], label: &[f64]) -> bool {
    argmax(prediction) == argmax(label)
}
