#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn span(self) -> f32 {
        self.max - self.min
    }
}

fn transform(value: f32, source: Range, target: Range) -> f32 {
    (value - source.min) / source.span() * target.span() + target.min
}

/// Affine min-max normalization of one numeric attribute across a collection.
///
/// The element carrying the minimum accessor value maps exactly to
/// `target.min`, the maximum to `target.max`. When every element carries the
/// same value the mapping would divide by zero, so the whole collection is
/// pinned to `target.min` instead.
pub fn fit<T>(
    items: &mut [T],
    accessor: impl Fn(&T) -> f32,
    updater: impl Fn(&mut T, f32),
    target: Range,
) {
    let mut min_value = f32::INFINITY;
    let mut max_value = f32::NEG_INFINITY;
    for item in items.iter() {
        let value = accessor(item);
        min_value = min_value.min(value);
        max_value = max_value.max(value);
    }

    if items.is_empty() {
        return;
    }

    if (max_value - min_value).abs() <= f32::EPSILON {
        for item in items.iter_mut() {
            updater(item, target.min);
        }
        return;
    }

    let source = Range::new(min_value, max_value);
    for item in items.iter_mut() {
        let mapped = transform(accessor(item), source, target);
        updater(item, mapped);
    }
}
