use super::axis::{AxisList, AxisValue};

/// One choice of candidate value per axis, in axis order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariationSignature {
    values: Vec<AxisValue>,
}

impl VariationSignature {
    pub fn new(values: Vec<AxisValue>) -> VariationSignature {
        VariationSignature { values }
    }

    pub fn values(&self) -> &[AxisValue] {
        &self.values
    }

    /// Value chosen for the axis at `axis`.
    pub fn value(&self, axis: usize) -> Option<&AxisValue> {
        self.values.get(axis)
    }

    /// Map keys of this signature, outermost axis first.
    pub fn path(&self) -> Vec<String> {
        self.values
            .iter()
            .map(|value| value.map_key().into_owned())
            .collect()
    }
}

/// Cartesian product of the axes' candidates.
///
/// The first axis varies slowest, candidates in their declared order. With no
/// axes the result is a single empty signature.
pub fn enumerate_signatures(axes: &AxisList) -> Vec<VariationSignature> {
    let mut prefixes: Vec<Vec<AxisValue>> = vec![Vec::new()];
    for axis in axes.as_slice() {
        prefixes = prefixes
            .into_iter()
            .flat_map(|prefix| {
                axis.candidates.iter().map(move |candidate| {
                    let mut values = prefix.clone();
                    values.push(candidate.clone());
                    values
                })
            })
            .collect();
    }
    prefixes.into_iter().map(VariationSignature::new).collect()
}
