//! Fixed linear regression over standardized event features.

const FEATURE_COUNT: usize = 5;

/// Intercept followed by one weight per feature.
const BETA: [f64; FEATURE_COUNT + 1] = [
    28.58492779,
    2.71431472,
    2.44460242,
    0.1488482,
    1.56153167,
    5.30286446,
];
const MEANS: [f64; FEATURE_COUNT] = [318.23717949, 411.35977564, 1.88461538, 1.79647436, 2.14182692];
const STDS: [f64; FEATURE_COUNT] = [67.3699352, 64.63589751, 0.31948553, 0.71963337, 0.78236607];

/// Model inputs. `to_array` fixes the order the coefficients were fitted with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Features {
    pub guest_no: f64,
    pub serve_no: f64,
    pub customer_rank: f64,
    pub prep_rank: f64,
    pub price_rank: f64,
}

impl Features {
    fn to_array(self) -> [f64; FEATURE_COUNT] {
        [
            self.guest_no,
            self.serve_no,
            self.customer_rank,
            self.prep_rank,
            self.price_rank,
        ]
    }
}

#[derive(Debug, Clone)]
pub struct RegressionModel {
    beta: [f64; FEATURE_COUNT + 1],
    means: [f64; FEATURE_COUNT],
    stds: [f64; FEATURE_COUNT],
}

impl Default for RegressionModel {
    fn default() -> Self {
        Self::new()
    }
}

impl RegressionModel {
    pub fn new() -> Self {
        Self {
            beta: BETA,
            means: MEANS,
            stds: STDS,
        }
    }

    /// Predicted wasted servings. Unbounded; callers clamp.
    pub fn predict(&self, features: Features) -> f64 {
        let standardized = features
            .to_array()
            .into_iter()
            .zip(self.means)
            .zip(self.stds)
            .map(|((value, mean), std)| (value - mean) / std);

        std::iter::once(1.0)
            .chain(standardized)
            .zip(self.beta)
            .map(|(x, weight)| x * weight)
            .sum()
    }
}
