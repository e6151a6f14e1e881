use crate::model::LinearParams;

/// Penalty added to the training objective.
///
/// Returns the penalty value and its gradient w.r.t. the parameters.
pub trait Regularizer {
    fn regularizer_penalty_grad(&self, params: &LinearParams) -> (f64, LinearParams);
}

/// L2 penalty on the weights: `0.5 * λ * ||w||²`. The bias is not penalized.
#[derive(Debug, Clone, Copy)]
pub struct L2 {
    lambda: f64,
}

impl L2 {
    pub fn new(lambda: f64) -> Self {
        Self { lambda }
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }
}

impl Regularizer for L2 {
    fn regularizer_penalty_grad(&self, params: &LinearParams) -> (f64, LinearParams) {
        let penalty = 0.5 * self.lambda * params.weights.dot(&params.weights);
        let grad = LinearParams {
            weights: &params.weights * self.lambda,
            bias: 0.0,
        };
        (penalty, grad)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoRegularizer;

impl Regularizer for NoRegularizer {
    fn regularizer_penalty_grad(&self, params: &LinearParams) -> (f64, LinearParams) {
        (0.0, LinearParams::zeros(params.weights.len()))
    }
}
