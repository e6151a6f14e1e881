/// Marker for a model that is still being trained.
#[derive(Debug, Clone, Copy)]
pub struct Unfitted;

/// Marker for a trained, inference-only model.
#[derive(Debug, Clone, Copy)]
pub struct Fitted;
