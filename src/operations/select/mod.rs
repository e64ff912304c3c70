mod lasso;

pub use lasso::{lasso_indices, lasso_points, Lasso};
