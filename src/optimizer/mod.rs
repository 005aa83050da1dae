pub mod cost;
pub mod rules;

use crate::catalog::catalog::Catalog;
use crate::ir::plan::LogicalPlan;
use crate::optimizer::rules::{
    projection_prune::prune_projections, vector_index_scan::vector_index_scan,
};

/// Run the vector rewrite pipeline over a bound logical plan.
///
/// The projection cleanup only makes sense below a freshly rewritten
/// scan, so it runs only when the index rewrite reports a change. A plan
/// with no eligible shape passes through untouched.
pub fn optimize(plan: LogicalPlan, catalog: &Catalog) -> LogicalPlan {
    let (plan, rewrote) = vector_index_scan(plan, catalog);
    if rewrote {
        prune_projections(plan)
    } else {
        plan
    }
}
