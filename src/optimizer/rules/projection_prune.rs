use std::collections::HashSet;

use tracing::trace;

use crate::common::value::Value;
use crate::ir::expr::{collect_column_bindings, ColumnBinding, Expr};
use crate::ir::plan::{LogicalPlan, Project, ScanStrategy};

/// After a scan rewrite the distance expression may have lost its only
/// consumer, the dropped top-k ordering key. Where a projection pair sits
/// directly above the new index scan, replace every slot of the lower
/// projection that the upper one no longer references with a cheap
/// placeholder constant.
///
/// Slots are never removed or reordered: column bindings elsewhere in the
/// plan are positional addresses into this projection's output, and
/// renumbering them plan-wide is out of scope for this pass.
pub fn prune_projections(plan: LogicalPlan) -> LogicalPlan {
    match plan {
        LogicalPlan::Project(mut outer) => {
            if projects_an_index_scan(&outer) {
                let mut referenced = HashSet::new();
                for (expr, _alias) in &outer.exprs {
                    collect_column_bindings(expr, &mut referenced);
                }
                if let LogicalPlan::Project(inner) = outer.input.as_mut() {
                    neutralize_unreferenced(inner, &referenced);
                }
                LogicalPlan::Project(outer)
            } else {
                outer.input = Box::new(prune_projections(*outer.input));
                LogicalPlan::Project(outer)
            }
        }
        other => other.map_inputs(&mut prune_projections),
    }
}

/// The shape this pass cleans up: a projection over a projection over a
/// vector index scan.
fn projects_an_index_scan(outer: &Project) -> bool {
    let LogicalPlan::Project(inner) = outer.input.as_ref() else {
        return false;
    };
    let LogicalPlan::Scan(scan) = inner.input.as_ref() else {
        return false;
    };
    scan.strategy == ScanStrategy::VectorIndexScan
}

fn neutralize_unreferenced(inner: &mut Project, referenced: &HashSet<ColumnBinding>) {
    let outgoing: Vec<ColumnBinding> = (0..inner.exprs.len())
        .map(|i| inner.output_binding(i))
        .collect();
    for (i, (expr, alias)) in inner.exprs.iter_mut().enumerate() {
        if referenced.contains(&outgoing[i]) {
            continue;
        }
        // Positionality matters, so substitute instead of removing.
        trace!(slot = i, alias = %alias, "neutralizing unreferenced projection slot");
        *expr = Expr::Literal(Value::Int8(0));
    }
}
