use tracing::debug;

use crate::catalog::catalog::Catalog;
use crate::catalog::index::is_distance_function;
use crate::catalog::table::TableKind;
use crate::common::types::DataType;
use crate::common::value::Value;
use crate::ir::expr::Expr;
use crate::ir::plan::{LogicalPlan, Scan, ScanStrategy, VectorScanBind};

/// Replace "ascending top-K over a distance projection" with a direct
/// vector index scan wherever the plan allows it.
///
/// Every node is visited exactly once per pass; a rewrite at one node
/// never suppresses attempts in sibling or descendant subtrees. Returns
/// the transformed plan and whether any node was rewritten.
pub fn vector_index_scan(plan: LogicalPlan, catalog: &Catalog) -> (LogicalPlan, bool) {
    let (plan, mut rewrote) = try_rewrite(plan, catalog);
    let plan = plan.map_inputs(&mut |child| {
        let (child, child_rewrote) = vector_index_scan(child, catalog);
        rewrote |= child_rewrote;
        child
    });
    (plan, rewrote)
}

fn try_rewrite(plan: LogicalPlan, catalog: &Catalog) -> (LogicalPlan, bool) {
    let Some(bind) = match_top_k_distance(&plan, catalog) else {
        return (plan, false);
    };

    match plan {
        LogicalPlan::TopK(top) => {
            debug!(
                table_id = bind.table_id.0,
                index_id = bind.index_id.0,
                k = bind.limit,
                "rewriting top-k over distance projection into vector index scan"
            );
            let mut input = *top.input;
            install_bind(&mut input, bind);
            // The top-k node and its ordering key are dropped here. The
            // distance expression stays in the projection below; removing
            // it would shift column positions, so that cleanup is left to
            // the pruning pass.
            (input, true)
        }
        other => (other, false),
    }
}

/// Decide whether `plan` is the root of the recognized shape and, if so,
/// resolve a compatible index and build the replacement scan's bind
/// parameters. Every failed predicate is an ordinary "no match", never an
/// error.
fn match_top_k_distance(plan: &LogicalPlan, catalog: &Catalog) -> Option<VectorScanBind> {
    let LogicalPlan::TopK(top) = plan else {
        return None;
    };

    // Single ascending ordering key only; a descending top-k asks for the
    // farthest rows and is not served by the index.
    if top.keys.len() != 1 {
        return None;
    }
    let key = &top.keys[0];
    if !key.asc {
        return None;
    }

    // The key must address an output slot of the projection directly below.
    let Expr::Column(order_ref) = &key.expr else {
        return None;
    };
    let LogicalPlan::Project(projection) = top.input.as_ref() else {
        return None;
    };
    let (target, _alias) = projection.exprs.get(order_ref.binding.column)?;
    let Expr::Call(distance) = target else {
        return None;
    };
    if !is_distance_function(&distance.name) {
        return None;
    }
    if distance.args.len() != 2 {
        return None;
    }

    // Exactly one argument must be a constant; it carries the query vector.
    // TODO: check that the other argument references the column the matched
    // index is built on; today any column of the right array type passes.
    let query = match (distance.args[0].as_literal(), distance.args[1].as_literal()) {
        (Some(value), None) => value,
        (None, Some(value)) => value,
        _ => return None,
    };

    // The constant must be a fixed-length array of floats, or castable to
    // one without changing any element.
    let DataType::Array { element, size } = query.data_type()? else {
        return None;
    };
    let query = if *element == DataType::Float32 {
        query.clone()
    } else {
        query.try_cast(&DataType::array(DataType::Float32, size))?
    };

    let scan = find_scan(projection.input.as_ref())?;
    if scan.strategy != ScanStrategy::SeqScan {
        return None;
    }
    let table = catalog.get_table_by_id(scan.table_id)?;
    // Virtual and foreign tables expose no introspectable indexes.
    if table.kind != TableKind::Native {
        return None;
    }

    resolve_index(catalog, scan, &distance.name, &query, size, top.limit)
}

/// Follow the strictly linear chain below the projection down to its scan.
/// Any node with zero or more than one input on the way (a join, a bare
/// leaf that is not a scan) ends the search.
fn find_scan(mut plan: &LogicalPlan) -> Option<&Scan> {
    loop {
        match plan {
            LogicalPlan::Scan(scan) => return Some(scan),
            _ => plan = plan.input()?,
        }
    }
}

/// Enumerate the table's vector indexes under the catalog's scan guard and
/// build bind parameters from the first structural match.
fn resolve_index(
    catalog: &Catalog,
    scan: &Scan,
    function: &str,
    query: &Value,
    dimension: usize,
    limit: usize,
) -> Option<VectorScanBind> {
    let Value::Array { values, .. } = query else {
        return None;
    };

    let mut bind = None;
    catalog.bind_vector_indexes(scan.table_id, |index| {
        if index.dimension != dimension {
            return false;
        }
        if !index.matches_distance_function(function) {
            return false;
        }

        // Copy the cast vector into an owned buffer, position for position.
        let mut buffer = Vec::with_capacity(values.len());
        for value in values {
            match value.as_f32() {
                Some(f) => buffer.push(f),
                None => return false,
            }
        }

        bind = Some(VectorScanBind {
            table_id: scan.table_id,
            index_id: index.id,
            limit,
            query: buffer,
        });
        true
    });
    bind
}

/// Swap the scan at the end of the single-child chain onto the index
/// strategy and hand it the bind parameters. The chain shape was already
/// checked by the matcher.
fn install_bind(plan: &mut LogicalPlan, bind: VectorScanBind) {
    match plan {
        LogicalPlan::Scan(scan) => {
            scan.strategy = ScanStrategy::VectorIndexScan;
            scan.estimated_rows = Some(bind.cardinality());
            scan.bind = Some(bind);
        }
        _ => {
            if let Some(input) = plan.input_mut() {
                install_bind(input, bind);
            }
        }
    }
}
