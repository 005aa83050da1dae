use crate::catalog::catalog::Catalog;
use crate::ir::plan::LogicalPlan;

#[derive(Debug, Clone, Copy)]
pub struct Cost {
    pub cpu: u64,
    pub io: u64,
}

impl Cost {
    pub fn total(&self) -> u64 {
        self.cpu + self.io
    }
}

/// Coarse per-plan estimate. A scan costs its estimated row count when the
/// optimizer has set one (a rewritten index scan reports its limit), else
/// the table's stats.
pub fn estimate_cost(plan: &LogicalPlan, catalog: &Catalog) -> Cost {
    match plan {
        LogicalPlan::Scan(scan) => {
            let rows = scan
                .estimated_rows
                .unwrap_or_else(|| catalog.table_stats(scan.table_id).row_count);
            Cost { cpu: rows, io: rows }
        }

        LogicalPlan::Project(p) => {
            let c = estimate_cost(&p.input, catalog);
            Cost {
                cpu: c.cpu + p.exprs.len() as u64,
                io: c.io,
            }
        }

        LogicalPlan::Filter(f) => {
            let c = estimate_cost(&f.input, catalog);
            Cost {
                cpu: c.cpu + 10,
                io: c.io,
            }
        }

        LogicalPlan::TopK(t) => {
            let c = estimate_cost(&t.input, catalog);
            Cost {
                cpu: c.cpu * 2,
                io: c.io,
            }
        }

        LogicalPlan::Sort(s) => {
            let c = estimate_cost(&s.input, catalog);
            Cost {
                cpu: c.cpu * 2,
                io: c.io,
            }
        }

        LogicalPlan::Limit(l) => estimate_cost(&l.input, catalog),

        LogicalPlan::Join(j) => {
            let l = estimate_cost(&j.left, catalog);
            let r = estimate_cost(&j.right, catalog);
            Cost {
                cpu: l.cpu * r.cpu,
                io: l.io + r.io,
            }
        }
    }
}
