use crate::catalog::ids::{IndexId, TableId};
use crate::ir::expr::{ColumnBinding, Expr};

#[derive(Clone, Debug, PartialEq)]
pub enum LogicalPlan {
    Scan(Scan),
    Project(Project),
    TopK(TopK),
    Filter(Filter),
    Sort(Sort),
    Limit(Limit),
    Join(Join),
}

/// How a scan node produces its rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanStrategy {
    /// Generic sequential table scan.
    SeqScan,
    /// Index-driven scan returning the K rows nearest to a query vector.
    VectorIndexScan,
}

/// Parameters of a vector index scan. Built once on a successful index
/// match, owned solely by the scan node they are installed on, and never
/// mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorScanBind {
    pub table_id: TableId,
    pub index_id: IndexId,
    pub limit: usize,
    pub query: Vec<f32>,
}

impl VectorScanBind {
    /// The index produces at most `limit` rows.
    pub fn cardinality(&self) -> u64 {
        self.limit as u64
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scan {
    pub table_id: TableId,
    pub table: String,
    pub table_index: usize,
    pub strategy: ScanStrategy,
    pub bind: Option<VectorScanBind>,
    pub estimated_rows: Option<u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Project {
    pub input: Box<LogicalPlan>,
    pub table_index: usize,
    pub exprs: Vec<(Expr, String)>,
}

impl Project {
    /// Positional address of output slot `i`.
    pub fn output_binding(&self, i: usize) -> ColumnBinding {
        ColumnBinding {
            table: self.table_index,
            column: i,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SortKey {
    pub expr: Expr,
    pub asc: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TopK {
    pub input: Box<LogicalPlan>,
    pub keys: Vec<SortKey>,
    pub limit: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub input: Box<LogicalPlan>,
    pub predicate: Expr,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sort {
    pub input: Box<LogicalPlan>,
    pub keys: Vec<SortKey>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Limit {
    pub input: Box<LogicalPlan>,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Join {
    pub left: Box<LogicalPlan>,
    pub right: Box<LogicalPlan>,
    pub on: Expr,
}

impl LogicalPlan {
    pub fn scan(table_id: TableId, table: impl Into<String>, table_index: usize) -> Self {
        LogicalPlan::Scan(Scan {
            table_id,
            table: table.into(),
            table_index,
            strategy: ScanStrategy::SeqScan,
            bind: None,
            estimated_rows: None,
        })
    }

    pub fn filter(self, predicate: Expr) -> Self {
        LogicalPlan::Filter(Filter {
            input: Box::new(self),
            predicate,
        })
    }

    pub fn project(self, table_index: usize, exprs: Vec<(Expr, impl Into<String>)>) -> Self {
        LogicalPlan::Project(Project {
            input: Box::new(self),
            table_index,
            exprs: exprs.into_iter().map(|(e, a)| (e, a.into())).collect(),
        })
    }

    pub fn sort(self, keys: Vec<SortKey>) -> Self {
        LogicalPlan::Sort(Sort {
            input: Box::new(self),
            keys,
        })
    }

    pub fn top_k(self, keys: Vec<SortKey>, limit: usize) -> Self {
        LogicalPlan::TopK(TopK {
            input: Box::new(self),
            keys,
            limit,
        })
    }

    pub fn limit(self, count: usize) -> Self {
        LogicalPlan::Limit(Limit {
            input: Box::new(self),
            count,
        })
    }

    pub fn arity(&self) -> usize {
        match self {
            LogicalPlan::Scan(_) => 0,
            LogicalPlan::Project(_) => 1,
            LogicalPlan::TopK(_) => 1,
            LogicalPlan::Filter(_) => 1,
            LogicalPlan::Sort(_) => 1,
            LogicalPlan::Limit(_) => 1,
            LogicalPlan::Join(_) => 2,
        }
    }

    /// The node's single input, when it has exactly one.
    pub fn input(&self) -> Option<&LogicalPlan> {
        match self {
            LogicalPlan::Project(p) => Some(&p.input),
            LogicalPlan::TopK(t) => Some(&t.input),
            LogicalPlan::Filter(f) => Some(&f.input),
            LogicalPlan::Sort(s) => Some(&s.input),
            LogicalPlan::Limit(l) => Some(&l.input),
            LogicalPlan::Scan(_) => None,
            LogicalPlan::Join(_) => None,
        }
    }

    pub fn input_mut(&mut self) -> Option<&mut LogicalPlan> {
        match self {
            LogicalPlan::Project(p) => Some(&mut p.input),
            LogicalPlan::TopK(t) => Some(&mut t.input),
            LogicalPlan::Filter(f) => Some(&mut f.input),
            LogicalPlan::Sort(s) => Some(&mut s.input),
            LogicalPlan::Limit(l) => Some(&mut l.input),
            LogicalPlan::Scan(_) => None,
            LogicalPlan::Join(_) => None,
        }
    }

    /// Rebuild this node with every direct input passed through `f`.
    pub fn map_inputs<F>(self, f: &mut F) -> Self
    where
        F: FnMut(LogicalPlan) -> LogicalPlan,
    {
        match self {
            scan @ LogicalPlan::Scan(_) => scan,
            LogicalPlan::Project(p) => LogicalPlan::Project(Project {
                input: Box::new(f(*p.input)),
                table_index: p.table_index,
                exprs: p.exprs,
            }),
            LogicalPlan::TopK(t) => LogicalPlan::TopK(TopK {
                input: Box::new(f(*t.input)),
                keys: t.keys,
                limit: t.limit,
            }),
            LogicalPlan::Filter(node) => LogicalPlan::Filter(Filter {
                input: Box::new(f(*node.input)),
                predicate: node.predicate,
            }),
            LogicalPlan::Sort(s) => LogicalPlan::Sort(Sort {
                input: Box::new(f(*s.input)),
                keys: s.keys,
            }),
            LogicalPlan::Limit(l) => LogicalPlan::Limit(Limit {
                input: Box::new(f(*l.input)),
                count: l.count,
            }),
            LogicalPlan::Join(j) => LogicalPlan::Join(Join {
                left: Box::new(f(*j.left)),
                right: Box::new(f(*j.right)),
                on: j.on,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::value::Value;

    fn users_scan() -> LogicalPlan {
        LogicalPlan::scan(TableId(1), "users", 0)
    }

    #[test]
    fn builders_compose_single_input_chains() {
        let plan = users_scan()
            .project(1, vec![(Expr::col("name", 0, 0), "name")])
            .limit(5);

        assert_eq!(plan.arity(), 1);
        assert_eq!(plan.input().unwrap().arity(), 1);
        assert_eq!(plan.input().unwrap().input().unwrap().arity(), 0);
    }

    #[test]
    fn scan_and_join_have_no_single_input() {
        let join = LogicalPlan::Join(Join {
            left: Box::new(users_scan()),
            right: Box::new(users_scan()),
            on: Expr::lit(Value::Bool(true)),
        });

        assert!(users_scan().input().is_none());
        assert!(join.input().is_none());
        assert_eq!(join.arity(), 2);
    }

    #[test]
    fn new_scans_use_the_sequential_strategy() {
        let LogicalPlan::Scan(scan) = users_scan() else {
            panic!("expected Scan");
        };
        assert_eq!(scan.strategy, ScanStrategy::SeqScan);
        assert_eq!(scan.bind, None);
        assert_eq!(scan.estimated_rows, None);
    }

    #[test]
    fn bind_cardinality_is_the_limit() {
        let bind = VectorScanBind {
            table_id: TableId(1),
            index_id: IndexId(1),
            limit: 7,
            query: vec![0.0; 4],
        };
        assert_eq!(bind.cardinality(), 7);
    }

    #[test]
    fn projection_output_bindings_are_positional() {
        let plan = users_scan().project(
            3,
            vec![
                (Expr::col("a", 0, 0), "a"),
                (Expr::col("b", 0, 1), "b"),
            ],
        );

        let LogicalPlan::Project(project) = plan else {
            panic!("expected Project");
        };
        assert_eq!(project.output_binding(1).table, 3);
        assert_eq!(project.output_binding(1).column, 1);
    }

    #[test]
    fn map_inputs_rebuilds_every_child() {
        let join = LogicalPlan::Join(Join {
            left: Box::new(users_scan().limit(1)),
            right: Box::new(users_scan().limit(2)),
            on: Expr::lit(Value::Bool(true)),
        });

        // Strip the limits off both sides.
        let stripped = join.map_inputs(&mut |child| match child {
            LogicalPlan::Limit(l) => *l.input,
            other => other,
        });

        let LogicalPlan::Join(j) = stripped else {
            panic!("expected Join");
        };
        assert!(matches!(*j.left, LogicalPlan::Scan(_)));
        assert!(matches!(*j.right, LogicalPlan::Scan(_)));
    }
}
