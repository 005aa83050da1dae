use crate::ir::expr::Expr;
use crate::ir::plan::{Filter, Join, Limit, LogicalPlan, Project, Scan, ScanStrategy, Sort, TopK};

#[derive(Debug, PartialEq)]
pub enum ValidationError {
    EmptyProject,
    ZeroLimit,
    NullPredicate,
    EmptySortKeys,
    InvalidStructure(&'static str),
}

pub type ValidationResult = Result<(), ValidationError>;

pub fn validate(plan: &LogicalPlan) -> ValidationResult {
    validate_node(plan)
}

fn validate_node(plan: &LogicalPlan) -> ValidationResult {
    match plan {
        LogicalPlan::Scan(scan) => validate_scan(scan),
        LogicalPlan::Project(project) => validate_project(project),
        LogicalPlan::TopK(top_k) => validate_top_k(top_k),
        LogicalPlan::Filter(filter) => validate_filter(filter),
        LogicalPlan::Sort(sort) => validate_sort(sort),
        LogicalPlan::Limit(limit) => validate_limit(limit),
        LogicalPlan::Join(join) => validate_join(join),
    }
}

fn validate_scan(scan: &Scan) -> ValidationResult {
    match (scan.strategy, &scan.bind) {
        (ScanStrategy::VectorIndexScan, None) => Err(ValidationError::InvalidStructure(
            "vector index scan without bind parameters",
        )),
        (ScanStrategy::SeqScan, Some(_)) => Err(ValidationError::InvalidStructure(
            "sequential scan carries bind parameters",
        )),
        _ => Ok(()),
    }
}

fn validate_project(project: &Project) -> ValidationResult {
    if project.exprs.is_empty() {
        return Err(ValidationError::EmptyProject);
    }

    validate_node(&project.input)
}

fn validate_top_k(top_k: &TopK) -> ValidationResult {
    if top_k.limit == 0 {
        return Err(ValidationError::ZeroLimit);
    }
    if top_k.keys.is_empty() {
        return Err(ValidationError::EmptySortKeys);
    }
    validate_node(&top_k.input)
}

fn validate_filter(filter: &Filter) -> ValidationResult {
    if matches!(filter.predicate, Expr::Null) {
        return Err(ValidationError::NullPredicate);
    }
    validate_node(&filter.input)
}

fn validate_sort(sort: &Sort) -> ValidationResult {
    if sort.keys.is_empty() {
        return Err(ValidationError::EmptySortKeys);
    }
    validate_node(&sort.input)
}

fn validate_limit(limit: &Limit) -> ValidationResult {
    if limit.count == 0 {
        return Err(ValidationError::ZeroLimit);
    }

    validate_node(&limit.input)
}

fn validate_join(join: &Join) -> ValidationResult {
    validate_node(&join.left)?;
    validate_node(&join.right)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ids::{IndexId, TableId};
    use crate::common::value::Value;
    use crate::ir::expr::BinaryOp;
    use crate::ir::plan::{SortKey, VectorScanBind};

    fn users_scan() -> LogicalPlan {
        LogicalPlan::scan(TableId(1), "users", 0)
    }

    #[test]
    fn valid_simple_scan() {
        assert_eq!(validate(&users_scan()), Ok(()));
    }

    #[test]
    fn valid_filter_plan() {
        let plan = users_scan().filter(Expr::bin(
            Expr::col("age", 0, 1),
            BinaryOp::Gt,
            Expr::lit(Value::Int64(18)),
        ));

        assert_eq!(validate(&plan), Ok(()));
    }

    #[test]
    fn project_must_not_be_empty() {
        let plan = LogicalPlan::Project(Project {
            input: Box::new(users_scan()),
            table_index: 1,
            exprs: vec![],
        });

        assert_eq!(validate(&plan), Err(ValidationError::EmptyProject));
    }

    #[test]
    fn limit_must_be_positive() {
        let plan = users_scan().limit(0);

        assert_eq!(validate(&plan), Err(ValidationError::ZeroLimit));
    }

    #[test]
    fn top_k_needs_keys_and_a_limit() {
        let keyless = users_scan().top_k(vec![], 5);
        assert_eq!(validate(&keyless), Err(ValidationError::EmptySortKeys));

        let zero = users_scan().top_k(
            vec![SortKey {
                expr: Expr::col("dist", 1, 0),
                asc: true,
            }],
            0,
        );
        assert_eq!(validate(&zero), Err(ValidationError::ZeroLimit));
    }

    #[test]
    fn filter_predicate_cannot_be_null() {
        let plan = users_scan().filter(Expr::Null);

        assert_eq!(validate(&plan), Err(ValidationError::NullPredicate));
    }

    #[test]
    fn index_scan_must_own_bind_parameters() {
        let mut plan = users_scan();
        if let LogicalPlan::Scan(scan) = &mut plan {
            scan.strategy = ScanStrategy::VectorIndexScan;
        }

        assert_eq!(
            validate(&plan),
            Err(ValidationError::InvalidStructure(
                "vector index scan without bind parameters"
            ))
        );
    }

    #[test]
    fn sequential_scan_must_not_carry_bind_parameters() {
        let mut plan = users_scan();
        if let LogicalPlan::Scan(scan) = &mut plan {
            scan.bind = Some(VectorScanBind {
                table_id: TableId(1),
                index_id: IndexId(1),
                limit: 5,
                query: vec![0.0; 2],
            });
        }

        assert_eq!(
            validate(&plan),
            Err(ValidationError::InvalidStructure(
                "sequential scan carries bind parameters"
            ))
        );
    }
}
