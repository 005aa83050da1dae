use std::collections::HashSet;

use anyhow::Result;
use maplit::hashset;

use xenon::catalog::catalog::Catalog;
use xenon::catalog::ids::TableId;
use xenon::catalog::table::{TableKind, TableStats};
use xenon::common::types::DataType;
use xenon::common::value::Value;
use xenon::ir::expr::Expr;
use xenon::ir::plan::{LogicalPlan, SortKey};

#[allow(dead_code)]
pub const DIM: usize = 4;

/// Catalog with one native `items` table (`id BIGINT`, `embedding
/// FLOAT[DIM]`) carrying a vector index on `embedding`, plus row stats so
/// cost estimates are meaningful.
pub struct TestCatalog {
    pub catalog: Catalog,
    pub items: TableId,
}

impl TestCatalog {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::with_metrics(hashset! {
            "l2_distance".to_string(),
            "cosine_distance".to_string(),
        })
    }

    #[allow(dead_code)]
    pub fn with_metrics(metrics: HashSet<String>) -> Self {
        Self::try_build(DIM, metrics).expect("test catalog")
    }

    #[allow(dead_code)]
    pub fn with_dimension(dimension: usize) -> Self {
        Self::try_build(dimension, hashset! { "l2_distance".to_string() })
            .expect("test catalog")
    }

    fn try_build(dimension: usize, metrics: HashSet<String>) -> Result<Self> {
        let mut catalog = Catalog::new();
        let items = catalog.create_table(
            "items".into(),
            TableKind::Native,
            vec![
                ("id".into(), DataType::Int64, false),
                (
                    "embedding".into(),
                    DataType::array(DataType::Float32, dimension),
                    false,
                ),
            ],
        )?;
        let embedding = catalog
            .get_table_by_id(items)
            .expect("items table")
            .column_by_name("embedding")
            .expect("embedding column")
            .id;
        catalog.create_vector_index(
            "items_embedding_idx".into(),
            items,
            embedding,
            dimension,
            metrics,
        )?;
        catalog.update_stats(items, TableStats { row_count: 10_000 });
        Ok(Self { catalog, items })
    }
}

#[allow(dead_code)]
pub fn float_array(values: &[f32]) -> Value {
    Value::Array {
        element: DataType::Float32,
        values: values.iter().map(|v| Value::Float32(*v)).collect(),
    }
}

#[allow(dead_code)]
pub fn int_array(values: &[i64]) -> Value {
    Value::Array {
        element: DataType::Int64,
        values: values.iter().map(|v| Value::Int64(*v)).collect(),
    }
}

/// The canonical candidate shape:
/// `TopK(dist ASC, k)` over `Project([l2_distance(embedding, query), id])`
/// over `Scan(items)`.
#[allow(dead_code)]
pub fn ann_top_k(items: TableId, query: Value, k: usize, asc: bool) -> LogicalPlan {
    LogicalPlan::scan(items, "items", 0)
        .project(
            1,
            vec![
                (
                    Expr::call(
                        "l2_distance",
                        vec![Expr::col("embedding", 0, 1), Expr::lit(query)],
                    ),
                    "dist",
                ),
                (Expr::col("id", 0, 0), "id"),
            ],
        )
        .top_k(
            vec![SortKey {
                expr: Expr::col("dist", 1, 0),
                asc,
            }],
            k,
        )
}
