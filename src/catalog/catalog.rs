use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use crate::catalog::errors::CatalogError;
use crate::catalog::ids::*;
use crate::catalog::index::VectorIndexMeta;
use crate::catalog::table::{TableKind, TableMeta, TableStats};
use crate::common::types::DataType;

pub struct Catalog {
    next_table_id: u32,
    next_column_id: u32,
    next_index_id: u32,

    tables_by_id: HashMap<TableId, TableMeta>,
    tables_by_name: HashMap<String, TableId>,
    stats_by_id: HashMap<TableId, TableStats>,

    vector_indexes: RwLock<HashMap<IndexId, VectorIndexMeta>>,
    indexes_by_name: HashMap<String, IndexId>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            next_table_id: 1,
            next_column_id: 1,
            next_index_id: 1,
            tables_by_id: HashMap::new(),
            tables_by_name: HashMap::new(),
            stats_by_id: HashMap::new(),
            vector_indexes: RwLock::new(HashMap::new()),
            indexes_by_name: HashMap::new(),
        }
    }

    // ---------- table API ----------

    pub fn create_table(
        &mut self,
        name: String,
        kind: TableKind,
        columns: Vec<(String, DataType, bool)>,
    ) -> Result<TableId, CatalogError> {
        if self.tables_by_name.contains_key(&name) {
            return Err(CatalogError::TableExists(name));
        }

        let table_id = TableId(self.next_table_id);
        self.next_table_id += 1;

        let mut cols = Vec::new();
        for (name, ty, nullable) in columns {
            let col_id = ColumnId(self.next_column_id);
            self.next_column_id += 1;

            cols.push(crate::catalog::column::ColumnMeta {
                id: col_id,
                name,
                data_type: ty,
                nullable,
            });
        }

        let meta = TableMeta {
            id: table_id,
            name: name.clone(),
            kind,
            columns: cols,
            index_ids: Vec::new(),
        };

        self.tables_by_name.insert(name, table_id);
        self.tables_by_id.insert(table_id, meta);

        Ok(table_id)
    }

    pub fn get_table_by_id(&self, id: TableId) -> Option<&TableMeta> {
        self.tables_by_id.get(&id)
    }

    pub fn get_table_by_name(&self, name: &str) -> Option<&TableMeta> {
        self.tables_by_name
            .get(name)
            .and_then(|id| self.tables_by_id.get(id))
    }

    pub fn table_stats(&self, id: TableId) -> TableStats {
        self.stats_by_id.get(&id).copied().unwrap_or_default()
    }

    pub fn update_stats(&mut self, id: TableId, stats: TableStats) {
        self.stats_by_id.insert(id, stats);
    }

    // ---------- vector index API ----------

    pub fn create_vector_index(
        &mut self,
        name: String,
        table_id: TableId,
        column_id: ColumnId,
        dimension: usize,
        metrics: HashSet<String>,
    ) -> Result<IndexId, CatalogError> {
        if self.indexes_by_name.contains_key(&name) {
            return Err(CatalogError::IndexExists(name));
        }
        let table = self
            .tables_by_id
            .get_mut(&table_id)
            .ok_or_else(|| CatalogError::TableNotFound(format!("table id {}", table_id.0)))?;

        let index_id = IndexId(self.next_index_id);
        self.next_index_id += 1;

        let meta = VectorIndexMeta {
            id: index_id,
            name: name.clone(),
            table_id,
            column_id,
            dimension,
            metrics,
        };

        table.index_ids.push(index_id);
        self.indexes_by_name.insert(name, index_id);
        self.vector_indexes
            .write()
            .expect("vector index lock poisoned")
            .insert(index_id, meta);

        Ok(index_id)
    }

    pub fn get_vector_index(&self, id: IndexId) -> Option<VectorIndexMeta> {
        self.vector_indexes
            .read()
            .expect("vector index lock poisoned")
            .get(&id)
            .cloned()
    }

    /// Visit the table's vector indexes in creation order under the
    /// registry read guard, stopping at the first callback that returns
    /// `true`. The guard is released when the enumeration ends.
    pub fn bind_vector_indexes<F>(&self, table_id: TableId, mut f: F)
    where
        F: FnMut(&VectorIndexMeta) -> bool,
    {
        let Some(table) = self.tables_by_id.get(&table_id) else {
            return;
        };
        let indexes = self
            .vector_indexes
            .read()
            .expect("vector index lock poisoned");
        for id in &table.index_ids {
            if let Some(index) = indexes.get(id) {
                if f(index) {
                    break;
                }
            }
        }
    }
}
