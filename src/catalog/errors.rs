use std::fmt;

#[derive(Debug)]
pub enum CatalogError {
    TableExists(String),
    TableNotFound(String),
    IndexExists(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TableExists(name) => write!(f, "table '{}' already exists", name),
            Self::TableNotFound(name) => write!(f, "table '{}' not found", name),
            Self::IndexExists(name) => write!(f, "index '{}' already exists", name),
        }
    }
}

impl std::error::Error for CatalogError {}
