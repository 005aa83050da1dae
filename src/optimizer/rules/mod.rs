pub mod projection_prune;
pub mod vector_index_scan;
