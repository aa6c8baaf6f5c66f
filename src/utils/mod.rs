//! Utility modules for projviz

pub mod imports;
