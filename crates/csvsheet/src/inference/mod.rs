//! Column type inference over parsed grids.

mod numeric;

pub use numeric::{
    AnalyzerConfig, ColumnTypeAnalyzer, NumericColumnMask, DEFAULT_EXCLUDED_HEADER,
    DEFAULT_EXCLUDED_MARKER,
};
