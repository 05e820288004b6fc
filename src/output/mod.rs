pub mod formatter;

pub use formatter::{
    format_contention, format_olympic_table, format_points, format_records, format_schemes,
    format_stat_table, format_standings_table, should_use_colors,
};
