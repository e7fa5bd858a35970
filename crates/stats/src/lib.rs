pub mod discover;
pub mod extract;
pub mod table;

pub use self::{
    discover::{DiscoverError, STATS_FILE_NAMES, find_stats_file},
    extract::{CompiledRule, ExtractError, PatternError, build_table, extract},
    table::{Row, Table, TableError},
};
