pub mod config;
pub mod fetch;
pub mod leaderboard;
pub mod money;
pub mod page;
pub mod render;
pub mod table;

pub use config::SiteConfig;
pub use leaderboard::{build_leaderboard, Leaderboard, PlayerAggregate};
pub use page::{Navigation, Page};
pub use render::{create_table, RenderOutcome};
pub use table::{parse, Row, Table};
