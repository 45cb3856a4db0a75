//! Pathfinding layer: shortest-path search and consumable paths.

mod path;
mod pathfinder;

pub use path::Path;
pub use pathfinder::find_path;
