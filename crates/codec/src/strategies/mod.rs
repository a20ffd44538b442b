mod cached;
mod handrolled;
mod map;
mod unrolled;
mod walk;

pub use cached::CachedTable;
pub use handrolled::HandRolled;
pub use map::MapSimplest;
pub use unrolled::Unrolled;
pub use walk::FieldWalk;
