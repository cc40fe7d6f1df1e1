use shadow_rs::shadow;

shadow!(build);

// Internals
// ---------
pub mod heap_primitives;
pub mod open_list;

// Mazes
// -----
pub mod analysis;
pub mod generator;
pub mod grid;
pub mod maze;
pub mod path;
pub mod record;

// Algorithms
// ----------
pub mod algorithms;
