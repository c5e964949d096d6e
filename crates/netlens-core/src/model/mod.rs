mod de;
mod types;

pub use types::*;
