pub mod generate;
pub mod score;
pub mod strings;
pub mod util;

pub use generate::*;
pub use score::*;
pub use strings::*;
pub use util::*;
