mod question;
mod results;

pub use self::question::*;
pub use self::results::*;
