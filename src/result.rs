use crate::error::Error as RedownErr;
pub type Result<T> = std::result::Result<T, RedownErr>;
