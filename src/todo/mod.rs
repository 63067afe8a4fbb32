pub mod commands;
pub mod data;
pub mod remind;
pub mod storage;
pub mod util;
