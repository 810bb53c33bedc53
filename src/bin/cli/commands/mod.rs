pub mod due;
pub mod export;
pub mod list;
pub mod review;
pub mod search;
