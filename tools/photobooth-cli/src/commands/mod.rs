pub mod check;
pub mod compose;
pub mod list;
pub mod qr;
pub mod save;
pub mod serve;
