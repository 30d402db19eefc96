pub mod classify;
pub mod record;
pub mod tokenize;
