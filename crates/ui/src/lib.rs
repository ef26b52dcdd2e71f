//! Server-rendered HTML pages for NumberNinja.

pub mod pages;
pub mod views;
pub mod vm;
