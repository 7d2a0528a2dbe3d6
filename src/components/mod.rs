pub mod detail;
pub mod help;
pub mod status_bar;
pub mod terminal;
pub mod tree;
