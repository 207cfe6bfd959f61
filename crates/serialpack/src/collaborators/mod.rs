pub mod bytecode;
pub mod renderer;
pub mod url;
