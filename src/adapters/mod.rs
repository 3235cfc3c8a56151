// Adapters layer: the terminal presentation adapter (gesture parsing + rendering).

pub mod console;
pub mod render;
