mod common;
mod engine;
mod likelihood;
