// src/cache/mod.rs

pub mod simple_cache;

pub use simple_cache::SimpleCache;
