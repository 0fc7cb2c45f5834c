// mod.rs - Input file loaders

pub mod fasta;
pub mod hierarchy;
