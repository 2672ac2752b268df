pub mod cli;
pub mod controller;
pub mod edge_list;
pub mod enhancers;
pub mod error;
pub mod graph;
pub mod hops_cache;
pub mod lower_bound;
