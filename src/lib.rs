pub mod cli;
pub mod cohort;
pub mod ctx;
pub mod io;
pub mod pipeline;
pub mod progression;
pub mod schema;
