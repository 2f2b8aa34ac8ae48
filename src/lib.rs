pub mod cli;
pub mod dry_run;
pub mod model;
pub mod mongo;
pub mod seed;
