//! Command line front end for `featsel`.
pub mod prompt;
pub mod run;
