pub mod client;
pub mod collect;
pub mod course_work;
pub mod doc_link;
pub mod extract;
pub mod publish;
pub mod rate_limit;
pub mod services;
pub mod student;
pub mod submission;
pub mod types;

mod util;

#[cfg(test)]
pub(crate) mod testing;
