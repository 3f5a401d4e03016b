// Not every utils is used in every test, so we allow dead code
#![allow(unused_imports, dead_code)]

mod test_setup;
pub use test_setup::*;
mod utils;
pub use utils::*;
mod s3_utils;
pub use s3_utils::*;
mod dynamodb_setup;
pub use dynamodb_setup::*;
