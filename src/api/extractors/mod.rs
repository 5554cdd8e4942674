pub mod lecturer;
