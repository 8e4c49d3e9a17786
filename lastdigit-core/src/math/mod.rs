pub mod deg;
