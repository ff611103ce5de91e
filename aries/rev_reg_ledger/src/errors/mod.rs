pub mod error;
mod mapping_indyvdr;
mod mapping_others;
