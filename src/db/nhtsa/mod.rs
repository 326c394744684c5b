pub mod all_makes;
