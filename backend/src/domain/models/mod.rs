pub mod milk_entry;
