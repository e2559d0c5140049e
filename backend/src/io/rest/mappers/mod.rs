pub mod milk_entry_mapper;
