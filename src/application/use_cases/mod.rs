pub mod location_import;
