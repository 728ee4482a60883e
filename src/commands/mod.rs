pub mod doctor;
pub mod export;
pub mod list;
pub mod open;
pub mod prefs;
pub mod sync;
