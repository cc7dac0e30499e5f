pub mod models;
pub mod logging;

// Record store: typed load of the data root + JSON cache
pub mod store;

// Derived figures over a loaded RecordSet
pub mod value;
pub mod economy;
pub mod xref;

pub mod search;
pub mod events;

// Release feed version check
pub mod update;
