// Production Runner timeline library
// Production events, Gantt drag/resize interaction and persistence

pub mod gantt;
pub mod models;
pub mod services;
pub mod utils;
