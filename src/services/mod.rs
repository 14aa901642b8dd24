// Service module exports

pub mod database;
pub mod event_store;
pub mod schedule_sync;
pub mod settings;
pub mod storage;
