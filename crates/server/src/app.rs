use std::sync::Arc;

use config::Config;
use database::diesel_db::{DieselReadHandle, DieselWriteHandle};

use crate::data::{ReadCommands, WriteCommands};

pub trait StateBase: Send + Sync + Clone + 'static {}

pub trait GetConfig {
    fn config(&self) -> &Config;
}

pub trait ReadData {
    fn read(&self) -> ReadCommands<'_>;
}

pub trait WriteData {
    fn write(&self) -> WriteCommands<'_>;
}

#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    read_handle: DieselReadHandle,
    write_handle: DieselWriteHandle,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        read_handle: DieselReadHandle,
        write_handle: DieselWriteHandle,
    ) -> Self {
        Self {
            config,
            read_handle,
            write_handle,
        }
    }
}

impl StateBase for AppState {}

impl GetConfig for AppState {
    fn config(&self) -> &Config {
        &self.config
    }
}

impl ReadData for AppState {
    fn read(&self) -> ReadCommands<'_> {
        ReadCommands::new(&self.read_handle)
    }
}

impl WriteData for AppState {
    fn write(&self) -> WriteCommands<'_> {
        WriteCommands::new(&self.write_handle)
    }
}
