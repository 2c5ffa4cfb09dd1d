//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter         | Implements   | Connects to                   |
//! |-----------------|--------------|-------------------------------|
//! | `log_sink`      | EventSink    | `log` facade                  |
//! | `profile_store` | ConfigPort   | any StoragePort (postcard)    |
//! |                 | StoragePort  | in-memory map (`MemoryStorage`)|
//!
//! Sensor and NFC-transport adapters live with the hardware integration,
//! outside this crate.

pub mod log_sink;
pub mod profile_store;
