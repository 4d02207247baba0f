//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements                 | Connects to                     |
//! |-------------|----------------------------|---------------------------------|
//! | `hardware`  | SensorPort + ActuatorPort  | sensor source + embedded-hal pins |
//! | `sim`       | SensorPort + ActuatorPort  | in-memory simulated board       |
//! | `log_sink`  | EventSink                  | `log` facade                    |
//! | `time`      | —                          | monotonic system clock          |

pub mod hardware;
pub mod log_sink;
pub mod sim;
pub mod time;
