pub mod config;
pub mod demo;
pub mod error;
pub mod matrix;
pub mod ops;
pub mod storage;
pub mod telemetry;
pub mod timing;

pub use config::DemoConfig;
pub use demo::{run_demo, run_demo_with_telemetry, DemoReport};
pub use error::{MatrixError, Result};
pub use matrix::Matrix;
pub use ops::{
    elementwise_accelerated, elementwise_baseline, sum_nested_loop, sum_reduce,
    try_elementwise_accelerated, try_elementwise_baseline,
};
pub use timing::{speedup, timed, TimingSample};
