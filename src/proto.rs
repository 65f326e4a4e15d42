//! Generated bindings for the `android.emulation.control` package.
//!
//! Built from `proto/emulator_controller.proto` by `build.rs`. Server
//! codegen is included so tests can host a mock controller.

tonic::include_proto!("android.emulation.control");
