fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Use the vendored protoc unless the environment provides one.
    if std::env::var_os("PROTOC").is_none() {
        std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }

    tonic_build::configure()
        // Server codegen is only consumed by the integration tests,
        // which host a mock controller.
        .build_server(true)
        .compile_protos(&["proto/emulator_controller.proto"], &["proto"])?;

    Ok(())
}
